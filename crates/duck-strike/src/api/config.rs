use serde::{Deserialize, Serialize};

use crate::core::time::Millis;
use crate::extensions::easing::Easing;

/// Match configuration, fixed for the lifetime of a `Match`.
///
/// Every field has a default, so a JSON config only needs the values it
/// overrides (`{"max_speed": 30}` is a complete config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    // -- Field geometry --
    /// Total world width in game units.
    pub field_width: f32,
    /// Total world height in game units.
    pub field_height: f32,
    /// Distance from the world edge to each goal line.
    pub side_margin: f32,
    /// Distance from the world top to the top touchline.
    pub top_margin: f32,
    /// Distance from the world bottom to the bottom touchline.
    pub bottom_margin: f32,
    /// Vertical opening of each goal mouth.
    pub goal_height: f32,
    /// How far the net extends behind the goal line.
    pub goal_depth: f32,
    pub goal_post_radius: f32,
    /// Depth of the penalty area in front of each goal.
    pub penalty_depth: f32,
    /// Height of the band (centred on the goal) a relocated player lands in.
    pub relocation_band: f32,

    // -- Bodies --
    pub ball_radius: f32,
    pub player_radius: f32,
    pub ball_friction: f32,
    pub ball_friction_exponent: f32,
    pub player_friction: f32,
    pub player_friction_exponent: f32,
    /// Below this speed a body snaps to rest.
    pub stop_threshold: f32,
    /// Integration sub-steps per tick.
    pub substeps: u32,

    // -- Shooting --
    pub max_speed: f32,
    pub max_drag_distance: f32,
    /// Drags shorter than this cancel the aim instead of shooting.
    pub min_drag: f32,

    // -- Collisions --
    /// Ball against player.
    pub restitution: f32,
    /// Player against player.
    pub player_restitution: f32,
    pub ball_wall_restitution: f32,
    pub player_wall_restitution: f32,
    /// Share of a ball-player impulse the player receives.
    pub striker_share: f32,
    /// Velocity multiplier for reflection off a goal post.
    pub post_bounce: f32,
    /// Per-tick velocity multiplier while the ball sits in a net.
    pub in_goal_damping: f32,
    pub collision_cooldown_ms: Millis,

    // -- Timing --
    /// Time between the ball entering a net and the goal being awarded.
    pub goal_delay_ms: Millis,
    pub relocation_duration_ms: Millis,
    /// Fraction of a player's radius past the goal line that triggers relocation.
    pub relocation_depth: f32,
    pub relocation_easing: Easing,

    // -- Bot --
    pub bot_think_ms: Millis,
    pub bot_drag_distance: f32,
    /// Half-range of the random vertical offset on the bot's goal target.
    pub bot_aim_spread: f32,
    /// How far past the goal line the bot aims.
    pub bot_goal_inset: f32,
    /// Half-range of the random aiming error, in radians.
    pub bot_angle_error: f32,
    /// Half-range of the random power error, as a fraction.
    pub bot_power_error: f32,

    /// Seed for the bot and relocation randomness.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field_width: 1600.0,
            field_height: 900.0,
            side_margin: 240.0,
            top_margin: 180.0,
            bottom_margin: 80.0,
            goal_height: 180.0,
            goal_depth: 60.0,
            goal_post_radius: 8.0,
            penalty_depth: 150.0,
            relocation_band: 240.0,

            ball_radius: 15.0,
            player_radius: 30.0,
            ball_friction: 0.97,
            ball_friction_exponent: 1.2,
            player_friction: 0.95,
            player_friction_exponent: 1.15,
            stop_threshold: 0.5,
            substeps: 5,

            max_speed: 25.0,
            max_drag_distance: 200.0,
            min_drag: 5.0,

            restitution: 0.85,
            player_restitution: 0.7,
            ball_wall_restitution: 0.7,
            player_wall_restitution: 0.5,
            striker_share: 0.8,
            post_bounce: 1.5,
            in_goal_damping: 0.75,
            collision_cooldown_ms: 30.0,

            goal_delay_ms: 500.0,
            relocation_duration_ms: 800.0,
            relocation_depth: 0.7,
            relocation_easing: Easing::QuadInOut,

            bot_think_ms: 1000.0,
            bot_drag_distance: 150.0,
            bot_aim_spread: 50.0,
            bot_goal_inset: 30.0,
            bot_angle_error: 0.1,
            bot_power_error: 0.12,

            seed: 0x5eed_d0c5,
        }
    }
}

/// Configuration errors, reported once at match construction.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("inconsistent field geometry: {0}")]
    Geometry(&'static str),
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

impl MatchConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every range contract. Called by `Match::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("goal_height", self.goal_height),
            ("goal_depth", self.goal_depth),
            ("goal_post_radius", self.goal_post_radius),
            ("ball_radius", self.ball_radius),
            ("player_radius", self.player_radius),
            ("ball_friction_exponent", self.ball_friction_exponent),
            ("player_friction_exponent", self.player_friction_exponent),
            ("stop_threshold", self.stop_threshold),
            ("max_speed", self.max_speed),
            ("max_drag_distance", self.max_drag_distance),
            ("post_bounce", self.post_bounce),
        ] {
            positive(field, value as f64)?;
        }
        positive("substeps", self.substeps as f64)?;

        for (field, value) in [
            ("ball_friction", self.ball_friction),
            ("player_friction", self.player_friction),
        ] {
            // Strictly inside (0, 1): 0 stops dead, 1 never stops.
            if !(value > 0.0 && value < 1.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }

        for (field, value) in [
            ("restitution", self.restitution),
            ("player_restitution", self.player_restitution),
            ("ball_wall_restitution", self.ball_wall_restitution),
            ("player_wall_restitution", self.player_wall_restitution),
            ("striker_share", self.striker_share),
            ("in_goal_damping", self.in_goal_damping),
            ("relocation_depth", self.relocation_depth),
            ("bot_power_error", self.bot_power_error),
        ] {
            within(field, value as f64, 0.0, 1.0)?;
        }

        for (field, value) in [
            ("side_margin", self.side_margin),
            ("top_margin", self.top_margin),
            ("bottom_margin", self.bottom_margin),
            ("min_drag", self.min_drag),
            ("penalty_depth", self.penalty_depth),
            ("relocation_band", self.relocation_band),
            ("bot_drag_distance", self.bot_drag_distance),
            ("bot_goal_inset", self.bot_goal_inset),
        ] {
            within(field, value as f64, 0.0, f64::from(f32::MAX))?;
        }

        // Sampled from `-x..=x`: at most half a turn, at most the field height.
        within("bot_aim_spread", self.bot_aim_spread as f64, 0.0, self.field_height as f64)?;
        within("bot_angle_error", self.bot_angle_error as f64, 0.0, std::f64::consts::PI)?;

        for (field, value) in [
            ("collision_cooldown_ms", self.collision_cooldown_ms),
            ("goal_delay_ms", self.goal_delay_ms),
            ("relocation_duration_ms", self.relocation_duration_ms),
            ("bot_think_ms", self.bot_think_ms),
        ] {
            within(field, value, 0.0, f64::MAX)?;
        }

        let play_width = self.field_width - 2.0 * self.side_margin;
        let play_height = self.field_height - self.top_margin - self.bottom_margin;
        if play_width <= 2.0 * self.player_radius {
            return Err(ConfigError::Geometry("side margins leave no room to play"));
        }
        if play_height <= 2.0 * self.player_radius {
            return Err(ConfigError::Geometry("top/bottom margins leave no room to play"));
        }
        if self.goal_height >= play_height {
            return Err(ConfigError::Geometry("goal mouth is taller than the field"));
        }
        if self.goal_depth > self.side_margin {
            return Err(ConfigError::Geometry("net extends past the world edge"));
        }
        if self.relocation_band > play_height {
            return Err(ConfigError::Geometry("relocation band is taller than the field"));
        }
        if 2.0 * self.penalty_depth >= play_width {
            return Err(ConfigError::Geometry("penalty areas overlap"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        MatchConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MatchConfig::from_json(r#"{ "max_speed": 30.0, "seed": 7 }"#).unwrap();
        assert_eq!(config.max_speed, 30.0);
        assert_eq!(config.seed, 7);
        assert_eq!(config.substeps, 5);
        assert_eq!(config.relocation_easing, Easing::QuadInOut);
    }

    #[test]
    fn easing_is_read_by_name() {
        let config = MatchConfig::from_json(r#"{ "relocation_easing": "sine_in_out" }"#).unwrap();
        assert_eq!(config.relocation_easing, Easing::SineInOut);
    }

    #[test]
    fn restitution_above_one_is_rejected() {
        let config = MatchConfig {
            restitution: 1.5,
            ..MatchConfig::default()
        };
        match config.validate() {
            Err(ConfigError::OutOfRange { field, .. }) => assert_eq!(field, "restitution"),
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn friction_of_one_is_rejected() {
        let config = MatchConfig {
            ball_friction: 1.0,
            ..MatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange { field: "ball_friction", .. })));
    }

    #[test]
    fn zero_substeps_is_rejected() {
        let config = MatchConfig {
            substeps: 0,
            ..MatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive { field: "substeps", .. })));
    }

    #[test]
    fn oversized_goal_is_rejected() {
        let config = MatchConfig {
            goal_height: 700.0,
            ..MatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Geometry(_))));
    }

    #[test]
    fn huge_bot_error_ranges_are_rejected() {
        let config = MatchConfig {
            bot_angle_error: f32::MAX,
            ..MatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange { field: "bot_angle_error", .. })));

        let config = MatchConfig {
            bot_aim_spread: 1.0e30,
            ..MatchConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange { field: "bot_aim_spread", .. })));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(MatchConfig::from_json("{ nope"), Err(ConfigError::Json(_))));
    }
}
