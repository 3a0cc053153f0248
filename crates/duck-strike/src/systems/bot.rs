use glam::Vec2;
use rand::Rng;

use crate::api::config::MatchConfig;
use crate::api::types::{GoalSide, PlayerId, Side};
use crate::components::player::Player;
use crate::core::field::Field;
use crate::core::geometry;
use crate::core::time::Millis;

/// Thinking-delay state for the computer side.
///
/// The delay is polled each tick rather than waited on: the first poll starts
/// the timer and later polls report whether it has run out.
#[derive(Debug, Clone, Default)]
pub struct BotBrain {
    thinking_since: Option<Millis>,
}

impl BotBrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start thinking if idle. Returns true once `delay` has elapsed, which
    /// also clears the timer for the next turn.
    pub fn poll(&mut self, now: Millis, delay: Millis) -> bool {
        let since = *self.thinking_since.get_or_insert(now);
        if now - since >= delay {
            self.thinking_since = None;
            true
        } else {
            false
        }
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking_since.is_some()
    }

    pub fn reset(&mut self) {
        self.thinking_since = None;
    }
}

/// A shot the bot has decided on, as a drag vector in the slingshot sense.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotShot {
    pub player: PlayerId,
    pub drag: Vec2,
    /// Where the bot meant to send the ball.
    pub target: Vec2,
}

/// Point the bot aims the ball at: just inside the net it attacks, shifted
/// vertically by a random amount within `bot_aim_spread`.
pub fn goal_target(field: &Field, config: &MatchConfig, rng: &mut impl Rng) -> Vec2 {
    let goal = GoalSide::attacked_by(Side::Bot);
    let inset = match goal {
        GoalSide::Left => -config.bot_goal_inset,
        GoalSide::Right => config.bot_goal_inset,
    };
    let spread = config.bot_aim_spread;
    Vec2::new(
        field.goal_line(goal) + inset,
        field.center_y + rng.gen_range(-spread..=spread),
    )
}

/// Pick the bot player nearest the ball and plan a shot that sends it
/// through the ball towards the opposing goal, with aiming and power error.
pub fn plan_shot(
    players: &[Player],
    ball: Vec2,
    field: &Field,
    config: &MatchConfig,
    rng: &mut impl Rng,
) -> Option<BotShot> {
    let shooter = players
        .iter()
        .filter(|p| p.is_bot() && !p.is_relocating())
        .min_by(|a, b| {
            geometry::distance(a.body.pos, ball).total_cmp(&geometry::distance(b.body.pos, ball))
        })?;

    let target = goal_target(field, config, rng);
    let to_goal = (target - ball).try_normalize().unwrap_or(Vec2::X);
    // Strike the ball from behind, on the line from the target through it.
    let contact_point = ball - to_goal * (config.ball_radius + config.player_radius);
    let direction = (contact_point - shooter.body.pos)
        .try_normalize()
        .unwrap_or(to_goal);

    let angle_error = rng.gen_range(-config.bot_angle_error..=config.bot_angle_error);
    let power = 1.0 + rng.gen_range(-config.bot_power_error..=config.bot_power_error);
    let drag = geometry::rotate(-direction * config.bot_drag_distance, angle_error) * power;

    log::debug!(
        "Bot {:?} aims at {} (angle error {:.3}, power {:.2})",
        shooter.id,
        target,
        angle_error,
        power
    );
    Some(BotShot {
        player: shooter.id,
        drag,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (Field, MatchConfig) {
        let config = MatchConfig::default();
        (Field::from_config(&config), config)
    }

    fn team(config: &MatchConfig, field: &Field) -> Vec<Player> {
        let mut players = Vec::new();
        for (i, pos) in field.kickoff_positions(Side::Player).into_iter().enumerate() {
            players.push(Player::new(PlayerId(i as u8), Side::Player, pos, config));
        }
        for (i, pos) in field.kickoff_positions(Side::Bot).into_iter().enumerate() {
            players.push(Player::new(PlayerId(5 + i as u8), Side::Bot, pos, config));
        }
        players
    }

    #[test]
    fn brain_waits_for_the_delay() {
        let mut brain = BotBrain::new();
        assert!(!brain.poll(100.0, 1000.0));
        assert!(brain.is_thinking());
        assert!(!brain.poll(1099.0, 1000.0));
        assert!(brain.poll(1100.0, 1000.0));
        assert!(!brain.is_thinking());
    }

    #[test]
    fn nearest_bot_shoots() {
        let (field, config) = setup();
        let players = team(&config, &field);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // Ball right next to the middle bot.
        let shot = plan_shot(&players, Vec2::new(560.0, 500.0), &field, &config, &mut rng).unwrap();
        assert_eq!(shot.player, PlayerId(7));
    }

    #[test]
    fn shot_sends_the_ball_towards_the_opposing_goal() {
        let (field, config) = setup();
        let players = team(&config, &field);
        let ball = field.center();
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let shot = plan_shot(&players, ball, &field, &config, &mut rng).unwrap();
            // Slingshot: the launch velocity is opposite to the drag.
            let launch = -shot.drag;
            assert!(launch.x > 0.0, "seed {} launch {:?}", seed, launch);
            let len = shot.drag.length();
            let lo = config.bot_drag_distance * (1.0 - config.bot_power_error) - 1e-3;
            let hi = config.bot_drag_distance * (1.0 + config.bot_power_error) + 1e-3;
            assert!((lo..=hi).contains(&len), "drag length {}", len);
            assert!(shot.target.x > field.right);
            assert!((shot.target.y - field.center_y).abs() <= config.bot_aim_spread + 1e-3);
        }
    }

    #[test]
    fn same_seed_same_shot() {
        let (field, config) = setup();
        let players = team(&config, &field);
        let a = plan_shot(&players, field.center(), &field, &config, &mut ChaCha8Rng::seed_from_u64(9));
        let b = plan_shot(&players, field.center(), &field, &config, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn no_bots_no_shot() {
        let (field, config) = setup();
        let players: Vec<Player> = team(&config, &field).into_iter().filter(|p| !p.is_bot()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(plan_shot(&players, field.center(), &field, &config, &mut rng).is_none());
    }
}
