use glam::Vec2;
use rand::Rng;

use crate::api::config::MatchConfig;
use crate::api::types::{GoalSide, PlayerId};
use crate::components::player::Player;
use crate::core::field::Field;
use crate::core::time::Millis;

/// The net a player is lodged in too deeply to be left there, if any.
/// Depth is measured from the goal line to the centre, as a fraction of radius.
pub fn lodged_goal(player: &Player, field: &Field, depth_fraction: f32) -> Option<GoalSide> {
    if player.is_relocating() {
        return None;
    }
    player
        .lodged_in(field)
        .filter(|&(_, depth)| depth / player.body.radius > depth_fraction)
        .map(|(goal, _)| goal)
}

/// A random spot on the penalty-area front line of `goal`, within the
/// relocation band centred on the goal.
pub fn relocation_target(field: &Field, goal: GoalSide, rng: &mut impl Rng) -> Vec2 {
    let band = field.relocation_band;
    let y = field.center_y - band / 2.0 + rng.gen::<f32>() * band;
    Vec2::new(field.penalty_front(goal), y)
}

/// Start relocating every lodged player. Returns who moved and where to.
pub fn relocate_lodged(
    players: &mut [Player],
    field: &Field,
    config: &MatchConfig,
    rng: &mut impl Rng,
    now: Millis,
) -> Vec<(PlayerId, Vec2)> {
    let mut moved = Vec::new();
    for player in players.iter_mut() {
        let Some(goal) = lodged_goal(player, field, config.relocation_depth) else {
            continue;
        };
        let target = relocation_target(field, goal, rng);
        log::debug!("Relocating {:?} out of the {:?} net to {}", player.id, goal, target);
        player.start_relocation(target, now, config.relocation_duration_ms, config.relocation_easing);
        moved.push((player.id, target));
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Side;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (Field, MatchConfig, ChaCha8Rng) {
        let config = MatchConfig::default();
        (Field::from_config(&config), config, ChaCha8Rng::seed_from_u64(7))
    }

    fn player_at(id: u8, pos: Vec2) -> Player {
        Player::new(PlayerId(id), Side::Player, pos, &MatchConfig::default())
    }

    #[test]
    fn deep_player_is_lodged_shallow_is_not() {
        let (field, config, _) = setup();
        let deep = player_at(0, Vec2::new(field.left - 25.0, field.center_y));
        let shallow = player_at(1, Vec2::new(field.left - 15.0, field.center_y));
        let outside_span = player_at(2, Vec2::new(field.right + 25.0, field.goal_top - 5.0));
        assert_eq!(lodged_goal(&deep, &field, config.relocation_depth), Some(GoalSide::Left));
        assert_eq!(lodged_goal(&shallow, &field, config.relocation_depth), None);
        assert_eq!(lodged_goal(&outside_span, &field, config.relocation_depth), None);
    }

    #[test]
    fn targets_stay_in_band_on_penalty_line() {
        let (field, _, mut rng) = setup();
        for _ in 0..200 {
            let t = relocation_target(&field, GoalSide::Right, &mut rng);
            assert_eq!(t.x, field.right - field.penalty_depth);
            assert!(t.y >= field.center_y - 120.0 && t.y < field.center_y + 120.0, "y={}", t.y);
        }
    }

    #[test]
    fn relocate_lodged_starts_animations() {
        let (field, config, mut rng) = setup();
        let mut players = vec![
            player_at(0, Vec2::new(field.right + 28.0, field.center_y + 10.0)),
            player_at(1, Vec2::new(800.0, 500.0)),
        ];
        let moved = relocate_lodged(&mut players, &field, &config, &mut rng, 50.0);
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].0, PlayerId(0));
        assert!(players[0].is_relocating());
        assert!(!players[1].is_relocating());

        // A second pass leaves the animating player alone.
        assert!(relocate_lodged(&mut players, &field, &config, &mut rng, 60.0).is_empty());
    }
}
