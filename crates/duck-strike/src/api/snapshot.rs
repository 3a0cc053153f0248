use glam::Vec2;
use serde::Serialize;

use crate::api::game::{Match, Phase};
use crate::api::types::{GoalSide, GoalType, PlayerId, Side};
use crate::core::time::{Clock, Millis};

/// Read-only view of the match for the renderer, taken after a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub now: Millis,
    pub turn: Side,
    pub turn_complete: bool,
    pub phase: Phase,
    pub player_score: u32,
    pub bot_score: u32,
    pub ball: BallView,
    pub players: Vec<PlayerView>,
    pub posts: Vec<PostView>,
    /// Present from the moment the ball enters a net through the tick that
    /// awards it.
    pub goal: Option<GoalView>,
    pub aim: Option<AimView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub moving: bool,
    pub in_goal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub side: Side,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub selected: bool,
    pub moving: bool,
    pub relocating: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PostView {
    pub pos: Vec2,
    pub radius: f32,
    pub goal: GoalSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalView {
    pub goal: GoalType,
    /// The goal delay has elapsed: show the scoring overlay.
    pub display: bool,
}

/// Slingshot line from `start` to `current`, with power in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AimView {
    pub player: PlayerId,
    pub start: Vec2,
    pub current: Vec2,
    pub power: f32,
}

impl Snapshot {
    pub fn capture<C: Clock>(m: &Match<C>) -> Self {
        let config = m.config();
        let now = m.now();
        let ball = m.ball();
        let (player_score, bot_score) = m.score();

        Self {
            tick: m.tick_count(),
            now,
            turn: m.turn(),
            turn_complete: m.is_turn_complete(),
            phase: m.phase(),
            player_score,
            bot_score,
            ball: BallView {
                pos: ball.body.pos,
                vel: ball.body.vel,
                radius: ball.body.radius,
                moving: ball.body.moving,
                in_goal: ball.in_goal,
            },
            players: m
                .players()
                .iter()
                .map(|p| PlayerView {
                    id: p.id,
                    side: p.side,
                    pos: p.body.pos,
                    vel: p.body.vel,
                    radius: p.body.radius,
                    selected: p.selected,
                    moving: p.body.moving,
                    relocating: p.is_relocating(),
                })
                .collect(),
            posts: m
                .posts()
                .iter()
                .map(|post| PostView {
                    pos: post.pos,
                    radius: post.radius,
                    goal: post.goal,
                })
                .collect(),
            goal: match m.awarded_goal() {
                Some(goal) => Some(GoalView {
                    goal,
                    display: true,
                }),
                None => ball.goal.map(|goal| GoalView {
                    goal,
                    display: ball.goal_display_ready(now, config.goal_delay_ms),
                }),
            },
            aim: m.aim().map(|aim| AimView {
                player: aim.player,
                start: aim.start,
                current: aim.current,
                power: aim.power(config.max_drag_distance),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::MatchConfig;

    #[test]
    fn kickoff_snapshot() {
        let m = Match::new(MatchConfig::default()).unwrap();
        let snap = m.snapshot();
        assert_eq!(snap.players.len(), 10);
        assert_eq!(snap.posts.len(), 4);
        assert_eq!(snap.ball.pos, Vec2::new(800.0, 500.0));
        assert_eq!(snap.phase, Phase::Aiming);
        assert!(snap.goal.is_none());
        assert!(snap.aim.is_none());
    }

    #[test]
    fn aim_shows_power() {
        let mut m = Match::new(MatchConfig::default()).unwrap();
        let id = m.players()[0].id;
        let start = m.players()[0].body.pos;
        m.begin_aim(id);
        m.update_aim(start + Vec2::new(0.0, 100.0));
        let aim = m.snapshot().aim.unwrap();
        assert_eq!(aim.player, id);
        assert_eq!(aim.power, 0.5);
        assert!(m.snapshot().players[0].selected);
    }

    #[test]
    fn serializes_to_json() {
        let m = Match::new(MatchConfig::default()).unwrap();
        let json = serde_json::to_value(m.snapshot()).unwrap();
        assert_eq!(json["turn"], "player");
        assert_eq!(json["phase"], "aiming");
        assert_eq!(json["players"][5]["side"], "bot");
    }
}
