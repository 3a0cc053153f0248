use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identity of a player, assigned at match construction.
/// Human players take ids `0..5`, bot players `5..10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

/// One of the two teams. Also used for whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The human team (right half at kick-off).
    Player,
    /// The computer team (left half at kick-off).
    Bot,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Bot,
            Side::Bot => Side::Player,
        }
    }
}

/// Which goal mouth, by screen side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalSide {
    Left,
    Right,
}

impl GoalSide {
    /// The team whose net this is.
    pub fn defended_by(self) -> Side {
        match self {
            GoalSide::Left => Side::Bot,
            GoalSide::Right => Side::Player,
        }
    }

    /// The goal a team attacks.
    pub fn attacked_by(side: Side) -> GoalSide {
        match side {
            Side::Player => GoalSide::Left,
            Side::Bot => GoalSide::Right,
        }
    }
}

/// Classification of a ball entering a goal mouth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Ball went into the left net: the human team scores.
    PlayerGoal,
    /// Ball went into the right net: the bot team scores.
    BotGoal,
    /// Left net, but nobody had touched the ball since the last reset.
    FoulPlayerGoal,
    /// Right net, but nobody had touched the ball since the last reset.
    FoulBotGoal,
}

impl GoalType {
    pub fn classify(goal: GoalSide, untouched: bool) -> GoalType {
        match (goal, untouched) {
            (GoalSide::Left, false) => GoalType::PlayerGoal,
            (GoalSide::Left, true) => GoalType::FoulPlayerGoal,
            (GoalSide::Right, false) => GoalType::BotGoal,
            (GoalSide::Right, true) => GoalType::FoulBotGoal,
        }
    }

    pub fn is_foul(self) -> bool {
        matches!(self, GoalType::FoulPlayerGoal | GoalType::FoulBotGoal)
    }

    /// The team credited with the goal. Fouls credit nobody.
    pub fn scorer(self) -> Option<Side> {
        match self {
            GoalType::PlayerGoal => Some(Side::Player),
            GoalType::BotGoal => Some(Side::Bot),
            GoalType::FoulPlayerGoal | GoalType::FoulBotGoal => None,
        }
    }

    /// Numeric code used on the wire (0 is reserved for "no goal").
    pub fn code(self) -> f32 {
        match self {
            GoalType::PlayerGoal => 1.0,
            GoalType::BotGoal => 2.0,
            GoalType::FoulPlayerGoal => 3.0,
            GoalType::FoulBotGoal => 4.0,
        }
    }
}

/// Something that happened during a tick (or an input call), for the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    ShotFired { player: PlayerId, side: Side, velocity: Vec2 },
    AimCancelled { player: PlayerId },
    /// The ball crossed into a net; the scoring overlay follows after the goal delay.
    BallInNet { goal: GoalType },
    GoalScored { goal: GoalType, player_score: u32, bot_score: u32 },
    Foul { goal: GoalType },
    TurnChanged { turn: Side },
    PlayerRelocated { player: PlayerId, target: Vec2 },
    MatchReset,
}

/// Event kind codes for `GameEvent::kind`.
pub mod event_kinds {
    pub const SHOT_FIRED: f32 = 1.0;
    pub const AIM_CANCELLED: f32 = 2.0;
    pub const BALL_IN_NET: f32 = 3.0;
    pub const GOAL_SCORED: f32 = 4.0;
    pub const FOUL: f32 = 5.0;
    pub const TURN_CHANGED: f32 = 6.0;
    pub const PLAYER_RELOCATED: f32 = 7.0;
    pub const MATCH_RESET: f32 = 8.0;
}

fn side_code(side: Side) -> f32 {
    match side {
        Side::Player => 0.0,
        Side::Bot => 1.0,
    }
}

impl MatchEvent {
    /// Flatten into the fixed 4-float wire record.
    pub fn to_wire(&self) -> GameEvent {
        use event_kinds::*;
        let (kind, a, b, c) = match *self {
            MatchEvent::ShotFired { player, side, velocity } => {
                (SHOT_FIRED, player.0 as f32, side_code(side), velocity.length())
            }
            MatchEvent::AimCancelled { player } => (AIM_CANCELLED, player.0 as f32, 0.0, 0.0),
            MatchEvent::BallInNet { goal } => (BALL_IN_NET, goal.code(), 0.0, 0.0),
            MatchEvent::GoalScored { goal, player_score, bot_score } => {
                (GOAL_SCORED, goal.code(), player_score as f32, bot_score as f32)
            }
            MatchEvent::Foul { goal } => (FOUL, goal.code(), 0.0, 0.0),
            MatchEvent::TurnChanged { turn } => (TURN_CHANGED, side_code(turn), 0.0, 0.0),
            MatchEvent::PlayerRelocated { player, target } => {
                (PLAYER_RELOCATED, player.0 as f32, target.x, target.y)
            }
            MatchEvent::MatchReset => (MATCH_RESET, 0.0, 0.0, 0.0),
        };
        GameEvent { kind, a, b, c }
    }
}

/// A game event as it crosses to TypeScript.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fouls_credit_nobody() {
        assert_eq!(GoalType::FoulPlayerGoal.scorer(), None);
        assert_eq!(GoalType::FoulBotGoal.scorer(), None);
        assert_eq!(GoalType::PlayerGoal.scorer(), Some(Side::Player));
        assert_eq!(GoalType::BotGoal.scorer(), Some(Side::Bot));
    }

    #[test]
    fn classify_by_net_and_touch() {
        assert_eq!(GoalType::classify(GoalSide::Left, true), GoalType::FoulPlayerGoal);
        assert_eq!(GoalType::classify(GoalSide::Right, false), GoalType::BotGoal);
    }

    #[test]
    fn each_team_attacks_the_others_net() {
        for side in [Side::Player, Side::Bot] {
            assert_eq!(GoalSide::attacked_by(side).defended_by(), side.opponent());
        }
    }

    #[test]
    fn game_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }

    #[test]
    fn goal_scored_wire_record_carries_score() {
        let wire = MatchEvent::GoalScored {
            goal: GoalType::BotGoal,
            player_score: 2,
            bot_score: 3,
        }
        .to_wire();
        assert_eq!(wire, GameEvent { kind: event_kinds::GOAL_SCORED, a: 2.0, b: 2.0, c: 3.0 });
    }
}
