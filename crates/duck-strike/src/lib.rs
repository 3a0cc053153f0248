pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use glam::Vec2;
pub use api::config::{ConfigError, MatchConfig};
pub use api::game::{Match, Phase, TickReport, TEAM_SIZE};
pub use api::snapshot::{AimView, BallView, GoalView, PlayerView, PostView, Snapshot};
pub use api::types::{GameEvent, GoalSide, GoalType, MatchEvent, PlayerId, Side};
pub use components::ball::Ball;
pub use components::body::MovingBody;
pub use components::player::{Player, Relocation};
pub use components::post::GoalPost;
pub use crate::core::field::Field;
pub use crate::core::time::{Clock, FixedTimestep, ManualClock, Millis};
pub use input::aim::Aim;
pub use input::queue::{custom_kinds, InputEvent, InputQueue};
pub use bridge::buffer::FrameBuffer;
pub use bridge::protocol::{BodyRecord, PostRecord, ProtocolLayout};
pub use systems::collision::CooldownTable;

pub use extensions::{Easing, lerp_vec2, ease_vec2};
