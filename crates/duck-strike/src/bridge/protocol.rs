//! Flat frame buffer layout shared with the TypeScript renderer.
//! Must stay in sync with `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 24 floats]
//! [Bodies: max_bodies × 8 floats]   ball first, then players by id
//! [Posts:  max_posts × 4 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header so TypeScript can compute offsets.

use bytemuck::{Pod, Zeroable};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 24;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_TICK: usize = 1;
pub const HEADER_PLAYER_SCORE: usize = 2;
pub const HEADER_BOT_SCORE: usize = 3;
/// 0 = human, 1 = bot.
pub const HEADER_TURN: usize = 4;
pub const HEADER_TURN_COMPLETE: usize = 5;
/// 0 = aiming, 1 = simulating, 2 = relocating.
pub const HEADER_PHASE: usize = 6;
/// `GoalType::code()`, 0 when no goal is pending.
pub const HEADER_GOAL_TYPE: usize = 7;
pub const HEADER_GOAL_DISPLAY: usize = 8;
pub const HEADER_AIM_ACTIVE: usize = 9;
pub const HEADER_AIM_PLAYER: usize = 10;
pub const HEADER_AIM_START_X: usize = 11;
pub const HEADER_AIM_START_Y: usize = 12;
pub const HEADER_AIM_CURRENT_X: usize = 13;
pub const HEADER_AIM_CURRENT_Y: usize = 14;
pub const HEADER_AIM_POWER: usize = 15;
pub const HEADER_MAX_BODIES: usize = 16;
pub const HEADER_BODY_COUNT: usize = 17;
pub const HEADER_MAX_POSTS: usize = 18;
pub const HEADER_POST_COUNT: usize = 19;
pub const HEADER_MAX_EVENTS: usize = 20;
pub const HEADER_EVENT_COUNT: usize = 21;
pub const HEADER_WORLD_WIDTH: usize = 22;
pub const HEADER_WORLD_HEIGHT: usize = 23;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per body record (wire format, fixed).
pub const BODY_FLOATS: usize = 8;

/// Floats per post record: x, y, radius, goal.
pub const POST_FLOATS: usize = 4;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Ball plus ten players, with headroom.
pub const DEFAULT_MAX_BODIES: usize = 16;
pub const DEFAULT_MAX_POSTS: usize = 4;
pub const DEFAULT_MAX_EVENTS: usize = 32;

/// `BodyRecord::kind` values.
pub mod body_kinds {
    pub const BALL: f32 = 0.0;
    pub const HUMAN: f32 = 1.0;
    pub const BOT: f32 = 2.0;
}

/// `BodyRecord::flags` bits.
pub mod body_flags {
    pub const MOVING: u32 = 1;
    pub const SELECTED: u32 = 1 << 1;
    pub const RELOCATING: u32 = 1 << 2;
    pub const IN_GOAL: u32 = 1 << 3;
}

/// One ball or player as it crosses to TypeScript.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyRecord {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    /// One of [`body_kinds`].
    pub kind: f32,
    /// Player id; 0 for the ball.
    pub id: f32,
    /// [`body_flags`] bits, stored as a float.
    pub flags: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PostRecord {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// 0 = left goal, 1 = right goal.
    pub goal: f32,
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,
    pub max_posts: usize,
    pub max_events: usize,

    /// Size of body data section in floats.
    pub body_data_floats: usize,
    /// Size of post data section in floats.
    pub post_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where body data begins.
    pub body_data_offset: usize,
    /// Offset (in floats) where post data begins.
    pub post_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_bodies: usize, max_posts: usize, max_events: usize) -> Self {
        let body_data_floats = max_bodies * BODY_FLOATS;
        let post_data_floats = max_posts * POST_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let body_data_offset = HEADER_FLOATS;
        let post_data_offset = body_data_offset + body_data_floats;
        let event_data_offset = post_data_offset + post_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_bodies,
            max_posts,
            max_events,
            body_data_floats,
            post_data_floats,
            event_data_floats,
            body_data_offset,
            post_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BODIES, DEFAULT_MAX_POSTS, DEFAULT_MAX_EVENTS)
    }
}
