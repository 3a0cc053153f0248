use glam::Vec2;

use crate::api::game::Phase;
use crate::api::snapshot::Snapshot;
use crate::api::types::{GameEvent, GoalSide, MatchEvent, Side};
use crate::bridge::protocol::*;

/// Owns the flat `f32` buffer the JS side reads through a pointer.
/// Rewritten in full after every frame.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let mut data = vec![0.0; layout.buffer_total_floats];
        data[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        data[HEADER_MAX_BODIES] = layout.max_bodies as f32;
        data[HEADER_MAX_POSTS] = layout.max_posts as f32;
        data[HEADER_MAX_EVENTS] = layout.max_events as f32;
        Self { layout, data }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    pub fn header(&self, index: usize) -> f32 {
        self.data[index]
    }

    /// Pack one frame: header, bodies, posts and this frame's events.
    /// Anything past a section's capacity is dropped with a warning.
    pub fn write(&mut self, snapshot: &Snapshot, events: &[MatchEvent], world: Vec2) {
        let h = &mut self.data[..HEADER_FLOATS];
        h[HEADER_TICK] = snapshot.tick as f32;
        h[HEADER_PLAYER_SCORE] = snapshot.player_score as f32;
        h[HEADER_BOT_SCORE] = snapshot.bot_score as f32;
        h[HEADER_TURN] = match snapshot.turn {
            Side::Player => 0.0,
            Side::Bot => 1.0,
        };
        h[HEADER_TURN_COMPLETE] = flag(snapshot.turn_complete);
        h[HEADER_PHASE] = match snapshot.phase {
            Phase::Aiming => 0.0,
            Phase::Simulating => 1.0,
            Phase::Relocating => 2.0,
        };
        h[HEADER_GOAL_TYPE] = snapshot.goal.map_or(0.0, |g| g.goal.code());
        h[HEADER_GOAL_DISPLAY] = flag(snapshot.goal.is_some_and(|g| g.display));

        h[HEADER_AIM_ACTIVE] = flag(snapshot.aim.is_some());
        if let Some(aim) = snapshot.aim {
            h[HEADER_AIM_PLAYER] = aim.player.0 as f32;
            h[HEADER_AIM_START_X] = aim.start.x;
            h[HEADER_AIM_START_Y] = aim.start.y;
            h[HEADER_AIM_CURRENT_X] = aim.current.x;
            h[HEADER_AIM_CURRENT_Y] = aim.current.y;
            h[HEADER_AIM_POWER] = aim.power;
        } else {
            h[HEADER_AIM_PLAYER..=HEADER_AIM_POWER].fill(0.0);
        }
        h[HEADER_WORLD_WIDTH] = world.x;
        h[HEADER_WORLD_HEIGHT] = world.y;

        // ---- Bodies ----
        let ball = &snapshot.ball;
        let mut bodies = Vec::with_capacity(snapshot.players.len() + 1);
        bodies.push(BodyRecord {
            x: ball.pos.x,
            y: ball.pos.y,
            vx: ball.vel.x,
            vy: ball.vel.y,
            radius: ball.radius,
            kind: body_kinds::BALL,
            id: 0.0,
            flags: bits(&[(ball.moving, body_flags::MOVING), (ball.in_goal, body_flags::IN_GOAL)]),
        });
        bodies.extend(snapshot.players.iter().map(|p| BodyRecord {
            x: p.pos.x,
            y: p.pos.y,
            vx: p.vel.x,
            vy: p.vel.y,
            radius: p.radius,
            kind: match p.side {
                Side::Player => body_kinds::HUMAN,
                Side::Bot => body_kinds::BOT,
            },
            id: p.id.0 as f32,
            flags: bits(&[
                (p.moving, body_flags::MOVING),
                (p.selected, body_flags::SELECTED),
                (p.relocating, body_flags::RELOCATING),
            ]),
        }));
        let body_count = self.write_section(
            "bodies",
            &bodies,
            self.layout.body_data_offset,
            self.layout.max_bodies,
        );

        // ---- Posts ----
        let posts: Vec<PostRecord> = snapshot
            .posts
            .iter()
            .map(|post| PostRecord {
                x: post.pos.x,
                y: post.pos.y,
                radius: post.radius,
                goal: match post.goal {
                    GoalSide::Left => 0.0,
                    GoalSide::Right => 1.0,
                },
            })
            .collect();
        let post_count = self.write_section(
            "posts",
            &posts,
            self.layout.post_data_offset,
            self.layout.max_posts,
        );

        // ---- Events ----
        let wire: Vec<GameEvent> = events.iter().map(MatchEvent::to_wire).collect();
        let event_count = self.write_section(
            "events",
            &wire,
            self.layout.event_data_offset,
            self.layout.max_events,
        );

        self.data[HEADER_BODY_COUNT] = body_count as f32;
        self.data[HEADER_POST_COUNT] = post_count as f32;
        self.data[HEADER_EVENT_COUNT] = event_count as f32;
    }

    fn write_section<T: bytemuck::Pod>(
        &mut self,
        name: &str,
        records: &[T],
        offset: usize,
        capacity: usize,
    ) -> usize {
        let count = records.len().min(capacity);
        if count < records.len() {
            log::warn!("Frame buffer full: dropping {} {}", records.len() - count, name);
        }
        let floats: &[f32] = bytemuck::cast_slice(&records[..count]);
        self.data[offset..offset + floats.len()].copy_from_slice(floats);
        count
    }
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn bits(flags: &[(bool, u32)]) -> f32 {
    flags
        .iter()
        .filter(|(set, _)| *set)
        .fold(0u32, |acc, (_, bit)| acc | bit) as f32
}
