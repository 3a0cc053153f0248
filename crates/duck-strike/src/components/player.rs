use glam::Vec2;

use crate::api::config::MatchConfig;
use crate::api::types::{GoalSide, PlayerId, Side};
use crate::components::body::MovingBody;
use crate::core::field::Field;
use crate::core::geometry;
use crate::core::time::Millis;
use crate::extensions::easing::{ease_vec2, Easing};

/// Vertical damping when a player hits the back of a net.
const REAR_NET_DAMPING: f32 = 0.7;

/// Scripted move out of a goal mouth. Physics is suspended while it runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relocation {
    pub from: Vec2,
    pub to: Vec2,
    pub started: Millis,
    pub duration: Millis,
    pub easing: Easing,
}

impl Relocation {
    /// Linear progress in [0, 1].
    pub fn progress(&self, now: Millis) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started) / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn position(&self, now: Millis) -> Vec2 {
        ease_vec2(self.from, self.to, self.progress(now), self.easing)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub side: Side,
    pub body: MovingBody,
    /// Kick-off position, restored on every reset.
    pub start: Vec2,
    /// Highlighted by the aim UI.
    pub selected: bool,
    pub relocation: Option<Relocation>,
}

impl Player {
    pub fn new(id: PlayerId, side: Side, start: Vec2, config: &MatchConfig) -> Self {
        Self {
            id,
            side,
            body: MovingBody::new(
                start,
                config.player_radius,
                config.player_friction,
                config.player_friction_exponent,
            ),
            start,
            selected: false,
            relocation: None,
        }
    }

    pub fn is_bot(&self) -> bool {
        self.side == Side::Bot
    }

    pub fn is_relocating(&self) -> bool {
        self.relocation.is_some()
    }

    /// At rest and not being relocated.
    pub fn is_settled(&self) -> bool {
        !self.body.moving && self.relocation.is_none()
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        geometry::contains_point(self.body.pos, self.body.radius, point)
    }

    /// Slingshot: launch opposite to `drag`, with speed proportional to its
    /// length up to `max_drag`. Returns the new velocity.
    pub fn shoot(&mut self, drag: Vec2, max_speed: f32, max_drag: f32) -> Vec2 {
        let drag = drag.clamp_length_max(max_drag);
        self.body.vel = -drag * (max_speed / max_drag);
        self.body.moving = true;
        self.body.vel
    }

    pub fn start_relocation(&mut self, to: Vec2, now: Millis, duration: Millis, easing: Easing) {
        self.body.stop();
        self.relocation = Some(Relocation {
            from: self.body.pos,
            to,
            started: now,
            duration,
            easing,
        });
    }

    /// Advance one tick: either the relocation animation or normal physics.
    pub fn update(&mut self, field: &Field, config: &MatchConfig, now: Millis) {
        if let Some(relocation) = self.relocation {
            self.body.vel = Vec2::ZERO;
            if relocation.progress(now) >= 1.0 {
                self.body.pos = relocation.to;
                self.relocation = None;
            } else {
                self.body.pos = relocation.position(now);
            }
            return;
        }

        if !self.body.moving {
            return;
        }
        self.body
            .integrate(config.substeps, |b| contain(b, field, config.player_wall_restitution));
        self.body.apply_friction(config.stop_threshold);
    }

    /// Back to the kick-off spot, at rest, with any relocation dropped.
    pub fn reset(&mut self) {
        self.body.place(self.start);
        self.relocation = None;
        self.selected = false;
    }

    /// The net this player's centre is lodged in, with the depth past the goal line.
    pub fn lodged_in(&self, field: &Field) -> Option<(GoalSide, f32)> {
        if !field.in_goal_span(self.body.pos.y) {
            return None;
        }
        [GoalSide::Left, GoalSide::Right]
            .into_iter()
            .map(|goal| (goal, field.depth_behind(goal, self.body.pos.x)))
            .find(|&(_, depth)| depth > 0.0)
    }
}

/// Players may walk into a goal mouth but stop at its rear line and crossbars.
fn contain(b: &mut MovingBody, field: &Field, restitution: f32) {
    let r = b.radius;

    if b.pos.x - r < field.left {
        if !field.in_goal_span_closed(b.pos.y) {
            b.pos.x = field.left + r;
            b.vel.x *= -restitution;
        } else {
            let rear = field.rear_line(GoalSide::Left);
            if b.pos.x - r < rear {
                b.pos.x = rear + r;
                b.vel.x = 0.0;
                b.vel.y *= REAR_NET_DAMPING;
            }
            stop_at_crossbars(b, field);
        }
    }

    if b.pos.x + r > field.right {
        if !field.in_goal_span_closed(b.pos.y) {
            b.pos.x = field.right - r;
            b.vel.x *= -restitution;
        } else {
            let rear = field.rear_line(GoalSide::Right);
            if b.pos.x + r > rear {
                b.pos.x = rear - r;
                b.vel.x = 0.0;
                b.vel.y *= REAR_NET_DAMPING;
            }
            stop_at_crossbars(b, field);
        }
    }

    b.bounce_touchlines(field.top, field.bottom, restitution);
}

fn stop_at_crossbars(b: &mut MovingBody, field: &Field) {
    if b.pos.y - b.radius < field.goal_top {
        b.pos.y = field.goal_top + b.radius;
        b.vel.y = 0.0;
    }
    if b.pos.y + b.radius > field.goal_bottom {
        b.pos.y = field.goal_bottom - b.radius;
        b.vel.y = 0.0;
    }
}
