use glam::Vec2;

/// Shared kinematic state of the ball and every player.
///
/// Velocity is in world units per tick. `moving == false` always comes with a
/// zero velocity once `apply_friction` has run.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Per-tick friction coefficient in (0, 1).
    pub friction: f32,
    /// Exponent applied to `friction` each tick. Higher means a faster stop.
    pub friction_exponent: f32,
    pub moving: bool,
}

impl MovingBody {
    pub fn new(pos: Vec2, radius: f32, friction: f32, friction_exponent: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            friction,
            friction_exponent,
            moving: false,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Move by one tick of velocity in `substeps` equal slices, running
    /// `boundary` after each slice. Velocity is re-read every slice so a
    /// bounce in slice 2 changes the direction of slices 3..n.
    pub fn integrate(&mut self, substeps: u32, mut boundary: impl FnMut(&mut MovingBody)) {
        let n = substeps.max(1) as f32;
        for _ in 0..substeps.max(1) {
            self.pos += self.vel / n;
            boundary(self);
        }
    }

    /// Exponential decay. At or below `stop_threshold` the body snaps to rest.
    pub fn apply_friction(&mut self, stop_threshold: f32) {
        if self.speed() > stop_threshold {
            self.vel *= self.friction.powf(self.friction_exponent);
        } else {
            self.stop();
        }
    }

    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
        self.moving = false;
    }

    /// After an impulse: wake the body if its speed exceeds the threshold,
    /// otherwise a body at rest drops the sub-threshold velocity.
    pub fn wake_if_fast(&mut self, threshold: f32) {
        if self.speed() > threshold {
            self.moving = true;
        } else if !self.moving {
            self.vel = Vec2::ZERO;
        }
    }

    /// Teleport to `pos` at rest.
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.stop();
    }

    /// Clamp against the top and bottom touchlines, reflecting `vy`.
    pub fn bounce_touchlines(&mut self, top: f32, bottom: f32, restitution: f32) {
        if self.pos.y - self.radius < top {
            self.pos.y = top + self.radius;
            self.vel.y *= -restitution;
        }
        if self.pos.y + self.radius > bottom {
            self.pos.y = bottom - self.radius;
            self.vel.y *= -restitution;
        }
    }
}
