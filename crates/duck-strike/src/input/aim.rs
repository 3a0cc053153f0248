use glam::Vec2;
use serde::Serialize;

use crate::api::types::PlayerId;

/// An in-progress slingshot drag on one human player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aim {
    pub player: PlayerId,
    /// Where the drag began (the player's centre at selection time).
    pub start: Vec2,
    /// Latest pointer position.
    pub current: Vec2,
}

impl Aim {
    pub fn new(player: PlayerId, start: Vec2) -> Self {
        Self {
            player,
            start,
            current: start,
        }
    }

    /// Drag vector, start to current. The shot goes the other way.
    pub fn drag(&self) -> Vec2 {
        self.current - self.start
    }

    /// Shot power in [0, 1] for the power readout.
    pub fn power(&self, max_drag: f32) -> f32 {
        if max_drag <= 0.0 {
            return 0.0;
        }
        (self.drag().length() / max_drag).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_and_power() {
        let mut aim = Aim::new(PlayerId(2), Vec2::new(100.0, 100.0));
        assert_eq!(aim.power(200.0), 0.0);
        aim.current = Vec2::new(200.0, 100.0);
        assert_eq!(aim.drag(), Vec2::new(100.0, 0.0));
        assert_eq!(aim.power(200.0), 0.5);
        aim.current = Vec2::new(100.0, 600.0);
        assert_eq!(aim.power(200.0), 1.0);
    }
}
