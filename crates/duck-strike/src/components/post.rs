use glam::Vec2;

use crate::api::types::GoalSide;
use crate::core::field::Field;

/// Immovable goal post. Two per goal mouth, one at each end of the goal line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalPost {
    pub pos: Vec2,
    pub radius: f32,
    pub goal: GoalSide,
}

impl GoalPost {
    pub fn for_field(field: &Field) -> Vec<GoalPost> {
        field
            .post_positions()
            .into_iter()
            .map(|(goal, pos)| GoalPost {
                pos,
                radius: field.post_radius,
                goal,
            })
            .collect()
    }
}
