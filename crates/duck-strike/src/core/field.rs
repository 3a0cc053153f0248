use glam::Vec2;

use crate::api::config::MatchConfig;
use crate::api::types::{GoalSide, Side};

/// Field geometry derived once from the config.
///
/// Coordinates are world units with the origin at the top-left corner and
/// y growing downwards. The playable rectangle is inset by the margins; the
/// two goal mouths open outward from its left and right edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    /// x of the left goal line.
    pub left: f32,
    /// x of the right goal line.
    pub right: f32,
    /// y of the top touchline.
    pub top: f32,
    /// y of the bottom touchline.
    pub bottom: f32,
    pub center_y: f32,
    /// Upper edge of both goal mouths.
    pub goal_top: f32,
    /// Lower edge of both goal mouths.
    pub goal_bottom: f32,
    pub goal_depth: f32,
    pub post_radius: f32,
    pub penalty_depth: f32,
    pub relocation_band: f32,
}

impl Field {
    pub fn from_config(config: &MatchConfig) -> Self {
        let top = config.top_margin;
        let bottom = config.field_height - config.bottom_margin;
        let center_y = (top + bottom) / 2.0;
        let half_goal = config.goal_height / 2.0;
        Self {
            width: config.field_width,
            height: config.field_height,
            left: config.side_margin,
            right: config.field_width - config.side_margin,
            top,
            bottom,
            center_y,
            goal_top: center_y - half_goal,
            goal_bottom: center_y + half_goal,
            goal_depth: config.goal_depth,
            post_radius: config.goal_post_radius,
            penalty_depth: config.penalty_depth,
            relocation_band: config.relocation_band,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.center_y)
    }

    /// Strict goal-span test (`goal_top < y < goal_bottom`), used by the ball.
    pub fn in_goal_span(&self, y: f32) -> bool {
        y > self.goal_top && y < self.goal_bottom
    }

    /// Closed goal-span test, used by players.
    pub fn in_goal_span_closed(&self, y: f32) -> bool {
        y >= self.goal_top && y <= self.goal_bottom
    }

    pub fn goal_line(&self, goal: GoalSide) -> f32 {
        match goal {
            GoalSide::Left => self.left,
            GoalSide::Right => self.right,
        }
    }

    /// x of the back of the net.
    pub fn rear_line(&self, goal: GoalSide) -> f32 {
        match goal {
            GoalSide::Left => self.left - self.goal_depth,
            GoalSide::Right => self.right + self.goal_depth,
        }
    }

    /// x of the penalty-area front line, where relocated players land.
    pub fn penalty_front(&self, goal: GoalSide) -> f32 {
        match goal {
            GoalSide::Left => self.left + self.penalty_depth,
            GoalSide::Right => self.right - self.penalty_depth,
        }
    }

    /// How far `x` lies behind the goal line of `goal` (negative when in front).
    pub fn depth_behind(&self, goal: GoalSide, x: f32) -> f32 {
        match goal {
            GoalSide::Left => self.left - x,
            GoalSide::Right => x - self.right,
        }
    }

    /// The four post centres: top then bottom, left goal first.
    pub fn post_positions(&self) -> [(GoalSide, Vec2); 4] {
        [
            (GoalSide::Left, Vec2::new(self.left, self.goal_top)),
            (GoalSide::Left, Vec2::new(self.left, self.goal_bottom)),
            (GoalSide::Right, Vec2::new(self.right, self.goal_top)),
            (GoalSide::Right, Vec2::new(self.right, self.goal_bottom)),
        ]
    }

    /// Kick-off formation for one team: a shallow arc of five, goalkeeper-less,
    /// with the wings furthest from the halfway line.
    pub fn kickoff_positions(&self, side: Side) -> [Vec2; 5] {
        let c = self.center_y;
        // Offsets are written for the human team (right half, facing left).
        let offsets = [
            (0.0, -180.0),
            (-150.0, -90.0),
            (-100.0, 0.0),
            (-150.0, 90.0),
            (0.0, 180.0),
        ];
        let (anchor, dir) = match side {
            Side::Player => (self.width - self.left - 200.0, 1.0),
            Side::Bot => (self.left + 200.0, -1.0),
        };
        offsets.map(|(dx, dy)| Vec2::new(anchor + dir * dx, c + dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Field {
        Field::from_config(&MatchConfig::default())
    }

    #[test]
    fn default_geometry() {
        let f = field();
        assert_eq!(f.left, 240.0);
        assert_eq!(f.right, 1360.0);
        assert_eq!(f.center_y, 500.0);
        assert_eq!(f.goal_top, 410.0);
        assert_eq!(f.goal_bottom, 590.0);
        assert_eq!(f.rear_line(GoalSide::Left), 180.0);
        assert_eq!(f.rear_line(GoalSide::Right), 1420.0);
        assert_eq!(f.center(), Vec2::new(800.0, 500.0));
    }

    #[test]
    fn goal_span_edges() {
        let f = field();
        assert!(!f.in_goal_span(410.0));
        assert!(f.in_goal_span_closed(410.0));
        assert!(f.in_goal_span(500.0));
    }

    #[test]
    fn kickoff_formations_mirror() {
        let f = field();
        let humans = f.kickoff_positions(Side::Player);
        let bots = f.kickoff_positions(Side::Bot);
        assert_eq!(humans[0], Vec2::new(1160.0, 320.0));
        assert_eq!(humans[2], Vec2::new(1060.0, 500.0));
        assert_eq!(bots[1], Vec2::new(590.0, 410.0));
        assert_eq!(bots[4], Vec2::new(440.0, 680.0));
        for (h, b) in humans.iter().zip(bots.iter()) {
            assert!((h.x + b.x - f.width).abs() < 1e-4, "{:?} vs {:?}", h, b);
            assert_eq!(h.y, b.y);
        }
    }

    #[test]
    fn posts_sit_on_goal_lines() {
        let posts = field().post_positions();
        assert_eq!(posts[0], (GoalSide::Left, Vec2::new(240.0, 410.0)));
        assert_eq!(posts[3], (GoalSide::Right, Vec2::new(1360.0, 590.0)));
    }

    #[test]
    fn depth_is_measured_behind_the_line() {
        let f = field();
        assert_eq!(f.depth_behind(GoalSide::Left, 200.0), 40.0);
        assert_eq!(f.depth_behind(GoalSide::Right, 1300.0), -60.0);
        assert_eq!(f.penalty_front(GoalSide::Right), 1210.0);
    }
}
