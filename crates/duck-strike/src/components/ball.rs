use glam::Vec2;

use crate::api::config::MatchConfig;
use crate::api::types::{GoalSide, GoalType};
use crate::components::body::MovingBody;
use crate::core::field::Field;
use crate::core::time::Millis;

/// The match ball: a moving body plus goal bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub body: MovingBody,
    /// Centre spot the ball returns to on reset.
    spot: Vec2,
    pub in_goal: bool,
    /// Set once, when `in_goal` goes false → true. Cleared only by `reset`.
    pub goal: Option<GoalType>,
    pub goal_time: Option<Millis>,
    /// True until the first contact with a player or post after a reset.
    pub first_shot_after_reset: bool,
}

impl Ball {
    pub fn new(spot: Vec2, config: &MatchConfig) -> Self {
        Self {
            body: MovingBody::new(
                spot,
                config.ball_radius,
                config.ball_friction,
                config.ball_friction_exponent,
            ),
            spot,
            in_goal: false,
            goal: None,
            goal_time: None,
            first_shot_after_reset: true,
        }
    }

    pub fn spot(&self) -> Vec2 {
        self.spot
    }

    pub fn reset(&mut self) {
        self.body.place(self.spot);
        self.in_goal = false;
        self.goal = None;
        self.goal_time = None;
        self.first_shot_after_reset = true;
    }

    /// A player or post touched the ball: it can no longer score a foul.
    pub fn engage(&mut self) {
        self.first_shot_after_reset = false;
    }

    /// Advance one tick. Returns the goal classification once the ball has
    /// sat in a net for `goal_delay_ms`, and `None` before that.
    ///
    /// A ball in the net keeps `moving == true` so the turn never completes
    /// underneath a pending goal.
    pub fn update(&mut self, field: &Field, config: &MatchConfig, now: Millis) -> Option<GoalType> {
        if !self.body.moving {
            return None;
        }

        let Ball {
            body,
            in_goal,
            goal,
            goal_time,
            first_shot_after_reset,
            ..
        } = self;
        let untouched = *first_shot_after_reset;
        body.integrate(config.substeps, |b| {
            if let Some(side) = contain(b, field, config.ball_wall_restitution) {
                if !*in_goal {
                    let classified = GoalType::classify(side, untouched);
                    log::debug!("Ball entered the {:?} net ({:?})", side, classified);
                    *in_goal = true;
                    *goal_time = Some(now);
                    *goal = Some(classified);
                }
            }
        });

        if self.in_goal {
            self.body.vel *= config.in_goal_damping;
            return match (self.goal, self.goal_time) {
                (Some(goal), Some(at)) if now - at >= config.goal_delay_ms => Some(goal),
                _ => None,
            };
        }

        self.body.apply_friction(config.stop_threshold);
        None
    }

    /// Whether the goal overlay should be showing yet.
    pub fn goal_display_ready(&self, now: Millis, delay: Millis) -> bool {
        matches!(self.goal_time, Some(at) if now - at >= delay)
    }
}

/// Keep the ball inside the field or a net. Returns the net it is in, if any.
fn contain(b: &mut MovingBody, field: &Field, restitution: f32) -> Option<GoalSide> {
    let mut entered = None;
    let r = b.radius;

    if b.pos.x - r < field.left {
        if field.in_goal_span(b.pos.y) {
            entered = Some(GoalSide::Left);
            let rear = field.rear_line(GoalSide::Left);
            if b.pos.x - r <= rear {
                b.pos.x = rear + r;
                b.vel = Vec2::ZERO;
            }
            bounce_crossbars(b, field, restitution);
        } else {
            b.pos.x = field.left + r;
            b.vel.x *= -restitution;
        }
    }

    if b.pos.x + r > field.right {
        if field.in_goal_span(b.pos.y) {
            entered = Some(GoalSide::Right);
            let rear = field.rear_line(GoalSide::Right);
            if b.pos.x + r >= rear {
                b.pos.x = rear - r;
                b.vel = Vec2::ZERO;
            }
            bounce_crossbars(b, field, restitution);
        } else {
            b.pos.x = field.right - r;
            b.vel.x *= -restitution;
        }
    }

    b.bounce_touchlines(field.top, field.bottom, restitution);
    entered
}

fn bounce_crossbars(b: &mut MovingBody, field: &Field, restitution: f32) {
    if b.pos.y - b.radius < field.goal_top {
        b.pos.y = field.goal_top + b.radius;
        b.vel.y *= -restitution;
    }
    if b.pos.y + b.radius > field.goal_bottom {
        b.pos.y = field.goal_bottom - b.radius;
        b.vel.y *= -restitution;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Ball, Field, MatchConfig) {
        let config = MatchConfig::default();
        let field = Field::from_config(&config);
        (Ball::new(field.center(), &config), field, config)
    }

    fn kick(ball: &mut Ball, pos: Vec2, vel: Vec2) {
        ball.body.pos = pos;
        ball.body.vel = vel;
        ball.body.moving = true;
    }

    #[test]
    fn untouched_ball_in_left_net_is_a_foul() {
        let (mut ball, field, config) = setup();
        kick(&mut ball, Vec2::new(field.left - 20.0, field.center_y), Vec2::new(-2.0, 0.0));

        assert_eq!(ball.update(&field, &config, 0.0), None);
        assert!(ball.in_goal);
        assert_eq!(ball.goal, Some(GoalType::FoulPlayerGoal));

        let mut now = 0.0;
        let mut result = None;
        while result.is_none() && now < 2000.0 {
            now += 1000.0 / 60.0;
            result = ball.update(&field, &config, now);
        }
        assert_eq!(result, Some(GoalType::FoulPlayerGoal));
        assert!(now >= config.goal_delay_ms);
    }

    #[test]
    fn engaged_ball_in_right_net_is_a_bot_goal() {
        let (mut ball, field, config) = setup();
        ball.engage();
        kick(&mut ball, Vec2::new(field.right - 10.0, field.center_y), Vec2::new(20.0, 0.0));
        ball.update(&field, &config, 100.0);
        assert_eq!(ball.goal, Some(GoalType::BotGoal));
        assert_eq!(ball.update(&field, &config, 599.0), None);
        assert_eq!(ball.update(&field, &config, 600.0), Some(GoalType::BotGoal));
    }

    #[test]
    fn goal_type_is_stamped_once() {
        let (mut ball, field, config) = setup();
        kick(&mut ball, Vec2::new(field.left - 20.0, field.center_y), Vec2::new(-2.0, 0.0));
        ball.update(&field, &config, 10.0);
        ball.engage();
        ball.update(&field, &config, 20.0);
        assert_eq!(ball.goal, Some(GoalType::FoulPlayerGoal));
        assert_eq!(ball.goal_time, Some(10.0));
    }

    #[test]
    fn ball_in_net_never_reports_stopped() {
        let (mut ball, field, config) = setup();
        kick(&mut ball, Vec2::new(field.left - 20.0, field.center_y), Vec2::new(-0.1, 0.0));
        for i in 0..20 {
            ball.update(&field, &config, i as f64);
        }
        assert!(ball.body.moving);
    }

    #[test]
    fn ball_stops_dead_at_rear_line() {
        let (mut ball, field, config) = setup();
        kick(&mut ball, Vec2::new(field.left - 30.0, field.center_y), Vec2::new(-25.0, 0.0));
        ball.update(&field, &config, 0.0);
        let rear = field.rear_line(GoalSide::Left);
        assert_eq!(ball.body.pos.x, rear + config.ball_radius);
        assert_eq!(ball.body.vel, Vec2::ZERO);
    }

    #[test]
    fn ball_bounces_off_side_wall_outside_goal_span() {
        let (mut ball, field, config) = setup();
        kick(&mut ball, Vec2::new(field.left + 20.0, field.top + 60.0), Vec2::new(-10.0, 0.0));
        ball.update(&field, &config, 0.0);
        assert!(ball.body.pos.x - config.ball_radius >= field.left - 1e-4);
        assert!(ball.body.vel.x > 0.0, "vx={}", ball.body.vel.x);
        assert!(!ball.in_goal);
    }

    #[test]
    fn ball_bounces_off_touchline_without_penetration() {
        let (mut ball, field, config) = setup();
        kick(&mut ball, Vec2::new(800.0, field.bottom - 20.0), Vec2::new(0.0, 24.0));
        ball.update(&field, &config, 0.0);
        assert!(ball.body.pos.y + config.ball_radius <= field.bottom + 1e-4);
        assert!(ball.body.vel.y < 0.0);
    }

    #[test]
    fn slow_ball_stops_exactly() {
        let (mut ball, field, config) = setup();
        kick(&mut ball, field.center(), Vec2::new(0.3, 0.1));
        assert_eq!(ball.update(&field, &config, 0.0), None);
        assert_eq!(ball.body.vel, Vec2::ZERO);
        assert!(!ball.body.moving);
    }

    #[test]
    fn reset_is_idempotent() {
        let (mut ball, field, config) = setup();
        ball.engage();
        kick(&mut ball, Vec2::new(field.left - 20.0, field.center_y), Vec2::new(-2.0, 0.0));
        ball.update(&field, &config, 0.0);

        ball.reset();
        let once = ball.clone();
        ball.reset();
        assert_eq!(ball, once);
        assert_eq!(ball.body.pos, field.center());
        assert!(ball.first_shot_after_reset);
        assert_eq!(ball.goal, None);
    }
}
