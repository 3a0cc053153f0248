//! Small circle/vector helpers shared by the physics and input code.

use glam::Vec2;

/// Distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Whether `point` lies strictly inside the circle at `center`.
#[inline]
pub fn contains_point(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance_squared(point) < radius * radius
}

/// Overlap between two circles, measured from `b` towards `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector pointing from `b`'s centre to `a`'s centre.
    pub normal: Vec2,
    /// Penetration depth (`ra + rb - distance`), always > 0.
    pub depth: f32,
    /// Centre distance, always > 0.
    pub distance: f32,
}

/// Circle-circle overlap test.
///
/// Returns `None` when the circles do not overlap, and also when both centres
/// coincide: there is no usable normal in that case and the pair is skipped.
pub fn circle_contact(a: Vec2, ra: f32, b: Vec2, rb: f32) -> Option<Contact> {
    let delta = a - b;
    let dist = delta.length();
    let min_dist = ra + rb;
    if dist >= min_dist || dist <= 0.0 {
        return None;
    }
    Some(Contact {
        normal: delta / dist,
        depth: min_dist - dist,
        distance: dist,
    })
}

/// Rotate `v` counter-clockwise by `angle` radians.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_point_is_strict() {
        let c = Vec2::new(10.0, 10.0);
        assert!(contains_point(c, 5.0, Vec2::new(12.0, 10.0)));
        assert!(!contains_point(c, 5.0, Vec2::new(15.0, 10.0)));
    }

    #[test]
    fn contact_normal_points_from_b_to_a() {
        let contact = circle_contact(Vec2::new(10.0, 0.0), 6.0, Vec2::ZERO, 6.0).unwrap();
        assert_eq!(contact.normal, Vec2::X);
        assert!((contact.depth - 2.0).abs() < 1e-5);
        assert!((contact.distance - 10.0).abs() < 1e-5);
    }

    #[test]
    fn touching_circles_do_not_collide() {
        assert!(circle_contact(Vec2::new(12.0, 0.0), 6.0, Vec2::ZERO, 6.0).is_none());
    }

    #[test]
    fn coincident_centres_are_skipped() {
        assert!(circle_contact(Vec2::ONE, 6.0, Vec2::ONE, 6.0).is_none());
    }

    #[test]
    fn rotate_quarter_turn() {
        let r = rotate(Vec2::X, std::f32::consts::FRAC_PI_2);
        assert!(r.abs_diff_eq(Vec2::Y, 1e-6), "got {:?}", r);
    }
}
