//! Primitive 2D vector math shared by all metric extraction.
//!
//! Every measurement works on the x/y plane; `z` is ignored. The y-axis
//! convention is an explicit parameter rather than an inline negation at
//! call sites: detector output is screen space (y grows downward), while
//! the domain defines positive angles as physically upward.

use crate::types::LandmarkPoint;

/// Direction in which the y coordinate grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAxis {
    /// Mathematical convention: y grows upward.
    Up,
    /// Screen convention: y grows downward (detector output).
    Down,
}

/// Euclidean distance between two points in the x/y plane.
pub fn distance(p1: &LandmarkPoint, p2: &LandmarkPoint) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    (dx * dx + dy * dy).sqrt()
}

/// Signed angle of the ray `p1 -> p2` against the horizontal, in degrees,
/// range (-180, 180].
///
/// A positive result always means `p2` lies physically above `p1`: with
/// [`YAxis::Down`] the vertical component is negated before `atan2`.
pub fn angle_degrees(p1: &LandmarkPoint, p2: &LandmarkPoint, y_axis: YAxis) -> f64 {
    let dx = p2.x - p1.x;
    let dy = match y_axis {
        YAxis::Up => p2.y - p1.y,
        YAxis::Down => p1.y - p2.y,
    };
    dy.atan2(dx).to_degrees()
}

/// Interior angle at `center` formed by the rays to `a` and `b`, in degrees,
/// range [0, 180].
///
/// Returns 0 when either ray has zero length (coincident landmarks); callers
/// reject degenerate geometry before interpreting the result.
pub fn angle_between_degrees(center: &LandmarkPoint, a: &LandmarkPoint, b: &LandmarkPoint) -> f64 {
    let (v1x, v1y) = (a.x - center.x, a.y - center.y);
    let (v2x, v2y) = (b.x - center.x, b.y - center.y);

    let n1 = (v1x * v1x + v1y * v1y).sqrt();
    let n2 = (v2x * v2x + v2y * v2y).sqrt();
    if n1 == 0.0 || n2 == 0.0 {
        return 0.0;
    }

    let cos_theta = ((v1x * v2x + v1y * v2y) / (n1 * n2)).clamp(-1.0, 1.0);
    cos_theta.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> LandmarkPoint {
        LandmarkPoint::new(x, y)
    }

    #[test]
    fn test_distance_pythagorean() {
        assert!((distance(&pt(0.0, 0.0), &pt(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_zero() {
        assert_eq!(distance(&pt(2.0, 2.0), &pt(2.0, 2.0)), 0.0);
    }

    #[test]
    fn test_angle_screen_space_upward_is_positive() {
        // Screen coords: target 10 units "up" means smaller y.
        let a = angle_degrees(&pt(0.0, 100.0), &pt(100.0, 90.0), YAxis::Down);
        assert!(a > 0.0, "upward tilt must be positive, got {a}");
        assert!((a - 5.710593137).abs() < 1e-6);
    }

    #[test]
    fn test_angle_math_space_matches_atan2() {
        let a = angle_degrees(&pt(0.0, 0.0), &pt(1.0, 1.0), YAxis::Up);
        assert!((a - 45.0).abs() < 1e-12);
    }

    #[test]
    fn test_angle_conventions_mirror() {
        let p1 = pt(0.0, 0.0);
        let p2 = pt(20.0, -10.0);
        let up = angle_degrees(&p1, &p2, YAxis::Up);
        let down = angle_degrees(&p1, &p2, YAxis::Down);
        assert!((up + down).abs() < 1e-12);
    }

    #[test]
    fn test_angle_range_half_open() {
        // Straight left is exactly 180, not -180.
        let a = angle_degrees(&pt(0.0, 0.0), &pt(-1.0, 0.0), YAxis::Down);
        assert!((a - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_angle_between_right_angle() {
        let c = pt(0.0, 0.0);
        let a = angle_between_degrees(&c, &pt(1.0, 0.0), &pt(0.0, 1.0));
        assert!((a - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_between_collinear() {
        let c = pt(0.0, 0.0);
        let opposite = angle_between_degrees(&c, &pt(1.0, 0.0), &pt(-2.0, 0.0));
        assert!((opposite - 180.0).abs() < 1e-9);
        let same = angle_between_degrees(&c, &pt(1.0, 0.0), &pt(3.0, 0.0));
        assert!(same.abs() < 1e-9);
    }

    #[test]
    fn test_angle_between_degenerate_ray() {
        let c = pt(1.0, 1.0);
        assert_eq!(angle_between_degrees(&c, &c, &pt(2.0, 2.0)), 0.0);
    }
}
