use super::vector_2d::{cross_2d, unit_vector};
use super::{Point2, Vector2, TOLERANCE};
use crate::error::{IntersectionError, Result};

/// Absolute band on the line-circle discriminant inside which the line is
/// treated as tangent (exactly one root).
pub const DISCRIMINANT_TOLERANCE: f64 = 1e-1;

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn intersect_calc(p1: &Point2, d1: &Vector2, p2: &Point2, d2: &Vector2) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let d = p2 - p1;
    let t = cross_2d(&d, d2) / cross;
    let u = cross_2d(&d, d1) / cross;
    Some((t, u))
}

/// Tangent point of the line `line_point + t * line_dir` and a circle.
///
/// Substitutes the line (with a normalized direction) into the circle
/// equation and solves the quadratic in `t`. A tangent line has a zero
/// discriminant; anything within [`DISCRIMINANT_TOLERANCE`] counts as the
/// single root `t = -b / 2`.
///
/// # Errors
///
/// - `GeometryError::ZeroVector` if `line_dir` has zero length
/// - `IntersectionError::LineMissesCircle` if the discriminant is clearly negative
/// - `IntersectionError::DoubleIntersection` if the discriminant is clearly positive
pub fn intersect_line_circle(
    line_point: &Point2,
    line_dir: &Vector2,
    center: &Point2,
    radius: f64,
) -> Result<Point2> {
    let d = unit_vector(line_dir)?;
    let f = line_point - center;

    // a = |d|² = 1
    let b = 2.0 * f.dot(&d);
    let c = f.dot(&f) - radius * radius;
    let discriminant = b * b - 4.0 * c;

    if discriminant < -DISCRIMINANT_TOLERANCE {
        return Err(IntersectionError::LineMissesCircle { discriminant }.into());
    }
    if discriminant > DISCRIMINANT_TOLERANCE {
        return Err(IntersectionError::DoubleIntersection { discriminant }.into());
    }

    let t = -b / 2.0;
    Ok(line_point + d * t)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::PolycurveError;

    #[test]
    fn intersect_calc_perpendicular() {
        let (t, u) = intersect_calc(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &Point2::new(0.5, -1.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn intersect_calc_parallel_returns_none() {
        assert!(intersect_calc(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Vector2::new(2.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn tangent_line_touches_once() {
        let p = intersect_line_circle(
            &Point2::new(0.0, 0.0),
            &Vector2::new(10.0, 0.0),
            &Point2::new(8.0, 2.0),
            2.0,
        )
        .unwrap();
        assert_abs_diff_eq!(p, Point2::new(8.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn tangent_point_lies_on_line_for_reversed_direction() {
        let p = intersect_line_circle(
            &Point2::new(10.0, 10.0),
            &Vector2::new(0.0, -10.0),
            &Point2::new(8.0, 2.0),
            2.0,
        )
        .unwrap();
        assert_abs_diff_eq!(p, Point2::new(10.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn secant_line_is_rejected() {
        let err = intersect_line_circle(
            &Point2::new(-5.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &Point2::new(0.0, 0.0),
            1.0,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PolycurveError::Intersection(IntersectionError::DoubleIntersection { .. })
        ));
    }

    #[test]
    fn missing_line_is_rejected() {
        let err = intersect_line_circle(
            &Point2::new(-5.0, 3.0),
            &Vector2::new(1.0, 0.0),
            &Point2::new(0.0, 0.0),
            1.0,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PolycurveError::Intersection(IntersectionError::LineMissesCircle { .. })
        ));
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(intersect_line_circle(
            &Point2::new(0.0, 0.0),
            &Vector2::new(0.0, 0.0),
            &Point2::new(1.0, 1.0),
            1.0,
        )
        .is_err());
    }
}
