//! Tangent-circle construction for filleted polygon corners.
//!
//! All functions take the corner as three consecutive points `p1, p2, p3`
//! with the corner at `p2`. The fillet arc runs from a start point on
//! `p1-p2` to an end point on `p2-p3`.

use super::intersect_2d::intersect_line_circle;
use super::vector_2d::{angle_between, cross_2d, linear_2dtransform_rotate, unit_vector};
use super::{Point2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// A circular arc fitted into a polygon corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilletArc {
    /// Center of the arc circle.
    pub center: Point2,
    /// Tangent point on the incoming edge `p1-p2`.
    pub start: Point2,
    /// Tangent point on the outgoing edge `p2-p3`.
    pub end: Point2,
    /// Point halfway along the arc between `start` and `end`.
    pub midpoint: Point2,
    /// Arc radius (always non-negative).
    pub radius: f64,
}

/// Computes the fillet arc tangent to `p1-p2` and `p2-p3` with the given radius.
///
/// A non-negative `radius` fits a tangent circle into the corner. A negative
/// `radius` places the arc center on the corner itself and cuts the arc
/// `|radius|` along both edges; the returned arc carries `|radius|`.
///
/// Parallel edges are not filtered here: the caller decides whether a corner
/// can be filleted before asking for the arc.
///
/// # Errors
///
/// - `GeometryError::ZeroVector` if `p1 == p2` or `p3 == p2`
/// - `GeometryError::Degenerate` if the constructed center is not finite
/// - an `IntersectionError` if a tangent point cannot be found
pub fn calc_2darc_start_end_from_lines_radius(
    p1: &Point2,
    p2: &Point2,
    p3: &Point2,
    radius: f64,
) -> Result<FilletArc> {
    let v1 = unit_vector(&(p2 - p1))?;
    let v2 = unit_vector(&(p2 - p3))?;

    let (center, start, end) = if radius >= 0.0 {
        let center = fillet_center(p1, p2, p3, radius)?;
        let start = intersect_line_circle(p1, &(p2 - p1), &center, radius)?;
        let end = intersect_line_circle(p3, &(p2 - p3), &center, radius)?;
        (center, start, end)
    } else {
        (*p2, p2 + v1 * radius, p2 + v2 * radius)
    };

    let midpoint = arc_midpoint(&center, &start, &end);
    Ok(FilletArc {
        center,
        start,
        end,
        midpoint,
        radius: radius.abs(),
    })
}

/// Center of the circle with the given radius tangent to `p1-p2` and `p2-p3`.
///
/// The point `A = p2 - v1 * s` on the incoming edge, where
/// `s = radius / sin(alpha / 2)` and `alpha` is the corner angle, is rotated
/// about `p2` by half the corner angle toward the outgoing edge.
///
/// # Errors
///
/// - `GeometryError::ZeroVector` for coincident consecutive points
/// - `GeometryError::Degenerate` if the corner is folded back (the center is not finite)
pub fn fillet_center(p1: &Point2, p2: &Point2, p3: &Point2, radius: f64) -> Result<Point2> {
    let v1 = unit_vector(&(p2 - p1))?;
    let v2 = unit_vector(&(p2 - p3))?;

    let alpha = angle_between(&v1, &v2);
    let s = radius.abs() / (alpha / 2.0).sin();
    let theta = (alpha / 2.0).to_degrees().copysign(cross_2d(&v1, &v2));

    let a = p2 - v1 * s;
    let center = linear_2dtransform_rotate(p2, &a, theta);
    if !(center.x.is_finite() && center.y.is_finite()) {
        return Err(GeometryError::Degenerate(format!(
            "curve is not valid: fillet center at ({}, {}) is not finite",
            p2.x, p2.y
        ))
        .into());
    }
    Ok(center)
}

/// Point halfway along the short arc from `start` to `end` about `center`.
///
/// `start` is rotated by half the subtended angle, in the turning direction
/// given by the sign of `cross(start - center, end - center)`.
#[must_use]
pub fn arc_midpoint(center: &Point2, start: &Point2, end: &Point2) -> Point2 {
    let a = start - center;
    let b = end - center;
    let gamma = angle_between(&a, &b).to_degrees();
    linear_2dtransform_rotate(center, start, (gamma / 2.0).copysign(cross_2d(&a, &b)))
}

/// Center and radius of the circle through three points.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the points are collinear.
pub fn circle_from_3_points(p1: &Point2, p2: &Point2, p3: &Point2) -> Result<(Point2, f64)> {
    // Work relative to p1 to keep the determinant well conditioned.
    let b = p2 - p1;
    let c = p3 - p1;
    let d = 2.0 * cross_2d(&b, &c);
    if d.abs() < TOLERANCE {
        return Err(GeometryError::Degenerate(format!(
            "points ({}, {}), ({}, {}), ({}, {}) are collinear",
            p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
        ))
        .into());
    }
    let b2 = b.norm_squared();
    let c2 = c.norm_squared();
    let ux = (c.y * b2 - b.y * c2) / d;
    let uy = (b.x * c2 - c.x * b2) / d;
    let center = Point2::new(p1.x + ux, p1.y + uy);
    let radius = (ux * ux + uy * uy).sqrt();
    Ok((center, radius))
}
