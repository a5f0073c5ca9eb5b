/// 2D arc/bulge math utilities.
///
/// Bulge convention: `bulge = tan(sweep_angle / 4)`.
/// - `bulge = 0`: straight line
/// - `bulge > 0`: counter-clockwise arc
/// - `bulge < 0`: clockwise arc
/// - `|bulge| = 1`: semicircle
use std::f64::consts::TAU;

use super::{Point2, Vector2};

/// Center-radius-angle form of a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub center: Point2,
    pub radius: f64,
    /// Angle of the start point about the center, in radians.
    pub start_angle: f64,
    /// Signed sweep in radians; positive is counter-clockwise.
    pub sweep: f64,
}

/// Converts a bulge-defined arc segment to center-radius-angle form.
///
/// Returns degenerate values (zero radius and sweep) for zero-length chords.
#[must_use]
pub fn arc_from_bulge(p0: &Point2, p1: &Point2, bulge: f64) -> ArcParams {
    let chord = p1 - p0;
    let chord_len = chord.norm();

    if chord_len < 1e-12 {
        return ArcParams {
            center: *p0,
            radius: 0.0,
            start_angle: 0.0,
            sweep: 0.0,
        };
    }

    // Distance from chord midpoint to center, as a multiple of the half chord.
    let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
    let mid = Point2::from((p0.coords + p1.coords) * 0.5);

    // Normal to chord pointing toward center (for positive bulge, center is left of chord).
    let normal = Vector2::new(-chord.y, chord.x) / chord_len;
    let center = mid + normal * (sagitta_ratio * chord_len * 0.5);

    // r = d*(1+b²)/(4*|b|) derived from r = d/(2*sin(θ/2)) with θ=4*atan(b)
    let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());
    let start_angle = (p0.y - center.y).atan2(p0.x - center.x);

    ArcParams {
        center,
        radius,
        start_angle,
        sweep: 4.0 * bulge.atan(),
    }
}

/// Converts a signed sweep angle to a bulge value.
#[must_use]
pub fn bulge_from_sweep(sweep: f64) -> f64 {
    (sweep / 4.0).tan()
}

/// Signed sweep of the arc from `start` through `midpoint` to `end` about `center`.
///
/// Positive when the arc runs counter-clockwise. The result lies in `(-2π, 2π)`.
#[must_use]
pub fn arc_sweep(center: &Point2, start: &Point2, midpoint: &Point2, end: &Point2) -> f64 {
    let angle = |p: &Point2| (p.y - center.y).atan2(p.x - center.x);
    let a0 = angle(start);
    let ccw_total = (angle(end) - a0).rem_euclid(TAU);
    let ccw_mid = (angle(midpoint) - a0).rem_euclid(TAU);

    if ccw_mid <= ccw_total {
        ccw_total
    } else {
        ccw_total - TAU
    }
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(arc: &ArcParams, t: f64) -> Point2 {
    let angle = arc.start_angle + arc.sweep * t;
    Point2::new(
        arc.center.x + arc.radius * angle.cos(),
        arc.center.y + arc.radius * angle.sin(),
    )
}
