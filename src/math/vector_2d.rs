use nalgebra::Rotation2;

use super::{Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Euclidean length of a 2D vector.
#[must_use]
pub fn vector_length_2d(v: &Vector2) -> f64 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Normalizes a 2D vector.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if the vector is shorter than [`TOLERANCE`].
pub fn unit_vector(v: &Vector2) -> Result<Vector2> {
    let len = vector_length_2d(v);
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v / len)
}

/// 2D cross product: `a.x * b.y - a.y * b.x`.
#[inline]
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Unsigned angle between two vectors in radians, in `[0, π]`.
///
/// The cosine is clipped to `[-1, 1]` before `acos`. Zero-length input yields `NaN`.
#[must_use]
pub fn angle_between(a: &Vector2, b: &Vector2) -> f64 {
    let cos = a.dot(b) / (vector_length_2d(a) * vector_length_2d(b));
    cos.clamp(-1.0, 1.0).acos()
}

/// Unsigned angle between two vectors in degrees, in `[0, 180]`.
#[must_use]
pub fn angle_between_deg(a: &Vector2, b: &Vector2) -> f64 {
    angle_between(a, b).to_degrees()
}

/// Rotates `point` about `origin` by `angle_deg` degrees (counter-clockwise positive).
#[must_use]
pub fn linear_2dtransform_rotate(origin: &Point2, point: &Point2, angle_deg: f64) -> Point2 {
    let rotation = Rotation2::new(angle_deg.to_radians());
    origin + rotation * (point - origin)
}

/// Returns whether two points lie within `tol` of each other.
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2, tol: f64) -> bool {
    vector_length_2d(&(b - a)) <= tol
}
