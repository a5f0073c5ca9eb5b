pub mod arc_2d;
pub mod fillet_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod vector_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Geometric tolerance for zero-length and collinearity checks.
///
/// Independent of the model-scale point tolerance carried by
/// [`PolycurveConfig`](crate::config::PolycurveConfig).
pub const TOLERANCE: f64 = 1e-10;
