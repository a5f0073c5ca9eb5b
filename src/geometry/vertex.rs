use crate::math::{Point2, Point3};

/// A polygon vertex in the local 2D frame with an optional fillet radius.
///
/// A radius of `None` or `0.0` marks a sharp corner. A negative radius puts
/// the arc center on the vertex itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub point: Point2,
    pub radius: Option<f64>,
}

impl Vertex {
    /// Creates a sharp corner.
    #[must_use]
    pub fn sharp(x: f64, y: f64) -> Self {
        Self {
            point: Point2::new(x, y),
            radius: None,
        }
    }

    /// Creates a corner filleted with `radius`.
    #[must_use]
    pub fn filleted(x: f64, y: f64, radius: f64) -> Self {
        Self {
            point: Point2::new(x, y),
            radius: Some(radius),
        }
    }

    /// Returns whether all coordinates and the radius are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.point.x.is_finite()
            && self.point.y.is_finite()
            && self.radius.is_none_or(f64::is_finite)
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((x, y): (f64, f64)) -> Self {
        Self::sharp(x, y)
    }
}

impl From<(f64, f64, f64)> for Vertex {
    fn from((x, y, r): (f64, f64, f64)) -> Self {
        Self::filleted(x, y, r)
    }
}

impl From<[f64; 2]> for Vertex {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::sharp(x, y)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, r]: [f64; 3]) -> Self {
        Self::filleted(x, y, r)
    }
}

impl From<Point2> for Vertex {
    fn from(point: Point2) -> Self {
        Self {
            point,
            radius: None,
        }
    }
}

/// A 3D vertex with an optional fillet radius, projected into a local frame
/// before segmentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex3 {
    pub point: Point3,
    pub radius: Option<f64>,
}

impl Vertex3 {
    #[must_use]
    pub fn sharp(x: f64, y: f64, z: f64) -> Self {
        Self {
            point: Point3::new(x, y, z),
            radius: None,
        }
    }

    #[must_use]
    pub fn filleted(x: f64, y: f64, z: f64, radius: f64) -> Self {
        Self {
            point: Point3::new(x, y, z),
            radius: Some(radius),
        }
    }
}

impl From<Point3> for Vertex3 {
    fn from(point: Point3) -> Self {
        Self {
            point,
            radius: None,
        }
    }
}

impl From<(f64, f64, f64)> for Vertex3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::sharp(x, y, z)
    }
}

impl From<[f64; 4]> for Vertex3 {
    fn from([x, y, z, r]: [f64; 4]) -> Self {
        Self::filleted(x, y, z, r)
    }
}
