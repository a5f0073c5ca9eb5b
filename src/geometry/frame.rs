use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

/// A local 2D coordinate system embedded in 3D space.
///
/// Defined by an origin, an in-plane x-direction and the plane normal. The
/// y-direction is `normal × xdir`, so local coordinates are right-handed
/// about the normal.
///
/// Mapping: `P(x, y) = origin + x * xdir + y * ydir`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    origin: Point3,
    xdir: Vector3,
    ydir: Vector3,
    normal: Vector3,
}

impl Frame {
    /// Creates a frame from an origin, a normal and an x-direction.
    ///
    /// The x-direction is made orthogonal to the normal before use.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector is zero-length or the x-direction
    /// is parallel to the normal.
    pub fn new(origin: Point3, normal: Vector3, xdir: Vector3) -> Result<Self> {
        let n_len = normal.norm();
        if n_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / n_len;

        if xdir.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let in_plane = xdir - normal * xdir.dot(&normal);
        let x_len = in_plane.norm();
        if x_len < TOLERANCE {
            return Err(
                GeometryError::Degenerate("frame x-direction is parallel to the normal".into())
                    .into(),
            );
        }
        let xdir = in_plane / x_len;
        let ydir = normal.cross(&xdir);

        Ok(Self {
            origin,
            xdir,
            ydir,
            normal,
        })
    }

    /// The global XY plane at the origin.
    #[must_use]
    pub fn xy() -> Self {
        Self {
            origin: Point3::origin(),
            xdir: Vector3::x(),
            ydir: Vector3::y(),
            normal: Vector3::z(),
        }
    }

    /// Fits a frame to a planar polygon.
    ///
    /// The origin is the first point, the normal comes from Newell's method
    /// (so a counter-clockwise polygon seen from the normal stays
    /// counter-clockwise in local coordinates), and the x-direction follows
    /// the first non-degenerate edge.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for fewer than three points or
    /// collinear points.
    pub fn from_points(points: &[Point3]) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeometryError::Degenerate(
                "at least three points are needed to fit a frame".into(),
            )
            .into());
        }

        let n = points.len();
        let mut normal = Vector3::zeros();
        for i in 0..n {
            let a = &points[i];
            let b = &points[(i + 1) % n];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        if normal.norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("points are collinear".into()).into());
        }

        let origin = points[0];
        let xdir = points
            .iter()
            .skip(1)
            .map(|p| p - origin)
            .find(|d| d.norm() > TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;

        Self::new(origin, normal, xdir)
    }

    /// Returns the origin of the frame.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit x-direction.
    #[must_use]
    pub fn xdir(&self) -> &Vector3 {
        &self.xdir
    }

    /// Returns the unit y-direction.
    #[must_use]
    pub fn ydir(&self) -> &Vector3 {
        &self.ydir
    }

    /// Returns the unit normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Maps local 2D coordinates into global 3D space.
    #[must_use]
    pub fn to_global(&self, p: &Point2) -> Point3 {
        self.origin + self.xdir * p.x + self.ydir * p.y
    }

    /// Projects a global point onto the frame plane, returning local coordinates.
    #[must_use]
    pub fn to_local(&self, p: &Point3) -> Point2 {
        let diff = p - self.origin;
        Point2::new(diff.dot(&self.xdir), diff.dot(&self.ydir))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::xy()
    }
}
