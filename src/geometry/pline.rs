use crate::geometry::segment::Segment;
use crate::math::arc_2d::{arc_from_bulge, arc_point_at, bulge_from_sweep};
use crate::math::Point2;

/// Bulge-encoded polyline vertex for mixed line/arc segments.
///
/// `bulge = tan(sweep_angle / 4)`:
/// - `0` = straight line to next vertex
/// - `> 0` = counter-clockwise arc to next vertex
/// - `< 0` = clockwise arc to next vertex
/// - `|bulge| = 1` = semicircle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlineVertex {
    pub x: f64,
    pub y: f64,
    pub bulge: f64,
}

impl PlineVertex {
    /// Creates a new vertex with the given coordinates and bulge.
    #[must_use]
    pub fn new(x: f64, y: f64, bulge: f64) -> Self {
        Self { x, y, bulge }
    }

    /// Creates a line vertex (bulge = 0).
    #[must_use]
    pub fn line(x: f64, y: f64) -> Self {
        Self { x, y, bulge: 0.0 }
    }

    fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// A polyline with mixed straight-line and circular-arc segments.
///
/// Each segment between consecutive vertices is either a line (bulge=0)
/// or a circular arc (bulge≠0). For closed polylines, the last vertex
/// connects back to the first.
#[derive(Debug, Clone)]
pub struct Pline {
    pub vertices: Vec<PlineVertex>,
    pub closed: bool,
}

impl Pline {
    /// Encodes a connected segment list as a bulge polyline.
    ///
    /// Each segment contributes its start point; an open list also gets its
    /// final end point as a trailing vertex.
    #[must_use]
    pub fn from_segments(segments: &[Segment], closed: bool) -> Self {
        let mut vertices: Vec<PlineVertex> = segments
            .iter()
            .map(|seg| {
                let p = seg.p1();
                let bulge = seg.sweep().map_or(0.0, bulge_from_sweep);
                PlineVertex::new(p.x, p.y, bulge)
            })
            .collect();

        if !closed {
            if let Some(last) = segments.last() {
                let p = last.p2();
                vertices.push(PlineVertex::line(p.x, p.y));
            }
        }

        Self { vertices, closed }
    }

    /// Converts this polyline to a list of points by tessellating arcs into line segments.
    ///
    /// `tolerance` controls the maximum deviation between the arc and its chord approximation.
    /// A closed polyline does not repeat its first point at the end.
    #[must_use]
    pub fn to_points(&self, tolerance: f64) -> Vec<Point2> {
        let n = self.vertices.len();
        if n == 0 {
            return Vec::new();
        }

        let seg_count = self.segment_count();
        let mut points = Vec::with_capacity(n * 2);
        points.push(self.vertices[0].point());

        for i in 0..seg_count {
            let v0 = &self.vertices[i];
            let v1 = &self.vertices[(i + 1) % n];

            if v0.bulge.abs() > 1e-12 {
                let arc = arc_from_bulge(&v0.point(), &v1.point(), v0.bulge);
                if arc.radius > 1e-12 {
                    let n_sub = arc_subdivision_count(arc.radius, arc.sweep.abs(), tolerance);
                    for j in 1..n_sub {
                        let t = f64::from(j) / f64::from(n_sub);
                        points.push(arc_point_at(&arc, t));
                    }
                }
            }

            if !(self.closed && i + 1 == seg_count) {
                points.push(v1.point());
            }
        }

        points
    }

    /// Returns the number of segments in this polyline.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.vertices.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }
}

/// Computes the number of line segments needed to approximate an arc
/// within the given tolerance.
fn arc_subdivision_count(radius: f64, abs_sweep: f64, tolerance: f64) -> u32 {
    if radius < 1e-12 || abs_sweep < 1e-12 || tolerance <= 0.0 {
        return 1;
    }
    // From the sagitta formula: sagitta = r * (1 - cos(θ/2))
    // For a given tolerance: θ = 2 * acos(1 - tolerance/r)
    let max_angle = if tolerance >= radius {
        std::f64::consts::PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (abs_sweep / max_angle).ceil() as u32;
    n.max(1)
}
