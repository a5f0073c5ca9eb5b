use tracing::debug;

use crate::config::PolycurveConfig;
use crate::error::{GeometryError, InputError, Result};
use crate::geometry::frame::Frame;
use crate::geometry::segment::Segment;
use crate::geometry::vertex::{Vertex, Vertex3};
use crate::math::{Point3, TOLERANCE};
use crate::operations::polycurve::build_polycurve;

/// Maps local 2D segments into 3D through `frame`.
#[must_use]
pub fn lift_segments(segments: &[Segment], frame: &Frame) -> Vec<Segment<Point3>> {
    segments
        .iter()
        .map(|seg| seg.map_points(|p| frame.to_global(&p)))
        .collect()
}

/// Builds a 3D arc through three points.
///
/// The center is the circumcenter of the triangle `p1, midpoint, p2` in its
/// own plane.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the points are collinear.
pub fn make_arc_segment(p1: Point3, midpoint: Point3, p2: Point3) -> Result<Segment<Point3>> {
    let ab = midpoint - p1;
    let ac = p2 - p1;
    let n = ab.cross(&ac);
    let n2 = n.norm_squared();
    if n2.sqrt() < TOLERANCE {
        return Err(GeometryError::Degenerate("arc points are collinear".into()).into());
    }

    let offset = (n.cross(&ab) * ac.norm_squared() + ac.cross(&n) * ab.norm_squared()) / (2.0 * n2);
    let center = p1 + offset;
    Ok(Segment::Arc {
        p1,
        p2,
        midpoint,
        radius: offset.norm(),
        center,
    })
}

/// Builds 3D segments from 3D vertices.
///
/// The vertices are projected into `frame`, or into a frame fitted to them
/// when none is given, built in 2D and lifted back. Returns the frame used
/// together with the segments.
///
/// # Errors
///
/// - `InputError::TooFewPoints` for fewer than 2 vertices
/// - `GeometryError::Degenerate` if no frame is given and the points are
///   collinear or fewer than three
/// - any error from [`build_polycurve`]
pub fn segments3d_from_points3d(
    points: &[Vertex3],
    frame: Option<&Frame>,
    config: &PolycurveConfig,
) -> Result<(Frame, Vec<Segment<Point3>>)> {
    if points.len() < 2 {
        return Err(InputError::TooFewPoints {
            count: points.len(),
            min: 2,
        }
        .into());
    }

    let frame = match frame {
        Some(frame) => *frame,
        None => {
            let pts: Vec<Point3> = points.iter().map(|v| v.point).collect();
            Frame::from_points(&pts)?
        }
    };
    debug!(
        normal_x = frame.normal().x,
        normal_y = frame.normal().y,
        normal_z = frame.normal().z,
        "lifting polycurve"
    );

    let local = points.iter().map(|v| Vertex {
        point: frame.to_local(&v.point),
        radius: v.radius,
    });
    let segments = build_polycurve(local, config)?;
    Ok((frame, lift_segments(&segments, &frame)))
}
