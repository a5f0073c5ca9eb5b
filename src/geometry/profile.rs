use crate::config::PolycurveConfig;
use crate::error::{InputError, Result};
use crate::geometry::frame::Frame;
use crate::geometry::pline::Pline;
use crate::geometry::segment::{signed_area, Segment};
use crate::geometry::vertex::{Vertex, Vertex3};
use crate::math::{Point2, Point3};
use crate::operations::indexed::{segments_to_indexed_lists, IndexedPolycurve};
use crate::operations::lift::lift_segments;
use crate::operations::polycurve::build_polycurve;

/// A filleted profile curve placed in 3D space.
///
/// Owns its vertices in local frame coordinates, the frame that places them,
/// and the configuration used to build its segments. Segments are built once
/// on construction; the curve is immutable afterwards.
#[derive(Debug, Clone)]
pub struct CurvePoly {
    vertices: Vec<Vertex>,
    frame: Frame,
    config: PolycurveConfig,
    segments: Vec<Segment>,
}

impl CurvePoly {
    /// Creates a profile from vertices already in `frame` coordinates.
    ///
    /// # Errors
    ///
    /// Returns any error from [`build_polycurve`].
    pub fn from_points2d<I>(points: I, frame: Frame, config: PolycurveConfig) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Vertex>,
    {
        let vertices: Vec<Vertex> = points.into_iter().map(Into::into).collect();
        let segments = build_polycurve(vertices.iter().copied(), &config)?;
        Ok(Self {
            vertices,
            frame,
            config,
            segments,
        })
    }

    /// Creates a profile from global 3D vertices.
    ///
    /// Without a frame, one is fitted to the points.
    ///
    /// # Errors
    ///
    /// - `InputError::TooFewPoints` for fewer than 2 vertices
    /// - `GeometryError::Degenerate` if a frame must be fitted and cannot be
    /// - any error from [`build_polycurve`]
    pub fn from_points3d(
        points: &[Vertex3],
        frame: Option<Frame>,
        config: PolycurveConfig,
    ) -> Result<Self> {
        if points.len() < 2 {
            return Err(InputError::TooFewPoints {
                count: points.len(),
                min: 2,
            }
            .into());
        }
        let frame = match frame {
            Some(frame) => frame,
            None => {
                let pts: Vec<Point3> = points.iter().map(|v| v.point).collect();
                Frame::from_points(&pts)?
            }
        };
        let local = points.iter().map(|v| Vertex {
            point: frame.to_local(&v.point),
            radius: v.radius,
        });
        Self::from_points2d(local, frame, config)
    }

    /// Creates a profile from whichever point list is supplied.
    ///
    /// 2D points take precedence; they are placed by `frame` or the global XY
    /// plane.
    ///
    /// # Errors
    ///
    /// Returns `InputError::MissingPoints` when both lists are `None`, and
    /// otherwise the errors of [`Self::from_points2d`] or [`Self::from_points3d`].
    pub fn from_input(
        points2d: Option<Vec<Vertex>>,
        points3d: Option<Vec<Vertex3>>,
        frame: Option<Frame>,
        config: PolycurveConfig,
    ) -> Result<Self> {
        match (points2d, points3d) {
            (Some(points), _) => Self::from_points2d(points, frame.unwrap_or_default(), config),
            (None, Some(points)) => Self::from_points3d(&points, frame, config),
            (None, None) => Err(InputError::MissingPoints.into()),
        }
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    #[must_use]
    pub fn config(&self) -> &PolycurveConfig {
        &self.config
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.config.closed
    }

    /// Segments in local frame coordinates.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segments in global coordinates.
    #[must_use]
    pub fn segments3d(&self) -> Vec<Segment<Point3>> {
        lift_segments(&self.segments, &self.frame)
    }

    /// Indexed form of the local segments.
    #[must_use]
    pub fn indexed(&self) -> IndexedPolycurve {
        segments_to_indexed_lists(&self.segments, self.config.closed)
    }

    /// Indexed form of the global segments.
    #[must_use]
    pub fn indexed3d(&self) -> IndexedPolycurve<Point3> {
        segments_to_indexed_lists(&self.segments3d(), self.config.closed)
    }

    /// Input vertex positions in local coordinates.
    #[must_use]
    pub fn points2d(&self) -> Vec<Point2> {
        self.vertices.iter().map(|v| v.point).collect()
    }

    /// Input vertex positions in global coordinates.
    #[must_use]
    pub fn points3d(&self) -> Vec<Point3> {
        self.vertices
            .iter()
            .map(|v| self.frame.to_global(&v.point))
            .collect()
    }

    #[must_use]
    pub fn to_pline(&self) -> Pline {
        Pline::from_segments(&self.segments, self.config.closed)
    }

    /// Approximates the curve by points, arcs within `tolerance` of the chord.
    #[must_use]
    pub fn tessellate(&self, tolerance: f64) -> Vec<Point2> {
        self.to_pline().to_points(tolerance)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// Signed enclosed area in local coordinates, positive counter-clockwise.
    ///
    /// An open curve is closed by the chord from its end back to its start.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.segments)
    }

    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// The same curve traversed backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            vertices: self.vertices.iter().rev().copied().collect(),
            frame: self.frame,
            config: self.config,
            segments: self.segments.iter().rev().map(Segment::reversed).collect(),
        }
    }
}
