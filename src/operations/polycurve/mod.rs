mod arena;
mod reconcile;

use std::f64::consts::PI;

use tracing::{debug, trace, warn};

use self::arena::{Corner, CornerArena, CornerKind};
use crate::config::PolycurveConfig;
use crate::diagnostics::StepObserver;
use crate::error::{GeometryError, InputError, Result};
use crate::geometry::segment::Segment;
use crate::geometry::vertex::Vertex;
use crate::math::fillet_2d::calc_2darc_start_end_from_lines_radius;
use crate::math::vector_2d::angle_between;
use crate::math::{Point2, TOLERANCE};

/// Corner angles this close to 0 or π (radians) are treated as folded back
/// or straight through.
const ANGLE_EPSILON: f64 = 1e-9;

/// Turns a list of optionally filleted vertices into line and arc segments.
///
/// Construction runs in two passes. The first computes every corner
/// independently: a sharp point, or the tangent arc for its radius. The
/// second walks the edges between consecutive corners and decides whether
/// each gap is bridged by a line or closed by snapping the tangent points
/// together.
///
/// Segments are returned in vertex order: the arc at vertex `i` (if any),
/// then the line leaving it (if any).
pub struct SegCreator<'a> {
    vertices: Vec<Vertex>,
    config: PolycurveConfig,
    observer: Option<&'a mut dyn StepObserver>,
}

impl std::fmt::Debug for SegCreator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegCreator")
            .field("vertices", &self.vertices)
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl<'a> SegCreator<'a> {
    /// Creates a new segment creator.
    #[must_use]
    pub fn new(vertices: Vec<Vertex>, config: PolycurveConfig) -> Self {
        Self {
            vertices,
            config,
            observer: None,
        }
    }

    /// Attaches an observer that sees the segment list after every vertex.
    #[must_use]
    pub fn with_observer(mut self, observer: &'a mut dyn StepObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Builds the segment list.
    ///
    /// # Errors
    ///
    /// - `InputError::InvalidConfig` for an invalid configuration
    /// - `InputError::TooFewPoints` for fewer than 2 vertices
    /// - `InputError::NonFinite` for a NaN or infinite coordinate or radius
    /// - `GeometryError::ZeroVector` for coincident consecutive vertices
    /// - `GeometryError::Degenerate` for a filleted corner that folds back
    /// - `GeometryError::RadiusTooLarge` when an arc does not fit on its edges
    /// - `GeometryError::FilletOverlap` when two arcs overlap on a shared edge
    /// - any error raised by the attached observer
    pub fn execute(&mut self) -> Result<Vec<Segment>> {
        self.config.validate()?;
        self.check_input()?;

        let n = self.vertices.len();
        debug!(vertices = n, closed = self.config.closed, "building polycurve");

        if n == 2 {
            let tolerance = self.config.tolerance;
            for (i, vertex) in self.vertices.iter().enumerate() {
                if let Some(radius) = vertex.radius.filter(|r| r.abs() >= tolerance) {
                    warn!(vertex = i, radius, "two-point curve, radius ignored");
                }
            }
            let segments = vec![Segment::Line {
                p1: self.vertices[0].point,
                p2: self.vertices[1].point,
            }];
            if let Some(observer) = self.observer.as_deref_mut() {
                observer.on_step(0, &self.vertices[0], &segments)?;
            }
            debug!(segments = 1, "polycurve built");
            return Ok(segments);
        }

        let mut arena = CornerArena::with_capacity(n);
        for i in 0..n {
            let kind = self.calc_circle_line(i)?;
            arena.push(Corner::new(self.vertices[i].point, kind));
        }

        let joins = reconcile::resolve(&mut arena, &self.config)?;
        let segments = reconcile::emit(
            &arena,
            &joins,
            &self.vertices,
            self.observer.as_deref_mut(),
        )?;

        debug!(segments = segments.len(), "polycurve built");
        Ok(segments)
    }

    fn check_input(&self) -> Result<()> {
        let n = self.vertices.len();
        if n < 2 {
            return Err(InputError::TooFewPoints { count: n, min: 2 }.into());
        }
        if let Some(index) = self.vertices.iter().position(|v| !v.is_finite()) {
            return Err(InputError::NonFinite { index }.into());
        }

        let edge_count = if self.config.closed { n } else { n - 1 };
        for edge in 0..edge_count {
            let (a, b) = (self.vertices[edge].point, self.vertices[(edge + 1) % n].point);
            if (b - a).norm() < TOLERANCE {
                warn!(edge, "coincident consecutive vertices");
                return Err(GeometryError::ZeroVector.into());
            }
        }
        Ok(())
    }

    /// Effective fillet radius at vertex `i`, if any.
    ///
    /// Radii below the tolerance are ignored, and the two end vertices of an
    /// open curve are never filleted.
    fn radius(&self, i: usize) -> Option<f64> {
        let radius = self.vertices[i]
            .radius
            .filter(|r| r.abs() >= self.config.tolerance)?;

        let n = self.vertices.len();
        if !self.config.closed && (i == 0 || i == n - 1) {
            warn!(vertex = i, radius, "end vertex of an open curve cannot be filleted");
            return None;
        }
        Some(radius)
    }

    /// The previous, current and next vertex around corner `i` (wrapping).
    fn corner_points(&self, i: usize) -> (Point2, Point2, Point2) {
        let n = self.vertices.len();
        (
            self.vertices[(i + n - 1) % n].point,
            self.vertices[i].point,
            self.vertices[(i + 1) % n].point,
        )
    }

    /// Computes the corner at vertex `i`: sharp, or the fillet arc for its radius.
    fn calc_circle_line(&self, i: usize) -> Result<CornerKind> {
        let Some(radius) = self.radius(i) else {
            trace!(vertex = i, "sharp corner");
            return Ok(CornerKind::Sharp);
        };

        let (p1, p2, p3) = self.corner_points(i);
        let alpha = angle_between(&(p1 - p2), &(p3 - p2));
        if PI - alpha < ANGLE_EPSILON {
            warn!(vertex = i, radius, "straight-through vertex, fillet ignored");
            return Ok(CornerKind::Sharp);
        }
        if alpha < ANGLE_EPSILON {
            return Err(GeometryError::Degenerate(format!(
                "curve is not valid: vertex {i} folds back onto its incoming edge"
            ))
            .into());
        }

        let arc = calc_2darc_start_end_from_lines_radius(&p1, &p2, &p3, radius)?;

        for (tangent_point, neighbour) in [(arc.start, p1), (arc.end, p3)] {
            let tangent_length = (p2 - tangent_point).norm();
            let edge_length = (p2 - neighbour).norm();
            if tangent_length > edge_length + self.config.tolerance {
                return Err(GeometryError::RadiusTooLarge {
                    vertex: i,
                    tangent_length,
                    edge_length,
                }
                .into());
            }
        }

        trace!(
            vertex = i,
            radius,
            center_x = arc.center.x,
            center_y = arc.center.y,
            "fillet corner"
        );
        Ok(CornerKind::Fillet(arc))
    }
}

/// Builds the segment list for `points` with the given configuration.
///
/// Accepts anything convertible to [`Vertex`]: `(x, y)` and `[x, y]` are sharp
/// corners, `(x, y, r)` and `[x, y, r]` carry a fillet radius.
///
/// # Errors
///
/// See [`SegCreator::execute`].
pub fn build_polycurve<I>(points: I, config: &PolycurveConfig) -> Result<Vec<Segment>>
where
    I: IntoIterator,
    I::Item: Into<Vertex>,
{
    let vertices = points.into_iter().map(Into::into).collect();
    SegCreator::new(vertices, *config).execute()
}
