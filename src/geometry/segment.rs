use crate::math::arc_2d::arc_sweep;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

/// One piece of a polycurve: a straight line or a circular arc.
///
/// Arcs are traversed `p1 → midpoint → p2`; the midpoint lies on the circle
/// halfway between the endpoints and fixes the turning direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment<P = Point2> {
    /// A straight line from `p1` to `p2`.
    Line { p1: P, p2: P },
    /// A circular arc from `p1` through `midpoint` to `p2`.
    Arc {
        p1: P,
        p2: P,
        midpoint: P,
        radius: f64,
        center: P,
    },
}

impl<P: Copy> Segment<P> {
    /// Start point of the segment.
    #[must_use]
    pub fn p1(&self) -> P {
        match *self {
            Self::Line { p1, .. } | Self::Arc { p1, .. } => p1,
        }
    }

    /// End point of the segment.
    #[must_use]
    pub fn p2(&self) -> P {
        match *self {
            Self::Line { p2, .. } | Self::Arc { p2, .. } => p2,
        }
    }

    #[must_use]
    pub fn is_arc(&self) -> bool {
        matches!(self, Self::Arc { .. })
    }

    /// Arc midpoint, or `None` for a line.
    #[must_use]
    pub fn midpoint(&self) -> Option<P> {
        match *self {
            Self::Line { .. } => None,
            Self::Arc { midpoint, .. } => Some(midpoint),
        }
    }

    /// The same segment traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match *self {
            Self::Line { p1, p2 } => Self::Line { p1: p2, p2: p1 },
            Self::Arc {
                p1,
                p2,
                midpoint,
                radius,
                center,
            } => Self::Arc {
                p1: p2,
                p2: p1,
                midpoint,
                radius,
                center,
            },
        }
    }

    /// Applies `f` to every point of the segment, keeping the radius.
    #[must_use]
    pub fn map_points<Q, F: Fn(P) -> Q>(&self, f: F) -> Segment<Q> {
        match *self {
            Self::Line { p1, p2 } => Segment::Line {
                p1: f(p1),
                p2: f(p2),
            },
            Self::Arc {
                p1,
                p2,
                midpoint,
                radius,
                center,
            } => Segment::Arc {
                p1: f(p1),
                p2: f(p2),
                midpoint: f(midpoint),
                radius,
                center: f(center),
            },
        }
    }
}

impl Segment<Point2> {
    /// Signed sweep in radians (positive counter-clockwise), or `None` for a line.
    #[must_use]
    pub fn sweep(&self) -> Option<f64> {
        match self {
            Self::Line { .. } => None,
            Self::Arc {
                p1,
                p2,
                midpoint,
                center,
                ..
            } => Some(arc_sweep(center, p1, midpoint, p2)),
        }
    }

    /// Signed area between the chord and the arc, zero for a line.
    ///
    /// Positive when the arc bulges to the right of `p1 → p2`, which is
    /// outward for a counter-clockwise loop.
    #[must_use]
    pub fn bulge_area(&self) -> f64 {
        match self {
            Self::Line { .. } => 0.0,
            Self::Arc { radius, .. } => {
                let theta = self.sweep().unwrap_or(0.0);
                0.5 * radius * radius * (theta - theta.sin())
            }
        }
    }

    /// Length along the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Line { p1, p2 } => (p2 - p1).norm(),
            Self::Arc { radius, .. } => radius * self.sweep().unwrap_or(0.0).abs(),
        }
    }
}

/// Signed area enclosed by a connected list of 2D segments.
///
/// The polygon through the segment start points gives the chord area; each
/// arc then adds the circular segment between its chord and itself. An open
/// list is closed by the chord from its end back to its start. Positive for
/// counter-clockwise loops.
#[must_use]
pub fn signed_area(segments: &[Segment]) -> f64 {
    let mut outline: Vec<Point2> = segments.iter().map(Segment::p1).collect();
    if let (Some(first), Some(last)) = (segments.first(), segments.last()) {
        if last.p2() != first.p1() {
            outline.push(last.p2());
        }
    }
    signed_area_2d(&outline) + segments.iter().map(Segment::bulge_area).sum::<f64>()
}
