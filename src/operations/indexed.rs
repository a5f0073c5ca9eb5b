//! Conversion between segment lists and indexed point lists.
//!
//! The indexed form stores every distinct point once and describes each
//! segment by 1-based indices into that list: two for a line, three
//! (start, midpoint, end) for an arc. This is the layout CAD exchange formats
//! use for indexed polycurves.

use tracing::trace;

use crate::error::{InputError, Result};
use crate::geometry::segment::Segment;
use crate::math::fillet_2d::circle_from_3_points;
use crate::math::Point2;

/// Indices of one segment into an [`IndexedPolycurve`] point list (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentIndex {
    /// `[start, end]`
    Line([usize; 2]),
    /// `[start, midpoint, end]`
    Arc([usize; 3]),
}

impl SegmentIndex {
    /// The indices as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        match self {
            Self::Line(ix) => ix,
            Self::Arc(ix) => ix,
        }
    }
}

/// A deduplicated point list plus per-segment indices.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPolycurve<P = Point2> {
    pub points: Vec<P>,
    pub indices: Vec<SegmentIndex>,
}

/// Converts a segment list into its indexed form.
///
/// Points are collected in traversal order and deduplicated by exact
/// equality, so a connected list reuses each shared endpoint. An arc's
/// midpoint is listed before its end point. For a closed curve of more than
/// one segment the end of the last segment always refers to point `1`.
///
/// Continuity is not checked; a gap simply produces two distinct points.
#[must_use]
pub fn segments_to_indexed_lists<P>(segments: &[Segment<P>], closed: bool) -> IndexedPolycurve<P>
where
    P: Copy + PartialEq,
{
    let mut points: Vec<P> = Vec::with_capacity(segments.len() * 2);
    let mut indices = Vec::with_capacity(segments.len());

    let last = segments.len().saturating_sub(1);
    for (k, seg) in segments.iter().enumerate() {
        let start = index_of(seg.p1(), &mut points);
        let mid = seg.midpoint().map(|m| index_of(m, &mut points));
        let end = if closed && k == last && k > 0 {
            1
        } else {
            index_of(seg.p2(), &mut points)
        };
        indices.push(match mid {
            Some(mid) => SegmentIndex::Arc([start, mid, end]),
            None => SegmentIndex::Line([start, end]),
        });
    }

    trace!(
        segments = segments.len(),
        points = points.len(),
        "indexed polycurve"
    );
    IndexedPolycurve { points, indices }
}

/// 1-based index of `p` in `points`, appending it if absent.
fn index_of<P: PartialEq>(p: P, points: &mut Vec<P>) -> usize {
    if let Some(pos) = points.iter().position(|q| *q == p) {
        pos + 1
    } else {
        points.push(p);
        points.len()
    }
}

/// Rebuilds 2D segments from their indexed form.
///
/// Arc centers and radii are recovered from the circle through the three
/// indexed points.
///
/// # Errors
///
/// - `InputError::IndexOutOfRange` for an index of `0` or past the point list
/// - `GeometryError::Degenerate` for an arc whose three points are collinear
pub fn indexed_lists_to_segments(indexed: &IndexedPolycurve) -> Result<Vec<Segment>> {
    let len = indexed.points.len();
    let point = |index: usize| -> Result<Point2> {
        index
            .checked_sub(1)
            .and_then(|i| indexed.points.get(i))
            .copied()
            .ok_or_else(|| InputError::IndexOutOfRange { index, len }.into())
    };

    indexed
        .indices
        .iter()
        .map(|ix| match *ix {
            SegmentIndex::Line([a, b]) => Ok(Segment::Line {
                p1: point(a)?,
                p2: point(b)?,
            }),
            SegmentIndex::Arc([a, m, b]) => {
                let (p1, midpoint, p2) = (point(a)?, point(m)?, point(b)?);
                let (center, radius) = circle_from_3_points(&p1, &midpoint, &p2)?;
                Ok(Segment::Arc {
                    p1,
                    p2,
                    midpoint,
                    radius,
                    center,
                })
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::config::PolycurveConfig;
    use crate::error::PolycurveError;
    use crate::operations::polycurve::build_polycurve;

    fn filleted_square() -> Vec<Segment> {
        build_polycurve(
            [
                (0.0, 0.0, 0.0),
                (10.0, 0.0, 2.0),
                (10.0, 10.0, 0.0),
                (0.0, 10.0, 0.0),
            ],
            &PolycurveConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn closed_square_indices() {
        let indexed = segments_to_indexed_lists(&filleted_square(), true);
        assert_eq!(indexed.points.len(), 6);
        assert_eq!(
            indexed.indices,
            vec![
                SegmentIndex::Line([1, 2]),
                SegmentIndex::Arc([2, 3, 4]),
                SegmentIndex::Line([4, 5]),
                SegmentIndex::Line([5, 6]),
                SegmentIndex::Line([6, 1]),
            ]
        );
        assert_eq!(indexed.points[0], Point2::new(0.0, 0.0));
    }

    #[test]
    fn open_curve_keeps_last_point() {
        let segs = build_polycurve(
            [(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)],
            &PolycurveConfig::open(),
        )
        .unwrap();
        let indexed = segments_to_indexed_lists(&segs, false);
        assert_eq!(indexed.points.len(), 3);
        assert_eq!(
            indexed.indices,
            vec![SegmentIndex::Line([1, 2]), SegmentIndex::Line([2, 3])]
        );
    }

    #[test]
    fn closed_two_point_curve_keeps_both_ends() {
        let segs = build_polycurve([(0.0, 0.0), (3.0, 4.0)], &PolycurveConfig::default()).unwrap();
        let indexed = segments_to_indexed_lists(&segs, true);
        assert_eq!(indexed.points.len(), 2);
        assert_eq!(indexed.indices, vec![SegmentIndex::Line([1, 2])]);
        let rebuilt = indexed_lists_to_segments(&indexed).unwrap();
        assert_eq!(rebuilt, segs);
    }

    #[test]
    fn round_trip_restores_segments() {
        let segs = filleted_square();
        let indexed = segments_to_indexed_lists(&segs, true);
        let rebuilt = indexed_lists_to_segments(&indexed).unwrap();
        assert_eq!(rebuilt.len(), segs.len());
        for (a, b) in segs.iter().zip(&rebuilt) {
            assert_eq!(a.is_arc(), b.is_arc());
            assert_eq!(a.p1(), b.p1());
            assert_eq!(a.p2(), b.p2());
        }
        let Segment::Arc { center, radius, .. } = rebuilt[1] else {
            panic!("expected an arc");
        };
        assert_abs_diff_eq!(center, Point2::new(8.0, 2.0), epsilon = 1e-9);
        assert_abs_diff_eq!(radius, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn bad_index_is_reported() {
        let indexed = IndexedPolycurve {
            points: vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
            indices: vec![SegmentIndex::Line([1, 3])],
        };
        let err = indexed_lists_to_segments(&indexed).unwrap_err();
        assert!(matches!(
            err,
            PolycurveError::Input(InputError::IndexOutOfRange { index: 3, len: 2 })
        ));

        let zero = IndexedPolycurve {
            points: indexed.points.clone(),
            indices: vec![SegmentIndex::Line([0, 1])],
        };
        assert!(indexed_lists_to_segments(&zero).is_err());
    }

    #[test]
    fn empty_list() {
        let indexed = segments_to_indexed_lists::<Point2>(&[], true);
        assert!(indexed.points.is_empty());
        assert!(indexed.indices.is_empty());
    }
}
