use tracing::{debug, trace};

use super::arena::{CornerArena, CornerId, CornerKind};
use crate::config::PolycurveConfig;
use crate::diagnostics::StepObserver;
use crate::error::{GeometryError, Result};
use crate::geometry::segment::Segment;
use crate::geometry::vertex::Vertex;
use crate::math::vector_2d::{angle_between_deg, points_coincide};

/// How the gap between two consecutive corners is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// A straight line from the first corner's exit to the next corner's entry.
    Line,
    /// The two points were snapped together; no segment is emitted.
    Merged,
}

/// Largest distance an arc tangent point may be moved by a merge. Anything
/// further would take it off its circle.
const ARC_SNAP_LIMIT: f64 = 1e-9;

/// Walks every edge of the arena, snapping coincident tangent points and
/// checking that the remaining gaps can be bridged by a forward line.
///
/// Returns one [`Join`] per edge; edge `e` runs from corner `e` to corner `e + 1`
/// (wrapping for closed curves).
///
/// # Errors
///
/// Returns `GeometryError::FilletOverlap` when a tangent point lies behind
/// the point the curve has already reached on the same edge, or when a gap
/// is too shallow for a line and no sharp corner can be moved to close it.
pub fn resolve(arena: &mut CornerArena, config: &PolycurveConfig) -> Result<Vec<Join>> {
    if arena.is_empty() {
        return Ok(Vec::new());
    }
    let n = arena.len();
    let edge_count = if config.closed { n } else { n.saturating_sub(1) };
    let mut joins = Vec::with_capacity(edge_count);

    for edge in 0..edge_count {
        let (from_id, to_id) = (arena.id_at(edge), arena.id_at(edge + 1));
        let (a, b) = (arena[from_id].exit, arena[to_id].entry);
        let closing = edge + 1 == n;

        if points_coincide(&a, &b, config.tolerance) && merge(arena, from_id, to_id, closing) {
            trace!(edge, "tangent points merged");
            joins.push(Join::Merged);
            continue;
        }

        let join = bridge(arena, from_id, to_id, edge, config)?;
        trace!(edge, ?join, "gap bridged");
        joins.push(join);
    }

    Ok(joins)
}

/// Snaps the meeting points of two corners onto each other.
///
/// A free sharp corner yields to its neighbour. An arc endpoint only moves
/// within [`ARC_SNAP_LIMIT`]; between two arcs the later one yields, except on
/// the closing edge where the first emitted segment keeps its start point.
/// Both corners are pinned afterwards. Returns `false`, leaving the arena
/// untouched, when neither side may move.
fn merge(arena: &mut CornerArena, from_id: CornerId, to_id: CornerId, closing: bool) -> bool {
    let Some([from, to]) = arena.pair_mut(from_id, to_id) else {
        return false;
    };
    let arc_may_move = (to.entry - from.exit).norm() <= ARC_SNAP_LIMIT;

    if from.exit != to.entry {
        if to.is_free() {
            to.snap_entry(from.exit);
        } else if from.is_free() {
            from.snap_exit(to.entry);
        } else if !arc_may_move {
            return false;
        } else if !from.is_sharp() && (closing || to.is_sharp()) {
            from.snap_exit(to.entry);
        } else if !to.is_sharp() {
            to.snap_entry(from.exit);
        } else {
            return false;
        }
    }
    from.pinned = true;
    to.pinned = true;
    true
}

/// Decides how a gap `from.exit → to.entry` is closed.
///
/// The gap must run forward along the edge. Before the next fillet the angle
/// between (arc midpoint - gap start) and (arc start - gap start) must stay
/// under the merge threshold; after a fillet the mirrored angle measured from
/// the gap end must stay under the split threshold. A gap passing both checks
/// gets a line. A gap failing one of them is closed by moving the free sharp
/// corner on the other side onto the arc's tangent point.
fn bridge(
    arena: &mut CornerArena,
    from_id: CornerId,
    to_id: CornerId,
    edge: usize,
    config: &PolycurveConfig,
) -> Result<Join> {
    let (from, to) = (&arena[from_id], &arena[to_id]);
    let (a, b) = (from.exit, to.entry);

    if (b - a).dot(&(to.vertex - from.vertex)) <= 0.0 {
        return Err(GeometryError::FilletOverlap { edge }.into());
    }

    let before_ok = match to.kind {
        CornerKind::Sharp => true,
        CornerKind::Fillet(arc) => {
            angle_between_deg(&(arc.midpoint - a), &(b - a)) < config.angle_threshold_merge_deg
        }
    };
    let after_ok = match from.kind {
        CornerKind::Sharp => true,
        CornerKind::Fillet(arc) => {
            angle_between_deg(&(arc.midpoint - b), &(a - b)) < config.angle_threshold_split_deg
        }
    };
    if before_ok && after_ok {
        return Ok(Join::Line);
    }

    let Some([from, to]) = arena.pair_mut(from_id, to_id) else {
        return Err(GeometryError::FilletOverlap { edge }.into());
    };
    if !before_ok && from.is_free() {
        from.snap_exit(b);
    } else if !after_ok && to.is_free() {
        to.snap_entry(a);
    } else {
        return Err(GeometryError::FilletOverlap { edge }.into());
    }
    from.pinned = true;
    to.pinned = true;
    debug!(edge, "shallow gap closed by moving a sharp corner");
    Ok(Join::Merged)
}

/// Produces the final segment list from the resolved arena.
///
/// For each corner in order: its arc (if filleted), then the line on the
/// following edge (if not merged). The observer, if any, sees the list after
/// every corner.
///
/// # Errors
///
/// Only errors raised by the observer are returned.
pub fn emit(
    arena: &CornerArena,
    joins: &[Join],
    vertices: &[Vertex],
    mut observer: Option<&mut (dyn StepObserver + '_)>,
) -> Result<Vec<Segment>> {
    let mut segments = Vec::with_capacity(arena.len() * 2);

    for (step, corner) in arena.iter().enumerate() {
        if let CornerKind::Fillet(arc) = corner.kind {
            segments.push(Segment::Arc {
                p1: corner.entry,
                p2: corner.exit,
                midpoint: arc.midpoint,
                radius: arc.radius,
                center: arc.center,
            });
        }
        if joins.get(step) == Some(&Join::Line) {
            let next = &arena[arena.id_at(step + 1)];
            segments.push(Segment::Line {
                p1: corner.exit,
                p2: next.entry,
            });
        }
        if let Some(observer) = observer.as_mut() {
            observer.on_step(step, &vertices[step], &segments)?;
        }
    }

    Ok(segments)
}
