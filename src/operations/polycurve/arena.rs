use std::ops::{Index, IndexMut};

use slotmap::SlotMap;

use crate::math::fillet_2d::FilletArc;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Identifier of a corner in the construction arena.
    pub struct CornerId;
}

/// What the curve does at a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerKind {
    /// The curve passes through the vertex.
    Sharp,
    /// The vertex is replaced by a tangent arc.
    Fillet(FilletArc),
}

/// A resolved vertex of the polycurve.
///
/// `entry` is where the curve arrives at the corner and `exit` where it
/// leaves. Both equal the vertex for a sharp corner and the arc tangent
/// points for a fillet. Reconciliation may snap them onto a neighbour.
#[derive(Debug, Clone, PartialEq)]
pub struct Corner {
    pub vertex: Point2,
    pub kind: CornerKind,
    pub entry: Point2,
    pub exit: Point2,
    /// Set once a snap has moved this corner; a pinned sharp corner is not moved again.
    pub pinned: bool,
}

impl Corner {
    #[must_use]
    pub fn new(vertex: Point2, kind: CornerKind) -> Self {
        let (entry, exit) = match kind {
            CornerKind::Sharp => (vertex, vertex),
            CornerKind::Fillet(arc) => (arc.start, arc.end),
        };
        Self {
            vertex,
            kind,
            entry,
            exit,
            pinned: false,
        }
    }

    #[must_use]
    pub fn is_sharp(&self) -> bool {
        matches!(self.kind, CornerKind::Sharp)
    }

    /// Returns whether this is a sharp corner that has not been snapped yet.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.is_sharp() && !self.pinned
    }

    /// Moves the arrival point. A sharp corner moves as a whole.
    pub fn snap_entry(&mut self, p: Point2) {
        self.entry = p;
        if self.is_sharp() {
            self.exit = p;
        }
        self.pinned = true;
    }

    /// Moves the departure point. A sharp corner moves as a whole.
    pub fn snap_exit(&mut self, p: Point2) {
        self.exit = p;
        if self.is_sharp() {
            self.entry = p;
        }
        self.pinned = true;
    }
}

/// Ordered store of corners built in the first construction pass.
#[derive(Debug, Default)]
pub struct CornerArena {
    corners: SlotMap<CornerId, Corner>,
    order: Vec<CornerId>,
}

impl CornerArena {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            corners: SlotMap::with_capacity_and_key(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Appends a corner after the current last one.
    pub fn push(&mut self, corner: Corner) -> CornerId {
        let id = self.corners.insert(corner);
        self.order.push(id);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Id of the corner at `position`, wrapping past the end.
    #[must_use]
    pub fn id_at(&self, position: usize) -> CornerId {
        self.order[position % self.order.len()]
    }

    /// Corners in curve order.
    pub fn iter(&self) -> impl Iterator<Item = &Corner> {
        self.order.iter().map(|&id| &self.corners[id])
    }

    /// Mutable access to two distinct corners at once.
    pub fn pair_mut(&mut self, a: CornerId, b: CornerId) -> Option<[&mut Corner; 2]> {
        self.corners.get_disjoint_mut([a, b])
    }
}

impl Index<CornerId> for CornerArena {
    type Output = Corner;

    fn index(&self, id: CornerId) -> &Corner {
        &self.corners[id]
    }
}

impl IndexMut<CornerId> for CornerArena {
    fn index_mut(&mut self, id: CornerId) -> &mut Corner {
        &mut self.corners[id]
    }
}
