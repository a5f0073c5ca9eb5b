pub mod indexed;
pub mod lift;
pub mod polycurve;

pub use indexed::{
    indexed_lists_to_segments, segments_to_indexed_lists, IndexedPolycurve, SegmentIndex,
};
pub use lift::{lift_segments, make_arc_segment, segments3d_from_points3d};
pub use polycurve::{build_polycurve, SegCreator};
