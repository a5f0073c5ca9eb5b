pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use config::PolycurveConfig;
pub use error::{PolycurveError, Result};
pub use geometry::{CurvePoly, Frame, Segment, Vertex, Vertex3};
pub use math::fillet_2d::calc_2darc_start_end_from_lines_radius;
pub use operations::{build_polycurve, segments_to_indexed_lists, SegCreator};
