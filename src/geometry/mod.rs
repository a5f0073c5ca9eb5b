pub mod frame;
pub mod pline;
pub mod profile;
pub mod segment;
pub mod vertex;

pub use frame::Frame;
pub use pline::{Pline, PlineVertex};
pub use profile::CurvePoly;
pub use segment::Segment;
pub use vertex::{Vertex, Vertex3};
