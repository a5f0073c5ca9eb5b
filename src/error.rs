use thiserror::Error;

/// Top-level error type for polycurve construction.
#[derive(Debug, Error)]
pub enum PolycurveError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Intersection(#[from] IntersectionError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Diagnostics(#[from] DiagnosticsError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error(
        "fillet radius at vertex {vertex} is too large: tangent length {tangent_length} exceeds edge length {edge_length}"
    )]
    RadiusTooLarge {
        vertex: usize,
        tangent_length: f64,
        edge_length: f64,
    },

    #[error("fillets on edge {edge} overlap")]
    FilletOverlap { edge: usize },
}

/// Errors raised by line-circle intersection.
#[derive(Debug, Error)]
pub enum IntersectionError {
    #[error("line does not touch the circle (discriminant {discriminant})")]
    LineMissesCircle { discriminant: f64 },

    #[error("line crosses the circle twice (discriminant {discriminant})")]
    DoubleIntersection { discriminant: f64 },
}

/// Errors raised before any geometry is computed.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("at least {min} points are required, got {count}")]
    TooFewPoints { count: usize, min: usize },

    #[error("neither 2D nor 3D points were supplied")]
    MissingPoints,

    #[error("non-finite coordinate or radius at vertex {index}")]
    NonFinite { index: usize },

    #[error("index {index} is out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised by the optional construction diagnostics.
#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("failed to write step plot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to format step plot")]
    Format(#[from] std::fmt::Error),
}

/// Convenience type alias for results using [`PolycurveError`].
pub type Result<T> = std::result::Result<T, PolycurveError>;
