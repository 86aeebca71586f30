use thiserror::Error;

/// Top-level error type for heatmap slicing.
#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Slicing(#[from] SlicingError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Repair(#[from] RepairError),
}

/// Errors related to geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("plane basis vectors are not orthogonal (u . v = {dot})")]
    InvalidBasis { dot: f64 },

    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised while building the slicing slab.
#[derive(Debug, Error)]
pub enum SlicingError {
    #[error("orientation \"{0}\" not recognized")]
    UnknownOrientation(String),

    #[error("a single position value requires a named orientation")]
    InvalidPosition,

    #[error("slab thickness must be finite and non-negative, got {0}")]
    InvalidThickness(f64),

    #[error("atlas has no root region")]
    MissingRoot,
}

/// Errors in user supplied heatmap values.
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("heatmap values should be numbers, not {value} for entry \"{region}\"")]
    NonNumeric { region: String, value: f64 },

    #[error("region name \"{0}\" not recognized")]
    UnknownRegion(String),
}

/// Errors from polygon repair.
#[derive(Debug, Error)]
pub enum RepairError {
    #[error("polygon clipping failed: {0}")]
    Clipper(String),

    #[error("polygon repair produced no area")]
    Empty,
}

/// Convenience type alias for results using [`HeatmapError`].
pub type Result<T> = std::result::Result<T, HeatmapError>;
