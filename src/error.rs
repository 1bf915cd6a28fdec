use thiserror::Error;

/// Top-level error type for the meshwave pipeline.
#[derive(Debug, Error)]
pub enum MeshwaveError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Smoothing(#[from] SmoothingError),
}

/// Errors raised while constructing or preparing a mesh snapshot.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),

    #[error("vertex index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

/// Control parameters rejected at the pipeline boundary.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("slice count {value} is out of range [{min}, {max}]")]
    SliceCountOutOfRange { value: usize, min: usize, max: usize },

    #[error("table size must be positive")]
    ZeroTableSize,

    #[error("no captured mesh to freeze")]
    NothingToFreeze,

    #[error("missing credential for smoothing requests")]
    MissingCredential,
}

/// Failures of a single smoothing request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SmoothingError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("expected {expected} samples, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("sample {index} = {value} is outside [-1, 1]")]
    SampleOutOfRange { index: usize, value: f64 },
}

/// Convenience type alias for results using [`MeshwaveError`].
pub type Result<T> = std::result::Result<T, MeshwaveError>;
