pub mod analysis;
pub mod contour;
pub mod error;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod slicing;
pub mod smoothing;
pub mod wavetable;

pub use error::{MeshwaveError, Result};
pub use mesh::Mesh;
pub use pipeline::{Pipeline, PipelineParams, PipelineState, SliceSnapshot};
pub use slicing::TimeAxis;
pub use wavetable::{NormalizationPolicy, Wavetable};
