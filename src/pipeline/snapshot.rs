use tracing::info;

use crate::analysis::CollisionReport;
use crate::contour::{AssembleContour, Contour};
use crate::mesh::Mesh;
use crate::slicing::{RawSlice, SliceMesh, SlicePlaneSet, TimeAxis};
use crate::wavetable::{resample_contours, NormalizationPolicy, Wavetable};

use super::PipelineParams;

/// Complete, immutable result of one pipeline run.
///
/// Shared as `Arc<SliceSnapshot>` and replaced as a whole, so readers never
/// observe a partially updated set.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceSnapshot {
    /// Generation token of the pipeline state this was computed for.
    pub generation: u64,
    pub planes: SlicePlaneSet,
    /// Unordered per-plane slicer output.
    pub slices: Vec<RawSlice>,
    pub contours: Vec<Contour>,
    pub wavetables: Vec<Wavetable>,
    pub collisions: CollisionReport,
    pub table_size: usize,
    pub time_axis: TimeAxis,
    pub normalization: NormalizationPolicy,
}

impl SliceSnapshot {
    /// Runs slicing, assembly, collision analysis and resampling on `mesh`.
    #[must_use]
    pub fn compute(mesh: &Mesh, params: &PipelineParams, generation: u64) -> Self {
        let anchor = params.anchor.and_then(|pair| mesh.landmark_midpoint(pair));
        let output = SliceMesh::new(mesh, params.slice_count)
            .with_anchor(anchor)
            .with_time_axis(params.time_axis)
            .execute();

        let contours: Vec<Contour> = output
            .slices
            .iter()
            .map(|slice| AssembleContour::new(slice).execute())
            .collect();
        let collisions = CollisionReport::from_slices(&output.slices);
        let wavetables = resample_contours(&contours, params.table_size, params.normalization);

        info!(
            generation,
            slices = contours.len(),
            fallbacks = contours.iter().filter(|c| c.is_fallback()).count(),
            collisions = collisions.total,
            "pipeline recomputed"
        );

        Self {
            generation,
            planes: output.planes,
            slices: output.slices,
            contours,
            wavetables,
            collisions,
            table_size: params.table_size,
            time_axis: params.time_axis,
            normalization: params.normalization,
        }
    }

    /// A copy of this snapshot with every wavetable replaced.
    #[must_use]
    pub fn with_wavetables(&self, wavetables: Vec<Wavetable>) -> Self {
        Self {
            wavetables,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn slice_count(&self) -> usize {
        self.contours.len()
    }
}
