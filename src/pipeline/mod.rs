mod params;
mod snapshot;

pub use params::{PipelineParams, MAX_SLICE_COUNT, MIN_SLICE_COUNT};
pub use snapshot::SliceSnapshot;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::mesh::{Mesh, StabilizeMesh, TriangulatePointCloud};
use crate::slicing::TimeAxis;
use crate::smoothing::SmoothingOutcome;
use crate::wavetable::NormalizationPolicy;

/// Observable pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Captures replace each other; nothing is sliced.
    Live,
    /// One capture is fixed and its results are cached.
    Frozen,
}

#[derive(Debug)]
enum Stage {
    Live {
        latest: Option<Arc<Mesh>>,
    },
    Frozen {
        mesh: Arc<Mesh>,
        snapshot: Arc<SliceSnapshot>,
    },
}

/// Owns the current capture and the results derived from it.
///
/// While live, incoming captures simply replace each other. Freezing runs
/// the full chain once and caches a [`SliceSnapshot`]; any parameter change
/// while frozen recomputes the whole chain. Every state change advances the
/// generation token so late asynchronous results can be recognised as stale.
#[derive(Debug)]
pub struct Pipeline {
    params: PipelineParams,
    stage: Stage,
    generation: u64,
}

impl Pipeline {
    /// Creates a live pipeline.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parameters are invalid.
    pub fn new(params: PipelineParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            stage: Stage::Live { latest: None },
            generation: 0,
        })
    }

    #[must_use]
    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn state(&self) -> PipelineState {
        match self.stage {
            Stage::Live { .. } => PipelineState::Live,
            Stage::Frozen { .. } => PipelineState::Frozen,
        }
    }

    /// The most recent capture (live) or the frozen capture.
    #[must_use]
    pub fn mesh(&self) -> Option<&Arc<Mesh>> {
        match &self.stage {
            Stage::Live { latest } => latest.as_ref(),
            Stage::Frozen { mesh, .. } => Some(mesh),
        }
    }

    /// The cached results, present only while frozen.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<SliceSnapshot>> {
        match &self.stage {
            Stage::Live { .. } => None,
            Stage::Frozen { snapshot, .. } => Some(Arc::clone(snapshot)),
        }
    }

    /// Accepts a capture from the tracker.
    ///
    /// Returns `false` (and drops the capture) while frozen.
    ///
    /// # Errors
    ///
    /// Returns `MeshError::Triangulation` if point-cloud triangulation is
    /// enabled and fails; the previous capture is kept.
    pub fn update_live(&mut self, capture: Mesh) -> Result<bool> {
        let Stage::Live { latest } = &mut self.stage else {
            debug!("capture ignored while frozen");
            return Ok(false);
        };

        let mut mesh = capture;
        if self.params.stabilize {
            mesh = StabilizeMesh::new(&mesh)
                .with_roll_landmarks(self.params.roll_landmarks)
                .execute();
        }
        if self.params.triangulate_point_clouds {
            mesh = TriangulatePointCloud::new(&mesh).execute()?;
        }

        *latest = Some(Arc::new(mesh));
        Ok(true)
    }

    /// Fixes the latest capture and computes its results.
    ///
    /// Freezing an already frozen pipeline returns the cached snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NothingToFreeze` if no capture has arrived.
    pub fn freeze(&mut self) -> Result<Arc<SliceSnapshot>> {
        let mesh = match &self.stage {
            Stage::Frozen { snapshot, .. } => return Ok(Arc::clone(snapshot)),
            Stage::Live { latest: None } => return Err(ConfigError::NothingToFreeze.into()),
            Stage::Live {
                latest: Some(mesh),
            } => Arc::clone(mesh),
        };
        let snapshot = self.compute(&mesh);
        self.stage = Stage::Frozen {
            mesh,
            snapshot: Arc::clone(&snapshot),
        };
        Ok(snapshot)
    }

    /// Returns to live tracking, discarding cached results.
    ///
    /// The frozen capture stays available as the latest capture.
    pub fn reset(&mut self) {
        if let Stage::Frozen { mesh, .. } = &self.stage {
            let latest = Some(Arc::clone(mesh));
            self.generation += 1;
            self.stage = Stage::Live { latest };
        }
    }

    /// Changes the slice count, recomputing if frozen.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SliceCountOutOfRange`; the current state is kept.
    pub fn set_slice_count(&mut self, count: usize) -> Result<()> {
        let params = self.params.clone().with_slice_count(count);
        params.validate()?;
        self.replace_params(params);
        Ok(())
    }

    /// Changes the time axis, recomputing if frozen.
    pub fn set_time_axis(&mut self, axis: TimeAxis) {
        let params = self.params.clone().with_time_axis(axis);
        self.replace_params(params);
    }

    /// Changes the normalization policy, recomputing if frozen.
    pub fn set_normalization(&mut self, policy: NormalizationPolicy) {
        let params = self.params.clone().with_normalization(policy);
        self.replace_params(params);
    }

    /// Installs smoothed wavetables if they belong to the current generation.
    ///
    /// Returns `false` when the outcome is stale (the pipeline was reset,
    /// refrozen or reconfigured since the batch was built) or does not match
    /// the snapshot's slice count and table size; the current tables are
    /// then left untouched.
    pub fn apply_smoothing(&mut self, outcome: SmoothingOutcome) -> bool {
        let Stage::Frozen { snapshot, .. } = &mut self.stage else {
            warn!(batch = outcome.generation, "smoothing result discarded: not frozen");
            return false;
        };
        if outcome.generation != self.generation {
            warn!(
                batch = outcome.generation,
                current = self.generation,
                "smoothing result discarded: stale generation"
            );
            return false;
        }
        let table_size = snapshot.table_size;
        if outcome.wavetables.len() != snapshot.slice_count()
            || outcome.wavetables.iter().any(|w| w.len() != table_size)
        {
            warn!(
                tables = outcome.wavetables.len(),
                slices = snapshot.slice_count(),
                table_size,
                "smoothing result discarded: shape mismatch"
            );
            return false;
        }
        *snapshot = Arc::new(snapshot.with_wavetables(outcome.wavetables));
        true
    }

    fn replace_params(&mut self, params: PipelineParams) {
        if params == self.params {
            return;
        }
        self.params = params;
        if let Stage::Frozen { mesh, .. } = &self.stage {
            let mesh = Arc::clone(mesh);
            let snapshot = self.compute(&mesh);
            self.stage = Stage::Frozen { mesh, snapshot };
        }
    }

    fn compute(&mut self, mesh: &Mesh) -> Arc<SliceSnapshot> {
        self.generation += 1;
        Arc::new(SliceSnapshot::compute(mesh, &self.params, self.generation))
    }
}
