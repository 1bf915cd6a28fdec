use crate::error::ConfigError;
use crate::mesh::LandmarkPair;
use crate::slicing::TimeAxis;
use crate::wavetable::{NormalizationPolicy, DEFAULT_TABLE_SIZE};

/// Smallest accepted slice count.
pub const MIN_SLICE_COUNT: usize = 2;

/// Largest accepted slice count.
pub const MAX_SLICE_COUNT: usize = 64;

/// Control parameters for the slicing pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineParams {
    /// Number of horizontal slices (and wavetables).
    pub slice_count: usize,

    /// Samples per wavetable. Fixed for the lifetime of a pipeline.
    pub table_size: usize,

    /// Horizontal axis used as the wavetable time axis.
    pub time_axis: TimeAxis,

    /// Depth range each contour is normalized against.
    pub normalization: NormalizationPolicy,

    /// Landmarks whose mid-height the middle slice is aligned to.
    pub anchor: Option<LandmarkPair>,

    /// Center, scale and level incoming captures.
    pub stabilize: bool,

    /// Landmarks levelled by stabilization.
    pub roll_landmarks: Option<LandmarkPair>,

    /// Delaunay-triangulate captures that arrive without topology.
    pub triangulate_point_clouds: bool,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            slice_count: 12,
            table_size: DEFAULT_TABLE_SIZE,
            time_axis: TimeAxis::Primary,
            normalization: NormalizationPolicy::WholeMesh,
            anchor: None,
            stabilize: false,
            roll_landmarks: None,
            triangulate_point_clouds: false,
        }
    }
}

impl PipelineParams {
    /// Parameters for captures from the face tracker.
    ///
    /// Stabilizes on the eye corners and anchors the middle slice between
    /// the lips.
    #[must_use]
    pub fn for_face_capture() -> Self {
        Self {
            anchor: Some(LandmarkPair::LIPS),
            stabilize: true,
            roll_landmarks: Some(LandmarkPair::EYES),
            ..Default::default()
        }
    }

    /// Set slice count.
    #[must_use]
    pub const fn with_slice_count(mut self, count: usize) -> Self {
        self.slice_count = count;
        self
    }

    /// Set table size.
    #[must_use]
    pub const fn with_table_size(mut self, size: usize) -> Self {
        self.table_size = size;
        self
    }

    /// Set time axis.
    #[must_use]
    pub const fn with_time_axis(mut self, axis: TimeAxis) -> Self {
        self.time_axis = axis;
        self
    }

    /// Set normalization policy.
    #[must_use]
    pub const fn with_normalization(mut self, policy: NormalizationPolicy) -> Self {
        self.normalization = policy;
        self
    }

    /// Set anchor landmarks.
    #[must_use]
    pub const fn with_anchor(mut self, anchor: Option<LandmarkPair>) -> Self {
        self.anchor = anchor;
        self
    }

    /// Enable capture stabilization, optionally levelling `roll` landmarks.
    #[must_use]
    pub const fn with_stabilization(mut self, roll: Option<LandmarkPair>) -> Self {
        self.stabilize = true;
        self.roll_landmarks = roll;
        self
    }

    /// Enable point-cloud triangulation.
    #[must_use]
    pub const fn with_triangulation(mut self, enabled: bool) -> Self {
        self.triangulate_point_clouds = enabled;
        self
    }

    /// Checks the parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SliceCountOutOfRange` or `ConfigError::ZeroTableSize`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SLICE_COUNT..=MAX_SLICE_COUNT).contains(&self.slice_count) {
            return Err(ConfigError::SliceCountOutOfRange {
                value: self.slice_count,
                min: MIN_SLICE_COUNT,
                max: MAX_SLICE_COUNT,
            });
        }
        if self.table_size == 0 {
            return Err(ConfigError::ZeroTableSize);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        let params = PipelineParams::default();
        assert_eq!(params.slice_count, 12);
        assert_eq!(params.table_size, 512);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn face_capture_preset() {
        let params = PipelineParams::for_face_capture();
        assert!(params.stabilize);
        assert_eq!(params.anchor, Some(LandmarkPair::LIPS));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn slice_count_bounds() {
        assert!(PipelineParams::default().with_slice_count(1).validate().is_err());
        assert!(PipelineParams::default().with_slice_count(2).validate().is_ok());
        assert!(PipelineParams::default().with_slice_count(64).validate().is_ok());
        assert!(PipelineParams::default().with_slice_count(65).validate().is_err());
    }

    #[test]
    fn zero_table_size_is_rejected() {
        let err = PipelineParams::default().with_table_size(0).validate().unwrap_err();
        assert_eq!(err, ConfigError::ZeroTableSize);
    }
}
