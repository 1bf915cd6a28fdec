use crate::math::TOLERANCE;

/// Heights of the horizontal planes cutting a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicePlaneSet {
    /// Number of planes.
    pub slice_count: usize,
    /// Lower bound of the (possibly anchored) vertical range.
    pub min_y: f64,
    /// Upper bound of the (possibly anchored) vertical range.
    pub max_y: f64,
    /// Distance between consecutive planes. Zero for a degenerate mesh.
    pub step: f64,
    /// Plane heights, ascending.
    pub heights: Vec<f64>,
    /// Plane aligned with the anchor reference height, if any.
    pub anchor_index: Option<usize>,
}

impl SlicePlaneSet {
    /// Spreads `slice_count` planes evenly over `[min_y, max_y]`.
    ///
    /// With a `reference` height the whole set is translated so plane
    /// `slice_count / 2` lands exactly on it; spacing is unchanged.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(min_y: f64, max_y: f64, slice_count: usize, reference: Option<f64>) -> Self {
        let step = (max_y - min_y) / slice_count.saturating_sub(1).max(1) as f64;
        let anchor_index = slice_count / 2;

        let shift = reference.map_or(0.0, |r| r - step.mul_add(anchor_index as f64, min_y));
        let base = min_y + shift;

        let heights = (0..slice_count)
            .map(|i| step.mul_add(i as f64, base))
            .collect();

        Self {
            slice_count,
            min_y: base,
            max_y: max_y + shift,
            step,
            heights,
            anchor_index: reference.map(|_| anchor_index),
        }
    }

    /// A set for a mesh without vertical extent: every plane sits at `y`.
    #[must_use]
    pub fn degenerate(y: f64, slice_count: usize) -> Self {
        Self {
            slice_count,
            min_y: y,
            max_y: y,
            step: 0.0,
            heights: vec![y; slice_count],
            anchor_index: None,
        }
    }

    /// Returns `true` if the planes do not span any height.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.step.abs() < TOLERANCE
    }
}
