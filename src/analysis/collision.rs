// Bin indices are bounded by COLLISION_BINS.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

use crate::math::interpolate::min_max;
use crate::math::Point2;
use crate::slicing::RawSlice;

/// Number of horizontal bins a slice is divided into.
pub const COLLISION_BINS: usize = 64;

/// Depths closer than this are treated as the same value.
pub const DEPTH_EPSILON: f64 = 1e-3;

/// Counts horizontal positions of a slice that hold more than one depth.
///
/// The slice's horizontal range is split into [`COLLISION_BINS`] bins. A bin
/// collides when its sorted depths contain a neighbouring pair further apart
/// than [`DEPTH_EPSILON`]: flattening it to one amplitude loses information.
#[derive(Debug)]
pub struct AnalyzeCollisions<'a> {
    points: &'a [Point2],
}

impl<'a> AnalyzeCollisions<'a> {
    /// Creates a new analysis over projected raw slice points.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self { points }
    }

    /// Executes the analysis, returning the number of colliding bins.
    #[must_use]
    pub fn execute(&self) -> usize {
        if self.points.len() < 2 {
            return 0;
        }
        let Some((min_x, max_x)) = min_max(self.points.iter().map(|p| p.x)) else {
            return 0;
        };
        let width = max_x - min_x;
        if width <= 0.0 {
            return 0;
        }

        let bin_size = width / COLLISION_BINS as f64;
        let mut bins: Vec<Vec<f64>> = vec![Vec::new(); COLLISION_BINS];
        for p in self.points {
            let bin = ((p.x - min_x) / bin_size).floor().max(0.0) as usize;
            let idx = bin.min(COLLISION_BINS - 1);
            bins[idx].push(p.y);
        }

        let mut collisions = 0;
        for depths in &mut bins {
            if depths.len() < 2 {
                continue;
            }
            depths.sort_by(f64::total_cmp);
            if depths.windows(2).any(|w| w[1] - w[0] > DEPTH_EPSILON) {
                collisions += 1;
            }
        }
        collisions
    }
}

/// Collision counts for every slice of one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub per_slice: Vec<usize>,
    pub total: usize,
}

impl CollisionReport {
    /// Analyzes each raw slice independently of contour assembly.
    #[must_use]
    pub fn from_slices(slices: &[RawSlice]) -> Self {
        let per_slice: Vec<usize> = slices
            .iter()
            .map(|s| AnalyzeCollisions::new(&s.projected_points()).execute())
            .collect();
        let total = per_slice.iter().sum();
        Self { per_slice, total }
    }
}
