mod assemble;
pub mod graph;
mod walk;

pub use assemble::{fallback_contour, AssembleContour};
pub use graph::PolylineGraph;
pub use walk::{greedy_walk, GreedyWalk};

use crate::math::Point2;

/// Hard upper bound on the number of points in a contour.
pub const MAX_CONTOUR_POINTS: usize = 2048;

/// How a contour was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContourSource {
    /// Greedy walk over triangle intersection segments.
    Segments,
    /// Point-cloud vertices sorted by horizontal position.
    Points,
    /// Placeholder shape for a slice that produced nothing.
    Fallback,
}

/// Ordered cross-section of one slice in contour space.
///
/// Each point is `(horizontal, depth)`. Never longer than
/// [`MAX_CONTOUR_POINTS`].
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Point2>,
    pub source: ContourSource,
}

impl Contour {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` if this is the placeholder shape.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == ContourSource::Fallback
    }
}
