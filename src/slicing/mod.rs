mod engine;
mod planes;
mod triangle;

pub use engine::{SliceMesh, SliceOutput};
pub use planes::SlicePlaneSet;
pub use triangle::intersect_triangle;

use crate::math::{Point2, Point3};

/// Selects which horizontal mesh axis becomes the wavetable's time axis.
///
/// The remaining horizontal axis supplies depth (amplitude).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeAxis {
    /// Time runs along `x`, amplitude is taken from `z`.
    #[default]
    Primary,
    /// Time runs along `z`, amplitude is taken from `x`.
    Secondary,
}

impl TimeAxis {
    /// Projects a mesh point to contour space `(horizontal, depth)`.
    #[must_use]
    pub fn project(self, p: &Point3) -> Point2 {
        match self {
            Self::Primary => Point2::new(p.x, p.z),
            Self::Secondary => Point2::new(p.z, p.x),
        }
    }
}

/// One intersection of a triangle with a slice plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point3,
    pub end: Point3,
}

/// A point-cloud vertex retained near a slice plane.
///
/// `weight` falls linearly from 1 on the plane to 0 at the tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPoint {
    pub point: Point3,
    pub weight: f64,
}

/// Unordered per-plane output of the slicer.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceData {
    /// Triangle/plane intersection segments (topology-aware mode).
    Segments(Vec<Segment>),
    /// Vertices near the plane (point-cloud mode).
    Points(Vec<WeightedPoint>),
}

/// Raw slicing result for a single plane, before contour assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSlice {
    /// Position of the plane in the set.
    pub index: usize,
    /// Height of the plane.
    pub height: f64,
    /// Projection used for everything downstream of the slicer.
    pub axis: TimeAxis,
    pub data: SliceData,
}

impl RawSlice {
    /// Returns `true` if the plane met nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.data {
            SliceData::Segments(s) => s.is_empty(),
            SliceData::Points(p) => p.is_empty(),
        }
    }

    /// All raw positions on this plane, projected to contour space.
    ///
    /// Segments contribute both endpoints.
    #[must_use]
    pub fn projected_points(&self) -> Vec<Point2> {
        match &self.data {
            SliceData::Segments(segments) => segments
                .iter()
                .flat_map(|s| [self.axis.project(&s.start), self.axis.project(&s.end)])
                .collect(),
            SliceData::Points(points) => points
                .iter()
                .map(|w| self.axis.project(&w.point))
                .collect(),
        }
    }
}
