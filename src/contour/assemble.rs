use std::f64::consts::TAU;

use tracing::debug;

use crate::math::interpolate::lerp;
use crate::math::Point2;
use crate::slicing::{RawSlice, SliceData};

use super::{greedy_walk, Contour, ContourSource, PolylineGraph, MAX_CONTOUR_POINTS};

/// Number of points in the placeholder shape.
const FALLBACK_POINTS: usize = 64;

/// Reconstructs an ordered contour from one raw slice.
///
/// Segments are joined through a [`PolylineGraph`] and walked greedily;
/// point-cloud slices are sorted by horizontal position. A slice that yields
/// nothing gets [`fallback_contour`] so consumers always see a usable shape.
#[derive(Debug)]
pub struct AssembleContour<'a> {
    slice: &'a RawSlice,
    cap: usize,
}

impl<'a> AssembleContour<'a> {
    /// Creates a new assembly for the given slice.
    #[must_use]
    pub fn new(slice: &'a RawSlice) -> Self {
        Self {
            slice,
            cap: MAX_CONTOUR_POINTS,
        }
    }

    /// Lowers the point cap (never above [`MAX_CONTOUR_POINTS`]).
    #[must_use]
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap.min(MAX_CONTOUR_POINTS);
        self
    }

    /// Executes the assembly.
    #[must_use]
    pub fn execute(&self) -> Contour {
        let axis = self.slice.axis;
        let contour = match &self.slice.data {
            SliceData::Segments(segments) => {
                let graph = PolylineGraph::from_segments(
                    segments
                        .iter()
                        .map(|s| (axis.project(&s.start), axis.project(&s.end))),
                );
                let walk = greedy_walk(&graph, self.cap);
                if walk.traversed.len() < graph.edge_count() {
                    debug!(
                        slice = self.slice.index,
                        traversed = walk.traversed.len(),
                        edges = graph.edge_count(),
                        "greedy walk left edges unvisited"
                    );
                }
                Contour {
                    points: walk.points,
                    source: ContourSource::Segments,
                }
            }
            SliceData::Points(points) => {
                let mut projected: Vec<Point2> =
                    points.iter().map(|w| axis.project(&w.point)).collect();
                projected.sort_by(|a, b| a.x.total_cmp(&b.x));
                projected.truncate(self.cap);
                Contour {
                    points: projected,
                    source: ContourSource::Points,
                }
            }
        };

        if contour.is_empty() {
            fallback_contour(self.slice.index)
        } else {
            contour
        }
    }
}

/// Deterministic placeholder for slice `index`: one sine period across
/// `[-0.6, 0.6]` with amplitude 0.25, phase-shifted per slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn fallback_contour(index: usize) -> Contour {
    let phase = index as f64 * 0.35;
    let points = (0..FALLBACK_POINTS)
        .map(|i| {
            let t = i as f64 / (FALLBACK_POINTS - 1) as f64;
            Point2::new(lerp(-0.6, 0.6, t), 0.25 * t.mul_add(TAU, phase).sin())
        })
        .collect();
    Contour {
        points,
        source: ContourSource::Fallback,
    }
}
