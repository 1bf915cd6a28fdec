// Slice counts are small; usize <-> f64 conversions are exact in practice.
#![allow(clippy::cast_precision_loss)]

use tracing::{debug, info};

use crate::math::TOLERANCE;
use crate::mesh::Mesh;

use super::{intersect_triangle, RawSlice, SliceData, SlicePlaneSet, TimeAxis, WeightedPoint};

/// Point-cloud proximity tolerance as a fraction of the plane spacing.
const POINT_TOLERANCE_FACTOR: f64 = 0.75;

/// Planes and their unordered per-plane data.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceOutput {
    pub planes: SlicePlaneSet,
    pub slices: Vec<RawSlice>,
}

/// Cuts a mesh with evenly spaced horizontal planes.
///
/// Meshes with topology are intersected triangle by triangle; point clouds
/// keep vertices within `0.75 * step` of each plane, weighted by proximity.
/// An empty or flat mesh yields `slice_count` empty slices.
#[derive(Debug)]
pub struct SliceMesh<'a> {
    mesh: &'a Mesh,
    slice_count: usize,
    anchor: Option<f64>,
    axis: TimeAxis,
}

impl<'a> SliceMesh<'a> {
    /// Creates a new slicing operation.
    #[must_use]
    pub fn new(mesh: &'a Mesh, slice_count: usize) -> Self {
        Self {
            mesh,
            slice_count,
            anchor: None,
            axis: TimeAxis::default(),
        }
    }

    /// Aligns plane `slice_count / 2` with the given reference height.
    #[must_use]
    pub fn with_anchor(mut self, reference: Option<f64>) -> Self {
        self.anchor = reference;
        self
    }

    /// Sets the projection used for downstream contour space.
    #[must_use]
    pub fn with_time_axis(mut self, axis: TimeAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Executes the slicing.
    #[must_use]
    pub fn execute(&self) -> SliceOutput {
        let planes = match self.mesh.vertical_extent() {
            Some((lo, hi)) if hi - lo > TOLERANCE => {
                SlicePlaneSet::compute(lo, hi, self.slice_count, self.anchor)
            }
            extent => {
                debug!(
                    vertices = self.mesh.vertices().len(),
                    "mesh has no vertical extent, emitting empty slices"
                );
                let y = extent.map_or(0.0, |(lo, _)| lo);
                return SliceOutput {
                    slices: (0..self.slice_count)
                        .map(|index| self.raw_slice(index, y, self.empty_data()))
                        .collect(),
                    planes: SlicePlaneSet::degenerate(y, self.slice_count),
                };
            }
        };

        info!(
            slice_count = self.slice_count,
            step = planes.step,
            topology = self.mesh.has_topology(),
            "slicing mesh"
        );

        let slices = planes
            .heights
            .iter()
            .enumerate()
            .map(|(index, &height)| {
                let data = if self.mesh.has_topology() {
                    self.collect_segments(height)
                } else {
                    self.collect_points(height, planes.step * POINT_TOLERANCE_FACTOR)
                };
                self.raw_slice(index, height, data)
            })
            .collect();

        SliceOutput { planes, slices }
    }

    fn raw_slice(&self, index: usize, height: f64, data: SliceData) -> RawSlice {
        RawSlice {
            index,
            height,
            axis: self.axis,
            data,
        }
    }

    fn empty_data(&self) -> SliceData {
        if self.mesh.has_topology() {
            SliceData::Segments(Vec::new())
        } else {
            SliceData::Points(Vec::new())
        }
    }

    fn collect_segments(&self, target_y: f64) -> SliceData {
        SliceData::Segments(
            self.mesh
                .triangles()
                .filter_map(|tri| intersect_triangle(&tri, target_y))
                .collect(),
        )
    }

    fn collect_points(&self, target_y: f64, tolerance: f64) -> SliceData {
        SliceData::Points(
            self.mesh
                .vertices()
                .iter()
                .filter_map(|p| {
                    let weight = 1.0 - ((p.y - target_y).abs() / tolerance).clamp(0.0, 1.0);
                    (weight > 0.0).then_some(WeightedPoint { point: *p, weight })
                })
                .collect(),
        )
    }
}
