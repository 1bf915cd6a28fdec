mod stabilize;
mod triangulate;

pub use stabilize::StabilizeMesh;
pub use triangulate::TriangulatePointCloud;

use crate::error::MeshError;
use crate::math::interpolate::min_max;
use crate::math::Point3;

/// A captured surface: vertices plus optional triangle topology.
///
/// A mesh without indices is a point cloud and is sliced by proximity
/// weighting instead of edge intersection. Meshes are immutable once built;
/// the pipeline shares them as `Arc<Mesh>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3>,
    indices: Option<Vec<[u32; 3]>>,
}

impl Mesh {
    /// Creates a point-cloud mesh (no topology).
    #[must_use]
    pub fn point_cloud(vertices: Vec<Point3>) -> Self {
        Self {
            vertices,
            indices: None,
        }
    }

    /// Creates a triangle mesh, validating every index.
    ///
    /// An empty index list yields a point cloud.
    ///
    /// # Errors
    ///
    /// Returns `MeshError::IndexOutOfRange` if any index does not address a vertex.
    pub fn new(vertices: Vec<Point3>, indices: Vec<[u32; 3]>) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        if let Some(&index) = indices
            .iter()
            .flatten()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        let indices = if indices.is_empty() {
            None
        } else {
            Some(indices)
        };
        Ok(Self { vertices, indices })
    }

    /// Creates a triangle mesh from a flat index buffer.
    ///
    /// # Errors
    ///
    /// Returns `MeshError::IndexCountNotTriangles` if the buffer length is not a
    /// multiple of 3, or `MeshError::IndexOutOfRange` for a dangling index.
    pub fn from_flat_indices(vertices: Vec<Point3>, indices: &[u32]) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotTriangles(indices.len()));
        }
        let triangles = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self::new(vertices, triangles)
    }

    /// Returns the vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Returns the triangle indices, or `None` for a point cloud.
    #[must_use]
    pub fn indices(&self) -> Option<&[[u32; 3]]> {
        self.indices.as_deref()
    }

    /// Returns `true` if the mesh carries triangle topology.
    #[must_use]
    pub fn has_topology(&self) -> bool {
        self.indices.is_some()
    }

    /// Returns `true` if the mesh has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the `(min_y, max_y)` vertical extent, or `None` if empty.
    #[must_use]
    pub fn vertical_extent(&self) -> Option<(f64, f64)> {
        min_max(self.vertices.iter().map(|v| v.y))
    }

    /// Iterates over triangle corner positions. Empty for a point cloud.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.indices.iter().flatten().map(|&[a, b, c]| {
            [
                self.vertices[a as usize],
                self.vertices[b as usize],
                self.vertices[c as usize],
            ]
        })
    }

    /// Height halfway between two landmark vertices, if both exist.
    #[must_use]
    pub fn landmark_midpoint(&self, pair: LandmarkPair) -> Option<f64> {
        let a = self.vertices.get(pair.first)?;
        let b = self.vertices.get(pair.second)?;
        Some((a.y + b.y) * 0.5)
    }
}

/// Two vertex indices naming semantically meaningful points of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkPair {
    pub first: usize,
    pub second: usize,
}

impl LandmarkPair {
    /// Upper and lower inner lip in the face-tracker topology.
    pub const LIPS: Self = Self::new(13, 14);

    /// Outer corners of the left and right eye in the face-tracker topology.
    pub const EYES: Self = Self::new(33, 263);

    #[must_use]
    pub const fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn rejects_dangling_index() {
        let err = Mesh::new(square(), vec![[0, 1, 4]]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                index: 4,
                vertex_count: 4
            }
        ));
    }

    #[test]
    fn rejects_partial_triangle_buffer() {
        let err = Mesh::from_flat_indices(square(), &[0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, MeshError::IndexCountNotTriangles(4)));
    }

    #[test]
    fn flat_indices_group_into_triangles() {
        let mesh = Mesh::from_flat_indices(square(), &[0, 1, 2, 0, 2, 3]).unwrap();
        assert_eq!(mesh.indices().unwrap(), &[[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.triangles().count(), 2);
    }

    #[test]
    fn empty_index_list_is_point_cloud() {
        let mesh = Mesh::new(square(), Vec::new()).unwrap();
        assert!(!mesh.has_topology());
        assert_eq!(mesh.triangles().count(), 0);
    }

    #[test]
    fn vertical_extent_and_landmarks() {
        let mesh = Mesh::point_cloud(square());
        assert_eq!(mesh.vertical_extent(), Some((0.0, 1.0)));
        let mid = mesh.landmark_midpoint(LandmarkPair::new(0, 2)).unwrap();
        assert!((mid - 0.5).abs() < 1e-12);
        assert!(mesh.landmark_midpoint(LandmarkPair::LIPS).is_none());
    }
}
