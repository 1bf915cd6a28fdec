use spade::{
    DelaunayTriangulation, HasPosition, InsertionError, Point2 as SpadePoint2, Triangulation,
};
use tracing::debug;

use crate::error::MeshError;

use super::Mesh;

/// A projected capture vertex that remembers its source index.
#[derive(Debug, Clone, Copy)]
struct IndexedVertex {
    position: SpadePoint2<f64>,
    index: u32,
}

impl HasPosition for IndexedVertex {
    type Scalar = f64;

    fn position(&self) -> SpadePoint2<f64> {
        self.position
    }
}

/// Builds triangle topology for a point cloud.
///
/// Vertices are projected onto the capture plane (x, y) and Delaunay
/// triangulated there, which suits front-facing captures. Coincident
/// projections collapse into one triangulation vertex, so some source
/// vertices may be left unreferenced. A mesh that already has topology is
/// returned unchanged.
#[derive(Debug)]
pub struct TriangulatePointCloud<'a> {
    mesh: &'a Mesh,
}

impl<'a> TriangulatePointCloud<'a> {
    /// Creates a new triangulation operation.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    /// Executes the triangulation.
    ///
    /// # Errors
    ///
    /// Returns `MeshError::Triangulation` if a vertex cannot be inserted
    /// (e.g. a non-finite coordinate) or the vertex count exceeds `u32`.
    pub fn execute(&self) -> Result<Mesh, MeshError> {
        if self.mesh.has_topology() || self.mesh.vertices().len() < 3 {
            return Ok(self.mesh.clone());
        }

        let mut dt = DelaunayTriangulation::<IndexedVertex>::new();
        for (i, p) in self.mesh.vertices().iter().enumerate() {
            let index = u32::try_from(i)
                .map_err(|_| MeshError::Triangulation("too many vertices".into()))?;
            dt.insert(IndexedVertex {
                position: SpadePoint2::new(p.x, p.y),
                index,
            })
            .map_err(|e: InsertionError| MeshError::Triangulation(format!("insert: {e}")))?;
        }

        let indices: Vec<[u32; 3]> = dt
            .inner_faces()
            .map(|face| face.vertices().map(|v| v.data().index))
            .collect();

        debug!(
            vertices = self.mesh.vertices().len(),
            triangles = indices.len(),
            "triangulated point cloud"
        );

        Mesh::new(self.mesh.vertices().to_vec(), indices)
    }
}
