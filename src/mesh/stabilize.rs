use tracing::debug;

use crate::math::interpolate::min_max;
use crate::math::{Point2, Point3, Rotation2, Vector3, TOLERANCE};

use super::{LandmarkPair, Mesh};

/// Normalizes a raw tracker capture into a canonical pose.
///
/// The capture is centered on its centroid, scaled so the larger of its
/// width and height spans 2 units, and rotated about the depth axis so the
/// roll landmarks lie on a horizontal line. Depth is centered and scaled
/// but never rotated. Topology is carried over unchanged.
#[derive(Debug)]
pub struct StabilizeMesh<'a> {
    mesh: &'a Mesh,
    roll_landmarks: Option<LandmarkPair>,
}

impl<'a> StabilizeMesh<'a> {
    /// Creates a new stabilization using the eye landmarks for roll.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self {
            mesh,
            roll_landmarks: Some(LandmarkPair::EYES),
        }
    }

    /// Sets the landmark pair used to level the capture, or disables roll
    /// correction with `None`.
    #[must_use]
    pub fn with_roll_landmarks(mut self, landmarks: Option<LandmarkPair>) -> Self {
        self.roll_landmarks = landmarks;
        self
    }

    /// Executes the stabilization, returning a new mesh.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Mesh {
        let points = self.mesh.vertices();
        if points.is_empty() {
            return self.mesh.clone();
        }

        let centroid = points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords)
            / points.len() as f64;

        let width = extent(points.iter().map(|p| p.x - centroid.x));
        let height = extent(points.iter().map(|p| p.y - centroid.y));
        let scale = 2.0 / width.max(height);

        let planar =
            |p: &Point3| Point2::new((p.x - centroid.x) * scale, (p.y - centroid.y) * scale);

        let roll = self
            .roll_landmarks
            .and_then(|pair| {
                let a = points.get(pair.first)?;
                let b = points.get(pair.second)?;
                let d = planar(b) - planar(a);
                Some(d.y.atan2(d.x))
            })
            .unwrap_or(0.0);
        let level = Rotation2::new(-roll);

        debug!(vertices = points.len(), scale, roll, "stabilizing capture");

        let vertices = points
            .iter()
            .map(|p| {
                let q = level * planar(p);
                Point3::new(q.x, q.y, (p.z - centroid.z) * scale)
            })
            .collect();

        Mesh {
            vertices,
            indices: self.mesh.indices.clone(),
        }
    }
}

/// Width of the value range, or 1 when it is degenerate.
fn extent(values: impl Iterator<Item = f64>) -> f64 {
    match min_max(values) {
        Some((lo, hi)) if hi - lo > TOLERANCE => hi - lo,
        _ => 1.0,
    }
}
