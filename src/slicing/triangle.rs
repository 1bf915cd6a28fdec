use crate::math::{Point3, PLANE_EPSILON};

use super::Segment;

/// Intersects a triangle with the horizontal plane `y = target_y`.
///
/// Each edge is tested by the sign of `vertex.y - target_y`. A vertex within
/// [`PLANE_EPSILON`] of the plane counts as an intersection itself; an edge
/// lying in the plane contributes nothing. Coincident intersections are
/// merged and at most two are kept.
///
/// Returns a segment only for exactly two distinct intersections, so
/// coplanar triangles and triangles touching the plane at one vertex yield
/// `None`.
#[must_use]
pub fn intersect_triangle(triangle: &[Point3; 3], target_y: f64) -> Option<Segment> {
    let [a, b, c] = triangle;
    let mut hits: Vec<Point3> = Vec::with_capacity(2);

    for (p1, p2) in [(a, b), (b, c), (c, a)] {
        let Some(hit) = intersect_edge(p1, p2, target_y) else {
            continue;
        };
        if hits
            .iter()
            .all(|h| (*h - hit).norm_squared() >= PLANE_EPSILON * PLANE_EPSILON)
        {
            hits.push(hit);
        }
        if hits.len() == 2 {
            break;
        }
    }

    match hits.as_slice() {
        [start, end] => Some(Segment {
            start: *start,
            end: *end,
        }),
        _ => None,
    }
}

fn intersect_edge(p1: &Point3, p2: &Point3, target_y: f64) -> Option<Point3> {
    let d1 = p1.y - target_y;
    let d2 = p2.y - target_y;
    let on1 = d1.abs() < PLANE_EPSILON;
    let on2 = d2.abs() < PLANE_EPSILON;

    match (on1, on2) {
        (true, true) => None,
        (true, false) => Some(*p1),
        (false, true) => Some(*p2),
        (false, false) if (d1 < 0.0) != (d2 < 0.0) => {
            let t = d1 / (d1 - d2);
            Some(Point3::new(
                (p2.x - p1.x).mul_add(t, p1.x),
                target_y,
                (p2.z - p1.z).mul_add(t, p1.z),
            ))
        }
        (false, false) => None,
    }
}
