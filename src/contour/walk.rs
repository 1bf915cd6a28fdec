use slotmap::SecondaryMap;

use crate::math::Point2;

use super::graph::{EdgeId, NodeId, PolylineGraph};

/// Result of a greedy walk: the visited positions and the edges used.
#[derive(Debug, Clone, Default)]
pub struct GreedyWalk {
    pub points: Vec<Point2>,
    pub traversed: Vec<EdgeId>,
}

/// Walks a single path through the graph.
///
/// Starts at [`PolylineGraph::start_node`]. At each node the first unused
/// incident edge (insertion order) whose far end is not the node just left
/// is taken. Stops when no such edge exists or `cap` points are collected.
///
/// This is a local heuristic, not a path cover: on branching graphs (several
/// components, nodes of degree 3 or more) edges may be left unvisited and the
/// path may jump across a junction.
#[must_use]
pub fn greedy_walk(graph: &PolylineGraph, cap: usize) -> GreedyWalk {
    let mut walk = GreedyWalk::default();
    let Some(start) = graph.start_node() else {
        return walk;
    };
    if cap == 0 {
        return walk;
    }

    let mut used: SecondaryMap<EdgeId, ()> = SecondaryMap::new();
    let mut previous: Option<NodeId> = None;
    let mut current = start;
    walk.points.push(graph.node(current).point);

    while walk.points.len() < cap {
        let next = graph.node(current).edges.iter().copied().find_map(|edge| {
            if used.contains_key(edge) {
                return None;
            }
            let target = graph.edge(edge).other(current);
            (Some(target) != previous).then_some((edge, target))
        });
        let Some((edge, target)) = next else {
            break;
        };
        used.insert(edge, ());
        walk.traversed.push(edge);
        walk.points.push(graph.node(target).point);
        previous = Some(current);
        current = target;
    }

    walk
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[allow(clippy::cast_precision_loss)]
    fn chain(n: usize) -> PolylineGraph {
        PolylineGraph::from_segments(
            (0..n).map(|i| (Point2::new(i as f64, 0.0), Point2::new(i as f64 + 1.0, 0.0))),
        )
    }

    #[test]
    fn open_chain_is_walked_end_to_end() {
        let walk = greedy_walk(&chain(4), 2048);
        assert_eq!(walk.points.len(), 5);
        assert_eq!(walk.points[0], Point2::new(0.0, 0.0));
        assert_eq!(walk.points[4], Point2::new(4.0, 0.0));
    }

    #[test]
    fn shuffled_segments_still_chain() {
        let graph = PolylineGraph::from_segments([
            (Point2::new(2.0, 0.0), Point2::new(3.0, 0.0)),
            (Point2::new(1.0, 0.0), Point2::new(0.0, 0.0)),
            (Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)),
        ]);
        let walk = greedy_walk(&graph, 2048);
        let xs: Vec<f64> = walk.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn closed_loop_returns_to_start() {
        let graph = PolylineGraph::from_segments([
            (Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
            (Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)),
            (Point2::new(0.0, 1.0), Point2::new(0.0, 0.0)),
        ]);
        let walk = greedy_walk(&graph, 2048);
        assert_eq!(walk.points.len(), 4);
        assert_eq!(walk.points.first(), walk.points.last());
    }

    #[test]
    fn branching_graph_never_reuses_edges() {
        // A star: centre with three spokes plus a closing triangle.
        let c = Point2::new(0.0, 0.0);
        let graph = PolylineGraph::from_segments([
            (c, Point2::new(1.0, 0.0)),
            (c, Point2::new(0.0, 1.0)),
            (c, Point2::new(-1.0, 0.0)),
            (Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)),
        ]);
        let walk = greedy_walk(&graph, 2048);
        let unique: HashSet<_> = walk.traversed.iter().collect();
        assert_eq!(unique.len(), walk.traversed.len());
        assert_eq!(walk.points.len(), walk.traversed.len() + 1);
        assert!(walk.traversed.len() <= graph.edge_count());
    }

    #[test]
    fn walk_respects_cap() {
        let walk = greedy_walk(&chain(100), 10);
        assert_eq!(walk.points.len(), 10);
        assert!(greedy_walk(&chain(3), 0).points.is_empty());
    }

    #[test]
    fn empty_graph_yields_empty_walk() {
        let walk = greedy_walk(&PolylineGraph::new(), 2048);
        assert!(walk.points.is_empty());
    }
}
