use std::collections::HashMap;

use slotmap::SlotMap;

use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a node in a [`PolylineGraph`].
    pub struct NodeId;
}

slotmap::new_key_type! {
    /// Unique identifier for an edge in a [`PolylineGraph`].
    pub struct EdgeId;
}

/// Decimal places kept when merging coincident endpoints.
const KEY_SCALE: f64 = 1e4;

/// A quantized position.
type NodeKey = (i64, i64);

#[allow(clippy::cast_possible_truncation)]
fn quantize(p: &Point2) -> NodeKey {
    ((p.x * KEY_SCALE).round() as i64, (p.y * KEY_SCALE).round() as i64)
}

/// A graph node: the first position seen for its key plus incident edges.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub point: Point2,
    pub edges: Vec<EdgeId>,
}

/// An undirected edge between two nodes.
#[derive(Debug, Clone, Copy)]
pub struct GraphEdge {
    pub a: NodeId,
    pub b: NodeId,
}

impl GraphEdge {
    /// Returns the endpoint opposite `node`.
    #[must_use]
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.a == node {
            self.b
        } else {
            self.a
        }
    }
}

/// Planar graph built from unordered slice segments.
///
/// Endpoints that agree to four decimal places share a node, so segments
/// produced by adjacent triangles connect. Nodes and edges live in arenas
/// and iterate in insertion order.
#[derive(Debug, Default)]
pub struct PolylineGraph {
    nodes: SlotMap<NodeId, GraphNode>,
    edges: SlotMap<EdgeId, GraphEdge>,
    order: Vec<NodeId>,
    lookup: HashMap<NodeKey, NodeId>,
}

impl PolylineGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph with one edge per segment.
    #[must_use]
    pub fn from_segments(segments: impl IntoIterator<Item = (Point2, Point2)>) -> Self {
        let mut graph = Self::new();
        for (a, b) in segments {
            graph.add_segment(a, b);
        }
        graph
    }

    /// Inserts a segment, returning its edge.
    ///
    /// Segments whose endpoints quantize to the same node are dropped.
    pub fn add_segment(&mut self, a: Point2, b: Point2) -> Option<EdgeId> {
        let na = self.node_for(a);
        let nb = self.node_for(b);
        if na == nb {
            return None;
        }
        let edge = self.edges.insert(GraphEdge { a: na, b: nb });
        self.nodes[na].edges.push(edge);
        self.nodes[nb].edges.push(edge);
        Some(edge)
    }

    fn node_for(&mut self, p: Point2) -> NodeId {
        let key = quantize(&p);
        if let Some(&id) = self.lookup.get(&key) {
            return id;
        }
        let id = self.nodes.insert(GraphNode {
            point: p,
            edges: Vec::new(),
        });
        self.order.push(id);
        self.lookup.insert(key, id);
        id
    }

    /// Returns the node data.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id]
    }

    /// Returns the edge data.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &GraphEdge {
        &self.edges[id]
    }

    /// Node IDs in insertion order.
    #[must_use]
    pub fn node_ids(&self) -> &[NodeId] {
        &self.order
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges incident to `id`.
    #[must_use]
    pub fn degree(&self, id: NodeId) -> usize {
        self.nodes[id].edges.len()
    }

    /// Start of an open path if one exists (first degree-1 node), otherwise
    /// the first node.
    #[must_use]
    pub fn start_node(&self) -> Option<NodeId> {
        self.order
            .iter()
            .copied()
            .find(|&id| self.degree(id) == 1)
            .or_else(|| self.order.first().copied())
    }
}
