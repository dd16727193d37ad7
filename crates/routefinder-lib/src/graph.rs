use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identifier for a node in the problem graph. Identifiers need not be contiguous.
pub type NodeId = i64;

/// Directed, weighted edge within the graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub target: NodeId,
    pub cost: f64,
}

/// Planar position of a node, used only by heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Coordinate table keyed by node identifier.
pub type Coordinates = HashMap<NodeId, Position>;

/// Immutable adjacency structure searched by every strategy.
///
/// The adjacency map sits behind an [`Arc`], so clones are cheap and a single
/// graph can be shared by independent runs, including runs on other threads.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<HashMap<NodeId, Vec<Edge>>>,
}

impl Graph {
    /// Wrap a prebuilt adjacency map.
    pub fn from_adjacency(adjacency: HashMap<NodeId, Vec<Edge>>) -> Self {
        Self {
            adjacency: Arc::new(adjacency),
        }
    }

    /// Build a graph from `(from, to, cost)` triples in declaration order.
    ///
    /// Targets without outgoing edges still receive an (empty) adjacency entry.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId, f64)>,
    {
        let mut adjacency: HashMap<NodeId, Vec<Edge>> = HashMap::new();
        for (from, to, cost) in edges {
            adjacency
                .entry(from)
                .or_default()
                .push(Edge { target: to, cost });
            adjacency.entry(to).or_default();
        }
        Self::from_adjacency(adjacency)
    }

    /// Return the outgoing edges of `node` in declaration order.
    pub fn neighbours(&self, node: NodeId) -> &[Edge] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Return the outgoing edges of `node` sorted ascending by target id.
    ///
    /// The sort is stable, so parallel edges keep their declaration order.
    pub fn sorted_neighbours(&self, node: NodeId) -> Vec<Edge> {
        let mut edges = self.neighbours(node).to_vec();
        edges.sort_by_key(|edge| edge.target);
        edges
    }

    /// Whether the node has an adjacency entry.
    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Number of nodes with an adjacency entry.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Cost of the cheapest edge from `from` to `to`, if any.
    pub fn edge_cost(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.neighbours(from)
            .iter()
            .filter(|edge| edge.target == to)
            .map(|edge| edge.cost)
            .min_by(f64::total_cmp)
    }

    /// Sum of edge costs along `path`, or `None` when a hop has no edge.
    pub fn path_cost(&self, path: &[NodeId]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_cost(pair[0], pair[1]))
            .sum()
    }
}
