use std::fmt;

use serde::Serialize;

use crate::graph::{Edge, NodeId};

/// One partial-path state created during a search run.
///
/// Nodes are never mutated after creation: expanding a node produces a new
/// [`SearchNode`] that owns its own copy of the extended path. The type has no
/// intrinsic ordering; frontiers and the solution selector use explicit keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchNode {
    /// Graph node this state sits on.
    pub node: NodeId,
    /// Nodes visited from the origin, origin included.
    pub path: Vec<NodeId>,
    /// Sum of traversed edge costs.
    pub cost: f64,
    /// Number of traversed edges.
    pub hops: usize,
}

impl SearchNode {
    /// Initial state at `origin`.
    pub fn origin(origin: NodeId) -> Self {
        Self {
            node: origin,
            path: vec![origin],
            cost: 0.0,
            hops: 0,
        }
    }

    /// Follow `edge` from this state.
    pub fn extend(&self, edge: &Edge) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(edge.target);
        Self {
            node: edge.target,
            path,
            cost: self.cost + edge.cost,
            hops: self.hops + 1,
        }
    }

    /// Whether `node` already appears on this state's path.
    pub fn on_path(&self, node: NodeId) -> bool {
        self.path.contains(&node)
    }
}

impl fmt::Display for SearchNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchNode(node={}, path={:?}, cost={:.2}, hops={})",
            self.node, self.path, self.cost, self.hops
        )
    }
}
