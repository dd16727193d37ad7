//! Frontier containers shared by the graph-search strategies.
//!
//! Every strategy runs the same expansion loop (see [`crate::search`]); the
//! only things that differ are the container that holds unexpanded nodes and
//! the priority each node is inserted with.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::graph::NodeId;
use crate::node::SearchNode;

/// Order in which a node's neighbours are handed to [`Frontier::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionOrder {
    Ascending,
    Descending,
}

/// Working set of not-yet-expanded search nodes.
pub trait Frontier {
    /// Add a node. `priority` is ignored by insertion-ordered containers.
    fn insert(&mut self, node: SearchNode, priority: f64);

    /// Remove the next node according to the container's policy.
    fn remove_next(&mut self) -> Option<SearchNode>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighbour order that makes removals come out in ascending id order.
    fn expansion_order(&self) -> ExpansionOrder {
        ExpansionOrder::Ascending
    }
}

/// Last-in-first-out container used by depth-first search.
#[derive(Debug, Default)]
pub struct StackFrontier {
    stack: Vec<SearchNode>,
}

impl Frontier for StackFrontier {
    fn insert(&mut self, node: SearchNode, _priority: f64) {
        self.stack.push(node);
    }

    fn remove_next(&mut self) -> Option<SearchNode> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    // Pushing the largest id first leaves the smallest on top.
    fn expansion_order(&self) -> ExpansionOrder {
        ExpansionOrder::Descending
    }
}

/// First-in-first-out container used by breadth-first search.
#[derive(Debug, Default)]
pub struct QueueFrontier {
    queue: VecDeque<SearchNode>,
}

impl Frontier for QueueFrontier {
    fn insert(&mut self, node: SearchNode, _priority: f64) {
        self.queue.push_back(node);
    }

    fn remove_next(&mut self) -> Option<SearchNode> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Min-priority container keyed by `(priority, node id, insertion sequence)`.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<PriorityEntry>,
    sequence: u64,
}

impl Frontier for PriorityFrontier {
    fn insert(&mut self, node: SearchNode, priority: f64) {
        let entry = PriorityEntry {
            key: PriorityKey {
                priority: FloatOrd(priority),
                node: node.node,
                sequence: self.sequence,
            },
            node,
        };
        self.sequence += 1;
        self.heap.push(entry);
    }

    fn remove_next(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PriorityKey {
    priority: FloatOrd,
    node: NodeId,
    sequence: u64,
}

#[derive(Debug)]
struct PriorityEntry {
    key: PriorityKey,
    node: SearchNode,
}

impl PartialEq for PriorityEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PriorityEntry {}

impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by key.
        other.key.cmp(&self.key)
    }
}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(frontier: &mut impl Frontier) -> Vec<NodeId> {
        std::iter::from_fn(|| frontier.remove_next())
            .map(|n| n.node)
            .collect()
    }

    #[test]
    fn stack_is_lifo() {
        let mut frontier = StackFrontier::default();
        for id in [1, 2, 3] {
            frontier.insert(SearchNode::origin(id), 0.0);
        }
        assert_eq!(frontier.expansion_order(), ExpansionOrder::Descending);
        assert_eq!(drain(&mut frontier), vec![3, 2, 1]);
    }

    #[test]
    fn queue_is_fifo() {
        let mut frontier = QueueFrontier::default();
        for id in [1, 2, 3] {
            frontier.insert(SearchNode::origin(id), 0.0);
        }
        assert_eq!(frontier.len(), 3);
        assert_eq!(drain(&mut frontier), vec![1, 2, 3]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn priority_orders_by_priority_then_node_then_sequence() {
        let mut frontier = PriorityFrontier::default();
        frontier.insert(SearchNode::origin(5), 2.0);
        frontier.insert(SearchNode::origin(9), 1.0);
        frontier.insert(SearchNode::origin(3), 2.0);
        let mut late = SearchNode::origin(3);
        late.cost = 42.0;
        frontier.insert(late, 2.0);

        let first = frontier.remove_next().unwrap();
        assert_eq!(first.node, 9);
        let second = frontier.remove_next().unwrap();
        assert_eq!((second.node, second.cost), (3, 0.0));
        let third = frontier.remove_next().unwrap();
        assert_eq!((third.node, third.cost), (3, 42.0));
        assert_eq!(frontier.remove_next().unwrap().node, 5);
        assert!(frontier.remove_next().is_none());
    }

    #[test]
    fn infinite_priorities_sort_last() {
        let mut frontier = PriorityFrontier::default();
        frontier.insert(SearchNode::origin(1), f64::INFINITY);
        frontier.insert(SearchNode::origin(2), 1e12);
        assert_eq!(drain(&mut frontier), vec![2, 1]);
    }
}
