//! Expansion loop shared by the five graph-search strategies.

use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::trace;

use crate::error::Result;
use crate::frontier::{ExpansionOrder, Frontier};
use crate::graph::{Coordinates, Edge, Graph, NodeId};
use crate::heuristic::{heuristic, HeuristicKind};
use crate::node::SearchNode;

/// Read-only inputs of a single search run.
#[derive(Debug, Clone)]
pub struct SearchContext<'a> {
    pub graph: &'a Graph,
    pub coordinates: &'a Coordinates,
    pub origin: NodeId,
    destinations: HashSet<NodeId>,
    /// Destinations the heuristic measures against.
    targets: Vec<NodeId>,
}

impl<'a> SearchContext<'a> {
    /// Bundle the inputs of a run.
    ///
    /// Destinations that the graph never mentions cannot be reached, so they
    /// are left out of heuristic estimates and need no coordinate.
    pub fn new(
        graph: &'a Graph,
        coordinates: &'a Coordinates,
        origin: NodeId,
        destinations: &[NodeId],
    ) -> Self {
        let targets = destinations
            .iter()
            .copied()
            .filter(|&id| id == origin || graph.contains(id))
            .collect();
        Self {
            graph,
            coordinates,
            origin,
            destinations: destinations.iter().copied().collect(),
            targets,
        }
    }

    /// Goal test.
    pub fn is_destination(&self, node: NodeId) -> bool {
        self.destinations.contains(&node)
    }

    /// Euclidean estimate from `node` to the closest reachable destination.
    pub fn estimate(&self, node: NodeId) -> Result<f64> {
        heuristic(self.coordinates, node, &self.targets, HeuristicKind::Euclidean)
    }
}

/// Raw result of a strategy run, before solution selection.
#[derive(Debug, Clone, Default)]
pub struct SearchRun {
    /// Goal-reaching nodes in discovery order.
    pub solutions: Vec<SearchNode>,
    /// Every search node instantiated, origin included.
    pub nodes_created: usize,
}

/// Priority a graph-search strategy inserts nodes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// Container order only (stack or queue).
    Insertion,
    /// Accumulated cost `g`.
    Cost,
    /// Heuristic estimate `h`.
    Heuristic,
    /// `f = g + h`.
    CostPlusHeuristic,
}

impl Ranking {
    fn priority(self, context: &SearchContext<'_>, node: &SearchNode) -> Result<f64> {
        Ok(match self {
            Ranking::Insertion => 0.0,
            Ranking::Cost => node.cost,
            Ranking::Heuristic => context.estimate(node.node)?,
            Ranking::CostPlusHeuristic => node.cost + context.estimate(node.node)?,
        })
    }
}

/// Run graph search with a global visited set.
///
/// Goal nodes are collected rather than returned immediately so that a
/// second-best solution can be reported; `stop_after` ends the run once that
/// many solutions have been collected.
pub fn graph_search<F: Frontier>(
    context: &SearchContext<'_>,
    mut frontier: F,
    ranking: Ranking,
    stop_after: Option<usize>,
) -> Result<SearchRun> {
    let mut run = SearchRun::default();
    let mut visited: HashSet<NodeId> = HashSet::new();

    let start = SearchNode::origin(context.origin);
    run.nodes_created += 1;
    let priority = ranking.priority(context, &start)?;
    frontier.insert(start, priority);

    while let Some(current) = frontier.remove_next() {
        if context.is_destination(current.node) {
            trace!(node = current.node, cost = current.cost, "goal reached");
            run.solutions.push(current);
            if stop_after.is_some_and(|limit| run.solutions.len() >= limit) {
                break;
            }
            continue;
        }

        if !visited.insert(current.node) {
            continue;
        }

        for edge in ordered_neighbours(context.graph, current.node, frontier.expansion_order()) {
            if visited.contains(&edge.target) {
                continue;
            }
            let child = current.extend(&edge);
            run.nodes_created += 1;
            let priority = ranking.priority(context, &child)?;
            frontier.insert(child, priority);
        }
    }

    Ok(run)
}

fn ordered_neighbours(graph: &Graph, node: NodeId, order: ExpansionOrder) -> Vec<Edge> {
    match order {
        ExpansionOrder::Ascending => graph.sorted_neighbours(node),
        ExpansionOrder::Descending => {
            let mut edges = graph.neighbours(node).to_vec();
            edges.sort_by_key(|edge| Reverse(edge.target));
            edges
        }
    }
}
