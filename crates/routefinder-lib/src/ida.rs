//! Iterative-deepening A*.
//!
//! Unlike the other strategies this is a tree search: a node is skipped only
//! when it already lies on the current path, so the same node may be reached
//! again along a sibling branch. Each iteration is a depth-first probe bounded
//! by `f = g + h`; the next bound is the smallest `f` that exceeded the
//! current one.

use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::node::SearchNode;
use crate::search::{SearchContext, SearchRun};

/// Default cap on bound escalations per run.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Run IDA* from the context's origin.
///
/// Stops after the first iteration that reaches any destination, when no node
/// exceeded the bound (the search space is exhausted), or once the bound has
/// been raised `max_escalations` times without success. The cap only matters
/// for pathological inputs: on a finite graph the bound walks through a finite
/// set of simple-path `f` values and the loop ends on its own.
///
/// When no destination is reachable at all the origin's estimate is infinite;
/// no bound could ever prune, so the run ends before expanding anything.
pub fn iterative_deepening_a_star(
    context: &SearchContext<'_>,
    max_escalations: usize,
) -> Result<SearchRun> {
    let mut state = ProbeState {
        context,
        bound: context.estimate(context.origin)?,
        nodes_created: 1,
        solutions: Vec::new(),
    };

    if state.bound.is_infinite() {
        debug!(origin = context.origin, "IDA* has no reachable destination");
        return Ok(state.finish());
    }

    for escalation in 0..=max_escalations {
        trace!(escalation, bound = state.bound, "starting IDA* iteration");
        let next_bound = state.probe(SearchNode::origin(context.origin))?;

        if !state.solutions.is_empty() {
            debug!(
                escalation,
                solutions = state.solutions.len(),
                "IDA* reached a destination"
            );
            return Ok(state.finish());
        }
        if next_bound.is_infinite() {
            debug!(escalation, "IDA* exhausted the search space");
            return Ok(state.finish());
        }
        state.bound = next_bound;
    }

    warn!(
        max_escalations,
        bound = state.bound,
        "IDA* stopped at the escalation cap without reaching a destination"
    );
    Ok(state.finish())
}

/// Mutable state of one IDA* run, threaded through the recursion by `&mut`.
struct ProbeState<'c, 'g> {
    context: &'c SearchContext<'g>,
    bound: f64,
    nodes_created: usize,
    solutions: Vec<SearchNode>,
}

impl ProbeState<'_, '_> {
    /// Depth-first probe below `current`; returns the smallest `f` that
    /// exceeded the bound, or infinity when none did.
    fn probe(&mut self, current: SearchNode) -> Result<f64> {
        let f = current.cost + self.context.estimate(current.node)?;
        if f > self.bound {
            return Ok(f);
        }

        if self.context.is_destination(current.node) {
            self.solutions.push(current);
            return Ok(f64::INFINITY);
        }

        let mut min_exceeding = f64::INFINITY;
        for edge in self.context.graph.sorted_neighbours(current.node) {
            if current.on_path(edge.target) {
                continue;
            }
            self.nodes_created += 1;
            let next = self.probe(current.extend(&edge))?;
            min_exceeding = min_exceeding.min(next);
        }
        Ok(min_exceeding)
    }

    fn finish(self) -> SearchRun {
        SearchRun {
            solutions: self.solutions,
            nodes_created: self.nodes_created,
        }
    }
}
