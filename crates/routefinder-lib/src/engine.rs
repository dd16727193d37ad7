//! Engine driver: runs one strategy against a problem and reports the outcome.
//!
//! This module provides:
//! - [`SearchOptions`] - Tunables shared by every run
//! - [`SearchOutcome`] - Best and second-best solutions plus the node counter
//! - [`run`] / [`run_with_options`] - Entry points taking the raw problem parts
//! - [`solve`] / [`solve_with_options`] - Convenience wrappers over a loaded [`Problem`]
//!
//! # Example
//!
//! ```
//! use routefinder_lib::{run, Coordinates, Graph, Strategy};
//!
//! let graph = Graph::from_edges([(1, 2, 1.0), (2, 3, 1.0)]);
//! let outcome = run(&graph, &Coordinates::new(), 1, &[3], Strategy::BreadthFirst)?;
//! assert_eq!(outcome.best_goal, Some(3));
//! assert_eq!(outcome.best_path, vec![1, 2, 3]);
//! # Ok::<(), routefinder_lib::Error>(())
//! ```

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use crate::error::Result;
use crate::graph::{Coordinates, Graph, NodeId};
use crate::ida::DEFAULT_MAX_ITERATIONS;
use crate::loader::Problem;
use crate::node::SearchNode;
use crate::search::SearchContext;
use crate::selection::select_two_best;
use crate::strategy::{select_strategy, Strategy};

/// Environment variable enabling the uniform-cost early stop.
pub const ENV_UCS_EARLY_STOP: &str = "ROUTEFINDER_UCS_EARLY_STOP";
/// Environment variable overriding the IDA* iteration cap.
pub const ENV_IDA_MAX_ITERATIONS: &str = "ROUTEFINDER_IDA_MAX_ITERATIONS";

/// Tunables applied to a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Let uniform-cost search stop once two solutions have been collected.
    pub ucs_early_stop: bool,
    /// Maximum number of IDA* bound escalations.
    pub ida_max_iterations: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            ucs_early_stop: false,
            ida_max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SearchOptions {
    /// Create options from environment variables.
    ///
    /// - `ROUTEFINDER_UCS_EARLY_STOP`: `true`/`1` to enable (default: disabled)
    /// - `ROUTEFINDER_IDA_MAX_ITERATIONS`: positive integer (default: 100000)
    ///
    /// Unparsable values are logged and replaced by the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ucs_early_stop: env_value(ENV_UCS_EARLY_STOP, parse_flag)
                .unwrap_or(defaults.ucs_early_stop),
            ida_max_iterations: env_value(ENV_IDA_MAX_ITERATIONS, |v| {
                usize::from_str(v).ok().filter(|&n| n > 0)
            })
            .unwrap_or(defaults.ida_max_iterations),
        }
    }
}

fn env_value<T>(name: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let raw = env::var(name).ok()?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!(variable = name, value = %raw, "ignoring invalid environment value");
    }
    parsed
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Result of a single engine run.
///
/// A run that reached no destination is a normal outcome: goals and costs are
/// `None`, paths are empty, and `nodes_created` still reports the work done.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub strategy: Strategy,
    pub best_goal: Option<NodeId>,
    /// Every search node instantiated during the run, origin included.
    pub nodes_created: usize,
    pub best_path: Vec<NodeId>,
    pub best_cost: Option<f64>,
    pub second_goal: Option<NodeId>,
    pub second_path: Vec<NodeId>,
    pub second_cost: Option<f64>,
}

impl SearchOutcome {
    fn from_solutions(
        strategy: Strategy,
        nodes_created: usize,
        best: Option<SearchNode>,
        second: Option<SearchNode>,
    ) -> Self {
        let (best_goal, best_path, best_cost) = unpack(best);
        let (second_goal, second_path, second_cost) = unpack(second);
        Self {
            strategy,
            best_goal,
            nodes_created,
            best_path,
            best_cost,
            second_goal,
            second_path,
            second_cost,
        }
    }

    /// Whether any destination was reached.
    pub fn is_solved(&self) -> bool {
        self.best_goal.is_some()
    }

    /// Number of hops in the best path.
    pub fn hop_count(&self) -> usize {
        self.best_path.len().saturating_sub(1)
    }

    /// `(best_goal, nodes_created, best_path, second_goal, second_path)`.
    pub fn into_tuple(
        self,
    ) -> (
        Option<NodeId>,
        usize,
        Vec<NodeId>,
        Option<NodeId>,
        Vec<NodeId>,
    ) {
        (
            self.best_goal,
            self.nodes_created,
            self.best_path,
            self.second_goal,
            self.second_path,
        )
    }
}

fn unpack(solution: Option<SearchNode>) -> (Option<NodeId>, Vec<NodeId>, Option<f64>) {
    match solution {
        Some(node) => (Some(node.node), node.path, Some(node.cost)),
        None => (None, Vec::new(), None),
    }
}

/// Run `strategy` with default options.
pub fn run(
    graph: &Graph,
    coordinates: &Coordinates,
    origin: NodeId,
    destinations: &[NodeId],
    strategy: Strategy,
) -> Result<SearchOutcome> {
    run_with_options(
        graph,
        coordinates,
        origin,
        destinations,
        strategy,
        &SearchOptions::default(),
    )
}

/// Run `strategy` from `origin` towards any of `destinations`.
///
/// The graph and coordinates are only read, so they can be shared by
/// independent runs.
pub fn run_with_options(
    graph: &Graph,
    coordinates: &Coordinates,
    origin: NodeId,
    destinations: &[NodeId],
    strategy: Strategy,
    options: &SearchOptions,
) -> Result<SearchOutcome> {
    let span = debug_span!("search", %strategy, origin);
    let _guard = span.enter();

    let context = SearchContext::new(graph, coordinates, origin, destinations);
    let search = select_strategy(strategy, options);
    let run = search.search(&context)?;

    debug!(
        nodes_created = run.nodes_created,
        solutions = run.solutions.len(),
        "search finished"
    );

    let (best, second) = select_two_best(run.solutions);
    Ok(SearchOutcome::from_solutions(
        strategy,
        run.nodes_created,
        best,
        second,
    ))
}

/// Solve a loaded problem with default options.
pub fn solve(problem: &Problem, strategy: Strategy) -> Result<SearchOutcome> {
    solve_with_options(problem, strategy, &SearchOptions::default())
}

/// Solve a loaded problem.
pub fn solve_with_options(
    problem: &Problem,
    strategy: Strategy,
    options: &SearchOptions,
) -> Result<SearchOutcome> {
    run_with_options(
        &problem.graph,
        &problem.coordinates,
        problem.origin,
        &problem.destinations,
        strategy,
        options,
    )
}
