//! Search strategies implementing the Strategy pattern.
//!
//! [`Strategy`] names the six supported algorithms and resolves the method
//! aliases accepted on the command line. Each algorithm is wrapped in a struct
//! implementing [`SearchStrategy`], and [`select_strategy`] picks one for a run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::SearchOptions;
use crate::error::{Error, Result};
use crate::frontier::{PriorityFrontier, QueueFrontier, StackFrontier};
use crate::ida::iterative_deepening_a_star;
use crate::search::{graph_search, Ranking, SearchContext, SearchRun};

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Depth-first graph search.
    DepthFirst,
    /// Breadth-first graph search.
    BreadthFirst,
    /// Uniform-cost graph search ordered by `g`.
    UniformCost,
    /// Greedy best-first graph search ordered by `h`.
    GreedyBestFirst,
    /// A* graph search ordered by `g + h`.
    #[serde(rename = "a_star")]
    AStar,
    /// Iterative-deepening A* tree search.
    #[serde(rename = "ida_star")]
    IterativeDeepeningAStar,
}

/// Method names accepted by [`Strategy::from_str`], upper-cased.
const ALIASES: &[(&str, Strategy)] = &[
    ("DFS", Strategy::DepthFirst),
    ("BFS", Strategy::BreadthFirst),
    ("UCS", Strategy::UniformCost),
    ("CUS1", Strategy::UniformCost),
    ("GBFS", Strategy::GreedyBestFirst),
    ("AS", Strategy::AStar),
    ("ASTAR", Strategy::AStar),
    ("A*", Strategy::AStar),
    ("IDA", Strategy::IterativeDeepeningAStar),
    ("IDASTAR", Strategy::IterativeDeepeningAStar),
    ("IDA*", Strategy::IterativeDeepeningAStar),
    ("CUS2", Strategy::IterativeDeepeningAStar),
];

/// Largest edit distance for which a method-name suggestion is offered.
const SUGGESTION_MAX_DISTANCE: usize = 2;

impl Strategy {
    /// Every strategy, in the order reports list them.
    pub const ALL: [Strategy; 6] = [
        Strategy::DepthFirst,
        Strategy::BreadthFirst,
        Strategy::UniformCost,
        Strategy::GreedyBestFirst,
        Strategy::AStar,
        Strategy::IterativeDeepeningAStar,
    ];

    /// Canonical short method name.
    pub fn code(self) -> &'static str {
        match self {
            Strategy::DepthFirst => "DFS",
            Strategy::BreadthFirst => "BFS",
            Strategy::UniformCost => "UCS",
            Strategy::GreedyBestFirst => "GBFS",
            Strategy::AStar => "AS",
            Strategy::IterativeDeepeningAStar => "IDASTAR",
        }
    }

    /// Short label used in report tables.
    pub fn short_label(self) -> &'static str {
        match self {
            Strategy::AStar => "A*",
            Strategy::IterativeDeepeningAStar => "IDA*",
            other => other.code(),
        }
    }

    /// Human-readable algorithm name.
    pub fn description(self) -> &'static str {
        match self {
            Strategy::DepthFirst => "Depth-First Search",
            Strategy::BreadthFirst => "Breadth-First Search",
            Strategy::UniformCost => "Uniform-Cost Search",
            Strategy::GreedyBestFirst => "Greedy Best-First Search",
            Strategy::AStar => "A* Search",
            Strategy::IterativeDeepeningAStar => "Iterative-Deepening A* Search",
        }
    }

    /// Whether the strategy needs node coordinates.
    pub fn is_informed(self) -> bool {
        matches!(
            self,
            Strategy::GreedyBestFirst | Strategy::AStar | Strategy::IterativeDeepeningAStar
        )
    }

    /// Names accepted for this strategy.
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        ALIASES
            .iter()
            .filter(move |(_, strategy)| *strategy == self)
            .map(|(name, _)| *name)
    }

    fn suggest(name: &str) -> Option<String> {
        ALIASES
            .iter()
            .map(|(alias, _)| (*alias, strsim::damerau_levenshtein(name, alias)))
            .filter(|(_, distance)| *distance <= SUGGESTION_MAX_DISTANCE)
            .min_by_key(|(_, distance)| *distance)
            .map(|(alias, _)| alias.to_string())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    /// Resolve a case-insensitive method name or alias.
    fn from_str(name: &str) -> Result<Self> {
        let upper = name.trim().to_uppercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == upper)
            .map(|(_, strategy)| *strategy)
            .ok_or_else(|| Error::UnknownStrategy {
                name: name.to_string(),
                suggestion: Strategy::suggest(&upper),
            })
    }
}

/// Trait for search strategies.
///
/// Implementations only choose a frontier and a ranking (or, for IDA*, their
/// own loop); goal testing, visited tracking and node counting are shared.
pub trait SearchStrategy: Send + Sync {
    /// The algorithm identifier for this strategy.
    fn strategy(&self) -> Strategy;

    /// Run the search and return every solution found plus the node count.
    fn search(&self, context: &SearchContext<'_>) -> Result<SearchRun>;
}

/// Depth-first search over a stack frontier.
#[derive(Debug, Clone, Default)]
pub struct DepthFirstSearch;

impl SearchStrategy for DepthFirstSearch {
    fn strategy(&self) -> Strategy {
        Strategy::DepthFirst
    }

    fn search(&self, context: &SearchContext<'_>) -> Result<SearchRun> {
        graph_search(context, StackFrontier::default(), Ranking::Insertion, None)
    }
}

/// Breadth-first search over a queue frontier.
///
/// Finds the path with the fewest edges, ignoring costs.
#[derive(Debug, Clone, Default)]
pub struct BreadthFirstSearch;

impl SearchStrategy for BreadthFirstSearch {
    fn strategy(&self) -> Strategy {
        Strategy::BreadthFirst
    }

    fn search(&self, context: &SearchContext<'_>) -> Result<SearchRun> {
        graph_search(context, QueueFrontier::default(), Ranking::Insertion, None)
    }
}

/// Uniform-cost search ordered by accumulated cost.
#[derive(Debug, Clone, Default)]
pub struct UniformCostSearch {
    /// Stop once two solutions have been removed from the frontier.
    ///
    /// Cost-ordered removal makes the first two goal pops the cheapest two,
    /// provided every edge cost is non-negative.
    pub early_stop: bool,
}

impl SearchStrategy for UniformCostSearch {
    fn strategy(&self) -> Strategy {
        Strategy::UniformCost
    }

    fn search(&self, context: &SearchContext<'_>) -> Result<SearchRun> {
        let stop_after = self.early_stop.then_some(2);
        graph_search(context, PriorityFrontier::default(), Ranking::Cost, stop_after)
    }
}

/// Greedy best-first search ordered by the heuristic alone.
#[derive(Debug, Clone, Default)]
pub struct GreedyBestFirstSearch;

impl SearchStrategy for GreedyBestFirstSearch {
    fn strategy(&self) -> Strategy {
        Strategy::GreedyBestFirst
    }

    fn search(&self, context: &SearchContext<'_>) -> Result<SearchRun> {
        graph_search(
            context,
            PriorityFrontier::default(),
            Ranking::Heuristic,
            None,
        )
    }
}

/// A* search ordered by `g + h`.
#[derive(Debug, Clone, Default)]
pub struct AStarSearch;

impl SearchStrategy for AStarSearch {
    fn strategy(&self) -> Strategy {
        Strategy::AStar
    }

    fn search(&self, context: &SearchContext<'_>) -> Result<SearchRun> {
        graph_search(
            context,
            PriorityFrontier::default(),
            Ranking::CostPlusHeuristic,
            None,
        )
    }
}

/// Iterative-deepening A* with a cap on bound escalations.
#[derive(Debug, Clone)]
pub struct IterativeDeepeningAStar {
    pub max_iterations: usize,
}

impl SearchStrategy for IterativeDeepeningAStar {
    fn strategy(&self) -> Strategy {
        Strategy::IterativeDeepeningAStar
    }

    fn search(&self, context: &SearchContext<'_>) -> Result<SearchRun> {
        iterative_deepening_a_star(context, self.max_iterations)
    }
}

/// Select the implementation for `strategy`, configured from `options`.
pub fn select_strategy(strategy: Strategy, options: &SearchOptions) -> Box<dyn SearchStrategy> {
    match strategy {
        Strategy::DepthFirst => Box::new(DepthFirstSearch),
        Strategy::BreadthFirst => Box::new(BreadthFirstSearch),
        Strategy::UniformCost => Box::new(UniformCostSearch {
            early_stop: options.ucs_early_stop,
        }),
        Strategy::GreedyBestFirst => Box::new(GreedyBestFirstSearch),
        Strategy::AStar => Box::new(AStarSearch),
        Strategy::IterativeDeepeningAStar => Box::new(IterativeDeepeningAStar {
            max_iterations: options.ida_max_iterations,
        }),
    }
}
