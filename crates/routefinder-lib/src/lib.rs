//! routefinder library entry points.
//!
//! This crate loads a small weighted directed graph with node coordinates,
//! then searches from an origin to the nearest acceptable destination using
//! one of six strategies: depth-first, breadth-first, uniform-cost, greedy
//! best-first, A* and iterative-deepening A*. Every run reports its best and
//! second-best solution together with the number of search nodes created.
//! Higher-level consumers (the CLI and report binaries) should only depend on
//! the functions exported here instead of reimplementing behavior.

pub mod engine;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod ida;
pub mod loader;
pub mod node;
pub mod search;
pub mod selection;
pub mod strategy;

pub use engine::{run, run_with_options, solve, solve_with_options, SearchOptions, SearchOutcome};
pub use error::{Error, Result};
pub use graph::{Coordinates, Edge, Graph, NodeId, Position};
pub use heuristic::{heuristic, HeuristicKind, AVERAGE_EDGE_LENGTH};
pub use loader::{load_problem, parse_problem, Problem};
pub use node::SearchNode;
pub use selection::select_two_best;
pub use strategy::{select_strategy, SearchStrategy, Strategy};
