//! Common test utilities and fixture helpers.
#![allow(dead_code)]

use std::path::PathBuf;

use routefinder_lib::{load_problem, Coordinates, Graph, NodeId, Position, Problem};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture(name: &str) -> Problem {
    let path = fixtures_dir().join(name);
    load_problem(&path).unwrap_or_else(|err| panic!("fixture {name} loads: {err}"))
}

/// Coordinates from `(id, x, y)` triples.
pub fn coords(points: &[(NodeId, f64, f64)]) -> Coordinates {
    points
        .iter()
        .map(|&(id, x, y)| (id, Position::new(x, y)))
        .collect()
}

/// Problem built in memory from edges and coordinates.
pub fn problem(
    edges: &[(NodeId, NodeId, f64)],
    points: &[(NodeId, f64, f64)],
    origin: NodeId,
    destinations: &[NodeId],
) -> Problem {
    Problem {
        graph: Graph::from_edges(edges.iter().copied()),
        coordinates: coords(points),
        origin,
        destinations: destinations.to_vec(),
    }
}
