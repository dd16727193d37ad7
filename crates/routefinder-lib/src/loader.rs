//! Loader for the textual problem description.
//!
//! A problem file has four labelled sections:
//!
//! ```text
//! Nodes:
//! 1: (4,1)
//! 2: (2,2)
//! Edges:
//! (2,1): 4
//! (1,2): 3
//! Origin:
//! 2
//! Destinations:
//! 1; 3
//! ```
//!
//! Blank lines are ignored and every line is trimmed. Lines that do not split
//! into a key and a value are skipped; lines that do but fail to parse are
//! reported with their 1-based line number.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Coordinates, Edge, Graph, NodeId, Position};

/// Everything a search run needs: graph, coordinates, origin and destinations.
#[derive(Debug, Clone)]
pub struct Problem {
    pub graph: Graph,
    pub coordinates: Coordinates,
    pub origin: NodeId,
    pub destinations: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Nodes,
    Edges,
    Origin,
    Destinations,
}

impl Section {
    const HEADERS: [(&'static str, Section); 4] = [
        ("Nodes:", Section::Nodes),
        ("Edges:", Section::Edges),
        ("Origin:", Section::Origin),
        ("Destinations:", Section::Destinations),
    ];

    /// Split a header line into its section and any trailing content.
    fn from_header(line: &str) -> Option<(Section, &str)> {
        Self::HEADERS.iter().find_map(|(header, section)| {
            line.strip_prefix(header)
                .map(|rest| (*section, rest.trim()))
        })
    }
}

/// Load and validate a problem from `path`.
pub fn load_problem(path: &Path) -> Result<Problem> {
    let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(err),
    })?;
    let problem = parse_problem(&contents)?;
    debug!(
        path = %path.display(),
        nodes = problem.graph.node_count(),
        edges = problem.graph.edge_count(),
        origin = problem.origin,
        destinations = ?problem.destinations,
        "loaded problem"
    );
    Ok(problem)
}

/// Parse a problem from its textual description.
pub fn parse_problem(input: &str) -> Result<Problem> {
    let mut builder = ProblemBuilder::default();
    let mut section = None;

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = index + 1;

        let content = match Section::from_header(line) {
            Some((next, rest)) => {
                section = Some(next);
                if rest.is_empty() {
                    continue;
                }
                rest
            }
            None => line,
        };

        match section {
            Some(Section::Nodes) => builder.node(line_no, content)?,
            Some(Section::Edges) => builder.edge(line_no, content)?,
            Some(Section::Origin) => builder.origin = Some(parse_id(line_no, content)?),
            Some(Section::Destinations) => builder.destinations(line_no, content)?,
            None => {}
        }
    }

    builder.finish()
}

#[derive(Debug, Default)]
struct ProblemBuilder {
    adjacency: HashMap<NodeId, Vec<Edge>>,
    coordinates: Coordinates,
    origin: Option<NodeId>,
    destinations: Vec<NodeId>,
}

impl ProblemBuilder {
    /// `id: (x,y)`
    fn node(&mut self, line: usize, content: &str) -> Result<()> {
        let Some((id, coords)) = split_pair(content) else {
            return Ok(());
        };
        let id = parse_id(line, id)?;
        let (x, y) = parse_tuple(line, coords, |value| parse_number(line, value))?;
        if !x.is_finite() || !y.is_finite() {
            return Err(malformed(
                line,
                format!("node coordinates must be finite numbers, got ({x}, {y})"),
            ));
        }
        self.coordinates.insert(id, Position::new(x, y));
        self.adjacency.entry(id).or_default();
        Ok(())
    }

    /// `(from,to): cost`
    fn edge(&mut self, line: usize, content: &str) -> Result<()> {
        let Some((endpoints, cost)) = split_pair(content) else {
            return Ok(());
        };
        let (from, to) = parse_tuple(line, endpoints, |value| parse_id(line, value))?;
        let cost = parse_number(line, cost)?;
        if !cost.is_finite() || cost < 0.0 {
            return Err(malformed(
                line,
                format!("edge cost must be a non-negative number, got {cost}"),
            ));
        }
        self.adjacency
            .entry(from)
            .or_default()
            .push(Edge { target: to, cost });
        self.adjacency.entry(to).or_default();
        Ok(())
    }

    /// `5; 4`
    fn destinations(&mut self, line: usize, content: &str) -> Result<()> {
        self.destinations = content
            .split(';')
            .map(|part| parse_id(line, part))
            .collect::<Result<_>>()?;
        Ok(())
    }

    fn finish(self) -> Result<Problem> {
        let origin = self.origin.ok_or(Error::MissingOrigin)?;
        if self.destinations.is_empty() {
            return Err(Error::MissingDestinations);
        }
        if self.adjacency.is_empty() {
            return Err(Error::EmptyGraph);
        }
        Ok(Problem {
            graph: Graph::from_adjacency(self.adjacency),
            coordinates: self.coordinates,
            origin,
            destinations: self.destinations,
        })
    }
}

fn split_pair(content: &str) -> Option<(&str, &str)> {
    let mut parts = content.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Some((key.trim(), value.trim())),
        _ => None,
    }
}

fn parse_tuple<T>(
    line: usize,
    value: &str,
    parse: impl Fn(&str) -> Result<T>,
) -> Result<(T, T)> {
    let inner = value.trim().trim_start_matches('(').trim_end_matches(')');
    let mut parts = inner.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Ok((parse(first)?, parse(second)?)),
        _ => Err(malformed(line, format!("expected a pair like (a,b), got '{value}'"))),
    }
}

fn parse_id(line: usize, value: &str) -> Result<NodeId> {
    let value = value.trim();
    value
        .parse()
        .map_err(|_| malformed(line, format!("invalid node id '{value}'")))
}

fn parse_number(line: usize, value: &str) -> Result<f64> {
    let value = value.trim();
    value
        .parse()
        .map_err(|_| malformed(line, format!("invalid number '{value}'")))
}

fn malformed(line: usize, message: String) -> Error {
    Error::MalformedInput { line, message }
}
