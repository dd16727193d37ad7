//! Output formatting for search outcomes.
//!
//! Three formats are supported:
//! - [`OutputMode::Simple`]: three terse lines, stable for scripting
//! - [`OutputMode::Verbose`]: a framed, labelled block (default)
//! - [`OutputMode::Json`]: the outcome serialised with `serde_json`

use std::io::{self, Write};

use routefinder_lib::{NodeId, SearchOutcome};
use serde::Serialize;

/// Width of the `=` frame around verbose and error blocks.
pub const FRAME_WIDTH: usize = 50;

/// How a single search result is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    Simple,
    #[default]
    Verbose,
    Json,
}

impl OutputMode {
    /// Pick the mode from the mutually exclusive CLI flags.
    pub fn from_flags(simple: bool, json: bool) -> Self {
        match (simple, json) {
            (true, _) => OutputMode::Simple,
            (_, true) => OutputMode::Json,
            _ => OutputMode::Verbose,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    input: &'a str,
    method: &'a str,
    #[serde(flatten)]
    outcome: &'a SearchOutcome,
}

/// Render `outcome` in the requested mode.
pub fn render<W: Write>(
    out: &mut W,
    mode: OutputMode,
    input: &str,
    method: &str,
    outcome: &SearchOutcome,
) -> io::Result<()> {
    match mode {
        OutputMode::Simple => render_simple(out, input, method, outcome),
        OutputMode::Verbose => render_verbose(out, input, method, outcome),
        OutputMode::Json => render_json(out, input, method, outcome),
    }
}

/// Three lines: header, `goal nodes` (or `No solution nodes`), path.
pub fn render_simple<W: Write>(
    out: &mut W,
    input: &str,
    method: &str,
    outcome: &SearchOutcome,
) -> io::Result<()> {
    writeln!(out, "{input} {method}")?;
    match outcome.best_goal {
        Some(goal) => {
            writeln!(out, "{goal} {}", outcome.nodes_created)?;
            writeln!(out, "{}", join_path(&outcome.best_path, " "))
        }
        None => {
            writeln!(out, "No solution {}", outcome.nodes_created)?;
            writeln!(out)
        }
    }
}

pub fn render_verbose<W: Write>(
    out: &mut W,
    input: &str,
    method: &str,
    outcome: &SearchOutcome,
) -> io::Result<()> {
    let frame = "=".repeat(FRAME_WIDTH);
    writeln!(out, "{frame}")?;
    writeln!(out, "File: {input}")?;
    writeln!(out, "Search Method: {method}")?;
    writeln!(out, "{frame}")?;

    match outcome.best_goal {
        None => {
            writeln!(out, "Result: NO SOLUTION FOUND")?;
            writeln!(out, "Nodes Created: {}", outcome.nodes_created)?;
            writeln!(out, "Path: None")?;
        }
        Some(goal) => {
            writeln!(out, "Result: SOLUTION FOUND")?;
            writeln!(out, "Goal Node: {goal}")?;
            writeln!(out, "Nodes Created: {}", outcome.nodes_created)?;
            writeln!(out, "Path: {}", join_path(&outcome.best_path, " -> "))?;
            writeln!(out, "Path Length: {} nodes", outcome.best_path.len())?;
            if let Some(cost) = outcome.best_cost {
                writeln!(out, "Path Cost: {}", format_cost(cost))?;
            }
            if let Some(second) = outcome.second_goal {
                writeln!(out, "Second Best Goal: {second}")?;
                writeln!(
                    out,
                    "Second Best Path: {}",
                    join_path(&outcome.second_path, " -> ")
                )?;
                if let Some(cost) = outcome.second_cost {
                    writeln!(out, "Second Best Cost: {}", format_cost(cost))?;
                }
            }
        }
    }

    writeln!(out, "{frame}")?;
    writeln!(out)
}

pub fn render_json<W: Write>(
    out: &mut W,
    input: &str,
    method: &str,
    outcome: &SearchOutcome,
) -> io::Result<()> {
    let report = JsonReport {
        input,
        method,
        outcome,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

/// Framed `ERROR:` block printed before exiting with a failure code.
pub fn render_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    let frame = "=".repeat(FRAME_WIDTH);
    writeln!(out, "{frame}")?;
    writeln!(out, "ERROR: {message}")?;
    writeln!(out, "{frame}")
}

pub fn join_path(path: &[NodeId], separator: &str) -> String {
    path.iter()
        .map(NodeId::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Integral costs print without a fraction; others keep two decimals.
pub fn format_cost(cost: f64) -> String {
    if cost.fract() == 0.0 {
        format!("{cost:.0}")
    } else {
        format!("{cost:.2}")
    }
}
