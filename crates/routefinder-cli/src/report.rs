//! Batch comparison report across strategies and input files.
//!
//! Every input is loaded once and solved by each requested strategy in
//! process. Each run happens on its own worker thread and is abandoned once
//! the per-run timeout elapses, so one runaway strategy cannot stall the
//! batch. The rendered report has three parts: a per-input results table,
//! a per-input summary (optimal cost, node-count range, timings, differing
//! paths) and an overall per-strategy statistics table.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use routefinder_lib::{
    load_problem, solve_with_options, Problem, SearchOptions, SearchOutcome, Strategy,
};
use tracing::{debug, warn};

use crate::output::{format_cost, join_path};

const REPORT_WIDTH: usize = 100;
const PATH_COLUMN: usize = 40;

/// Per-run wall-clock limit used when the caller does not pick one.
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a strategy run produced no outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunFailure {
    /// The search returned an error.
    Error(String),
    /// The search was still running when the timeout elapsed.
    Timeout(Duration),
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(message) => f.write_str(message),
            Self::Timeout(limit) => write!(f, "no result after {}s", limit.as_secs_f64()),
        }
    }
}

/// One strategy run against one input.
#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub strategy: Strategy,
    pub outcome: Result<SearchOutcome, RunFailure>,
    pub elapsed: Duration,
}

impl StrategyRun {
    fn solved(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref().ok().filter(|outcome| outcome.is_solved())
    }

    fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// All runs for one input file, or the reason it could not be loaded.
#[derive(Debug, Clone)]
pub struct InputReport {
    pub input: String,
    pub runs: Result<Vec<StrategyRun>, String>,
}

impl InputReport {
    /// Whether loading failed or any strategy errored or timed out.
    pub fn has_errors(&self) -> bool {
        match &self.runs {
            Ok(runs) => runs.iter().any(|run| run.outcome.is_err()),
            Err(_) => true,
        }
    }
}

/// Load `input` and run each strategy against it, giving each run at most
/// `timeout` of wall-clock time.
pub fn run_input(
    input: &Path,
    strategies: &[Strategy],
    options: &SearchOptions,
    timeout: Duration,
) -> InputReport {
    let name = input.display().to_string();
    let problem = match load_problem(input) {
        Ok(problem) => problem,
        Err(err) => {
            warn!(input = %name, error = %err, "failed to load input");
            return InputReport {
                input: name,
                runs: Err(err.to_string()),
            };
        }
    };

    let runs = strategies
        .iter()
        .map(|&strategy| {
            let started = Instant::now();
            let outcome = solve_in_background(&problem, strategy, options, timeout);
            let elapsed = started.elapsed();
            match &outcome {
                Err(RunFailure::Timeout(_)) => {
                    warn!(input = %name, %strategy, ?timeout, "strategy timed out");
                }
                _ => debug!(input = %name, %strategy, ?elapsed, "strategy finished"),
            }
            StrategyRun {
                strategy,
                outcome,
                elapsed,
            }
        })
        .collect();

    InputReport {
        input: name,
        runs: Ok(runs),
    }
}

/// Solve on a worker thread and wait up to `timeout` for the answer.
///
/// A worker that misses the deadline is detached; its eventual result is
/// dropped because the receiver is gone.
fn solve_in_background(
    problem: &Problem,
    strategy: Strategy,
    options: &SearchOptions,
    timeout: Duration,
) -> Result<SearchOutcome, RunFailure> {
    let (tx, rx) = mpsc::channel();
    let problem = problem.clone();
    let options = *options;
    let spawned = thread::Builder::new()
        .name(format!("search-{}", strategy.short_label()))
        .spawn(move || {
            let _ = tx.send(solve_with_options(&problem, strategy, &options));
        });
    if let Err(err) = spawned {
        return Err(RunFailure::Error(format!("failed to start search thread: {err}")));
    }

    match rx.recv_timeout(timeout) {
        Ok(result) => result.map_err(|err| RunFailure::Error(err.to_string())),
        Err(RecvTimeoutError::Timeout) => Err(RunFailure::Timeout(timeout)),
        Err(RecvTimeoutError::Disconnected) => Err(RunFailure::Error(
            "search thread stopped without a result".to_string(),
        )),
    }
}

/// Run every input; order of the result matches `inputs`.
pub fn run_report<P: AsRef<Path>>(
    inputs: &[P],
    strategies: &[Strategy],
    options: &SearchOptions,
    timeout: Duration,
) -> Vec<InputReport> {
    inputs
        .iter()
        .map(|input| run_input(input.as_ref(), strategies, options, timeout))
        .collect()
}

/// Render the full report.
pub fn render_report<W: Write>(
    out: &mut W,
    reports: &[InputReport],
    strategies: &[Strategy],
) -> io::Result<()> {
    banner(out, "SEARCH STRATEGY REPORT")?;
    writeln!(
        out,
        "Running {} input(s) with {} strateg{}",
        reports.len(),
        strategies.len(),
        if strategies.len() == 1 { "y" } else { "ies" }
    )?;

    for report in reports {
        render_table(out, report)?;
    }

    banner(out, "SUMMARY")?;
    for report in reports {
        render_summary(out, report)?;
    }

    banner(out, "OVERALL STATISTICS")?;
    render_overall(out, reports, strategies)
}

fn banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    let frame = "=".repeat(REPORT_WIDTH);
    writeln!(out)?;
    writeln!(out, "{frame}")?;
    writeln!(out, "{title:^width$}", width = REPORT_WIDTH)?;
    writeln!(out, "{frame}")
}

fn render_table<W: Write>(out: &mut W, report: &InputReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Input: {}", report.input)?;
    writeln!(out, "{}", "-".repeat(REPORT_WIDTH))?;
    writeln!(
        out,
        "{:<6} | {:<6} | {:<6} | {:<8} | {:<9} | Path",
        "Algo", "Goal", "Nodes", "Cost", "Time"
    )?;
    writeln!(out, "{}", "-".repeat(REPORT_WIDTH))?;

    let runs = match &report.runs {
        Ok(runs) => runs,
        Err(message) => return writeln!(out, "ERROR  | {message}"),
    };

    for run in runs {
        let label = run.strategy.short_label();
        let time = format!("{:.2}ms", run.elapsed_ms());
        match &run.outcome {
            Err(failure @ RunFailure::Timeout(_)) => {
                writeln!(out, "{label:<6} | TIMEOUT | {failure}")?;
            }
            Err(failure) => writeln!(out, "{label:<6} | ERROR  | {failure}")?,
            Ok(outcome) => {
                let goal = outcome
                    .best_goal
                    .map_or_else(|| "None".to_string(), |goal| goal.to_string());
                let cost = outcome.best_cost.map_or_else(|| "-".to_string(), format_cost);
                let path = truncate(&join_path(&outcome.best_path, " "), PATH_COLUMN);
                writeln!(
                    out,
                    "{label:<6} | {goal:<6} | {:<6} | {cost:<8} | {time:<9} | {path}",
                    outcome.nodes_created
                )?;
            }
        }
    }
    Ok(())
}

fn render_summary<W: Write>(out: &mut W, report: &InputReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "[{}]", report.input)?;

    let runs = match &report.runs {
        Ok(runs) => runs,
        Err(message) => return writeln!(out, "  ERROR: {message}"),
    };

    let solved: Vec<(&StrategyRun, &SearchOutcome)> = runs
        .iter()
        .filter_map(|run| run.solved().map(|outcome| (run, outcome)))
        .collect();
    if solved.is_empty() {
        return writeln!(out, "  No solution found by any strategy");
    }

    let mut goals: Vec<_> = solved.iter().filter_map(|(_, o)| o.best_goal).collect();
    goals.sort_unstable();
    goals.dedup();
    writeln!(out, "  Goal: {}", join_path(&goals, ", "))?;

    let min_cost = solved
        .iter()
        .map(|(_, o)| cost_of(o))
        .fold(f64::INFINITY, f64::min);
    let max_cost = solved
        .iter()
        .map(|(_, o)| cost_of(o))
        .fold(f64::NEG_INFINITY, f64::max);

    writeln!(out, "  Optimal Cost: {}", format_cost(min_cost))?;
    writeln!(
        out,
        "    Found by: {}",
        labels(solved.iter().filter(|(_, o)| cost_of(o) == min_cost))
    )?;
    if max_cost > min_cost {
        writeln!(
            out,
            "  Suboptimal: {}",
            labels(solved.iter().filter(|(_, o)| cost_of(o) > min_cost))
        )?;
        if min_cost > 0.0 {
            writeln!(
                out,
                "    Worst cost: {} ({:.2}x optimal)",
                format_cost(max_cost),
                max_cost / min_cost
            )?;
        } else {
            writeln!(out, "    Worst cost: {}", format_cost(max_cost))?;
        }
    }

    let min_nodes = solved.iter().map(|(_, o)| o.nodes_created).min().unwrap_or(0);
    let max_nodes = solved.iter().map(|(_, o)| o.nodes_created).max().unwrap_or(0);
    if min_nodes == max_nodes {
        writeln!(out, "  Nodes: {min_nodes}")?;
    } else {
        writeln!(
            out,
            "  Nodes: {min_nodes} - {max_nodes} ({:.2}x ratio)",
            max_nodes as f64 / min_nodes.max(1) as f64
        )?;
    }
    writeln!(
        out,
        "    Most efficient: {}",
        labels(solved.iter().filter(|(_, o)| o.nodes_created == min_nodes))
    )?;
    if min_nodes != max_nodes {
        writeln!(
            out,
            "    Least efficient: {}",
            labels(solved.iter().filter(|(_, o)| o.nodes_created == max_nodes))
        )?;
    }

    let fastest = solved
        .iter()
        .min_by_key(|(run, _)| run.elapsed)
        .map(|(run, _)| *run);
    let slowest = solved
        .iter()
        .max_by_key(|(run, _)| run.elapsed)
        .map(|(run, _)| *run);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(
            out,
            "  Time: {:.2}ms - {:.2}ms (fastest {}, slowest {})",
            fastest.elapsed_ms(),
            slowest.elapsed_ms(),
            fastest.strategy.short_label(),
            slowest.strategy.short_label()
        )?;
    }

    let first_path = &solved[0].1.best_path;
    if solved.iter().any(|(_, o)| &o.best_path != first_path) {
        writeln!(out, "  Different Paths:")?;
        for (run, outcome) in &solved {
            let path = truncate(&join_path(&outcome.best_path, " "), PATH_COLUMN);
            let cost = cost_of(outcome);
            if cost == min_cost {
                writeln!(out, "    {:<6}: {path}", run.strategy.short_label())?;
            } else {
                writeln!(
                    out,
                    "    {:<6}: {path} (suboptimal: {})",
                    run.strategy.short_label(),
                    format_cost(cost)
                )?;
            }
        }
    }
    Ok(())
}

fn render_overall<W: Write>(
    out: &mut W,
    reports: &[InputReport],
    strategies: &[Strategy],
) -> io::Result<()> {
    let loaded: Vec<&Vec<StrategyRun>> = reports
        .iter()
        .filter_map(|report| report.runs.as_ref().ok())
        .collect();
    let total = loaded.len() * strategies.len();
    let solved = loaded
        .iter()
        .flat_map(|runs| runs.iter())
        .filter(|run| run.solved().is_some())
        .count();

    writeln!(out)?;
    writeln!(
        out,
        "Inputs: {} ({} failed to load)",
        reports.len(),
        reports.len() - loaded.len()
    )?;
    writeln!(out, "Runs: {total}")?;
    if total > 0 {
        writeln!(
            out,
            "Solved: {solved} ({:.1}%)",
            solved as f64 / total as f64 * 100.0
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{:<10} | {:<10} | {:<10} | {:<10} | {:<8}",
        "Algorithm", "Avg Nodes", "Avg Cost", "Avg Time", "Success"
    )?;
    writeln!(out, "{}", "-".repeat(REPORT_WIDTH))?;

    for &strategy in strategies {
        let stats = StrategyStats::collect(strategy, &loaded);
        if stats.runs == 0 {
            writeln!(
                out,
                "{:<10} | {:<10} | {:<10} | {:<10} | -",
                strategy.short_label(),
                "-",
                "-",
                "-"
            )?;
            continue;
        }
        let avg_cost = if stats.solved > 0 {
            format!("{:.1}", stats.total_cost / stats.solved as f64)
        } else {
            "-".to_string()
        };
        writeln!(
            out,
            "{:<10} | {:<10.1} | {:<10} | {:<10} | {:.1}%",
            strategy.short_label(),
            stats.total_nodes as f64 / stats.runs as f64,
            avg_cost,
            format!("{:.2}ms", stats.total_ms / stats.runs as f64),
            stats.solved as f64 / stats.runs as f64 * 100.0
        )?;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct StrategyStats {
    runs: usize,
    solved: usize,
    total_nodes: usize,
    total_cost: f64,
    total_ms: f64,
}

impl StrategyStats {
    fn collect(strategy: Strategy, loaded: &[&Vec<StrategyRun>]) -> Self {
        let mut stats = Self::default();
        for run in loaded
            .iter()
            .flat_map(|runs| runs.iter())
            .filter(|run| run.strategy == strategy)
        {
            let Ok(outcome) = &run.outcome else {
                continue;
            };
            stats.runs += 1;
            stats.total_nodes += outcome.nodes_created;
            stats.total_ms += run.elapsed_ms();
            if let Some(cost) = outcome.best_cost {
                stats.solved += 1;
                stats.total_cost += cost;
            }
        }
        stats
    }
}

fn cost_of(outcome: &SearchOutcome) -> f64 {
    outcome.best_cost.unwrap_or(f64::INFINITY)
}

fn labels<'a, 'b: 'a, I>(runs: I) -> String
where
    I: Iterator<Item = &'a (&'b StrategyRun, &'b SearchOutcome)>,
{
    runs.map(|(run, _)| run.strategy.short_label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(
        strategy: Strategy,
        cost: Option<f64>,
        nodes: usize,
        path: Vec<i64>,
    ) -> SearchOutcome {
        SearchOutcome {
            strategy,
            best_goal: path.last().copied(),
            nodes_created: nodes,
            best_path: path,
            best_cost: cost,
            second_goal: None,
            second_path: Vec::new(),
            second_cost: None,
        }
    }

    fn run(strategy: Strategy, cost: Option<f64>, nodes: usize, path: Vec<i64>) -> StrategyRun {
        StrategyRun {
            strategy,
            outcome: Ok(outcome(strategy, cost, nodes, path)),
            elapsed: Duration::from_micros(250),
        }
    }

    fn rendered(reports: &[InputReport], strategies: &[Strategy]) -> String {
        let mut buffer = Vec::new();
        render_report(&mut buffer, reports, strategies).expect("write to buffer");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn summary_names_optimal_and_suboptimal_strategies() {
        let report = InputReport {
            input: "misleading.txt".to_string(),
            runs: Ok(vec![
                run(Strategy::UniformCost, Some(10.0), 5, vec![1, 3, 4]),
                run(Strategy::GreedyBestFirst, Some(25.0), 4, vec![1, 2, 4]),
            ]),
        };
        let strategies = [Strategy::UniformCost, Strategy::GreedyBestFirst];
        let text = rendered(&[report], &strategies);

        assert!(text.contains("Optimal Cost: 10"), "{text}");
        assert!(text.contains("Found by: UCS"), "{text}");
        assert!(text.contains("Suboptimal: GBFS"), "{text}");
        assert!(text.contains("Worst cost: 25 (2.50x optimal)"), "{text}");
        assert!(text.contains("Most efficient: GBFS"), "{text}");
        assert!(text.contains("Least efficient: UCS"), "{text}");
        assert!(text.contains("(suboptimal: 25)"), "{text}");
    }

    #[test]
    fn unsolved_input_is_reported() {
        let report = InputReport {
            input: "no_solution.txt".to_string(),
            runs: Ok(vec![run(Strategy::BreadthFirst, None, 2, Vec::new())]),
        };
        let text = rendered(&[report], &[Strategy::BreadthFirst]);
        assert!(text.contains("No solution found by any strategy"));
        assert!(text.contains("BFS    | None   | 2"));
    }

    #[test]
    fn load_failures_are_errors() {
        let report = InputReport {
            input: "missing.txt".to_string(),
            runs: Err("input file 'missing.txt' not found".to_string()),
        };
        assert!(report.has_errors());
        let text = rendered(&[report], &[Strategy::DepthFirst]);
        assert!(text.contains("ERROR  | input file 'missing.txt' not found"));
        assert!(text.contains("(1 failed to load)"));
    }

    #[test]
    fn timed_out_runs_are_failures() {
        let report = InputReport {
            input: "grid.txt".to_string(),
            runs: Ok(vec![
                run(Strategy::BreadthFirst, Some(4.0), 9, vec![1, 2, 5]),
                StrategyRun {
                    strategy: Strategy::IterativeDeepeningAStar,
                    outcome: Err(RunFailure::Timeout(Duration::from_secs(2))),
                    elapsed: Duration::from_secs(2),
                },
            ]),
        };
        assert!(report.has_errors());

        let strategies = [Strategy::BreadthFirst, Strategy::IterativeDeepeningAStar];
        let text = rendered(&[report], &strategies);
        assert!(text.contains("IDA*   | TIMEOUT | no result after 2s"), "{text}");
        assert!(text.contains("Found by: BFS"), "{text}");
        assert!(text.contains("Solved: 1 (50.0%)"), "{text}");
    }

    #[test]
    fn search_errors_render_as_error_rows() {
        let report = InputReport {
            input: "broken.txt".to_string(),
            runs: Ok(vec![StrategyRun {
                strategy: Strategy::DepthFirst,
                outcome: Err(RunFailure::Error("origin 7 is not in the graph".to_string())),
                elapsed: Duration::ZERO,
            }]),
        };
        assert!(report.has_errors());
        let text = rendered(&[report], &[Strategy::DepthFirst]);
        assert!(text.contains("DFS    | ERROR  | origin 7 is not in the graph"), "{text}");
    }

    #[test]
    fn background_runs_finish_within_the_timeout() {
        let problem = routefinder_lib::parse_problem(
            "Nodes:\n1: (0,0)\n2: (1,0)\nEdges:\n(1,2): 3\nOrigin:\n1\nDestinations:\n2\n",
        )
        .expect("valid problem");
        let outcome = solve_in_background(
            &problem,
            Strategy::AStar,
            &SearchOptions::default(),
            DEFAULT_RUN_TIMEOUT,
        )
        .expect("search completes");
        assert_eq!(outcome.best_path, vec![1, 2]);
        assert_eq!(outcome.best_cost, Some(3.0));
    }

    #[test]
    fn missing_input_starts_no_runs() {
        let report = run_input(
            Path::new("does-not-exist.txt"),
            &[Strategy::BreadthFirst],
            &SearchOptions::default(),
            Duration::ZERO,
        );
        assert!(report.runs.is_err());
        assert!(report.has_errors());
    }

    #[test]
    fn long_paths_are_truncated() {
        assert_eq!(truncate("1 2 3", 10), "1 2 3");
        assert_eq!(truncate("1 2 3 4 5 6", 8), "1 2 3...");
    }
}
