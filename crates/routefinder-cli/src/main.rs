use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use routefinder_cli::logging::{init_logging, LoggingConfig};
use routefinder_cli::method::{parse_method, MethodArg};
use routefinder_cli::output::{render, render_error, OutputMode};
use routefinder_lib::{load_problem, solve_with_options, SearchOptions};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Search a weighted graph from an origin to the nearest destination",
    after_help = "Methods: DFS, BFS, UCS (CUS1), GBFS, AS (ASTAR, A*), IDA (IDASTAR, IDA*, CUS2)"
)]
struct Cli {
    /// Problem description file.
    input: PathBuf,

    /// Search method name (case-insensitive).
    #[arg(value_parser = parse_method)]
    method: MethodArg,

    /// Print the terse three-line result.
    #[arg(long, conflicts_with = "json")]
    simple: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    match handle_search(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "search command failed");
            let mut stdout = io::stdout().lock();
            let _ = render_error(&mut stdout, &root_message(&err));
            let _ = stdout.flush();
            ExitCode::FAILURE
        }
    }
}

fn handle_search(cli: &Cli) -> Result<()> {
    let problem = load_problem(&cli.input)
        .with_context(|| format!("failed to load problem from {}", cli.input.display()))?;
    let options = SearchOptions::from_env();
    let outcome = solve_with_options(&problem, cli.method.strategy, &options)
        .with_context(|| format!("{} search failed", cli.method.strategy.description()))?;

    let mut stdout = io::stdout().lock();
    let mode = OutputMode::from_flags(cli.simple, cli.json);
    render(
        &mut stdout,
        mode,
        &display_name(&cli.input),
        &cli.method.label,
        &outcome,
    )
    .context("failed to write search result")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}

/// The library error carries the actionable message; context is for logs.
fn root_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<routefinder_lib::Error>() {
        Some(lib_err) => lib_err.to_string(),
        None => format!("{err:#}"),
    }
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}
