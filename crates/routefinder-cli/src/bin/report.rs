use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use routefinder_cli::logging::{init_logging, LoggingConfig};
use routefinder_cli::method::{parse_method, MethodArg};
use routefinder_cli::report::{render_report, run_report, DEFAULT_RUN_TIMEOUT};
use routefinder_lib::{SearchOptions, Strategy};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compare search strategies across one or more problem files"
)]
struct Cli {
    /// Problem description files.
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Restrict the report to these methods (repeatable). Defaults to all.
    #[arg(long = "strategy", value_parser = parse_method)]
    strategies: Vec<MethodArg>,

    /// Seconds each strategy may run on one input before it is reported as TIMEOUT.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_RUN_TIMEOUT.as_secs())]
    timeout: u64,
}

fn main() -> ExitCode {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    match handle_report(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every input loaded and every run succeeded.
fn handle_report(cli: &Cli) -> Result<bool> {
    let strategies = selected_strategies(&cli.strategies);
    let options = SearchOptions::from_env();
    let timeout = Duration::from_secs(cli.timeout);
    let reports = run_report(&cli.inputs, &strategies, &options, timeout);

    let mut stdout = io::stdout().lock();
    render_report(&mut stdout, &reports, &strategies).context("failed to write report")?;
    stdout.flush().context("failed to flush stdout")?;

    Ok(!reports.iter().any(|report| report.has_errors()))
}

fn selected_strategies(methods: &[MethodArg]) -> Vec<Strategy> {
    if methods.is_empty() {
        return Strategy::ALL.to_vec();
    }
    let mut strategies: Vec<Strategy> = Vec::new();
    for method in methods {
        if !strategies.contains(&method.strategy) {
            strategies.push(method.strategy);
        }
    }
    strategies
}
