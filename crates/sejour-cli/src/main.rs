//! # sejour CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber and
//! dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sejour_cli::plan::{run_earliest, run_max_length, run_plan, EarliestArgs, MaxLengthArgs, PlanArgs};
use sejour_cli::report::{run_group, run_summary, GroupArgs, SummaryArgs};
use sejour_cli::rules::{run_rules, RulesArgs};
use sejour_core::SystemClock;

/// Residency day counter for people living between jurisdictions.
///
/// Counts presence days under rules such as the Schengen 90/180 rule,
/// classifies compliance, and answers "can I take this trip?" questions.
#[derive(Parser, Debug)]
#[command(name = "sejour", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Days used and remaining per jurisdiction.
    Summary(SummaryArgs),

    /// Household overview under one jurisdiction.
    Group(GroupArgs),

    /// Check a proposed stay and suggest alternatives.
    Plan(PlanArgs),

    /// Earliest safe start date for a stay of given length.
    Earliest(EarliestArgs),

    /// Longest safe stay from an entry date.
    MaxLength(MaxLengthArgs),

    /// List the active rule catalog.
    Rules(RulesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    let clock = SystemClock;
    let result = match &cli.command {
        Commands::Summary(args) => run_summary(args, &clock),
        Commands::Group(args) => run_group(args, &clock),
        Commands::Plan(args) => run_plan(args, &clock),
        Commands::Earliest(args) => run_earliest(args, &clock),
        Commands::MaxLength(args) => run_max_length(args, &clock),
        Commands::Rules(args) => run_rules(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
