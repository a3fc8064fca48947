//! mGBA Trace DB CLI
//!
//! Converts an mGBA binary execution trace into a SQLite database of
//! basic blocks, called functions and control-flow edges.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use mgba_trace_db::commands::{display_version, execute_convert, validate_args, ConvertArgs};
use mgba_trace_db::output::SchemaMode;
use mgba_trace_db::utils::config::DEFAULT_OUTPUT;

/// mGBA trace to database converter
#[derive(Parser, Debug)]
#[command(name = "mgba-trace-db")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input binary trace file
    #[arg(required_unless_present = "info")]
    input: Option<PathBuf>,

    /// Output database file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Print stats about the trace (also enables debug logging)
    #[arg(short, long)]
    verbose: bool,

    /// Output a wakare compatible database
    #[arg(short, long)]
    wakare: bool,

    /// Write a JSON run report to this path
    #[arg(long, env = "MGBA_TRACE_REPORT")]
    report: Option<PathBuf>,

    /// Display version and report schema information, then exit
    #[arg(long)]
    info: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if cli.info {
        display_version();
        return Ok(());
    }

    let Some(input) = cli.input else {
        anyhow::bail!("Input trace path is required");
    };

    let args = ConvertArgs {
        input,
        output: cli.output,
        schema: SchemaMode::from_flag(cli.wakare),
        verbose: cli.verbose,
        report: cli.report,
    };

    // Validate args first
    validate_args(&args)?;

    execute_convert(&args)?;

    Ok(())
}
