//! Convert command implementation.
//!
//! The convert command:
//! 1. Decodes the whole trace into an aggregate
//! 2. Reports trace statistics (verbose only)
//! 3. Writes the database in the selected layout
//! 4. Writes the JSON run report (if requested)
//!
//! Nothing is written until decoding has succeeded.

use super::models::ConvertArgs;
use crate::aggregator::TraceStats;
use crate::output::{validate_path, write_database, write_report, TraceReport};
use crate::parser::decode_file;
use anyhow::{Context, Result};
use log::{info, warn};
use std::time::Instant;

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Statistics of the decoded trace
///
/// # Errors
/// * Trace open/read failures and framing errors
/// * Database creation or insert failures
/// * Report write failures
pub fn execute_convert(args: &ConvertArgs) -> Result<TraceStats> {
    let start_time = Instant::now();

    info!("Step 1/3: Decoding trace...");
    let aggregate = decode_file(&args.input)
        .with_context(|| format!("Failed to decode trace {}", args.input.display()))?;

    if aggregate.is_empty() {
        warn!("Trace {} contains no events", args.input.display());
    }

    let stats = TraceStats::from_aggregate(&aggregate);
    info!("Trace stats: {}", stats.summary());

    if args.verbose {
        println!("{}", stats.render());
    }

    info!("Step 2/3: Writing {} database...", args.schema);
    write_database(&args.output, &aggregate, args.schema)
        .with_context(|| format!("Failed to write database {}", args.output.display()))?;

    info!("✓ Database written to: {}", args.output.display());

    if let Some(report_path) = &args.report {
        info!("Step 3/3: Writing run report...");
        let report = TraceReport::new(&args.input, &args.output, args.schema, stats);
        write_report(&report, report_path).context("Failed to write run report")?;
        info!("✓ Report written to: {}", report_path.display());
    } else {
        info!("Step 3/3: Skipping run report (not requested)");
    }

    let elapsed = start_time.elapsed();
    info!("Conversion completed in {:.2}s", elapsed.as_secs_f64());

    Ok(stats)
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input trace path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input trace not found: {}", args.input.display());
    }

    validate_path(&args.output).context("Invalid output database path")?;

    if args.report.as_deref() == Some(args.output.as_path()) {
        anyhow::bail!("Report path must differ from the output database path");
    }

    Ok(())
}
