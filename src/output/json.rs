//! JSON run report writer.
//!
//! Records what a conversion produced, for scripts that post-process
//! trace databases.

use super::schema::SchemaMode;
use crate::aggregator::TraceStats;
use crate::utils::config::REPORT_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Summary of one conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceReport {
    pub version: String,
    pub input: String,
    pub output: String,
    pub schema: SchemaMode,
    pub stats: TraceStats,
    /// RFC 3339 timestamp
    pub generated_at: String,
}

impl TraceReport {
    pub fn new(input: &Path, output: &Path, schema: SchemaMode, stats: TraceStats) -> Self {
        use chrono::Utc;

        Self {
            version: REPORT_SCHEMA_VERSION.to_string(),
            input: input.display().to_string(),
            output: output.display().to_string(),
            schema,
            stats,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Write a report as pretty-printed JSON
///
/// **Public** - used by the convert command
///
/// # Errors
/// * `OutputError::InvalidPath` - path is empty or a directory
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
pub fn write_report(report: &TraceReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    if output_path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }
    if output_path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            output_path.display()
        )));
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }

    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;

    Ok(())
}

/// Read a report back from disk
///
/// **Public** - useful for tests and tooling
pub fn read_report(input_path: impl AsRef<Path>) -> Result<TraceReport, OutputError> {
    let file = File::open(input_path.as_ref())?;
    let report = serde_json::from_reader(BufReader::new(file))?;
    Ok(report)
}
