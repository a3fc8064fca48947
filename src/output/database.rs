//! Output database file handling.
//!
//! Builds the database in a staging file beside the target, then renames
//! it into place.

use super::schema::{materialize, SchemaMode};
use crate::aggregator::TraceAggregate;
use crate::utils::error::DbError;
use log::{debug, info, warn};
use rusqlite::Connection;
use std::path::Path;

/// Write an aggregate to a new database file
///
/// **Public** - main entry point for database output
///
/// The database is built in a temporary file next to `output_path` and
/// renamed over it only once fully committed. On failure the temporary
/// file is removed and any existing file at `output_path` is left as it was.
///
/// # Errors
/// * `DbError::InvalidPath` - path is empty or a directory
/// * `DbError::Io` - parent directory, temporary file or rename failed
/// * `DbError::Sqlite` - open, schema or insert failure
pub fn write_database(
    output_path: impl AsRef<Path>,
    aggregate: &TraceAggregate,
    mode: SchemaMode,
) -> Result<(), DbError> {
    let output_path = output_path.as_ref();

    info!("Writing database to: {}", output_path.display());

    validate_path(output_path)?;

    let parent = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.exists() {
        debug!("Creating parent directories: {}", parent.display());
        std::fs::create_dir_all(parent)?;
    }

    // Dropped (and deleted) on every early return
    let staging = tempfile::Builder::new()
        .prefix(".mgba-trace-")
        .suffix(".db")
        .tempfile_in(parent)?;
    debug!("Staging database at: {}", staging.path().display());

    if let Err(e) = populate(staging.path(), aggregate, mode) {
        warn!("Discarding incomplete database: {}", staging.path().display());
        return Err(e);
    }

    staging
        .persist(output_path)
        .map_err(|e| DbError::Io(e.error))?;

    Ok(())
}

/// Open, fill and close the connection
///
/// **Private** - the connection is closed on every path
fn populate(path: &Path, aggregate: &TraceAggregate, mode: SchemaMode) -> Result<(), DbError> {
    let mut conn = Connection::open(path)?;
    let written = materialize(&mut conn, aggregate, mode);
    let closed = conn.close().map_err(|(_, e)| DbError::Sqlite(e));
    written.and(closed)
}

/// Validate that the output path is usable
///
/// **Public** - also used by argument validation
pub fn validate_path(path: &Path) -> Result<(), DbError> {
    if path.as_os_str().is_empty() {
        return Err(DbError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(DbError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
