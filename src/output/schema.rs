//! Schema selection and the shared materialization driver.
//!
//! Both layouts implement `SchemaWriter`; `materialize` runs one of them
//! inside a single transaction that is committed only at the very end.

use super::compat::CompatSchema;
use super::generic::GenericSchema;
use crate::aggregator::TraceAggregate;
use crate::utils::error::DbError;
use log::{debug, info};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Database layout to produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaMode {
    /// edges / basic_blocks / functions
    #[default]
    Generic,
    /// branches / mappings / hitcounts, as read by wakare
    #[serde(rename = "wakare")]
    Compat,
}

impl SchemaMode {
    pub fn from_flag(wakare: bool) -> Self {
        if wakare {
            SchemaMode::Compat
        } else {
            SchemaMode::Generic
        }
    }

    /// Writer implementing this layout
    pub fn writer(self) -> &'static dyn SchemaWriter {
        match self {
            SchemaMode::Generic => &GenericSchema,
            SchemaMode::Compat => &CompatSchema,
        }
    }
}

impl fmt::Display for SchemaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.writer().name())
    }
}

/// One way of laying out a trace aggregate in SQLite
///
/// **Public** - implemented by `GenericSchema` and `CompatSchema`
pub trait SchemaWriter {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Create every table and index; runs before any insert
    fn create_tables(&self, conn: &Connection) -> Result<(), DbError>;

    /// Insert the aggregate's rows
    fn write_rows(&self, conn: &Connection, aggregate: &TraceAggregate) -> Result<(), DbError>;
}

/// Write an aggregate into `conn` using the selected layout
///
/// **Public** - main entry point for materialization
///
/// # Errors
/// * `DbError::Sqlite` - table creation or insert failed; nothing is committed
pub fn materialize(
    conn: &mut Connection,
    aggregate: &TraceAggregate,
    mode: SchemaMode,
) -> Result<(), DbError> {
    let writer = mode.writer();
    info!("Writing {} schema", writer.name());

    // Dropping the transaction on an early return rolls it back
    let tx = conn.transaction()?;
    writer.create_tables(&tx)?;
    writer.write_rows(&tx, aggregate)?;
    tx.commit()?;

    debug!("Committed {} schema", writer.name());
    Ok(())
}

/// Write the generic edges / basic_blocks / functions layout
pub fn write_generic_schema(
    conn: &mut Connection,
    aggregate: &TraceAggregate,
) -> Result<(), DbError> {
    materialize(conn, aggregate, SchemaMode::Generic)
}

/// Write the wakare-compatible branches / mappings / hitcounts layout
pub fn write_compat_schema(
    conn: &mut Connection,
    aggregate: &TraceAggregate,
) -> Result<(), DbError> {
    materialize(conn, aggregate, SchemaMode::Compat)
}
