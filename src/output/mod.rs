//! Output writers for trace databases and run reports.
//!
//! This module handles:
//! - The generic and wakare-compatible SQLite layouts
//! - Database file lifecycle
//! - JSON run reports

pub mod compat;
pub mod database;
pub mod generic;
pub mod json;
pub mod schema;

// Re-export main types and functions
pub use compat::CompatSchema;
pub use database::{validate_path, write_database};
pub use generic::GenericSchema;
pub use json::{read_report, write_report, TraceReport};
pub use schema::{materialize, write_compat_schema, write_generic_schema, SchemaMode, SchemaWriter};
