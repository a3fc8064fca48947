//! mGBA Trace DB
//!
//! Converts binary execution traces produced by mGBA's tracing layer
//! into queryable SQLite databases describing control flow: which basic
//! blocks ran and how often, which functions were called, and the
//! branch/call edges between blocks.
//!
//! ## Getting Started
//!
//! ```bash
//! mgba-trace-db trace.bin -o output.db -v
//! mgba-trace-db trace.bin -o wakare.db --wakare
//! ```
//!
//! Library use:
//!
//! ```ignore
//! use mgba_trace_db::output::{write_database, SchemaMode};
//! use mgba_trace_db::parser::decode_file;
//!
//! let aggregate = decode_file("trace.bin")?;
//! write_database("output.db", &aggregate, SchemaMode::Generic)?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
