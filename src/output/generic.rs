//! Generic control-flow schema.
//!
//! Tables:
//! - `edges(source, target, type)`, indexed on both ends
//! - `basic_blocks(address PRIMARY KEY, hitcount)`
//! - `functions(address PRIMARY KEY)`

use super::schema::SchemaWriter;
use crate::aggregator::TraceAggregate;
use crate::utils::error::DbError;
use log::debug;
use rusqlite::{params, Connection};

const CREATE_TABLES: &str = "
    CREATE TABLE edges (source INTEGER NOT NULL, target INTEGER NOT NULL, type INTEGER NOT NULL);
    CREATE INDEX xrefs_to ON edges(target);
    CREATE INDEX xrefs_from ON edges(source);
    CREATE TABLE basic_blocks (address INTEGER NOT NULL PRIMARY KEY, hitcount INTEGER NOT NULL);
    CREATE TABLE functions (address INTEGER NOT NULL PRIMARY KEY);
";

/// Writer for the generic layout
pub struct GenericSchema;

impl SchemaWriter for GenericSchema {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn create_tables(&self, conn: &Connection) -> Result<(), DbError> {
        conn.execute_batch(CREATE_TABLES)?;
        Ok(())
    }

    // Functions, then blocks, then edges. Plain INSERT so a duplicate key
    // is a constraint error instead of an overwrite.
    fn write_rows(&self, conn: &Connection, aggregate: &TraceAggregate) -> Result<(), DbError> {
        let mut insert_function = conn.prepare_cached("INSERT INTO functions VALUES (?1)")?;
        for address in &aggregate.functions {
            insert_function.execute(params![address])?;
        }

        let mut insert_block = conn.prepare_cached("INSERT INTO basic_blocks VALUES (?1, ?2)")?;
        for (address, hitcount) in &aggregate.blocks {
            insert_block.execute(params![address, hitcount])?;
        }

        let mut insert_edge = conn.prepare_cached("INSERT INTO edges VALUES (?1, ?2, ?3)")?;
        for edge in &aggregate.edges {
            insert_edge.execute(params![edge.source, edge.target, edge.edge_type.as_raw()])?;
        }

        debug!(
            "Inserted {} functions, {} basic blocks, {} edges",
            aggregate.functions.len(),
            aggregate.blocks.len(),
            aggregate.edges.len()
        );
        Ok(())
    }
}
