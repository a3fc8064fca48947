//! wakare-compatible schema.
//!
//! wakare expects a `mappings` row describing the ROM region and per-block
//! hit counts. `branches` is created for it but left empty.

use super::schema::SchemaWriter;
use crate::aggregator::TraceAggregate;
use crate::utils::config::{ROM_END, ROM_MAPPING_NAME, ROM_START};
use crate::utils::error::DbError;
use log::debug;
use rusqlite::{params, Connection};

const CREATE_TABLES: &str = "
    CREATE TABLE branches (step INTEGER NOT NULL PRIMARY KEY, type INTEGER, source INTEGER, destination INTEGER);
    CREATE TABLE mappings (id INTEGER NOT NULL PRIMARY KEY, filename TEXT, start INTEGER, end INTEGER);
    CREATE TABLE hitcounts (id INTEGER NOT NULL PRIMARY KEY, address INTEGER, hitcount INTEGER);
";

/// Writer for the wakare layout
pub struct CompatSchema;

impl SchemaWriter for CompatSchema {
    fn name(&self) -> &'static str {
        "wakare"
    }

    fn create_tables(&self, conn: &Connection) -> Result<(), DbError> {
        conn.execute_batch(CREATE_TABLES)?;
        Ok(())
    }

    fn write_rows(&self, conn: &Connection, aggregate: &TraceAggregate) -> Result<(), DbError> {
        conn.execute(
            "INSERT INTO mappings (id, filename, start, end) VALUES (?1, ?2, ?3, ?4)",
            params![0, ROM_MAPPING_NAME, ROM_START, ROM_END],
        )?;

        // Blocks below ROM are BIOS artifacts picked up by the tracer
        let rom_blocks = aggregate
            .blocks
            .iter()
            .filter(|(address, _)| **address >= ROM_START);

        let mut insert_hitcount = conn.prepare_cached(
            "INSERT INTO hitcounts (id, address, hitcount) VALUES (?1, ?2, ?3)",
        )?;
        // Numbered over written rows only, so ids stay gap-free after the ROM filter
        let mut written = 0u64;
        for (address, hitcount) in rom_blocks {
            insert_hitcount.execute(params![written, address, hitcount])?;
            written += 1;
        }

        debug!(
            "Inserted {} hitcounts, skipped {} blocks outside ROM",
            written,
            aggregate.blocks.len() as u64 - written
        );
        Ok(())
    }
}
