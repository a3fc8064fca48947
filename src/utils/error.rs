//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while decoding a binary trace
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("I/O error while reading trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected end of trace in edge record at offset {offset:#x} ({available} of 9 payload bytes)")]
    TruncatedEdgeRecord { offset: u64, available: usize },

    #[error("Unsupported opcode: {opcode:#x} at offset {offset:#x}")]
    UnsupportedOpcode { opcode: u8, offset: u64 },
}

/// Errors that can occur while writing the output database
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DbError {
    /// True when SQLite rejected a row because of a constraint (duplicate key etc.)
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DbError::Sqlite(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
