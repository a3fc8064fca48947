use crate::output::SchemaMode;
use crate::utils::config::DEFAULT_OUTPUT;
use std::path::PathBuf;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Binary trace to read
    pub input: PathBuf,

    /// Database file to create
    pub output: PathBuf,

    /// Database layout
    pub schema: SchemaMode,

    /// Print trace statistics to stdout
    pub verbose: bool,

    /// Optional JSON run report
    pub report: Option<PathBuf>,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            schema: SchemaMode::Generic,
            verbose: false,
            report: None,
        }
    }
}
