//! Aggregation of decoded trace events.
//!
//! This module turns a stream of edge events into:
//! - Per-block hit counts
//! - The set of called functions
//! - Deduplicated control-flow edges

pub mod stats;
pub mod trace_aggregate;

// Re-export main types
pub use stats::TraceStats;
pub use trace_aggregate::{Edge, TraceAggregate};
