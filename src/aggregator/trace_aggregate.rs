//! In-memory control-flow aggregate built while decoding.
//!
//! Ordered containers keep iteration deterministic, so both output
//! schemas produce the same rows for the same trace.

use crate::parser::event::{EdgeRecord, EdgeType};
use std::collections::{BTreeMap, BTreeSet};

/// A deduplicated control-flow edge
///
/// Identity is the full tuple, so a branch and a call between the same
/// two addresses are distinct edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub source: u32,
    pub target: u32,
    pub edge_type: EdgeType,
}

impl From<EdgeRecord> for Edge {
    fn from(record: EdgeRecord) -> Self {
        Self {
            source: record.source,
            target: record.target,
            edge_type: record.edge_type,
        }
    }
}

/// Everything the decoder learned from a trace
///
/// **Public** - handed by value to the schema writers, which only read it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceAggregate {
    /// Basic block address -> number of edges that targeted it
    pub blocks: BTreeMap<u32, u64>,

    /// Targets of call edges
    pub functions: BTreeSet<u32>,

    /// Unique edges
    pub edges: BTreeSet<Edge>,

    /// Edge events parsed, duplicates included
    pub event_count: u64,
}

impl TraceAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one edge event into the aggregate
    ///
    /// **Public** - the only mutator; entries are never removed
    pub fn record_edge(&mut self, record: EdgeRecord) {
        if record.edge_type.is_call() {
            self.functions.insert(record.target);
        }

        self.edges.insert(Edge::from(record));
        *self.blocks.entry(record.target).or_insert(0) += 1;
        self.event_count += 1;
    }

    /// True when the trace held no events
    pub fn is_empty(&self) -> bool {
        self.event_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(source: u32, target: u32, edge_type: EdgeType) -> EdgeRecord {
        EdgeRecord {
            source,
            target,
            edge_type,
        }
    }

    #[test]
    fn test_record_edge_dedups_but_counts() {
        let mut aggregate = TraceAggregate::new();
        aggregate.record_edge(record(0x10, 0x20, EdgeType::Branch));
        aggregate.record_edge(record(0x10, 0x20, EdgeType::Branch));
        aggregate.record_edge(record(0x30, 0x20, EdgeType::Branch));

        assert_eq!(aggregate.event_count, 3);
        assert_eq!(aggregate.edges.len(), 2);
        assert_eq!(aggregate.blocks.get(&0x20), Some(&3));
        assert!(aggregate.functions.is_empty());
    }

    #[test]
    fn test_edge_type_is_part_of_identity() {
        let mut aggregate = TraceAggregate::new();
        aggregate.record_edge(record(0x10, 0x20, EdgeType::Branch));
        aggregate.record_edge(record(0x10, 0x20, EdgeType::Call));

        assert_eq!(aggregate.edges.len(), 2);
        assert_eq!(aggregate.functions.len(), 1);
        assert!(aggregate.functions.contains(&0x20));
    }

    #[test]
    fn test_unknown_edge_type_is_not_a_function() {
        let mut aggregate = TraceAggregate::new();
        aggregate.record_edge(record(0x10, 0x20, EdgeType::Unknown(5)));

        assert!(aggregate.functions.is_empty());
        assert_eq!(aggregate.blocks.get(&0x20), Some(&1));
    }

    #[test]
    fn test_empty_aggregate() {
        let aggregate = TraceAggregate::new();
        assert!(aggregate.is_empty());
        assert!(aggregate.blocks.is_empty());
    }
}
