//! Summary counters for a decoded trace.

use super::trace_aggregate::TraceAggregate;
use serde::{Deserialize, Serialize};

/// The four counters reported in verbose mode
///
/// **Public** - returned by the convert command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStats {
    pub event_count: u64,
    pub unique_edges: usize,
    pub unique_blocks: usize,
    pub functions_called: usize,
}

impl TraceStats {
    pub fn from_aggregate(aggregate: &TraceAggregate) -> Self {
        Self {
            event_count: aggregate.event_count,
            unique_edges: aggregate.edges.len(),
            unique_blocks: aggregate.blocks.len(),
            functions_called: aggregate.functions.len(),
        }
    }

    /// Fixed-label text block, one counter per line
    pub fn render(&self) -> String {
        format!(
            "Event count         : {}\n\
             Unique edges        : {}\n\
             Unique basic blocks : {}\n\
             Functions called    : {}",
            self.event_count, self.unique_edges, self.unique_blocks, self.functions_called
        )
    }

    /// One-line form for logging
    pub fn summary(&self) -> String {
        format!(
            "Events: {} | Edges: {} | Blocks: {} | Functions: {}",
            self.event_count, self.unique_edges, self.unique_blocks, self.functions_called
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::event::{EdgeRecord, EdgeType};

    #[test]
    fn test_render_labels() {
        let stats = TraceStats {
            event_count: 12,
            unique_edges: 5,
            unique_blocks: 4,
            functions_called: 1,
        };

        let text = stats.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Event count         : 12",
                "Unique edges        : 5",
                "Unique basic blocks : 4",
                "Functions called    : 1",
            ]
        );
    }

    #[test]
    fn test_from_aggregate() {
        let mut aggregate = TraceAggregate::new();
        for _ in 0..3 {
            aggregate.record_edge(EdgeRecord {
                source: 0x100,
                target: 0x200,
                edge_type: EdgeType::Call,
            });
        }

        let stats = TraceStats::from_aggregate(&aggregate);
        assert_eq!(stats.event_count, 3);
        assert_eq!(stats.unique_edges, 1);
        assert_eq!(stats.unique_blocks, 1);
        assert_eq!(stats.functions_called, 1);
    }
}
