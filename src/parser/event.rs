//! Trace event types.
//!
//! Every record in an mGBA trace starts with a one-byte opcode.
//! Only edge events carry a defined payload in this trace version.

use crate::utils::config::PC_OFFSET;

/// Opcode prefix of a trace record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TraceOpcode {
    Edge = 0,
    Read = 1,
    Write = 2,
}

impl TryFrom<u8> for TraceOpcode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TraceOpcode::Edge),
            1 => Ok(TraceOpcode::Read),
            2 => Ok(TraceOpcode::Write),
            other => Err(other),
        }
    }
}

/// Kind of control-flow transfer recorded by an edge
///
/// **Public** - part of the edge identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeType {
    Branch,
    Call,
    /// Type byte the tracer emitted that we have no name for; kept verbatim
    Unknown(u8),
}

impl EdgeType {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => EdgeType::Branch,
            1 => EdgeType::Call,
            other => EdgeType::Unknown(other),
        }
    }

    /// Integer stored in the `type` column
    pub fn as_raw(self) -> u8 {
        match self {
            EdgeType::Branch => 0,
            EdgeType::Call => 1,
            EdgeType::Unknown(raw) => raw,
        }
    }

    pub fn is_call(self) -> bool {
        self == EdgeType::Call
    }
}

/// A decoded edge record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Branch source, already corrected by `PC_OFFSET`
    pub source: u32,
    pub target: u32,
    pub edge_type: EdgeType,
}

impl EdgeRecord {
    /// Build a record from the raw little-endian payload
    ///
    /// **Public** - used by the decoder
    pub fn from_payload(payload: &[u8; 9]) -> Self {
        let raw_source = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
        let target = u32::from_le_bytes([payload[4], payload[5], payload[6], payload[7]]);

        Self {
            source: raw_source.wrapping_sub(PC_OFFSET),
            target,
            edge_type: EdgeType::from_raw(payload[8]),
        }
    }
}

/// One event read from the trace stream
///
/// `Read` and `Write` are reserved by the tracer; their payload layout is
/// not defined yet, so the decoder never produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    Edge(EdgeRecord),
    Read,
    Write,
}
