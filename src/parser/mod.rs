//! Binary trace parsing.
//!
//! This module handles:
//! - Reading opcode-prefixed records from an mGBA trace
//! - Decoding edge events
//! - Rejecting reserved and undefined opcodes

pub mod decoder;
pub mod event;

// Re-export main types
pub use decoder::{decode, decode_file, TraceDecoder};
pub use event::{EdgeRecord, EdgeType, TraceEvent, TraceOpcode};
