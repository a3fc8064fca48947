//! Streaming decoder for mGBA binary traces.
//!
//! A trace is a headerless sequence of `opcode:u8, payload` records in
//! little-endian order. The stream may only end on a record boundary.

use super::event::{EdgeRecord, TraceEvent, TraceOpcode};
use crate::aggregator::TraceAggregate;
use crate::utils::config::EDGE_PAYLOAD_LEN;
use crate::utils::error::DecodeError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Pull-based reader of trace events
///
/// **Public** - lets callers walk events without aggregating them
pub struct TraceDecoder<R> {
    reader: R,
    offset: u64,
    finished: bool,
}

impl<R: Read> TraceDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            finished: false,
        }
    }

    /// Number of bytes consumed so far
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next event
    ///
    /// Returns `Ok(None)` only when the stream ends exactly before an opcode.
    ///
    /// # Errors
    /// * `DecodeError::TruncatedEdgeRecord` - stream ended inside an edge payload
    /// * `DecodeError::UnsupportedOpcode` - reserved or undefined opcode
    /// * `DecodeError::Io` - underlying read failure
    pub fn next_event(&mut self) -> Result<Option<TraceEvent>, DecodeError> {
        let record_offset = self.offset;

        let mut opcode = [0u8; 1];
        if self.fill(&mut opcode)? == 0 {
            return Ok(None);
        }

        match TraceOpcode::try_from(opcode[0]) {
            Ok(TraceOpcode::Edge) => {
                let mut payload = [0u8; EDGE_PAYLOAD_LEN];
                let available = self.fill(&mut payload)?;
                if available != EDGE_PAYLOAD_LEN {
                    return Err(DecodeError::TruncatedEdgeRecord {
                        offset: record_offset,
                        available,
                    });
                }
                Ok(Some(TraceEvent::Edge(EdgeRecord::from_payload(&payload))))
            }
            // Memory access events are not logged by this tracer version
            Ok(TraceOpcode::Read) | Ok(TraceOpcode::Write) | Err(_) => {
                Err(DecodeError::UnsupportedOpcode {
                    opcode: opcode[0],
                    offset: record_offset,
                })
            }
        }
    }

    /// Fill `buf` as far as the stream allows, returning the byte count
    ///
    /// **Private** - a short count means end of stream
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(DecodeError::Io(e)),
            }
        }
        self.offset += filled as u64;
        Ok(filled)
    }
}

impl<R: Read> Iterator for TraceDecoder<R> {
    type Item = Result<TraceEvent, DecodeError>;

    // Stops after end of stream or the first error
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = self.next_event().transpose();
        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }
        item
    }
}

/// Decode a whole trace stream into an aggregate
///
/// **Public** - main entry point for decoding
///
/// Either the complete aggregate is returned or an error; a partially
/// filled aggregate never escapes.
pub fn decode<R: Read>(reader: R) -> Result<TraceAggregate, DecodeError> {
    let mut decoder = TraceDecoder::new(reader);
    let mut aggregate = TraceAggregate::new();

    while let Some(event) = decoder.next_event()? {
        if let TraceEvent::Edge(edge) = event {
            aggregate.record_edge(edge);
        }
    }

    debug!(
        "Decoded {} events from {} bytes",
        aggregate.event_count,
        decoder.offset()
    );

    Ok(aggregate)
}

/// Open and decode a trace file
///
/// **Public** - used by the convert command
///
/// The file handle is closed when this returns, on success or failure.
pub fn decode_file(path: impl AsRef<Path>) -> Result<TraceAggregate, DecodeError> {
    let path = path.as_ref();
    info!("Reading trace: {}", path.display());

    let file = File::open(path)?;
    decode(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::event::EdgeType;

    fn edge_bytes(source: u32, target: u32, edge_type: u8) -> Vec<u8> {
        let mut bytes = vec![0u8];
        bytes.extend_from_slice(&source.to_le_bytes());
        bytes.extend_from_slice(&target.to_le_bytes());
        bytes.push(edge_type);
        bytes
    }

    #[test]
    fn test_next_event_sequence() {
        let mut bytes = edge_bytes(0x104, 0x200, 0);
        bytes.extend(edge_bytes(0x204, 0x300, 1));

        let mut decoder = TraceDecoder::new(bytes.as_slice());
        let first = decoder.next_event().unwrap().unwrap();
        assert_eq!(
            first,
            TraceEvent::Edge(EdgeRecord {
                source: 0x100,
                target: 0x200,
                edge_type: EdgeType::Branch,
            })
        );
        assert_eq!(decoder.offset(), 10);

        let second = decoder.next_event().unwrap().unwrap();
        assert!(matches!(second, TraceEvent::Edge(e) if e.edge_type == EdgeType::Call));
        assert!(decoder.next_event().unwrap().is_none());
        assert_eq!(decoder.offset(), 20);
    }

    #[test]
    fn test_truncation_reports_available_bytes() {
        let mut bytes = edge_bytes(0x104, 0x200, 0);
        bytes.extend_from_slice(&[0, 1, 2, 3]);

        let err = decode(bytes.as_slice()).unwrap_err();
        match err {
            DecodeError::TruncatedEdgeRecord { offset, available } => {
                assert_eq!(offset, 10);
                assert_eq!(available, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_opcode_offset() {
        let mut bytes = edge_bytes(0x104, 0x200, 0);
        bytes.push(2);

        let err = decode(bytes.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnsupportedOpcode { opcode: 2, offset: 10 }
        ));
    }

    #[test]
    fn test_iterator_collects_events() {
        let bytes = [edge_bytes(8, 16, 0), edge_bytes(8, 16, 0)].concat();
        let events: Result<Vec<_>, _> = TraceDecoder::new(bytes.as_slice()).collect();
        assert_eq!(events.unwrap().len(), 2);
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let bytes = [edge_bytes(8, 16, 0), vec![0xff], edge_bytes(8, 16, 0)].concat();
        let mut decoder = TraceDecoder::new(bytes.as_slice());
        assert!(matches!(decoder.next(), Some(Ok(_))));
        assert!(matches!(decoder.next(), Some(Err(_))));
        assert!(decoder.next().is_none());
    }

    /// Reader that fails with `Interrupted` before every chunk it hands out
    struct InterruptingReader {
        chunks: Vec<Vec<u8>>,
        interrupt_next: bool,
    }

    impl Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.chunks.is_empty() {
                return Ok(0);
            }
            if self.interrupt_next {
                self.interrupt_next = false;
                return Err(std::io::Error::new(ErrorKind::Interrupted, "signal"));
            }
            self.interrupt_next = true;
            let chunk = self.chunks.remove(0);
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_interrupted_reads_are_retried() {
        let bytes = edge_bytes(0x0800_0014, 0x0800_0020, 1);
        // Split the record across the opcode and the middle of the payload
        let reader = InterruptingReader {
            chunks: vec![bytes[..1].to_vec(), bytes[1..5].to_vec(), bytes[5..].to_vec()],
            interrupt_next: true,
        };

        let aggregate = decode(reader).unwrap();
        assert_eq!(aggregate.event_count, 1);
        assert_eq!(aggregate.blocks.get(&0x0800_0020), Some(&1));
        assert!(aggregate.functions.contains(&0x0800_0020));
    }

    #[test]
    fn test_other_read_errors_propagate() {
        struct FailingReader;

        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(ErrorKind::PermissionDenied, "denied"))
            }
        }

        let err = decode(FailingReader).unwrap_err();
        assert!(matches!(err, DecodeError::Io(e) if e.kind() == ErrorKind::PermissionDenied));
    }

    #[test]
    fn test_decode_file_missing() {
        let err = decode_file("/nonexistent/trace.bin").unwrap_err();
        assert!(matches!(err, DecodeError::Io(_)));
    }
}
