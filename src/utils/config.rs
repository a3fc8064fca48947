//! Configuration and constants for the converter.

/// Default path of the output database
pub const DEFAULT_OUTPUT: &str = "output.db";

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

// The emulator logs the pipelined PC, which runs one instruction (4 bytes)
// ahead of the branching instruction
pub const PC_OFFSET: u32 = 4;

/// Payload size of an edge record: source u32, target u32, type u8
pub const EDGE_PAYLOAD_LEN: usize = 9;

// GBA cartridge ROM region, the only mapping wakare needs
pub const ROM_START: u32 = 0x0800_0000;
pub const ROM_END: u32 = 0x0a00_0000;
pub const ROM_MAPPING_NAME: &str = "ROM";
