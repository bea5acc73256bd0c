use thiserror::Error;

/// Fatal condition raised by the fetch-execute loop itself, as opposed to a
/// clean halt (MCR bit 15 clearing) or a load failure.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum MachineError {
    #[error("unsupported opcode {opcode:#06b} fetched at pc {pc:#06x}")]
    UnsupportedOpcode { pc: u16, opcode: u8 },
}
