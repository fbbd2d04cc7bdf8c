use thiserror::Error;

/// Failure to turn raw bytes into an [`Instruction`](crate::cpu::Instruction).
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum DecodeError {
    /// The byte is one of the opcode holes that hard-lock real hardware.
    #[error("no such instruction: opcode 0x{0:02X}")]
    IllegalOpcode(u8),
    #[error("instruction needs {needed} bytes but only {available} are available")]
    Truncated { needed: usize, available: usize },
    #[error("cannot decode an empty byte sequence")]
    Empty,
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum EncodeError {
    #[error("instruction `{0}` has no hardware encoding")]
    Unencodable(String),
}

/// Terminal conditions reported by [`Cpu::step`](crate::cpu::Cpu::step).
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum CpuError {
    /// The program executed an opcode hole. On hardware the CPU stops
    /// responding until power-off; we keep it locked the same way.
    #[error("illegal opcode 0x{opcode:02X} at PC=0x{pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },
    #[error("CPU is locked after an illegal opcode (PC=0x{pc:04X})")]
    Locked { pc: u16 },
}

/// Malformed cartridge input. These are recoverable and surface to the
/// loader instead of aborting.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CartridgeError {
    #[error("cartridge image is {len} bytes, too short to hold a header")]
    TooShort { len: usize },
    #[error("unsupported cartridge hardware type 0x{0:02X}")]
    UnsupportedHardware(u8),
    #[error("invalid ROM size code 0x{0:02X}")]
    InvalidRomSize(u8),
    #[error("invalid RAM size code 0x{0:02X}")]
    InvalidRamSize(u8),
    #[error("header declares {expected_banks} ROM banks but the image has {found_bytes} bytes")]
    Truncated {
        expected_banks: usize,
        found_bytes: usize,
    },
    #[error("memory needs at least one ROM bank")]
    NoRomBanks,
}
