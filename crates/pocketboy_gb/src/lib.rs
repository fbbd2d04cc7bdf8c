pub mod cpu;
mod error;
pub mod machine;

pub use cpu::{Bus, Cpu};
pub use error::{CartridgeError, CpuError, DecodeError, EncodeError};
pub use machine::{Cartridge, ControllerType, GameBoy, Memory, RunOutcome, StopReason};

/// CPU clock of the DMG in T-cycles per second.
pub const CPU_CLOCK_HZ: u32 = 4_194_304;
/// Size of one switchable cartridge ROM bank (16 KiB).
pub const ROM_BANK_SIZE: usize = 0x4000;
/// Size of one switchable cartridge RAM bank (8 KiB).
pub const RAM_BANK_SIZE: usize = 0x2000;
