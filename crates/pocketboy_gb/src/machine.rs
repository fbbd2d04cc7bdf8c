mod cartridge;
mod gameboy;
mod mbc;
mod memory;

pub use cartridge::{Cartridge, CartridgeHeader, Hardware};
pub use gameboy::{GameBoy, RunOutcome, StopReason};
pub use mbc::{ControllerType, Mbc1, Mbc2, Mbc3, Mbc5, MemoryBankController};
pub use memory::{Memory, RamBank, RomBank};

#[cfg(test)]
mod tests;
