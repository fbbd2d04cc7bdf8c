use super::mbc::{ControllerType, MemoryBankController, RamTarget};
use crate::cpu::Bus;
use crate::error::CartridgeError;
use crate::{RAM_BANK_SIZE, ROM_BANK_SIZE};

pub type RomBank = Box<[u8; ROM_BANK_SIZE]>;
pub type RamBank = Box<[u8; RAM_BANK_SIZE]>;

const VRAM_SIZE: usize = 0x2000;
const WRAM_SIZE: usize = 0x2000;
const OAM_SIZE: usize = 0xA0;
const IO_SIZE: usize = 0x80;
const HRAM_SIZE: usize = 0x7F;

/// MBC2 RAM is 512 half-bytes, mirrored across the whole window.
const MBC2_RAM_MASK: u16 = 0x01FF;

/// The DMG address space.
///
/// Cartridge ROM and RAM are banked through the controller. The other
/// regions are plain storage: their peripherals are not emulated, but
/// programs still expect to be able to use them as memory.
pub struct Memory {
    rom_banks: Vec<RomBank>,
    ram_banks: Vec<RamBank>,
    controller: MemoryBankController,
    vram: Box<[u8; VRAM_SIZE]>,
    wram: Box<[u8; WRAM_SIZE]>,
    oam: [u8; OAM_SIZE],
    io: [u8; IO_SIZE],
    hram: [u8; HRAM_SIZE],
    interrupt_enable: u8,
}

impl Memory {
    /// Build the bus from cartridge ROM banks, a RAM bank count and the
    /// controller the cartridge declares.
    pub fn new(
        rom_banks: Vec<RomBank>,
        ram_bank_count: usize,
        controller_type: ControllerType,
    ) -> Result<Self, CartridgeError> {
        if rom_banks.is_empty() {
            return Err(CartridgeError::NoRomBanks);
        }

        let controller = MemoryBankController::select(controller_type);
        let ram_bank_count = ram_bank_count.max(controller.min_ram_banks());
        let ram_banks = (0..ram_bank_count)
            .map(|_| Box::new([0u8; RAM_BANK_SIZE]))
            .collect();

        Ok(Self {
            rom_banks,
            ram_banks,
            controller,
            vram: Box::new([0; VRAM_SIZE]),
            wram: Box::new([0; WRAM_SIZE]),
            oam: [0; OAM_SIZE],
            io: [0; IO_SIZE],
            hram: [0; HRAM_SIZE],
            interrupt_enable: 0,
        })
    }

    pub fn controller(&self) -> &MemoryBankController {
        &self.controller
    }

    pub fn rom_bank_count(&self) -> usize {
        self.rom_banks.len()
    }

    pub fn ram_bank_count(&self) -> usize {
        self.ram_banks.len()
    }

    /// ROM bank currently visible at 0x4000–0x7FFF, after wrapping.
    pub fn mapped_rom_bank(&self) -> usize {
        self.controller.selected_rom_bank() % self.rom_banks.len()
    }

    /// Wrap a controller-reported RAM bank to what is allocated.
    fn ram_bank_index(&self, bank: usize) -> Option<usize> {
        if self.ram_banks.is_empty() {
            None
        } else {
            Some(bank % self.ram_banks.len())
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => self.rom_banks[0][addr as usize],
            0x4000..=0x7FFF => self.rom_banks[self.mapped_rom_bank()][(addr - 0x4000) as usize],
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize],
            0xA000..=0xBFFF => self.read_external_ram(addr - 0xA000),
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],
            // Echo RAM mirrors work RAM.
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize],
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize],
            0xFEA0..=0xFEFF => 0,
            0xFF00..=0xFF7F => self.io[(addr - 0xFF00) as usize],
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            0xFFFF => self.interrupt_enable,
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => self.controller.write(addr, value),
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize] = value,
            0xA000..=0xBFFF => self.write_external_ram(addr - 0xA000, value),
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize] = value,
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize] = value,
            0xFEA0..=0xFEFF => {}
            0xFF00..=0xFF7F => self.io[(addr - 0xFF00) as usize] = value,
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            0xFFFF => self.interrupt_enable = value,
        }
    }

    fn read_external_ram(&self, offset: u16) -> u8 {
        match self.controller.ram_target() {
            RamTarget::Disabled => 0,
            RamTarget::Bank(bank) => match self.ram_bank_index(bank) {
                Some(index) => self.ram_banks[index][offset as usize],
                None => 0xFF,
            },
            // Only the low nibble exists; the upper bits float high.
            RamTarget::Nibbles => self.ram_banks[0][(offset & MBC2_RAM_MASK) as usize] | 0xF0,
            RamTarget::Clock(register) => self.controller.read_clock(register),
        }
    }

    fn write_external_ram(&mut self, offset: u16, value: u8) {
        match self.controller.ram_target() {
            RamTarget::Disabled => {}
            RamTarget::Bank(bank) => {
                if let Some(index) = self.ram_bank_index(bank) {
                    self.ram_banks[index][offset as usize] = value;
                }
            }
            RamTarget::Nibbles => {
                self.ram_banks[0][(offset & MBC2_RAM_MASK) as usize] = value & 0x0F;
            }
            RamTarget::Clock(register) => self.controller.write_clock(register, value),
        }
    }
}

impl Bus for Memory {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }

    fn tick(&mut self, cycles: u32) {
        self.controller.tick(cycles);
    }
}
