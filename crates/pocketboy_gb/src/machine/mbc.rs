mod mbc1;
mod mbc2;
mod mbc3;
mod mbc5;

pub use mbc1::Mbc1;
pub use mbc2::Mbc2;
pub use mbc3::Mbc3;
pub use mbc5::Mbc5;

/// Cartridge controller kind, as declared by header byte 0x147.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ControllerType {
    #[default]
    None,
    Mbc1,
    Mbc2,
    Mbc3,
    Mbc5,
}

/// What the external RAM window (0xA000–0xBFFF) currently maps to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RamTarget {
    /// RAM is disabled: reads return 0, writes are dropped.
    Disabled,
    /// An 8 KiB RAM bank, before wrapping to the allocated count.
    Bank(usize),
    /// MBC2's built-in 512×4-bit RAM.
    Nibbles,
    /// An MBC3 clock register.
    Clock(u8),
}

/// Bank-switching state machine of the inserted cartridge.
///
/// Writes below 0x8000 land here as control-register updates; the memory
/// bus asks it which banks are mapped into the switchable windows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MemoryBankController {
    None,
    Mbc1(Mbc1),
    Mbc2(Mbc2),
    Mbc3(Mbc3),
    Mbc5(Mbc5),
}

impl MemoryBankController {
    /// Fresh controller state for a controller type.
    pub fn select(kind: ControllerType) -> Self {
        match kind {
            ControllerType::None => Self::None,
            ControllerType::Mbc1 => Self::Mbc1(Mbc1::new()),
            ControllerType::Mbc2 => Self::Mbc2(Mbc2::new()),
            ControllerType::Mbc3 => Self::Mbc3(Mbc3::new()),
            ControllerType::Mbc5 => Self::Mbc5(Mbc5::new()),
        }
    }

    pub fn kind(&self) -> ControllerType {
        match self {
            Self::None => ControllerType::None,
            Self::Mbc1(_) => ControllerType::Mbc1,
            Self::Mbc2(_) => ControllerType::Mbc2,
            Self::Mbc3(_) => ControllerType::Mbc3,
            Self::Mbc5(_) => ControllerType::Mbc5,
        }
    }

    /// Control-register write from the CPU (address below 0x8000).
    pub fn write(&mut self, addr: u16, value: u8) {
        match self {
            Self::None => log::trace!("ignored ROM write {value:#04X} to {addr:#06X}"),
            Self::Mbc1(m) => m.write(addr, value),
            Self::Mbc2(m) => m.write(addr, value),
            Self::Mbc3(m) => m.write(addr, value),
            Self::Mbc5(m) => m.write(addr, value),
        }
    }

    /// Bank mapped at 0x4000–0x7FFF. Never 0.
    pub fn selected_rom_bank(&self) -> usize {
        match self {
            Self::None => 1,
            Self::Mbc1(m) => m.rom_bank(),
            Self::Mbc2(m) => m.rom_bank(),
            Self::Mbc3(m) => m.rom_bank(),
            Self::Mbc5(m) => m.rom_bank(),
        }
    }

    pub fn selected_ram_bank(&self) -> usize {
        match self {
            Self::None | Self::Mbc2(_) => 0,
            Self::Mbc1(m) => m.ram_bank(),
            Self::Mbc3(m) => m.ram_bank(),
            Self::Mbc5(m) => m.ram_bank(),
        }
    }

    pub fn ram_enabled(&self) -> bool {
        match self {
            Self::None => true,
            Self::Mbc1(m) => m.ram_enabled(),
            Self::Mbc2(m) => m.ram_enabled(),
            Self::Mbc3(m) => m.ram_enabled(),
            Self::Mbc5(m) => m.ram_enabled(),
        }
    }

    /// Minimum RAM banks this controller needs allocated regardless of
    /// what the header declares.
    pub(crate) fn min_ram_banks(&self) -> usize {
        match self {
            Self::Mbc2(_) => 1,
            _ => 0,
        }
    }

    pub(crate) fn ram_target(&self) -> RamTarget {
        if !self.ram_enabled() {
            return RamTarget::Disabled;
        }
        match self {
            Self::Mbc2(_) => RamTarget::Nibbles,
            Self::Mbc3(m) => match m.ram_rtc_select() {
                0x00..=0x03 => RamTarget::Bank(m.ram_bank()),
                register @ 0x08..=0x0C => RamTarget::Clock(register),
                _ => RamTarget::Disabled,
            },
            _ => RamTarget::Bank(self.selected_ram_bank()),
        }
    }

    pub(crate) fn read_clock(&self, register: u8) -> u8 {
        match self {
            Self::Mbc3(m) => m.read_clock(register),
            _ => 0xFF,
        }
    }

    pub(crate) fn write_clock(&mut self, register: u8, value: u8) {
        if let Self::Mbc3(m) = self {
            m.write_clock(register, value);
        }
    }

    /// Advance time-keeping hardware by CPU cycles.
    pub fn tick(&mut self, cycles: u32) {
        if let Self::Mbc3(m) = self {
            m.tick(cycles);
        }
    }
}
