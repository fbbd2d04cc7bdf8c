/// MBC2 selection state.
///
/// RAM enable and ROM bank select share 0x0000–0x3FFF; bit 8 of the
/// address picks the register. The 512×4-bit RAM is built into the
/// controller, so there is no RAM banking.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mbc2 {
    rom_bank: u8,
    ram_enable: bool,
}

impl Mbc2 {
    pub(super) fn new() -> Self {
        Self {
            rom_bank: 1,
            ram_enable: false,
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        if addr >= 0x4000 {
            return;
        }

        if addr & 0x0100 == 0 {
            self.ram_enable = value & 0x0A != 0;
            log::debug!("MBC2 RAM enable = {}", self.ram_enable);
        } else {
            self.rom_bank = value & 0x0F;
            if self.rom_bank == 0 {
                self.rom_bank = 1;
            }
            log::debug!("MBC2 ROM bank = {}", self.rom_bank);
        }
    }

    pub(super) fn rom_bank(&self) -> usize {
        self.rom_bank as usize
    }

    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enable
    }
}
