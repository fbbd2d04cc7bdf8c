/// MBC1 selection state.
///
/// ROM banking uses the 5-bit bank register plus a shared 2-bit
/// secondary register. The banking mode decides whether that secondary
/// register supplies ROM bank bits 5–6 or the RAM bank index.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Mbc1 {
    rom_bank_low5: u8,
    secondary: u8,
    ram_enable: bool,
    advanced_mode: bool,
}

impl Mbc1 {
    pub(super) fn new() -> Self {
        Self {
            rom_bank_low5: 1, // bank 1 by default
            ..Self::default()
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                self.ram_enable = value & 0x0A != 0;
                log::debug!("MBC1 RAM enable = {}", self.ram_enable);
            }
            0x2000..=0x3FFF => {
                self.rom_bank_low5 = value & 0x1F;
                if self.rom_bank_low5 == 0 {
                    self.rom_bank_low5 = 1;
                }
                log::debug!("MBC1 ROM bank low bits = {:#04X}", self.rom_bank_low5);
            }
            0x4000..=0x5FFF => {
                self.secondary = value & 0x03;
                log::debug!("MBC1 secondary bank register = {}", self.secondary);
            }
            0x6000..=0x7FFF => {
                self.advanced_mode = value & 0x01 != 0;
                log::debug!("MBC1 advanced banking mode = {}", self.advanced_mode);
            }
            _ => {}
        }
    }

    pub(super) fn rom_bank(&self) -> usize {
        let high = if self.advanced_mode { 0 } else { self.secondary };
        (self.rom_bank_low5 as usize) | ((high as usize) << 5)
    }

    pub(super) fn ram_bank(&self) -> usize {
        if self.advanced_mode {
            self.secondary as usize
        } else {
            0
        }
    }

    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enable
    }
}
