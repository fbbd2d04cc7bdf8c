/// MBC5 selection state.
///
/// MBC5 supports up to 512 ROM banks (9-bit bank number) and up to 16 RAM
/// banks (4-bit bank number). Rumble carts reuse bit 3 of the RAM bank
/// register for the motor; the motor itself is not modelled.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mbc5 {
    rom_bank_low8: u8,
    rom_bank_high1: u8,
    ram_bank: u8,
    ram_enable: bool,
}

impl Mbc5 {
    pub(super) fn new() -> Self {
        Self {
            rom_bank_low8: 1,
            rom_bank_high1: 0,
            ram_bank: 0,
            ram_enable: false,
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                self.ram_enable = (value & 0x0F) == 0x0A;
                log::debug!("MBC5 RAM enable = {}", self.ram_enable);
            }
            0x2000..=0x2FFF => {
                self.rom_bank_low8 = value;
                log::debug!("MBC5 ROM bank = {}", self.rom_bank());
            }
            0x3000..=0x3FFF => {
                self.rom_bank_high1 = value & 0x01;
                log::debug!("MBC5 ROM bank = {}", self.rom_bank());
            }
            0x4000..=0x5FFF => {
                self.ram_bank = value & 0x0F;
                log::debug!("MBC5 RAM bank = {}", self.ram_bank);
            }
            _ => {}
        }
    }

    /// 9-bit bank number. Bank 0 never appears in the switchable window.
    pub(super) fn rom_bank(&self) -> usize {
        let bank = ((self.rom_bank_high1 as usize) << 8) | (self.rom_bank_low8 as usize);
        bank.max(1)
    }

    pub(super) fn ram_bank(&self) -> usize {
        self.ram_bank as usize
    }

    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enable
    }
}
