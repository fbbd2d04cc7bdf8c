use crate::CPU_CLOCK_HZ;

/// RTC register numbers as selected through 0x4000–0x5FFF.
pub(crate) const RTC_SECONDS: u8 = 0x08;
pub(crate) const RTC_MINUTES: u8 = 0x09;
pub(crate) const RTC_HOURS: u8 = 0x0A;
pub(crate) const RTC_DAY_LOW: u8 = 0x0B;
pub(crate) const RTC_DAY_HIGH: u8 = 0x0C;

const DAY_HIGH_BIT8: u8 = 0x01;
const DAY_HIGH_HALT: u8 = 0x40;
const DAY_HIGH_CARRY: u8 = 0x80;

/// MBC3 real-time clock.
///
/// Counts from CPU cycles rather than the host clock, so emulated time
/// stays deterministic. Reads go through the latched copy; writes hit the
/// live counters.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Rtc {
    seconds: u8,
    minutes: u8,
    hours: u8,
    /// 9-bit day counter.
    days: u16,
    halted: bool,
    day_carry: bool,
    latched: [u8; 5],
    subsecond_cycles: u32,
}

impl Rtc {
    fn registers(&self) -> [u8; 5] {
        let mut day_high = (self.days >> 8) as u8 & DAY_HIGH_BIT8;
        if self.halted {
            day_high |= DAY_HIGH_HALT;
        }
        if self.day_carry {
            day_high |= DAY_HIGH_CARRY;
        }
        [
            self.seconds,
            self.minutes,
            self.hours,
            self.days as u8,
            day_high,
        ]
    }

    fn latch(&mut self) {
        self.latched = self.registers();
    }

    fn read(&self, register: u8) -> u8 {
        match register {
            RTC_SECONDS..=RTC_DAY_HIGH => self.latched[(register - RTC_SECONDS) as usize],
            _ => 0xFF,
        }
    }

    fn write(&mut self, register: u8, value: u8) {
        match register {
            RTC_SECONDS => {
                self.seconds = value & 0x3F;
                self.subsecond_cycles = 0;
            }
            RTC_MINUTES => self.minutes = value & 0x3F,
            RTC_HOURS => self.hours = value & 0x1F,
            RTC_DAY_LOW => self.days = (self.days & 0x100) | value as u16,
            RTC_DAY_HIGH => {
                self.days = (self.days & 0xFF) | (((value & DAY_HIGH_BIT8) as u16) << 8);
                self.halted = value & DAY_HIGH_HALT != 0;
                self.day_carry = value & DAY_HIGH_CARRY != 0;
            }
            _ => return,
        }
        // Keep the visible copy in step with what was just written.
        let index = (register - RTC_SECONDS) as usize;
        self.latched[index] = self.registers()[index];
    }

    fn tick(&mut self, cycles: u32) {
        if self.halted {
            return;
        }
        self.subsecond_cycles += cycles;
        while self.subsecond_cycles >= CPU_CLOCK_HZ {
            self.subsecond_cycles -= CPU_CLOCK_HZ;
            self.advance_second();
        }
    }

    /// Counters wrap at their register width, so out-of-range values
    /// written by software count up to the overflow like hardware does.
    fn advance_second(&mut self) {
        self.seconds = (self.seconds + 1) & 0x3F;
        if self.seconds != 60 {
            return;
        }
        self.seconds = 0;

        self.minutes = (self.minutes + 1) & 0x3F;
        if self.minutes != 60 {
            return;
        }
        self.minutes = 0;

        self.hours = (self.hours + 1) & 0x1F;
        if self.hours != 24 {
            return;
        }
        self.hours = 0;

        self.days += 1;
        if self.days > 0x1FF {
            self.days = 0;
            self.day_carry = true;
        }
    }
}

/// MBC3 selection state plus its clock.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Mbc3 {
    rom_bank: u8,
    /// RAM bank 0–3 or RTC register 0x08–0x0C.
    ram_rtc_select: u8,
    ram_enable: bool,
    /// Last value written to the latch register; 0x00 then 0x01 latches.
    latch_clock: u8,
    rtc: Rtc,
}

impl Mbc3 {
    pub(super) fn new() -> Self {
        Self {
            rom_bank: 1,
            latch_clock: 0xFF,
            ..Self::default()
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                // RAM / RTC enable.
                self.ram_enable = (value & 0x0F) == 0x0A;
                log::debug!("MBC3 RAM/RTC enable = {}", self.ram_enable);
            }
            0x2000..=0x3FFF => {
                // 7-bit ROM bank number; 0 is remapped to 1.
                self.rom_bank = value & 0x7F;
                if self.rom_bank == 0 {
                    self.rom_bank = 1;
                }
                log::debug!("MBC3 ROM bank = {}", self.rom_bank);
            }
            0x4000..=0x5FFF => {
                self.ram_rtc_select = value;
                log::debug!("MBC3 RAM/RTC select = {value:#04X}");
            }
            0x6000..=0x7FFF => {
                if self.latch_clock == 0x00 && value == 0x01 {
                    self.rtc.latch();
                    log::debug!("MBC3 clock latched");
                }
                self.latch_clock = value;
            }
            _ => {}
        }
    }

    pub(super) fn rom_bank(&self) -> usize {
        self.rom_bank as usize
    }

    /// RAM bank index; 0 while a clock register is selected.
    pub(super) fn ram_bank(&self) -> usize {
        match self.ram_rtc_select {
            bank @ 0x00..=0x03 => bank as usize,
            _ => 0,
        }
    }

    pub(super) fn ram_rtc_select(&self) -> u8 {
        self.ram_rtc_select
    }

    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enable
    }

    pub(super) fn read_clock(&self, register: u8) -> u8 {
        self.rtc.read(register)
    }

    pub(super) fn write_clock(&mut self, register: u8, value: u8) {
        self.rtc.write(register, value);
    }

    pub(super) fn tick(&mut self, cycles: u32) {
        self.rtc.tick(cycles);
    }
}
