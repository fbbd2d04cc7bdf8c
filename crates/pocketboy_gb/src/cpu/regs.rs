use std::fmt;

use bitflags::bitflags;

use super::operand::{Reg16, Reg8};

bitflags! {
    /// Flag bits in the F register.
    ///
    /// Layout (bit index in the byte, from MSB to LSB):
    /// - bit 7: Z (zero)
    /// - bit 6: N (subtract)
    /// - bit 5: H (half carry)
    /// - bit 4: C (carry)
    /// - bits 0–3 are always zero. They have no named flag, so no `Flags`
    ///   value can carry them into F.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Flags: u8 {
        const ZERO = 0b1000_0000;
        const SUBTRACT = 0b0100_0000;
        const HALF_CARRY = 0b0010_0000;
        const CARRY = 0b0001_0000;
    }
}

/// Registers for the Game Boy CPU (LR35902).
///
/// The four general pairs are each stored as a single `u16`; the 8-bit
/// registers are views over the high and low byte of their pair, so a write
/// through either view is immediately visible through the other.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Registers {
    af: u16,
    bc: u16,
    de: u16,
    hl: u16,
    pub sp: u16,
    pub pc: u16,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn high(pair: u16) -> u8 {
    (pair >> 8) as u8
}

#[inline]
fn low(pair: u16) -> u8 {
    pair as u8
}

#[inline]
fn with_high(pair: u16, value: u8) -> u16 {
    (pair & 0x00FF) | ((value as u16) << 8)
}

#[inline]
fn with_low(pair: u16, value: u8) -> u16 {
    (pair & 0xFF00) | value as u16
}

impl Registers {
    /// Register state the DMG boot ROM leaves behind when it hands control
    /// to the cartridge at 0x0100 (values as documented in Pan Docs).
    pub fn new() -> Self {
        Self {
            af: 0x01B0,
            bc: 0x0013,
            de: 0x00D8,
            hl: 0x014D,
            sp: 0xFFFE,
            pc: 0x0100,
        }
    }

    #[inline]
    pub fn a(&self) -> u8 {
        high(self.af)
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.af = with_high(self.af, value);
    }

    #[inline]
    pub fn b(&self) -> u8 {
        high(self.bc)
    }

    #[inline]
    pub fn set_b(&mut self, value: u8) {
        self.bc = with_high(self.bc, value);
    }

    #[inline]
    pub fn c(&self) -> u8 {
        low(self.bc)
    }

    #[inline]
    pub fn set_c(&mut self, value: u8) {
        self.bc = with_low(self.bc, value);
    }

    #[inline]
    pub fn d(&self) -> u8 {
        high(self.de)
    }

    #[inline]
    pub fn set_d(&mut self, value: u8) {
        self.de = with_high(self.de, value);
    }

    #[inline]
    pub fn e(&self) -> u8 {
        low(self.de)
    }

    #[inline]
    pub fn set_e(&mut self, value: u8) {
        self.de = with_low(self.de, value);
    }

    #[inline]
    pub fn h(&self) -> u8 {
        high(self.hl)
    }

    #[inline]
    pub fn set_h(&mut self, value: u8) {
        self.hl = with_high(self.hl, value);
    }

    #[inline]
    pub fn l(&self) -> u8 {
        low(self.hl)
    }

    #[inline]
    pub fn set_l(&mut self, value: u8) {
        self.hl = with_low(self.hl, value);
    }

    #[inline]
    pub fn af(&self) -> u16 {
        self.af
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        // Lower 4 bits of F are always zero.
        self.af = value & 0xFFF0;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        self.bc
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        self.bc = value;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        self.de
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        self.de = value;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.hl
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.hl = value;
    }

    /// Flag view over the low byte of AF.
    #[inline]
    pub fn flags(&self) -> Flags {
        Flags::from_bits_truncate(low(self.af))
    }

    #[inline]
    pub fn set_flags(&mut self, flags: Flags) {
        self.af = with_low(self.af, flags.bits());
    }

    #[inline]
    pub fn flag(&self, flag: Flags) -> bool {
        self.flags().contains(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        let mut flags = self.flags();
        flags.set(flag, value);
        self.set_flags(flags);
    }

    pub fn get8(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::A => self.a(),
            Reg8::B => self.b(),
            Reg8::C => self.c(),
            Reg8::D => self.d(),
            Reg8::E => self.e(),
            Reg8::H => self.h(),
            Reg8::L => self.l(),
        }
    }

    pub fn set8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::A => self.set_a(value),
            Reg8::B => self.set_b(value),
            Reg8::C => self.set_c(value),
            Reg8::D => self.set_d(value),
            Reg8::E => self.set_e(value),
            Reg8::H => self.set_h(value),
            Reg8::L => self.set_l(value),
        }
    }

    pub fn get16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::AF => self.af(),
            Reg16::BC => self.bc(),
            Reg16::DE => self.de(),
            Reg16::HL => self.hl(),
            Reg16::SP => self.sp,
        }
    }

    pub fn set16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::AF => self.set_af(value),
            Reg16::BC => self.set_bc(value),
            Reg16::DE => self.set_de(value),
            Reg16::HL => self.set_hl(value),
            Reg16::SP => self.sp = value,
        }
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} PC={:04X}",
            self.af, self.bc, self.de, self.hl, self.sp, self.pc
        )
    }
}
