use super::regs::Flags;
use super::Cpu;

#[inline]
fn zero_only(result: u8) -> Flags {
    if result == 0 {
        Flags::ZERO
    } else {
        Flags::empty()
    }
}

impl Cpu {
    /// Core 8-bit ADD/ADC.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, a: u8, value: u8, use_carry: bool) -> u8 {
        let carry_in = u8::from(use_carry && self.regs.flag(Flags::CARRY));

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = (a as u16) + (value as u16) + (carry_in as u16);
        let result = full as u8;

        let mut flags = zero_only(result);
        flags.set(Flags::HALF_CARRY, half > 0x0F);
        flags.set(Flags::CARRY, full > 0xFF);
        self.regs.set_flags(flags);
        result
    }

    /// Core 8-bit SUB/SBC, also used by CP.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true).
    pub(super) fn alu_sub(&mut self, a: u8, value: u8, use_carry: bool) -> u8 {
        let carry_in = i16::from(use_carry && self.regs.flag(Flags::CARRY));

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in;
        let full = a as i16 - value as i16 - carry_in;
        let result = full as u8;

        let mut flags = zero_only(result) | Flags::SUBTRACT;
        flags.set(Flags::HALF_CARRY, half < 0);
        flags.set(Flags::CARRY, full < 0);
        self.regs.set_flags(flags);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, a: u8, value: u8) -> u8 {
        let result = a & value;
        self.regs.set_flags(zero_only(result) | Flags::HALF_CARRY);
        result
    }

    #[inline]
    pub(super) fn alu_or(&mut self, a: u8, value: u8) -> u8 {
        let result = a | value;
        self.regs.set_flags(zero_only(result));
        result
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, a: u8, value: u8) -> u8 {
        let result = a ^ value;
        self.regs.set_flags(zero_only(result));
        result
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Uses C, H and N to pick the correction; updates Z and C, clears H,
    /// leaves N unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a();
        let mut adjust: u8 = if self.regs.flag(Flags::CARRY) { 0x60 } else { 0x00 };
        if self.regs.flag(Flags::HALF_CARRY) {
            adjust |= 0x06;
        }

        if !self.regs.flag(Flags::SUBTRACT) {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.regs.set_flag(Flags::CARRY, adjust >= 0x60);
        self.regs.set_flag(Flags::HALF_CARRY, false);
        self.regs.set_flag(Flags::ZERO, a == 0);
        self.regs.set_a(a);
    }

    /// 8-bit increment for INC r and INC (HL). C is left unchanged.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.regs.set_flag(Flags::ZERO, result == 0);
        self.regs.set_flag(Flags::SUBTRACT, false);
        self.regs.set_flag(Flags::HALF_CARRY, (value & 0x0F) == 0x0F);
        result
    }

    /// 8-bit decrement for DEC r and DEC (HL). C is left unchanged.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.regs.set_flag(Flags::ZERO, result == 0);
        self.regs.set_flag(Flags::SUBTRACT, true);
        self.regs.set_flag(Flags::HALF_CARRY, (value & 0x0F) == 0);
        result
    }

    /// `ADD HL,rr`: Z is unaffected, N cleared, H and C from bits 11 and 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, hl: u16, value: u16) -> u16 {
        self.regs.set_flag(Flags::SUBTRACT, false);
        self.regs
            .set_flag(Flags::HALF_CARRY, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.regs
            .set_flag(Flags::CARRY, (hl as u32) + (value as u32) > 0xFFFF);
        hl.wrapping_add(value)
    }

    /// SP plus a signed byte, for `ADD SP,e` and `LDHL SP,e`.
    ///
    /// Z and N are cleared; H and C come from the unsigned low-byte add.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, offset: i8) -> u16 {
        let offset = offset as i16 as u16;
        let mut flags = Flags::empty();
        flags.set(Flags::HALF_CARRY, (base & 0x000F) + (offset & 0x000F) > 0x000F);
        flags.set(Flags::CARRY, (base & 0x00FF) + (offset & 0x00FF) > 0x00FF);
        self.regs.set_flags(flags);
        base.wrapping_add(offset)
    }

    /// Shared tail of every rotate/shift: Z from the result, N and H
    /// cleared, C from the bit shifted out.
    #[inline]
    fn shift_flags(&mut self, result: u8, carry: bool) -> u8 {
        let mut flags = zero_only(result);
        flags.set(Flags::CARRY, carry);
        self.regs.set_flags(flags);
        result
    }

    pub(super) fn alu_rlc(&mut self, value: u8) -> u8 {
        self.shift_flags(value.rotate_left(1), value & 0x80 != 0)
    }

    pub(super) fn alu_rrc(&mut self, value: u8) -> u8 {
        self.shift_flags(value.rotate_right(1), value & 0x01 != 0)
    }

    pub(super) fn alu_rl(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.regs.flag(Flags::CARRY));
        self.shift_flags((value << 1) | carry_in, value & 0x80 != 0)
    }

    pub(super) fn alu_rr(&mut self, value: u8) -> u8 {
        let carry_in = if self.regs.flag(Flags::CARRY) { 0x80 } else { 0 };
        self.shift_flags((value >> 1) | carry_in, value & 0x01 != 0)
    }

    pub(super) fn alu_sla(&mut self, value: u8) -> u8 {
        self.shift_flags(value << 1, value & 0x80 != 0)
    }

    /// Arithmetic shift right; bit 7 is kept.
    pub(super) fn alu_sra(&mut self, value: u8) -> u8 {
        self.shift_flags((value >> 1) | (value & 0x80), value & 0x01 != 0)
    }

    pub(super) fn alu_srl(&mut self, value: u8) -> u8 {
        self.shift_flags(value >> 1, value & 0x01 != 0)
    }

    pub(super) fn alu_swap(&mut self, value: u8) -> u8 {
        self.shift_flags(value.rotate_left(4), false)
    }
}
