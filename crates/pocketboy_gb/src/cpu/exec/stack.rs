use crate::cpu::instruction::Instruction;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        // Stack grows downward: memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = bus.read8(self.regs.sp);
        let hi = bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        let value = self.read_word(bus, &instruction.operand1);
        self.push_u16(bus, value);
    }

    /// POP AF drops the low nibble of F through `set_af`.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        let value = self.pop_u16(bus);
        self.write_word(bus, &instruction.operand1, value);
    }
}
