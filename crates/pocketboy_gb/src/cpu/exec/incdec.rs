use crate::cpu::instruction::{Instruction, Mnemonic};
use crate::cpu::operand::Operand;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// INC/DEC on a byte (flags Z/N/H, C untouched) or a pair (no flags).
    pub(super) fn exec_incdec<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        let target = &instruction.operand1;
        let increment = instruction.mnemonic == Mnemonic::INC;

        match target {
            Operand::Byte(_) => {
                let value = self.read_byte(bus, target);
                let result = if increment {
                    self.alu_inc8(value)
                } else {
                    self.alu_dec8(value)
                };
                self.write_byte(bus, target, result);
            }
            Operand::Word(_) => {
                let value = self.read_word(bus, target);
                let result = if increment {
                    value.wrapping_add(1)
                } else {
                    value.wrapping_sub(1)
                };
                self.write_word(bus, target, result);
            }
            other => panic!("{} operand mismatch: {other:?}", instruction.mnemonic),
        }
    }
}
