use crate::cpu::instruction::{Instruction, Mnemonic};
use crate::cpu::operand::Operand;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// JP/JR/CALL/RET/RETI/RST. Returns whether control was transferred;
    /// a failed condition leaves PC at the next instruction.
    pub(super) fn exec_control<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) -> bool {
        let (condition, target) = match instruction.operand1 {
            Operand::Condition(_) => (Some(&instruction.operand1), &instruction.operand2),
            _ => (None, &instruction.operand1),
        };

        if let Some(condition) = condition {
            if !self.test_condition(condition) {
                return false;
            }
        }

        match instruction.mnemonic {
            Mnemonic::JP => self.regs.pc = self.read_word(bus, target),
            Mnemonic::JR => {
                let offset = self.read_byte(bus, target) as i8;
                self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
            }
            Mnemonic::CALL | Mnemonic::RST => {
                let addr = self.read_word(bus, target);
                let ret = self.regs.pc;
                self.push_u16(bus, ret);
                self.regs.pc = addr;
            }
            Mnemonic::RET => self.regs.pc = self.pop_u16(bus),
            Mnemonic::RETI => {
                self.regs.pc = self.pop_u16(bus);
                self.ime = true;
            }
            other => unreachable!("{other} is not a control transfer"),
        }

        true
    }
}
