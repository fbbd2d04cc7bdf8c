use crate::cpu::instruction::{Instruction, Mnemonic};
use crate::cpu::operand::{ByteOperand, Operand};
use crate::cpu::regs::Flags;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// 8-bit arithmetic and logic into the destination byte (always A).
    pub(super) fn exec_alu8<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        let dst = &instruction.operand1;
        let a = self.read_byte(bus, dst);
        let value = self.read_byte(bus, &instruction.operand2);

        let result = match instruction.mnemonic {
            Mnemonic::ADD => self.alu_add(a, value, false),
            Mnemonic::ADC => self.alu_add(a, value, true),
            Mnemonic::SUB => self.alu_sub(a, value, false),
            Mnemonic::SBC => self.alu_sub(a, value, true),
            Mnemonic::AND => self.alu_and(a, value),
            Mnemonic::XOR => self.alu_xor(a, value),
            Mnemonic::OR => self.alu_or(a, value),
            Mnemonic::CP => {
                // Flags only; A keeps its value.
                self.alu_sub(a, value, false);
                a
            }
            other => unreachable!("{other} is not an 8-bit ALU operation"),
        };

        self.write_byte(bus, dst, result);
    }

    /// `ADD HL,rr` and `ADD SP,e`.
    pub(super) fn exec_add16<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        let dst = &instruction.operand1;
        let base = self.read_word(bus, dst);

        let result = match instruction.operand2 {
            Operand::Word(_) => {
                let value = self.read_word(bus, &instruction.operand2);
                self.alu_add16_hl(base, value)
            }
            Operand::Byte(ByteOperand::Relative(offset)) => self.alu_add16_signed(base, offset),
            other => panic!("16-bit ADD operand mismatch: {other:?}"),
        };

        self.write_word(bus, dst, result);
    }

    /// CPL, CCF and SCF.
    pub(super) fn exec_flag_op(&mut self, mnemonic: Mnemonic) {
        match mnemonic {
            Mnemonic::CPL => {
                let a = self.regs.a();
                self.regs.set_a(!a);
                self.regs.set_flag(Flags::SUBTRACT, true);
                self.regs.set_flag(Flags::HALF_CARRY, true);
            }
            Mnemonic::CCF => {
                let carry = self.regs.flag(Flags::CARRY);
                self.regs.set_flag(Flags::SUBTRACT, false);
                self.regs.set_flag(Flags::HALF_CARRY, false);
                self.regs.set_flag(Flags::CARRY, !carry);
            }
            Mnemonic::SCF => {
                self.regs.set_flag(Flags::SUBTRACT, false);
                self.regs.set_flag(Flags::HALF_CARRY, false);
                self.regs.set_flag(Flags::CARRY, true);
            }
            other => unreachable!("{other} is not a flag operation"),
        }
    }
}
