use crate::cpu::instruction::{Instruction, Mnemonic};
use crate::cpu::operand::Operand;
use crate::cpu::regs::Flags;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// RLCA/RLA/RRCA/RRA: like their prefixed forms on A, but Z is always
    /// cleared.
    pub(super) fn exec_rotate_a(&mut self, mnemonic: Mnemonic) {
        let a = self.regs.a();
        let result = match mnemonic {
            Mnemonic::RLCA => self.alu_rlc(a),
            Mnemonic::RLA => self.alu_rl(a),
            Mnemonic::RRCA => self.alu_rrc(a),
            Mnemonic::RRA => self.alu_rr(a),
            other => unreachable!("{other} is not an accumulator rotate"),
        };
        self.regs.set_a(result);
        self.regs.set_flag(Flags::ZERO, false);
    }

    /// Prefixed rotates, shifts and SWAP.
    pub(super) fn exec_shift<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        let target = &instruction.operand1;
        let value = self.read_byte(bus, target);

        let result = match instruction.mnemonic {
            Mnemonic::RLC => self.alu_rlc(value),
            Mnemonic::RRC => self.alu_rrc(value),
            Mnemonic::RL => self.alu_rl(value),
            Mnemonic::RR => self.alu_rr(value),
            Mnemonic::SLA => self.alu_sla(value),
            Mnemonic::SRA => self.alu_sra(value),
            Mnemonic::SWAP => self.alu_swap(value),
            Mnemonic::SRL => self.alu_srl(value),
            other => unreachable!("{other} is not a shift"),
        };

        self.write_byte(bus, target, result);
    }

    /// BIT b,r tests without writing back; SET/RES change no flags.
    pub(super) fn exec_bit_op<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        let mask = match instruction.operand1 {
            Operand::Bit(bit) if bit < 8 => 1u8 << bit,
            other => panic!("{} needs a bit index, got {other:?}", instruction.mnemonic),
        };
        let target = &instruction.operand2;
        let value = self.read_byte(bus, target);

        match instruction.mnemonic {
            Mnemonic::BIT => {
                self.regs.set_flag(Flags::ZERO, value & mask == 0);
                self.regs.set_flag(Flags::SUBTRACT, false);
                self.regs.set_flag(Flags::HALF_CARRY, true);
            }
            Mnemonic::RES => self.write_byte(bus, target, value & !mask),
            Mnemonic::SET => self.write_byte(bus, target, value | mask),
            other => unreachable!("{other} is not a bit operation"),
        }
    }
}
