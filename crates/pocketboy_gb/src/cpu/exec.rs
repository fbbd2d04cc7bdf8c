mod alu;
mod bits;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::cycles::cost;
use super::instruction::{Instruction, Mnemonic};
use super::operand::Operand;
use super::{Bus, Cpu};

impl Cpu {
    /// Execute a decoded instruction and return the number of cycles.
    ///
    /// PC already points past the instruction. Operand shapes come from the
    /// decode tables, so a mismatch here is an engine bug and panics.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) -> u32 {
        let mut taken = true;

        match instruction.mnemonic {
            Mnemonic::LD => self.exec_ld(bus, instruction),
            Mnemonic::LDI | Mnemonic::LDD => self.exec_ld_hl_step(bus, instruction),
            Mnemonic::LDH => self.exec_ldh(bus, instruction),
            Mnemonic::LDHL => self.exec_ldhl(bus, instruction),

            // ADD HL,rr and ADD SP,e
            Mnemonic::ADD if matches!(instruction.operand1, Operand::Word(_)) => {
                self.exec_add16(bus, instruction)
            }
            Mnemonic::ADD
            | Mnemonic::ADC
            | Mnemonic::SUB
            | Mnemonic::SBC
            | Mnemonic::AND
            | Mnemonic::XOR
            | Mnemonic::OR
            | Mnemonic::CP => self.exec_alu8(bus, instruction),
            Mnemonic::DAA => self.alu_daa(),
            Mnemonic::CPL | Mnemonic::CCF | Mnemonic::SCF => self.exec_flag_op(instruction.mnemonic),

            Mnemonic::INC | Mnemonic::DEC => self.exec_incdec(bus, instruction),

            Mnemonic::RLCA | Mnemonic::RLA | Mnemonic::RRCA | Mnemonic::RRA => {
                self.exec_rotate_a(instruction.mnemonic)
            }
            Mnemonic::RLC
            | Mnemonic::RL
            | Mnemonic::RRC
            | Mnemonic::RR
            | Mnemonic::SLA
            | Mnemonic::SRA
            | Mnemonic::SWAP
            | Mnemonic::SRL => self.exec_shift(bus, instruction),
            Mnemonic::BIT | Mnemonic::RES | Mnemonic::SET => self.exec_bit_op(bus, instruction),

            Mnemonic::JP
            | Mnemonic::JR
            | Mnemonic::CALL
            | Mnemonic::RET
            | Mnemonic::RETI
            | Mnemonic::RST => taken = self.exec_control(bus, instruction),

            Mnemonic::PUSH => self.exec_push(bus, instruction),
            Mnemonic::POP => self.exec_pop(bus, instruction),

            Mnemonic::NOP => {}
            Mnemonic::HALT => self.exec_halt(),
            Mnemonic::STOP => self.exec_stop(),
            Mnemonic::DI => self.exec_di(),
            Mnemonic::EI => self.exec_ei(),
        }

        cost(instruction, taken)
    }
}
