//! Base T-cycle costs per instruction shape.

use super::instruction::{Instruction, Mnemonic};
use super::operand::{ByteOperand, Operand, Reg16, WordOperand};

#[inline]
fn is_byte_register(operand: &Operand) -> bool {
    matches!(operand, Operand::Byte(ByteOperand::Register(_)))
}

#[inline]
fn is_byte_indirect(operand: &Operand) -> bool {
    matches!(operand, Operand::Byte(ByteOperand::Indirect(_)))
}

#[inline]
fn is_byte_absolute(operand: &Operand) -> bool {
    matches!(operand, Operand::Byte(ByteOperand::Absolute(_)))
}

#[inline]
fn is_byte_immediate(operand: &Operand) -> bool {
    matches!(operand, Operand::Byte(ByteOperand::Immediate(_)))
}

#[inline]
fn is_condition(operand: &Operand) -> bool {
    matches!(operand, Operand::Condition(_))
}

/// Cycles consumed by `instruction`. `taken` only matters for conditional
/// control flow, where a taken branch costs more than a fall-through.
pub fn cost(instruction: &Instruction, taken: bool) -> u32 {
    let dst = &instruction.operand1;
    let src = &instruction.operand2;

    match instruction.mnemonic {
        Mnemonic::LD => match (dst, src) {
            (Operand::Word(WordOperand::Absolute(_)), _) => 20,
            (
                Operand::Word(WordOperand::Register(Reg16::SP)),
                Operand::Word(WordOperand::Register(_)),
            ) => 8,
            (Operand::Word(_), _) => 12,
            _ if is_byte_absolute(dst) || is_byte_absolute(src) => 16,
            _ if is_byte_indirect(dst) && is_byte_immediate(src) => 12,
            _ if is_byte_indirect(dst) || is_byte_indirect(src) => 8,
            _ if is_byte_immediate(src) => 8,
            _ => 4,
        },
        Mnemonic::LDI | Mnemonic::LDD => 8,
        Mnemonic::LDH if is_byte_immediate(dst) || is_byte_immediate(src) => 12,
        Mnemonic::LDH => 8,
        Mnemonic::LDHL => 12,

        Mnemonic::ADD if matches!(dst, Operand::Word(WordOperand::Register(Reg16::SP))) => 16,
        Mnemonic::ADD if matches!(dst, Operand::Word(_)) => 8,
        Mnemonic::ADD
        | Mnemonic::ADC
        | Mnemonic::SUB
        | Mnemonic::SBC
        | Mnemonic::AND
        | Mnemonic::XOR
        | Mnemonic::OR
        | Mnemonic::CP => {
            if is_byte_register(src) {
                4
            } else {
                8
            }
        }

        Mnemonic::INC | Mnemonic::DEC => match dst {
            Operand::Word(_) => 8,
            _ if is_byte_indirect(dst) => 12,
            _ => 4,
        },

        Mnemonic::PUSH => 16,
        Mnemonic::POP => 12,

        Mnemonic::JP if matches!(dst, Operand::Word(WordOperand::Register(_))) => 4,
        Mnemonic::JP if is_condition(dst) && !taken => 12,
        Mnemonic::JP => 16,
        Mnemonic::JR if is_condition(dst) && !taken => 8,
        Mnemonic::JR => 12,
        Mnemonic::CALL if is_condition(dst) && !taken => 12,
        Mnemonic::CALL => 24,
        Mnemonic::RET if is_condition(dst) => {
            if taken {
                20
            } else {
                8
            }
        }
        Mnemonic::RET | Mnemonic::RETI | Mnemonic::RST => 16,

        Mnemonic::BIT if is_byte_indirect(src) => 12,
        Mnemonic::RES | Mnemonic::SET if is_byte_indirect(src) => 16,
        Mnemonic::BIT | Mnemonic::RES | Mnemonic::SET => 8,
        Mnemonic::RLC
        | Mnemonic::RL
        | Mnemonic::RRC
        | Mnemonic::RR
        | Mnemonic::SLA
        | Mnemonic::SRA
        | Mnemonic::SWAP
        | Mnemonic::SRL => {
            if is_byte_indirect(dst) {
                16
            } else {
                8
            }
        }

        Mnemonic::DAA
        | Mnemonic::CPL
        | Mnemonic::CCF
        | Mnemonic::SCF
        | Mnemonic::RLCA
        | Mnemonic::RLA
        | Mnemonic::RRCA
        | Mnemonic::RRA
        | Mnemonic::NOP
        | Mnemonic::HALT
        | Mnemonic::STOP
        | Mnemonic::DI
        | Mnemonic::EI => 4,
    }
}
