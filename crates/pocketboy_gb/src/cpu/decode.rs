//! Opcode tables for the primary and 0xCB-prefixed instruction spaces.
//!
//! Both tables are built once from the opcode bit fields
//! (`xx yyy zzz`, with `yyy` split as `pp q`) and store operand forms
//! with zeroed immediate data. [`decode`] fills the data in from the bytes
//! that follow the opcode.

use lazy_static::lazy_static;

use super::instruction::{Instruction, Mnemonic};
use super::operand::{ByteOperand, Condition, Operand, Reg16, Reg8, WordOperand};
use crate::error::DecodeError;

/// Opcode that introduces the extended bit-manipulation space.
pub const PREFIX: u8 = 0xCB;

/// `r[z]` operand order used by every 8-bit register field.
const R8: [ByteOperand; 8] = [
    ByteOperand::Register(Reg8::B),
    ByteOperand::Register(Reg8::C),
    ByteOperand::Register(Reg8::D),
    ByteOperand::Register(Reg8::E),
    ByteOperand::Register(Reg8::H),
    ByteOperand::Register(Reg8::L),
    ByteOperand::Indirect(Reg16::HL),
    ByteOperand::Register(Reg8::A),
];

/// Register pairs as encoded by 16-bit loads and arithmetic.
const RP: [Reg16; 4] = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::SP];

/// Register pairs as encoded by PUSH/POP.
const RP2: [Reg16; 4] = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::AF];

const CC: [Condition; 4] = [Condition::NZ, Condition::Z, Condition::NC, Condition::C];

const ALU: [Mnemonic; 8] = [
    Mnemonic::ADD,
    Mnemonic::ADC,
    Mnemonic::SUB,
    Mnemonic::SBC,
    Mnemonic::AND,
    Mnemonic::XOR,
    Mnemonic::OR,
    Mnemonic::CP,
];

const ROT: [Mnemonic; 8] = [
    Mnemonic::RLC,
    Mnemonic::RRC,
    Mnemonic::RL,
    Mnemonic::RR,
    Mnemonic::SLA,
    Mnemonic::SRA,
    Mnemonic::SWAP,
    Mnemonic::SRL,
];

const ACCUMULATOR_OPS: [Mnemonic; 8] = [
    Mnemonic::RLCA,
    Mnemonic::RRCA,
    Mnemonic::RLA,
    Mnemonic::RRA,
    Mnemonic::DAA,
    Mnemonic::CPL,
    Mnemonic::SCF,
    Mnemonic::CCF,
];

const A: Operand = Operand::Byte(ByteOperand::Register(Reg8::A));
const IMM8: Operand = Operand::Byte(ByteOperand::Immediate(0));
const REL8: Operand = Operand::Byte(ByteOperand::Relative(0));
const ABS8: Operand = Operand::Byte(ByteOperand::Absolute(0));
const IMM16: Operand = Operand::Word(WordOperand::Immediate(0));
const SP: Operand = Operand::Word(WordOperand::Register(Reg16::SP));
const HL: Operand = Operand::Word(WordOperand::Register(Reg16::HL));

fn none(mnemonic: Mnemonic) -> Instruction {
    Instruction::new(mnemonic, Operand::None, Operand::None)
}

fn unary(mnemonic: Mnemonic, operand: impl Into<Operand>) -> Instruction {
    Instruction::new(mnemonic, operand.into(), Operand::None)
}

fn binary(mnemonic: Mnemonic, dst: impl Into<Operand>, src: impl Into<Operand>) -> Instruction {
    Instruction::new(mnemonic, dst.into(), src.into())
}

fn build_primary(opcode: u8) -> Option<Instruction> {
    let x = opcode >> 6;
    let y = ((opcode >> 3) & 0x07) as usize;
    let z = (opcode & 0x07) as usize;
    let p = y >> 1;
    let q = y & 1;

    let instruction = match (x, z) {
        (0, 0) => match y {
            0 => none(Mnemonic::NOP),
            1 => binary(Mnemonic::LD, WordOperand::Absolute(0), SP),
            2 => unary(Mnemonic::STOP, IMM8),
            3 => unary(Mnemonic::JR, REL8),
            _ => binary(Mnemonic::JR, CC[y - 4], REL8),
        },
        (0, 1) if q == 0 => binary(Mnemonic::LD, RP[p], IMM16),
        (0, 1) => binary(Mnemonic::ADD, HL, RP[p]),
        (0, 2) => {
            let (mnemonic, memory) = match p {
                0 => (Mnemonic::LD, ByteOperand::Indirect(Reg16::BC)),
                1 => (Mnemonic::LD, ByteOperand::Indirect(Reg16::DE)),
                2 => (Mnemonic::LDI, ByteOperand::Indirect(Reg16::HL)),
                _ => (Mnemonic::LDD, ByteOperand::Indirect(Reg16::HL)),
            };
            if q == 0 {
                binary(mnemonic, memory, A)
            } else {
                binary(mnemonic, A, memory)
            }
        }
        (0, 3) if q == 0 => unary(Mnemonic::INC, RP[p]),
        (0, 3) => unary(Mnemonic::DEC, RP[p]),
        (0, 4) => unary(Mnemonic::INC, R8[y]),
        (0, 5) => unary(Mnemonic::DEC, R8[y]),
        (0, 6) => binary(Mnemonic::LD, R8[y], IMM8),
        (0, 7) => none(ACCUMULATOR_OPS[y]),

        // 0x76 sits where LD (HL),(HL) would be.
        (1, 6) if y == 6 => none(Mnemonic::HALT),
        (1, _) => binary(Mnemonic::LD, R8[y], R8[z]),

        (2, _) => binary(ALU[y], A, R8[z]),

        (3, 0) => match y {
            0..=3 => unary(Mnemonic::RET, CC[y]),
            4 => binary(Mnemonic::LDH, IMM8, A),
            5 => binary(Mnemonic::ADD, SP, REL8),
            6 => binary(Mnemonic::LDH, A, IMM8),
            _ => binary(Mnemonic::LDHL, SP, REL8),
        },
        (3, 1) if q == 0 => unary(Mnemonic::POP, RP2[p]),
        (3, 1) => match p {
            0 => none(Mnemonic::RET),
            1 => none(Mnemonic::RETI),
            2 => unary(Mnemonic::JP, HL),
            _ => binary(Mnemonic::LD, SP, HL),
        },
        (3, 2) => match y {
            0..=3 => binary(Mnemonic::JP, CC[y], IMM16),
            4 => binary(Mnemonic::LDH, Reg8::C, A),
            5 => binary(Mnemonic::LD, ABS8, A),
            6 => binary(Mnemonic::LDH, A, Reg8::C),
            _ => binary(Mnemonic::LD, A, ABS8),
        },
        (3, 3) => match y {
            0 => unary(Mnemonic::JP, IMM16),
            6 => none(Mnemonic::DI),
            7 => none(Mnemonic::EI),
            // 0xCB is the prefix; the rest are holes.
            _ => return None,
        },
        (3, 4) if y < 4 => binary(Mnemonic::CALL, CC[y], IMM16),
        (3, 4) => return None,
        (3, 5) if q == 0 => unary(Mnemonic::PUSH, RP2[p]),
        (3, 5) if p == 0 => unary(Mnemonic::CALL, IMM16),
        (3, 5) => return None,
        (3, 6) => binary(ALU[y], A, IMM8),
        (3, 7) => unary(Mnemonic::RST, WordOperand::Direct((y as u16) << 3)),
        _ => unreachable!("opcode fields out of range"),
    };

    Some(instruction)
}

fn build_prefixed(opcode: u8) -> Instruction {
    let y = (opcode >> 3) & 0x07;
    let target = R8[(opcode & 0x07) as usize];

    match opcode >> 6 {
        0 => unary(ROT[y as usize], target),
        1 => binary(Mnemonic::BIT, Operand::Bit(y), target),
        2 => binary(Mnemonic::RES, Operand::Bit(y), target),
        _ => binary(Mnemonic::SET, Operand::Bit(y), target),
    }
}

lazy_static! {
    static ref PRIMARY: [Option<Instruction>; 256] =
        std::array::from_fn(|opcode| build_primary(opcode as u8));
    static ref PREFIXED: [Instruction; 256] =
        std::array::from_fn(|opcode| build_prefixed(opcode as u8));
}

/// Operand form for a primary opcode, or `None` for the prefix byte and
/// the eleven opcodes that hard-lock the CPU.
pub fn primary_form(opcode: u8) -> Option<Instruction> {
    PRIMARY[opcode as usize]
}

/// Operand form for the byte following a 0xCB prefix. Every value is
/// defined.
pub fn prefixed_form(opcode: u8) -> Instruction {
    PREFIXED[opcode as usize]
}

/// Decode one instruction from the start of `bytes`.
///
/// ```
/// use pocketboy_gb::cpu::decode;
///
/// let jp = decode(&[0xC3, 0x34, 0x12]).unwrap();
/// assert_eq!(jp.to_string(), "JP 0x1234");
/// assert_eq!(jp.encoded_len(), 3);
/// ```
pub fn decode(bytes: &[u8]) -> Result<Instruction, DecodeError> {
    let (&opcode, rest) = bytes.split_first().ok_or(DecodeError::Empty)?;

    let (form, data) = if opcode == PREFIX {
        let (&extended, data) = rest.split_first().ok_or(DecodeError::Truncated {
            needed: 2,
            available: bytes.len(),
        })?;
        (prefixed_form(extended), data)
    } else {
        let form = primary_form(opcode).ok_or(DecodeError::IllegalOpcode(opcode))?;
        (form, rest)
    };

    let needed = form.encoded_len() as usize;
    if bytes.len() < needed {
        return Err(DecodeError::Truncated {
            needed,
            available: bytes.len(),
        });
    }

    Ok(form.with_data(data))
}
