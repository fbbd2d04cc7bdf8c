use std::fmt;

use super::operand::{ByteOperand, Operand, Reg8};

/// Operation part of an instruction, independent of its operands.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Mnemonic {
    LD,
    LDI,
    LDD,
    LDH,
    LDHL,
    ADD,
    ADC,
    SUB,
    SBC,
    AND,
    XOR,
    OR,
    CP,
    INC,
    DEC,
    DAA,
    CPL,
    CCF,
    SCF,
    RLCA,
    RLA,
    RRCA,
    RRA,
    RLC,
    RL,
    RRC,
    RR,
    SLA,
    SRA,
    SWAP,
    SRL,
    BIT,
    RES,
    SET,
    JP,
    JR,
    CALL,
    RET,
    RETI,
    RST,
    PUSH,
    POP,
    NOP,
    HALT,
    STOP,
    DI,
    EI,
}

impl Mnemonic {
    /// Whether this operation lives in the 0xCB-prefixed opcode space.
    pub fn is_prefixed(self) -> bool {
        matches!(
            self,
            Mnemonic::RLC
                | Mnemonic::RL
                | Mnemonic::RRC
                | Mnemonic::RR
                | Mnemonic::SLA
                | Mnemonic::SRA
                | Mnemonic::SWAP
                | Mnemonic::SRL
                | Mnemonic::BIT
                | Mnemonic::RES
                | Mnemonic::SET
        )
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A decoded instruction: an operation plus up to two operand descriptors.
///
/// `operand1` is the destination (or the condition for conditional
/// control flow, or the bit index for BIT/SET/RES), `operand2` the source.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub operand1: Operand,
    pub operand2: Operand,
}

impl Instruction {
    pub const fn new(mnemonic: Mnemonic, operand1: Operand, operand2: Operand) -> Self {
        Self {
            mnemonic,
            operand1,
            operand2,
        }
    }

    pub fn is_prefixed(&self) -> bool {
        self.mnemonic.is_prefixed()
    }

    /// Opcode byte count: one, or two for the 0xCB space.
    pub fn opcode_len(&self) -> u16 {
        if self.is_prefixed() {
            2
        } else {
            1
        }
    }

    /// Number of immediate bytes following the opcode.
    pub fn operand_len(&self) -> u16 {
        self.operand1.bytes_consumed() + self.operand2.bytes_consumed()
    }

    /// Total encoded length in bytes; PC advances by this much on fetch.
    pub fn encoded_len(&self) -> u16 {
        self.opcode_len() + self.operand_len()
    }

    /// Fill operand data from the bytes following the opcode. The first
    /// operand consumes its bytes first.
    pub(crate) fn with_data(self, data: &[u8]) -> Self {
        let split = self.operand1.bytes_consumed() as usize;
        Self {
            mnemonic: self.mnemonic,
            operand1: self.operand1.with_data(data),
            operand2: self.operand2.with_data(&data[split..]),
        }
    }

    /// Immediate data in encoding order.
    pub(crate) fn data(&self) -> Vec<u8> {
        let mut data = self.operand1.data();
        data.extend(self.operand2.data());
        data
    }

    /// This instruction with all immediate data zeroed.
    pub(crate) fn form(&self) -> Self {
        Self {
            mnemonic: self.mnemonic,
            operand1: self.operand1.form(),
            operand2: self.operand2.form(),
        }
    }
}

/// Renders `LDH` operands as the high-page location they address.
fn fmt_high_page(operand: &Operand, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match operand {
        Operand::Byte(ByteOperand::Immediate(offset)) => write!(f, "(0xFF{offset:02X})"),
        Operand::Byte(ByteOperand::Register(Reg8::C)) => f.write_str("(C)"),
        other => write!(f, "{other}"),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        let high_page = self.mnemonic == Mnemonic::LDH;
        let operands = [self.operand1, self.operand2];
        let mut separator = " ";
        for operand in operands.iter().filter(|op| **op != Operand::None) {
            f.write_str(separator)?;
            if high_page {
                fmt_high_page(operand, f)?;
            } else {
                write!(f, "{operand}")?;
            }
            separator = ",";
        }
        Ok(())
    }
}
