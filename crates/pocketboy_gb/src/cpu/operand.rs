//! Operand descriptors (addressing modes).
//!
//! Each operand class is its own sum type so the resolver can match
//! exhaustively on it. Immediate forms carry the data that followed the
//! opcode in memory once an instruction has been decoded; inside the decode
//! tables they hold zero placeholders.

use std::fmt;

use super::regs::Flags;

/// An 8-bit register.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

/// A 16-bit register pair, or the stack pointer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
}

/// A condition code for a conditional instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Condition {
    NZ,
    Z,
    NC,
    C,
}

impl Condition {
    pub fn test(self, flags: Flags) -> bool {
        match self {
            Self::NZ => !flags.contains(Flags::ZERO),
            Self::Z => flags.contains(Flags::ZERO),
            Self::NC => !flags.contains(Flags::CARRY),
            Self::C => flags.contains(Flags::CARRY),
        }
    }
}

/// Where an 8-bit value comes from or goes to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ByteOperand {
    Register(Reg8),
    /// Memory at the address held in a register pair, e.g. `(HL)`.
    Indirect(Reg16),
    /// `n`: the byte following the opcode.
    Immediate(u8),
    /// `e`: signed byte following the opcode. JR adds it to the address of
    /// the next instruction; `ADD SP,e` and `LDHL SP,e` add it to SP.
    Relative(i8),
    /// `(nn)`: memory at the little-endian address following the opcode.
    Absolute(u16),
}

/// Where a 16-bit value comes from or goes to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum WordOperand {
    Register(Reg16),
    /// A fixed address encoded in the opcode itself (the RST vectors).
    Direct(u16),
    /// `nn`: the two bytes following the opcode, little-endian.
    Immediate(u16),
    /// `(nn)`: two bytes of memory starting at the address following the
    /// opcode. Only `LD (nn),SP` uses this form.
    Absolute(u16),
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Operand {
    #[default]
    None,
    Byte(ByteOperand),
    Word(WordOperand),
    Condition(Condition),
    /// Bit index 0–7 for BIT/SET/RES, taken from the opcode.
    Bit(u8),
}

impl Operand {
    /// Number of instruction bytes this operand consumes after the opcode.
    pub fn bytes_consumed(&self) -> u16 {
        match self {
            Operand::Byte(ByteOperand::Immediate(_) | ByteOperand::Relative(_)) => 1,
            Operand::Byte(ByteOperand::Absolute(_)) => 2,
            Operand::Word(WordOperand::Immediate(_) | WordOperand::Absolute(_)) => 2,
            Operand::Byte(ByteOperand::Register(_) | ByteOperand::Indirect(_))
            | Operand::Word(WordOperand::Register(_) | WordOperand::Direct(_))
            | Operand::Condition(_)
            | Operand::Bit(_)
            | Operand::None => 0,
        }
    }

    /// Fill the immediate data of this operand from the bytes following
    /// the opcode. `data` must hold at least `bytes_consumed()` bytes.
    pub(crate) fn with_data(self, data: &[u8]) -> Self {
        match self {
            Operand::Byte(ByteOperand::Immediate(_)) => {
                Operand::Byte(ByteOperand::Immediate(data[0]))
            }
            Operand::Byte(ByteOperand::Relative(_)) => {
                Operand::Byte(ByteOperand::Relative(data[0] as i8))
            }
            Operand::Byte(ByteOperand::Absolute(_)) => {
                Operand::Byte(ByteOperand::Absolute(u16::from_le_bytes([data[0], data[1]])))
            }
            Operand::Word(WordOperand::Immediate(_)) => {
                Operand::Word(WordOperand::Immediate(u16::from_le_bytes([data[0], data[1]])))
            }
            Operand::Word(WordOperand::Absolute(_)) => {
                Operand::Word(WordOperand::Absolute(u16::from_le_bytes([data[0], data[1]])))
            }
            other => other,
        }
    }

    /// The immediate data carried by this operand, little-endian.
    pub(crate) fn data(&self) -> Vec<u8> {
        match *self {
            Operand::Byte(ByteOperand::Immediate(value)) => vec![value],
            Operand::Byte(ByteOperand::Relative(offset)) => vec![offset as u8],
            Operand::Byte(ByteOperand::Absolute(addr))
            | Operand::Word(WordOperand::Immediate(addr))
            | Operand::Word(WordOperand::Absolute(addr)) => addr.to_le_bytes().to_vec(),
            _ => Vec::new(),
        }
    }

    /// The same addressing mode with its immediate data zeroed, as stored
    /// in the decode tables.
    pub(crate) fn form(self) -> Self {
        self.with_data(&[0, 0])
    }
}

impl From<ByteOperand> for Operand {
    fn from(value: ByteOperand) -> Self {
        Operand::Byte(value)
    }
}

impl From<WordOperand> for Operand {
    fn from(value: WordOperand) -> Self {
        Operand::Word(value)
    }
}

impl From<Reg8> for Operand {
    fn from(value: Reg8) -> Self {
        Operand::Byte(ByteOperand::Register(value))
    }
}

impl From<Reg16> for Operand {
    fn from(value: Reg16) -> Self {
        Operand::Word(WordOperand::Register(value))
    }
}

impl From<Condition> for Operand {
    fn from(value: Condition) -> Self {
        Operand::Condition(value)
    }
}

impl fmt::Display for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg8::A => "A",
            Reg8::B => "B",
            Reg8::C => "C",
            Reg8::D => "D",
            Reg8::E => "E",
            Reg8::H => "H",
            Reg8::L => "L",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Reg16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg16::AF => "AF",
            Reg16::BC => "BC",
            Reg16::DE => "DE",
            Reg16::HL => "HL",
            Reg16::SP => "SP",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Condition::NZ => "NZ",
            Condition::Z => "Z",
            Condition::NC => "NC",
            Condition::C => "C",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ByteOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOperand::Register(reg) => write!(f, "{reg}"),
            ByteOperand::Indirect(pair) => write!(f, "({pair})"),
            ByteOperand::Immediate(value) => write!(f, "0x{value:02X}"),
            ByteOperand::Relative(offset) => write!(f, "{offset}"),
            ByteOperand::Absolute(addr) => write!(f, "(0x{addr:04X})"),
        }
    }
}

impl fmt::Display for WordOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordOperand::Register(pair) => write!(f, "{pair}"),
            WordOperand::Direct(addr) => write!(f, "0x{addr:02X}"),
            WordOperand::Immediate(value) => write!(f, "0x{value:04X}"),
            WordOperand::Absolute(addr) => write!(f, "(0x{addr:04X})"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Byte(op) => write!(f, "{op}"),
            Operand::Word(op) => write!(f, "{op}"),
            Operand::Condition(cond) => write!(f, "{cond}"),
            Operand::Bit(bit) => write!(f, "{bit}"),
        }
    }
}
