//! Operand resolution: turns an operand descriptor into a value or a
//! storage location against the register file and the bus.
//!
//! Immediate data was already read during fetch, so resolving an
//! immediate never touches the bus. Asking for a value of the wrong width,
//! or storing into an immediate, is an engine bug and panics.

use super::operand::{ByteOperand, Operand, WordOperand};
use super::{Bus, Cpu};

impl Cpu {
    pub(super) fn read_byte<B: Bus>(&self, bus: &mut B, operand: &Operand) -> u8 {
        match operand {
            Operand::Byte(byte) => match *byte {
                ByteOperand::Register(reg) => self.regs.get8(reg),
                ByteOperand::Indirect(pair) => bus.read8(self.regs.get16(pair)),
                ByteOperand::Immediate(value) => value,
                ByteOperand::Relative(offset) => offset as u8,
                ByteOperand::Absolute(addr) => bus.read8(addr),
            },
            other => panic!("expected a byte operand, got {other:?}"),
        }
    }

    pub(super) fn write_byte<B: Bus>(&mut self, bus: &mut B, operand: &Operand, value: u8) {
        match operand {
            Operand::Byte(byte) => match *byte {
                ByteOperand::Register(reg) => self.regs.set8(reg, value),
                ByteOperand::Indirect(pair) => bus.write8(self.regs.get16(pair), value),
                ByteOperand::Absolute(addr) => bus.write8(addr, value),
                ByteOperand::Immediate(_) | ByteOperand::Relative(_) => {
                    panic!("immutable operand {byte}")
                }
            },
            other => panic!("expected a byte operand, got {other:?}"),
        }
    }

    pub(super) fn read_word<B: Bus>(&self, bus: &mut B, operand: &Operand) -> u16 {
        match operand {
            Operand::Word(word) => match *word {
                WordOperand::Register(pair) => self.regs.get16(pair),
                WordOperand::Direct(addr) | WordOperand::Immediate(addr) => addr,
                WordOperand::Absolute(addr) => {
                    let lo = bus.read8(addr);
                    let hi = bus.read8(addr.wrapping_add(1));
                    u16::from_le_bytes([lo, hi])
                }
            },
            other => panic!("expected a word operand, got {other:?}"),
        }
    }

    pub(super) fn write_word<B: Bus>(&mut self, bus: &mut B, operand: &Operand, value: u16) {
        match operand {
            Operand::Word(word) => match *word {
                WordOperand::Register(pair) => self.regs.set16(pair, value),
                WordOperand::Absolute(addr) => {
                    let [lo, hi] = value.to_le_bytes();
                    bus.write8(addr, lo);
                    bus.write8(addr.wrapping_add(1), hi);
                }
                WordOperand::Direct(_) | WordOperand::Immediate(_) => {
                    panic!("immutable operand {word}")
                }
            },
            other => panic!("expected a word operand, got {other:?}"),
        }
    }

    /// Evaluate a condition operand against the current flags.
    pub(super) fn test_condition(&self, operand: &Operand) -> bool {
        match operand {
            Operand::Condition(cond) => cond.test(self.regs.flags()),
            other => panic!("expected a condition operand, got {other:?}"),
        }
    }
}
