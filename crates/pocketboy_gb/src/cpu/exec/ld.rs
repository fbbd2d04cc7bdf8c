use crate::cpu::instruction::{Instruction, Mnemonic};
use crate::cpu::operand::{ByteOperand, Operand, Reg16, Reg8};
use crate::cpu::{Bus, Cpu};

const HL_INDIRECT: Operand = Operand::Byte(ByteOperand::Indirect(Reg16::HL));

impl Cpu {
    pub(super) fn exec_ld<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        let (dst, src) = (&instruction.operand1, &instruction.operand2);
        match (dst, src) {
            (Operand::Byte(_), Operand::Byte(_)) => {
                let value = self.read_byte(bus, src);
                self.write_byte(bus, dst, value);
            }
            (Operand::Word(_), Operand::Word(_)) => {
                let value = self.read_word(bus, src);
                self.write_word(bus, dst, value);
            }
            _ => panic!("LD operand mismatch: {dst:?}, {src:?}"),
        }
    }

    /// LDI/LDD: copy through (HL), then step HL.
    pub(super) fn exec_ld_hl_step<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        let (dst, src) = (&instruction.operand1, &instruction.operand2);
        assert!(
            *dst == HL_INDIRECT || *src == HL_INDIRECT,
            "{} needs an (HL) operand",
            instruction.mnemonic
        );

        let value = self.read_byte(bus, src);
        self.write_byte(bus, dst, value);

        let hl = self.regs.hl();
        let hl = if instruction.mnemonic == Mnemonic::LDI {
            hl.wrapping_add(1)
        } else {
            hl.wrapping_sub(1)
        };
        self.regs.set_hl(hl);
    }

    /// High-page address for an `LDH` operand: an immediate offset or C.
    fn high_page_address(&self, operand: &Operand) -> Option<u16> {
        match operand {
            Operand::Byte(ByteOperand::Immediate(offset)) => Some(0xFF00 | *offset as u16),
            Operand::Byte(ByteOperand::Register(Reg8::C)) => Some(0xFF00 | self.regs.c() as u16),
            _ => None,
        }
    }

    pub(super) fn exec_ldh<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        let (dst, src) = (&instruction.operand1, &instruction.operand2);
        if let Some(addr) = self.high_page_address(dst) {
            let value = self.read_byte(bus, src);
            bus.write8(addr, value);
        } else if let Some(addr) = self.high_page_address(src) {
            let value = bus.read8(addr);
            self.write_byte(bus, dst, value);
        } else {
            panic!("LDH without a high-page operand: {dst:?}, {src:?}");
        }
    }

    /// LDHL SP,e: HL = SP + e. Z is always cleared.
    pub(super) fn exec_ldhl<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        let sp = self.read_word(bus, &instruction.operand1);
        let offset = match instruction.operand2 {
            Operand::Byte(ByteOperand::Relative(offset)) => offset,
            other => panic!("LDHL needs a signed offset, got {other:?}"),
        };
        let value = self.alu_add16_signed(sp, offset);
        self.regs.set_hl(value);
    }
}
