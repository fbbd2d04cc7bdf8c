mod alu;
mod bus;
mod cycles;
mod decode;
mod encode;
mod exec;
mod instruction;
mod operand;
mod regs;
mod resolve;

pub use bus::Bus;
pub use cycles::cost;
pub use decode::{decode, prefixed_form, primary_form, PREFIX};
pub use encode::encode;
pub use instruction::{Instruction, Mnemonic};
pub use operand::{ByteOperand, Condition, Operand, Reg16, Reg8, WordOperand};
pub use regs::{Flags, Registers};

use crate::error::CpuError;

/// LR35902 core: register file plus the little state the power and
/// interrupt stubs need.
#[derive(Clone, Debug, Default)]
pub struct Cpu {
    pub regs: Registers,
    ime: bool,
    /// EI takes effect after the instruction that follows it.
    ime_enable_pending: bool,
    halted: bool,
    stopped: bool,
    /// Set after an illegal opcode. Real hardware hard-locks until power
    /// off, so every later `step` fails.
    locked: bool,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the post-boot state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn ime(&self) -> bool {
        self.ime
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Leave HALT/STOP. Interrupt delivery is not modelled, so hosts call
    /// this themselves when they want a parked CPU to continue.
    pub fn wake(&mut self) {
        self.halted = false;
        self.stopped = false;
    }

    /// Read the instruction at PC and advance PC past it.
    fn fetch<B: Bus>(&mut self, bus: &mut B) -> Result<Instruction, CpuError> {
        let pc = self.regs.pc;
        let opcode = bus.read8(pc);

        let form = if opcode == PREFIX {
            prefixed_form(bus.read8(pc.wrapping_add(1)))
        } else {
            primary_form(opcode).ok_or(CpuError::IllegalOpcode { opcode, pc })?
        };

        let start = pc.wrapping_add(form.opcode_len());
        let data: Vec<u8> = (0..form.operand_len())
            .map(|i| bus.read8(start.wrapping_add(i)))
            .collect();

        self.regs.pc = pc.wrapping_add(form.encoded_len());
        Ok(form.with_data(&data))
    }

    /// Execute one instruction and return the number of T-cycles it took.
    ///
    /// A halted or stopped CPU burns 4 cycles without fetching. An illegal
    /// opcode locks the CPU: this call reports `IllegalOpcode` and every
    /// later call reports `Locked`.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        if self.locked {
            return Err(CpuError::Locked { pc: self.regs.pc });
        }

        if self.halted || self.stopped {
            bus.tick(4);
            return Ok(4);
        }

        let pc = self.regs.pc;
        let instruction = match self.fetch(bus) {
            Ok(instruction) => instruction,
            Err(err) => {
                self.locked = true;
                log::error!("{err}; CPU locked ({})", self.regs);
                return Err(err);
            }
        };
        log::trace!("{pc:04X}: {instruction}");

        let ei_pending = std::mem::take(&mut self.ime_enable_pending);
        let cycles = self.execute(bus, &instruction);
        if ei_pending && instruction.mnemonic != Mnemonic::DI {
            self.ime = true;
        }

        bus.tick(cycles);
        Ok(cycles)
    }
}
