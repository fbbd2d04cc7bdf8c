use crate::cpu::Cpu;
use crate::error::{CartridgeError, CpuError};

use super::{Cartridge, Memory};

/// Why [`GameBoy::run`] returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StopReason {
    /// The step budget ran out.
    StepLimit,
    /// The CPU entered HALT or STOP and nothing will wake it.
    Halted,
    Error(CpuError),
}

/// Summary of a bounded run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RunOutcome {
    pub steps: u64,
    pub cycles: u64,
    pub reason: StopReason,
}

/// High-level Game Boy session.
///
/// Pairs one CPU with one memory bus. Hosts either drive it with
/// [`step`](Self::step) or hand it a step budget through [`run`](Self::run).
pub struct GameBoy {
    pub cpu: Cpu,
    pub memory: Memory,
    stop_on_halt: bool,
}

impl GameBoy {
    pub fn new(memory: Memory) -> Self {
        Self {
            cpu: Cpu::new(),
            memory,
            stop_on_halt: true,
        }
    }

    pub fn from_cartridge(cartridge: Cartridge) -> Result<Self, CartridgeError> {
        Ok(Self::new(cartridge.into_memory()?))
    }

    /// Whether [`run`](Self::run) returns as soon as the CPU parks itself.
    /// Without interrupt delivery a halted CPU only burns cycles, which is
    /// still useful to keep the RTC moving.
    pub fn set_stop_on_halt(&mut self, stop_on_halt: bool) {
        self.stop_on_halt = stop_on_halt;
    }

    pub fn step(&mut self) -> Result<u32, CpuError> {
        self.cpu.step(&mut self.memory)
    }

    pub fn run(&mut self, max_steps: u64) -> RunOutcome {
        let mut steps = 0u64;
        let mut cycles = 0u64;

        while steps < max_steps {
            if self.stop_on_halt && (self.cpu.is_halted() || self.cpu.is_stopped()) {
                return RunOutcome {
                    steps,
                    cycles,
                    reason: StopReason::Halted,
                };
            }

            match self.step() {
                Ok(taken) => cycles += taken as u64,
                Err(err) => {
                    return RunOutcome {
                        steps,
                        cycles,
                        reason: StopReason::Error(err),
                    };
                }
            }
            steps += 1;
        }

        RunOutcome {
            steps,
            cycles,
            reason: StopReason::StepLimit,
        }
    }
}
