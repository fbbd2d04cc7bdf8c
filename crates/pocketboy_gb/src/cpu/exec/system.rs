use crate::cpu::Cpu;

impl Cpu {
    pub(super) fn exec_halt(&mut self) {
        self.halted = true;
    }

    /// The padding byte after STOP was consumed during fetch.
    pub(super) fn exec_stop(&mut self) {
        self.stopped = true;
        self.halted = false;
    }

    pub(super) fn exec_di(&mut self) {
        self.ime = false;
        self.ime_enable_pending = false;
    }

    pub(super) fn exec_ei(&mut self) {
        // IME becomes 1 after the *next* instruction completes.
        self.ime_enable_pending = true;
    }
}
