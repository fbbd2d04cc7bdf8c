/// Abstraction over the Game Boy address space.
///
/// The CPU only ever sees this trait, so tests can drive it with a flat
/// 64 KiB array while the machine uses the banked [`crate::Memory`].
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
    /// Advance bus-side peripherals by a given number of CPU cycles.
    ///
    /// Default implementation does nothing; the cartridge bus overrides it
    /// to run the MBC3 real-time clock.
    fn tick(&mut self, _cycles: u32) {}
}
