use super::*;
use crate::cpu::Bus;
use crate::error::{CartridgeError, CpuError};
use crate::{CPU_CLOCK_HZ, ROM_BANK_SIZE};

/// ROM banks tagged with their own index (little-endian) in the first two
/// bytes, so reads from the switchable window tell which bank is mapped.
fn tagged_banks(count: usize) -> Vec<RomBank> {
    (0..count)
        .map(|index| {
            let mut bank = Box::new([0u8; ROM_BANK_SIZE]);
            bank[..2].copy_from_slice(&(index as u16).to_le_bytes());
            bank
        })
        .collect()
}

fn memory(controller: ControllerType, rom_banks: usize, ram_banks: usize) -> Memory {
    Memory::new(tagged_banks(rom_banks), ram_banks, controller).unwrap()
}

/// Memory whose bank 0 holds `program` at the post-boot entry point.
fn memory_with_program(controller: ControllerType, rom_banks: usize, program: &[u8]) -> Memory {
    let mut banks = tagged_banks(rom_banks);
    banks[0][0x100..0x100 + program.len()].copy_from_slice(program);
    Memory::new(banks, 0, controller).unwrap()
}

fn header_checksum(image: &[u8]) -> u8 {
    image[0x134..0x14D]
        .iter()
        .fold(0u8, |x, &b| x.wrapping_sub(b).wrapping_sub(1))
}

/// A well-formed cartridge image sized to match its ROM size code.
fn rom_image(hardware: u8, rom_code: u8, ram_code: u8) -> Vec<u8> {
    let banks = 2usize << rom_code;
    let mut image = vec![0u8; banks * ROM_BANK_SIZE];
    image[0x134..0x13E].copy_from_slice(b"POCKETTEST");
    image[0x147] = hardware;
    image[0x148] = rom_code;
    image[0x149] = ram_code;
    image[0x14A] = 0x01;
    image[0x14B] = 0x01;
    image[0x14D] = header_checksum(&image);
    image
}

#[test]
fn mbc1_enable_then_select_bank_five() {
    let mut mem = memory(ControllerType::Mbc1, 8, 0);

    mem.write(0x0000, 0x0A);
    mem.write(0x2000, 0x05);

    assert_eq!(mem.read(0x4000), 5);
    assert_eq!(mem.read(0x0000), 0);
}

#[test]
fn mbc1_bank_zero_selects_bank_one() {
    let mut mem = memory(ControllerType::Mbc1, 4, 0);
    assert_eq!(mem.read(0x4000), 1);

    mem.write(0x2000, 0x00);
    assert_eq!(mem.read(0x4000), 1);

    // Only the low five bits are wired; 0x20 also reads as zero.
    mem.write(0x2000, 0x20);
    assert_eq!(mem.read(0x4000), 1);
}

#[test]
fn mbc1_secondary_register_follows_banking_mode() {
    let mut mem = memory(ControllerType::Mbc1, 64, 4);
    mem.write(0x0000, 0x0A);
    mem.write(0x2000, 0x01);
    mem.write(0x4000, 0x01);

    // Simple mode: secondary bits extend the ROM bank, RAM stays on bank 0.
    assert_eq!(mem.read(0x4000), 0x21);
    mem.write(0xA000, 0x11);

    // Advanced mode: secondary bits pick the RAM bank instead.
    mem.write(0x6000, 0x01);
    assert_eq!(mem.read(0x4000), 0x01);
    assert_eq!(mem.read(0xA000), 0x00);
    mem.write(0xA000, 0x22);

    mem.write(0x6000, 0x00);
    assert_eq!(mem.read(0xA000), 0x11);
}

#[test]
fn mbc1_ram_enable_gates_access() {
    let mut mem = memory(ControllerType::Mbc1, 2, 1);

    mem.write(0xA000, 0x42);
    assert_eq!(mem.read(0xA000), 0x00);

    mem.write(0x0000, 0x0A);
    assert_eq!(mem.read(0xA000), 0x00);
    mem.write(0xA000, 0x42);
    assert_eq!(mem.read(0xA000), 0x42);

    mem.write(0x0000, 0x00);
    assert_eq!(mem.read(0xA000), 0x00);
}

#[test]
fn rom_bank_wraps_to_allocated_count() {
    let mut mem = memory(ControllerType::Mbc1, 4, 0);

    mem.write(0x2000, 0x05);

    assert_eq!(mem.controller().selected_rom_bank(), 5);
    assert_eq!(mem.mapped_rom_bank(), 1);
    assert_eq!(mem.read(0x4000), 1);
}

#[test]
fn ram_bank_wraps_to_allocated_count() {
    let mut mem = memory(ControllerType::Mbc5, 2, 2);
    mem.write(0x0000, 0x0A);

    mem.write(0x4000, 0x00);
    mem.write(0xA000, 0x5A);

    // Bank 2 of a two-bank cart lands back on bank 0.
    mem.write(0x4000, 0x02);
    assert_eq!(mem.read(0xA000), 0x5A);
}

#[test]
fn enabled_ram_without_banks_reads_open_bus() {
    let mut mem = memory(ControllerType::Mbc1, 2, 0);
    mem.write(0x0000, 0x0A);

    assert_eq!(mem.read(0xA000), 0xFF);
    mem.write(0xA000, 0x12);
    assert_eq!(mem.read(0xA000), 0xFF);
}

#[test]
fn rom_only_cart_ignores_bank_writes() {
    let mut mem = memory(ControllerType::None, 2, 1);

    mem.write(0x2000, 0x03);
    assert_eq!(mem.read(0x4000), 1);
    assert_eq!(mem.read(0x0000), 0);

    // No controller means no enable register: RAM is always reachable.
    mem.write(0xBFFF, 0x99);
    assert_eq!(mem.read(0xBFFF), 0x99);
}

#[test]
fn mbc2_address_bit_eight_picks_register() {
    let mut mem = memory(ControllerType::Mbc2, 16, 0);

    mem.write(0x2100, 0x03);
    assert_eq!(mem.read(0x4000), 3);

    // Bit 8 clear: RAM enable, the ROM bank is untouched.
    mem.write(0x2000, 0x0A);
    assert!(mem.controller().ram_enabled());
    assert_eq!(mem.read(0x4000), 3);

    mem.write(0x0100, 0x00);
    assert_eq!(mem.read(0x4000), 1);
}

#[test]
fn mbc2_ram_is_nibble_wide_and_mirrored() {
    let mut mem = memory(ControllerType::Mbc2, 2, 0);
    assert_eq!(mem.ram_bank_count(), 1);

    mem.write(0x0000, 0x0A);
    mem.write(0xA000, 0xAB);

    assert_eq!(mem.read(0xA000), 0xFB);
    assert_eq!(mem.read(0xA200), 0xFB);
    assert_eq!(mem.read(0xBE00), 0xFB);
}

#[test]
fn mbc3_selects_rom_and_ram_banks() {
    let mut mem = memory(ControllerType::Mbc3, 8, 4);

    mem.write(0x2000, 0x05);
    assert_eq!(mem.read(0x4000), 5);
    mem.write(0x2000, 0x00);
    assert_eq!(mem.read(0x4000), 1);

    mem.write(0x0000, 0x0A);
    mem.write(0x4000, 0x02);
    mem.write(0xA000, 0x77);

    mem.write(0x4000, 0x00);
    assert_eq!(mem.read(0xA000), 0x00);
    mem.write(0x4000, 0x02);
    assert_eq!(mem.read(0xA000), 0x77);
}

#[test]
fn mbc3_clock_counts_cpu_cycles_and_latches() {
    let mut mem = memory(ControllerType::Mbc3, 2, 0);
    mem.write(0x0000, 0x0A);
    mem.write(0x4000, 0x08);

    mem.tick(CPU_CLOCK_HZ * 3);
    assert_eq!(mem.read(0xA000), 0, "reads see the latched copy");

    mem.write(0x6000, 0x00);
    mem.write(0x6000, 0x01);
    assert_eq!(mem.read(0xA000), 3);

    mem.write(0x4000, 0x09);
    assert_eq!(mem.read(0xA000), 0);
}

#[test]
fn mbc3_clock_rolls_seconds_into_minutes() {
    let mut mem = memory(ControllerType::Mbc3, 2, 0);
    mem.write(0x0000, 0x0A);
    mem.write(0x4000, 0x08);
    mem.write(0xA000, 59);

    mem.tick(CPU_CLOCK_HZ);
    mem.write(0x6000, 0x00);
    mem.write(0x6000, 0x01);

    assert_eq!(mem.read(0xA000), 0);
    mem.write(0x4000, 0x09);
    assert_eq!(mem.read(0xA000), 1);
}

#[test]
fn mbc3_halted_clock_does_not_advance() {
    let mut mem = memory(ControllerType::Mbc3, 2, 0);
    mem.write(0x0000, 0x0A);
    mem.write(0x4000, 0x0C);
    mem.write(0xA000, 0x40);
    assert_eq!(mem.read(0xA000), 0x40);

    mem.tick(CPU_CLOCK_HZ * 2);
    mem.write(0x6000, 0x00);
    mem.write(0x6000, 0x01);

    mem.write(0x4000, 0x08);
    assert_eq!(mem.read(0xA000), 0);
}

/// Latch the MBC3 clock and read seconds through day-high.
fn latched_clock(mem: &mut Memory) -> [u8; 5] {
    mem.write(0x6000, 0x00);
    mem.write(0x6000, 0x01);
    let mut registers = [0u8; 5];
    for (register, value) in (0x08u8..=0x0C).zip(registers.iter_mut()) {
        mem.write(0x4000, register);
        *value = mem.read(0xA000);
    }
    registers
}

/// Set the MBC3 clock to `hh:mm:ss` on `day`, clock running.
fn set_clock(mem: &mut Memory, hours: u8, minutes: u8, seconds: u8, day: u16) {
    let [day_low, day_high] = day.to_le_bytes();
    for (register, value) in [
        (0x08, seconds),
        (0x09, minutes),
        (0x0A, hours),
        (0x0B, day_low),
        (0x0C, day_high & 0x01),
    ] {
        mem.write(0x4000, register);
        mem.write(0xA000, value);
    }
}

#[test]
fn mbc3_day_counter_carries_into_day_high() {
    let mut mem = memory(ControllerType::Mbc3, 2, 0);
    mem.write(0x0000, 0x0A);

    set_clock(&mut mem, 23, 59, 59, 0xFF);
    mem.tick(CPU_CLOCK_HZ);

    assert_eq!(latched_clock(&mut mem), [0, 0, 0, 0x00, 0x01]);
}

#[test]
fn mbc3_day_counter_overflows_into_day_carry() {
    let mut mem = memory(ControllerType::Mbc3, 2, 0);
    mem.write(0x0000, 0x0A);

    set_clock(&mut mem, 23, 59, 59, 0x1FF);
    assert_eq!(latched_clock(&mut mem), [59, 59, 23, 0xFF, 0x01]);

    mem.tick(CPU_CLOCK_HZ);
    assert_eq!(latched_clock(&mut mem), [0, 0, 0, 0, 0x80]);

    // The carry sticks until software clears it.
    mem.tick(CPU_CLOCK_HZ);
    assert_eq!(latched_clock(&mut mem), [1, 0, 0, 0, 0x80]);
}

#[test]
fn mbc3_enable_needs_exact_low_nibble() {
    let mut mem = memory(ControllerType::Mbc3, 2, 1);

    mem.write(0x0000, 0x1B);
    assert!(!mem.controller().ram_enabled());

    mem.write(0x0000, 0x1A);
    assert!(mem.controller().ram_enabled());
}

#[test]
fn mbc5_switches_ram_banks_and_needs_exact_enable() {
    let mut mem = memory(ControllerType::Mbc5, 2, 16);
    mem.write(0x0000, 0x0A);

    mem.write(0x4000, 0x0F);
    mem.write(0xA000, 0x5A);

    mem.write(0x4000, 0x00);
    assert_eq!(mem.read(0xA000), 0x00);
    mem.write(0x4000, 0x0F);
    assert_eq!(mem.read(0xA000), 0x5A);
    assert_eq!(mem.controller().selected_ram_bank(), 15);

    // MBC1 would take 0x1B as an enable; MBC5 wants exactly 0xA.
    mem.write(0x0000, 0x1B);
    assert_eq!(mem.read(0xA000), 0x00);

    mem.write(0x0000, 0x1A);
    assert_eq!(mem.read(0xA000), 0x5A);
}

#[test]
fn mbc5_uses_nine_bit_rom_bank() {
    let mut mem = memory(ControllerType::Mbc5, 512, 0);

    mem.write(0x2000, 0x03);
    mem.write(0x3000, 0x01);
    assert_eq!(mem.read(0x4000), 0x03);
    assert_eq!(mem.read(0x4001), 0x01);

    // With bit 8 set, a zero low byte is bank 256, not an alias.
    mem.write(0x2000, 0x00);
    assert_eq!(mem.controller().selected_rom_bank(), 0x100);

    mem.write(0x3000, 0x00);
    assert_eq!(mem.read(0x4000), 1);
}

#[test]
fn plain_regions_are_readable_storage() {
    let mut mem = memory(ControllerType::None, 2, 0);

    mem.write(0x8010, 0x01);
    mem.write(0xFE00, 0x02);
    mem.write(0xFF40, 0x03);
    mem.write(0xFF80, 0x04);
    mem.write(0xFFFF, 0x1F);

    assert_eq!(mem.read(0x8010), 0x01);
    assert_eq!(mem.read(0xFE00), 0x02);
    assert_eq!(mem.read(0xFF40), 0x03);
    assert_eq!(mem.read(0xFF80), 0x04);
    assert_eq!(mem.read(0xFFFF), 0x1F);
}

#[test]
fn echo_ram_mirrors_work_ram() {
    let mut mem = memory(ControllerType::None, 2, 0);

    mem.write(0xC123, 0x5A);
    assert_eq!(mem.read(0xE123), 0x5A);

    mem.write(0xFDFF, 0x7E);
    assert_eq!(mem.read(0xDDFF), 0x7E);
}

#[test]
fn unusable_region_reads_zero_and_drops_writes() {
    let mut mem = memory(ControllerType::None, 2, 0);

    mem.write(0xFEA0, 0x07);
    mem.write(0xFEFF, 0x07);

    assert_eq!(mem.read(0xFEA0), 0);
    assert_eq!(mem.read(0xFEFF), 0);
}

#[test]
fn memory_needs_a_rom_bank() {
    let result = Memory::new(Vec::new(), 0, ControllerType::None);
    assert!(matches!(result, Err(CartridgeError::NoRomBanks)));
}

#[test]
fn header_is_parsed() {
    let image = rom_image(0x13, 0x02, 0x03);
    let cart = Cartridge::from_bytes(&image).unwrap();
    let header = cart.header();

    assert_eq!(header.title, "POCKETTEST");
    assert!(!header.color_gb);
    assert!(!header.super_gb);
    assert!(!header.japanese);
    assert_eq!(header.hardware.controller, ControllerType::Mbc3);
    assert!(header.hardware.has_ram);
    assert!(header.hardware.has_battery);
    assert!(!header.hardware.has_timer);
    assert_eq!(header.rom_bank_count, 8);
    assert_eq!(header.ram_bank_count, 4);
    assert_eq!(header.licensee, 0x01);

    let mem = cart.into_memory().unwrap();
    assert_eq!(mem.controller().kind(), ControllerType::Mbc3);
    assert_eq!(mem.rom_bank_count(), 8);
    assert_eq!(mem.ram_bank_count(), 4);
}

#[test]
fn color_title_is_fifteen_bytes() {
    let mut image = rom_image(0x00, 0x00, 0x00);
    image[0x134..0x144].copy_from_slice(b"ABCDEFGHIJKLMNOP");
    image[0x143] = 0x80;

    let cart = Cartridge::from_bytes(&image).unwrap();

    assert!(cart.header().color_gb);
    assert_eq!(cart.header().title, "ABCDEFGHIJKLMNO");
}

#[test]
fn super_gb_needs_new_licensee_marker() {
    let mut image = rom_image(0x00, 0x00, 0x00);
    image[0x146] = 0x03;
    assert!(!Cartridge::from_bytes(&image).unwrap().header().super_gb);

    image[0x14B] = 0x33;
    image[0x144..0x146].copy_from_slice(b"01");
    let cart = Cartridge::from_bytes(&image).unwrap();
    assert!(cart.header().super_gb);
    assert_eq!(cart.header().licensee, u16::from_be_bytes(*b"01"));
}

#[test]
fn bad_checksum_still_loads() {
    let mut image = rom_image(0x01, 0x00, 0x00);
    image[0x14D] = image[0x14D].wrapping_add(1);

    let cart = Cartridge::from_bytes(&image).unwrap();
    assert_eq!(cart.controller_type(), ControllerType::Mbc1);
}

#[test]
fn oversized_image_is_cut_to_declared_banks() {
    let mut image = rom_image(0x00, 0x00, 0x00);
    image.extend_from_slice(&[0xEE; ROM_BANK_SIZE]);

    let mem = Cartridge::from_bytes(&image).unwrap().into_memory().unwrap();
    assert_eq!(mem.rom_bank_count(), 2);
}

#[test]
fn malformed_headers_are_rejected() {
    let short = vec![0u8; 0x100];
    assert_eq!(
        Cartridge::from_bytes(&short).err(),
        Some(CartridgeError::TooShort { len: 0x100 })
    );

    let unknown = rom_image(0x04, 0x00, 0x00);
    assert_eq!(
        Cartridge::from_bytes(&unknown).err(),
        Some(CartridgeError::UnsupportedHardware(0x04))
    );

    let mut rom_size = rom_image(0x00, 0x00, 0x00);
    rom_size[0x148] = 0x09;
    assert_eq!(
        Cartridge::from_bytes(&rom_size).err(),
        Some(CartridgeError::InvalidRomSize(0x09))
    );

    let mut ram_size = rom_image(0x00, 0x00, 0x00);
    ram_size[0x149] = 0x06;
    assert_eq!(
        Cartridge::from_bytes(&ram_size).err(),
        Some(CartridgeError::InvalidRamSize(0x06))
    );
}

#[test]
fn truncated_image_is_rejected() {
    let mut image = rom_image(0x00, 0x00, 0x00);
    image[0x148] = 0x01;

    assert_eq!(
        Cartridge::from_bytes(&image).err(),
        Some(CartridgeError::Truncated {
            expected_banks: 4,
            found_bytes: 2 * ROM_BANK_SIZE,
        })
    );
}

#[test]
fn run_stops_at_halt() {
    // LD A,0x42; LD (0xC000),A; HALT
    let program = [0x3E, 0x42, 0xEA, 0x00, 0xC0, 0x76];
    let mut gb = GameBoy::new(memory_with_program(ControllerType::None, 2, &program));

    let outcome = gb.run(100);

    assert_eq!(outcome.reason, StopReason::Halted);
    assert_eq!(outcome.steps, 3);
    assert_eq!(outcome.cycles, 8 + 16 + 4);
    assert_eq!(gb.memory.read(0xC000), 0x42);
}

#[test]
fn halted_cpu_keeps_ticking_when_asked() {
    let mut gb = GameBoy::new(memory_with_program(ControllerType::None, 2, &[0x76]));
    gb.set_stop_on_halt(false);

    let outcome = gb.run(10);

    assert_eq!(outcome.reason, StopReason::StepLimit);
    assert_eq!(outcome.steps, 10);
    assert_eq!(outcome.cycles, 40);
}

#[test]
fn run_honours_step_limit() {
    // JR -2
    let mut gb = GameBoy::new(memory_with_program(ControllerType::None, 2, &[0x18, 0xFE]));

    let outcome = gb.run(5);

    assert_eq!(outcome.reason, StopReason::StepLimit);
    assert_eq!(outcome.steps, 5);
    assert_eq!(outcome.cycles, 5 * 12);
    assert_eq!(gb.cpu.regs.pc, 0x0100);
}

#[test]
fn run_reports_illegal_opcode_and_locks() {
    let mut gb = GameBoy::new(memory_with_program(ControllerType::None, 2, &[0xD3]));

    let outcome = gb.run(10);

    let illegal = CpuError::IllegalOpcode {
        opcode: 0xD3,
        pc: 0x0100,
    };
    assert_eq!(outcome.reason, StopReason::Error(illegal));
    assert_eq!(outcome.steps, 0);
    assert!(gb.cpu.is_locked());
    assert_eq!(gb.step(), Err(CpuError::Locked { pc: 0x0100 }));
}

#[test]
fn program_switches_banks_through_the_bus() {
    // LD A,2; LD (0x2000),A; LD A,(0x4000); HALT
    let program = [0x3E, 0x02, 0xEA, 0x00, 0x20, 0xFA, 0x00, 0x40, 0x76];
    let mut gb = GameBoy::new(memory_with_program(ControllerType::Mbc1, 4, &program));

    let outcome = gb.run(100);

    assert_eq!(outcome.reason, StopReason::Halted);
    assert_eq!(gb.cpu.regs.a(), 2);
    assert_eq!(gb.memory.mapped_rom_bank(), 2);
}

#[test]
fn session_from_cartridge_runs() {
    let mut image = rom_image(0x01, 0x01, 0x00);
    // LD A,3; LD (0x2000),A; LD A,(0x4000); HALT
    image[0x100..0x109].copy_from_slice(&[0x3E, 0x03, 0xEA, 0x00, 0x20, 0xFA, 0x00, 0x40, 0x76]);
    image[3 * ROM_BANK_SIZE] = 0x33;

    let cart = Cartridge::from_bytes(&image).unwrap();
    let mut gb = GameBoy::from_cartridge(cart).unwrap();

    assert_eq!(gb.run(100).reason, StopReason::Halted);
    assert_eq!(gb.cpu.regs.a(), 0x33);
}
