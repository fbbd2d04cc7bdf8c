//! Cartridge header parsing and ROM bank splitting.
//!
//! The header lives at 0x0100–0x014F of the first ROM bank. Only the
//! controller type and the two size codes matter to the memory bus; the
//! rest is kept for display and diagnostics.

use super::mbc::ControllerType;
use super::memory::{Memory, RomBank};
use crate::error::CartridgeError;
use crate::ROM_BANK_SIZE;

const TITLE_START: usize = 0x134;
const TITLE_END: usize = 0x144;
const CGB_FLAG: usize = 0x143;
const NEW_LICENSEE: usize = 0x144;
const SGB_FLAG: usize = 0x146;
const HARDWARE_TYPE: usize = 0x147;
const ROM_SIZE: usize = 0x148;
const RAM_SIZE: usize = 0x149;
const DESTINATION: usize = 0x14A;
const OLD_LICENSEE: usize = 0x14B;
const VERSION: usize = 0x14C;
const HEADER_CHECKSUM: usize = 0x14D;
const GLOBAL_CHECKSUM: usize = 0x14E;
const HEADER_END: usize = 0x150;

/// Old licensee value meaning "see the new licensee code".
const USE_NEW_LICENSEE: u8 = 0x33;

/// Extra hardware wired onto the cartridge, decoded from byte 0x147.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Hardware {
    pub controller: ControllerType,
    pub has_ram: bool,
    pub has_battery: bool,
    pub has_timer: bool,
    pub has_rumble: bool,
}

impl Hardware {
    fn decode(code: u8) -> Result<Self, CartridgeError> {
        use ControllerType::*;

        let (controller, has_ram, has_battery, has_timer, has_rumble) = match code {
            0x00 => (None, false, false, false, false),
            0x01 => (Mbc1, false, false, false, false),
            0x02 => (Mbc1, true, false, false, false),
            0x03 => (Mbc1, true, true, false, false),
            0x05 => (Mbc2, false, false, false, false),
            0x06 => (Mbc2, false, true, false, false),
            0x08 => (None, true, false, false, false),
            0x09 => (None, true, true, false, false),
            0x0F => (Mbc3, false, true, true, false),
            0x10 => (Mbc3, true, true, true, false),
            0x11 => (Mbc3, false, false, false, false),
            0x12 => (Mbc3, true, false, false, false),
            0x13 => (Mbc3, true, true, false, false),
            0x19 => (Mbc5, false, false, false, false),
            0x1A => (Mbc5, true, false, false, false),
            0x1B => (Mbc5, true, true, false, false),
            0x1C => (Mbc5, false, false, false, true),
            0x1D => (Mbc5, true, false, false, true),
            0x1E => (Mbc5, true, true, false, true),
            other => return Err(CartridgeError::UnsupportedHardware(other)),
        };

        Ok(Self {
            controller,
            has_ram,
            has_battery,
            has_timer,
            has_rumble,
        })
    }
}

/// Decoded cartridge header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CartridgeHeader {
    pub title: String,
    pub color_gb: bool,
    pub super_gb: bool,
    pub hardware: Hardware,
    pub rom_bank_count: usize,
    pub ram_bank_count: usize,
    pub japanese: bool,
    pub licensee: u16,
    pub version: u8,
    pub header_checksum: u8,
    pub global_checksum: u16,
}

fn rom_bank_count(code: u8) -> Result<usize, CartridgeError> {
    match code {
        0x00..=0x08 => Ok(2 << code),
        0x52 => Ok(72),
        0x53 => Ok(80),
        0x54 => Ok(96),
        other => Err(CartridgeError::InvalidRomSize(other)),
    }
}

fn ram_bank_count(code: u8) -> Result<usize, CartridgeError> {
    match code {
        0x00 => Ok(0),
        // 2 KiB is rounded up to a full 8 KiB bank.
        0x01 | 0x02 => Ok(1),
        0x03 => Ok(4),
        0x04 => Ok(16),
        0x05 => Ok(8),
        other => Err(CartridgeError::InvalidRamSize(other)),
    }
}

/// Header checksum over 0x134–0x14C as the boot ROM computes it.
fn header_checksum(bytes: &[u8]) -> u8 {
    bytes[TITLE_START..HEADER_CHECKSUM]
        .iter()
        .fold(0u8, |x, &b| x.wrapping_sub(b).wrapping_sub(1))
}

impl CartridgeHeader {
    /// Parse the header from a ROM image. `bytes` must hold at least
    /// 0x150 bytes.
    fn parse(bytes: &[u8]) -> Result<Self, CartridgeError> {
        let color_gb = matches!(bytes[CGB_FLAG], 0x80 | 0xC0);
        // CGB carts reuse the last title byte for the flag.
        let title_end = if color_gb { CGB_FLAG } else { TITLE_END };
        let title = &bytes[TITLE_START..title_end];
        let title = title.split(|&b| b == 0).next().unwrap_or_default();
        let title = String::from_utf8_lossy(title).trim_end().to_string();

        let old_licensee = bytes[OLD_LICENSEE];
        let licensee = if old_licensee == USE_NEW_LICENSEE {
            u16::from_be_bytes([bytes[NEW_LICENSEE], bytes[NEW_LICENSEE + 1]])
        } else {
            old_licensee as u16
        };

        Ok(Self {
            title,
            color_gb,
            super_gb: bytes[SGB_FLAG] == 0x03 && old_licensee == USE_NEW_LICENSEE,
            hardware: Hardware::decode(bytes[HARDWARE_TYPE])?,
            rom_bank_count: rom_bank_count(bytes[ROM_SIZE])?,
            ram_bank_count: ram_bank_count(bytes[RAM_SIZE])?,
            japanese: bytes[DESTINATION] == 0x00,
            licensee,
            version: bytes[VERSION],
            header_checksum: bytes[HEADER_CHECKSUM],
            global_checksum: u16::from_be_bytes([
                bytes[GLOBAL_CHECKSUM],
                bytes[GLOBAL_CHECKSUM + 1],
            ]),
        })
    }
}

/// A parsed cartridge image: header plus ROM split into 16 KiB banks.
pub struct Cartridge {
    header: CartridgeHeader,
    rom_banks: Vec<RomBank>,
}

impl Cartridge {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CartridgeError> {
        if bytes.len() < HEADER_END {
            return Err(CartridgeError::TooShort { len: bytes.len() });
        }

        let header = CartridgeHeader::parse(bytes)?;

        let computed = header_checksum(bytes);
        if computed != header.header_checksum {
            log::warn!(
                "header checksum mismatch: header says {:#04X}, computed {:#04X}",
                header.header_checksum,
                computed
            );
        }

        let expected_len = header.rom_bank_count * ROM_BANK_SIZE;
        if bytes.len() < expected_len {
            return Err(CartridgeError::Truncated {
                expected_banks: header.rom_bank_count,
                found_bytes: bytes.len(),
            });
        }
        if bytes.len() > expected_len {
            log::warn!(
                "ROM image is {} bytes but the header declares {} banks; ignoring the tail",
                bytes.len(),
                header.rom_bank_count
            );
        }

        let rom_banks = bytes[..expected_len]
            .chunks_exact(ROM_BANK_SIZE)
            .map(|chunk| {
                let mut bank = Box::new([0u8; ROM_BANK_SIZE]);
                bank.copy_from_slice(chunk);
                bank
            })
            .collect();

        log::info!(
            "loaded \"{}\": {:?}, {} ROM banks, {} RAM banks",
            header.title,
            header.hardware.controller,
            header.rom_bank_count,
            header.ram_bank_count
        );

        Ok(Self { header, rom_banks })
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub fn controller_type(&self) -> ControllerType {
        self.header.hardware.controller
    }

    pub fn into_memory(self) -> Result<Memory, CartridgeError> {
        Memory::new(
            self.rom_banks,
            self.header.ram_bank_count,
            self.header.hardware.controller,
        )
    }
}
