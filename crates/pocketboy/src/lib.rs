use std::path::PathBuf;

use anyhow::{Context, Result};
use pocketboy_gb::{Cartridge, GameBoy, RunOutcome};
use typed_builder::TypedBuilder;

/// Step budget when none is given.
pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

/// How a cartridge run is bounded.
#[derive(Clone, Debug, TypedBuilder)]
pub struct RunConfig {
    pub rom_path: PathBuf,
    #[builder(default = DEFAULT_MAX_STEPS)]
    pub max_steps: u64,
    /// Log every executed instruction at trace level.
    #[builder(default = false)]
    pub trace: bool,
    /// Return once the CPU parks in HALT/STOP. Nothing can wake it, so
    /// the rest of the budget would only burn idle cycles.
    #[builder(default = true)]
    pub stop_on_halt: bool,
}

impl RunConfig {
    /// Log level the host should install for this run: trace output is
    /// what `trace` asks for, everything else stays at info.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.trace {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        }
    }
}

pub fn run(config: &RunConfig) -> Result<RunOutcome> {
    let rom = std::fs::read(&config.rom_path)
        .with_context(|| format!("failed to read ROM file {}", config.rom_path.display()))?;
    run_rom(&rom, config)
}

/// Run an in-memory cartridge image under `config`. `rom_path` is only
/// used for messages.
pub fn run_rom(rom: &[u8], config: &RunConfig) -> Result<RunOutcome> {
    let cartridge = Cartridge::from_bytes(rom)
        .with_context(|| format!("invalid cartridge {}", config.rom_path.display()))?;
    let mut gb = GameBoy::from_cartridge(cartridge).context("failed to map cartridge memory")?;
    gb.set_stop_on_halt(config.stop_on_halt);

    if config.trace && log::max_level() < log::LevelFilter::Trace {
        log::warn!(
            "instruction trace requested but the logger is capped at {}; \
             install it with RunConfig::log_level()",
            log::max_level()
        );
    }

    let outcome = gb.run(config.max_steps);
    log::info!(
        "stopped after {} steps ({} cycles): {:?}",
        outcome.steps,
        outcome.cycles,
        outcome.reason
    );
    log::info!("final registers: {}", gb.cpu.regs);

    Ok(outcome)
}
