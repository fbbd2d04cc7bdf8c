use pocketboy::{RunConfig, DEFAULT_MAX_STEPS};
use pocketboy_gb::StopReason;

fn main() -> anyhow::Result<()> {
    let mut rom_path = None;
    let mut max_steps = None;
    let mut trace = false;

    for arg in std::env::args().skip(1) {
        if arg == "--trace" {
            trace = true;
        } else if rom_path.is_none() {
            rom_path = Some(arg);
        } else if max_steps.is_none() {
            let steps: u64 = arg
                .parse()
                .map_err(|_| anyhow::anyhow!("max_steps must be a number, got '{}'", arg))?;
            max_steps = Some(steps);
        } else {
            eprintln!("Unexpected argument '{}'", arg);
            std::process::exit(1);
        }
    }

    let Some(rom_path) = rom_path else {
        eprintln!(
            "No ROM path provided.\n\
             Usage: pocketboy <rom> [max_steps] [--trace]"
        );
        std::process::exit(1);
    };

    let config = RunConfig::builder()
        .rom_path(rom_path.into())
        .max_steps(max_steps.unwrap_or(DEFAULT_MAX_STEPS))
        .trace(trace)
        .build();

    // RUST_LOG still wins when set.
    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    log::info!("Running ROM path: '{}'", config.rom_path.display());
    let outcome = pocketboy::run(&config)?;
    if let StopReason::Error(err) = outcome.reason {
        eprintln!("{}", err);
        std::process::exit(2);
    }
    Ok(())
}
