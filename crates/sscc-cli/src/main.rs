#![doc = include_str!("../README.md")]

mod cli;

use clap::Parser;
use cli::commands::run;
use cli::config::{CliArgs, Config};
use cli::telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = Config::try_from(args)?;

    init_telemetry(config.log_format)?;
    log_startup_info(&config);

    let stdout = std::io::stdout();
    run(&config, &mut stdout.lock())
}

fn log_startup_info(config: &Config) {
    if cfg!(debug_assertions) {
        tracing::debug!("Starting sscc with full config: {:#?}", config);
    } else {
        tracing::debug!(
            counter_file = %config.counter_file.display(),
            extension_digit = config.layout.extension_digit(),
            company_prefix = config.layout.company_prefix(),
            "Starting sscc"
        );
    }
}
