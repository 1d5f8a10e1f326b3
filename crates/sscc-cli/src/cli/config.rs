use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use sscc::{MAX_SERIAL_REFERENCE, SsccLayout};

/// Command-line arguments for the `sscc` binary.
///
/// Every global option falls back to an environment variable, which in turn
/// may be loaded from a `.env` file.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sscc",
    version,
    about = "Issue and check GS1 SSCC codes from a file-backed counter"
)]
pub struct CliArgs {
    /// File holding the counter as a decimal integer.
    ///
    /// Environment variable: `SSCC_COUNTER_FILE`
    #[arg(long, global = true, env = "SSCC_COUNTER_FILE", default_value = "sscc.counter")]
    pub counter_file: PathBuf,

    /// Extension digit placed after the application identifier (0-9).
    ///
    /// Environment variable: `SSCC_EXTENSION_DIGIT`
    #[arg(long, global = true, env = "SSCC_EXTENSION_DIGIT", default_value_t = 8)]
    pub extension_digit: u8,

    /// Five-digit GS1 company prefix.
    ///
    /// Environment variable: `SSCC_COMPANY_PREFIX`
    #[arg(long, global = true, env = "SSCC_COMPANY_PREFIX", default_value = "59657")]
    pub company_prefix: String,

    /// Log output format. Verbosity follows `RUST_LOG`.
    ///
    /// Environment variable: `SSCC_LOG_FORMAT`
    #[arg(long, global = true, env = "SSCC_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write the initial counter value.
    Init {
        /// First serial reference to hand out.
        #[arg(long, default_value_t = 0)]
        start: u64,

        /// Replace an existing counter file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Print the current counter and the code it will produce next.
    Show,

    /// Generate codes, one per line.
    Next {
        /// Number of codes to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Print the human readable interpretation instead of bare digits.
        #[arg(long, default_value_t = false)]
        hri: bool,
    },

    /// Validate codes; exits non-zero if any is invalid.
    Check {
        #[arg(required = true)]
        codes: Vec<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub counter_file: PathBuf,
    pub layout: SsccLayout,
    pub log_format: LogFormat,
    pub command: Command,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let layout = SsccLayout::new(args.extension_digit, &args.company_prefix)
            .context("invalid SSCC_EXTENSION_DIGIT / SSCC_COMPANY_PREFIX")?;

        match &args.command {
            Command::Init { start, .. } if *start > MAX_SERIAL_REFERENCE => {
                bail!("--start ({start}) exceeds the largest serial reference ({MAX_SERIAL_REFERENCE})");
            }
            Command::Next { count: 0, .. } => bail!("--count must be greater than 0"),
            Command::Next { count, .. } if *count as u64 > MAX_SERIAL_REFERENCE + 1 => {
                bail!(
                    "--count ({count}) exceeds the number of serial references ({})",
                    MAX_SERIAL_REFERENCE + 1
                );
            }
            _ => {}
        }

        Ok(Self {
            counter_file: args.counter_file,
            layout,
            log_format: args.log_format,
            command: args.command,
        })
    }
}
