//! Log output for the `sscc` binary.
//!
//! Events go to stderr so generated codes on stdout stay pipeable. The filter
//! is read from `RUST_LOG` and defaults to `info`; the `sscc` library logs
//! batch failures at `warn`/`error` and generator calls at `trace`.

use tracing_subscriber::{
    EnvFilter, Layer, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::config::LogFormat;

pub fn init_telemetry(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_target(false)
        .with_timer(ChronoLocal::rfc_3339());

    let fmt = match format {
        LogFormat::Pretty => fmt.pretty().boxed(),
        LogFormat::Json => fmt.json().with_current_span(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt)
        .try_init()?;

    Ok(())
}
