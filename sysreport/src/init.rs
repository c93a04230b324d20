//! Tracing setup
//!
//! Logs go to stderr; stdout carries only the completion message.

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default level for this crate's own events
pub fn default_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Initialize tracing/logging
///
/// `RUST_LOG` directives are honored; `crate_name` additionally logs at
/// `level`. Set `LOG_FORMAT=json` for structured output.
pub fn init_tracing(crate_name: &str, level: Level) -> anyhow::Result<()> {
    let directive = format!("{}={}", crate_name, level.as_str().to_ascii_lowercase());
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.with_ansi(false))
            .try_init()?;
    }

    Ok(())
}
