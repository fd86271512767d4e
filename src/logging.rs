use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize a tracing subscriber writing to stderr.
///
/// `RUST_LOG` selects the level; `default_level` applies when it is unset.
/// Stdout stays reserved for operation output, which hook scripts parse.
pub fn init(default_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
