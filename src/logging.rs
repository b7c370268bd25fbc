//! Logging setup
//!
//! The filter sits behind a reload layer so a configuration with
//! `debug.print_debug` can raise it to `debug` after startup.

use std::sync::OnceLock;

use anyhow::Result;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Install the global subscriber. `RUST_LOG` is respected unless `verbose`
/// is set.
pub fn init(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()?;

    let _ = FILTER_HANDLE.set(handle);
    Ok(())
}

/// Raise the global filter to `debug`. No-op before [`init`].
pub fn raise_to_debug() {
    let Some(handle) = FILTER_HANDLE.get() else {
        return;
    };

    match handle.modify(|filter| *filter = EnvFilter::new("debug")) {
        Ok(()) => debug!("Debug logging enabled by configuration"),
        Err(e) => warn!("Failed to raise log level: {}", e),
    }
}
