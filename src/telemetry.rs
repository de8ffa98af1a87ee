//! Tracing setup for binaries and examples.
//!
//! Library code only emits spans and events; installing a subscriber is
//! the embedding application's call. [`init`] wires up the conventional
//! stack for quick starts: an fmt layer, an env filter defaulting to
//! `ideaforge=info`, and span-trace capture for pretty diagnostics.

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the default subscriber stack. Safe to call more than once;
/// later calls are no-ops.
pub fn init() {
    miette::set_panic_hook();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ideaforge=info"));
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .with(ErrorLayer::default())
        .try_init();
}
