//! Observability

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logging: defaults to info, overridable via RUST_LOG.
pub fn init() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(fmt::layer())
        .init();
}
