//! Structured logging for the provider.
//!
//! Logs go to **stderr** so that a host reading the provider's stdout never
//! sees them. Filtering follows `RUST_LOG`.
//!
//! # Quick Start
//!
//! ```ignore
//! use sendoracity_provider::{init_logging, SendoraCityProvider};
//!
//! init_logging();
//! tracing::info!("Starting provider");
//! let provider = SendoraCityProvider::new(env!("CARGO_PKG_VERSION"));
//! ```
//!
//! # Examples
//!
//! ```bash
//! # Every request the API client sends
//! RUST_LOG=sendoracity_provider::client=debug ./host
//!
//! # Warnings only
//! RUST_LOG=warn ./host
//! ```

use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Level used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LEVEL: &str = "info";

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn stderr_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

/// Initialize the global subscriber at `info` unless `RUST_LOG` says otherwise.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    init_logging_with_default(DEFAULT_LEVEL);
}

/// Like [`init_logging`], with a different fallback level.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging_with_default(default_level: &str) {
    tracing_subscriber::registry()
        .with(filter(default_level))
        .with(stderr_layer())
        .init();
}

/// Try to initialize logging, returning false if already initialized.
///
/// Integration tests call this from every test; only the first call installs
/// the subscriber.
pub fn try_init_logging() -> bool {
    tracing_subscriber::registry()
        .with(filter(DEFAULT_LEVEL))
        .with(stderr_layer())
        .try_init()
        .is_ok()
}
