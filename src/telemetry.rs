//! Log output setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset, blank, or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from a raw `RUST_LOG` value.
#[must_use]
pub fn filter_from(raw: Option<&str>) -> EnvFilter {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && value.len() <= 4096)
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a formatted subscriber filtered by `RUST_LOG`.
///
/// Later calls leave the first subscriber in place.
pub fn init() {
    let filter = filter_from(std::env::var("RUST_LOG").ok().as_deref());
    drop(
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .try_init(),
    );
}
