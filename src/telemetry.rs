//! Telemetry helpers for applications embedding `chart-geometry`.
//!
//! Geometry builds emit `tracing` events (`debug` per build, `trace` for
//! skipped values and per-bin counts). Nothing is printed unless a subscriber
//! is installed, either by the host or through the helpers below.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "chart_geometry=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or the host has
/// already set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"chart_geometry=trace"` to see per-bin counts.
#[must_use]
pub fn init_tracing_with_fallback(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::{init_default_tracing, init_tracing_with_fallback};

    #[test]
    fn second_initialization_is_a_no_op() {
        let _ = init_default_tracing();
        assert!(!init_tracing_with_fallback("chart_geometry=trace"));
    }
}
