//! Telemetry helpers for hosts embedding `site-widgets`.
//!
//! Widgets only emit `tracing` events. Hosts either call
//! `init_default_tracing` or install their own subscriber and filters.

/// Filter directive used when neither `SITE_WIDGETS_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn,site_widgets=info";

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is
/// enabled.
///
/// The filter comes from `SITE_WIDGETS_LOG`, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`]. Widget events carry their module target so timer and
/// click traces can be filtered per widget, e.g.
/// `SITE_WIDGETS_LOG=site_widgets::api::stats_counter=trace`.
///
/// Returns `false` when the feature is disabled or a global subscriber was
/// already installed by the host.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_env("SITE_WIDGETS_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
