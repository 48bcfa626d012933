use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,viewfinder=debug";

/// Initialize console logging.
///
/// `RUST_LOG` overrides the default filter. With `verbose` every viewfinder
/// crate logs at trace level. With `json` each event is one JSON object,
/// which keeps the run's `correlation_id` span field machine-readable.
/// Logs go to stderr so stdout carries only the response envelope.
pub fn init_telemetry(verbose: bool, json: bool) {
    let default = if verbose {
        "debug,viewfinder=trace,viewfinder_pipeline=trace"
    } else {
        DEFAULT_FILTER
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!(json, verbose, "Telemetry initialized");
}
