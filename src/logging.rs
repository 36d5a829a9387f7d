//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` for this crate when
/// `verbose` is on.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,recap=debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Whether the user asked for logs explicitly through `RUST_LOG`
pub fn env_filter_requested() -> bool {
    std::env::var_os(EnvFilter::DEFAULT_ENV).is_some()
}
