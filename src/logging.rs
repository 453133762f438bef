//! Tracing setup for the CLI.
//!
//! Logs go to stderr so that table and JSON output on stdout stay clean.
//! `RUST_LOG` always wins over the built-in default.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Installs the global subscriber.
///
/// Default level is `warn`, or `debug` for `upsc_prep` when `verbose` is set.
/// The TUI passes `quiet` to keep the alternate screen free of log lines.
pub fn init_tracing(verbose: bool, quiet: bool) {
    let default = if quiet {
        "off"
    } else if verbose {
        "warn,upsc_prep=debug"
    } else {
        "warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(env_filter),
        )
        .init();
}
