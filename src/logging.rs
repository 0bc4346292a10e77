use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Logs go to stderr so stdout stays
/// clean for `--json` consumers.
///
/// Level selection, first match wins:
/// 1. `verbose`: debug for this crate
/// 2. `quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info
pub fn init_logger(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("dep_tracer=debug")
    } else if quiet {
        EnvFilter::new("dep_tracer=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dep_tracer=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
