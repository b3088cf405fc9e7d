use tracing_subscriber::EnvFilter;

/// Initialise logging at `info` level, or `debug` when the settings file
/// enables verbose output. `RUST_LOG` may refine the filter only in debug
/// mode; otherwise a stray environment variable cannot turn on verbose
/// output by accident.
pub fn init(debug: bool) {
    let filter = match (debug, EnvFilter::try_from_default_env()) {
        (true, Ok(from_env)) => from_env,
        (true, Err(_)) => EnvFilter::new("debug"),
        (false, _) => EnvFilter::new("info"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
