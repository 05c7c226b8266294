use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `EVPLAN_LOG=evplan_core=debug`.
const LOG_ENV: &str = "EVPLAN_LOG";

/// Log to stderr so command output on stdout stays clean.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be set when running under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
