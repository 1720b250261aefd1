use tracing_subscriber::EnvFilter;

/// Log to stderr at `level`, one of error, warn, info, debug, trace.
pub fn init_logging(level: &str) {
    let env_filter = EnvFilter::new(level);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
