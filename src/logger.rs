use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system
///
/// Level is controlled through the RUST_LOG environment variable, default: info.
/// Logs go to stderr so the compact report on stdout stays parseable.
///
/// Examples:
/// - RUST_LOG=debug rureport ingest events.jsonl
/// - RUST_LOG=rureport=trace rureport ingest
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::debug!("Logger initialized");
}
