use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over `default_directive`. Output goes to stderr so stdout
/// stays clean for summaries and JSON.
pub fn init(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
