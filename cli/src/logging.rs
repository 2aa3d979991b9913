use crate::config::Settings;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `log` records from the platform crate are
/// forwarded through it.
pub fn init(settings: &Settings) {
    let directive = settings.log_directive();
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter '{}': {}", directive, e);
        EnvFilter::new("warn")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
