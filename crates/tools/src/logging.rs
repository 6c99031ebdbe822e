//! Subscriber setup shared by the tool binaries. Logs go to stderr so map output stays clean.

use std::io;

use tracing_subscriber::EnvFilter;

/// Honors `RUST_LOG`, falling back to `default_filter`. Safe to call more than once.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact();
    // A second call finds a subscriber already installed.
    subscriber.try_init().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_keeps_the_first_subscriber() {
        init("warn");
        init("debug");
        assert!(tracing::dispatcher::has_been_set());
    }
}
