//! Log setup shared by the binaries.
//!
//! Results go to stdout; logs go to stderr so that piping the report stays
//! clean.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Parse a `--log-level` value. Unknown values fall back to `warn`.
#[must_use]
pub fn parse_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Install the global stderr subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn init_logging(level: &str) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("INFO"), Level::INFO);
        assert_eq!(parse_level("nonsense"), Level::WARN);
    }
}
