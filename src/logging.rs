//! Log output for hosts
//!
//! The library only emits `tracing` events. Hosts that want them printed call
//! [`init`] once at startup.

use std::str::FromStr;

use tracing::Level;

/// Parses a level name, falling back to `info`
pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

/// Installs a stderr fmt subscriber; later calls are no-ops
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level(" WARN "), Level::WARN);
        assert_eq!(parse_level("loud"), Level::INFO);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init("error");
        init("trace");
    }
}
