//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::Env;

/// Default filter for a given number of `-v` flags.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Setup logging for the client.
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(verbosity: u8) {
    env_logger::Builder::from_env(Env::default().default_filter_or(level_for(verbosity)))
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(7), "trace");
    }
}
