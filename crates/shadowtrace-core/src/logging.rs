//! Logging configuration
//!
//! The subscriber itself is installed by the binary; this only describes it.

use tracing::Level;

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default level directive (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Write to stderr.
    pub console_output: bool,
    /// Colored console output.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Config with a specific level, everything else default.
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Parses [`Self::level`], falling back to `INFO` when unrecognised.
    pub fn parse_level(&self) -> Level {
        self.level.trim().parse().unwrap_or(Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(LogConfig::with_level("debug").parse_level(), Level::DEBUG);
        assert_eq!(LogConfig::with_level("WARN").parse_level(), Level::WARN);
        assert_eq!(LogConfig::with_level("nonsense").parse_level(), Level::INFO);
        assert_eq!(LogConfig::default().parse_level(), Level::INFO);
    }
}
