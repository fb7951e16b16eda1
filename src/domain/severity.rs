//! Severity levels for templated events.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity of a triggered event.
///
/// Levels are ordered from least to most severe. Only [`Severity::Error`]
/// is subject to windowed suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Diagnostic detail
    Debug,
    /// Normal operation
    Info,
    /// Something unexpected but recoverable
    Warn,
    /// A failure; repeated occurrences are suppressed within a window
    Error,
}

impl Severity {
    /// All levels, least severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Lowercase name, as used in counter keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// Whether this is the highest severity, the only one that is counted.
    pub fn is_highest(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown severity name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity level: {0:?}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

impl From<Severity> for tracing::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::Error));
    }

    #[test]
    fn test_only_error_is_highest() {
        for level in Severity::ALL {
            assert_eq!(level.is_highest(), level == Severity::Error);
        }
    }

    #[test]
    fn test_parse_round_trips_names() {
        for level in Severity::ALL {
            assert_eq!(level.as_str().parse::<Severity>(), Ok(level));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_and_accepts_warning() {
        assert_eq!("ERROR".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warn));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "fatal".parse::<Severity>().unwrap_err();
        assert_eq!(err, ParseSeverityError("fatal".to_string()));
        assert_eq!(err.to_string(), "unknown severity level: \"fatal\"");
    }

    #[test]
    fn test_tracing_level_mapping() {
        assert_eq!(tracing::Level::from(Severity::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(Severity::Warn), tracing::Level::WARN);
        assert_eq!(tracing::Level::from(Severity::Error), tracing::Level::ERROR);
    }
}
