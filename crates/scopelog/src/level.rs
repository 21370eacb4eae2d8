use std::fmt;

use serde::{Deserialize, Serialize};

use crate::style::Style;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
    Fatal,
    Debug,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Debug,
    ];

    /// Single-letter label shown in the severity column
    pub const fn code(self) -> &'static str {
        match self {
            Level::Info => "I",
            Level::Warn => "W",
            Level::Error => "E",
            Level::Fatal => "F",
            Level::Debug => "D",
        }
    }

    /// Lowercase name, used by the JSON record format
    pub const fn description(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Debug => "debug",
        }
    }

    pub const fn style(self) -> Style {
        match self {
            Level::Info => Style::Cyan,
            Level::Warn => Style::Yellow,
            Level::Error | Level::Fatal => Style::Red,
            Level::Debug => Style::Magenta,
        }
    }

    pub fn from_code(code: &str) -> Option<Level> {
        Self::ALL.into_iter().find(|level| level.code() == code)
    }
}

/// Description for a level code; codes without a level describe themselves.
pub fn description_for(code: &str) -> &str {
    match Level::from_code(code) {
        Some(level) => level.description(),
        None => code,
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_for_known_codes() {
        let cases = [
            ("I", "info"),
            ("W", "warn"),
            ("E", "error"),
            ("F", "fatal"),
            ("D", "debug"),
        ];
        for (code, expected) in cases {
            assert_eq!(description_for(code), expected, "code {}", code);
        }
    }

    #[test]
    fn test_description_for_unknown_code() {
        assert_eq!(description_for("LA"), "LA");
    }

    #[test]
    fn test_from_code_round_trips_all_levels() {
        for level in Level::ALL {
            assert_eq!(Level::from_code(level.code()), Some(level));
        }
    }

    #[test]
    fn test_serializes_as_description() {
        assert_eq!(serde_json::to_string(&Level::Warn).unwrap(), "\"warn\"");
    }

    #[test]
    fn test_fatal_shares_error_color() {
        assert_eq!(Level::Fatal.style(), Level::Error.style());
    }
}
