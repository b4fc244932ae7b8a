use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Severity of a log record.
///
/// `WARN` and `WARNING` in the input both map to [`Level::Warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl Level {
    pub const COUNT: usize = 4;
    pub const ALL: [Level; Self::COUNT] = [Level::Debug, Level::Info, Level::Warning, Level::Error];

    /// Match a level token exactly as it appears between the brackets.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "DEBUG" => Some(Level::Debug),
            "INFO" => Some(Level::Info),
            "WARN" | "WARNING" => Some(Level::Warning),
            "ERROR" => Some(Level::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    /// Case-insensitive, for user-supplied options rather than log input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_token(&s.to_ascii_uppercase())
            .ok_or_else(|| format!("unknown level '{}' (expected DEBUG, INFO, WARN, WARNING or ERROR)", s))
    }
}

/// One structured log entry.
///
/// The message borrows from the source line; records live only as long as
/// the chunk being aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord<'a> {
    pub timestamp: NaiveDateTime,
    pub level: Level,
    pub message: &'a str,
}

/// A line that did not match the record grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    /// 1-based line number in the full input
    pub line_number: usize,
    pub line: String,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.line)
    }
}

/// Result of parsing one line.
pub type ParseOutcome<'a> = Result<LogRecord<'a>, ParseFailure>;
