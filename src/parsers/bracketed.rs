use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::EngineError;
use crate::parsers::RecordParser;
use crate::record::{Level, LogRecord, ParseFailure, ParseOutcome};

/// `YYYY-MM-DD HH:MM:SS [LEVEL] message`
///
/// Digits and separators are spelled `[0-9]` and `[ \t]` because `\d` and
/// `\s` also match non-ASCII digits and Unicode spaces.
const RECORD_PATTERN: &str = r"^([0-9]{4})-([0-9]{2})-([0-9]{2})[ \t]+([0-9]{2}):([0-9]{2}):([0-9]{2})[ \t]+\[([A-Z]+)\][ \t]+(.+)$";

/// Parser for the bracketed-level record grammar
#[derive(Debug, Clone)]
pub struct BracketedParser {
    regex: Regex,
}

impl BracketedParser {
    /// Compile the record pattern.
    ///
    /// Build one instance per run and share it across workers; `Regex` is
    /// safe for concurrent matching.
    pub fn new() -> Result<Self, EngineError> {
        let regex = Regex::new(RECORD_PATTERN)?;
        Ok(Self { regex })
    }

    fn try_parse<'a>(&self, line: &'a str) -> Option<LogRecord<'a>> {
        let caps = self.regex.captures(line)?;

        let number = |i: usize| -> Option<u32> { caps.get(i)?.as_str().parse().ok() };
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        let timestamp = NaiveDate::from_ymd_opt(year, number(2)?, number(3)?)?
            .and_hms_opt(number(4)?, number(5)?, number(6)?)?;

        let level = Level::from_token(caps.get(7)?.as_str())?;
        let message = caps.get(8)?.as_str();

        Some(LogRecord {
            timestamp,
            level,
            message,
        })
    }
}

impl RecordParser for BracketedParser {
    fn parse<'a>(&self, line: &'a str, line_number: usize) -> ParseOutcome<'a> {
        self.try_parse(line).ok_or_else(|| ParseFailure {
            line_number,
            line: line.to_string(),
        })
    }
}

/// Parse a user-supplied `YYYY-MM-DD HH:MM:SS` bound for the time window.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(input.trim(), "%Y-%m-%d %H:%M:%S")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parser() -> BracketedParser {
        BracketedParser::new().unwrap()
    }

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_parse_basic_record() {
        let record = parser()
            .parse("2024-01-15 10:30:45 [INFO] Application started", 1)
            .unwrap();
        assert_eq!(record.timestamp, ts("2024-01-15 10:30:45"));
        assert_eq!(
            record.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "2024-01-15T10:30:45"
        );
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.message, "Application started");
    }

    #[test]
    fn test_parse_warn_normalizes_to_warning() {
        let p = parser();
        let warn = p.parse("2024-01-15 10:30:45 [WARN] Disk at 91%", 1).unwrap();
        let warning = p
            .parse("2024-01-15 10:30:45 [WARNING] Disk at 91%", 2)
            .unwrap();
        assert_eq!(warn.level, Level::Warning);
        assert_eq!(warn, warning);
    }

    #[test]
    fn test_parse_keeps_message_verbatim() {
        let record = parser()
            .parse("2024-01-15 10:30:45 [ERROR] Failed: [db] key=\"a b\"  trailing ", 7)
            .unwrap();
        assert_eq!(record.message, "Failed: [db] key=\"a b\"  trailing ");
    }

    #[test]
    fn test_parse_accepts_extra_whitespace_between_fields() {
        let record = parser()
            .parse("2024-01-15\t10:30:45   [DEBUG]\tcache warm", 1)
            .unwrap();
        assert_eq!(record.timestamp, ts("2024-01-15 10:30:45"));
        assert_eq!(record.level, Level::Debug);
        assert_eq!(record.message, "cache warm");
    }

    #[test]
    fn test_parse_rejects_unicode_space_separators() {
        let p = parser();
        for line in [
            "2024-01-15\u{00A0}10:30:45 [INFO] nbsp between date and time",
            "2024-01-15 10:30:45\u{2003}[INFO] em space before level",
            "2024-01-15 10:30:45 [INFO]\u{3000}ideographic space before message",
        ] {
            let failure = p.parse(line, 9).unwrap_err();
            assert_eq!(failure.line, line);
        }
    }

    #[test]
    fn test_parse_failure_carries_line_number_and_text() {
        let failure = parser().parse("not a log line", 42).unwrap_err();
        assert_eq!(failure.line_number, 42);
        assert_eq!(failure.line, "not a log line");
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        let p = parser();
        let bad = [
            "",
            "2024-01-15 [INFO] missing time",
            "2024-01-15 10:30:45 INFO no brackets",
            "2024-01-15 10:30:45 [INFO]",
            "2024-01-15 10:30:45 [INFO] ",
            "2024-01-15 10:30:45 [info] lower case level",
            "2024-01-15 10:30:45 [FATAL] unknown level",
            "2024-13-15 10:30:45 [INFO] bad month",
            "2024-02-30 10:30:45 [INFO] bad day",
            "2024-01-15 24:00:00 [INFO] bad hour",
            " 2024-01-15 10:30:45 [INFO] leading space",
            "٢٠٢٤-01-15 10:30:45 [INFO] arabic digits",
        ];
        for (i, line) in bad.iter().enumerate() {
            assert!(p.parse(line, i + 1).is_err(), "should reject: {:?}", line);
        }
    }

    #[test]
    fn test_message_borrows_from_line() {
        let line = String::from("2024-01-15 10:30:45 [INFO] borrowed");
        let record = parser().parse(&line, 1).unwrap();
        assert!(std::ptr::eq(record.message.as_ptr(), line[27..].as_ptr()));
    }

    #[test]
    fn test_parse_timestamp_bound() {
        assert!(parse_timestamp("2024-01-15 10:30:00").is_ok());
        assert!(parse_timestamp("2024-01-15").is_err());
        assert!(parse_timestamp("yesterday").is_err());
    }

    proptest! {
        #[test]
        fn prop_parse_is_idempotent(line in "\\PC{0,80}") {
            let p = parser();
            prop_assert_eq!(p.parse(&line, 3), p.parse(&line, 3));
        }

        #[test]
        fn prop_parse_recovers_generated_fields(
            secs in 0i64..4_000_000_000i64,
            level_idx in 0usize..4,
            message in "[a-zA-Z0-9][a-zA-Z0-9 :=\\[\\]_-]{0,40}",
        ) {
            let timestamp = chrono::DateTime::from_timestamp(secs, 0).unwrap().naive_utc();
            let level = Level::ALL[level_idx];
            let line = format!("{} [{}] {}", timestamp.format("%Y-%m-%d %H:%M:%S"), level, message);

            let record = parser().parse(&line, 1).unwrap();
            prop_assert_eq!(record.timestamp, timestamp);
            prop_assert_eq!(record.level, level);
            prop_assert_eq!(record.message, message.as_str());
        }
    }
}
