use chrono::NaiveDateTime;
use serde::Serialize;

use crate::record::{Level, LogRecord};

/// Constraints a record must satisfy to be aggregated.
///
/// Every field is optional; an absent constraint always passes and the
/// present ones are combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    /// Inclusive lower bound
    pub since: Option<NaiveDateTime>,
    /// Inclusive upper bound
    pub until: Option<NaiveDateTime>,
    pub level: Option<Level>,
    /// Case-sensitive literal substring of the message
    pub search: Option<String>,
}

impl FilterSpec {
    pub fn errors_only() -> Self {
        Self {
            level: Some(Level::Error),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.since.is_none() && self.until.is_none() && self.level.is_none() && self.search.is_none()
    }

    pub fn matches(&self, record: &LogRecord<'_>) -> bool {
        self.within_window(record) && self.matches_level(record) && self.matches_search(record)
    }

    fn within_window(&self, record: &LogRecord<'_>) -> bool {
        if let Some(since) = self.since {
            if record.timestamp < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if record.timestamp > until {
                return false;
            }
        }
        true
    }

    fn matches_level(&self, record: &LogRecord<'_>) -> bool {
        self.level.map_or(true, |level| record.level == level)
    }

    fn matches_search(&self, record: &LogRecord<'_>) -> bool {
        self.search
            .as_deref()
            .map_or(true, |needle| record.message.contains(needle))
    }
}
