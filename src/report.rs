//! Final statistics snapshot for one run
//!
//! The report is assembled once from the fully merged aggregate and is never
//! mutated afterwards. Everything in it is ordered deterministically so that
//! two runs over the same input compare equal field by field.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregate::PartialAggregate;
use crate::filter::FilterSpec;
use crate::record::Level;

/// One ranked error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorFrequency {
    pub message: String,
    pub count: usize,
    /// Line number of the first occurrence
    pub first_seen: usize,
}

/// Counts for one clock hour
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyStat {
    /// Start of the hour
    #[serde(serialize_with = "serialize_hour")]
    pub hour: NaiveDateTime,
    pub records: usize,
    pub errors: usize,
    /// errors / records within the hour, in `[0, 1]`
    pub error_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub lines_read: usize,
    pub total_records: usize,
    pub parse_failures: usize,
    /// Parsed records removed by the filter
    pub filtered_out: usize,
    /// Only levels with at least one record
    pub by_level: BTreeMap<Level, usize>,
    pub top_n: usize,
    pub top_errors: Vec<ErrorFrequency>,
    /// Chronological
    pub hourly: Vec<HourlyStat>,
    pub filter: FilterSpec,
}

fn serialize_hour<S: serde::Serializer>(hour: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hour.format("%Y-%m-%d %H:00").to_string())
}

impl AnalysisReport {
    pub fn from_aggregate(aggregate: &PartialAggregate, top_n: usize, filter: &FilterSpec) -> Self {
        let by_level = Level::ALL
            .iter()
            .map(|level| (*level, aggregate.level_count(*level)))
            .filter(|(_, count)| *count > 0)
            .collect();

        let top_errors = aggregate
            .top_errors(top_n)
            .into_iter()
            .map(|(message, tally)| ErrorFrequency {
                message: message.to_string(),
                count: tally.count,
                first_seen: tally.first_seen,
            })
            .collect();

        let hourly = aggregate
            .hours()
            .iter()
            .map(|(hour, tally)| HourlyStat {
                hour: *hour,
                records: tally.records,
                errors: tally.errors,
                error_rate: tally.error_rate(),
            })
            .collect();

        Self {
            lines_read: aggregate.lines_read(),
            total_records: aggregate.total_records(),
            parse_failures: aggregate.parse_failures(),
            filtered_out: aggregate.filtered_out(),
            by_level,
            top_n,
            top_errors,
            hourly,
            filter: filter.clone(),
        }
    }

    /// True when the filter left nothing to report on.
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }

    pub fn level_count(&self, level: Level) -> usize {
        self.by_level.get(&level).copied().unwrap_or(0)
    }

    /// Share of all reported records at `level`, in percent.
    pub fn level_percentage(&self, level: Level) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            self.level_count(level) as f64 * 100.0 / self.total_records as f64
        }
    }

    pub fn error_count(&self) -> usize {
        self.level_count(Level::Error)
    }
}
