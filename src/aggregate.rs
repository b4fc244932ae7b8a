//! Per-chunk accumulation and merging of log statistics
//!
//! A [`PartialAggregate`] is owned by exactly one worker while it folds in
//! the records of its chunk. Partials are then merged in chunk order. For
//! every counter, merging the partials of two adjacent chunks yields the
//! same value as accumulating both chunks in one pass.

use chrono::{NaiveDateTime, Timelike};
use std::collections::{BTreeMap, HashMap};

use crate::record::{Level, LogRecord};

/// Occurrences of one distinct error message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTally {
    pub count: usize,
    /// Line number of the earliest occurrence in the full input
    pub first_seen: usize,
}

/// Records and errors falling within one clock hour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HourTally {
    pub records: usize,
    pub errors: usize,
}

impl HourTally {
    pub fn error_rate(&self) -> f64 {
        if self.records == 0 {
            0.0
        } else {
            self.errors as f64 / self.records as f64
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialAggregate {
    lines_read: usize,
    parse_failures: usize,
    filtered_out: usize,
    level_counts: [usize; Level::COUNT],
    error_messages: HashMap<String, MessageTally>,
    hours: BTreeMap<NaiveDateTime, HourTally>,
}

/// Truncate a timestamp to the start of its hour, keeping the date.
pub fn hour_bucket(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .date()
        .and_hms_opt(timestamp.hour(), 0, 0)
        .unwrap_or(timestamp)
}

impl PartialAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note_line_read(&mut self) {
        self.lines_read += 1;
    }

    pub fn note_parse_failure(&mut self) {
        self.parse_failures += 1;
    }

    pub fn note_filtered_out(&mut self) {
        self.filtered_out += 1;
    }

    /// Fold one record that passed the filter.
    ///
    /// `line_number` is the record's global 1-based line number; it orders
    /// distinct error messages with equal counts.
    pub fn accumulate(&mut self, record: &LogRecord<'_>, line_number: usize) {
        self.level_counts[record.level.index()] += 1;

        let is_error = record.level == Level::Error;
        let hour = self.hours.entry(hour_bucket(record.timestamp)).or_default();
        hour.records += 1;

        if is_error {
            hour.errors += 1;
            match self.error_messages.get_mut(record.message) {
                Some(tally) => {
                    tally.count += 1;
                    tally.first_seen = tally.first_seen.min(line_number);
                }
                None => {
                    self.error_messages.insert(
                        record.message.to_string(),
                        MessageTally {
                            count: 1,
                            first_seen: line_number,
                        },
                    );
                }
            }
        }
    }

    /// Combine another partial into this one.
    ///
    /// Counts are summed. A message seen on both sides keeps the smaller
    /// `first_seen`, so the tie order of [`Self::top_errors`] does not depend
    /// on how the input was chunked.
    pub fn merge(&mut self, other: PartialAggregate) {
        self.lines_read += other.lines_read;
        self.parse_failures += other.parse_failures;
        self.filtered_out += other.filtered_out;

        for (mine, theirs) in self.level_counts.iter_mut().zip(other.level_counts) {
            *mine += theirs;
        }

        for (message, tally) in other.error_messages {
            self.error_messages
                .entry(message)
                .and_modify(|existing| {
                    existing.count += tally.count;
                    existing.first_seen = existing.first_seen.min(tally.first_seen);
                })
                .or_insert(tally);
        }

        for (hour, tally) in other.hours {
            let existing = self.hours.entry(hour).or_default();
            existing.records += tally.records;
            existing.errors += tally.errors;
        }
    }

    /// Merge `other` into `self` and return the result.
    pub fn merged(mut self, other: PartialAggregate) -> Self {
        self.merge(other);
        self
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn parse_failures(&self) -> usize {
        self.parse_failures
    }

    pub fn filtered_out(&self) -> usize {
        self.filtered_out
    }

    /// Number of records that passed the filter.
    pub fn total_records(&self) -> usize {
        self.level_counts.iter().sum()
    }

    pub fn level_count(&self, level: Level) -> usize {
        self.level_counts[level.index()]
    }

    pub fn hours(&self) -> &BTreeMap<NaiveDateTime, HourTally> {
        &self.hours
    }

    pub fn error_messages(&self) -> &HashMap<String, MessageTally> {
        &self.error_messages
    }

    /// The `n` most frequent error messages, by count descending then by
    /// earliest first occurrence.
    pub fn top_errors(&self, n: usize) -> Vec<(&str, MessageTally)> {
        if n == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(&str, MessageTally)> = self
            .error_messages
            .iter()
            .map(|(message, tally)| (message.as_str(), *tally))
            .collect();

        ranked.sort_unstable_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        ranked.truncate(n);
        ranked
    }
}
