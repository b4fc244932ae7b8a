use anyhow::Result;
use std::fmt::Write;

use loglyzer::{Analysis, AnalysisReport, FilterSpec, Level};

use super::ReportFormatter;
use crate::colors::ColorScheme;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable tables, one section per statistic
pub struct DefaultFormatter {
    colors: ColorScheme,
}

impl DefaultFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self {
            colors: ColorScheme::new(use_colors),
        }
    }

    fn section(&self, out: &mut String, title: &str) {
        let _ = writeln!(out, "\n{}{}{}", self.colors.header, title, self.colors.reset);
    }

    /// Pad before coloring so escape codes don't throw off alignment
    fn level_cell(&self, level: Level, width: usize) -> String {
        let padded = format!("{:<width$}", level.as_str(), width = width);
        match level {
            Level::Error | Level::Warning => self.colors.paint_level(level, &padded),
            _ => padded,
        }
    }

    fn write_summary(&self, out: &mut String, analysis: &Analysis) {
        let report = &analysis.report;
        let _ = writeln!(
            out,
            "{}Log analysis{}",
            self.colors.header, self.colors.reset
        );
        let _ = writeln!(out, "  Lines read:      {}", report.lines_read);
        let _ = writeln!(out, "  Records:         {}", report.total_records);
        if report.parse_failures > 0 {
            let _ = writeln!(out, "  Unparsed lines:  {}", report.parse_failures);
        }
        if report.filtered_out > 0 {
            let _ = writeln!(out, "  Filtered out:    {}", report.filtered_out);
        }
        let _ = writeln!(
            out,
            "  Mode:            {} ({} chunk{})",
            analysis.mode,
            analysis.chunks,
            if analysis.chunks == 1 { "" } else { "s" }
        );
        write_filters(out, &report.filter);
    }

    fn write_levels(&self, out: &mut String, report: &AnalysisReport) {
        self.section(out, "Entries by level:");
        let _ = writeln!(out, "  {:<8} {:>10} {:>8}", "Level", "Count", "Share");
        for (level, count) in &report.by_level {
            let _ = writeln!(
                out,
                "  {} {:>10} {:>7.1}%",
                self.level_cell(*level, 8),
                count,
                report.level_percentage(*level)
            );
        }
    }

    fn write_top_errors(&self, out: &mut String, report: &AnalysisReport) {
        if report.top_errors.is_empty() {
            return;
        }
        self.section(out, &format!("Top errors (max {}):", report.top_n));
        let _ = writeln!(out, "  {:>6}  {:>10}  Message", "Count", "First line");
        for err in &report.top_errors {
            let _ = writeln!(out, "  {:>6}  {:>10}  {}", err.count, err.first_seen, err.message);
        }
    }

    fn write_hourly(&self, out: &mut String, report: &AnalysisReport) {
        if report.hourly.is_empty() {
            return;
        }
        self.section(out, "Errors by hour:");
        let _ = writeln!(
            out,
            "  {:<16} {:>10} {:>8} {:>8}",
            "Hour", "Records", "Errors", "Error %"
        );
        for stat in &report.hourly {
            let _ = writeln!(
                out,
                "  {:<16} {:>10} {:>8} {:>7.2}%",
                stat.hour.format("%Y-%m-%d %H:00"),
                stat.records,
                stat.errors,
                stat.error_rate * 100.0
            );
        }
    }
}

fn write_filters(out: &mut String, filter: &FilterSpec) {
    if filter.is_empty() {
        return;
    }
    let mut parts = Vec::new();
    if let Some(level) = filter.level {
        parts.push(format!("level={}", level));
    }
    if let Some(search) = &filter.search {
        parts.push(format!("search={:?}", search));
    }
    if let Some(since) = filter.since {
        parts.push(format!("since={}", since.format(TIME_FORMAT)));
    }
    if let Some(until) = filter.until {
        parts.push(format!("until={}", until.format(TIME_FORMAT)));
    }
    let _ = writeln!(out, "  Filters:         {}", parts.join(", "));
}

impl ReportFormatter for DefaultFormatter {
    fn format(&self, analysis: &Analysis) -> Result<String> {
        let mut out = String::new();
        self.write_summary(&mut out, analysis);
        self.write_levels(&mut out, &analysis.report);
        self.write_top_errors(&mut out, &analysis.report);
        self.write_hourly(&mut out, &analysis.report);
        Ok(out)
    }
}
