use anyhow::{Context, Result};

use loglyzer::Analysis;

use super::ReportFormatter;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Long-format CSV: one `metric,key,value` row per statistic
#[derive(Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }
}

fn row<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    metric: &str,
    key: &str,
    value: impl std::fmt::Display,
) -> csv::Result<()> {
    writer.write_record([metric, key, value.to_string().as_str()])
}

impl ReportFormatter for CsvFormatter {
    fn format(&self, analysis: &Analysis) -> Result<String> {
        let report = &analysis.report;
        let mut writer = csv::Writer::from_writer(Vec::new());

        row(&mut writer, "metric", "key", "value")?;
        row(&mut writer, "lines", "", report.lines_read)?;
        row(&mut writer, "total", "", report.total_records)?;
        if report.parse_failures > 0 {
            row(&mut writer, "skipped", "", report.parse_failures)?;
        }
        if report.filtered_out > 0 {
            row(&mut writer, "filtered_out", "", report.filtered_out)?;
        }

        let filter = &report.filter;
        if let Some(level) = filter.level {
            row(&mut writer, "filter", "level", level)?;
        }
        if let Some(search) = &filter.search {
            row(&mut writer, "filter", "search", search)?;
        }
        if let Some(since) = filter.since {
            row(&mut writer, "filter", "since", since.format(TIME_FORMAT))?;
        }
        if let Some(until) = filter.until {
            row(&mut writer, "filter", "until", until.format(TIME_FORMAT))?;
        }

        for (level, count) in &report.by_level {
            row(&mut writer, "level", level.as_str(), count)?;
        }

        for err in &report.top_errors {
            row(&mut writer, "top_error", &err.message, err.count)?;
        }

        for stat in &report.hourly {
            let hour = stat.hour.format("%Y-%m-%d %H:00").to_string();
            row(&mut writer, "records_by_hour", &hour, stat.records)?;
            row(&mut writer, "error_by_hour", &hour, stat.errors)?;
            row(&mut writer, "error_rate_by_hour", &hour, format!("{:.4}", stat.error_rate))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
        String::from_utf8(bytes).context("CSV output is not valid UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::test_support::sample_analysis;

    #[test]
    fn test_csv_rows() {
        let rendered = CsvFormatter::new().format(&sample_analysis()).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "metric,key,value");
        assert!(lines.contains(&"total,,6"));
        assert!(lines.contains(&"skipped,,1"));
        assert!(lines.contains(&"level,ERROR,3"));
        assert!(lines.contains(&"level,DEBUG,1"));
        assert!(lines.contains(&"top_error,Failed to connect to API: timeout,2"));
        assert!(lines.contains(&"error_by_hour,2024-01-15 10:00,2"));
        assert!(lines.contains(&"error_rate_by_hour,2024-01-15 11:00,0.5000"));
    }

    #[test]
    fn test_csv_quotes_messages_with_commas_and_quotes() {
        let rendered = CsvFormatter::new().format(&sample_analysis()).unwrap();
        assert!(rendered
            .contains("top_error,\"Database query failed: syntax error, near \"\"FROM\"\"\",1\n"));
    }

    #[test]
    fn test_default_matches_new() {
        let analysis = sample_analysis();
        assert_eq!(
            CsvFormatter::default().format(&analysis).unwrap(),
            CsvFormatter::new().format(&analysis).unwrap()
        );
    }

    #[test]
    fn test_csv_parses_back() {
        let rendered = CsvFormatter::new().format(&sample_analysis()).unwrap();
        let mut reader = csv::Reader::from_reader(rendered.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert!(rows.iter().all(|row| row.len() == 3));
        let top: Vec<&str> = rows
            .iter()
            .filter(|row| &row[0] == "top_error")
            .map(|row| &row[1])
            .collect();
        assert_eq!(
            top,
            vec![
                "Failed to connect to API: timeout",
                "Database query failed: syntax error, near \"FROM\""
            ]
        );
    }
}
