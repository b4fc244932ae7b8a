use anyhow::{Context, Result};
use serde::Serialize;

use loglyzer::{Analysis, AnalysisReport, ExecutionMode};

use super::ReportFormatter;

#[derive(Serialize)]
struct JsonDocument<'a> {
    mode: ExecutionMode,
    chunks: usize,
    #[serde(flatten)]
    report: &'a AnalysisReport,
}

// JSON formatter
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, analysis: &Analysis) -> Result<String> {
        let document = JsonDocument {
            mode: analysis.mode,
            chunks: analysis.chunks,
            report: &analysis.report,
        };
        let mut rendered =
            serde_json::to_string_pretty(&document).context("Failed to serialize report")?;
        rendered.push('\n');
        Ok(rendered)
    }
}
