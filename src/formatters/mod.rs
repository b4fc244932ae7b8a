mod csv;
mod default;
mod json;

pub use csv::CsvFormatter;
pub use default::DefaultFormatter;
pub use json::JsonFormatter;

use anyhow::Result;
use loglyzer::Analysis;

use crate::cli::OutputFormat;

/// Renders a finished analysis into the bytes written to stdout or `--output`
pub trait ReportFormatter {
    fn format(&self, analysis: &Analysis) -> Result<String>;
}

pub fn create_formatter(format: OutputFormat, use_colors: bool) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Text => Box::new(DefaultFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}
