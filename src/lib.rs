// Core library for the loglyzer log analysis engine
//
// Input flows: text buffer -> line-aligned chunks -> parse -> filter ->
// per-chunk aggregate -> ordered merge -> AnalysisReport.

pub mod aggregate;
pub mod config;
pub mod decompression;
pub mod engine;
pub mod error;
pub mod filter;
pub mod parallel;
pub mod parsers;
pub mod readers;
pub mod record;
pub mod report;

pub use aggregate::PartialAggregate;
pub use config::{AnalysisConfig, ParallelConfig, Parallelism};
pub use engine::{analyze, Analysis, Analyzer};
pub use error::{ConfigError, EngineError};
pub use filter::FilterSpec;
pub use parallel::ExecutionMode;
pub use parsers::{BracketedParser, RecordParser};
pub use readers::load_input;
pub use record::{Level, LogRecord, ParseFailure, ParseOutcome};
pub use report::{AnalysisReport, ErrorFrequency, HourlyStat};
