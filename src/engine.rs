use std::time::Instant;

use crate::config::{AnalysisConfig, ValidatedConfig};
use crate::error::EngineError;
use crate::parallel::{select_mode, ExecutionMode, ParallelProcessor};
use crate::parsers::BracketedParser;
use crate::record::ParseFailure;
use crate::report::AnalysisReport;

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: AnalysisReport,
    /// Lines that did not match the record grammar, in line order
    pub failures: Vec<ParseFailure>,
    pub mode: ExecutionMode,
    pub chunks: usize,
}

/// A validated configuration paired with the compiled record parser.
///
/// Construct once and call [`Analyzer::analyze`] for each input; the
/// pattern is not recompiled between runs.
#[derive(Debug, Clone)]
pub struct Analyzer {
    parser: BracketedParser,
    config: ValidatedConfig,
    processor: ParallelProcessor,
}

impl Analyzer {
    /// Validate `config` and compile the parser.
    ///
    /// Invalid configurations are rejected here, before any input is seen.
    pub fn new(config: AnalysisConfig) -> Result<Self, EngineError> {
        let config = config.into_validated()?;
        let parser = BracketedParser::new()?;
        let processor = ParallelProcessor::new(&config.parallel);
        Ok(Self {
            parser,
            config,
            processor,
        })
    }

    /// The mode a run over `input_len` bytes would use.
    pub fn execution_mode(&self, input_len: usize) -> ExecutionMode {
        select_mode(
            input_len,
            self.config.parallel.directive,
            self.config.parallel.threshold_bytes,
        )
    }

    pub fn analyze(&self, input: &str) -> Result<Analysis, EngineError> {
        let started = Instant::now();
        let mode = self.execution_mode(input.len());
        tracing::debug!(%mode, bytes = input.len(), "starting analysis");

        let dispatched = match mode {
            ExecutionMode::Sequential => {
                ParallelProcessor::run_sequential(input, &self.parser, &self.config.filter)
            }
            ExecutionMode::Parallel => {
                self.processor
                    .run_parallel(input, &self.parser, &self.config.filter)?
            }
        };

        let report = AnalysisReport::from_aggregate(
            &dispatched.result.aggregate,
            self.config.top_n,
            &self.config.filter,
        );

        tracing::info!(
            %mode,
            chunks = dispatched.chunks,
            lines = report.lines_read,
            records = report.total_records,
            failures = report.parse_failures,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );

        Ok(Analysis {
            report,
            failures: dispatched.result.failures,
            mode,
            chunks: dispatched.chunks,
        })
    }
}

/// Validate `config`, then analyze `input` in one call.
pub fn analyze(input: &str, config: AnalysisConfig) -> Result<Analysis, EngineError> {
    Analyzer::new(config)?.analyze(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Parallelism;
    use crate::error::ConfigError;
    use crate::filter::FilterSpec;
    use crate::record::Level;

    const SAMPLE: &str = "\
2024-01-15 10:30:45 [INFO] Application started
2024-01-15 10:31:15 [ERROR] Failed to connect to API: timeout
2024-01-15 10:32:00 [ERROR] Database query failed: syntax error
not a record
2024-01-15 11:00:00 [INFO] Done
";

    fn config(directive: Parallelism) -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        config.parallel.directive = directive;
        config.parallel.num_workers = 3;
        config
    }

    #[test]
    fn test_analyze_sequential() {
        let analysis = analyze(SAMPLE, config(Parallelism::Never)).unwrap();
        assert_eq!(analysis.mode, ExecutionMode::Sequential);
        assert_eq!(analysis.chunks, 1);
        assert_eq!(analysis.report.total_records, 4);
        assert_eq!(analysis.report.parse_failures, 1);
        assert_eq!(analysis.failures[0].line_number, 4);
        assert_eq!(analysis.report.error_count(), 2);
    }

    #[test]
    fn test_analyze_forced_parallel_matches_sequential() {
        let sequential = analyze(SAMPLE, config(Parallelism::Never)).unwrap();
        let parallel = analyze(SAMPLE, config(Parallelism::Always)).unwrap();
        assert_eq!(parallel.mode, ExecutionMode::Parallel);
        assert_eq!(parallel.report, sequential.report);
        assert_eq!(parallel.failures, sequential.failures);
    }

    #[test]
    fn test_auto_mode_uses_threshold() {
        let mut cfg = config(Parallelism::Auto);
        cfg.parallel.threshold_bytes = 16;
        let analyzer = Analyzer::new(cfg).unwrap();
        assert_eq!(analyzer.execution_mode(16), ExecutionMode::Sequential);
        assert_eq!(analyzer.execution_mode(17), ExecutionMode::Parallel);
        assert_eq!(analyzer.analyze(SAMPLE).unwrap().mode, ExecutionMode::Parallel);
    }

    #[test]
    fn test_invalid_config_rejected_before_processing() {
        let mut cfg = config(Parallelism::Never);
        cfg.top_n = -3;
        let err = Analyzer::new(cfg).unwrap_err();
        assert!(err.is_usage_error());
        assert!(matches!(
            err,
            EngineError::InvalidConfig(ConfigError::NegativeTopN(-3))
        ));
    }

    #[test]
    fn test_filter_removing_everything_yields_empty_report() {
        let mut cfg = config(Parallelism::Always);
        cfg.filter = FilterSpec {
            search: Some("no such text".to_string()),
            ..Default::default()
        };
        let analysis = analyze(SAMPLE, cfg).unwrap();
        assert!(analysis.report.is_empty());
        assert!(analysis.report.top_errors.is_empty());
        assert!(analysis.report.hourly.is_empty());
        assert_eq!(analysis.report.filtered_out, 4);
        assert_eq!(analysis.report.lines_read, 5);
    }

    #[test]
    fn test_empty_input() {
        for directive in [Parallelism::Never, Parallelism::Always] {
            let analysis = analyze("", config(directive)).unwrap();
            assert!(analysis.report.is_empty());
            assert_eq!(analysis.report.lines_read, 0);
            assert!(analysis.failures.is_empty());
        }
    }

    #[test]
    fn test_analyzer_is_reusable() {
        let analyzer = Analyzer::new(config(Parallelism::Never)).unwrap();
        let first = analyzer.analyze(SAMPLE).unwrap();
        let second = analyzer.analyze(SAMPLE).unwrap();
        assert_eq!(first.report, second.report);
        assert_eq!(first.report.level_count(Level::Info), 2);
    }
}
