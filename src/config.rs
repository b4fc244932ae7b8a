use serde::Serialize;

use crate::error::ConfigError;
use crate::filter::FilterSpec;

/// Inputs larger than this run in parallel unless told otherwise.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10 * 1024 * 1024;

pub const DEFAULT_TOP_N: i64 = 5;

/// Main configuration for one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub filter: FilterSpec,
    /// Number of ranked error messages; negative values are rejected
    pub top_n: i64,
    pub parallel: ParallelConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            filter: FilterSpec::default(),
            top_n: DEFAULT_TOP_N,
            parallel: ParallelConfig::default(),
        }
    }
}

/// How the caller wants execution mode chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Parallelism {
    /// Parallel only above the size threshold
    #[default]
    Auto,
    Always,
    Never,
}

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    pub directive: Parallelism,
    pub num_workers: usize,
    /// Chunks to split the input into; defaults to the worker count
    pub num_chunks: Option<usize>,
    pub threshold_bytes: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            directive: Parallelism::Auto,
            num_workers: num_cpus::get(),
            num_chunks: None,
            threshold_bytes: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    pub fn chunk_count(&self) -> usize {
        self.num_chunks.unwrap_or(self.num_workers)
    }
}

/// A configuration that passed validation
#[derive(Debug, Clone)]
pub(crate) struct ValidatedConfig {
    pub filter: FilterSpec,
    pub top_n: usize,
    pub parallel: ParallelConfig,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clone().into_validated().map(|_| ())
    }

    pub(crate) fn into_validated(self) -> Result<ValidatedConfig, ConfigError> {
        let top_n = usize::try_from(self.top_n).map_err(|_| ConfigError::NegativeTopN(self.top_n))?;

        if let (Some(since), Some(until)) = (self.filter.since, self.filter.until) {
            if until < since {
                return Err(ConfigError::InvertedWindow { since, until });
            }
        }

        if self.parallel.num_workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.parallel.num_chunks == Some(0) {
            return Err(ConfigError::ZeroChunks);
        }

        Ok(ValidatedConfig {
            filter: self.filter,
            top_n,
            parallel: self.parallel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::bracketed::parse_timestamp;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.parallel.chunk_count(), config.parallel.num_workers);
    }

    #[test]
    fn test_negative_top_n_rejected() {
        let config = AnalysisConfig {
            top_n: -1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NegativeTopN(-1)));
    }

    #[test]
    fn test_zero_top_n_allowed() {
        let config = AnalysisConfig {
            top_n: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let since = parse_timestamp("2024-01-15 11:00:00").unwrap();
        let until = parse_timestamp("2024-01-15 10:00:00").unwrap();
        let config = AnalysisConfig {
            filter: FilterSpec {
                since: Some(since),
                until: Some(until),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedWindow { since, until })
        );
    }

    #[test]
    fn test_equal_window_bounds_allowed() {
        let at = parse_timestamp("2024-01-15 11:00:00").unwrap();
        let config = AnalysisConfig {
            filter: FilterSpec {
                since: Some(at),
                until: Some(at),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_and_chunks_rejected() {
        let mut config = AnalysisConfig::default();
        config.parallel.num_workers = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroWorkers));

        let mut config = AnalysisConfig::default();
        config.parallel.num_chunks = Some(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroChunks));
    }
}
