use chrono::NaiveDateTime;
use std::path::PathBuf;

/// A configuration rejected before any input is processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("top-N must not be negative (got {0})")]
    NegativeTopN(i64),

    #[error("time window is inverted: until {until} precedes since {since}")]
    InvertedWindow {
        since: NaiveDateTime,
        until: NaiveDateTime,
    },

    #[error("worker count must be greater than 0")]
    ZeroWorkers,

    #[error("chunk count must be greater than 0")]
    ZeroChunks,
}

/// Run-level failures. Malformed lines are never reported here; they are
/// collected as [`crate::ParseFailure`]s alongside the report.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("cannot read {}: {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to compile record pattern")]
    Pattern(#[from] regex::Error),

    #[error("worker {worker} failed: {reason}")]
    WorkerFailed { worker: usize, reason: String },

    #[error("no result was produced for chunk {chunk}")]
    ChunkLost { chunk: usize },
}

impl EngineError {
    /// True for errors caused by the caller's options rather than the input.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, EngineError::InvalidConfig(_))
    }
}
