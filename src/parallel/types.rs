//! Type definitions for parallel processing
//!
//! Contains the chunk handed to a worker, the result it sends back, and the
//! execution mode decided for a run.

use serde::Serialize;
use std::fmt;

use crate::aggregate::PartialAggregate;
use crate::record::ParseFailure;

/// A contiguous, line-aligned slice of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Position in the input; results are merged in this order
    pub index: usize,
    /// Global 1-based number of the chunk's first line
    pub first_line: usize,
    pub text: &'a str,
}

impl<'a> Chunk<'a> {
    /// The whole input as a single chunk
    pub fn whole(text: &'a str) -> Self {
        Self {
            index: 0,
            first_line: 1,
            text,
        }
    }
}

/// Result of processing one chunk
#[derive(Debug, Clone, Default)]
pub struct ChunkResult {
    pub index: usize,
    pub aggregate: PartialAggregate,
    /// Ordered by line number
    pub failures: Vec<ParseFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Sequential,
    Parallel,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => f.write_str("sequential"),
            ExecutionMode::Parallel => f.write_str("parallel"),
        }
    }
}
