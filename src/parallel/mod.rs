//! Parallel processing module for loglyzer
//!
//! Splits a fully-loaded input into line-aligned chunks and aggregates them
//! on a fixed pool of scoped worker threads. Workers share only the input
//! buffer and the compiled parser; each owns its partial aggregate. The
//! partials are folded in chunk order once every worker has joined, which
//! makes the parallel result identical to the sequential one.
//!
//! # Module Structure
//!
//! - `types`: Chunks, chunk results and the execution mode
//! - `chunking`: Line-aligned partitioning of the input
//! - `worker`: Per-chunk parse/filter/aggregate loop and worker thread
//! - `processor`: Mode policy and ParallelProcessor orchestration

mod chunking;
mod processor;
mod types;
mod worker;

pub use chunking::split_line_aligned;
pub use processor::{select_mode, Dispatched, ParallelProcessor};
pub use types::{Chunk, ChunkResult, ExecutionMode};
pub use worker::process_chunk;
