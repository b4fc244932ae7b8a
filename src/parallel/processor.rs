//! Main parallel processor
//!
//! Contains the execution-mode policy and the ParallelProcessor that fans
//! chunks out to a fixed worker pool and folds their results back together.

use crossbeam_channel::{bounded, unbounded};
use std::any::Any;
use std::thread;

use crate::config::{ParallelConfig, Parallelism};
use crate::error::EngineError;
use crate::filter::FilterSpec;
use crate::parsers::RecordParser;

use super::chunking::split_line_aligned;
use super::types::{Chunk, ChunkResult, ExecutionMode};
use super::worker::{process_chunk, worker_thread};

/// Decide how a run executes.
///
/// `Auto` goes parallel only when the input is strictly larger than
/// `threshold_bytes`.
pub fn select_mode(input_len: usize, directive: Parallelism, threshold_bytes: usize) -> ExecutionMode {
    match directive {
        Parallelism::Always => ExecutionMode::Parallel,
        Parallelism::Never => ExecutionMode::Sequential,
        Parallelism::Auto if input_len > threshold_bytes => ExecutionMode::Parallel,
        Parallelism::Auto => ExecutionMode::Sequential,
    }
}

/// Merged output of a run, before report assembly
#[derive(Debug, Default)]
pub struct Dispatched {
    pub result: ChunkResult,
    pub chunks: usize,
}

/// Main parallel processor
#[derive(Debug, Clone)]
pub struct ParallelProcessor {
    num_workers: usize,
    num_chunks: usize,
}

impl ParallelProcessor {
    pub fn new(config: &ParallelConfig) -> Self {
        Self {
            num_workers: config.num_workers.max(1),
            num_chunks: config.chunk_count().max(1),
        }
    }

    /// One pass over the whole input on the calling thread.
    pub fn run_sequential<P>(input: &str, parser: &P, filter: &FilterSpec) -> Dispatched
    where
        P: RecordParser + ?Sized,
    {
        Dispatched {
            result: process_chunk(&Chunk::whole(input), parser, filter),
            chunks: 1,
        }
    }

    /// Split the input into line-aligned chunks and process them on the
    /// worker pool. Partial results are merged in chunk order regardless of
    /// which worker finishes first; if any worker fails, nothing is merged.
    pub fn run_parallel<P>(&self, input: &str, parser: &P, filter: &FilterSpec) -> Result<Dispatched, EngineError>
    where
        P: RecordParser + ?Sized,
    {
        let chunks = split_line_aligned(input, self.num_chunks);
        let chunk_count = chunks.len();
        if chunk_count == 0 {
            return Ok(Dispatched::default());
        }

        let num_workers = self.num_workers.min(chunk_count);
        tracing::debug!(
            chunks = chunk_count,
            workers = num_workers,
            bytes = input.len(),
            "dispatching chunks"
        );

        let (work_sender, work_receiver) = bounded::<Chunk<'_>>(chunk_count);
        for chunk in chunks {
            let index = chunk.index;
            work_sender
                .send(chunk)
                .map_err(|_| EngineError::ChunkLost { chunk: index })?;
        }
        drop(work_sender);

        let (result_sender, result_receiver) = unbounded::<ChunkResult>();

        let worker_outcome = thread::scope(|scope| {
            let handles: Vec<_> = (0..num_workers)
                .map(|worker_id| {
                    let work_receiver = work_receiver.clone();
                    let result_sender = result_sender.clone();
                    scope.spawn(move || {
                        worker_thread(worker_id, work_receiver, result_sender, parser, filter)
                    })
                })
                .collect();
            drop(result_sender);

            let mut first_error = None;
            for (worker_id, handle) in handles.into_iter().enumerate() {
                let outcome = match handle.join() {
                    Ok(outcome) => outcome,
                    Err(payload) => Err(EngineError::WorkerFailed {
                        worker: worker_id,
                        reason: panic_message(payload.as_ref()),
                    }),
                };
                if let Err(e) = outcome {
                    first_error.get_or_insert(e);
                }
            }
            first_error.map_or(Ok(()), Err)
        });

        if let Err(e) = worker_outcome {
            tracing::debug!(error = %e, "discarding partial results");
            return Err(e);
        }

        let mut slots: Vec<Option<ChunkResult>> = (0..chunk_count).map(|_| None).collect();
        for result in result_receiver.iter() {
            if let Some(slot) = slots.get_mut(result.index) {
                *slot = Some(result);
            }
        }

        let mut merged = ChunkResult::default();
        for (index, slot) in slots.into_iter().enumerate() {
            let result = slot.ok_or(EngineError::ChunkLost { chunk: index })?;
            merged.aggregate.merge(result.aggregate);
            merged.failures.extend(result.failures);
        }
        tracing::debug!(chunks = chunk_count, "merged partial results");

        Ok(Dispatched {
            result: merged,
            chunks: chunk_count,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
