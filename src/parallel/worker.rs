//! Worker thread for parallel processing
//!
//! Contains the per-chunk parse → filter → aggregate loop and the thread
//! body that drains the shared work queue.

use crossbeam_channel::{Receiver, Sender};

use crate::aggregate::PartialAggregate;
use crate::error::EngineError;
use crate::filter::FilterSpec;
use crate::parsers::{numbered_lines, RecordParser};

use super::types::{Chunk, ChunkResult};

/// Parse, filter and aggregate every line of one chunk.
///
/// Malformed lines are collected as failures and never stop the chunk.
pub fn process_chunk<P>(chunk: &Chunk<'_>, parser: &P, filter: &FilterSpec) -> ChunkResult
where
    P: RecordParser + ?Sized,
{
    let mut aggregate = PartialAggregate::new();
    let mut failures = Vec::new();

    for (line_number, line) in numbered_lines(chunk.text, chunk.first_line) {
        aggregate.note_line_read();
        match parser.parse(line, line_number) {
            Ok(record) if filter.matches(&record) => aggregate.accumulate(&record, line_number),
            Ok(_) => aggregate.note_filtered_out(),
            Err(failure) => {
                aggregate.note_parse_failure();
                failures.push(failure);
            }
        }
    }

    ChunkResult {
        index: chunk.index,
        aggregate,
        failures,
    }
}

/// Worker thread: processes chunks until the queue is closed
pub(crate) fn worker_thread<P>(
    worker_id: usize,
    work_receiver: Receiver<Chunk<'_>>,
    result_sender: Sender<ChunkResult>,
    parser: &P,
    filter: &FilterSpec,
) -> Result<(), EngineError>
where
    P: RecordParser + ?Sized,
{
    let mut processed = 0usize;

    while let Ok(chunk) = work_receiver.recv() {
        let result = process_chunk(&chunk, parser, filter);
        tracing::debug!(
            worker = worker_id,
            chunk = chunk.index,
            first_line = chunk.first_line,
            bytes = chunk.text.len(),
            lines = result.aggregate.lines_read(),
            failures = result.failures.len(),
            "chunk processed"
        );

        result_sender
            .send(result)
            .map_err(|_| EngineError::WorkerFailed {
                worker: worker_id,
                reason: format!("result channel closed before chunk {} was delivered", chunk.index),
            })?;
        processed += 1;
    }

    tracing::trace!(worker = worker_id, processed, "worker finished");
    Ok(())
}
