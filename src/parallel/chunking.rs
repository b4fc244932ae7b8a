//! Line-aligned partitioning of the input buffer

use super::types::Chunk;

/// Split `input` into at most `max_chunks` chunks of roughly equal byte size.
///
/// Every split point sits directly after a `\n`, so no line straddles two
/// chunks. Each chunk records the global number of its first line. Empty
/// input yields no chunks; input with fewer lines than `max_chunks` yields
/// fewer chunks.
pub fn split_line_aligned(input: &str, max_chunks: usize) -> Vec<Chunk<'_>> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    if len == 0 {
        return Vec::new();
    }

    let target = len.div_ceil(max_chunks.max(1));
    let mut chunks = Vec::with_capacity(max_chunks.max(1));
    let mut start = 0;
    let mut first_line = 1;

    while start < len {
        let tentative = (start + target).min(len);
        let end = if tentative == len {
            len
        } else {
            // Extend to the end of the line containing byte `tentative - 1`
            match bytes[tentative - 1..].iter().position(|&b| b == b'\n') {
                Some(pos) => tentative + pos,
                None => len,
            }
        };

        let text = &input[start..end];
        chunks.push(Chunk {
            index: chunks.len(),
            first_line,
            text,
        });

        first_line += count_newlines(text);
        start = end;
    }

    chunks
}

fn count_newlines(text: &str) -> usize {
    text.as_bytes().iter().filter(|&&b| b == b'\n').count()
}
