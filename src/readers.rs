//! Loading a log file into memory ahead of analysis
//!
//! The engine works on a fully-available buffer, so the whole file is read
//! (and decompressed) up front. Any I/O failure surfaces here, before the
//! engine sees a single byte.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::decompression::DecompressionReader;
use crate::error::EngineError;

/// Read `path` into a string, transparently decompressing gzip and zstd.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected; the affected
/// lines will typically fail to parse and be reported as such.
pub fn load_input(path: &Path) -> Result<String, EngineError> {
    let unavailable = |source: std::io::Error| EngineError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unavailable)?;
    let size_hint = file.metadata().map(|m| m.len() as usize).unwrap_or(0);

    let mut reader = DecompressionReader::new(file).map_err(unavailable)?;
    let mut bytes = Vec::with_capacity(size_hint);
    reader.read_to_end(&mut bytes).map_err(unavailable)?;

    tracing::debug!(
        path = %path.display(),
        compression = reader.kind(),
        bytes = bytes.len(),
        "loaded input"
    );

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                valid_up_to = e.utf8_error().valid_up_to(),
                "input is not valid UTF-8; invalid sequences replaced"
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
