use anyhow::Result;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process;

/// Standard Unix exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidUsage = 2,
    SignalPipe = 141, // 128 + SIGPIPE (13)
}

impl ExitCode {
    pub fn exit(self) -> ! {
        process::exit(self as i32)
    }
}

/// Write the rendered result to stdout, exiting quietly on a closed pipe
pub fn write_stdout(data: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout.write_all(data.as_bytes()).and_then(|_| stdout.flush()) {
        Ok(()) => Ok(()),
        // Broken pipe is normal in pipelines (`loglyzer app.log | head`)
        Err(e) if is_broken_pipe(&e) => ExitCode::SignalPipe.exit(),
        Err(e) => Err(anyhow::anyhow!("Failed to write to stdout: {}", e)),
    }
}

/// Write the rendered result to `path`, truncating any existing file
pub fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)
        .map_err(|e| anyhow::anyhow!("{}", create_helpful_error_message(path, &e)))?;
    file.write_all(data.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| anyhow::anyhow!("Output file write failed '{}': {}", path.display(), e))
}

/// Cross-platform broken pipe detection
fn is_broken_pipe(e: &io::Error) -> bool {
    #[cfg(windows)]
    {
        e.kind() == io::ErrorKind::BrokenPipe
            || e.raw_os_error() == Some(232) // ERROR_NO_DATA "The pipe is being closed"
            || e.raw_os_error() == Some(109) // ERROR_BROKEN_PIPE "The pipe has been ended"
    }
    #[cfg(not(windows))]
    {
        e.kind() == io::ErrorKind::BrokenPipe
    }
}

/// Create a helpful error message for file creation failures
fn create_helpful_error_message(path: &Path, error: &io::Error) -> String {
    let base_msg = format!("Cannot create output file '{}': {}", path.display(), error);

    let suggestion = match error.kind() {
        io::ErrorKind::PermissionDenied => {
            if path.parent().is_some_and(|p| !p.exists()) {
                "Suggestion: Parent directory does not exist, create it first"
            } else {
                "Suggestion: Check file permissions or choose a writable location"
            }
        }
        io::ErrorKind::NotFound => "Suggestion: Parent directory does not exist, create it first",
        _ if path.is_dir() => "Suggestion: Path points to a directory, specify a filename instead",
        _ => return base_msg,
    };

    format!("{}\n{}", base_msg, suggestion)
}
