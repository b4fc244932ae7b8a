// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

pub const SAMPLE_LOG: &str = "\
2024-01-15 10:30:45 [INFO] Application started
2024-01-15 10:31:15 [ERROR] Failed to connect to API: timeout
2024-01-15 10:32:00 [ERROR] Database query failed: syntax error
2024-01-15 11:00:00 [INFO] Done
";

/// Run loglyzer with the given arguments
pub fn run_loglyzer(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_loglyzer"))
        .args(args)
        .env_remove("LOGLYZER_LOG")
        .env_remove("NO_COLOR")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute loglyzer");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Write `content` to a temporary log file
pub fn log_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    temp_file.flush().expect("Failed to flush temp file");
    temp_file
}

/// Run loglyzer on a temporary file; the path is appended after `args`
pub fn run_loglyzer_with_file(args: &[&str], file_content: &str) -> (String, String, i32) {
    let temp_file = log_file(file_content);
    let mut full_args = args.to_vec();
    full_args.push(temp_file.path().to_str().unwrap());
    run_loglyzer(&full_args)
}

/// Deterministic mixed-level log with `lines` records spread over several hours,
/// plus a malformed line every 97 lines
pub fn generate_log(lines: usize) -> String {
    let levels = ["INFO", "DEBUG", "WARN", "ERROR", "INFO", "ERROR", "INFO"];
    let errors = [
        "Failed to connect to API: timeout",
        "Database query failed: syntax error",
        "Disk quota exceeded",
        "Cache miss storm",
    ];
    let mut out = String::with_capacity(lines * 64);
    for i in 0..lines {
        if i % 97 == 96 {
            out.push_str("### corrupted line ###\n");
            continue;
        }
        let hour = 8 + (i * 5 / lines.max(1));
        let minute = (i / 60) % 60;
        let second = i % 60;
        let level = levels[i % levels.len()];
        let message = if level == "ERROR" {
            errors[(i / 7) % errors.len()].to_string()
        } else {
            format!("request {} handled", i)
        };
        out.push_str(&format!(
            "2024-01-15 {:02}:{:02}:{:02} [{}] {}\n",
            hour, minute, second, level, message
        ));
    }
    out
}
