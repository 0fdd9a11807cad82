//! Append-only run log: one JSON object per line. Blank lines and
//! lines starting with `#` are comments and skipped on read.

use anyhow::{Context, Result};
use log::info;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::models::RunResult;

/// Append one run to the log, creating the file if needed. The file is
/// opened only for the duration of the write.
pub fn append_result(path: &Path, result: &RunResult) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open run log {}", path.display()))?;
    let line = serde_json::to_string(result)?;
    writeln!(file, "{line}")?;
    info!(
        "recorded run of {} trials to {}",
        result.guess_log.len(),
        path.display()
    );
    Ok(())
}

/// Read every run from the log in file order. A malformed line aborts
/// the read; callers wanting resilience should pre-validate the log.
pub fn read_results(path: &Path) -> Result<Vec<RunResult>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open run log {}", path.display()))?;
    let mut results = Vec::new();
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let result = serde_json::from_str(trimmed).with_context(|| {
            format!("malformed run log entry at {}:{}", path.display(), lineno + 1)
        })?;
        results.push(result);
    }
    Ok(results)
}
