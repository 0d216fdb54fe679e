//! Run command implementation.

use super::{drive, OnError};
use crate::session::{OutputFormat, Session};
use layerkv_core::Transactional;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::info;

/// Runs the script at `path` against a fresh store.
///
/// Returns the number of failed lines.
pub fn run(
    path: &Path,
    format: OutputFormat,
    fail_fast: bool,
) -> Result<usize, Box<dyn std::error::Error>> {
    info!("Running script {:?}", path);

    let file = File::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?;
    let mut session = Session::new(format);
    let on_error = if fail_fast {
        OnError::Stop
    } else {
        OnError::Continue
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let failures = drive(&mut session, BufReader::new(file), &mut out, None, on_error)?;

    info!(failures, open_transactions = session.store().depth(), "Script finished");
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn script(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn counts_failed_lines() {
        let file = script("# demo\nSET a 1\nROLLBACK\nBEGIN\nCOMMIT\nCOMMIT\n");
        let failures = run(file.path(), OutputFormat::Text, false).unwrap();
        assert_eq!(failures, 2);
    }

    #[test]
    fn fail_fast_returns_error() {
        let file = script("BEGIN\nGET\n");
        assert!(run(file.path(), OutputFormat::Text, true).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.kv");
        assert!(run(&missing, OutputFormat::Text, false).is_err());
    }
}
