//! CLI command implementations.

pub mod run;
pub mod shell;

use crate::error::{ShellError, ShellResult};
use crate::session::{Reply, Session};
use std::io::{BufRead, Write};
use tracing::warn;

/// How a batch of lines should treat failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Report the failure and keep going.
    Continue,
    /// Stop at the first failing line.
    Stop,
}

/// Feeds every line of `input` to `session`, writing replies to `out`.
///
/// `prompt` is written before each line is read. Returns the number of
/// lines that failed.
pub(crate) fn drive<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    prompt: Option<&str>,
    on_error: OnError,
) -> ShellResult<usize> {
    let mut failures = 0;
    let mut lines = input.lines().enumerate();

    loop {
        if let Some(prompt) = prompt {
            write!(out, "{prompt}")?;
            out.flush()?;
        }
        let Some((index, line)) = lines.next() else {
            break;
        };
        let line = line?;

        match session.execute_line(&line) {
            Ok(Reply::Silent) => {}
            Ok(Reply::Output(text)) => writeln!(out, "{text}")?,
            Ok(Reply::Quit) => break,
            Err(err) => {
                failures += 1;
                warn!(line = index + 1, error = %err, "command failed");
                if on_error == OnError::Stop {
                    return Err(ShellError::Script {
                        line: index + 1,
                        source: Box::new(err),
                    });
                }
                writeln!(out, "ERROR: {err}")?;
            }
        }
    }
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive_str(script: &str, on_error: OnError) -> (ShellResult<usize>, String) {
        let mut session = Session::default();
        let mut out = Vec::new();
        let result = drive(&mut session, script.as_bytes(), &mut out, None, on_error);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn errors_are_reported_and_skipped() {
        let (result, out) = drive_str("COMMIT\nSET a 1\nGET a\n", OnError::Continue);
        assert_eq!(result.unwrap(), 1);
        assert_eq!(out, "ERROR: cannot commit: no active transaction\n1\n");
    }

    #[test]
    fn stop_reports_line_number() {
        let (result, out) = drive_str("SET a 1\nBOGUS\nGET a\n", OnError::Stop);
        let err = result.unwrap_err();
        assert!(matches!(err, ShellError::Script { line: 2, .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn quit_stops_reading() {
        let (result, out) = drive_str("SET a 1\nQUIT\nGET a\n", OnError::Continue);
        assert_eq!(result.unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn prompt_is_written_per_line() {
        let mut session = Session::default();
        let mut out = Vec::new();
        drive(&mut session, "DEPTH\n".as_bytes(), &mut out, Some("> "), OnError::Continue)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "> 0\n> ");
    }
}
