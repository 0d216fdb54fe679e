//! Interactive shell implementation.

use super::{drive, OnError};
use crate::session::{OutputFormat, Session};
use std::io::{self, IsTerminal};
use tracing::info;

const PROMPT: &str = "layerkv> ";

/// Reads commands from stdin until end of input or `QUIT`.
///
/// A prompt is shown only when stdin is a terminal.
pub fn run(format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal().then_some(PROMPT);
    info!(interactive = prompt.is_some(), "Starting shell");

    let mut session = Session::new(format);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let failures = drive(&mut session, stdin.lock(), &mut out, prompt, OnError::Continue)?;

    info!(failures, "Shell closed");
    Ok(())
}
