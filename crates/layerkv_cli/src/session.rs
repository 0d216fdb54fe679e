//! A shell session bound to one store.

use crate::command::Command;
use crate::error::ShellResult;
use clap::ValueEnum;
use layerkv_core::{KvStore, Transactional, TransactionalStack};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Output format for `DUMP` and `STATUS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Pending changes of one layer, as reported by `STATUS`.
#[derive(Debug, Serialize)]
pub struct LayerReport {
    /// Depth of the layer (0 = root).
    pub depth: usize,
    /// Keys written in the layer.
    pub writes: usize,
    /// Keys deleted in the layer.
    pub tombstones: usize,
}

/// Store status, as reported by `STATUS`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    /// Number of open transactions.
    pub depth: usize,
    /// Number of visible keys.
    pub visible_keys: usize,
    /// Per-layer pending changes, root first.
    pub layers: Vec<LayerReport>,
}

/// What a command asks the caller to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print nothing.
    Silent,
    /// Print this text.
    Output(String),
    /// Stop reading commands.
    Quit,
}

/// Executes commands against a string-keyed store.
#[derive(Debug, Default)]
pub struct Session {
    store: TransactionalStack<String, String>,
    format: OutputFormat,
}

impl Session {
    /// Creates a session with an empty store.
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            store: TransactionalStack::new(),
            format,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &TransactionalStack<String, String> {
        &self.store
    }

    /// Parses and executes one line.
    ///
    /// # Errors
    ///
    /// Returns parse errors and store errors. The store is unchanged by a
    /// failed line.
    pub fn execute_line(&mut self, line: &str) -> ShellResult<Reply> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Reply::Silent),
        }
    }

    /// Executes one command.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects a commit or rollback, or if
    /// JSON output cannot be produced.
    pub fn execute(&mut self, command: Command) -> ShellResult<Reply> {
        debug!(?command, depth = self.store.depth(), "executing");

        let reply = match command {
            Command::Set { key, value } => {
                self.store.put(key, value);
                Reply::Silent
            }
            Command::Get { key } => {
                let value = self.store.get(&key).map_or("NULL", String::as_str);
                Reply::Output(value.to_string())
            }
            Command::Delete { key } => Reply::Output(self.store.remove(&key).to_string()),
            Command::Exists { key } => Reply::Output(self.store.contains(&key).to_string()),
            Command::Begin => {
                self.store.begin();
                Reply::Silent
            }
            Command::Commit => {
                self.store.commit()?;
                Reply::Silent
            }
            Command::Rollback => {
                self.store.rollback()?;
                Reply::Silent
            }
            Command::Depth => Reply::Output(self.store.depth().to_string()),
            Command::Dump => Reply::Output(self.dump()?),
            Command::Status => Reply::Output(self.status()?),
            Command::Quit => Reply::Quit,
        };
        Ok(reply)
    }

    fn dump(&self) -> ShellResult<String> {
        let visible: BTreeMap<String, String> = self.store.snapshot().into_iter().collect();
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(&visible)?),
            OutputFormat::Text if visible.is_empty() => Ok("(empty)".to_string()),
            OutputFormat::Text => Ok(visible
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn status(&self) -> ShellResult<String> {
        let report = StatusReport {
            depth: self.store.depth(),
            visible_keys: self.store.chain().entries().len(),
            layers: self
                .store
                .layer_stats()
                .into_iter()
                .map(|stats| LayerReport {
                    depth: stats.depth,
                    writes: stats.writes,
                    tombstones: stats.tombstones,
                })
                .collect(),
        };

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(&report)?),
            OutputFormat::Text => {
                let mut lines = vec![format!(
                    "depth: {}, visible keys: {}",
                    report.depth, report.visible_keys
                )];
                for layer in &report.layers {
                    lines.push(format!(
                        "  layer {}: {} writes, {} tombstones",
                        layer.depth, layer.writes, layer.tombstones
                    ));
                }
                Ok(lines.join("\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;

    fn run(session: &mut Session, lines: &[&str]) -> Vec<String> {
        lines
            .iter()
            .filter_map(|line| match session.execute_line(line) {
                Ok(Reply::Output(text)) => Some(text),
                Ok(_) => None,
                Err(err) => Some(format!("ERROR: {err}")),
            })
            .collect()
    }

    #[test]
    fn get_reports_null_for_missing_keys() {
        let mut session = Session::default();
        assert_eq!(run(&mut session, &["GET a", "SET a 1", "GET a"]), ["NULL", "1"]);
    }

    #[test]
    fn nested_rollback_through_shell() {
        let mut session = Session::default();
        let out = run(
            &mut session,
            &[
                "BEGIN", "SET x 1", "BEGIN", "SET x 2", "COMMIT", "GET x", "ROLLBACK", "GET x",
                "DEPTH",
            ],
        );
        assert_eq!(out, ["2", "NULL", "0"]);
    }

    #[test]
    fn commit_without_transaction_is_reported() {
        let mut session = Session::default();
        let err = session.execute_line("COMMIT").unwrap_err();
        assert!(matches!(err, ShellError::Store(_)));
        assert_eq!(err.to_string(), "cannot commit: no active transaction");
        assert_eq!(session.store().depth(), 0);
    }

    #[test]
    fn delete_reports_local_presence() {
        let mut session = Session::default();
        let out = run(
            &mut session,
            &["SET a 1", "BEGIN", "DELETE a", "EXISTS a", "SET b 2", "DELETE b"],
        );
        assert_eq!(out, ["false", "false", "true"]);
    }

    #[test]
    fn dump_text_is_sorted() {
        let mut session = Session::default();
        let out = run(&mut session, &["DUMP", "SET b 2", "SET a 1", "DUMP"]);
        assert_eq!(out, ["(empty)", "a=1\nb=2"]);
    }

    #[test]
    fn dump_json() {
        let mut session = Session::new(OutputFormat::Json);
        let out = run(&mut session, &["SET a 1", "BEGIN", "SET b two words", "DUMP"]);
        assert_eq!(out, [r#"{"a":"1","b":"two words"}"#]);
    }

    #[test]
    fn status_json_lists_layers() {
        let mut session = Session::new(OutputFormat::Json);
        let out = run(&mut session, &["SET a 1", "BEGIN", "DELETE a", "STATUS"]);
        let value: serde_json::Value = serde_json::from_str(&out[0]).unwrap();
        assert_eq!(value["depth"], 1);
        assert_eq!(value["visible_keys"], 0);
        assert_eq!(value["layers"][0]["writes"], 1);
        assert_eq!(value["layers"][1]["tombstones"], 1);
    }

    #[test]
    fn status_text() {
        let mut session = Session::default();
        let out = run(&mut session, &["SET a 1", "STATUS"]);
        assert_eq!(out, ["depth: 0, visible keys: 1\n  layer 0: 1 writes, 0 tombstones"]);
    }

    #[test]
    fn quit_is_a_reply() {
        let mut session = Session::default();
        assert_eq!(session.execute_line("quit").unwrap(), Reply::Quit);
    }
}
