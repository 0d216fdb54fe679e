//! Shell command parsing.

use crate::error::{ShellError, ShellResult};

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET key value` / `PUT key value`
    Set {
        /// Key to write.
        key: String,
        /// Value to write; the rest of the line.
        value: String,
    },
    /// `GET key`
    Get {
        /// Key to read.
        key: String,
    },
    /// `DELETE key` / `REMOVE key`
    Delete {
        /// Key to delete.
        key: String,
    },
    /// `EXISTS key`
    Exists {
        /// Key to test.
        key: String,
    },
    /// `BEGIN`
    Begin,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
    /// `DEPTH`
    Depth,
    /// `DUMP`
    Dump,
    /// `STATUS`
    Status,
    /// `QUIT` / `EXIT`
    Quit,
}

impl Command {
    /// Parses one line.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Parse`] for unknown verbs and wrong arity.
    pub fn parse(line: &str) -> ShellResult<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let verb = verb.to_ascii_uppercase();
        let args: Vec<&str> = words.collect();

        let command = match verb.as_str() {
            "SET" | "PUT" => {
                if args.len() < 2 {
                    return Err(ShellError::parse(format!("{verb} expects a key and a value")));
                }
                Self::Set {
                    key: args[0].to_string(),
                    value: args[1..].join(" "),
                }
            }
            "GET" => Self::Get {
                key: single_key(&verb, &args)?,
            },
            "DELETE" | "REMOVE" => Self::Delete {
                key: single_key(&verb, &args)?,
            },
            "EXISTS" => Self::Exists {
                key: single_key(&verb, &args)?,
            },
            "BEGIN" => no_args(&verb, &args, Self::Begin)?,
            "COMMIT" => no_args(&verb, &args, Self::Commit)?,
            "ROLLBACK" => no_args(&verb, &args, Self::Rollback)?,
            "DEPTH" => no_args(&verb, &args, Self::Depth)?,
            "DUMP" => no_args(&verb, &args, Self::Dump)?,
            "STATUS" => no_args(&verb, &args, Self::Status)?,
            "QUIT" | "EXIT" => no_args(&verb, &args, Self::Quit)?,
            other => return Err(ShellError::parse(format!("unknown command: {other}"))),
        };
        Ok(Some(command))
    }
}

fn single_key(verb: &str, args: &[&str]) -> ShellResult<String> {
    match args {
        [key] => Ok((*key).to_string()),
        _ => Err(ShellError::parse(format!("{verb} expects exactly one key"))),
    }
}

fn no_args(verb: &str, args: &[&str], command: Command) -> ShellResult<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ShellError::parse(format!("{verb} takes no arguments")))
    }
}
