//! Line-oriented command driver
//!
//! Each input line is one command: `log|info|warn|error <text>`, `time <id>`, `timeEnd <id>`,
//! `on`, `off` or `name <label>`. Blank lines and `#` comments are skipped.

use std::str::FromStr;

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::console::Console;
use crate::method::Method;

/// A single driver command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Print { method: Method, args: Vec<String> },
    StartTimer(String),
    StopTimer(String),
    SetActive(bool),
    Rename(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("unknown command '{0}'")]
    UnknownVerb(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' takes no arguments")]
    UnexpectedArgument(&'static str),
}

impl Command {
    /// Apply this command to a console
    pub fn apply(&self, console: &mut Console) {
        match self {
            Command::Print { method, args } => {
                let args: Vec<Value> = args.iter().cloned().map(Value::String).collect();
                match method {
                    Method::Log => console.log(&args),
                    Method::Info => console.info(&args),
                    Method::Warn => console.warn(&args),
                    Method::Error => console.error(&args),
                }
            }
            Command::StartTimer(id) => console.start_timer(id),
            Command::StopTimer(id) => console.stop_timer(id),
            Command::SetActive(active) => console.active = *active,
            Command::Rename(name) => console.name = name.clone(),
        }
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        if let Ok(method) = verb.parse::<Method>() {
            let args = rest.split_whitespace().map(str::to_string).collect();
            return Ok(Command::Print { method, args });
        }

        match verb {
            "time" => required("time", rest).map(Command::StartTimer),
            "timeEnd" => required("timeEnd", rest).map(Command::StopTimer),
            "name" => required("name", rest).map(Command::Rename),
            "on" => bare("on", rest, Command::SetActive(true)),
            "off" => bare("off", rest, Command::SetActive(false)),
            other => Err(ParseCommandError::UnknownVerb(other.to_string())),
        }
    }
}

fn required(verb: &'static str, rest: &str) -> Result<String, ParseCommandError> {
    if rest.is_empty() {
        Err(ParseCommandError::MissingArgument(verb))
    } else {
        Ok(rest.to_string())
    }
}

fn bare(verb: &'static str, rest: &str, command: Command) -> Result<Command, ParseCommandError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(ParseCommandError::UnexpectedArgument(verb))
    }
}

/// Whether a line carries no command
fn is_skippable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Read commands from `reader` until EOF and apply them to `console`
///
/// Lines that fail to parse are reported and skipped. Returns the number of commands applied.
pub async fn run_script<R>(console: &mut Console, reader: R) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut applied = 0;
    let mut line_no = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read command")? {
        line_no += 1;
        if is_skippable(&line) {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                command.apply(console);
                applied += 1;
            }
            Err(e) => tracing::warn!("line {}: {}", line_no, e),
        }
    }

    tracing::debug!("Applied {} commands", applied);
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{CallKind, MemoryHost};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_parse_print() {
        assert_eq!(
            "warn disk  almost full".parse::<Command>().unwrap(),
            Command::Print {
                method: Method::Warn,
                args: vec!["disk".into(), "almost".into(), "full".into()],
            }
        );
        assert_eq!(
            "log".parse::<Command>().unwrap(),
            Command::Print {
                method: Method::Log,
                args: vec![],
            }
        );
    }

    #[test]
    fn test_parse_control() {
        assert_eq!(
            "time load".parse::<Command>().unwrap(),
            Command::StartTimer("load".into())
        );
        assert_eq!(
            "timeEnd load".parse::<Command>().unwrap(),
            Command::StopTimer("load".into())
        );
        assert_eq!("off".parse::<Command>().unwrap(), Command::SetActive(false));
        assert_eq!(
            "name my console".parse::<Command>().unwrap(),
            Command::Rename("my console".into())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "shout hi".parse::<Command>().unwrap_err(),
            ParseCommandError::UnknownVerb("shout".into())
        );
        assert_eq!(
            "time".parse::<Command>().unwrap_err(),
            ParseCommandError::MissingArgument("time")
        );
        assert_eq!(
            "on now".parse::<Command>().unwrap_err(),
            ParseCommandError::UnexpectedArgument("on")
        );
    }

    #[tokio::test]
    async fn test_run_script() {
        let host = Arc::new(MemoryHost::default());
        let mut console = Console::with_host("script", Arc::clone(&host));

        let script = "\
# comment
log hello world

time t
timeEnd t
bogus line
off
error hidden
on
name renamed
info back
";
        let applied = run_script(&mut console, script.as_bytes()).await.unwrap();
        assert_eq!(applied, 8);

        assert_eq!(
            host.kinds(),
            vec![
                CallKind::Print {
                    method: Method::Log,
                    name: "script".into(),
                    args: vec![json!("hello"), json!("world")],
                },
                CallKind::Time {
                    identifier: "t".into()
                },
                CallKind::Print {
                    method: Method::Info,
                    name: "script".into(),
                    args: vec![json!("timer t started")],
                },
                CallKind::TimeEnd {
                    identifier: "t".into()
                },
                CallKind::Print {
                    method: Method::Info,
                    name: "renamed".into(),
                    args: vec![json!("back")],
                },
            ]
        );
    }
}
