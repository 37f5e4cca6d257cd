//! Byte stream host
//!
//! Writes console lines to an output stream and an error stream, the way a terminal console
//! would. Write failures are swallowed.

use std::io::{self, Stderr, Stdout, Write};
use std::sync::Mutex;

use serde_json::Value;

use super::timers::{format_elapsed, TimerTable};
use super::{render_line, HostConsole};
use crate::method::Method;

/// Host that prints `log`/`info` to `out` and `warn`/`error` to `err`
pub struct StreamHost<O, E> {
    out: Mutex<O>,
    err: Mutex<E>,
    timers: TimerTable,
}

impl StreamHost<Stdout, Stderr> {
    /// Bind to the process stdout and stderr
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O, E> StreamHost<O, E>
where
    O: Write + Send,
    E: Write + Send,
{
    pub fn new(out: O, err: E) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
            timers: TimerTable::new(),
        }
    }

    /// Consume the host and hand back its writers
    pub fn into_writers(self) -> (O, E) {
        let out = self.out.into_inner().unwrap_or_else(|p| p.into_inner());
        let err = self.err.into_inner().unwrap_or_else(|p| p.into_inner());
        (out, err)
    }

    fn write_out(&self, line: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", line);
            let _ = out.flush();
        }
    }

    fn write_err(&self, line: &str) {
        if let Ok(mut err) = self.err.lock() {
            let _ = writeln!(err, "{}", line);
            let _ = err.flush();
        }
    }
}

impl<O, E> HostConsole for StreamHost<O, E>
where
    O: Write + Send,
    E: Write + Send,
{
    fn supports(&self, _method: Method) -> bool {
        true
    }

    fn print(&self, method: Method, name: &str, args: &[Value]) {
        let line = render_line(name, args);
        if method.is_alert() {
            self.write_err(&line);
        } else {
            self.write_out(&line);
        }
    }

    fn supports_time(&self) -> bool {
        true
    }

    fn time(&self, identifier: &str) {
        if !self.timers.start(identifier) {
            self.write_err(&format!("Timer '{}' already exists", identifier));
        }
    }

    fn supports_time_end(&self) -> bool {
        true
    }

    fn time_end(&self, identifier: &str) {
        match self.timers.stop(identifier) {
            Some(elapsed) => self.write_out(&format_elapsed(identifier, elapsed)),
            None => self.write_err(&format!("Timer '{}' does not exist", identifier)),
        }
    }
}
