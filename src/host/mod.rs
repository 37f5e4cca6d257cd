//! Host console facilities
//!
//! A host is whatever actually prints: a tracing subscriber, a pair of byte streams, or an
//! in-memory recorder. Every capability is probed before use and may be absent.

mod memory;
mod stream;
mod timers;
mod tracing_host;

use std::sync::Arc;

use serde_json::Value;

use crate::method::Method;

pub use memory::{CallKind, HostCall, MemoryHost};
pub use stream::StreamHost;
pub use timers::{format_elapsed, TimerTable};
pub use tracing_host::TracingHost;

/// A console-like object supplied by the host environment
///
/// Capabilities are queried through the `supports*` methods; callers must not invoke a
/// primitive the host reports as missing. Timer primitives default to absent.
pub trait HostConsole: Send + Sync {
    /// Whether the print member for `method` exists and is callable
    fn supports(&self, method: Method) -> bool;

    /// Print `args` under `name` using the member for `method`
    fn print(&self, method: Method, name: &str, args: &[Value]);

    /// Whether a time-start primitive exists
    fn supports_time(&self) -> bool {
        false
    }

    /// Start the timer keyed by `identifier`
    fn time(&self, _identifier: &str) {}

    /// Whether a time-stop primitive exists
    fn supports_time_end(&self) -> bool {
        false
    }

    /// Stop the timer keyed by `identifier` and report the elapsed duration
    fn time_end(&self, _identifier: &str) {}
}

impl<T: HostConsole + ?Sized> HostConsole for Arc<T> {
    fn supports(&self, method: Method) -> bool {
        (**self).supports(method)
    }

    fn print(&self, method: Method, name: &str, args: &[Value]) {
        (**self).print(method, name, args)
    }

    fn supports_time(&self) -> bool {
        (**self).supports_time()
    }

    fn time(&self, identifier: &str) {
        (**self).time(identifier)
    }

    fn supports_time_end(&self) -> bool {
        (**self).supports_time_end()
    }

    fn time_end(&self, identifier: &str) {
        (**self).time_end(identifier)
    }
}

impl<T: HostConsole + ?Sized> HostConsole for Box<T> {
    fn supports(&self, method: Method) -> bool {
        (**self).supports(method)
    }

    fn print(&self, method: Method, name: &str, args: &[Value]) {
        (**self).print(method, name, args)
    }

    fn supports_time(&self) -> bool {
        (**self).supports_time()
    }

    fn time(&self, identifier: &str) {
        (**self).time(identifier)
    }

    fn supports_time_end(&self) -> bool {
        (**self).supports_time_end()
    }

    fn time_end(&self, identifier: &str) {
        (**self).time_end(identifier)
    }
}

/// Render an argument list as a single display line
///
/// Strings are printed raw, everything else as compact JSON.
pub fn render_args(args: &[Value]) -> String {
    args.iter()
        .map(|arg| match arg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a full console line: the name followed by the arguments
pub(crate) fn render_line(name: &str, args: &[Value]) -> String {
    match (name.is_empty(), args.is_empty()) {
        (_, true) => name.to_string(),
        (true, false) => render_args(args),
        (false, false) => format!("{} {}", name, render_args(args)),
    }
}
