//! Host that prints through `tracing`

use serde_json::Value;

use super::timers::{format_elapsed, TimerTable};
use super::{render_args, HostConsole};
use crate::method::Method;

/// Target used for every event this host emits
pub const TARGET: &str = "tagged_console::host";

/// Default host: forwards console calls to the installed tracing subscriber
///
/// `log` and `info` both map to INFO. The console name travels as the `console` field.
#[derive(Debug, Default)]
pub struct TracingHost {
    timers: TimerTable,
}

impl TracingHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HostConsole for TracingHost {
    fn supports(&self, _method: Method) -> bool {
        true
    }

    fn print(&self, method: Method, name: &str, args: &[Value]) {
        let line = render_args(args);
        match method {
            Method::Log | Method::Info => tracing::info!(target: TARGET, console = %name, "{}", line),
            Method::Warn => tracing::warn!(target: TARGET, console = %name, "{}", line),
            Method::Error => tracing::error!(target: TARGET, console = %name, "{}", line),
        }
    }

    fn supports_time(&self) -> bool {
        true
    }

    fn time(&self, identifier: &str) {
        if !self.timers.start(identifier) {
            tracing::warn!(target: TARGET, "Timer '{}' already exists", identifier);
        }
    }

    fn supports_time_end(&self) -> bool {
        true
    }

    fn time_end(&self, identifier: &str) {
        match self.timers.stop(identifier) {
            Some(elapsed) => {
                tracing::info!(target: TARGET, "{}", format_elapsed(identifier, elapsed))
            }
            None => tracing::warn!(target: TARGET, "Timer '{}' does not exist", identifier),
        }
    }
}
