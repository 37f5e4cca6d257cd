//! The named, switchable console
//!
//! ```
//! use std::sync::Arc;
//! use tagged_console::{console_log, Console, MemoryHost};
//!
//! let host = Arc::new(MemoryHost::default());
//! let mut debug = Console::with_host("my console", Arc::clone(&host));
//! console_log!(debug, "Hello world!");
//! assert_eq!(host.len(), 1);
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::config::{ConsoleConfig, SinkKind};
use crate::host::{HostConsole, StreamHost, TracingHost};
use crate::method::Method;

/// Default console name
pub const DEFAULT_NAME: &str = "console";

/// Convert any serializable value into a console argument
///
/// Values that cannot be represented as JSON are passed as their error text.
pub fn to_arg<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| Value::String(e.to_string()))
}

/// A console that tags every message with a name and can be switched off
///
/// All operations are silent no-ops when the console is inactive, when no host is bound, or
/// when the host lacks the member being called.
pub struct Console {
    /// Whether the console should report
    pub active: bool,
    /// Label printed ahead of every message
    pub name: String,
    method: Method,
    host: Option<Box<dyn HostConsole>>,
}

impl Console {
    /// Create an active console bound to `host`
    pub fn with_host(name: impl Into<String>, host: impl HostConsole + 'static) -> Self {
        Self {
            active: true,
            name: name.into(),
            method: Method::default(),
            host: Some(Box::new(host)),
        }
    }

    /// Create a console with no host console at all
    pub fn detached(name: impl Into<String>) -> Self {
        Self {
            active: true,
            name: name.into(),
            method: Method::default(),
            host: None,
        }
    }

    /// Build a console from configuration
    pub fn from_config(config: &ConsoleConfig) -> Self {
        let mut console = match config.sink {
            SinkKind::Tracing => Self::with_host(config.name.clone(), TracingHost::new()),
            SinkKind::Stdio => Self::with_host(config.name.clone(), StreamHost::stdio()),
            SinkKind::None => Self::detached(config.name.clone()),
        };
        console.active = config.active;
        console
    }

    /// The method used by the most recent call
    pub fn method(&self) -> Method {
        self.method
    }

    /// Whether a host console is bound
    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    /// Replace the host console, returning the previous one
    pub fn set_host(&mut self, host: impl HostConsole + 'static) -> Option<Box<dyn HostConsole>> {
        self.host.replace(Box::new(host))
    }

    /// Unbind the host console
    pub fn take_host(&mut self) -> Option<Box<dyn HostConsole>> {
        self.host.take()
    }

    /// The standard log function
    pub fn log(&mut self, args: &[Value]) {
        self.method = Method::Log;
        self.output(args);
    }

    /// Info style messages
    pub fn info(&mut self, args: &[Value]) {
        self.method = Method::Info;
        self.output(args);
    }

    /// Warn style messages
    pub fn warn(&mut self, args: &[Value]) {
        self.method = Method::Warn;
        self.output(args);
    }

    /// Error style messages
    pub fn error(&mut self, args: &[Value]) {
        self.method = Method::Error;
        self.output(args);
    }

    /// Start a named timer and announce it
    ///
    /// An empty identifier does nothing.
    pub fn start_timer(&mut self, identifier: &str) {
        if identifier.is_empty() {
            return;
        }
        self.method = Method::Info;
        self.timer_start(identifier);
        self.output(&[Value::String(format!("timer {} started", identifier))]);
    }

    /// Stop a named timer; the host reports the elapsed time
    ///
    /// An empty identifier does nothing.
    pub fn stop_timer(&mut self, identifier: &str) {
        if identifier.is_empty() {
            return;
        }
        self.timer_stop(identifier);
    }

    fn output(&self, args: &[Value]) {
        let Some(host) = self.live_host() else {
            return;
        };
        if !host.supports(self.method) {
            tracing::debug!(method = %self.method, "host has no member for method, dropping call");
            return;
        }
        host.print(self.method, &self.name, args);
    }

    fn timer_start(&self, identifier: &str) {
        if let Some(host) = self.live_host() {
            if host.supports_time() {
                host.time(identifier);
            }
        }
    }

    fn timer_stop(&self, identifier: &str) {
        if let Some(host) = self.live_host() {
            if host.supports_time_end() {
                host.time_end(identifier);
            }
        }
    }

    fn live_host(&self) -> Option<&dyn HostConsole> {
        if !self.active {
            return None;
        }
        self.host.as_deref()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::with_host(DEFAULT_NAME, TracingHost::new())
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("active", &self.active)
            .field("name", &self.name)
            .field("method", &self.method)
            .field("has_host", &self.host.is_some())
            .finish()
    }
}

/// Log any number of serializable values: `console_log!(console, "a", 1, vec![2])`
#[macro_export]
macro_rules! console_log {
    ($console:expr $(,)?) => {
        $console.log(&[])
    };
    ($console:expr, $($arg:expr),+ $(,)?) => {
        $console.log(&[$($crate::console::to_arg(&$arg)),+])
    };
}

/// Info-level variant of [`console_log!`]
#[macro_export]
macro_rules! console_info {
    ($console:expr $(,)?) => {
        $console.info(&[])
    };
    ($console:expr, $($arg:expr),+ $(,)?) => {
        $console.info(&[$($crate::console::to_arg(&$arg)),+])
    };
}

/// Warn-level variant of [`console_log!`]
#[macro_export]
macro_rules! console_warn {
    ($console:expr $(,)?) => {
        $console.warn(&[])
    };
    ($console:expr, $($arg:expr),+ $(,)?) => {
        $console.warn(&[$($crate::console::to_arg(&$arg)),+])
    };
}

/// Error-level variant of [`console_log!`]
#[macro_export]
macro_rules! console_error {
    ($console:expr $(,)?) => {
        $console.error(&[])
    };
    ($console:expr, $($arg:expr),+ $(,)?) => {
        $console.error(&[$($crate::console::to_arg(&$arg)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{CallKind, MemoryHost};
    use serde_json::json;
    use std::sync::Arc;

    fn console_with(host: &Arc<MemoryHost>) -> Console {
        Console::with_host("my console", Arc::clone(host))
    }

    fn print(method: Method, args: Vec<Value>) -> CallKind {
        CallKind::Print {
            method,
            name: "my console".to_string(),
            args,
        }
    }

    #[test]
    fn test_defaults() {
        let console = Console::default();
        assert!(console.active);
        assert_eq!(console.name, "console");
        assert_eq!(console.method(), Method::Log);
        assert!(console.has_host());
    }

    #[test]
    fn test_each_method_forwards_once() {
        let host = Arc::new(MemoryHost::default());
        let mut console = console_with(&host);

        console.log(&[json!("Hello World!")]);
        console.info(&[json!(1), json!(2)]);
        console.warn(&[]);
        console.error(&[json!({"k": "v"})]);

        assert_eq!(
            host.kinds(),
            vec![
                print(Method::Log, vec![json!("Hello World!")]),
                print(Method::Info, vec![json!(1), json!(2)]),
                print(Method::Warn, vec![]),
                print(Method::Error, vec![json!({"k": "v"})]),
            ]
        );
    }

    #[test]
    fn test_method_tracks_last_call() {
        let mut console = Console::detached("x");
        console.warn(&[]);
        assert_eq!(console.method(), Method::Warn);
        console.error(&[]);
        assert_eq!(console.method(), Method::Error);
        console.start_timer("t");
        assert_eq!(console.method(), Method::Info);
        console.log(&[]);
        console.stop_timer("t");
        assert_eq!(console.method(), Method::Log);
    }

    #[test]
    fn test_inactive_console_is_silent() {
        let host = Arc::new(MemoryHost::default());
        let mut console = console_with(&host);
        console.active = false;

        console.log(&[json!("a")]);
        console.info(&[json!("b")]);
        console.warn(&[json!("c")]);
        console.error(&[json!("d")]);
        console.start_timer("t");
        console.stop_timer("t");

        assert!(host.is_empty());
        assert_eq!(console.method(), Method::Info);
    }

    #[test]
    fn test_missing_member_is_dropped() {
        let host = Arc::new(MemoryHost::default().with_methods([Method::Log]));
        let mut console = console_with(&host);

        console.warn(&[json!("dropped")]);
        console.log(&[json!("kept")]);

        assert_eq!(host.kinds(), vec![print(Method::Log, vec![json!("kept")])]);
    }

    #[test]
    fn test_detached_console_never_panics() {
        let mut console = Console::detached("nowhere");
        console.log(&[json!("a")]);
        console.start_timer("t");
        console.stop_timer("t");
        assert!(!console.has_host());
    }

    #[test]
    fn test_empty_timer_identifier_is_noop() {
        let host = Arc::new(MemoryHost::default());
        let mut console = console_with(&host);
        console.warn(&[]);
        host.clear();

        console.start_timer("");
        console.stop_timer("");

        assert!(host.is_empty());
        assert_eq!(console.method(), Method::Warn);
    }

    #[test]
    fn test_timer_round_trip() {
        let host = Arc::new(MemoryHost::default());
        let mut console = console_with(&host);

        console.start_timer("x");
        console.stop_timer("x");

        assert_eq!(
            host.kinds(),
            vec![
                CallKind::Time {
                    identifier: "x".to_string()
                },
                print(Method::Info, vec![json!("timer x started")]),
                CallKind::TimeEnd {
                    identifier: "x".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_start_timer_without_time_primitive_still_announces() {
        let host = Arc::new(MemoryHost::default().without_time().without_time_end());
        let mut console = console_with(&host);

        console.start_timer("x");
        console.stop_timer("x");

        assert_eq!(
            host.kinds(),
            vec![print(Method::Info, vec![json!("timer x started")])]
        );
    }

    #[test]
    fn test_toggle_active_between_calls() {
        let host = Arc::new(MemoryHost::default());
        let mut console = console_with(&host);

        console.log(&[json!("first")]);
        console.active = false;
        console.log(&[json!("second")]);

        assert_eq!(host.kinds(), vec![print(Method::Log, vec![json!("first")])]);
    }

    #[test]
    fn test_name_change_applies_to_next_call() {
        let host = Arc::new(MemoryHost::default());
        let mut console = console_with(&host);
        console.name = "renamed".to_string();
        console.info(&[]);

        assert_eq!(
            host.kinds(),
            vec![CallKind::Print {
                method: Method::Info,
                name: "renamed".to_string(),
                args: vec![],
            }]
        );
    }

    #[test]
    fn test_macros_convert_arguments() {
        let host = Arc::new(MemoryHost::default());
        let mut console = console_with(&host);

        crate::console_log!(console, "Hello", 42, vec![1, 2]);
        crate::console_info!(console);
        crate::console_warn!(console, true,);
        crate::console_error!(console, Some("e"));

        assert_eq!(
            host.kinds(),
            vec![
                print(Method::Log, vec![json!("Hello"), json!(42), json!([1, 2])]),
                print(Method::Info, vec![]),
                print(Method::Warn, vec![json!(true)]),
                print(Method::Error, vec![json!("e")]),
            ]
        );
    }

    #[test]
    fn test_swap_host() {
        let first = Arc::new(MemoryHost::default());
        let second = Arc::new(MemoryHost::default());
        let mut console = console_with(&first);

        console.log(&[]);
        assert!(console.set_host(Arc::clone(&second)).is_some());
        console.log(&[]);
        assert!(console.take_host().is_some());
        console.log(&[]);

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = ConsoleConfig {
            name: "cfg".to_string(),
            active: false,
            sink: SinkKind::None,
            ..ConsoleConfig::default()
        };
        let console = Console::from_config(&config);
        assert_eq!(console.name, "cfg");
        assert!(!console.active);
        assert!(!console.has_host());
    }

    #[test]
    fn test_from_config_binds_host_for_printing_sinks() {
        for sink in [SinkKind::Tracing, SinkKind::Stdio] {
            let config = ConsoleConfig {
                name: sink.to_string(),
                sink,
                ..ConsoleConfig::default()
            };
            let console = Console::from_config(&config);
            assert!(console.has_host(), "{} should bind a host", sink);
            assert!(console.active);
            assert_eq!(console.name, sink.as_str());
        }
    }
}
