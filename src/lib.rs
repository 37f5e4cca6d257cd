//! tagged-console - a named, switchable console facade
//!
//! A [`Console`] forwards log calls and elapsed-time timers to a host console, tagging every
//! message with its name. Calls are silently dropped when the console is inactive or the host
//! lacks the member being called.

pub mod config;
pub mod console;
pub mod host;
pub mod logging;
pub mod method;
pub mod script;

pub use config::{ConsoleConfig, SinkKind};
pub use console::Console;
pub use host::{HostConsole, MemoryHost, StreamHost, TracingHost};
pub use method::Method;
