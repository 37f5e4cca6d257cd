//! In-memory host
//!
//! Records every host interaction in a bounded ring buffer instead of printing it.

use std::collections::VecDeque;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::HostConsole;
use crate::method::Method;

/// What the host was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum CallKind {
    /// A print member was invoked
    Print {
        method: Method,
        name: String,
        args: Vec<Value>,
    },
    /// The time-start primitive was invoked
    Time { identifier: String },
    /// The time-stop primitive was invoked
    TimeEnd { identifier: String },
}

/// A single recorded host interaction
#[derive(Debug, Clone)]
pub struct HostCall {
    /// When the host received the call
    pub timestamp: DateTime<Utc>,
    pub kind: CallKind,
}

impl HostCall {
    fn new(kind: CallKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

/// Thread-safe recording host with switchable capabilities
pub struct MemoryHost {
    calls: RwLock<VecDeque<HostCall>>,
    max_calls: usize,
    methods: Vec<Method>,
    time: bool,
    time_end: bool,
}

impl MemoryHost {
    /// Create a host with every capability, keeping at most `max_calls` records
    pub fn new(max_calls: usize) -> Self {
        Self {
            calls: RwLock::new(VecDeque::with_capacity(max_calls.min(1024))),
            max_calls,
            methods: Method::ALL.to_vec(),
            time: true,
            time_end: true,
        }
    }

    /// Restrict the print members this host exposes
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    /// Remove the time-start primitive
    pub fn without_time(mut self) -> Self {
        self.time = false;
        self
    }

    /// Remove the time-stop primitive
    pub fn without_time_end(mut self) -> Self {
        self.time_end = false;
        self
    }

    fn record(&self, kind: CallKind) {
        if self.max_calls == 0 {
            return;
        }
        if let Ok(mut calls) = self.calls.write() {
            if calls.len() >= self.max_calls {
                calls.pop_front();
            }
            calls.push_back(HostCall::new(kind));
        }
    }

    /// Get all recorded calls, oldest first
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls
            .read()
            .map(|c| c.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Get only the call kinds, oldest first
    pub fn kinds(&self) -> Vec<CallKind> {
        self.calls
            .read()
            .map(|c| c.iter().map(|call| call.kind.clone()).collect())
            .unwrap_or_default()
    }

    /// Get the number of recorded calls
    pub fn len(&self) -> usize {
        self.calls.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all recorded calls
    pub fn clear(&self) {
        if let Ok(mut calls) = self.calls.write() {
            calls.clear();
        }
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl HostConsole for MemoryHost {
    fn supports(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    fn print(&self, method: Method, name: &str, args: &[Value]) {
        self.record(CallKind::Print {
            method,
            name: name.to_string(),
            args: args.to_vec(),
        });
    }

    fn supports_time(&self) -> bool {
        self.time
    }

    fn time(&self, identifier: &str) {
        self.record(CallKind::Time {
            identifier: identifier.to_string(),
        });
    }

    fn supports_time_end(&self) -> bool {
        self.time_end
    }

    fn time_end(&self, identifier: &str) {
        self.record(CallKind::TimeEnd {
            identifier: identifier.to_string(),
        });
    }
}
