//! Named elapsed-time timers

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Table of running timers keyed by identifier
#[derive(Debug, Default)]
pub struct TimerTable {
    started: Mutex<HashMap<String, Instant>>,
}

impl TimerTable {
    /// Create an empty timer table
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, Instant>> {
        self.started.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Start a timer
    ///
    /// Returns false if a timer with this identifier is already running; the first start
    /// instant is kept in that case.
    pub fn start(&self, identifier: &str) -> bool {
        let mut started = self.table();
        if started.contains_key(identifier) {
            return false;
        }
        started.insert(identifier.to_string(), Instant::now());
        true
    }

    /// Stop a timer, returning how long it ran
    pub fn stop(&self, identifier: &str) -> Option<Duration> {
        self.table()
            .remove(identifier)
            .map(|started_at| started_at.elapsed())
    }

    /// Check whether a timer is running
    pub fn is_running(&self, identifier: &str) -> bool {
        self.table().contains_key(identifier)
    }

    /// Number of running timers
    pub fn len(&self) -> usize {
        self.table().len()
    }

    /// Check if no timers are running
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Format an elapsed timer line, e.g. `load: 12.345ms`
pub fn format_elapsed(identifier: &str, elapsed: Duration) -> String {
    format!("{}: {:.3}ms", identifier, elapsed.as_secs_f64() * 1000.0)
}
