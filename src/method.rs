//! Console severities

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The console member a call is routed to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Log,
    Info,
    Warn,
    Error,
}

impl Method {
    /// Every method, in severity order
    pub const ALL: [Method; 4] = [Method::Log, Method::Info, Method::Warn, Method::Error];

    /// Get the member name for this method
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Log => "log",
            Method::Info => "info",
            Method::Warn => "warn",
            Method::Error => "error",
        }
    }

    /// Whether this method belongs on an error stream
    pub fn is_alert(&self) -> bool {
        matches!(self, Method::Warn | Method::Error)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown console method '{0}'")]
pub struct ParseMethodError(pub String);

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseMethodError(s.to_string()))
    }
}
