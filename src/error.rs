//! Error types for the fallible edges: loading bubbles and loading config.
//!
//! The orbit engine itself never fails; only I/O and decoding do.

use std::fmt;

/// Error while loading the bubble list.
#[derive(Debug)]
pub enum SourceError {
    Io { path: String, message: String },
    Decode(String),
    InvalidUrl(String),
    Http { status: u16, message: String },
    Request(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io { path, message } => write!(f, "Cannot read {}: {}", path, message),
            SourceError::Decode(m) => write!(f, "Invalid bubble data: {}", m),
            SourceError::InvalidUrl(m) => write!(f, "Invalid URL: {}", m),
            SourceError::Http { status, message } => write!(f, "HTTP {}: {}", status, message),
            SourceError::Request(m) => write!(f, "Request failed: {}", m),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Decode(e.to_string())
    }
}

/// Error while loading or validating `OrbitConfig`.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, message: String },
    Parse(String),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => write!(f, "Cannot read {}: {}", path, message),
            ConfigError::Parse(m) => write!(f, "Config parse error: {}", m),
            ConfigError::Invalid { field, reason } => write!(f, "Invalid {}: {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {}
