//! Error types for the content resolver.
//!
//! Library crates use [`ResolverError`] via `thiserror`.
//! The server binary wraps this with `color-eyre` for startup diagnostics.

use std::path::PathBuf;
use std::time::Duration;

/// Top-level error type for all resolver operations.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The backend could not be reached or its body could not be read.
    #[error("network error calling {uri}: {message}")]
    Network { uri: String, message: String },

    /// The backend answered with something other than 200 OK.
    #[error("unexpected status code {status} from {uri}")]
    UnexpectedStatus { uri: String, status: u16 },

    /// A backend payload did not match the expected shape.
    #[error("{operation}: failed to decode payload for {uri}: {message}")]
    Decode {
        operation: &'static str,
        uri: String,
        message: String,
    },

    /// A concurrent unit did not finish within its deadline.
    #[error("{operation}: timed out after {after:?} for {uri}")]
    Timeout {
        operation: &'static str,
        uri: String,
        after: Duration,
    },

    /// A spawned resolution task panicked or was cancelled.
    #[error("{operation}: task for {uri} did not complete: {message}")]
    Task {
        operation: &'static str,
        uri: String,
        message: String,
    },

    /// The fetched page has a type this service cannot resolve.
    #[error("no resolver for page type {page_type:?} at {uri}")]
    UnsupportedPageType { uri: String, page_type: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ResolverError>;

impl ResolverError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a network error for the given backend URI.
    pub fn network(uri: impl Into<String>, msg: impl ToString) -> Self {
        Self::Network {
            uri: uri.into(),
            message: msg.to_string(),
        }
    }

    /// Wrap a `serde_json` failure with the operation and URI it came from.
    pub fn decode(operation: &'static str, uri: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            operation,
            uri: uri.into(),
            message: source.to_string(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure originated at (or on the way to) a backend.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::UnexpectedStatus { .. } | Self::Timeout { .. }
        )
    }
}
