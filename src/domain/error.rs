//! Error types for the Jiffy plugin.
//!
//! [`JiffyError`] covers plugin-level faults (configuration, theming, worker
//! communication, I/O) and comes with the [`Result`] alias used across the
//! crate. [`SearchError`] is the narrower taxonomy of a single search request;
//! it never escapes the search client, which folds it into a
//! [`SearchOutcome::Failure`](crate::domain::SearchOutcome::Failure) hint.

use thiserror::Error;

/// The main error type for Jiffy plugin operations.
///
/// # Examples
///
/// ```
/// use jiffy::domain::JiffyError;
///
/// fn require_key(key: Option<&str>) -> Result<&str, JiffyError> {
///     key.ok_or_else(|| JiffyError::Config("api_key is not set".to_string()))
/// }
///
/// assert!(require_key(None).is_err());
/// ```
#[derive(Debug, Error)]
pub enum JiffyError {
    /// Configuration is invalid or missing.
    ///
    /// The string names the offending key and what was wrong with it.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    ///
    /// Raised when a worker message or response cannot be encoded or decoded.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a single search request did not produce a clip.
///
/// The `Display` text of each variant is what the user sees as hint text
/// when detailed error hints are enabled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The request went through but the result array was empty.
    #[error("Nothing found for {term}")]
    EmptyResult {
        /// Term that produced no results.
        term: String,
    },

    /// Network failure, timeout, or a non-success HTTP status.
    #[error("Search failed: {0}")]
    Transport(String),

    /// The body was not the expected `{ "data": [...] }` shape.
    #[error("Unexpected response: {0}")]
    MalformedResponse(String),
}

impl SearchError {
    /// Whether this failure should be reported with the transport hint.
    ///
    /// Malformed bodies are treated as transport failures, so only an empty
    /// result set keeps its own message.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::MalformedResponse(_))
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

/// A specialized `Result` type for Jiffy operations.
pub type Result<T> = std::result::Result<T, JiffyError>;
