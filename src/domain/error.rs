//! Error types for the reelsearch plugin.
//!
//! This module defines the centralized error type [`ReelsearchError`] and a type alias
//! [`Result`] used throughout the crate. The taxonomy mirrors how failures surface to
//! the user: validation problems stay inside the controller, fetch failures become a
//! terminal status for one search key, and configuration problems are permanent.

use thiserror::Error;

/// The main error type for reelsearch operations.
#[derive(Debug, Error)]
pub enum ReelsearchError {
    /// User input was rejected locally and never reached the network layer.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A search request failed in transport, at the HTTP level, or while decoding.
    ///
    /// The inner [`FetchFailure`] keeps the underlying cause for diagnostic logging;
    /// the UI only ever shows a generic message.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchFailure),

    /// Configuration is invalid or missing (e.g. no API token).
    ///
    /// Checked once when the API client is constructed and returned unchanged by
    /// every later call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Locally detected input errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The query was empty after trimming.
    #[error("search query is empty")]
    EmptyQuery,

    /// Page numbers start at 1.
    #[error("page must be at least 1")]
    ZeroPage,

    /// The requested page lies outside the known result range.
    #[error("page {requested} is outside 1..={total_pages}")]
    PageOutOfRange {
        /// Page the user asked for.
        requested: u32,
        /// Upper bound known for the current query.
        total_pages: u32,
    },

    /// The movie is not part of the displayed result set.
    #[error("movie {0} is not in the displayed results")]
    UnknownMovie(u64),

    /// There is no active search to act on.
    #[error("no active search")]
    NoActiveSearch,
}

/// Why a single search request failed.
///
/// Cached per search key as the error state of that key, so it must be cheap to
/// clone and comparable in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// TMDB `status_message` when present, otherwise a placeholder.
        message: String,
    },

    /// The body could not be decoded as a search response.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// No response arrived within the request timeout.
    #[error("no response after {after_secs}s")]
    Timeout {
        /// Configured timeout in seconds.
        after_secs: u64,
    },

    /// The request could not be issued at all.
    #[error("request not sent: {0}")]
    Transport(String),

    /// The client is not configured to send requests (e.g. no API token).
    #[error("client not configured: {0}")]
    Config(String),
}

/// A specialized `Result` type for reelsearch operations.
pub type Result<T> = std::result::Result<T, ReelsearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_convert_into_crate_error() {
        let err: ReelsearchError = ValidationError::EmptyQuery.into();
        assert!(matches!(err, ReelsearchError::Validation(ValidationError::EmptyQuery)));
        assert_eq!(err.to_string(), "Validation error: search query is empty");
    }

    #[test]
    fn fetch_failure_keeps_the_cause_in_its_message() {
        let failure = FetchFailure::Status {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        let err: ReelsearchError = failure.into();
        assert_eq!(err.to_string(), "Fetch error: HTTP 401: Invalid API key");
    }
}
