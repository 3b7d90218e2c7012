//! Domain types for the joke fetcher.
//!
//! Configuration, the decoded joke record, fetch output, and structured errors.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Joke fetcher configuration. Maps to `[jokes]` in config.toml.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct JokeConfig {
    /// Endpoint that answers `GET` with a JSON body holding a `joke` field.
    /// Default: `https://icanhazdadjoke.com/`.
    pub endpoint: Option<String>,

    /// Seconds a fetched joke may be reused. Default: 30. Zero disables reuse.
    pub revalidate_seconds: Option<u64>,

    /// Fetch on every render, ignoring `revalidate_seconds`.
    #[serde(default)]
    pub no_store: bool,

    /// Whole-request timeout in seconds. No timeout when absent.
    pub timeout_seconds: Option<u32>,

    /// User-Agent string for requests.
    pub user_agent: Option<String>,
}

impl JokeConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "https://icanhazdadjoke.com/";

    pub const DEFAULT_REVALIDATE_SECONDS: u64 = 30;

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(Self::DEFAULT_ENDPOINT)
    }

    #[must_use]
    pub fn revalidate_seconds(&self) -> u64 {
        self.revalidate_seconds
            .unwrap_or(Self::DEFAULT_REVALIDATE_SECONDS)
    }
}

/// A joke as returned by the service. Extra response fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub joke: String,
}

/// Result of a successful [`crate::JokeFetcher::fetch`].
#[derive(Debug, Clone)]
pub struct JokeOutput {
    pub joke: Joke,

    /// When the joke was fetched from the network (earlier than now on a cache hit).
    pub fetched_at: Instant,

    /// When the joke goes stale. `None` when caching is disabled.
    pub expires_at: Option<Instant>,

    /// Condition tokens from the fetch.
    pub notes: Vec<Note>,
}

impl JokeOutput {
    #[must_use]
    pub fn is_cache_hit(&self) -> bool {
        self.notes.contains(&Note::CacheHit)
    }

    /// Time left in the revalidation window as of `now`.
    #[must_use]
    pub fn fresh_for(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Note {
    /// Served from within the revalidation window, no request issued.
    CacheHit,
    /// Caching disabled; every render fetches.
    NoStore,
}

/// Fetch error with structured details.
///
/// Errors carry:
/// - `code`: Stable error code
/// - `message`: Human-readable description
/// - `retryable`: Whether retry may succeed
/// - `details`: Optional error-specific context
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct JokeError {
    pub code: ErrorCode,
    pub message: String,
    pub retryable: bool,
    pub details: ErrorDetails,
}

impl JokeError {
    pub fn new(code: ErrorCode, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            code,
            message: message.into(),
            retryable,
            details: ErrorDetails::default(),
        }
    }

    /// Build an error using the code's default retryability.
    pub fn from_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message, code.default_retryable())
    }

    /// Add a detail field.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.0.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details
            .0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Endpoint URL parsing failed or used a non-http(s) scheme.
    InvalidUrl,
    /// Request timeout.
    Timeout,
    /// Network/connection error.
    Network,
    /// HTTP 4xx client error.
    Http4xx,
    /// HTTP 5xx server error.
    Http5xx,
    /// Body was not JSON or had no string `joke` field.
    MalformedResponse,
    /// Unexpected internal error.
    Internal,
}

impl ErrorCode {
    /// Check if this error code is retryable by default.
    #[must_use]
    pub fn default_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCode::Timeout | ErrorCode::Network | ErrorCode::Http5xx
        )
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidUrl => "invalid_url",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Network => "network",
            ErrorCode::Http4xx => "http_4xx",
            ErrorCode::Http5xx => "http_5xx",
            ErrorCode::MalformedResponse => "malformed_response",
            ErrorCode::Internal => "internal",
        }
    }
}

/// Error details as key-value pairs.
#[derive(Debug, Clone, Default)]
pub struct ErrorDetails(pub Vec<(String, String)>);
