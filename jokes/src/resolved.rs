//! Resolved configuration.
//!
//! Converts optional, boundary-level configuration into concrete values so the
//! fetch path never deals with `Option` defaults.
use std::time::Duration;

use url::Url;

use crate::types::{ErrorCode, JokeConfig, JokeError};

pub(crate) const DEFAULT_USER_AGENT: &str = "quip-jokes/1.0";

#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
    pub endpoint: Url,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub cache: CachePolicy,
}

impl ResolvedConfig {
    pub fn from_config(config: &JokeConfig) -> Result<Self, JokeError> {
        let raw = config.endpoint();
        let endpoint = Url::parse(raw).map_err(|e| {
            JokeError::from_code(ErrorCode::InvalidUrl, format!("failed to parse endpoint: {e}"))
                .with_detail("endpoint", raw)
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(JokeError::from_code(
                ErrorCode::InvalidUrl,
                format!("unsupported endpoint scheme: {}", endpoint.scheme()),
            )
            .with_detail("endpoint", raw));
        }

        let user_agent = config
            .user_agent
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let timeout = config
            .timeout_seconds
            .filter(|&secs| secs > 0)
            .map(|secs| Duration::from_secs(u64::from(secs)));

        Ok(Self {
            endpoint,
            user_agent,
            timeout,
            cache: CachePolicy::from_config(config),
        })
    }
}

/// How long a fetched joke may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Every render fetches.
    NoStore,
    /// Reuse for `ttl`, then fetch again.
    Revalidate(Duration),
}

impl CachePolicy {
    /// Longest accepted window. Larger values are clamped so instant
    /// arithmetic on the window cannot overflow.
    pub const MAX_WINDOW: Duration = Duration::from_secs(365 * 24 * 60 * 60);

    fn from_config(config: &JokeConfig) -> Self {
        if config.no_store {
            return CachePolicy::NoStore;
        }
        match config.revalidate_seconds() {
            0 => CachePolicy::NoStore,
            secs => {
                let window = Duration::from_secs(secs);
                if window > Self::MAX_WINDOW {
                    tracing::warn!(
                        revalidate_seconds = secs,
                        max = Self::MAX_WINDOW.as_secs(),
                        "Revalidation window clamped"
                    );
                }
                CachePolicy::Revalidate(window.min(Self::MAX_WINDOW))
            }
        }
    }
}
