//! Joke fetching with a revalidation window.
//!
//! # Pipeline
//!
//! 1. **Cache check** - Returns the stored joke if it is younger than the window
//! 2. **Request** - `GET` the endpoint with `Accept: application/json`
//! 3. **Decode** - Reads the `joke` field from the JSON body
//! 4. **Cache write** - Stores the joke and restarts the window
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Configuration, output, structured errors |
//! | `http` | reqwest client and response decoding |
//! | `cache` | Single-entry revalidate-after-interval cache |
//! | `resolved` | Config resolution eliminating Option handling |
//!
//! # Usage
//!
//! ```ignore
//! use quip_jokes::{JokeConfig, JokeFetcher};
//!
//! let fetcher = JokeFetcher::new(&JokeConfig::default())?;
//! let output = fetcher.fetch().await?;
//! println!("{}", output.joke.joke);
//! ```
//!
//! # Error Handling
//!
//! All errors are [`JokeError`] with a stable [`ErrorCode`], a human-readable
//! message, and a `retryable` hint. Nothing is retried here; callers decide.

mod cache;
mod http;
mod resolved;
pub mod types;

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use cache::{CacheResult, RevalidateCache};
use resolved::ResolvedConfig;

pub use resolved::CachePolicy;
pub use types::{ErrorCode, ErrorDetails, Joke, JokeConfig, JokeError, JokeOutput, Note};

/// Fetches jokes and reuses them for the configured window.
///
/// Shared between renders (wrap it in an `Arc`). The cache lock is only held
/// for the lookup and the store, never across the request.
#[derive(Debug)]
pub struct JokeFetcher {
    client: reqwest::Client,
    config: ResolvedConfig,
    cache: Mutex<RevalidateCache<Joke>>,
}

impl JokeFetcher {
    pub fn new(config: &JokeConfig) -> Result<Self, JokeError> {
        let config = ResolvedConfig::from_config(config)?;
        let client = http::build_client(&config)?;
        let cache = Mutex::new(RevalidateCache::new(config.cache));
        Ok(Self {
            client,
            config,
            cache,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.config.endpoint.as_str()
    }

    #[must_use]
    pub fn cache_policy(&self) -> CachePolicy {
        self.config.cache
    }

    /// Resolve a joke, from the cache when fresh, otherwise from the endpoint.
    ///
    /// # Errors
    ///
    /// Returns `JokeError` for network failures, timeouts, non-2xx responses,
    /// and bodies without a string `joke` field. Failures leave the cache as
    /// it was.
    pub async fn fetch(&self) -> Result<JokeOutput, JokeError> {
        if let Some(output) = self.check_cache(Instant::now()) {
            tracing::debug!(endpoint = %self.config.endpoint, "Joke served from cache");
            return Ok(output);
        }

        tracing::debug!(endpoint = %self.config.endpoint, "Fetching joke");
        let joke = http::get_joke(&self.client, &self.config).await?;
        let fetched_at = Instant::now();

        let expires_at = {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache.put(joke.clone(), fetched_at);
            cache.ttl().and_then(|ttl| fetched_at.checked_add(ttl))
        };

        let notes = match self.config.cache {
            CachePolicy::NoStore => vec![Note::NoStore],
            CachePolicy::Revalidate(_) => Vec::new(),
        };

        Ok(JokeOutput {
            joke,
            fetched_at,
            expires_at,
            notes,
        })
    }

    /// Forget the stored joke so the next fetch goes to the network.
    pub fn invalidate(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn check_cache(&self, now: Instant) -> Option<JokeOutput> {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        match cache.get(now) {
            CacheResult::Hit { entry, remaining } => Some(JokeOutput {
                joke: entry.value,
                fetched_at: entry.fetched_at,
                expires_at: now.checked_add(remaining),
                notes: vec![Note::CacheHit],
            }),
            CacheResult::Stale | CacheResult::Miss => None,
        }
    }
}
