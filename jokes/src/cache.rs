//! Revalidate-after-interval cache.
//!
//! Holds at most one value together with the instant it was fetched. A value
//! younger than the window is served as-is; anything older is a miss and the
//! caller fetches again. There is no eviction beyond replacement and no
//! background refresh.

use std::time::{Duration, Instant};

use crate::resolved::CachePolicy;

#[derive(Debug, Clone)]
pub(crate) struct CacheEntry<T> {
    pub value: T,
    pub fetched_at: Instant,
}

#[derive(Debug)]
pub(crate) enum CacheResult<T> {
    /// Fresh value with the time it has left.
    Hit { entry: CacheEntry<T>, remaining: Duration },
    /// Entry exists but its window has passed.
    Stale,
    /// Nothing stored, or caching disabled.
    Miss,
}

#[derive(Debug)]
pub(crate) struct RevalidateCache<T> {
    policy: CachePolicy,
    entry: Option<CacheEntry<T>>,
}

impl<T: Clone> RevalidateCache<T> {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entry: None,
        }
    }

    pub fn get(&self, now: Instant) -> CacheResult<T> {
        let CachePolicy::Revalidate(ttl) = self.policy else {
            return CacheResult::Miss;
        };
        let Some(entry) = &self.entry else {
            return CacheResult::Miss;
        };

        let age = now.saturating_duration_since(entry.fetched_at);
        if age < ttl {
            CacheResult::Hit {
                entry: entry.clone(),
                remaining: ttl - age,
            }
        } else {
            CacheResult::Stale
        }
    }

    /// Store a freshly fetched value. Ignored under `NoStore`.
    pub fn put(&mut self, value: T, fetched_at: Instant) {
        if matches!(self.policy, CachePolicy::Revalidate(_)) {
            self.entry = Some(CacheEntry { value, fetched_at });
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        match self.policy {
            CachePolicy::NoStore => None,
            CachePolicy::Revalidate(ttl) => Some(ttl),
        }
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
