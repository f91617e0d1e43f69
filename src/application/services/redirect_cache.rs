//! Time-boxed in-process cache of short-code redirects.
//!
//! # States
//!
//! ```text
//! Empty -> Populating -> Fresh -> Stale -> Populating -> Fresh -> ...
//! ```
//!
//! - **Empty / Stale**: the next [`RedirectCache::lookup`] refreshes before answering
//! - **Populating**: a refresh is in flight; concurrent callers wait for it
//!   instead of starting their own
//! - **Fresh**: answered from memory until the TTL elapses
//!
//! A failed refresh keeps the previous entries and does not move the
//! freshness timestamp, so the next lookup retries immediately.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

use crate::application::services::route_table::ShortLinkPattern;
use crate::domain::clock::Clock;
use crate::domain::entities::{RedirectEntry, RedirectRecord};
use crate::domain::repositories::{ContentError, RedirectSource};
use crate::infrastructure::clock::SystemClock;

/// Default time-to-live of a populated cache.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
/// Default upper bound on a single fetch from the content source.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Observable cache state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheState {
    Empty,
    Populating,
    Fresh,
    Stale,
}

/// Snapshot of the cache for health and status reporting.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub state: CacheState,
    pub entries: usize,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub source: String,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, RedirectEntry>,
    refreshed_at: Option<DateTime<Utc>>,
    attempts: u64,
    last_error: Option<String>,
}

/// Short-code to destination cache, refreshed lazily from a [`RedirectSource`].
pub struct RedirectCache {
    source: Arc<dyn RedirectSource>,
    pattern: ShortLinkPattern,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    fetch_timeout: Duration,
    inner: RwLock<CacheInner>,
    refresh_lock: Mutex<()>,
}

impl RedirectCache {
    /// Creates an empty cache with the default TTL, timeout and system clock.
    pub fn new(source: Arc<dyn RedirectSource>, pattern: ShortLinkPattern) -> Self {
        Self {
            source,
            pattern,
            clock: Arc::new(SystemClock),
            ttl: to_time_delta(DEFAULT_TTL),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            inner: RwLock::new(CacheInner::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = to_time_delta(ttl);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn pattern(&self) -> &ShortLinkPattern {
        &self.pattern
    }

    /// Looks up a short code, refreshing first if the cache is empty or stale.
    ///
    /// Never fails: when the source is unavailable the answer comes from
    /// whatever entries the cache already holds.
    pub async fn lookup(&self, code: &str) -> Option<RedirectEntry> {
        let (needs_refresh, seen_attempts) = {
            let inner = self.inner.read().await;
            (!self.is_fresh(&inner), inner.attempts)
        };

        if needs_refresh {
            self.refresh_once(seen_attempts).await;
        }

        let entry = self.inner.read().await.entries.get(code).cloned();
        debug!(code, hit = entry.is_some(), "Redirect cache lookup");
        entry
    }

    /// Forces a refresh regardless of freshness.
    ///
    /// Returns the number of short-code entries loaded.
    ///
    /// # Errors
    ///
    /// Returns the [`ContentError`] of a failed fetch. The cache keeps its
    /// previous entries in that case.
    pub async fn refresh(&self) -> Result<usize, ContentError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Returns the current state and counters.
    pub async fn status(&self) -> CacheStatus {
        let populating = self.refresh_lock.try_lock().is_err();
        let inner = self.inner.read().await;

        let state = if populating {
            CacheState::Populating
        } else if inner.refreshed_at.is_none() {
            CacheState::Empty
        } else if self.is_fresh(&inner) {
            CacheState::Fresh
        } else {
            CacheState::Stale
        };

        CacheStatus {
            state,
            entries: inner.entries.len(),
            refreshed_at: inner.refreshed_at,
            last_error: inner.last_error.clone(),
            source: self.source.describe(),
        }
    }

    /// Refreshes unless another caller already attempted one since
    /// `seen_attempts` was read.
    async fn refresh_once(&self, seen_attempts: u64) {
        let _guard = self.refresh_lock.lock().await;

        {
            let inner = self.inner.read().await;
            if inner.attempts != seen_attempts || self.is_fresh(&inner) {
                return;
            }
        }

        // Failure is already logged and recorded in `last_error`.
        let _ = self.refresh_locked().await;
    }

    async fn refresh_locked(&self) -> Result<usize, ContentError> {
        let fetched = match tokio::time::timeout(self.fetch_timeout, self.source.fetch_redirects())
            .await
        {
            Ok(result) => result,
            Err(_) => Err(ContentError::Timeout(self.fetch_timeout.as_secs())),
        };

        let mut inner = self.inner.write().await;
        inner.attempts += 1;

        match fetched {
            Ok(records) => {
                let entries = self.build_entries(&records);
                let count = entries.len();

                inner.entries = entries;
                inner.refreshed_at = Some(self.clock.now());
                inner.last_error = None;

                metrics::counter!("redirect_cache_refresh_total", "outcome" => "success")
                    .increment(1);
                info!(
                    records = records.len(),
                    short_codes = count,
                    "Redirect cache refreshed"
                );
                Ok(count)
            }
            Err(e) => {
                inner.last_error = Some(e.to_string());

                metrics::counter!("redirect_cache_refresh_total", "outcome" => "failure")
                    .increment(1);
                error!(
                    error = %e,
                    retained = inner.entries.len(),
                    "Redirect cache refresh failed, keeping previous entries"
                );
                Err(e)
            }
        }
    }

    /// Keeps short-code records only. Later records override earlier ones
    /// with the same code.
    fn build_entries(&self, records: &[RedirectRecord]) -> HashMap<String, RedirectEntry> {
        self.pattern
            .entries(records)
            .into_iter()
            .map(|entry| (entry.code.clone(), entry))
            .collect()
    }

    fn is_fresh(&self, inner: &CacheInner) -> bool {
        inner
            .refreshed_at
            .is_some_and(|at| self.clock.now() - at < self.ttl)
    }
}

fn to_time_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}
