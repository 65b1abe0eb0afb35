//! Query cache — keyed fetch-replace store with background refresh.
//!
//! Each [`QueryKey`] owns one entry holding the latest fetched JSON value,
//! the latest terminal error, and subscription bookkeeping. Semantics:
//!
//! - the first enabled subscriber triggers an immediate fetch; concurrent
//!   subscribers to the same key share the in-flight request
//! - a successful fetch atomically replaces the entry's data and clears the
//!   error; a fetch that fails after its retries sets the error but keeps
//!   the previous data for stale display
//! - [`QueryCache::invalidate`] marks an entry stale and refetches right
//!   away iff someone is subscribed; otherwise the refetch happens lazily
//!   on the next subscription
//! - per-key monotonic fetch tokens make the latest-issued fetch win even
//!   when responses arrive out of order
//! - an entry with `refetch_interval` set is refetched on that cadence by a
//!   background task that is aborted when the last handle drops
//!
//! Refetches are driven only by the interval and explicit invalidation —
//! there is no focus- or visibility-triggered refetch.
//!
//! The cache must live inside a tokio runtime: fetches and refresh
//! schedules run as spawned tasks.

pub mod key;
pub mod retry;

pub use key::{keys, QueryKey};
pub use retry::RetryConfig;

use crate::error::HttpError;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Boxed future produced by a query fetcher.
pub type QueryFuture = Pin<Box<dyn Future<Output = Result<Value, HttpError>> + Send>>;

/// Fetch function registered per key. Invoked on initial subscription,
/// invalidation, interval refresh, and retry.
pub type QueryFetcher = Arc<dyn Fn() -> QueryFuture + Send + Sync>;

/// Lifecycle of one cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// No fetch has been issued (entry exists but is disabled or untouched).
    Idle,
    /// Initial fetch in flight, no data yet.
    Loading,
    /// Latest fetch succeeded.
    Success,
    /// Latest fetch failed after exhausting retries.
    Error,
}

/// Per-subscription options.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// When false, suppress fetching entirely (e.g. until a user id is
    /// known). The subscription still counts as a consumer.
    pub enabled: bool,
    /// Background refetch cadence while at least one consumer is subscribed.
    pub refetch_interval: Option<Duration>,
    /// Automatic retries on a retryable failure before the error surfaces.
    pub retry: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            refetch_interval: None,
            retry: 0,
        }
    }
}

/// Read-side view of one entry, typed for the caller.
#[derive(Debug)]
pub struct QuerySnapshot<T> {
    pub data: Option<T>,
    pub error: Option<Arc<HttpError>>,
    /// True only during the initial load (no data yet); background
    /// refetches keep serving the previous data.
    pub is_loading: bool,
}

struct Entry {
    status: QueryStatus,
    data: Option<Arc<Value>>,
    error: Option<Arc<HttpError>>,
    fetched_at: Option<Instant>,
    stale: bool,
    latest_token: u64,
    in_flight: bool,
    subscribers: usize,
    fetcher: Option<QueryFetcher>,
    retry: u32,
    refresh: Option<tokio::task::JoinHandle<()>>,
}

impl Entry {
    fn new() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            fetched_at: None,
            stale: false,
            latest_token: 0,
            in_flight: false,
            subscribers: 0,
            fetcher: None,
            retry: 0,
            refresh: None,
        }
    }
}

struct CacheShared {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    backoff: RetryConfig,
}

/// Keyed query cache. Cheap to clone; clones share the same store.
pub struct QueryCache {
    inner: Arc<CacheShared>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_backoff(RetryConfig::default())
    }

    /// Cache with a custom retry backoff schedule.
    pub fn with_backoff(backoff: RetryConfig) -> Self {
        Self {
            inner: Arc::new(CacheShared {
                entries: Mutex::new(HashMap::new()),
                backoff,
            }),
        }
    }

    /// Register a consumer for `key`.
    ///
    /// The returned handle reads snapshots and keeps the subscription alive;
    /// dropping it unsubscribes. The fetcher replaces any previously
    /// registered fetcher for the key.
    pub fn subscribe(
        &self,
        key: QueryKey,
        options: QueryOptions,
        fetcher: QueryFetcher,
    ) -> QueryHandle {
        let mut start_fetch = false;
        let mut start_interval = None;
        {
            let mut map = self.inner.entries.lock();
            let entry = map.entry(key.clone()).or_insert_with(Entry::new);
            entry.subscribers += 1;
            entry.fetcher = Some(fetcher);
            entry.retry = options.retry;
            if options.enabled {
                start_fetch = !entry.in_flight && (entry.data.is_none() || entry.stale);
                if entry.refresh.is_none() {
                    start_interval = options.refetch_interval;
                }
            }
        }
        if start_fetch {
            CacheShared::spawn_fetch(&self.inner, &key, false);
        }
        if let Some(period) = start_interval {
            CacheShared::spawn_refresh(&self.inner, &key, period);
        }
        QueryHandle {
            cache: Arc::clone(&self.inner),
            key,
            enabled: options.enabled,
        }
    }

    /// Mark `key` stale. Refetches immediately iff a consumer is subscribed
    /// (superseding any in-flight fetch); otherwise the next subscription
    /// picks it up.
    pub fn invalidate(&self, key: &QueryKey) {
        let active = {
            let mut map = self.inner.entries.lock();
            match map.get_mut(key) {
                Some(entry) => {
                    entry.stale = true;
                    entry.subscribers > 0
                }
                None => false,
            }
        };
        if active {
            CacheShared::spawn_fetch(&self.inner, key, true);
        }
    }

    /// Drop every entry whose key starts with `prefix`, cancelling its
    /// refresh task. Used on sign-out so no stale user data survives an
    /// identity change.
    pub fn remove_prefix(&self, prefix: &QueryKey) {
        let mut map = self.inner.entries.lock();
        map.retain(|key, entry| {
            if key.starts_with(prefix) {
                if let Some(task) = entry.refresh.take() {
                    task.abort();
                }
                tracing::debug!(key = %key, "discarding cache entry");
                false
            } else {
                true
            }
        });
    }

    /// Most recent cached data for a key, typed, without subscribing.
    pub fn peek<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let map = self.inner.entries.lock();
        let value = map.get(key)?.data.clone()?;
        T::deserialize(&*value).ok()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for QueryCache {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl CacheShared {
    /// Issue a fetch for `key`. Without `force`, an in-flight fetch is
    /// shared (no duplicate request); with `force`, a new fetch supersedes
    /// it via a fresh token.
    fn spawn_fetch(this: &Arc<Self>, key: &QueryKey, force: bool) {
        let (token, fetcher, retry) = {
            let mut map = this.entries.lock();
            let Some(entry) = map.get_mut(key) else {
                return;
            };
            if entry.in_flight && !force {
                return;
            }
            let Some(fetcher) = entry.fetcher.clone() else {
                return;
            };
            entry.latest_token += 1;
            entry.in_flight = true;
            if entry.data.is_none() {
                entry.status = QueryStatus::Loading;
            }
            (entry.latest_token, fetcher, entry.retry)
        };

        let shared = Arc::clone(this);
        let key = key.clone();
        tokio::spawn(async move {
            let result = shared.run_with_retry(&fetcher, retry).await;
            shared.commit(&key, token, result);
        });
    }

    async fn run_with_retry(
        &self,
        fetcher: &QueryFetcher,
        retries: u32,
    ) -> Result<Value, HttpError> {
        let mut attempt = 0;
        loop {
            match fetcher().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < retries && err.is_retryable() => {
                    let delay = self.backoff.delay_for_attempt(attempt);
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = retries,
                        delay_ms = delay.as_millis() as u64,
                        "retrying query fetch"
                    );
                    futures_timer::Delay::new(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Apply a finished fetch. Only the latest-issued token may commit;
    /// anything older is a superseded response and is discarded.
    fn commit(&self, key: &QueryKey, token: u64, result: Result<Value, HttpError>) {
        let mut map = self.entries.lock();
        let Some(entry) = map.get_mut(key) else {
            return;
        };
        if token != entry.latest_token {
            tracing::warn!(key = %key, "discarding superseded fetch result");
            return;
        }
        entry.in_flight = false;
        match result {
            Ok(value) => {
                entry.data = Some(Arc::new(value));
                entry.error = None;
                entry.status = QueryStatus::Success;
                entry.stale = false;
                entry.fetched_at = Some(Instant::now());
            }
            Err(err) => {
                // Prior data stays in place for stale display; the error
                // flag is observable alongside it.
                entry.error = Some(Arc::new(err));
                entry.status = QueryStatus::Error;
            }
        }
    }

    fn spawn_refresh(this: &Arc<Self>, key: &QueryKey, period: Duration) {
        let weak = Arc::downgrade(this);
        let task_key = key.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // interval fires immediately; the subscription's own fetch
            // covers the first load
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                CacheShared::spawn_fetch(&shared, &task_key, false);
            }
        });

        let mut map = this.entries.lock();
        match map.get_mut(key) {
            Some(entry) if entry.refresh.is_none() => entry.refresh = Some(task),
            // lost the race to another subscriber, or the entry is gone
            _ => task.abort(),
        }
    }

    fn unsubscribe(&self, key: &QueryKey) {
        let mut map = self.entries.lock();
        if let Some(entry) = map.get_mut(key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
            if entry.subscribers == 0 {
                if let Some(task) = entry.refresh.take() {
                    task.abort();
                }
            }
        }
    }
}

/// A live consumer registration for one key.
///
/// Dropping the handle unsubscribes; when the last handle for a key drops,
/// the key's background refresh task is cancelled. The cached entry itself
/// survives for the next subscriber.
pub struct QueryHandle {
    cache: Arc<CacheShared>,
    key: QueryKey,
    enabled: bool,
}

impl QueryHandle {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn status(&self) -> QueryStatus {
        let map = self.cache.entries.lock();
        map.get(&self.key)
            .map(|e| e.status)
            .unwrap_or(QueryStatus::Idle)
    }

    /// When the entry's data was last successfully fetched.
    pub fn fetched_at(&self) -> Option<Instant> {
        let map = self.cache.entries.lock();
        map.get(&self.key).and_then(|e| e.fetched_at)
    }

    /// Current entry state deserialized into `T`.
    pub fn snapshot<T: DeserializeOwned>(&self) -> QuerySnapshot<T> {
        self.snapshot_map(|wire: T| wire)
    }

    /// Current entry state with a wire→domain conversion applied.
    pub fn snapshot_map<W, T, F>(&self, convert: F) -> QuerySnapshot<T>
    where
        W: DeserializeOwned,
        F: FnOnce(W) -> T,
    {
        let map = self.cache.entries.lock();
        let Some(entry) = map.get(&self.key) else {
            return QuerySnapshot {
                data: None,
                error: None,
                is_loading: false,
            };
        };
        let data = entry.data.as_ref().and_then(|value| {
            match W::deserialize(&**value) {
                Ok(wire) => Some(convert(wire)),
                Err(err) => {
                    tracing::warn!(key = %self.key, %err, "cached value failed to deserialize");
                    None
                }
            }
        });
        QuerySnapshot {
            data,
            error: entry.error.clone(),
            is_loading: entry.status == QueryStatus::Loading,
        }
    }
}

impl Drop for QueryHandle {
    fn drop(&mut self) {
        self.cache.unsubscribe(&self.key);
    }
}
