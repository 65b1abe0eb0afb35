//! High-level client — `CoinsimClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`. This
//! module keeps the builder, the shared query cache and session store, and
//! the accessor methods. Both stores are explicit context objects owned by
//! the client — nothing here is a global.

use crate::auth::client::Auth;
use crate::auth::SessionStore;
use crate::domain::coin::client::Coins;
use crate::domain::funds::client::Funds;
use crate::domain::market::client::Market;
use crate::domain::portfolio::client::Portfolios;
use crate::domain::trade::client::Trades;
use crate::error::SdkError;
use crate::http::CoinsimHttp;
use crate::query::{QueryCache, QueryFetcher, QueryOptions, RetryConfig};

use std::sync::Arc;
use std::time::Duration;

/// The primary entry point for the CoinSim SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.market()`, `client.trades()`, etc. Must live inside a tokio
/// runtime — cache-backed watches spawn background refresh tasks.
pub struct CoinsimClient {
    pub(crate) http: CoinsimHttp,
    pub(crate) queries: QueryCache,
    pub(crate) sessions: SessionStore,
    pub(crate) refresh_interval: Duration,
    pub(crate) retry: u32,
}

impl CoinsimClient {
    pub fn builder() -> CoinsimClientBuilder {
        CoinsimClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn market(&self) -> Market<'_> {
        Market { client: self }
    }

    pub fn coins(&self) -> Coins<'_> {
        Coins { client: self }
    }

    pub fn funds(&self) -> Funds<'_> {
        Funds { client: self }
    }

    pub fn portfolio(&self) -> Portfolios<'_> {
        Portfolios { client: self }
    }

    pub fn trades(&self) -> Trades<'_> {
        Trades { client: self }
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    // ── Shared state ─────────────────────────────────────────────────────

    pub fn queries(&self) -> &QueryCache {
        &self.queries
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    // ── Internal helpers for sub-clients ─────────────────────────────────

    /// Standard options for a cache-backed watch: background refresh on the
    /// client's interval, the client's retry count.
    pub(crate) fn refresh_options(&self, enabled: bool) -> QueryOptions {
        QueryOptions {
            enabled,
            refetch_interval: Some(self.refresh_interval),
            retry: self.retry,
        }
    }

    /// Fetcher hitting `path` on this client's base URL, returning the raw
    /// JSON body for the cache.
    pub(crate) fn raw_fetcher(&self, path: String) -> QueryFetcher {
        let http = self.http.clone();
        Arc::new(move || {
            let http = http.clone();
            let path = path.clone();
            Box::pin(async move { http.get_raw(&path).await })
        })
    }
}

impl Clone for CoinsimClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            queries: self.queries.clone(),
            sessions: self.sessions.clone(),
            refresh_interval: self.refresh_interval,
            retry: self.retry,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CoinsimClientBuilder {
    base_url: String,
    refresh_interval: Duration,
    retry: u32,
    backoff: RetryConfig,
}

impl Default for CoinsimClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            refresh_interval: Duration::from_secs(30),
            retry: 1,
            backoff: RetryConfig::default(),
        }
    }
}

impl CoinsimClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Background refetch cadence for cache-backed watches.
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Automatic retries per fetch before the error surfaces.
    pub fn retry(mut self, retries: u32) -> Self {
        self.retry = retries;
        self
    }

    /// Backoff schedule between those retries.
    pub fn retry_backoff(mut self, backoff: RetryConfig) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn build(self) -> Result<CoinsimClient, SdkError> {
        Ok(CoinsimClient {
            http: CoinsimHttp::new(&self.base_url),
            queries: QueryCache::with_backoff(self.backoff),
            sessions: SessionStore::new(),
            refresh_interval: self.refresh_interval,
            retry: self.retry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use crate::query::keys;
    use crate::shared::UserId;
    use serde_json::json;
    use tokio::time::{sleep, Duration as TokioDuration};

    fn offline_client() -> CoinsimClient {
        CoinsimClient::builder()
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap()
    }

    fn session() -> Session {
        Session {
            user_id: UserId::new("u1"),
            email: "a@b.com".into(),
            username: "alice".into(),
        }
    }

    #[test]
    fn test_builder_defaults() {
        let builder = CoinsimClientBuilder::default();
        assert_eq!(builder.base_url, crate::network::DEFAULT_API_URL);
        assert_eq!(builder.refresh_interval, Duration::from_secs(30));
        assert_eq!(builder.retry, 1);
    }

    #[tokio::test]
    async fn test_sign_out_disables_and_clears_session_gated_queries() {
        let client = offline_client();
        client.sessions.finish(Some(session()));

        // seed the funds entry with a fake fetcher, then attach a watch —
        // the entry is fresh, so the watch serves it without fetching
        let user_id = UserId::new("u1");
        let body = json!({"user_id": "u1", "funds": "500"});
        let _seed = client.queries.subscribe(
            keys::user_funds(&user_id),
            crate::query::QueryOptions::default(),
            std::sync::Arc::new(move || {
                let body = body.clone();
                Box::pin(async move { Ok(body) })
            }),
        );
        sleep(TokioDuration::from_millis(20)).await;

        let watch = client.funds().watch();
        assert!(watch.is_enabled());
        assert!(watch.snapshot().data.is_some());

        client.auth().sign_out().await;

        assert!(client.sessions.session().is_none());
        assert!(
            watch.snapshot().data.is_none(),
            "session-gated data discarded on sign-out"
        );
        assert!(
            !client.funds().watch().is_enabled(),
            "gated watches stay disabled until a new session exists"
        );
        assert!(!client.portfolio().watch().is_enabled());
    }

    #[tokio::test]
    async fn test_session_listeners_fire_through_sign_out() {
        let client = offline_client();
        client.sessions.finish(Some(session()));

        let observed = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = observed.clone();
        client
            .sessions
            .on_change(move |state| sink.lock().push((state.loading, state.session.is_some())));

        client.auth().sign_out().await;

        let observed = observed.lock();
        // loading transition, then the cleared session
        assert_eq!(observed.first(), Some(&(true, true)));
        assert_eq!(observed.last(), Some(&(false, false)));
    }
}
