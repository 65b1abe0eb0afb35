//! Low-level HTTP client — `CoinsimHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain
//! types happens at the sub-client boundary). Every request is a single
//! attempt: retry scheduling is owned by the query layer, which wraps these
//! calls in fetchers and consults [`HttpError::is_retryable`].

use crate::auth::{LoginRequest, RegisterRequest, SessionResponse};
use crate::domain::coin::wire::CoinDetailResponse;
use crate::domain::funds::wire::UserFundsResponse;
use crate::domain::market::wire::MarketFeedItem;
use crate::domain::portfolio::wire::PortfolioFeedItem;
use crate::domain::trade::wire::{TransactionRequest, TransactionResponse};
use crate::error::HttpError;
use crate::shared::{CoinId, UserId};

use async_lock::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Low-level HTTP client for the CoinSim REST API.
pub struct CoinsimHttp {
    base_url: String,
    client: Client,
    /// Bearer token injected after sign-in. NEVER exposed publicly.
    auth_token: Arc<RwLock<Option<String>>>,
}

impl CoinsimHttp {
    pub fn new(base_url: &str) -> Self {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            auth_token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the auth token injected on subsequent requests.
    pub(crate) async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    /// Clear the auth token.
    pub(crate) async fn clear_auth_token(&self) {
        *self.auth_token.write().await = None;
    }

    // ── Market & coins ───────────────────────────────────────────────────

    /// `GET /api/coins` — coins plus one market snapshot record, mixed in
    /// one array. Discrimination happens declaratively in the wire enum.
    pub async fn get_market_feed(&self) -> Result<Vec<MarketFeedItem>, HttpError> {
        let url = format!("{}/api/coins", self.base_url);
        self.get(&url).await
    }

    /// `GET /api/coins/:id` — full coin detail including price history and
    /// the active coin event, if any.
    pub async fn get_coin(&self, id: CoinId) -> Result<CoinDetailResponse, HttpError> {
        let url = format!("{}/api/coins/{}", self.base_url, id);
        self.get(&url).await
    }

    // ── User data ────────────────────────────────────────────────────────

    pub async fn get_user_funds(&self, user_id: &UserId) -> Result<UserFundsResponse, HttpError> {
        let url = format!("{}/api/users/getFunds/{}", self.base_url, user_id);
        self.get(&url).await
    }

    pub async fn get_portfolio(&self, user_id: &UserId) -> Result<Vec<PortfolioFeedItem>, HttpError> {
        let url = format!("{}/api/portfolios/{}", self.base_url, user_id);
        self.get(&url).await
    }

    // ── Transactions ─────────────────────────────────────────────────────

    pub async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionResponse, HttpError> {
        let url = format!("{}/api/transactions", self.base_url);
        self.post(&url, request).await
    }

    // ── Auth ─────────────────────────────────────────────────────────────

    pub async fn login(&self, body: &LoginRequest) -> Result<SessionResponse, HttpError> {
        let url = format!("{}/api/auth/login", self.base_url);
        self.post(&url, body).await
    }

    pub async fn register(&self, body: &RegisterRequest) -> Result<SessionResponse, HttpError> {
        let url = format!("{}/api/auth/register", self.base_url);
        self.post(&url, body).await
    }

    pub async fn logout(&self) -> Result<(), HttpError> {
        let url = format!("{}/api/auth/logout", self.base_url);
        let _: serde_json::Value = self.post(&url, &serde_json::json!({})).await?;
        Ok(())
    }

    // ── Raw access for query-cache fetchers ──────────────────────────────

    /// GET a path relative to the base URL, returning the raw JSON body.
    ///
    /// Query-cache entries store `serde_json::Value`; typed views
    /// deserialize at read time.
    pub(crate) async fn get_raw(&self, path: &str) -> Result<serde_json::Value, HttpError> {
        let url = format!("{}{}", self.base_url, path);
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        self.do_request(reqwest::Method::GET, url, None::<&()>).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        self.do_request(reqwest::Method::POST, url, Some(body)).await
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method, url);

        if let Some(token) = self.auth_token.read().await.as_ref() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();
        tracing::debug!(status = status_code, url, "request rejected");

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(extract_message(&body_text))),
            429 => Err(HttpError::RateLimited {
                retry_after_ms: None,
            }),
            400..=499 => Err(HttpError::BadRequest(extract_message(&body_text))),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

/// Pull the backend's `message` field out of an error body, falling back to
/// the raw text. The backend rejects trades with `{"message": "..."}` and
/// callers surface that text verbatim.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

impl Clone for CoinsimHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            auth_token: self.auth_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_from_json_body() {
        assert_eq!(
            extract_message(r#"{"message": "Insufficient funds"}"#),
            "Insufficient funds"
        );
    }

    #[test]
    fn test_extract_message_falls_back_to_raw_body() {
        assert_eq!(extract_message("plain text error"), "plain text error");
        assert_eq!(extract_message(r#"{"error": "no message field"}"#), r#"{"error": "no message field"}"#);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let http = CoinsimHttp::new("http://localhost:9090/");
        assert_eq!(http.base_url(), "http://localhost:9090");
    }
}
