//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Trade error: {0}")]
    Trade(#[from] TradeError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
///
/// The HTTP client is single-attempt; retry scheduling lives in the query
/// layer, which uses [`HttpError::is_retryable`] to decide whether a failed
/// fetch is worth another attempt.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Timeout")]
    Timeout,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },
}

impl HttpError {
    /// Whether the query layer may retry the request that produced this error.
    ///
    /// Transport failures, timeouts, 429 and 5xx are transient; 4xx rejections
    /// are terminal.
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            HttpError::Timeout => true,
            HttpError::RateLimited { .. } => true,
            HttpError::ServerError { .. } => true,
            HttpError::Unauthorized | HttpError::NotFound(_) | HttpError::BadRequest(_) => false,
        }
    }

}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HttpError::Timeout
        } else {
            HttpError::Transport(e)
        }
    }
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Credentials rejected: {0}")]
    Credentials(String),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
}

/// Trade submission errors.
#[derive(Error, Debug)]
pub enum TradeError {
    /// No session — trades require a signed-in user.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Client-side precondition: amount must be strictly positive.
    #[error("Trade amount must be greater than zero")]
    NonPositiveAmount,

    /// Client-side precondition: buy cost exceeds the cached funds balance.
    /// Advisory only — the backend remains the source of truth.
    #[error("Insufficient funds: cost {cost} exceeds balance {funds}")]
    InsufficientFunds {
        cost: rust_decimal::Decimal,
        funds: rust_decimal::Decimal,
    },

    /// The backend rejected the trade; carries its message verbatim.
    #[error("Trade rejected: {0}")]
    Rejected(String),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_retryable() {
        assert!(HttpError::ServerError {
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(HttpError::RateLimited {
            retry_after_ms: None
        }
        .is_retryable());
        assert!(HttpError::Timeout.is_retryable());
    }

    #[test]
    fn test_client_errors_are_terminal() {
        assert!(!HttpError::Unauthorized.is_retryable());
        assert!(!HttpError::NotFound("coin 99".into()).is_retryable());
        assert!(!HttpError::BadRequest("Insufficient funds".into()).is_retryable());
    }

}
