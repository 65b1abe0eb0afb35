//! # CoinSim SDK
//!
//! A Rust client for the CoinSim simulated cryptocurrency trading platform.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — shared newtypes and domain models (vertical slices)
//! 2. **HTTP** — `CoinsimHttp`, one single-attempt method per endpoint
//! 3. **Query layer** — `QueryCache`: keyed entries, shared in-flight
//!    fetches, invalidation, interval-driven background refresh, retries
//! 4. **Auth** — `SessionStore` with observer subscription, auth sub-client
//! 5. **High-Level Client** — `CoinsimClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinsim_sdk::prelude::*;
//!
//! let client = CoinsimClient::builder()
//!     .base_url("http://jdwd40.com")
//!     .build()?;
//!
//! let feed = client.market().get().await?;
//! let session = client.auth().sign_in("a@b.com", "hunter22").await?;
//!
//! let funds = client.funds().watch();       // cache-backed, auto-refreshed
//! let snapshot = funds.snapshot();
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP ────────────────────────────────────────────────────────────

/// Low-level HTTP client.
pub mod http;

// ── Layer 3: Query layer ─────────────────────────────────────────────────────

/// Keyed query cache with background refresh.
pub mod query;

// ── Layer 4: Auth ────────────────────────────────────────────────────────────

/// Authentication: session types, session store, auth sub-client.
pub mod auth;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `CoinsimClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{CoinId, TradeSide, UserId};

    // Domain types — coins & market
    pub use crate::domain::coin::{Coin, CoinDetail, CoinEvent, EventImpact, PricePoint};
    pub use crate::domain::market::{MarketEvent, MarketFeed, MarketSnapshot};

    // Domain types — user data
    pub use crate::domain::funds::UserFunds;
    pub use crate::domain::portfolio::{
        aggregate, PortfolioHolding, PortfolioSummary, SortDirection, SortField,
    };
    pub use crate::domain::trade::{TradeOrder, TransactionRecord};

    // Errors
    pub use crate::error::{AuthError, HttpError, SdkError, TradeError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // Auth
    pub use crate::auth::{Session, SessionState, SessionStore};

    // Query layer
    pub use crate::query::{
        keys, QueryCache, QueryHandle, QueryKey, QueryOptions, QuerySnapshot, QueryStatus,
        RetryConfig,
    };

    // High-level client + sub-clients
    pub use crate::auth::client::Auth as AuthClient;
    pub use crate::client::{CoinsimClient, CoinsimClientBuilder};
    pub use crate::domain::coin::client::{CoinDetailWatch, Coins as CoinsClient};
    pub use crate::domain::funds::client::{Funds as FundsClient, FundsWatch};
    pub use crate::domain::market::client::{Market as MarketClient, MarketFeedWatch};
    pub use crate::domain::portfolio::client::{PortfolioWatch, Portfolios as PortfoliosClient};
    pub use crate::domain::trade::client::Trades as TradesClient;
}
