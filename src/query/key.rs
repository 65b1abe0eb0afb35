//! Query keys — composite identifiers addressing one cached entry.

use crate::shared::{CoinId, UserId};

/// Composite key for one cache entry: an ordered list of string segments,
/// e.g. `userFunds:user-123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether this key sits inside `prefix`'s scope (segment-wise prefix
    /// match). Used to drop all entries for one user on sign-out.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(":"))
    }
}

/// Well-known key constructors, one per query the platform client issues.
pub mod keys {
    use super::*;

    /// `GET /api/coins` — the market feed (coins + snapshot).
    pub fn market_feed() -> QueryKey {
        QueryKey::new(["coins"])
    }

    /// `GET /api/coins/:id` — one coin's detail page data.
    pub fn coin(id: CoinId) -> QueryKey {
        QueryKey::new(["coin".to_string(), id.to_string()])
    }

    /// `GET /api/users/getFunds/:userId` — session-gated funds balance.
    pub fn user_funds(user_id: &UserId) -> QueryKey {
        QueryKey::new(["userFunds".to_string(), user_id.to_string()])
    }

    /// Scope prefix covering every user's funds entry.
    pub fn user_funds_scope() -> QueryKey {
        QueryKey::new(["userFunds"])
    }

    /// `GET /api/portfolios/:userId` — session-gated holdings.
    pub fn portfolio(user_id: &UserId) -> QueryKey {
        QueryKey::new(["portfolio".to_string(), user_id.to_string()])
    }

    /// Scope prefix covering every user's portfolio entry.
    pub fn portfolio_scope() -> QueryKey {
        QueryKey::new(["portfolio"])
    }
}
