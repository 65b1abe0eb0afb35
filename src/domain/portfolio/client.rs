//! Portfolio sub-client — session-gated holdings queries.

use super::wire::PortfolioFeedItem;
use super::{aggregate, holdings_from_items, PortfolioHolding, PortfolioSummary};
use super::{SortDirection, SortField};
use crate::client::CoinsimClient;
use crate::error::SdkError;
use crate::query::{keys, QueryHandle, QuerySnapshot};
use crate::shared::UserId;

/// Sub-client for portfolio queries.
pub struct Portfolios<'a> {
    pub(crate) client: &'a CoinsimClient,
}

impl Portfolios<'_> {
    /// Fetch a user's holdings directly, bypassing the cache.
    pub async fn get(&self, user_id: &UserId) -> Result<Vec<PortfolioHolding>, SdkError> {
        let items = self.client.http.get_portfolio(user_id).await?;
        Ok(holdings_from_items(items))
    }

    /// Cache-backed view of the signed-in user's holdings.
    ///
    /// Session-gated like funds: with no session the subscription is
    /// disabled and serves no data.
    pub fn watch(&self) -> PortfolioWatch {
        let session = self.client.sessions.session();
        let (key, enabled, fetcher) = match &session {
            Some(s) => (
                keys::portfolio(&s.user_id),
                true,
                self.client
                    .raw_fetcher(format!("/api/portfolios/{}", s.user_id)),
            ),
            None => (
                keys::portfolio_scope(),
                false,
                self.client.raw_fetcher("/api/portfolios".to_string()),
            ),
        };
        let handle = self
            .client
            .queries
            .subscribe(key, self.client.refresh_options(enabled), fetcher);
        PortfolioWatch { handle }
    }
}

/// Live view of the signed-in user's holdings entry.
pub struct PortfolioWatch {
    handle: QueryHandle,
}

impl PortfolioWatch {
    pub fn snapshot(&self) -> QuerySnapshot<Vec<PortfolioHolding>> {
        self.handle
            .snapshot_map(|items: Vec<PortfolioFeedItem>| holdings_from_items(items))
    }

    /// Snapshot with the holdings sorted and totalled.
    pub fn summary(&self, field: SortField, direction: SortDirection) -> QuerySnapshot<PortfolioSummary> {
        self.handle.snapshot_map(|items: Vec<PortfolioFeedItem>| {
            let holdings = holdings_from_items(items);
            aggregate(&holdings, field, direction)
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.handle.is_enabled()
    }

    pub fn handle(&self) -> &QueryHandle {
        &self.handle
    }
}
