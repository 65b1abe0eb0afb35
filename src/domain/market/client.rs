//! Market sub-client — the coins + snapshot feed.

use super::wire::MarketFeedItem;
use super::MarketFeed;
use crate::client::CoinsimClient;
use crate::error::SdkError;
use crate::query::{keys, QueryHandle, QuerySnapshot};

/// Sub-client for the market feed.
pub struct Market<'a> {
    pub(crate) client: &'a CoinsimClient,
}

impl Market<'_> {
    /// Fetch the feed directly, bypassing the cache.
    pub async fn get(&self) -> Result<MarketFeed, SdkError> {
        let items = self.client.http.get_market_feed().await?;
        Ok(MarketFeed::from_items(items))
    }

    /// Cache-backed view of the feed, refreshed in the background on the
    /// client's refresh interval.
    pub fn watch(&self) -> MarketFeedWatch {
        let handle = self.client.queries.subscribe(
            keys::market_feed(),
            self.client.refresh_options(true),
            self.client.raw_fetcher("/api/coins".to_string()),
        );
        MarketFeedWatch { handle }
    }
}

/// Live view of the market feed entry.
pub struct MarketFeedWatch {
    handle: QueryHandle,
}

impl MarketFeedWatch {
    pub fn snapshot(&self) -> QuerySnapshot<MarketFeed> {
        self.handle
            .snapshot_map(|items: Vec<MarketFeedItem>| MarketFeed::from_items(items))
    }

    pub fn handle(&self) -> &QueryHandle {
        &self.handle
    }
}
