//! Coins sub-client — coin detail fetch and cache-backed watch.

use super::wire::CoinDetailResponse;
use super::CoinDetail;
use crate::client::CoinsimClient;
use crate::error::SdkError;
use crate::query::{keys, QueryHandle, QuerySnapshot};
use crate::shared::CoinId;

/// Sub-client for coin detail operations.
pub struct Coins<'a> {
    pub(crate) client: &'a CoinsimClient,
}

impl Coins<'_> {
    /// Fetch one coin's detail directly, bypassing the cache.
    pub async fn get(&self, id: CoinId) -> Result<CoinDetail, SdkError> {
        let resp = self.client.http.get_coin(id).await?;
        Ok(resp.into())
    }

    /// Cache-backed view of one coin's detail page data, refreshed in the
    /// background on the client's refresh interval.
    pub fn watch(&self, id: CoinId) -> CoinDetailWatch {
        let handle = self.client.queries.subscribe(
            keys::coin(id),
            self.client.refresh_options(true),
            self.client.raw_fetcher(format!("/api/coins/{}", id)),
        );
        CoinDetailWatch { handle }
    }
}

/// Live view of one coin's detail entry.
pub struct CoinDetailWatch {
    handle: QueryHandle,
}

impl CoinDetailWatch {
    pub fn snapshot(&self) -> QuerySnapshot<CoinDetail> {
        self.handle
            .snapshot_map(|wire: CoinDetailResponse| CoinDetail::from(wire))
    }

    pub fn handle(&self) -> &QueryHandle {
        &self.handle
    }
}
