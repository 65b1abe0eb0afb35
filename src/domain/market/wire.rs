//! Wire types for the market feed (REST).

use crate::domain::coin::wire::CoinResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One element of the `GET /api/coins` array.
///
/// The backend mixes coin records and a single market snapshot record in
/// one array, distinguished by shape: a coin carries `symbol`, the snapshot
/// carries `marketTotal`. The discrimination is declared here as an
/// untagged union instead of probed field-by-field at use sites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MarketFeedItem {
    Coin(CoinResponse),
    Snapshot(MarketSnapshotResponse),
}

/// The market-wide snapshot record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketSnapshotResponse {
    #[serde(rename = "marketTotal")]
    pub market_total: String,
    #[serde(rename = "percentage5mins", default, skip_serializing_if = "Option::is_none")]
    pub percentage_5mins: Option<String>,
    #[serde(rename = "currentEvent", default, skip_serializing_if = "Option::is_none")]
    pub current_event: Option<MarketEventResponse>,
}

/// A market-wide event as the backend sends it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketEventResponse {
    #[serde(rename = "type")]
    pub event_type: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}
