//! Wire types for coin responses (REST).
//!
//! Monetary and quantity fields arrive as decimal strings and are parsed at
//! the conversion boundary, leniently.

use super::EventImpact;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A coin record inside the `GET /api/coins` feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinResponse {
    pub coin_id: i64,
    pub name: String,
    pub symbol: String,
    pub current_price: String,
    pub supply: String,
    pub market_cap: String,
    pub date_added: DateTime<Utc>,
    pub description: String,
    #[serde(rename = "percentage5mins", default, skip_serializing_if = "Option::is_none")]
    pub percentage_5mins: Option<String>,
    #[serde(rename = "percentage10mins", default, skip_serializing_if = "Option::is_none")]
    pub percentage_10mins: Option<String>,
    #[serde(rename = "percentage30mins", default, skip_serializing_if = "Option::is_none")]
    pub percentage_30mins: Option<String>,
}

/// `GET /api/coins/:id` — full detail for one coin.
///
/// Unlike the feed record this carries price history and aggregate price
/// statistics, and no `date_added`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinDetailResponse {
    pub coin_id: i64,
    pub name: String,
    pub symbol: String,
    pub current_price: String,
    pub supply: String,
    pub market_cap: String,
    pub description: String,
    #[serde(rename = "priceHistory", default)]
    pub price_history: Vec<PriceHistoryEntryResponse>,
    #[serde(rename = "allTimeHigh")]
    pub all_time_high: String,
    #[serde(rename = "allTimeLow")]
    pub all_time_low: String,
    #[serde(rename = "meanAverage")]
    pub mean_average: String,
    #[serde(rename = "medianAverage")]
    pub median_average: String,
    #[serde(rename = "last5minsValue")]
    pub last_5mins_value: String,
    #[serde(rename = "percentage5mins")]
    pub percentage_5mins: String,
    #[serde(rename = "last10minsValue")]
    pub last_10mins_value: String,
    #[serde(rename = "percentage10mins")]
    pub percentage_10mins: String,
    #[serde(rename = "last30minsValue")]
    pub last_30mins_value: String,
    #[serde(rename = "percentage30mins")]
    pub percentage_30mins: String,
    #[serde(rename = "eventType", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(rename = "eventDuration", default, skip_serializing_if = "Option::is_none")]
    pub event_duration: Option<String>,
    #[serde(rename = "coinEventPositive", default, skip_serializing_if = "Option::is_none")]
    pub coin_event_positive: Option<bool>,
    #[serde(rename = "eventImpact", default, skip_serializing_if = "Option::is_none")]
    pub event_impact: Option<EventImpact>,
}

/// One entry of the detail endpoint's price history array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceHistoryEntryResponse {
    pub history_id: i64,
    pub price: String,
    pub timestamp: DateTime<Utc>,
}
