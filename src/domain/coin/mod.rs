//! Coin domain — coin listings, detail pages, price history, coin events.

pub mod client;
mod convert;
pub mod wire;

use crate::shared::CoinId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A coin as listed in the market feed.
///
/// Immutable snapshot per fetch; superseded wholesale by the next
/// successful fetch of the same key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub coin_id: CoinId,
    pub name: String,
    pub symbol: String,
    pub current_price: Decimal,
    pub supply: Decimal,
    pub market_cap: Decimal,
    /// Absent on the detail endpoint.
    pub date_added: Option<DateTime<Utc>>,
    pub description: String,
    pub change_5m: Option<Decimal>,
    pub change_10m: Option<Decimal>,
    pub change_30m: Option<Decimal>,
}

/// Full coin detail: the coin plus price history, long-run statistics and
/// the active coin event, if one is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub coin: Coin,
    pub price_history: Vec<PricePoint>,
    pub all_time_high: Decimal,
    pub all_time_low: Decimal,
    pub mean_average: Decimal,
    pub median_average: Decimal,
    pub last_5m_value: Decimal,
    pub last_10m_value: Decimal,
    pub last_30m_value: Decimal,
    pub event: Option<CoinEvent>,
}

/// One point of a coin's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub history_id: i64,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// An active event affecting one coin's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinEvent {
    pub event_type: String,
    pub duration: Option<String>,
    pub positive: bool,
    pub impact: Option<EventImpact>,
}

/// How strongly an event moves the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventImpact {
    Low,
    Medium,
    High,
}

impl EventImpact {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventImpact::Low => "low",
            EventImpact::Medium => "medium",
            EventImpact::High => "high",
        }
    }
}

impl std::fmt::Display for EventImpact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
