//! Market domain — the market feed: all coins plus the market-wide snapshot.

pub mod client;
mod convert;
pub mod wire;

use crate::domain::coin::Coin;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The market feed, split out of the mixed `GET /api/coins` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketFeed {
    pub coins: Vec<Coin>,
    /// The market-wide snapshot record, if the backend included one.
    pub snapshot: Option<MarketSnapshot>,
}

/// Market-wide totals and the currently running market event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub market_total: Decimal,
    pub change_5m: Option<Decimal>,
    pub current_event: Option<MarketEvent>,
}

/// A market-wide event (boom, bust, ...) with its active window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub event_type: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}
