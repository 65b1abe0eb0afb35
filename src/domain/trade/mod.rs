//! Trade domain — order submission and transaction records.

pub mod client;
mod convert;
pub mod wire;

use crate::shared::{CoinId, TradeSide, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A trade to submit for the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOrder {
    pub coin_id: CoinId,
    pub side: TradeSide,
    pub amount: Decimal,
    /// The price shown to the user when they submitted. The advisory funds
    /// check uses it; the backend executes at its own current price.
    pub price_at_submission: Decimal,
}

/// A confirmed transaction as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: i64,
    pub user_id: UserId,
    pub coin_id: CoinId,
    pub side: TradeSide,
    pub amount: Decimal,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}
