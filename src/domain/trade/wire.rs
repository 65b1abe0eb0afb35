//! Wire types for transactions (REST).

use crate::shared::TradeSide;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body for `POST /api/transactions`.
///
/// Quantity and price are serialized as decimal strings, like every
/// monetary field on this API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRequest {
    pub user_id: String,
    pub coin_id: i64,
    #[serde(rename = "type")]
    pub side: TradeSide,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

/// The created transaction record returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionResponse {
    pub transaction_id: i64,
    pub user_id: String,
    pub coin_id: i64,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub amount: String,
    pub price: String,
    pub created_at: DateTime<Utc>,
}
