//! Wire types for portfolio responses (REST).

use serde::{Deserialize, Serialize};

/// One element of the `GET /api/portfolios/:userId` array.
///
/// Like the market feed, the backend may mix an aggregate record
/// (`totalValue`) in with the holdings. The total is ignored downstream —
/// it is always recomputed from the holdings so it cannot drift from
/// refreshed prices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PortfolioFeedItem {
    Holding(PortfolioHoldingResponse),
    Totals(PortfolioTotalsResponse),
}

/// A single holding record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioHoldingResponse {
    pub portfolio_id: i64,
    pub user_id: String,
    pub coin_id: i64,
    pub name: String,
    pub amount: String,
    pub current_price: String,
}

/// The backend's aggregate record. Parsed, then dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioTotalsResponse {
    #[serde(rename = "totalValue")]
    pub total_value: String,
}
