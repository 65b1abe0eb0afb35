//! Conversions from wire types to domain types for portfolios.

use super::wire::{PortfolioFeedItem, PortfolioHoldingResponse};
use super::PortfolioHolding;
use crate::shared::{parse_decimal, CoinId, UserId};

impl From<PortfolioHoldingResponse> for PortfolioHolding {
    fn from(h: PortfolioHoldingResponse) -> Self {
        Self {
            portfolio_id: h.portfolio_id,
            user_id: UserId::from(h.user_id),
            coin_id: CoinId(h.coin_id),
            name: h.name,
            amount: parse_decimal(&h.amount),
            current_price: parse_decimal(&h.current_price),
        }
    }
}

/// Extract the holdings from the mixed wire array, dropping the backend's
/// aggregate record.
pub fn holdings_from_items(items: Vec<PortfolioFeedItem>) -> Vec<PortfolioHolding> {
    items
        .into_iter()
        .filter_map(|item| match item {
            PortfolioFeedItem::Holding(h) => Some(h.into()),
            PortfolioFeedItem::Totals(_) => None,
        })
        .collect()
}
