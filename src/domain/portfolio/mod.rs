//! Portfolio domain — a user's holdings and their derived values.

pub mod aggregate;
pub mod client;
mod convert;
pub mod wire;

pub use aggregate::{aggregate, PortfolioSummary, SortDirection, SortField};
pub use convert::holdings_from_items;

use crate::shared::{CoinId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One holding in a user's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHolding {
    pub portfolio_id: i64,
    pub user_id: UserId,
    pub coin_id: CoinId,
    pub name: String,
    pub amount: Decimal,
    pub current_price: Decimal,
}

impl PortfolioHolding {
    /// Current value of this holding. Computed at read time so it can never
    /// drift from the latest price refresh.
    pub fn value(&self) -> Decimal {
        self.amount * self.current_price
    }
}
