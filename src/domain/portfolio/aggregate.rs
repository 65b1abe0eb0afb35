//! Portfolio aggregation — sorted holdings and the derived total.
//!
//! Pure functions: no cache access, no I/O. The total is recomputed in full
//! on every call instead of being accumulated incrementally, so repeated
//! partial updates cannot drift.

use super::PortfolioHolding;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Field the holdings are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// `amount × current_price`.
    Value,
    Price,
    Amount,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sorted holdings plus their combined value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub holdings: Vec<PortfolioHolding>,
    pub total_value: Decimal,
}

/// Sort `holdings` by `field` in `direction` and compute the total value.
///
/// The sort is stable: holdings comparing equal on the selected field keep
/// their original relative order.
pub fn aggregate(
    holdings: &[PortfolioHolding],
    field: SortField,
    direction: SortDirection,
) -> PortfolioSummary {
    let mut sorted: Vec<PortfolioHolding> = holdings.to_vec();
    sorted.sort_by(|a, b| {
        let (x, y) = (sort_key(a, field), sort_key(b, field));
        match direction {
            SortDirection::Asc => x.cmp(&y),
            SortDirection::Desc => y.cmp(&x),
        }
    });

    let total_value = holdings.iter().map(PortfolioHolding::value).sum();

    PortfolioSummary {
        holdings: sorted,
        total_value,
    }
}

fn sort_key(holding: &PortfolioHolding, field: SortField) -> Decimal {
    match field {
        SortField::Value => holding.value(),
        SortField::Price => holding.current_price,
        SortField::Amount => holding.amount,
    }
}
