//! Funds domain — a user's available balance. Session-gated.

pub mod client;
pub mod wire;

use crate::shared::{parse_decimal, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's funds balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFunds {
    pub user_id: UserId,
    pub funds: Decimal,
}

impl From<wire::UserFundsResponse> for UserFunds {
    fn from(f: wire::UserFundsResponse) -> Self {
        Self {
            user_id: UserId::from(f.user_id),
            funds: parse_decimal(&f.funds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_funds_conversion() {
        let resp: wire::UserFundsResponse =
            serde_json::from_str(r#"{"user_id": "u1", "funds": "1250.75"}"#).unwrap();
        let funds: UserFunds = resp.into();
        assert_eq!(funds.user_id, UserId::new("u1"));
        assert_eq!(funds.funds, Decimal::from_str("1250.75").unwrap());
    }
}
