//! Conversions from wire types to domain types for trades.

use super::wire::TransactionResponse;
use super::TransactionRecord;
use crate::shared::{parse_decimal, CoinId, UserId};

impl From<TransactionResponse> for TransactionRecord {
    fn from(t: TransactionResponse) -> Self {
        Self {
            transaction_id: t.transaction_id,
            user_id: UserId::from(t.user_id),
            coin_id: CoinId(t.coin_id),
            side: t.side,
            amount: parse_decimal(&t.amount),
            price: parse_decimal(&t.price),
            created_at: t.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::TradeSide;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_transaction_response_conversion() {
        let json = r#"{
            "transaction_id": 88,
            "user_id": "u1",
            "coin_id": 4,
            "type": "buy",
            "amount": "10",
            "price": "152.30",
            "created_at": "2025-03-01T10:06:00Z"
        }"#;
        let resp: TransactionResponse = serde_json::from_str(json).unwrap();
        let record: TransactionRecord = resp.into();
        assert_eq!(record.transaction_id, 88);
        assert_eq!(record.side, TradeSide::Buy);
        assert_eq!(record.amount, Decimal::from(10));
        assert_eq!(record.price, Decimal::from_str("152.30").unwrap());
    }

    #[test]
    fn test_transaction_request_serializes_decimals_as_strings() {
        let request = super::super::wire::TransactionRequest {
            user_id: "u1".into(),
            coin_id: 4,
            side: TradeSide::Sell,
            amount: Decimal::from_str("2.5").unwrap(),
            price: Decimal::from_str("152.30").unwrap(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "sell");
        assert_eq!(json["amount"], "2.5");
        assert_eq!(json["price"], "152.30");
    }
}
