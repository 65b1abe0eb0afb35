//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize
//! identically to the raw format the backend sends, so they can be used
//! directly in wire types without conversion overhead.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── CoinId ──────────────────────────────────────────────────────────────────

/// Numeric coin identifier (e.g. `4` for "Bitcoin Simulation").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoinId(pub i64);

impl CoinId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CoinId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// ─── UserId ──────────────────────────────────────────────────────────────────

/// Opaque user identifier assigned by the identity backend.
///
/// Serializes transparently as a JSON string. Can be used as a HashMap key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(UserId(s))
    }
}

// ─── TradeSide ───────────────────────────────────────────────────────────────

/// Trade direction: Buy or Sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "Buy"),
            TradeSide::Sell => write!(f, "Sell"),
        }
    }
}

// ─── Decimal parsing ─────────────────────────────────────────────────────────

/// Parse a backend decimal string leniently.
///
/// Monetary and quantity fields travel as decimal strings. Display-path
/// conversions must never fail hard on a malformed field, so anything
/// unparseable becomes zero.
pub fn parse_decimal(s: &str) -> Decimal {
    match Decimal::from_str(s.trim()) {
        Ok(d) => d,
        Err(_) => {
            tracing::debug!(raw = s, "unparseable decimal, treating as zero");
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_id_serde() {
        let id = CoinId(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let back: CoinId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_user_id_serde() {
        let uid = UserId::new("user-123");
        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "\"user-123\"");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(uid, back);
    }

    #[test]
    fn test_trade_side_serde() {
        let buy: TradeSide = serde_json::from_str("\"buy\"").unwrap();
        assert_eq!(buy, TradeSide::Buy);
        let sell: TradeSide = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(sell, TradeSide::Sell);
        assert_eq!(serde_json::to_string(&TradeSide::Buy).unwrap(), "\"buy\"");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("123.45"), Decimal::from_str("123.45").unwrap());
        assert_eq!(parse_decimal("  42 "), Decimal::from(42));
        assert_eq!(parse_decimal("not-a-number"), Decimal::ZERO);
        assert_eq!(parse_decimal(""), Decimal::ZERO);
    }
}
