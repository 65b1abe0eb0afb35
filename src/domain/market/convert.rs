//! Conversion: mixed feed array → `MarketFeed`.

use super::wire::{MarketEventResponse, MarketFeedItem, MarketSnapshotResponse};
use super::{MarketEvent, MarketFeed, MarketSnapshot};
use crate::domain::coin::Coin;
use crate::shared::parse_decimal;

impl From<MarketSnapshotResponse> for MarketSnapshot {
    fn from(s: MarketSnapshotResponse) -> Self {
        Self {
            market_total: parse_decimal(&s.market_total),
            change_5m: s.percentage_5mins.as_deref().map(parse_decimal),
            current_event: s.current_event.map(MarketEvent::from),
        }
    }
}

impl From<MarketEventResponse> for MarketEvent {
    fn from(e: MarketEventResponse) -> Self {
        Self {
            event_type: e.event_type,
            start_time: e.start_time,
            end_time: e.end_time,
        }
    }
}

impl MarketFeed {
    /// Split the mixed wire array into coins and the snapshot record.
    ///
    /// The backend sends at most one snapshot; if it ever sends more, the
    /// first wins.
    pub fn from_items(items: Vec<MarketFeedItem>) -> Self {
        let mut coins: Vec<Coin> = Vec::with_capacity(items.len());
        let mut snapshot: Option<MarketSnapshot> = None;

        for item in items {
            match item {
                MarketFeedItem::Coin(c) => coins.push(c.into()),
                MarketFeedItem::Snapshot(s) => {
                    if snapshot.is_none() {
                        snapshot = Some(s.into());
                    } else {
                        tracing::warn!("market feed contained more than one snapshot record");
                    }
                }
            }
        }

        Self { coins, snapshot }
    }
}

impl From<Vec<MarketFeedItem>> for MarketFeed {
    fn from(items: Vec<MarketFeedItem>) -> Self {
        Self::from_items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const FEED: &str = r#"[
        {
            "coin_id": 1,
            "name": "Bitzena",
            "symbol": "BTZ",
            "current_price": "152.30",
            "supply": "1000000",
            "market_cap": "152300000",
            "date_added": "2024-11-02T09:00:00Z",
            "description": "A simulated coin",
            "percentage5mins": "-0.42"
        },
        {
            "marketTotal": "8214000",
            "percentage5mins": "1.20",
            "currentEvent": {
                "type": "boom",
                "start_time": "2025-03-01T10:00:00Z",
                "end_time": "2025-03-01T10:30:00Z"
            }
        },
        {
            "coin_id": 2,
            "name": "Quietcoin",
            "symbol": "QTC",
            "current_price": "3.50",
            "supply": "500000",
            "market_cap": "1750000",
            "date_added": "2024-12-20T12:00:00Z",
            "description": ""
        }
    ]"#;

    #[test]
    fn test_mixed_array_discrimination() {
        let items: Vec<MarketFeedItem> = serde_json::from_str(FEED).unwrap();
        assert_eq!(items.len(), 3);

        let feed = MarketFeed::from_items(items);
        assert_eq!(feed.coins.len(), 2);
        assert_eq!(feed.coins[0].symbol, "BTZ");
        assert_eq!(
            feed.coins[0].change_5m,
            Some(Decimal::from_str("-0.42").unwrap())
        );

        let snapshot = feed.snapshot.expect("snapshot record");
        assert_eq!(snapshot.market_total, Decimal::from(8_214_000_i64));
        let event = snapshot.current_event.expect("market event");
        assert_eq!(event.event_type, "boom");
        assert!(event.end_time > event.start_time);
    }

    #[test]
    fn test_feed_without_snapshot() {
        let json = r#"[{
            "coin_id": 1,
            "name": "Bitzena",
            "symbol": "BTZ",
            "current_price": "152.30",
            "supply": "1000000",
            "market_cap": "152300000",
            "date_added": "2024-11-02T09:00:00Z",
            "description": ""
        }]"#;
        let items: Vec<MarketFeedItem> = serde_json::from_str(json).unwrap();
        let feed = MarketFeed::from_items(items);
        assert_eq!(feed.coins.len(), 1);
        assert!(feed.snapshot.is_none());
    }

    #[test]
    fn test_empty_feed() {
        let feed = MarketFeed::from_items(Vec::new());
        assert!(feed.coins.is_empty());
        assert!(feed.snapshot.is_none());
    }
}
