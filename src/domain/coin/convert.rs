//! Conversions from wire types to domain types for coins.

use super::wire::{CoinDetailResponse, CoinResponse, PriceHistoryEntryResponse};
use super::{Coin, CoinDetail, CoinEvent, PricePoint};
use crate::shared::{parse_decimal, CoinId};
use rust_decimal::Decimal;

fn opt_decimal(raw: Option<String>) -> Option<Decimal> {
    raw.as_deref().map(parse_decimal)
}

impl From<CoinResponse> for Coin {
    fn from(c: CoinResponse) -> Self {
        Self {
            coin_id: CoinId(c.coin_id),
            name: c.name,
            symbol: c.symbol,
            current_price: parse_decimal(&c.current_price),
            supply: parse_decimal(&c.supply),
            market_cap: parse_decimal(&c.market_cap),
            date_added: Some(c.date_added),
            description: c.description,
            change_5m: opt_decimal(c.percentage_5mins),
            change_10m: opt_decimal(c.percentage_10mins),
            change_30m: opt_decimal(c.percentage_30mins),
        }
    }
}

impl From<PriceHistoryEntryResponse> for PricePoint {
    fn from(p: PriceHistoryEntryResponse) -> Self {
        Self {
            history_id: p.history_id,
            price: parse_decimal(&p.price),
            timestamp: p.timestamp,
        }
    }
}

impl From<CoinDetailResponse> for CoinDetail {
    fn from(d: CoinDetailResponse) -> Self {
        // the event exists iff the backend sent a type for it
        let event = d.event_type.map(|event_type| CoinEvent {
            event_type,
            duration: d.event_duration,
            positive: d.coin_event_positive.unwrap_or(false),
            impact: d.event_impact,
        });

        Self {
            coin: Coin {
                coin_id: CoinId(d.coin_id),
                name: d.name,
                symbol: d.symbol,
                current_price: parse_decimal(&d.current_price),
                supply: parse_decimal(&d.supply),
                market_cap: parse_decimal(&d.market_cap),
                date_added: None,
                description: d.description,
                change_5m: Some(parse_decimal(&d.percentage_5mins)),
                change_10m: Some(parse_decimal(&d.percentage_10mins)),
                change_30m: Some(parse_decimal(&d.percentage_30mins)),
            },
            price_history: d.price_history.into_iter().map(PricePoint::from).collect(),
            all_time_high: parse_decimal(&d.all_time_high),
            all_time_low: parse_decimal(&d.all_time_low),
            mean_average: parse_decimal(&d.mean_average),
            median_average: parse_decimal(&d.median_average),
            last_5m_value: parse_decimal(&d.last_5mins_value),
            last_10m_value: parse_decimal(&d.last_10mins_value),
            last_30m_value: parse_decimal(&d.last_30mins_value),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::EventImpact;
    use std::str::FromStr;

    #[test]
    fn test_coin_detail_conversion_with_event() {
        let json = r#"{
            "coin_id": 4,
            "name": "Bitzena",
            "symbol": "BTZ",
            "current_price": "152.30",
            "supply": "1000000",
            "market_cap": "152300000",
            "description": "A simulated coin",
            "priceHistory": [
                {"history_id": 1, "price": "150.00", "timestamp": "2025-03-01T10:00:00Z"},
                {"history_id": 2, "price": "152.30", "timestamp": "2025-03-01T10:05:00Z"}
            ],
            "allTimeHigh": "210.00",
            "allTimeLow": "90.10",
            "meanAverage": "148.22",
            "medianAverage": "147.90",
            "last5minsValue": "151.00",
            "percentage5mins": "0.86",
            "last10minsValue": "149.80",
            "percentage10mins": "1.67",
            "last30minsValue": "145.00",
            "percentage30mins": "5.03",
            "eventType": "rally",
            "eventDuration": "12 minutes",
            "coinEventPositive": true,
            "eventImpact": "high"
        }"#;
        let resp: CoinDetailResponse = serde_json::from_str(json).unwrap();
        let detail: CoinDetail = resp.into();

        assert_eq!(detail.coin.coin_id, CoinId(4));
        assert_eq!(
            detail.coin.current_price,
            Decimal::from_str("152.30").unwrap()
        );
        assert_eq!(detail.price_history.len(), 2);
        assert_eq!(
            detail.price_history[0].price,
            Decimal::from_str("150.00").unwrap()
        );

        let event = detail.event.expect("active event");
        assert_eq!(event.event_type, "rally");
        assert!(event.positive);
        assert_eq!(event.impact, Some(EventImpact::High));
    }

    #[test]
    fn test_coin_detail_without_event() {
        let json = r#"{
            "coin_id": 7,
            "name": "Quietcoin",
            "symbol": "QTC",
            "current_price": "3.50",
            "supply": "500000",
            "market_cap": "1750000",
            "description": "",
            "priceHistory": [],
            "allTimeHigh": "5.00",
            "allTimeLow": "1.00",
            "meanAverage": "3.10",
            "medianAverage": "3.00",
            "last5minsValue": "3.45",
            "percentage5mins": "1.45",
            "last10minsValue": "3.40",
            "percentage10mins": "2.94",
            "last30minsValue": "3.30",
            "percentage30mins": "6.06"
        }"#;
        let resp: CoinDetailResponse = serde_json::from_str(json).unwrap();
        let detail: CoinDetail = resp.into();
        assert!(detail.event.is_none());
        assert!(detail.price_history.is_empty());
    }

    #[test]
    fn test_malformed_decimal_becomes_zero() {
        let resp = CoinResponse {
            coin_id: 1,
            name: "Broken".into(),
            symbol: "BRK".into(),
            current_price: "not-a-price".into(),
            supply: "100".into(),
            market_cap: "".into(),
            date_added: chrono::Utc::now(),
            description: String::new(),
            percentage_5mins: Some("garbage".into()),
            percentage_10mins: None,
            percentage_30mins: None,
        };
        let coin: Coin = resp.into();
        assert_eq!(coin.current_price, Decimal::ZERO);
        assert_eq!(coin.market_cap, Decimal::ZERO);
        assert_eq!(coin.change_5m, Some(Decimal::ZERO));
        assert_eq!(coin.change_10m, None);
    }
}
