//! Trades sub-client — order submission with advisory preconditions.

use super::wire::TransactionRequest;
use super::{TradeOrder, TransactionRecord};
use crate::client::CoinsimClient;
use crate::domain::funds::wire::UserFundsResponse;
use crate::error::{HttpError, TradeError};
use crate::query::keys;
use crate::shared::{parse_decimal, TradeSide};
use rust_decimal::Decimal;

/// Sub-client for trade execution.
pub struct Trades<'a> {
    pub(crate) client: &'a CoinsimClient,
}

impl Trades<'_> {
    /// Submit a trade for the signed-in user.
    ///
    /// Client-side preconditions, checked before any request is issued:
    /// the amount must be positive, and a buy's cost must fit within the
    /// most recently cached funds value. The funds check is advisory — the
    /// backend is the source of truth and may still reject.
    ///
    /// On success the user's funds and portfolio entries are invalidated so
    /// the next read reflects the new balances. On failure no cached state
    /// is touched: there is deliberately no optimistic update, so an
    /// unconfirmed balance is never shown.
    ///
    /// Concurrent submissions are not serialized client-side; ordering is
    /// the backend's concern.
    pub async fn execute(&self, order: &TradeOrder) -> Result<TransactionRecord, TradeError> {
        let Some(session) = self.client.sessions.session() else {
            return Err(TradeError::NotAuthenticated);
        };

        if order.amount <= Decimal::ZERO {
            return Err(TradeError::NonPositiveAmount);
        }

        if order.side == TradeSide::Buy {
            let funds = self
                .client
                .queries
                .peek::<UserFundsResponse>(&keys::user_funds(&session.user_id))
                .map(|f| parse_decimal(&f.funds))
                .unwrap_or(Decimal::ZERO);
            let cost = order.amount * order.price_at_submission;
            if cost > funds {
                return Err(TradeError::InsufficientFunds { cost, funds });
            }
        }

        let request = TransactionRequest {
            user_id: session.user_id.to_string(),
            coin_id: order.coin_id.value(),
            side: order.side,
            amount: order.amount,
            price: order.price_at_submission,
        };

        let record = match self.client.http.create_transaction(&request).await {
            Ok(resp) => TransactionRecord::from(resp),
            Err(HttpError::BadRequest(message)) if !message.is_empty() => {
                return Err(TradeError::Rejected(message));
            }
            Err(HttpError::BadRequest(_)) => {
                return Err(TradeError::Rejected("Something went wrong".into()));
            }
            Err(err) => return Err(TradeError::Http(err)),
        };

        self.client.queries.invalidate(&keys::user_funds(&session.user_id));
        self.client.queries.invalidate(&keys::portfolio(&session.user_id));

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use crate::client::CoinsimClient;
    use crate::query::{QueryFetcher, QueryOptions};
    use crate::shared::{CoinId, UserId};
    use serde_json::json;
    use std::str::FromStr;
    use std::sync::Arc;
    use tokio::time::{sleep, Duration};

    /// Client pointed at an unroutable address: any network attempt fails
    /// fast, and the precondition tests must not attempt one at all.
    fn offline_client() -> CoinsimClient {
        CoinsimClient::builder()
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap()
    }

    fn signed_in(client: &CoinsimClient) -> UserId {
        let user_id = UserId::new("u1");
        client.sessions.finish(Some(Session {
            user_id: user_id.clone(),
            email: "a@b.com".into(),
            username: "alice".into(),
        }));
        user_id
    }

    async fn seed_funds(client: &CoinsimClient, user_id: &UserId, funds: &str) {
        let body = json!({"user_id": user_id.as_str(), "funds": funds});
        let fetcher: QueryFetcher = Arc::new(move || {
            let body = body.clone();
            Box::pin(async move { Ok(body) })
        });
        let _handle =
            client
                .queries
                .subscribe(keys::user_funds(user_id), QueryOptions::default(), fetcher);
        sleep(Duration::from_millis(20)).await;
    }

    fn buy(amount: &str, price: &str) -> TradeOrder {
        TradeOrder {
            coin_id: CoinId(4),
            side: TradeSide::Buy,
            amount: Decimal::from_str(amount).unwrap(),
            price_at_submission: Decimal::from_str(price).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_buy_rejected_when_cost_exceeds_cached_funds() {
        let client = offline_client();
        let user_id = signed_in(&client);
        seed_funds(&client, &user_id, "40").await;

        let err = client.trades().execute(&buy("10", "5")).await.unwrap_err();
        match err {
            TradeError::InsufficientFunds { cost, funds } => {
                assert_eq!(cost, Decimal::from(50));
                assert_eq!(funds, Decimal::from(40));
            }
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let client = offline_client();
        signed_in(&client);

        let mut order = buy("1", "5");
        order.amount = Decimal::ZERO;
        assert!(matches!(
            client.trades().execute(&order).await.unwrap_err(),
            TradeError::NonPositiveAmount
        ));
    }

    #[tokio::test]
    async fn test_requires_session() {
        let client = offline_client();
        assert!(matches!(
            client.trades().execute(&buy("1", "5")).await.unwrap_err(),
            TradeError::NotAuthenticated
        ));
    }

    #[tokio::test]
    async fn test_sell_skips_funds_check_and_reaches_transport() {
        let client = offline_client();
        signed_in(&client);

        let order = TradeOrder {
            coin_id: CoinId(4),
            side: TradeSide::Sell,
            amount: Decimal::ONE,
            price_at_submission: Decimal::from(5),
        };
        // precondition passes, so the submission reaches the (unroutable)
        // transport and surfaces an HTTP error
        assert!(matches!(
            client.trades().execute(&order).await.unwrap_err(),
            TradeError::Http(_)
        ));
    }
}
