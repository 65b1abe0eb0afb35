//! Funds sub-client — session-gated balance queries.

use super::wire::UserFundsResponse;
use super::UserFunds;
use crate::client::CoinsimClient;
use crate::error::SdkError;
use crate::query::{keys, QueryHandle, QuerySnapshot};
use crate::shared::UserId;

/// Sub-client for funds queries.
pub struct Funds<'a> {
    pub(crate) client: &'a CoinsimClient,
}

impl Funds<'_> {
    /// Fetch a user's balance directly, bypassing the cache.
    pub async fn get(&self, user_id: &UserId) -> Result<UserFunds, SdkError> {
        let resp = self.client.http.get_user_funds(user_id).await?;
        Ok(resp.into())
    }

    /// Cache-backed view of the signed-in user's balance.
    ///
    /// Gated on the session: with no session the subscription is disabled —
    /// no fetch is issued and no data is served until a session exists and
    /// `watch` is called again.
    pub fn watch(&self) -> FundsWatch {
        let session = self.client.sessions.session();
        let (key, enabled, fetcher) = match &session {
            Some(s) => (
                keys::user_funds(&s.user_id),
                true,
                self.client
                    .raw_fetcher(format!("/api/users/getFunds/{}", s.user_id)),
            ),
            // disabled subscriptions never invoke their fetcher
            None => (
                keys::user_funds_scope(),
                false,
                self.client.raw_fetcher("/api/users/getFunds".to_string()),
            ),
        };
        let handle = self
            .client
            .queries
            .subscribe(key, self.client.refresh_options(enabled), fetcher);
        FundsWatch { handle }
    }
}

/// Live view of the signed-in user's funds entry.
pub struct FundsWatch {
    handle: QueryHandle,
}

impl FundsWatch {
    pub fn snapshot(&self) -> QuerySnapshot<UserFunds> {
        self.handle
            .snapshot_map(|wire: UserFundsResponse| UserFunds::from(wire))
    }

    pub fn is_enabled(&self) -> bool {
        self.handle.is_enabled()
    }

    pub fn handle(&self) -> &QueryHandle {
        &self.handle
    }
}
