//! Authentication — session types, wire types, session store, auth sub-client.
//!
//! ## Security model
//!
//! The bearer token returned by login/register is stored inside the HTTP
//! client (private field) and injected as an `Authorization` header on
//! subsequent requests. It is NEVER exposed via public API — no `.token()`
//! accessor. Sign-out posts to the backend (best effort), clears the
//! internal token, and discards all session-gated cache entries so no stale
//! funds or holdings survive an identity change.

pub mod client;
pub mod store;

pub use client::Auth;
pub use store::{SessionState, SessionStore, SubscriptionId};

use crate::shared::UserId;
use serde::{Deserialize, Serialize};

/// The authenticated identity gating user-specific queries and mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
    pub username: String,
}

// ─── Wire types ──────────────────────────────────────────────────────────────

/// Body for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

/// Response from login/register: bearer token plus the user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserProfileResponse,
}

/// User profile as the identity backend sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub email: String,
    pub username: String,
}

impl From<UserProfileResponse> for Session {
    fn from(profile: UserProfileResponse) -> Self {
        Self {
            user_id: UserId::from(profile.id),
            email: profile.email,
            username: profile.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_response_deserialize() {
        let json = r#"{
            "token": "abc123",
            "user": {"id": "u1", "email": "a@b.com", "username": "alice"}
        }"#;
        let resp: SessionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "abc123");
        let session: Session = resp.user.into();
        assert_eq!(session.user_id, UserId::new("u1"));
        assert_eq!(session.username, "alice");
    }
}
