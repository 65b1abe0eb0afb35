//! Auth sub-client — sign-in, sign-up, sign-out.

use super::{LoginRequest, RegisterRequest, Session};
use crate::client::CoinsimClient;
use crate::error::{AuthError, HttpError};
use crate::query::keys;

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a CoinsimClient,
}

impl Auth<'_> {
    /// Sign in with email and password.
    ///
    /// On success the bearer token is injected into the HTTP client and the
    /// session store is updated; every registered listener observes the new
    /// session synchronously before this call returns.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.sessions.begin();

        match self.client.http.login(&request).await {
            Ok(resp) => {
                self.client.http.set_auth_token(Some(resp.token)).await;
                let session: Session = resp.user.into();
                self.client.sessions.finish(Some(session.clone()));
                Ok(session)
            }
            Err(err) => {
                self.client.sessions.fail();
                Err(map_credentials_error(err))
            }
        }
    }

    /// Register a new account and sign in as it.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<Session, AuthError> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            username: username.to_string(),
        };
        self.client.sessions.begin();

        match self.client.http.register(&request).await {
            Ok(resp) => {
                self.client.http.set_auth_token(Some(resp.token)).await;
                let session: Session = resp.user.into();
                self.client.sessions.finish(Some(session.clone()));
                Ok(session)
            }
            Err(err) => {
                self.client.sessions.fail();
                Err(map_credentials_error(err))
            }
        }
    }

    /// Sign out.
    ///
    /// The backend logout is best-effort; local state is cleared regardless:
    /// the session, the injected token, and every session-gated cache entry
    /// (funds, portfolio), so nothing stale is served under a new or absent
    /// identity.
    pub async fn sign_out(&self) {
        self.client.sessions.begin();

        if let Err(err) = self.client.http.logout().await {
            tracing::debug!(%err, "logout request failed, clearing local session anyway");
        }
        self.client.http.clear_auth_token().await;
        self.client.sessions.finish(None);

        self.client.queries.remove_prefix(&keys::user_funds_scope());
        self.client.queries.remove_prefix(&keys::portfolio_scope());
    }
}

fn map_credentials_error(err: HttpError) -> AuthError {
    match err {
        HttpError::Unauthorized => AuthError::Credentials("Invalid email or password".into()),
        HttpError::BadRequest(message) => AuthError::Credentials(message),
        other => AuthError::Http(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_error_mapping() {
        let err = map_credentials_error(HttpError::BadRequest("Email already taken".into()));
        assert!(matches!(err, AuthError::Credentials(m) if m == "Email already taken"));

        let err = map_credentials_error(HttpError::Unauthorized);
        assert!(matches!(err, AuthError::Credentials(_)));

        let err = map_credentials_error(HttpError::Timeout);
        assert!(matches!(err, AuthError::Http(HttpError::Timeout)));
    }
}
