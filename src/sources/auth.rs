//! Authentication endpoints: register, login, and session lookup.
//!
//! The server owns credentials and sessions entirely; this module only
//! exchanges them for a bearer token and fetches the `me` record. The
//! token is kept on the [`ApiClient`] and persisted by the caller.

use serde_json::Value;

use crate::state::{Session, UserSummary};

use super::{ApiClient, Result};

impl ApiClient {
    /// What: Create an account.
    ///
    /// Inputs:
    /// - `name`, `email`, `password`: Form fields; the wire field is
    ///   `passwordHash` for historical reasons (the server hashes it)
    ///
    /// Output:
    /// - The server's confirmation message. Registering does not sign in;
    ///   the caller follows up with [`ApiClient::login`].
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<String> {
        let body = serde_json::json!({
            "name": name,
            "email": email,
            "passwordHash": password,
        });
        let v = self.post_json("/auth/register", &body).await?;
        Ok(super::response_message(&v, "Success! Please log in."))
    }

    /// What: Exchange credentials for a bearer token and load the session.
    ///
    /// Output:
    /// - A full [`Session`]; the client's token is updated in place so
    ///   subsequent requests are authenticated.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session> {
        let body = serde_json::json!({
            "email": email,
            "passwordHash": password,
        });
        let v = self.post_json("/auth/login", &body).await?;
        let token = v
            .get("token")
            .and_then(Value::as_str)
            .ok_or("login response carried no token")?
            .to_string();
        self.set_token(Some(token.clone()));
        let user = self.me().await?;
        Ok(Session { user, token })
    }

    /// Fetch the signed-in user's record for the current token.
    pub async fn me(&self) -> Result<UserSummary> {
        let v = self.get_json("/auth/me").await?;
        let user = v.get("user").cloned().ok_or("no session")?;
        Ok(serde_json::from_value(user)?)
    }

    /// What: Rebuild a session from a persisted token.
    ///
    /// Output:
    /// - `Some(Session)` when the token still validates, `None` when the
    ///   server rejects it (expired or revoked); the stale token is
    ///   dropped from the client in that case.
    pub async fn resume(&mut self, token: String) -> Option<Session> {
        self.set_token(Some(token.clone()));
        match self.me().await {
            Ok(user) => Some(Session { user, token }),
            Err(e) => {
                tracing::info!(error = %e, "stored token rejected; signing out");
                self.set_token(None);
                None
            }
        }
    }
}
