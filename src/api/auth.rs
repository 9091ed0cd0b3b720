//! Login and logout against the Siwasis backend.
//!
//! The login payload has shipped in two shapes (top-level vs wrapped in
//! `data`); resolution lives on `LoginResponse` so the precedence is decided
//! in exactly one place. A response that resolves no user is an invalid
//! login, not a transport error.

use std::sync::Arc;

use super::client::ApiClient;
use super::error::{ensure_success, Error};
use super::types::{BasicResponse, LoginRequest, LoginResponse, User};
use crate::session::SessionStore;

/// Repository for the auth endpoints.
///
/// Holds the session store explicitly -- the durable token is written here
/// on login and cleared by the logout command, never through a global.
pub struct AuthRepository {
    api: Arc<ApiClient>,
    session: SessionStore,
}

impl AuthRepository {
    pub fn new(api: Arc<ApiClient>, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// POST /login with the given credentials.
    ///
    /// On success the resolved token (if non-blank) is persisted to the
    /// keychain and installed on the API client, even when the user payload
    /// is missing -- matching the server's observed behavior. Resolving no
    /// user yields `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self.api.post("/login", &body).await?;
        let resp = ensure_success(resp).await?;
        let login: LoginResponse = resp.json().await?;

        if let Some(token) = login.resolved_token() {
            if !token.trim().is_empty() {
                self.api.set_token(token.to_string()).await;
                if let Err(e) = self.session.set(token) {
                    log::warn!("Failed to persist auth token: {}", e);
                }
            }
        }

        match login.resolved_user() {
            Some(user) => {
                log::info!("Logged in as {}", user.email.as_deref().unwrap_or("admin"));
                Ok(user.clone())
            }
            None => Err(Error::InvalidCredentials),
        }
    }

    /// POST /logout with the current bearer token.
    ///
    /// Callers treat failures as best-effort: the local session is cleared
    /// regardless (see `commands::logout`).
    pub async fn logout(&self) -> Result<BasicResponse, Error> {
        let resp = self.api.authenticated_post("/logout", &()).await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json().await?)
    }
}
