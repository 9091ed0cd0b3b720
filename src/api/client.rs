//! HTTP client for the Siwasis backend with bearer header injection.
//!
//! One `reqwest::Client` is shared by every repository. The bearer token
//! lives in a shared slot so login can install it once; requests made while
//! the slot is empty go out without an Authorization header at all (the
//! server answers 401 and the caller surfaces it).

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// HTTP client wrapper for Siwasis API communication.
///
/// Manages the base URL and the in-memory bearer token, and ensures all
/// requests carry `Accept: application/json`.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new API client with the given base URL.
    pub fn new(base_url: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Install the bearer token used by authenticated requests.
    pub async fn set_token(&self, token: String) {
        let mut guard = self.token.write().await;
        *guard = Some(token);
    }

    /// Clear the bearer token (used on logout).
    pub async fn clear_token(&self) {
        let mut guard = self.token.write().await;
        *guard = None;
    }

    /// Send an authenticated GET to a relative API path with query pairs.
    pub async fn authenticated_get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.token.read().await;

        let mut builder = self.client.get(&url).query(query);

        if let Some(ref t) = *token {
            builder = builder.bearer_auth(t);
        }

        builder.send().await
    }

    /// Send an unauthenticated POST with a JSON body to a relative API path.
    /// Used for login where no token is available yet.
    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        self.client.post(&url).json(body).send().await
    }

    /// Send an authenticated POST with a JSON body to a relative API path.
    pub async fn authenticated_post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.token.read().await;

        let mut builder = self.client.post(&url).json(body);

        if let Some(ref t) = *token {
            builder = builder.bearer_auth(t);
        }

        builder.send().await
    }

    /// Send an authenticated multipart POST (document and profile uploads).
    pub async fn authenticated_multipart_post(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.token.read().await;

        let mut builder = self.client.post(&url).multipart(form);

        if let Some(ref t) = *token {
            builder = builder.bearer_auth(t);
        }

        builder.send().await
    }

    /// Send an authenticated DELETE to a relative API path.
    pub async fn authenticated_delete(&self, path: &str) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.token.read().await;

        let mut builder = self.client.delete(&url);

        if let Some(ref t) = *token {
            builder = builder.bearer_auth(t);
        }

        builder.send().await
    }
}
