//! Error taxonomy for the Siwasis data layer.
//!
//! Transport failures and non-2xx responses are kept distinct so screens
//! can show meaningful messages without inspecting reqwest internals.
//! Nothing here retries; callers surface the message and move on.

use reqwest::Response;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure: DNS, connect, TLS, or an unreadable body.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A client-side required-field check failed before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The login response resolved no usable user.
    #[error("invalid credentials")]
    InvalidCredentials,
}

impl Error {
    /// Drain a non-2xx response into an `Api` error.
    ///
    /// The body is kept verbatim as the message; an unreadable body becomes
    /// an empty one.
    pub async fn from_response(resp: Response) -> Self {
        let status = resp.status().as_u16();
        let message = resp.text().await.unwrap_or_default();
        Error::Api { status, message }
    }
}

/// Pass 2xx responses through, converting anything else into `Error::Api`.
pub async fn ensure_success(resp: Response) -> Result<Response, Error> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(Error::from_response(resp).await)
    }
}
