//! Application state for Siwasis Desktop.
//!
//! One API client, the keychain session store, and the repositories built
//! on top of them, shared across Tauri commands.

use std::sync::Arc;

use crate::api::auth::AuthRepository;
use crate::api::client::ApiClient;
use crate::api::documents::DocumentRepository;
use crate::api::profile::ProfileRepository;
use crate::session::SessionStore;

pub struct AppState {
    /// HTTP client for Siwasis API communication.
    pub api: Arc<ApiClient>,

    /// Durable token storage; read on startup, written on login.
    pub session: SessionStore,

    pub auth: AuthRepository,
    pub documents: DocumentRepository,
    pub profile: ProfileRepository,

    /// Public storage root where the server serves uploaded files.
    storage_base: String,
}

impl AppState {
    /// Create the app state with the given API and storage base URLs.
    pub fn new(api_base_url: &str, storage_base_url: &str) -> Self {
        let api = Arc::new(ApiClient::new(api_base_url));
        let session = SessionStore::new();
        Self {
            auth: AuthRepository::new(api.clone(), session.clone()),
            documents: DocumentRepository::new(api.clone()),
            profile: ProfileRepository::new(api.clone()),
            api,
            session,
            storage_base: storage_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL where the server serves a stored document or avatar.
    pub fn document_url(&self, file_path: &str) -> String {
        format!("{}/{}", self.storage_base, file_path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_url_joins_single_slash() {
        let state = AppState::new(
            "https://siwasis.novarentech.web.id/api",
            "https://siwasis.novarentech.web.id/storage/",
        );
        assert_eq!(
            state.document_url("/documents/laporan.pdf"),
            "https://siwasis.novarentech.web.id/storage/documents/laporan.pdf"
        );
        assert_eq!(
            state.document_url("documents/laporan.pdf"),
            "https://siwasis.novarentech.web.id/storage/documents/laporan.pdf"
        );
    }
}
