//! Request and response types for the Siwasis backend API.
//!
//! The backend speaks snake_case JSON. Response fields are optional across
//! the board because older server builds omit them freely.

use serde::{Deserialize, Serialize};

/// Login request body sent to POST /login.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authenticated account as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

/// Nested login payload used by some server builds.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub token: Option<String>,
    pub user: Option<User>,
}

/// Login response from POST /login.
///
/// The server has shipped two shapes of this payload: token and user at the
/// top level (`token` / `admin`), or wrapped in `data`. Both are tolerated;
/// `resolved_token()` and `resolved_user()` define the precedence in one
/// place so it never gets re-decided at call sites.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub admin: Option<User>,
    pub data: Option<LoginData>,
}

impl LoginResponse {
    /// Bearer token: the top-level field wins over the nested wrapper.
    pub fn resolved_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|d| d.token.as_deref()))
    }

    /// Logged-in user: the top-level `admin` wins over `data.user`.
    pub fn resolved_user(&self) -> Option<&User> {
        self.admin
            .as_ref()
            .or_else(|| self.data.as_ref().and_then(|d| d.user.as_ref()))
    }
}

/// One stored document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub filename: Option<String>,
    pub description: Option<String>,
    /// Server date string, `YYYY-MM-DD`.
    pub uploaded_at: Option<String>,
    /// Storage path relative to the server's public storage root.
    pub file_path: Option<String>,
}

/// Pagination window reported by GET /documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_current_page")]
    pub current_page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_current_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    15
}

/// Raw list response from GET /documents.
#[derive(Debug, Deserialize)]
pub struct DocumentListResponse {
    #[serde(default)]
    pub data: Vec<Document>,
    pub pagination: Option<Pagination>,
}

/// Normalized list window handed to the command layer.
///
/// When the server omits the pagination object, `total` falls back to the
/// number of documents actually returned.
#[derive(Debug, Serialize)]
pub struct DocumentPage {
    pub documents: Vec<Document>,
    pub pagination: Pagination,
}

impl DocumentPage {
    pub fn from_response(resp: DocumentListResponse) -> Self {
        let pagination = resp.pagination.unwrap_or_else(|| Pagination {
            total: resp.data.len() as u64,
            current_page: default_current_page(),
            per_page: default_per_page(),
        });
        Self {
            documents: resp.data,
            pagination,
        }
    }
}

/// Profile payload from GET /profile.
///
/// Canonical schema: `name` (not `username`) and `photo_url` (not `photo`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

/// Generic mutation acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicResponse {
    pub message: Option<String>,
    pub success: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_token_prefers_top_level() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"token":"root-tok","data":{"token":"nested-tok","user":null}}"#,
        )
        .unwrap();
        assert_eq!(resp.resolved_token(), Some("root-tok"));
    }

    #[test]
    fn test_login_token_falls_back_to_nested() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"data":{"token":"nested-tok"}}"#).unwrap();
        assert_eq!(resp.resolved_token(), Some("nested-tok"));
    }

    #[test]
    fn test_login_user_prefers_admin() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{
                "admin": {"id": 1, "name": "Root", "email": null, "username": "root"},
                "data": {"user": {"id": 2, "name": "Nested", "email": null, "username": null}}
            }"#,
        )
        .unwrap();
        assert_eq!(resp.resolved_user().unwrap().id, Some(1));
    }

    #[test]
    fn test_login_user_falls_back_to_nested() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"data":{"user":{"id":2,"name":null,"email":null,"username":null}}}"#,
        )
        .unwrap();
        assert_eq!(resp.resolved_user().unwrap().id, Some(2));
    }

    #[test]
    fn test_login_nothing_resolves_on_null_payload() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"token":null,"data":{"token":null,"user":null}}"#).unwrap();
        assert_eq!(resp.resolved_token(), None);
        assert!(resp.resolved_user().is_none());
    }

    #[test]
    fn test_document_page_keeps_server_pagination() {
        let resp: DocumentListResponse = serde_json::from_str(
            r#"{"data":[{"id":1,"title":"a","filename":null,"description":null,"uploaded_at":null,"file_path":null}],
                "pagination":{"total":40,"current_page":2,"per_page":15}}"#,
        )
        .unwrap();
        let page = DocumentPage::from_response(resp);
        assert_eq!(page.pagination.total, 40);
        assert_eq!(page.pagination.current_page, 2);
    }

    #[test]
    fn test_document_page_total_defaults_to_count() {
        let resp: DocumentListResponse = serde_json::from_str(
            r#"{"data":[
                {"id":1,"title":"a","filename":null,"description":null,"uploaded_at":null,"file_path":null},
                {"id":2,"title":"b","filename":null,"description":null,"uploaded_at":null,"file_path":null}
            ]}"#,
        )
        .unwrap();
        let page = DocumentPage::from_response(resp);
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.per_page, 15);
    }

    #[test]
    fn test_empty_list_response() {
        let resp: DocumentListResponse = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        let page = DocumentPage::from_response(resp);
        assert!(page.documents.is_empty());
        assert_eq!(page.pagination.total, 0);
    }
}
