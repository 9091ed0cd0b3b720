//! Profile read and update against the Siwasis backend.
//!
//! Updates share the multipart method-override shape with document updates.
//! Password and password_confirmation travel as a pair or not at all; the
//! avatar part is only sent when a new image was chosen.

use std::path::Path;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};

use super::client::ApiClient;
use super::error::{ensure_success, Error};
use super::types::{BasicResponse, Profile};

/// Multipart field name the server expects for the avatar image.
const AVATAR_FIELD: &str = "photo_url";

const AVATAR_MIME: &str = "image/*";

pub struct ProfileRepository {
    api: Arc<ApiClient>,
}

impl ProfileRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// GET /profile with the current bearer token.
    pub async fn get(&self) -> Result<Profile, Error> {
        let resp = self.api.authenticated_get("/profile", &[]).await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json().await?)
    }

    /// POST /profile with `_method=PUT`.
    pub async fn update(
        &self,
        name: &str,
        email: &str,
        password: Option<&str>,
        photo: Option<&Path>,
    ) -> Result<BasicResponse, Error> {
        let mut form = Form::new()
            .text("_method", "PUT")
            .text("name", name.to_string())
            .text("email", email.to_string());

        if let Some(pw) = password.filter(|p| !p.trim().is_empty()) {
            form = form
                .text("password", pw.to_string())
                .text("password_confirmation", pw.to_string());
        }

        if let Some(path) = photo {
            form = form.part(AVATAR_FIELD, avatar_part(path).await?);
        }

        let resp = self.api.authenticated_multipart_post("/profile", form).await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json().await?)
    }
}

/// Read a picked image into the avatar multipart part.
async fn avatar_part(path: &Path) -> Result<Part, Error> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::Validation(format!("cannot read {}: {}", path.display(), e)))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("avatar.jpg")
        .to_string();
    Ok(Part::bytes(bytes).file_name(filename).mime_str(AVATAR_MIME)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_get_profile_parses_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/profile")
            .match_header("authorization", "Bearer tok-123")
            .with_status(200)
            .with_body(
                r#"{"id":3,"name":"Siti","email":"siti@siwasis.id",
                    "photo_url":"https://siwasis.novarentech.web.id/storage/avatars/siti.jpg"}"#,
            )
            .create_async()
            .await;

        let api = Arc::new(ApiClient::new(&server.url()));
        api.set_token("tok-123".to_string()).await;
        let repo = ProfileRepository::new(api);

        let profile = repo.get().await.unwrap();
        assert_eq!(profile.name.as_deref(), Some("Siti"));
        assert!(profile.photo_url.unwrap().ends_with("siti.jpg"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_sends_password_pair_when_set() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/profile")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::Regex(r#"name="_method""#.to_string()),
                mockito::Matcher::Regex(r#"name="name""#.to_string()),
                mockito::Matcher::Regex(r#"name="email""#.to_string()),
                mockito::Matcher::Regex(r#"name="password""#.to_string()),
                mockito::Matcher::Regex(r#"name="password_confirmation""#.to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"message":"Profil diperbarui","success":true}"#)
            .create_async()
            .await;

        let repo = ProfileRepository::new(Arc::new(ApiClient::new(&server.url())));
        let resp = repo
            .update("Siti", "siti@siwasis.id", Some("rahasia123"), None)
            .await
            .unwrap();
        assert_eq!(resp.success, Some(true));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_blank_password_omits_both_parts() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("POST", "/profile")
            .with_status(200)
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;
        let with_password = server
            .mock("POST", "/profile")
            .match_body(mockito::Matcher::Regex(r#"name="password""#.to_string()))
            .with_status(200)
            .with_body(r#"{"success":true}"#)
            .expect(0)
            .create_async()
            .await;

        let repo = ProfileRepository::new(Arc::new(ApiClient::new(&server.url())));
        repo.update("Siti", "siti@siwasis.id", Some("   "), None)
            .await
            .unwrap();

        ok.assert_async().await;
        with_password.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_sends_avatar_part_when_chosen() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/profile")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::Regex(r#"name="photo_url""#.to_string()),
                mockito::Matcher::Regex(r#"filename="avatar.png""#.to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("avatar.png");
        let mut f = std::fs::File::create(&photo).unwrap();
        f.write_all(b"\x89PNG fake").unwrap();
        drop(f);

        let repo = ProfileRepository::new(Arc::new(ApiClient::new(&server.url())));
        repo.update("Siti", "siti@siwasis.id", None, Some(&photo))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_profile_401_propagates_as_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/profile")
            .with_status(401)
            .with_body(r#"{"message":"Unauthenticated."}"#)
            .create_async()
            .await;

        let repo = ProfileRepository::new(Arc::new(ApiClient::new(&server.url())));
        let err = repo.get().await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 401, .. }));
    }
}
