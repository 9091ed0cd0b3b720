//! Document CRUD against the Siwasis backend.
//!
//! Uploads are multipart. The server only parses multipart bodies on POST,
//! so updates go to POST /documents/{id} with a `_method=PUT` override part.

use std::path::Path;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::client::ApiClient;
use super::error::{ensure_success, Error};
use super::types::{BasicResponse, DocumentListResponse, DocumentPage};

/// Multipart field name the server expects for the document file.
const FILE_FIELD: &str = "file_path";

/// MIME type sent for document files. The server stores PDFs; the original
/// client sends this constant even for office formats, and the server relies
/// on it, so it stays.
const FILE_MIME: &str = "application/pdf";

/// Optional filters for GET /documents. Absent fields are not sent.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub query: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub per_page: Option<u32>,
}

pub struct DocumentRepository {
    api: Arc<ApiClient>,
}

impl DocumentRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// GET /documents with the given filters.
    ///
    /// Zero matches is an empty page, never an error.
    pub async fn list(&self, filter: &ListQuery) -> Result<DocumentPage, Error> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = filter.page {
            query.push(("page", page.to_string()));
        }
        if let Some(ref q) = filter.query {
            query.push(("q", q.clone()));
        }
        if let Some(ref from) = filter.from {
            query.push(("from", from.clone()));
        }
        if let Some(ref to) = filter.to {
            query.push(("to", to.clone()));
        }
        if let Some(per_page) = filter.per_page {
            query.push(("per_page", per_page.to_string()));
        }

        let resp = self.api.authenticated_get("/documents", &query).await?;
        let resp = ensure_success(resp).await?;
        let list: DocumentListResponse = resp.json().await?;
        Ok(DocumentPage::from_response(list))
    }

    /// POST /documents with a multipart body.
    pub async fn upload(
        &self,
        file: &Path,
        title: &str,
        description: Option<&str>,
        uploaded_at: &str,
    ) -> Result<BasicResponse, Error> {
        let form = text_parts(Form::new(), title, description, uploaded_at);
        let form = form.part(FILE_FIELD, file_part(file).await?);

        let resp = self.api.authenticated_multipart_post("/documents", form).await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json().await?)
    }

    /// POST /documents/{id} with `_method=PUT`.
    ///
    /// The file part is only sent when a replacement file was chosen; the
    /// text parts always travel.
    pub async fn update(
        &self,
        id: i64,
        file: Option<&Path>,
        title: &str,
        description: Option<&str>,
        uploaded_at: &str,
    ) -> Result<BasicResponse, Error> {
        let mut form = Form::new().text("_method", "PUT");
        form = text_parts(form, title, description, uploaded_at);
        if let Some(path) = file {
            form = form.part(FILE_FIELD, file_part(path).await?);
        }

        let path = format!("/documents/{}", id);
        let resp = self.api.authenticated_multipart_post(&path, form).await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json().await?)
    }

    /// DELETE /documents/{id}.
    pub async fn delete(&self, id: i64) -> Result<BasicResponse, Error> {
        let path = format!("/documents/{}", id);
        let resp = self.api.authenticated_delete(&path).await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json().await?)
    }
}

/// Append the title/description/uploaded_at text parts.
///
/// Blank descriptions are dropped entirely so the server keeps the column
/// null; non-blank ones go through verbatim.
fn text_parts(form: Form, title: &str, description: Option<&str>, uploaded_at: &str) -> Form {
    let mut form = form
        .text("title", title.to_string())
        .text("uploaded_at", uploaded_at.to_string());
    if let Some(desc) = description {
        if !desc.trim().is_empty() {
            form = form.text("description", desc.to_string());
        }
    }
    form
}

/// Read a file into a named multipart part.
async fn file_part(path: &Path) -> Result<Part, Error> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::Validation(format!("cannot read {}: {}", path.display(), e)))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("dokumen.pdf")
        .to_string();
    Ok(Part::bytes(bytes).file_name(filename).mime_str(FILE_MIME)?)
}
