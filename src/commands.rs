//! Tauri IPC commands for the Siwasis webview.
//!
//! Screens invoke these via Tauri's `invoke()` API. Every command returns
//! `Result<T, String>` so the webview can show the message directly; the
//! repositories' typed errors are flattened here and never crash the app.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tauri::State;

use crate::api::documents::ListQuery;
use crate::api::error::Error;
use crate::api::types::{BasicResponse, Document, Profile, User};
use crate::state::AppState;

/// One row of the documents screen: raw fields plus the dd/MM/yyyy display
/// date and the absolute view URL.
#[derive(Debug, Serialize)]
pub struct DocumentRow {
    #[serde(flatten)]
    pub document: Document,
    pub display_date: String,
    pub view_url: Option<String>,
}

/// Payload for the documents screen.
#[derive(Debug, Serialize)]
pub struct DocumentListPayload {
    pub documents: Vec<DocumentRow>,
    pub total: u64,
    pub current_page: u32,
    pub per_page: u32,
}

/// Log in and install the session.
///
/// Validates the fields locally first; the repository persists the token on
/// success. The returned user is what the login screen greets.
#[tauri::command]
pub async fn login(
    state: State<'_, AppState>,
    email: String,
    password: String,
) -> Result<User, String> {
    let email = email.trim().to_string();
    if email.is_empty() || password.trim().is_empty() {
        return Err(Error::Validation("Email and password are required".to_string()).to_string());
    }

    log::info!("Logging in as {}", email);
    state
        .auth
        .login(&email, &password)
        .await
        .map_err(|e| e.to_string())
}

/// Restore a previous session from the keychain on startup.
///
/// Returns `true` when a stored token was installed on the API client and
/// the splash screen can skip the login form. Keychain failures are treated
/// as "no session", never as a startup error.
#[tauri::command]
pub async fn restore_session(state: State<'_, AppState>) -> Result<bool, String> {
    let token = match state.session.get() {
        Ok(Some(t)) if !t.trim().is_empty() => t,
        Ok(_) => {
            log::info!("No stored session, login required");
            return Ok(false);
        }
        Err(e) => {
            log::warn!("Failed to read stored session: {}", e);
            return Ok(false);
        }
    };

    state.api.set_token(token).await;
    log::info!("Session restored from keychain");
    Ok(true)
}

/// Log out: invalidate the server session, then clear local state.
///
/// The remote call is best-effort; local cleanup proceeds even when the
/// server is unreachable.
#[tauri::command]
pub async fn logout(state: State<'_, AppState>) -> Result<(), String> {
    log::info!("Logging out");

    if let Err(e) = state.auth.logout().await {
        log::warn!("Logout request failed (continuing local cleanup): {}", e);
    }

    if let Err(e) = state.session.clear() {
        log::warn!("Failed to clear stored session: {}", e);
    }
    state.api.clear_token().await;

    log::info!("Logout complete");
    Ok(())
}

/// Fetch a page of documents for the list screen.
#[tauri::command]
pub async fn list_documents(
    state: State<'_, AppState>,
    filter: ListQuery,
) -> Result<DocumentListPayload, String> {
    let page = state
        .documents
        .list(&filter)
        .await
        .map_err(|e| e.to_string())?;

    let documents = page
        .documents
        .into_iter()
        .map(|doc| DocumentRow {
            display_date: display_date(doc.uploaded_at.as_deref().unwrap_or_default()),
            view_url: doc.file_path.as_deref().map(|p| state.document_url(p)),
            document: doc,
        })
        .collect();

    Ok(DocumentListPayload {
        documents,
        total: page.pagination.total,
        current_page: page.pagination.current_page,
        per_page: page.pagination.per_page,
    })
}

/// Upload a new document.
///
/// The picked file is staged into the app cache directory first; a missing
/// upload date defaults to today.
#[tauri::command]
pub async fn upload_document(
    state: State<'_, AppState>,
    file_path: String,
    title: String,
    description: Option<String>,
    uploaded_at: Option<String>,
) -> Result<BasicResponse, String> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(Error::Validation("Title is required".to_string()).to_string());
    }
    if file_path.trim().is_empty() {
        return Err(Error::Validation("Choose a file to upload".to_string()).to_string());
    }
    let uploaded_at = uploaded_at
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(today);

    let staged = stage_file(Path::new(file_path.trim())).map_err(|e| e.to_string())?;
    log::info!("Uploading document '{}' ({})", title, staged.display());

    let result = state
        .documents
        .upload(&staged, &title, description.as_deref(), &uploaded_at)
        .await
        .map_err(|e| e.to_string());

    let _ = std::fs::remove_file(&staged);
    result
}

/// Update an existing document; the file is only replaced when a new one
/// was picked.
#[tauri::command]
pub async fn update_document(
    state: State<'_, AppState>,
    id: i64,
    file_path: Option<String>,
    title: String,
    description: Option<String>,
    uploaded_at: String,
) -> Result<BasicResponse, String> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(Error::Validation("Title is required".to_string()).to_string());
    }
    if uploaded_at.trim().is_empty() {
        return Err(Error::Validation("Upload date is required".to_string()).to_string());
    }

    let staged = match file_path.filter(|p| !p.trim().is_empty()) {
        Some(p) => Some(stage_file(Path::new(p.trim())).map_err(|e| e.to_string())?),
        None => None,
    };
    log::info!("Updating document {}", id);

    let result = state
        .documents
        .update(
            id,
            staged.as_deref(),
            &title,
            description.as_deref(),
            uploaded_at.trim(),
        )
        .await
        .map_err(|e| e.to_string());

    if let Some(ref staged) = staged {
        let _ = std::fs::remove_file(staged);
    }
    result
}

/// Delete a document. The webview confirms with the user before invoking.
#[tauri::command]
pub async fn delete_document(state: State<'_, AppState>, id: i64) -> Result<BasicResponse, String> {
    log::info!("Deleting document {}", id);
    state.documents.delete(id).await.map_err(|e| e.to_string())
}

/// Open a stored document in the system browser/viewer.
#[tauri::command]
pub async fn open_document(
    app: tauri::AppHandle,
    state: State<'_, AppState>,
    file_path: String,
) -> Result<(), String> {
    use tauri_plugin_shell::ShellExt;

    let url = state.document_url(&file_path);
    log::info!("Opening document at {}", url);
    app.shell()
        .open(&url, None)
        .map_err(|e| format!("Failed to open document: {}", e))
}

/// Fetch the profile for the profile screen.
#[tauri::command]
pub async fn get_profile(state: State<'_, AppState>) -> Result<Profile, String> {
    state.profile.get().await.map_err(|e| e.to_string())
}

/// Save profile edits. Password is only changed when non-blank; the avatar
/// is only replaced when a new image was picked.
#[tauri::command]
pub async fn update_profile(
    state: State<'_, AppState>,
    name: String,
    email: String,
    password: Option<String>,
    photo_path: Option<String>,
) -> Result<BasicResponse, String> {
    let name = name.trim().to_string();
    let email = email.trim().to_string();
    if name.is_empty() || email.is_empty() {
        return Err(Error::Validation("Name and email are required".to_string()).to_string());
    }

    let staged = match photo_path.filter(|p| !p.trim().is_empty()) {
        Some(p) => Some(stage_file(Path::new(p.trim())).map_err(|e| e.to_string())?),
        None => None,
    };
    log::info!("Updating profile for {}", email);

    let result = state
        .profile
        .update(&name, &email, password.as_deref(), staged.as_deref())
        .await
        .map_err(|e| e.to_string());

    if let Some(ref staged) = staged {
        let _ = std::fs::remove_file(staged);
    }
    result
}

/// Render a server date (`YYYY-MM-DD`) as `dd/MM/yyyy` for display.
///
/// Anything blank or unparseable renders as "-".
pub fn display_date(raw: &str) -> String {
    match chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => "-".to_string(),
    }
}

/// Today's date in the server's `YYYY-MM-DD` format.
fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Copy a picked file into the app cache directory before upload.
///
/// The OS may revoke access to picker paths once the dialog closes;
/// uploading from our own cache keeps the read deterministic. The staged
/// copy is removed by the caller after the request completes. Handles are
/// scoped so they close on every path, including errors.
fn stage_file(source: &Path) -> Result<PathBuf, Error> {
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("dokumen.pdf");

    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("siwasis-desktop");
    std::fs::create_dir_all(&dir)
        .map_err(|e| Error::Validation(format!("cannot prepare upload directory: {}", e)))?;

    let staged = dir.join(file_name);
    let mut input = std::fs::File::open(source)
        .map_err(|e| Error::Validation(format!("cannot read {}: {}", source.display(), e)))?;
    let mut output = std::fs::File::create(&staged)
        .map_err(|e| Error::Validation(format!("cannot stage upload: {}", e)))?;
    std::io::copy(&mut input, &mut output)
        .map_err(|e| Error::Validation(format!("cannot stage upload: {}", e)))?;

    Ok(staged)
}
