// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod commands;
mod session;
mod state;

use state::AppState;

/// CLI arguments for debug builds only.
/// Allows pointing the client at a local backend without editing .env.
#[cfg(debug_assertions)]
mod cli {
    use clap::Parser;

    #[derive(Parser, Debug)]
    #[command(name = "siwasis-desktop")]
    pub struct Args {
        /// Override the API base URL (debug only)
        #[arg(long)]
        pub api_url: Option<String>,
    }
}

/// Production backend; override with SIWASIS_API_URL.
const DEFAULT_API_URL: &str = "https://siwasis.novarentech.web.id/api";

/// Public storage root where uploaded files are served from.
const DEFAULT_STORAGE_URL: &str = "https://siwasis.novarentech.web.id/storage";

fn main() {
    // Load .env from the app root so dev overrides apply in debug runs
    let _ = dotenvy::dotenv();

    env_logger::init();
    log::info!("Siwasis Desktop starting...");

    // Parse CLI args (debug builds only: --api-url <url>)
    #[cfg(debug_assertions)]
    let api_url_override: Option<String> = {
        use clap::Parser;
        let args = cli::Args::parse();
        if args.api_url.is_some() {
            log::info!("--api-url provided: using overridden backend");
        }
        args.api_url
    };
    #[cfg(not(debug_assertions))]
    let api_url_override: Option<String> = None;

    let api_base_url = api_url_override
        .or_else(|| std::env::var("SIWASIS_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let storage_base_url =
        std::env::var("SIWASIS_STORAGE_URL").unwrap_or_else(|_| DEFAULT_STORAGE_URL.to_string());
    log::info!("Using backend {}", api_base_url);

    let app_state = AppState::new(&api_base_url, &storage_base_url);

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_dialog::init())
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            commands::login,
            commands::restore_session,
            commands::logout,
            commands::list_documents,
            commands::upload_document,
            commands::update_document,
            commands::delete_document,
            commands::open_document,
            commands::get_profile,
            commands::update_profile,
        ])
        .run(tauri::generate_context!())
        .expect("error while running Siwasis Desktop");
}
