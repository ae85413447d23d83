//! Preview server for the generated site
//!
//! Serves the public directory. A post URL whose page has not been
//! generated yet gets the shared "generating" page instead of a 404,
//! mirroring the on-demand fallback behavior of the static host.

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::generator::{post_page_path, FALLBACK_PAGE};
use crate::Startrail;

/// Server state
struct ServerState {
    public_dir: PathBuf,
}

/// Start the preview server
pub async fn start(app: &Startrail, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState {
        public_dir: app.public_dir.clone(),
    });

    let router = Router::new().fallback(fallback_handler).with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Serve static files; unknown post slugs get the generating page
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().trim_start_matches('/').to_string();

    if let Some(slug) = path.strip_prefix("post/") {
        let slug = slug.trim_end_matches('/');
        let generated = post_page_path(&state.public_dir, slug);
        if !slug.is_empty() && !slug.starts_with('_') && !generated.exists() {
            let fallback = state.public_dir.join(FALLBACK_PAGE);
            return match tokio::fs::read_to_string(&fallback).await {
                Ok(content) => Html(content).into_response(),
                Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
            };
        }
    }

    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
