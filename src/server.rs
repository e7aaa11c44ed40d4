//! Stub HTTP server
//!
//! `GET /api` answers the fixed greeting. Every other GET path is resolved,
//! composed and rendered server-side.

use axum::extract::{Request, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogError, Profile, ProjectCatalog};
use crate::client::{Greeting, API_PATH};
use crate::compose::{PageComposer, RESUME_PATH};
use crate::config::ServerConfig;
use crate::render::render_page;
use crate::routing::Route;

pub const GREETING_MESSAGE: &str = "Hello from the server!";
pub const RESUME_FILE: &str = "resume.pdf";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address: {0}")]
    Address(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server failed: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Clone)]
pub struct AppState {
    pub composer: Arc<PageComposer>,
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(composer: PageComposer, static_dir: PathBuf) -> Self {
        Self {
            composer: Arc::new(composer),
            static_dir: Arc::new(static_dir),
        }
    }

    /// Built-in catalog unless the config names a catalog file.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ServerError> {
        let catalog = match &config.catalog_path {
            Some(path) => ProjectCatalog::load_from_file(path)?,
            None => ProjectCatalog::builtin(),
        };
        info!(projects = catalog.len(), "catalog loaded");
        let composer = PageComposer::new(Arc::new(catalog), Arc::new(Profile::default()));
        Ok(Self::new(composer, config.static_dir.clone()))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(API_PATH, get(api_handler))
        .route(RESUME_PATH, get(resume_handler))
        .fallback(page_handler)
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<(), ServerError> {
    let addr = config
        .bind_addr()
        .map_err(|e| ServerError::Address(e.to_string()))?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    info!(%addr, "Server is running on port {}", config.port);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn api_handler() -> Json<Greeting> {
    Json(Greeting {
        message: GREETING_MESSAGE.to_string(),
    })
}

async fn resume_handler(State(state): State<AppState>) -> Response {
    let path = state.static_dir.join(RESUME_FILE);
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [
                (CONTENT_TYPE, "application/pdf"),
                (CONTENT_DISPOSITION, "inline; filename=\"resume.pdf\""),
            ],
            bytes,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "resume not present");
            StatusCode::NOT_FOUND.into_response()
        }
        Err(e) => {
            warn!(path = %path.display(), "failed to read resume: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn page_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let route = Route::resolve(uri.path());
    let page = state.composer.compose(&route);
    let status = if page.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    debug!(path = uri.path(), ?route, status = status.as_u16(), "page rendered");

    (status, Html(render_page(&page))).into_response()
}

async fn cors_middleware(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        let headers = resp.headers_mut();
        headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
        headers.insert(
            "access-control-allow-methods",
            HeaderValue::from_static("GET,POST,OPTIONS"),
        );
        headers.insert(
            "access-control-allow-headers",
            HeaderValue::from_static("content-type"),
        );
        return resp;
    }

    let mut resp = next.run(req).await;
    resp.headers_mut()
        .insert("access-control-allow-origin", HeaderValue::from_static("*"));
    resp
}
