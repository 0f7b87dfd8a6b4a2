//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One JSON endpoint, `/api/images`, carries the whole wall. When a built
//! frontend is configured it is served for every other path, with
//! `index.html` as the fallback so client-side routes such as `/edit` load
//! the app.

pub mod images;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode};
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::state::AppState;

/// API routes: the wall endpoint and the health check.
fn api_routes(state: AppState, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/images",
            get(images::list_images)
                .post(images::save_images)
                .options(images::preflight)
                .fallback(images::method_not_allowed),
        )
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(cors)
        .with_state(state)
}

/// Full application router.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let router = api_routes(state, config.body_limit_bytes);
    let router = match &config.static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true).fallback(index))
        }
        None => router,
    };
    router.layer(CompressionLayer::new()).layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
