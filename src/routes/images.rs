//! Wall endpoint: `GET`/`POST /api/images`.

#[cfg(test)]
#[path = "images_test.rs"]
mod images_test;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::error;

use crate::services::persistence::{self, WallDocument};
use crate::state::AppState;

/// `GET /api/images`: the whole wall; empty if nothing usable is stored.
pub async fn list_images(State(state): State<AppState>) -> Json<WallDocument> {
    Json(persistence::read_wall(&state.data_file).await)
}

/// `POST /api/images`: replace the wall with the posted collection.
pub async fn save_images(State(state): State<AppState>, Json(doc): Json<WallDocument>) -> Response {
    let _guard = state.write_lock.lock().await;
    match persistence::write_wall(&state.data_file, &doc).await {
        Ok(()) => Json(json!({ "success": true, "images": doc.images })).into_response(),
        Err(e) => {
            error!(error = %e, path = %state.data_file.display(), "wall save failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false, "error": "Failed to save" })))
                .into_response()
        }
    }
}

/// `OPTIONS /api/images` without a CORS preflight.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::METHOD_NOT_ALLOWED, Json(json!({ "error": "Method not allowed" })))
}
