use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::ErrorResponse;
use crate::state::AppState;

pub async fn preview(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(entry) = state.previews.get(&id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Preview not found".to_string(),
                hint: Some("Previews expire; upload the image again".to_string()),
            }),
        )
            .into_response();
    };

    (
        [
            (header::CONTENT_TYPE, entry.mime_type),
            (
                header::CACHE_CONTROL,
                format!("private, max-age={}", state.config.preview_ttl.as_secs()),
            ),
        ],
        entry.bytes,
    )
        .into_response()
}
