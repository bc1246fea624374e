use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub predict_url: String,
    pub previews: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: format!("freshcheck-v{}", env!("CARGO_PKG_VERSION")),
        predict_url: state.predictor.url().to_string(),
        previews: state.previews.len(),
    })
}
