use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use std::convert::Infallible;
use std::time::Duration;
use tower::buffer::BufferLayer;
use tower::limit::RateLimitLayer;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::handlers;
use crate::state::AppState;

fn cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        Some(origins) => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

pub fn router(state: AppState) -> Router {
    let upload_rate_limit = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|_: tower::BoxError| async {
            StatusCode::TOO_MANY_REQUESTS
        }))
        .layer(BufferLayer::new(32))
        .layer(RateLimitLayer::new(
            state.config.uploads_per_minute,
            Duration::from_secs(60),
        ));

    let cors = cors_layer(state.config.cors_origins.as_deref());
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(handlers::page::index))
        .route("/health", get(handlers::health::health))
        .route(
            "/upload",
            post(handlers::upload::upload)
                .layer::<_, Infallible>(upload_rate_limit)
                .layer(body_limit),
        )
        .route("/preview/:id", get(handlers::preview::preview))
        .layer(cors)
        .with_state(state)
}
