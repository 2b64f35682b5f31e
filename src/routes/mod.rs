// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod business;

use crate::middleware::public_assets::allow_any_origin;
use crate::AppState;
use axum::http::Method;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Build the complete router with all routes.
///
/// Besides the API, the public directory is served as-is so registered
/// records stay reachable at `/businesses/<businessId>.json`.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Registration pages are hosted elsewhere, so any origin may call the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let business_documents = Router::new()
        .fallback_service(ServeDir::new(state.config.records_dir()))
        .layer(middleware::map_response(allow_any_origin));

    Router::new()
        .route("/health", get(health_check))
        .merge(business::routes(state.config.max_request_bytes()))
        .nest("/businesses", business_documents)
        .fallback_service(ServeDir::new(&state.config.public_dir))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
