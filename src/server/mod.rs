// src/server/mod.rs
// HTTP service exposing the triage endpoint

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::ApiError;
use crate::llm::GeminiClient;
use crate::schema::{TriageRequest, TriageResponse};

/// Shared, read-only state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub gemini: Arc<GeminiClient>,
}

/// Build the service router. CORS stays permissive since the service fronts
/// a browser form in addition to the terminal client.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/triage", post(triage))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness check. No business logic.
async fn root() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "Gemini Triage API is running."
    }))
}

/// Classify one customer message.
///
/// The extractor rejection is handled here so a missing or malformed body
/// yields a 400 with a detail message instead of axum's default 422.
async fn triage(
    State(state): State<AppState>,
    payload: Result<Json<TriageRequest>, JsonRejection>,
) -> Result<Json<TriageResponse>, ApiError> {
    let Json(request) = payload
        .map_err(|rejection| ApiError::bad_request(format!("Invalid request body: {rejection}")))?;

    // Rejects blank or too-short messages before any external call.
    request.validate()?;

    match state.gemini.classify(&request.message).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            // Full detail to the log; generic detail to the caller.
            error!("triage failed: {err}");
            Err(ApiError::from(err))
        }
    }
}
