//! HTTP routes
//!
//! `POST /` receives finalized-object CloudEvents from the trigger host;
//! `GET /health` answers liveness probes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::error::{HttpPipelineError, ValidatedJson};
use crate::state::AppState;
use obscura_core::CloudEventEnvelope;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handle_event))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Entry point for finalized-object events.
///
/// Non-fatal conditions answer 200 with the outcome in the body; only
/// fatal pipeline errors produce an error status, which the trigger host
/// may answer with a redelivery.
async fn handle_event(
    State(state): State<Arc<AppState>>,
    ValidatedJson(envelope): ValidatedJson<CloudEventEnvelope>,
) -> Result<impl IntoResponse, HttpPipelineError> {
    envelope.data.validate()?;
    tracing::debug!(
        event_id = %envelope.id,
        event_type = %envelope.event_type,
        "Received storage event"
    );

    let outcome = state.analyzer.analyze(&envelope.data).await?;

    Ok(Json(json!({
        "outcome": outcome.as_str(),
        "object": envelope.data.handle().locator(),
    })))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
