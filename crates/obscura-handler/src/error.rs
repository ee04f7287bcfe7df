//! HTTP error surface
//!
//! Maps fatal pipeline errors onto HTTP responses for the trigger host.
//! Every error is logged here at the level its metadata asks for, and the
//! JSON body carries a machine-readable code plus a recoverability hint so
//! the host can decide whether redelivery is worth it.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use obscura_core::{ErrorMetadata, LogLevel, PipelineError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// JSON body returned for failed invocations.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub code: String,
    pub recoverable: bool,
}

/// Wrapper so the axum response conversion can live in this crate without
/// tripping over the orphan rules for `PipelineError`.
pub struct HttpPipelineError(pub PipelineError);

impl From<PipelineError> for HttpPipelineError {
    fn from(error: PipelineError) -> Self {
        Self(error)
    }
}

impl From<JsonRejection> for HttpPipelineError {
    fn from(rejection: JsonRejection) -> Self {
        Self(PipelineError::InvalidEvent(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON extractor that reports deserialization failures in the same body
/// shape as pipeline failures.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpPipelineError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ValidatedJson(value))
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| {
            let env = env.to_lowercase();
            env == "production" || env == "prod"
        })
        .unwrap_or(false)
}

fn log_error(error: &PipelineError) {
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, "Invocation failed"),
        LogLevel::Warn => tracing::warn!(error = %error, "Invocation failed"),
        LogLevel::Error => tracing::error!(error = %error, "Invocation failed"),
    }
}

impl IntoResponse for HttpPipelineError {
    fn into_response(self) -> Response {
        let error = self.0;
        log_error(&error);

        let status = StatusCode::from_u16(error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Internal detail stays out of responses in production and for
        // errors that may carry backend specifics.
        let details = if is_production_env() || error.is_sensitive() {
            None
        } else {
            Some(error.detailed_message())
        };

        let body = ErrorResponse {
            error: error.client_message(),
            details,
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
        };

        (status, Json(body)).into_response()
    }
}
