use async_trait::async_trait;
use thiserror::Error;

use obscura_core::SafetyAnnotation;

/// Errors that can occur during classification
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Failed to send request to vision API: {0}")]
    Request(String),

    #[error("Vision API request failed: {0}")]
    Status(String),

    #[error("Vision API error: {0}")]
    Api(String),

    #[error("Failed to parse vision API response: {0}")]
    Decode(String),

    #[error("Vision configuration error: {0}")]
    Config(String),
}

pub type VisionResult<T> = Result<T, VisionError>;

/// Content-safety classification abstraction.
///
/// Implementations classify the object a locator points at without ever
/// receiving the bytes themselves. Callers treat every error as
/// non-fatal: a failed classification skips the image rather than
/// failing the invocation.
#[async_trait]
pub trait SafetyClassifier: Send + Sync {
    /// Request a safe-search annotation for the image at `locator`.
    ///
    /// Returns `Ok(None)` when the service answers but reports no
    /// annotation for the object, which callers handle as "not found".
    async fn classify(&self, locator: &str) -> VisionResult<Option<SafetyAnnotation>>;
}
