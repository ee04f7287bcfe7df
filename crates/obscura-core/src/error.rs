//! Error types module
//!
//! Fatal pipeline errors only: conditions that abort an invocation and are
//! reported to the trigger host. Non-fatal conditions (missing object,
//! classifier failure, blur write failure) never appear here — they are
//! logged where they occur and surface as explicit outcome values.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected or malformed inputs
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return to the trigger host
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DOWNLOAD_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether a redelivery of the same event might succeed
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Errors that abort an invocation of the blur pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File download failed: {0}")]
    Download(String),

    #[error("Unable to upload blurred image to {locator}: {message}")]
    Upload { locator: String, message: String },

    #[error("Invalid event payload: {0}")]
    InvalidEvent(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Static metadata for each variant: (http_status, error_code, recoverable, sensitive, log_level).
/// Reduces duplication in the ErrorMetadata impl; client_message stays per-variant.
fn pipeline_error_static_metadata(
    err: &PipelineError,
) -> (u16, &'static str, bool, bool, LogLevel) {
    match err {
        PipelineError::Download(_) => (500, "DOWNLOAD_FAILED", true, true, LogLevel::Error),
        PipelineError::Upload { .. } => (500, "UPLOAD_FAILED", true, true, LogLevel::Error),
        PipelineError::InvalidEvent(_) => (400, "INVALID_EVENT", false, false, LogLevel::Warn),
        PipelineError::Io(_) => (500, "IO_ERROR", true, true, LogLevel::Error),
    }
}

impl ErrorMetadata for PipelineError {
    fn http_status_code(&self) -> u16 {
        pipeline_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        pipeline_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        pipeline_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            PipelineError::Download(_) => "Failed to download source object".to_string(),
            PipelineError::Upload { locator, .. } => {
                format!("Failed to upload blurred image to {}", locator)
            }
            PipelineError::InvalidEvent(msg) => format!("Invalid event payload: {}", msg),
            PipelineError::Io(_) => "Internal I/O error".to_string(),
        }
    }

    fn is_sensitive(&self) -> bool {
        pipeline_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        pipeline_error_static_metadata(self).4
    }
}

impl PipelineError {
    /// Detailed message including internal context, for logs and
    /// non-production error bodies.
    pub fn detailed_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_failure_metadata() {
        let err = PipelineError::Download("connection reset".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DOWNLOAD_FAILED");
        assert!(err.is_recoverable());
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
        assert!(err.to_string().starts_with("File download failed"));
    }

    #[test]
    fn test_upload_failure_message_carries_locator() {
        let err = PipelineError::Upload {
            locator: "gs://blurred/zombie.jpg".to_string(),
            message: "access denied".to_string(),
        };
        assert_eq!(err.error_code(), "UPLOAD_FAILED");
        assert!(err
            .to_string()
            .contains("Unable to upload blurred image to gs://blurred/zombie.jpg"));
        assert!(err.client_message().contains("gs://blurred/zombie.jpg"));
        // Internal detail stays out of the client message
        assert!(!err.client_message().contains("access denied"));
    }

    #[test]
    fn test_invalid_event_is_client_error() {
        let err = PipelineError::InvalidEvent("missing data.bucket".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert!(!err.is_recoverable());
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: PipelineError = io_err.into();
        match &err {
            PipelineError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied)
            }
            other => panic!("Expected Io variant, got {:?}", other),
        }
        assert_eq!(err.http_status_code(), 500);
    }
}
