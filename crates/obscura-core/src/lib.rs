//! Obscura Core Library
//!
//! This crate provides the domain models, error types, and configuration
//! shared across all Obscura components: the storage event and object
//! handle consumed by the handler, the safety annotation returned by the
//! vision classifier, and the fatal-error taxonomy of the blur pipeline.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ErrorMetadata, LogLevel, PipelineError};
pub use models::event::{CloudEventEnvelope, ObjectHandle, StorageEvent};
pub use models::safety::{Likelihood, SafetyAnnotation};
pub use storage_types::StorageBackend;
