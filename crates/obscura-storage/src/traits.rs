//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use obscura_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3-compatible, local filesystem) must implement
/// this trait. The blur pipeline works against `dyn Storage` so it never
/// couples to a specific backend.
///
/// Every call names its bucket: source objects live in whatever bucket the
/// trigger event references, blurred copies go to the destination bucket
/// from configuration.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Download an object's bytes.
    ///
    /// Returns `StorageError::NotFound` when the object does not exist, so
    /// callers can distinguish a vanished object from a transport failure.
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>>;

    /// Upload bytes under the given bucket and key, overwriting any
    /// existing object.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
