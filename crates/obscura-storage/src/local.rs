use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use obscura_core::StorageBackend;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Buckets map to subdirectories of the base path; object keys map to
/// files below them. Used for development and tests.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for all buckets (e.g., "/var/lib/obscura")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert a bucket+key pair to a filesystem path with security
    /// validation, so no key can escape the base storage directory.
    fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        if bucket.is_empty()
            || bucket.contains("..")
            || bucket.contains('/')
            || bucket.contains('\\')
        {
            return Err(StorageError::InvalidKey(format!(
                "Invalid bucket name: {}",
                bucket
            )));
        }

        if key.is_empty() || key.contains("..") || key.starts_with('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(bucket).join(key))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(format!("{}/{}", bucket, key)));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(data)
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<()> {
        let path = self.object_path(bucket, key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        let path = self.object_path(bucket, key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
