#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageError, StorageResult};
use obscura_core::{Config, StorageBackend};
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let region = config.s3_region.clone().ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint.clone();

            let storage = S3Storage::new(region, endpoint).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;

            let storage = LocalStorage::new(base_path).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
