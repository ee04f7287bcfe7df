//! Blur pipeline
//!
//! Downloads a flagged object into a per-invocation staging directory,
//! blurs the working file in place, and uploads the result to the
//! destination bucket under the same object name. Concurrent invocations
//! never share a staging directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use obscura_core::{ObjectHandle, PipelineError};
use obscura_processing::{blur_image_bytes, detect_content_type, BLUR_SIGMA};
use obscura_storage::Storage;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Blurs offensive images and re-uploads them.
#[derive(Clone)]
pub struct Blurrer {
    storage: Arc<dyn Storage>,
    staging_root: PathBuf,
}

impl Blurrer {
    pub fn new(storage: Arc<dyn Storage>, staging_root: PathBuf) -> Self {
        Self {
            storage,
            staging_root,
        }
    }

    /// Download, blur, and upload one object.
    ///
    /// Download and upload failures are fatal. A failure to blur the
    /// working file is logged and the file uploaded as it stands, so a
    /// redelivered event gets another chance at it. The staging directory
    /// is removed on every exit path out of this function.
    pub async fn blur_and_upload(
        &self,
        handle: &ObjectHandle,
        destination_bucket: &str,
    ) -> Result<(), PipelineError> {
        // Dropping the TempDir deletes the staging directory, whichever
        // way this function returns.
        let staging = tempfile::Builder::new()
            .prefix("obscura-")
            .tempdir_in(&self.staging_root)?;
        let working_path = staging.path().join(handle.base_name());

        // Materializing the object locally is one unit: a failure to
        // fetch the bytes or to land them on disk is a download failure.
        let data = self
            .storage
            .download(&handle.bucket, &handle.name)
            .await
            .map_err(|e| PipelineError::Download(e.to_string()))?;
        tokio::fs::write(&working_path, &data)
            .await
            .map_err(|e| PipelineError::Download(e.to_string()))?;
        tracing::info!("Downloaded {} to: {}", handle.name, working_path.display());

        match blur_working_file(&working_path).await {
            Ok(()) => tracing::info!("Blurred image: {}", handle.name),
            Err(e) => tracing::warn!("Failed to blur image: {}", e),
        }

        let blurred = tokio::fs::read(&working_path).await?;
        let content_type = detect_content_type(&blurred).unwrap_or(DEFAULT_CONTENT_TYPE);
        let destination = ObjectHandle::new(destination_bucket, &handle.name);
        self.storage
            .upload(&destination.bucket, &destination.name, blurred, content_type)
            .await
            .map_err(|e| PipelineError::Upload {
                locator: destination.locator(),
                message: e.to_string(),
            })?;
        tracing::info!("Uploaded blurred image to: {}", destination.locator());

        Ok(())
    }
}

/// Blur the staged file in place. Decode, blur, encode, and rewrite are
/// one unit; any failure leaves the original file untouched for the
/// caller to upload as-is.
async fn blur_working_file(path: &Path) -> Result<(), anyhow::Error> {
    let data = tokio::fs::read(path).await?;
    let blurred = tokio::task::spawn_blocking(move || blur_image_bytes(&data, BLUR_SIGMA))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;
    tokio::fs::write(path, blurred).await?;
    Ok(())
}
