use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use obscura_core::StorageBackend;

/// S3 storage implementation
///
/// One client serves all buckets; the caller names the bucket per
/// operation.
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub async fn new(region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        let region_provider = RegionProviderChain::first_try(aws_config::Region::new(region));

        // No SDK-level retries: failures are terminal per invocation and
        // redelivery belongs to the trigger infrastructure.
        let retry_config = RetryConfig::disabled();

        let config_builder = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .retry_config(retry_config.clone());

        let config = config_builder.load().await;

        // Configure S3 client with custom endpoint if provided (for S3-compatible providers)
        let client = if let Some(ref endpoint) = endpoint_url {
            let mut s3_config_builder = aws_sdk_s3::Config::builder()
                .endpoint_url(endpoint)
                .region(config.region().cloned())
                .retry_config(retry_config);
            if let Some(provider) = config.credentials_provider().into_iter().next() {
                s3_config_builder = s3_config_builder.credentials_provider(provider);
            }
            // Path-style addressing is required by MinIO and most
            // S3-compatible providers.
            s3_config_builder = s3_config_builder.force_path_style(true);

            Client::from_conf(s3_config_builder.build())
        } else {
            Client::new(&config)
        };

        Ok(S3Storage { client })
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match &e {
                SdkError::ServiceError(service_err) => match service_err.err() {
                    GetObjectError::NoSuchKey(_) => {
                        StorageError::NotFound(format!("{}/{}", bucket, key))
                    }
                    _ => {
                        tracing::error!(
                            error = %e,
                            bucket = %bucket,
                            key = %key,
                            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                            "S3 download failed"
                        );
                        StorageError::DownloadFailed(e.to_string())
                    }
                },
                _ => {
                    tracing::error!(
                        error = %e,
                        bucket = %bucket,
                        key = %key,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "S3 download failed"
                    );
                    StorageError::DownloadFailed(e.to_string())
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        let bytes = data.into_bytes().to_vec();
        let size = bytes.len() as u64;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(bytes)
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        let size = data.len() as u64;
        let body = ByteStream::from(Bytes::from(data));

        let start = std::time::Instant::now();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        match self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), HeadObjectError::NotFound(_)) =>
            {
                Ok(false)
            }
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
