//! Configuration module
//!
//! This module provides the environment-driven configuration for the blur
//! service: destination bucket, vision API access, storage backend
//! selection, staging location, and the optional log sink.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::storage_types::StorageBackend;

// Common constants
const DEFAULT_SERVER_PORT: &str = "8080";
const DEFAULT_VISION_API_URL: &str = "https://vision.googleapis.com";
const DEFAULT_VISION_TIMEOUT_SECS: u64 = 60;

/// Handler configuration, loaded once at startup and injected everywhere.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    /// Destination bucket for blurred copies. Must differ from the bucket
    /// the trigger watches, or every upload would re-trigger the handler.
    pub blurred_bucket: String,
    /// Bucket the trigger is bound to, when known. Only used to validate
    /// the destination bucket.
    pub trigger_bucket: Option<String>,
    /// Optional log sink file; default is stderr.
    pub log_output_path: Option<String>,
    // Vision classifier configuration
    pub vision_api_key: String,
    pub vision_api_url: String,
    pub vision_timeout_seconds: u64,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub local_storage_path: Option<String>,
    /// Parent directory for per-invocation staging directories; default is
    /// the system temp dir.
    pub staging_root: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .parse::<StorageBackend>()?;

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            blurred_bucket: env::var("BLURRED_BUCKET_NAME").map_err(|_| {
                anyhow::anyhow!("BLURRED_BUCKET_NAME must be set to the bucket for blurred copies")
            })?,
            trigger_bucket: env::var("TRIGGER_BUCKET_NAME")
                .ok()
                .filter(|s| !s.is_empty()),
            log_output_path: env::var("LOG_OUTPUT_PATH").ok().filter(|s| !s.is_empty()),
            vision_api_key: env::var("VISION_API_KEY")
                .map_err(|_| anyhow::anyhow!("VISION_API_KEY must be set"))?,
            vision_api_url: env::var("VISION_API_URL")
                .unwrap_or_else(|_| DEFAULT_VISION_API_URL.to_string()),
            vision_timeout_seconds: env::var("VISION_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_VISION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_VISION_TIMEOUT_SECS),
            storage_backend,
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok()
                .filter(|s| !s.is_empty()),
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok().filter(|s| !s.is_empty()),
            staging_root: env::var("STAGING_ROOT").ok().filter(|s| !s.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.blurred_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("BLURRED_BUCKET_NAME cannot be empty"));
        }

        if let Some(trigger_bucket) = &self.trigger_bucket {
            if trigger_bucket == &self.blurred_bucket {
                return Err(anyhow::anyhow!(
                    "BLURRED_BUCKET_NAME must differ from TRIGGER_BUCKET_NAME: uploading blurred \
                     copies into the trigger bucket would re-trigger the handler"
                ));
            }
        }

        if self.vision_api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("VISION_API_KEY cannot be empty"));
        }

        if self.vision_timeout_seconds == 0 {
            return Err(anyhow::anyhow!(
                "VISION_TIMEOUT_SECONDS must be greater than zero"
            ));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn vision_timeout(&self) -> Duration {
        Duration::from_secs(self.vision_timeout_seconds)
    }

    /// Parent directory under which per-invocation staging directories are
    /// created.
    pub fn staging_root(&self) -> PathBuf {
        self.staging_root
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir)
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 8080,
            environment: "development".to_string(),
            blurred_bucket: "blurred-bucket".to_string(),
            trigger_bucket: None,
            log_output_path: None,
            vision_api_key: "test-key".to_string(),
            vision_api_url: DEFAULT_VISION_API_URL.to_string(),
            vision_timeout_seconds: DEFAULT_VISION_TIMEOUT_SECS,
            storage_backend: StorageBackend::Local,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: Some("/var/lib/obscura".to_string()),
            staging_root: None,
        }
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_destination_bucket_must_differ_from_trigger_bucket() {
        let mut config = base_config();
        config.trigger_bucket = Some("blurred-bucket".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("re-trigger"));

        config.trigger_bucket = Some("uploads".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_s3_backend_requires_region() {
        let mut config = base_config();
        config.storage_backend = StorageBackend::S3;
        assert!(config.validate().is_err());

        config.s3_region = Some("us-east-1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_local_backend_requires_path() {
        let mut config = base_config();
        config.local_storage_path = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_vision_api_key_rejected() {
        let mut config = base_config();
        config.vision_api_key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!("s3".parse::<StorageBackend>().unwrap(), StorageBackend::S3);
        assert_eq!(
            "LOCAL".parse::<StorageBackend>().unwrap(),
            StorageBackend::Local
        );
        assert!("nfs".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_vision_timeout_duration() {
        let mut config = base_config();
        config.vision_timeout_seconds = 5;
        assert_eq!(config.vision_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_staging_root_defaults_to_system_temp() {
        let config = base_config();
        assert_eq!(config.staging_root(), std::env::temp_dir());

        let mut config = base_config();
        config.staging_root = Some("/srv/staging".to_string());
        assert_eq!(config.staging_root(), PathBuf::from("/srv/staging"));
    }
}
