//! Google Cloud Vision SafeSearch adapter.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;
use tracing::debug;

use obscura_core::{Config, SafetyAnnotation};

use crate::classifier::{SafetyClassifier, VisionError, VisionResult};

/// Client for the Google Cloud Vision `images:annotate` endpoint.
///
/// The base URL is injectable so tests can point the client at a local
/// mock server. Only the SAFE_SEARCH_DETECTION feature is requested, and
/// the image is referenced by its storage locator rather than inlined.
pub struct GoogleVisionClient {
    http_client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl Debug for GoogleVisionClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GoogleVisionClient")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl GoogleVisionClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> VisionResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                VisionError::Config(format!("Failed to create HTTP client for vision API: {}", e))
            })?;

        let api_url = api_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            api_url,
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> VisionResult<Self> {
        Self::new(
            &config.vision_api_url,
            &config.vision_api_key,
            config.vision_timeout(),
        )
    }
}

#[async_trait]
impl SafetyClassifier for GoogleVisionClient {
    async fn classify(&self, locator: &str) -> VisionResult<Option<SafetyAnnotation>> {
        let url = format!("{}/v1/images:annotate?key={}", self.api_url, self.api_key);

        let request_body = json!({
            "requests": [{
                "image": {
                    "source": {
                        "imageUri": locator
                    }
                },
                "features": [{
                    "type": "SAFE_SEARCH_DETECTION"
                }]
            }]
        });

        debug!(locator = %locator, "Requesting SafeSearch annotation");

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| VisionError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VisionError::Status(format!("{} - {}", status, error_text)));
        }

        let annotate_response: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| VisionError::Decode(e.to_string()))?;

        let first = match annotate_response
            .responses
            .unwrap_or_default()
            .into_iter()
            .next()
        {
            Some(first) => first,
            None => return Ok(None),
        };

        if let Some(error) = first.error {
            let code = error.code.unwrap_or_default();
            let message = error
                .message
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(VisionError::Api(format!("{} - {}", code, message)));
        }

        if let Some(annotation) = &first.safe_search_annotation {
            debug!(
                locator = %locator,
                adult = %annotation.adult,
                violence = %annotation.violence,
                "SafeSearch annotation received"
            );
        }

        Ok(first.safe_search_annotation)
    }
}

// Vision API response types. Fields the handler never reads are omitted;
// unknown fields are ignored by serde.
#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    responses: Option<Vec<ImageResponse>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    safe_search_annotation: Option<SafetyAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    code: Option<i32>,
    message: Option<String>,
}
