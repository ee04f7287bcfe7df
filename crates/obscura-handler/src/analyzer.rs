//! Content-safety analysis
//!
//! One invocation per finalized-object event: ask the classifier about
//! the stored image, then either leave it alone or hand it to the
//! blurrer. Classifier failures are swallowed so a flaky vision backend
//! cannot take down ingestion; the object simply stays unmoderated until
//! the event is redelivered.

use std::sync::Arc;

use obscura_core::{PipelineError, StorageEvent};
use obscura_vision::SafetyClassifier;

use crate::blurrer::Blurrer;

/// How an invocation ended. Non-fatal conditions are outcomes, not
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Annotation came back inoffensive; the object was left untouched.
    Clean,
    /// Offensive content detected; a blurred copy was uploaded.
    Blurred,
    /// The classifier returned no annotation for the object.
    Missing,
    /// The classifier call failed; the object was left untouched.
    Skipped,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Clean => "clean",
            Outcome::Blurred => "blurred",
            Outcome::Missing => "missing",
            Outcome::Skipped => "skipped",
        }
    }
}

/// Decides, per stored object, whether a blurred copy is needed.
#[derive(Clone)]
pub struct Analyzer {
    classifier: Arc<dyn SafetyClassifier>,
    blurrer: Blurrer,
    blurred_bucket: String,
}

impl Analyzer {
    pub fn new(
        classifier: Arc<dyn SafetyClassifier>,
        blurrer: Blurrer,
        blurred_bucket: String,
    ) -> Self {
        Self {
            classifier,
            blurrer,
            blurred_bucket,
        }
    }

    /// Classify one stored object and blur it if offensive.
    ///
    /// Only download and upload failures surface as errors; everything
    /// else resolves to an [`Outcome`].
    pub async fn analyze(&self, event: &StorageEvent) -> Result<Outcome, PipelineError> {
        let handle = event.handle();
        let locator = handle.locator();
        tracing::info!("Analyzing {}", locator);

        let annotation = match self.classifier.classify(&locator).await {
            Ok(Some(annotation)) => annotation,
            Ok(None) => {
                tracing::warn!("Could not find {}", locator);
                return Ok(Outcome::Missing);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to analyze {}", event.name);
                return Ok(Outcome::Skipped);
            }
        };

        if annotation.is_offensive() {
            tracing::info!("Detected {} as inappropriate.", event.name);
            self.blurrer
                .blur_and_upload(&handle, &self.blurred_bucket)
                .await?;
            Ok(Outcome::Blurred)
        } else {
            tracing::info!("Detected {} as OK.", event.name);
            Ok(Outcome::Clean)
        }
    }
}
