//! Shared application state

use std::sync::Arc;

use obscura_core::Config;
use obscura_storage::Storage;
use obscura_vision::SafetyClassifier;

use crate::analyzer::Analyzer;
use crate::blurrer::Blurrer;

/// Handler state shared across requests. The storage and classifier
/// clients are injected so tests can wire in local backends.
pub struct AppState {
    pub config: Config,
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        classifier: Arc<dyn SafetyClassifier>,
    ) -> Self {
        let blurrer = Blurrer::new(storage, config.staging_root());
        let analyzer = Analyzer::new(classifier, blurrer, config.blurred_bucket.clone());
        Self { config, analyzer }
    }
}
