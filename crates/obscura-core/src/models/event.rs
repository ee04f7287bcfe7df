use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Storage notification delivered by the trigger infrastructure as a
/// CloudEvent in structured content mode (JSON body, envelope fields at
/// the top level, storage record under `data`).
///
/// Finalized-object events carry `type` =
/// `google.cloud.storage.object.v1.finalized`; the handler does not filter
/// on it — the trigger binding owns event selection.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudEventEnvelope {
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(rename = "specversion", default)]
    pub spec_version: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StorageEvent,
}

/// The storage record inside a finalized-object event. Immutable,
/// externally produced, consumed once per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageEvent {
    pub bucket: String,
    pub name: String,
    #[serde(default)]
    pub metageneration: Option<String>,
    #[serde(default)]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

impl StorageEvent {
    /// Reference to the object this event describes.
    pub fn handle(&self) -> ObjectHandle {
        ObjectHandle::new(&self.bucket, &self.name)
    }

    /// The event is unusable without a bucket and an object name.
    pub fn validate(&self) -> Result<(), crate::error::PipelineError> {
        if self.bucket.trim().is_empty() {
            return Err(crate::error::PipelineError::InvalidEvent(
                "missing data.bucket".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(crate::error::PipelineError::InvalidEvent(
                "missing data.name".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reference to a bucket+name pair. Holding one does not imply ownership
/// of the object's bytes; those exist locally only between download and
/// staging cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHandle {
    pub bucket: String,
    pub name: String,
}

impl ObjectHandle {
    pub fn new(bucket: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            name: name.into(),
        }
    }

    /// Canonical locator string, used for classifier requests and log
    /// lines.
    pub fn locator(&self) -> String {
        format!("gs://{}/{}", self.bucket, self.name)
    }

    /// Final non-empty path segment of the object name, used to name the
    /// staged working file. Object names may contain `/` separators.
    pub fn base_name(&self) -> &str {
        self.name
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("object")
    }
}

impl Display for ObjectHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "gs://{}/{}", self.bucket, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Envelope shape as the storage trigger emits it.
    const FINALIZED_EVENT: &str = r#"{
        "id": "5e9f24a",
        "source": "storage.googleapis.com",
        "specversion": "1.0",
        "type": "google.cloud.storage.object.v1.finalized",
        "data": {
            "bucket": "my-uploads",
            "metageneration": "1",
            "name": "zombie.jpg",
            "timeCreated": "2020-04-23T07:38:57.230Z",
            "updated": "2020-04-23T07:38:57.230Z"
        }
    }"#;

    #[test]
    fn test_deserialize_finalized_event() {
        let envelope: CloudEventEnvelope = serde_json::from_str(FINALIZED_EVENT).unwrap();
        assert_eq!(envelope.id, "5e9f24a");
        assert_eq!(envelope.event_type, "google.cloud.storage.object.v1.finalized");
        assert_eq!(envelope.data.bucket, "my-uploads");
        assert_eq!(envelope.data.name, "zombie.jpg");
        assert_eq!(envelope.data.metageneration.as_deref(), Some("1"));
        assert!(envelope.data.time_created.is_some());
    }

    #[test]
    fn test_envelope_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "1",
            "type": "google.cloud.storage.object.v1.finalized",
            "data": {"bucket": "b", "name": "n.png"}
        }"#;
        let envelope: CloudEventEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.source.is_empty());
        assert!(envelope.data.metageneration.is_none());
        assert!(envelope.data.validate().is_ok());
    }

    #[test]
    fn test_event_without_data_is_rejected() {
        let json = r#"{"id": "1", "type": "google.cloud.storage.object.v1.finalized"}"#;
        assert!(serde_json::from_str::<CloudEventEnvelope>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_bucket_and_name() {
        let event = StorageEvent {
            bucket: "".to_string(),
            name: "puppies.jpg".to_string(),
            metageneration: None,
            time_created: None,
            updated: None,
        };
        assert!(event.validate().is_err());

        let event = StorageEvent {
            bucket: "my-uploads".to_string(),
            name: "  ".to_string(),
            metageneration: None,
            time_created: None,
            updated: None,
        };
        assert!(event.validate().is_err());
    }

    #[test]
    fn test_locator_format() {
        let handle = ObjectHandle::new("my-uploads", "zombie.jpg");
        assert_eq!(handle.locator(), "gs://my-uploads/zombie.jpg");
        assert_eq!(handle.to_string(), "gs://my-uploads/zombie.jpg");
    }

    #[test]
    fn test_base_name_strips_prefixes() {
        assert_eq!(ObjectHandle::new("b", "zombie.jpg").base_name(), "zombie.jpg");
        assert_eq!(
            ObjectHandle::new("b", "2020/04/zombie.jpg").base_name(),
            "zombie.jpg"
        );
    }
}
