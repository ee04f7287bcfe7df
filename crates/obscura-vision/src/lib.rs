//! Content-safety classification backends.
//!
//! The handler talks to the [`SafetyClassifier`] trait only; the concrete
//! Google Cloud Vision adapter lives in [`google`]. Classification runs
//! against the stored object's locator, so no image bytes move through
//! this crate.

pub mod classifier;
pub mod google;

pub use classifier::{SafetyClassifier, VisionError};
pub use google::GoogleVisionClient;
