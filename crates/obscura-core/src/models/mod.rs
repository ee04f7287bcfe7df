//! Data models for the blur pipeline
//!
//! The trigger-side event shapes and the classifier-side annotation
//! shapes. Both are wire types: externally produced, consumed once, never
//! persisted.

pub mod event;
pub mod safety;

// Re-export all models for convenient imports
pub use event::*;
pub use safety::*;
