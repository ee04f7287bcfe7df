//! Obscura Storage Library
//!
//! This crate provides the storage abstraction used by the blur pipeline
//! and implementations for S3-compatible object stores and the local
//! filesystem. Unlike a single-bucket store, every operation addresses an
//! explicit `(bucket, key)` pair: the pipeline reads from the bucket named
//! by the trigger event and writes to the configured destination bucket.
//!
//! Keys must not contain `..` or a leading `/`; the local backend enforces
//! this before touching the filesystem.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use obscura_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
