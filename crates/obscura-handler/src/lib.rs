//! Obscura Handler
//!
//! HTTP surface and moderation pipeline of the blur service. The handler
//! receives finalized-object storage events as CloudEvents, asks the
//! vision backend for a safe-search annotation, and rewrites offensive
//! images as blurred copies in the destination bucket. Non-fatal
//! conditions (missing annotation, classifier failure, blur failure) are
//! logged and reported as outcomes; only download and upload failures
//! fail the invocation.

pub mod analyzer;
pub mod blurrer;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
