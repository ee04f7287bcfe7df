//! Image transforms for quarantined content.
//!
//! One transform lives here: a heavy Gaussian blur applied to images the
//! classifier flags. Buffers go in encoded and come out encoded in the
//! same format, so callers never touch pixel data.

pub mod blur;

pub use blur::{blur_image_bytes, detect_content_type, ProcessingError, BLUR_SIGMA};
