use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

/// Blur strength applied to flagged images. Matches ImageMagick's
/// `blurImage(0, 16)`: radius 0 derives the kernel from sigma, so sigma
/// is the only parameter that matters.
pub const BLUR_SIGMA: f32 = 16.0;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Unrecognized image format")]
    UnknownFormat,
}

/// Apply a Gaussian blur to an encoded image buffer.
///
/// The output is re-encoded in the input's own format, so a JPEG stays a
/// JPEG and a PNG stays a PNG. Dimensions are unchanged.
pub fn blur_image_bytes(data: &[u8], sigma: f32) -> Result<Vec<u8>, ProcessingError> {
    let reader = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProcessingError::Decode(e.to_string()))?;

    let format = reader.format().ok_or(ProcessingError::UnknownFormat)?;

    let img = reader
        .decode()
        .map_err(|e| ProcessingError::Decode(e.to_string()))?;

    debug!(
        format = ?format,
        width = img.width(),
        height = img.height(),
        sigma = sigma,
        "Applying Gaussian blur"
    );

    // Blur in the source color type: the JPEG encoder rejects RGBA buffers.
    let blurred = img.blur(sigma);

    let mut buffer = Vec::with_capacity(data.len());
    let mut cursor = Cursor::new(&mut buffer);
    blurred
        .write_to(&mut cursor, format)
        .map_err(|e| ProcessingError::Encode(e.to_string()))?;

    Ok(buffer)
}

/// MIME type of an encoded image buffer, by magic-byte sniffing.
pub fn detect_content_type(data: &[u8]) -> Option<&'static str> {
    image::guess_format(data).ok().map(|f| f.to_mime_type())
}
