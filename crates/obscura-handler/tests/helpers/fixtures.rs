//! Test fixtures

use std::io::Cursor;

use image::{DynamicImage, Rgb, RgbImage};

/// A 32x32 PNG with a hard vertical edge, so a blur measurably changes
/// the pixels near the boundary.
pub fn create_test_png() -> Vec<u8> {
    let img = RgbImage::from_fn(32, 32, |x, _y| {
        if x < 16 {
            Rgb([0u8, 0, 0])
        } else {
            Rgb([255u8, 255, 255])
        }
    });

    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buffer
}

/// Bytes no image decoder accepts.
pub fn create_invalid_image() -> Vec<u8> {
    b"this is not an image at all".to_vec()
}
