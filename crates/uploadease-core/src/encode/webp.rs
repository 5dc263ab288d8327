//! Lossy WebP encoding via libwebp.
//!
//! The `image` crate only writes lossless WebP, which would make the quality
//! search a no-op for this format, so the libwebp bindings are used instead.

use super::{validate_frame, EncodeError};

/// Encode RGB pixel data to lossy WebP bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - WebP quality (0-100, where 100 is highest quality)
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    validate_frame(pixels, width, height)?;

    let quality = quality.clamp(0.0, 100.0);

    let encoder = webp::Encoder::from_rgb(pixels, width, height);
    let memory = encoder
        .encode_simple(false, quality)
        .map_err(|e| EncodeError::EncodingFailed(format!("{:?}", e)))?;

    Ok(memory.to_vec())
}
