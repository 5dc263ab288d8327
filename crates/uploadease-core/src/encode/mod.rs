//! Image encoding for the processing pipeline.
//!
//! This module provides the per-format encode primitives:
//! - JPEG and PNG via the `image` crate's encoders
//! - Lossy WebP via libwebp (`webp` crate), since the `image` crate only
//!   writes lossless WebP and the quality parameter must be meaningful
//!
//! Each call takes an RGB pixel buffer and returns a fresh byte buffer; no
//! encoder state is shared between calls.

mod jpeg;
mod png;
mod webp;

pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use self::webp::encode_webp;

use thiserror::Error;

use crate::TargetFormat;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The platform encoder could not produce a buffer. Non-retryable.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Validate an RGB pixel buffer against the claimed dimensions.
pub(crate) fn validate_frame(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}

/// Encode an RGB frame to the target format at a unit quality factor.
///
/// `quality` is the [0, 1] factor from the encoding request; it is mapped
/// onto each encoder's native scale here. Lossless formats ignore it.
pub fn encode_frame(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: TargetFormat,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        TargetFormat::Png => encode_png(pixels, width, height),
        TargetFormat::Jpeg => {
            let q = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
            encode_jpeg(pixels, width, height, q)
        }
        TargetFormat::WebP => {
            let q = (quality * 100.0).clamp(1.0, 100.0);
            encode_webp(pixels, width, height, q)
        }
    }
}
