//! WASM-compatible wrapper types for image and result data.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! UploadEase types, handling the conversion between Rust and JavaScript
//! data representations.

use uploadease_core::decode::{FilterType, SourceImage};
use uploadease_core::EncodingResult;
use wasm_bindgen::prelude::*;

/// A decoded source image wrapper for JavaScript.
///
/// Wraps the core `SourceImage` type and provides a JavaScript-friendly
/// interface for accessing image dimensions, pixel data, and the original
/// file metadata recorded at decode time.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`. The `free()` method can be
/// called to explicitly release WASM memory, but this is optional as
/// wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsSourceImage {
    inner: SourceImage,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Create a new JsSourceImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsSourceImage {
        JsSourceImage {
            inner: SourceImage::new(width, height, pixels, 0, ""),
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Byte size of the original file this image was decoded from.
    #[wasm_bindgen(getter)]
    pub fn source_size(&self) -> usize {
        self.inner.source_size
    }

    /// MIME type of the original file this image was decoded from.
    #[wasm_bindgen(getter)]
    pub fn source_mime(&self) -> String {
        self.inner.source_mime.clone()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional - wasm-bindgen's finalizer handles cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsSourceImage {
    pub(crate) fn from_source(inner: SourceImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_source(&self) -> &SourceImage {
        &self.inner
    }
}

/// The outcome of a processing call, exposed to JavaScript.
///
/// Carries the encoded bytes plus the quality the size search settled on, so
/// the popup can report what was actually produced.
#[wasm_bindgen]
pub struct JsEncodingResult {
    inner: EncodingResult,
}

#[wasm_bindgen]
impl JsEncodingResult {
    /// The encoded file bytes as a Uint8Array (copied to JS memory).
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.inner.bytes.as_slice())
    }

    /// Length of the encoded buffer in bytes.
    #[wasm_bindgen(getter)]
    pub fn byte_len(&self) -> usize {
        self.inner.byte_len()
    }

    /// Effective quality of the final encode, within [0.1, 1.0].
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.inner.quality
    }

    /// MIME type of the encoded bytes, for building the output Blob.
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }
}

impl JsEncodingResult {
    pub(crate) fn from_result(inner: EncodingResult) -> Self {
        Self { inner }
    }

    pub(crate) fn as_result(&self) -> &EncodingResult {
        &self.inner
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear, // Default
    }
}
