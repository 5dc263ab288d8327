//! Processing pipeline WASM bindings.
//!
//! This module exposes the uploadease-core processing pipeline to
//! JavaScript: one call takes a decoded image (or raw file bytes) plus an
//! encoding request and returns the constraint-satisfying output.
//!
//! # Functions
//!
//! - [`process_image`] - Run the pipeline on an already-decoded image
//! - [`process_file`] - Decode raw file bytes and run the pipeline
//! - [`processed_filename`] - Build the download filename for a result
//!
//! # Example
//!
//! ```typescript
//! import { process_file, processed_filename } from '@uploadease/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = process_file(bytes, {
//!   format: 'jpeg',
//!   maxSizeBytes: 500_000,
//!   quality: 0.9,
//! });
//! const blob = new Blob([result.bytes()], { type: result.mime_type });
//! const name = processed_filename(file.name, 'jpeg');
//! ```

use crate::types::{JsEncodingResult, JsSourceImage};
use uploadease_core::{pipeline, EncodingRequest, EncodingResult};
use wasm_bindgen::prelude::*;

fn parse_request(request: JsValue) -> Result<EncodingRequest, JsValue> {
    serde_wasm_bindgen::from_value(request).map_err(|e| JsValue::from_str(&e.to_string()))
}

// In non-strict mode a best-effort result that missed its bound still comes
// back; surface that in the browser console so it isn't silent.
fn warn_if_bound_missed(request: &EncodingRequest, result: &EncodingResult) {
    let len = result.byte_len() as u64;
    if request.max_size_bytes.is_some_and(|max| len > max) {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Could not compress below the maximum size; best effort is {} bytes at quality {:.1}",
            len, result.quality
        )));
    } else if request.min_size_bytes.is_some_and(|min| len < min) {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Could not grow above the minimum size; best effort is {} bytes at quality {:.1}",
            len, result.quality
        )));
    }
}

/// Run the processing pipeline on an already-decoded image.
///
/// # Arguments
///
/// * `image` - The decoded source image
/// * `request` - A plain object deserialized into the encoding request:
///   `{ format, width?, height?, maxSizeBytes?, minSizeBytes?, quality?,
///   highQualityResize?, strict? }`. Missing fields take their defaults.
///
/// # Errors
///
/// Returns an error if the request is invalid, the encoder fails, or
/// `strict` is set and a size bound cannot be met.
#[wasm_bindgen]
pub fn process_image(image: &JsSourceImage, request: JsValue) -> Result<JsEncodingResult, JsValue> {
    let request = parse_request(request)?;
    let result = pipeline::process_image(image.as_source(), &request)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    warn_if_bound_missed(&request, &result);
    Ok(JsEncodingResult::from_result(result))
}

/// Decode raw file bytes and run the processing pipeline in one call.
///
/// This is the shape the popup uses: the user's file bytes in, an encoded
/// buffer out.
#[wasm_bindgen]
pub fn process_file(bytes: &[u8], request: JsValue) -> Result<JsEncodingResult, JsValue> {
    let request = parse_request(request)?;
    let result = pipeline::process_bytes(bytes, &request)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    warn_if_bound_missed(&request, &result);
    Ok(JsEncodingResult::from_result(result))
}

/// Build the download filename for a processed file:
/// `processed_<original-stem>.<target-extension>`.
///
/// # Errors
///
/// Returns an error if `format` is not a supported output format name.
#[wasm_bindgen]
pub fn processed_filename(original: &str, format: &str) -> Result<String, JsValue> {
    let format = pipeline::parse_format(format).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(pipeline::processed_filename(original, format))
}
