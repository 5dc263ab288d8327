//! Constraint validation WASM bindings.
//!
//! The content script scrapes upload constraints off the page and hands them
//! to these bindings as plain objects; the popup gets back either a
//! validation report or a ready-to-run encoding request.

use crate::types::JsSourceImage;
use uploadease_core::constraints::{self, ConstraintSet, DetectedField};
use uploadease_core::settings::ProcessingSettings;
use wasm_bindgen::prelude::*;

/// Check a decoded image against a constraint set.
///
/// # Arguments
///
/// * `image` - The decoded source image
/// * `constraints` - A plain object: `{ maxWidth?, minWidth?, maxHeight?,
///   minHeight?, maxSize?, minSize? }`
///
/// # Returns
///
/// A plain object `{ valid, violations }` where `violations` is an array of
/// human-readable messages, one per violated bound. Purely diagnostic: the
/// image is never modified.
#[wasm_bindgen]
pub fn validate_constraints(image: &JsSourceImage, constraints: JsValue) -> Result<JsValue, JsValue> {
    let set: ConstraintSet =
        serde_wasm_bindgen::from_value(constraints).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let report = constraints::validate_constraints(image.as_source(), &set);
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Merge a detected field's constraints over the user's default settings to
/// produce the encoding request the pipeline will run.
///
/// # Arguments
///
/// * `field` - A plain object: `{ allowedTypes?, maxSizeBytes?,
///   minSizeBytes?, dimensionConstraint? }`
/// * `settings` - A plain object: `{ defaultFormat?, defaultWidth?,
///   defaultHeight?, defaultQuality?, highQualityResize? }`
///
/// # Returns
///
/// The merged encoding request as a plain object, suitable for passing
/// straight to `process_image` or `process_file`.
#[wasm_bindgen]
pub fn request_for_field(field: JsValue, settings: JsValue) -> Result<JsValue, JsValue> {
    let field: DetectedField =
        serde_wasm_bindgen::from_value(field).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let settings: ProcessingSettings =
        serde_wasm_bindgen::from_value(settings).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let request = field.to_request(&settings);
    serde_wasm_bindgen::to_value(&request).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Format a byte count for display ("1.5 MB", "892 KB", "0 Bytes").
#[wasm_bindgen]
pub fn format_file_size(bytes: u64) -> String {
    constraints::format_file_size(bytes)
}
