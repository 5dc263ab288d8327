//! UploadEase WASM - WebAssembly bindings for UploadEase
//!
//! This crate provides WASM bindings to expose the uploadease-core
//! functionality to the extension's JavaScript.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image and result data
//! - `decode` - Image decoding bindings (decode, dimensions, aspect-fit resize)
//! - `encode` - Processing pipeline bindings (constraint-driven re-encoding)
//! - `constraints` - Field constraint validation and request merging
//!
//! # Usage
//!
//! ```typescript
//! import init, { process_file } from '@uploadease/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = process_file(bytes, { format: 'jpeg', maxSizeBytes: 500_000 });
//! ```

use wasm_bindgen::prelude::*;

mod constraints;
mod decode;
mod encode;
mod types;

// Re-export public types
pub use constraints::{format_file_size, request_for_field, validate_constraints};
pub use decode::{decode_image, fit_dimensions, image_dimensions, resize_to_fit};
pub use encode::{process_file, process_image, processed_filename};
pub use types::{JsEncodingResult, JsSourceImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
