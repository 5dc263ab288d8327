//! Image decoding WASM bindings.
//!
//! This module exposes the uploadease-core decoding functions to JavaScript:
//! decoding user-selected files, reading dimensions, and aspect-preserving
//! resizing.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode an image file (PNG, JPEG, WebP, GIF) from bytes
//! - [`image_dimensions`] - Decode just far enough to report dimensions
//! - [`fit_dimensions`] - Compute the aspect-fit dimensions for a bounding box
//! - [`resize_to_fit`] - Resize an image to fit a bounding box, preserving aspect ratio
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_to_fit } from '@uploadease/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const preview = resize_to_fit(image, 800, 600, 1); // Bilinear
//! ```

use crate::types::{filter_from_u8, JsSourceImage};
use serde::Serialize;
use uploadease_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image file from bytes.
///
/// Supports PNG, JPEG, WebP, and GIF input; the format is sniffed from the
/// bytes, never from the filename. EXIF orientation correction is applied
/// automatically to JPEG input.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes as a `Uint8Array`
///
/// # Errors
///
/// Returns an error if the bytes are not a recognized raster image or the
/// file is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsSourceImage::from_source)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Dimensions {
    width: u32,
    height: u32,
    aspect_ratio: f64,
}

/// Decode an image and report its dimensions and aspect ratio.
///
/// Returns a plain object `{ width, height, aspectRatio }`. Used by the
/// popup to show file info before the user picks processing options.
#[wasm_bindgen]
pub fn image_dimensions(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let image = decode::decode_image(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let dims = Dimensions {
        width: image.width,
        height: image.height,
        aspect_ratio: image.aspect_ratio(),
    };
    serde_wasm_bindgen::to_value(&dims).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute the largest dimensions that fit within a bounding box while
/// preserving the source aspect ratio.
///
/// Returns a two-element array `[width, height]`. Never upscales beyond the
/// box; both axes are at least 1 for a non-empty source.
#[wasm_bindgen]
pub fn fit_dimensions(
    src_width: u32,
    src_height: u32,
    max_width: u32,
    max_height: u32,
) -> Vec<u32> {
    let (width, height) = decode::fit_dimensions(src_width, src_height, max_width, max_height);
    vec![width, height]
}

/// Resize an image to fit within a bounding box, preserving aspect ratio.
///
/// If the image already fits, it is returned unchanged (no upscaling).
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `max_width` - Bounding box width in pixels
/// * `max_height` - Bounding box height in pixels
/// * `filter` - Resize algorithm: 0=Nearest, 1=Bilinear (default), 2=Lanczos3
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsSourceImage,
    max_width: u32,
    max_height: u32,
    filter: u8,
) -> Result<JsSourceImage, JsValue> {
    let filter_type = filter_from_u8(filter);

    decode::resize_to_fit(image.as_source(), max_width, max_height, filter_type)
        .map(JsSourceImage::from_source)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_image_invalid() {
        let result = decode_image(&[0, 1, 2, 3]);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_image_empty() {
        let result = decode_image(&[]);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_image_dimensions_invalid() {
        let result = image_dimensions(&[0, 1, 2, 3]);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_resize_to_fit_shrinks_landscape() {
        let img = JsSourceImage::new(200, 100, vec![128u8; 200 * 100 * 3]);

        let resized = resize_to_fit(&img, 100, 100, 1).unwrap();
        assert_eq!(resized.width(), 100);
        assert_eq!(resized.height(), 50);
    }

    #[wasm_bindgen_test]
    fn test_resize_to_fit_never_upscales() {
        let img = JsSourceImage::new(50, 50, vec![128u8; 50 * 50 * 3]);

        let resized = resize_to_fit(&img, 200, 200, 1).unwrap();
        assert_eq!(resized.width(), 50);
        assert_eq!(resized.height(), 50);
    }

    #[wasm_bindgen_test]
    fn test_filter_values() {
        let img = JsSourceImage::new(100, 100, vec![128u8; 100 * 100 * 3]);

        assert!(resize_to_fit(&img, 50, 50, 0).is_ok()); // Nearest
        assert!(resize_to_fit(&img, 50, 50, 1).is_ok()); // Bilinear
        assert!(resize_to_fit(&img, 50, 50, 2).is_ok()); // Lanczos3
        assert!(resize_to_fit(&img, 50, 50, 99).is_ok()); // Unknown -> Bilinear
    }
}
