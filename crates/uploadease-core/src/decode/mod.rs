//! Image decoding pipeline for UploadEase.
//!
//! This module provides functionality for:
//! - Decoding user-selected raster files (PNG, JPEG, WebP, GIF)
//! - EXIF orientation correction for JPEG input
//! - Resampling and aspect-fit dimension math
//!
//! # Architecture
//!
//! The decoding pipeline is designed to be used from the extension popup via
//! WASM bindings. All operations are synchronous and single-threaded within
//! WASM; each request owns its decoded bitmap exclusively.

mod raster;
mod resize;
mod types;

pub use raster::decode_image;
pub use resize::{fit_dimensions, resize, resize_to_fit};
pub use types::{DecodeError, FilterType, Orientation, SourceImage};
