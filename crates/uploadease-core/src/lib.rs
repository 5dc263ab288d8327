//! UploadEase Core - image processing library
//!
//! Pure image processing for constraint-driven uploads: decoding user files,
//! resizing, and re-encoding to a target format with a bounded quality
//! search that brings the output within byte-size bounds.
//!
//! This crate is platform-agnostic; the WASM bindings live in
//! `uploadease-wasm`.

pub mod constraints;
pub mod decode;
pub mod encode;
pub mod pipeline;
pub mod settings;

pub use constraints::{
    format_file_size, validate_constraints, ConstraintSet, DetectedField, DimensionConstraint,
    ValidationReport,
};
pub use decode::{
    decode_image, fit_dimensions, resize, resize_to_fit, DecodeError, FilterType, SourceImage,
};
pub use encode::{encode_frame, encode_jpeg, encode_png, encode_webp, EncodeError};
pub use pipeline::{
    parse_format, process_bytes, process_image, processed_filename, ProcessError,
};
pub use settings::ProcessingSettings;

use serde::{Deserialize, Serialize};

/// Output format for a processing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    #[default]
    Png,
    Jpeg,
    #[serde(rename = "webp")]
    WebP,
}

impl TargetFormat {
    /// Parse a format from its short name or MIME type. Returns `None` for
    /// anything that is not a supported output format.
    pub fn from_name(name: &str) -> Option<TargetFormat> {
        match name.trim().to_ascii_lowercase().as_str() {
            "png" | "image/png" => Some(TargetFormat::Png),
            "jpeg" | "jpg" | "image/jpeg" => Some(TargetFormat::Jpeg),
            "webp" | "image/webp" => Some(TargetFormat::WebP),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            TargetFormat::Png => "image/png",
            TargetFormat::Jpeg => "image/jpeg",
            TargetFormat::WebP => "image/webp",
        }
    }

    /// Filename extension used for downloads.
    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Png => "png",
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::WebP => "webp",
        }
    }

    /// Whether the format has a meaningful quality parameter. The size
    /// search only runs for lossy formats.
    pub fn is_lossy(self) -> bool {
        matches!(self, TargetFormat::Jpeg | TargetFormat::WebP)
    }
}

/// A single processing request: target format, optional output dimensions,
/// optional byte-size bounds, and the starting quality factor.
///
/// Dimensions default to the source image's independently per axis.
/// `quality` is a unit factor in [0, 1]; the pipeline clamps it to the
/// effective [0.1, 1.0] range before encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncodingRequest {
    pub format: TargetFormat,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub max_size_bytes: Option<u64>,
    pub min_size_bytes: Option<u64>,
    pub quality: f32,
    /// Use the slower Lanczos3 filter for resizing instead of bilinear.
    pub high_quality_resize: bool,
    /// Error with [`ProcessError::ConstraintUnsatisfiable`] instead of
    /// returning a best-effort result when a size bound cannot be met.
    pub strict: bool,
}

impl Default for EncodingRequest {
    fn default() -> Self {
        EncodingRequest {
            format: TargetFormat::Png,
            width: None,
            height: None,
            max_size_bytes: None,
            min_size_bytes: None,
            quality: 0.9,
            high_quality_resize: false,
            strict: false,
        }
    }
}

impl EncodingRequest {
    pub fn new(format: TargetFormat) -> Self {
        EncodingRequest {
            format,
            ..EncodingRequest::default()
        }
    }

    /// The resampling filter this request asks for.
    pub fn filter(&self) -> FilterType {
        if self.high_quality_resize {
            FilterType::Lanczos3
        } else {
            FilterType::Bilinear
        }
    }
}

/// The outcome of a processing request: the encoded bytes plus the quality
/// the search settled on.
#[derive(Debug, Clone)]
pub struct EncodingResult {
    pub bytes: Vec<u8>,
    /// Effective quality of the final encode, within [0.1, 1.0].
    pub quality: f32,
    pub format: TargetFormat,
}

impl EncodingResult {
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}
