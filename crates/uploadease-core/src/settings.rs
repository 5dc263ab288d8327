//! User-facing processing defaults.
//!
//! These mirror the options page: a default output format, optional default
//! dimensions, a default quality factor, and the high-quality resize toggle.
//! A [`ProcessingSettings`] turns into the baseline [`EncodingRequest`] that
//! per-field constraints then override.

use serde::{Deserialize, Serialize};

use crate::{EncodingRequest, TargetFormat};

/// Persisted user preferences for processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessingSettings {
    pub default_format: TargetFormat,
    pub default_width: Option<u32>,
    pub default_height: Option<u32>,
    pub default_quality: f32,
    pub high_quality_resize: bool,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        ProcessingSettings {
            default_format: TargetFormat::Png,
            default_width: None,
            default_height: None,
            default_quality: 0.9,
            high_quality_resize: false,
        }
    }
}

impl ProcessingSettings {
    /// Build the baseline request these settings describe.
    pub fn to_request(&self) -> EncodingRequest {
        EncodingRequest {
            format: self.default_format,
            width: self.default_width,
            height: self.default_height,
            quality: self.default_quality,
            high_quality_resize: self.high_quality_resize,
            ..EncodingRequest::default()
        }
    }
}
