//! Upload constraint detection support and pre-flight validation.
//!
//! A [`DetectedField`] is what the content script scrapes off a page's file
//! input: accepted MIME types, byte-size bounds, and an optional exact
//! dimension requirement. [`validate_constraints`] runs a decoded image
//! against a [`ConstraintSet`] and reports every violation as a
//! human-readable message, so the popup can show users exactly what needs
//! fixing before any processing happens.

use serde::{Deserialize, Serialize};

use crate::decode::SourceImage;
use crate::settings::ProcessingSettings;
use crate::EncodingRequest;

/// Upload constraints scraped from a page's file input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectedField {
    /// Accepted MIME types; empty means the field accepts anything.
    pub allowed_types: Vec<String>,
    pub max_size_bytes: Option<u64>,
    pub min_size_bytes: Option<u64>,
    pub dimension_constraint: Option<DimensionConstraint>,
}

/// Exact output dimensions required by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionConstraint {
    pub width: u32,
    pub height: u32,
}

impl DetectedField {
    /// Whether the field accepts the given MIME type. Non-image types are
    /// never accepted; an empty allow-list accepts any image type.
    pub fn allows_type(&self, mime: &str) -> bool {
        if !mime.starts_with("image/") {
            return false;
        }
        if self.allowed_types.is_empty() {
            return true;
        }
        self.allowed_types.iter().any(|t| t == mime)
    }

    /// Merge this field's constraints over the user's default settings to
    /// produce the request the pipeline will run.
    pub fn to_request(&self, settings: &ProcessingSettings) -> EncodingRequest {
        let mut request = settings.to_request();
        if let Some(dim) = self.dimension_constraint {
            request.width = Some(dim.width);
            request.height = Some(dim.height);
        }
        request.max_size_bytes = self.max_size_bytes;
        request.min_size_bytes = self.min_size_bytes;
        request
    }
}

/// Bounds an image is validated against before processing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConstraintSet {
    pub max_width: Option<u32>,
    pub min_width: Option<u32>,
    pub max_height: Option<u32>,
    pub min_height: Option<u32>,
    pub max_size: Option<u64>,
    pub min_size: Option<u64>,
}

/// The outcome of a validation pass: all violations, not just the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<String>,
}

/// Check a decoded image against a constraint set.
///
/// Purely diagnostic: the image is never modified, and every violated bound
/// contributes its own message. Byte-size bounds are checked against the
/// original file size recorded at decode time.
pub fn validate_constraints(image: &SourceImage, set: &ConstraintSet) -> ValidationReport {
    let mut violations = Vec::new();

    if let Some(max) = set.max_width {
        if image.width > max {
            violations.push(format!("Width {}px exceeds maximum {}px", image.width, max));
        }
    }
    if let Some(min) = set.min_width {
        if image.width < min {
            violations.push(format!("Width {}px below minimum {}px", image.width, min));
        }
    }
    if let Some(max) = set.max_height {
        if image.height > max {
            violations.push(format!(
                "Height {}px exceeds maximum {}px",
                image.height, max
            ));
        }
    }
    if let Some(min) = set.min_height {
        if image.height < min {
            violations.push(format!(
                "Height {}px below minimum {}px",
                image.height, min
            ));
        }
    }

    let size = image.source_size as u64;
    if let Some(max) = set.max_size {
        if size > max {
            violations.push(format!(
                "File size {} exceeds maximum {}",
                format_file_size(size),
                format_file_size(max)
            ));
        }
    }
    if let Some(min) = set.min_size {
        if size < min {
            violations.push(format!(
                "File size {} below minimum {}",
                format_file_size(size),
                format_file_size(min)
            ));
        }
    }

    ValidationReport {
        valid: violations.is_empty(),
        violations,
    }
}

/// Format a byte count for display: powers of 1024, at most two decimals,
/// trailing zeros trimmed ("1.5 MB", "892 KB", "0 Bytes").
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let mut formatted = format!("{:.2}", value);
    while formatted.ends_with('0') {
        formatted.pop();
    }
    if formatted.ends_with('.') {
        formatted.pop();
    }

    format!("{} {}", formatted, UNITS[exponent])
}

/// Whether the given dimensions are within `threshold` of the original
/// aspect ratio. Used to warn when a field's exact dimensions would distort
/// the image.
pub fn aspect_ratio_matches(width: u32, height: u32, original_ratio: f64, threshold: f64) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    let ratio = width as f64 / height as f64;
    (ratio - original_ratio).abs() < threshold
}
