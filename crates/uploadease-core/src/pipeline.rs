//! Constraint-driven image re-encoding.
//!
//! One processing request flows decode -> resample -> encode, then adjusts
//! only the lossy quality parameter with a bounded linear search to bring
//! the output within a byte-size bound. The search steps quality by 0.1 per
//! re-encode and stops at 0.1 (floor) or 1.0 (ceiling), so it performs at
//! most nine re-encodes after the baseline.
//!
//! Everything here is a pure function over the request and the decoded
//! bitmap: no canvas-style shared state crosses iteration boundaries, and
//! independent requests never touch each other's buffers.

use thiserror::Error;

use crate::decode::{self, DecodeError, SourceImage};
use crate::encode::{encode_frame, EncodeError};
use crate::{EncodingRequest, EncodingResult, TargetFormat};

/// Lowest quality the size search will try.
pub const QUALITY_FLOOR: f32 = 0.1;
/// Highest quality the size search will try.
pub const QUALITY_CEILING: f32 = 1.0;
/// Fixed quality step between encode attempts.
pub const QUALITY_STEP: f32 = 0.1;

/// Errors that can occur while processing a request.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The input is not a decodable raster image, or the target format is
    /// not recognized.
    #[error("Unsupported media: {0}")]
    UnsupportedMedia(String),

    /// The request carries an out-of-range parameter.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The platform encoder failed. Propagated immediately; the quality
    /// search never loops past an encode failure.
    #[error(transparent)]
    EncodeFailure(#[from] EncodeError),

    /// Strict mode only: the search hit its floor/ceiling without
    /// satisfying the byte-size bound.
    #[error("Size constraint not satisfiable: best effort was {achieved} bytes at quality {quality:.1}")]
    ConstraintUnsatisfiable { achieved: usize, quality: f32 },
}

impl From<DecodeError> for ProcessError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::InvalidDimensions => ProcessError::InvalidRequest(err.to_string()),
            other => ProcessError::UnsupportedMedia(other.to_string()),
        }
    }
}

/// Parse a target format name, failing before any encode attempt if the
/// name is not a supported format.
pub fn parse_format(name: &str) -> Result<TargetFormat, ProcessError> {
    TargetFormat::from_name(name)
        .ok_or_else(|| ProcessError::UnsupportedMedia(format!("unknown target format: {name}")))
}

/// Encode a decoded bitmap according to an [`EncodingRequest`].
///
/// Output dimensions default to the source dimensions independently per
/// axis; callers wanting an aspect-preserving fit compute it with
/// [`decode::fit_dimensions`] first. After the baseline encode, at most one
/// byte-size bound is enforced: the maximum when the baseline exceeds it,
/// otherwise the minimum when the baseline falls short of it. The search is
/// best effort — when quality reaches its floor or ceiling the closest
/// result is returned, unless `request.strict` is set, in which case that
/// termination becomes [`ProcessError::ConstraintUnsatisfiable`].
///
/// The returned quality is always within [0.1, 1.0].
pub fn process_image(
    image: &SourceImage,
    request: &EncodingRequest,
) -> Result<EncodingResult, ProcessError> {
    validate_request(request)?;

    let width = request.width.unwrap_or(image.width);
    let height = request.height.unwrap_or(image.height);

    let frame = decode::resize(image, width, height, request.filter())?;

    let mut quality = request.quality.clamp(QUALITY_FLOOR, QUALITY_CEILING);
    let mut bytes = encode_frame(&frame.pixels, width, height, request.format, quality)?;

    if request.format.is_lossy() {
        let len = bytes.len() as u64;
        if request.max_size_bytes.is_some_and(|max| len > max) {
            let max = request.max_size_bytes.unwrap_or(u64::MAX);
            while bytes.len() as u64 > max && quality - QUALITY_FLOOR > 1e-3 {
                quality = (quality - QUALITY_STEP).max(QUALITY_FLOOR);
                bytes = encode_frame(&frame.pixels, width, height, request.format, quality)?;
            }
        } else if request.min_size_bytes.is_some_and(|min| len < min) {
            let min = request.min_size_bytes.unwrap_or(0);
            while (bytes.len() as u64) < min && QUALITY_CEILING - quality > 1e-3 {
                quality = (quality + QUALITY_STEP).min(QUALITY_CEILING);
                bytes = encode_frame(&frame.pixels, width, height, request.format, quality)?;
            }
        }
    }

    if request.strict {
        let len = bytes.len() as u64;
        let violated = request.max_size_bytes.is_some_and(|max| len > max)
            || request.min_size_bytes.is_some_and(|min| len < min);
        if violated {
            return Err(ProcessError::ConstraintUnsatisfiable {
                achieved: bytes.len(),
                quality,
            });
        }
    }

    Ok(EncodingResult {
        bytes,
        quality,
        format: request.format,
    })
}

/// Decode raw file bytes and process them in one call.
///
/// This is the shape the popup uses: the user's file bytes in, an encoded
/// buffer out.
pub fn process_bytes(bytes: &[u8], request: &EncodingRequest) -> Result<EncodingResult, ProcessError> {
    let image = decode::decode_image(bytes)?;
    process_image(&image, request)
}

/// Build the download filename for a processed file:
/// `processed_<original-stem>.<target-extension>`.
pub fn processed_filename(original: &str, format: TargetFormat) -> String {
    let stem = original
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("file");
    format!("processed_{}.{}", stem, format.extension())
}

fn validate_request(request: &EncodingRequest) -> Result<(), ProcessError> {
    if request.width == Some(0) || request.height == Some(0) {
        return Err(ProcessError::InvalidRequest(
            "width and height must be positive".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&request.quality) {
        return Err(ProcessError::InvalidRequest(format!(
            "quality {} is outside [0, 1]",
            request.quality
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        SourceImage::new(width, height, pixels, 0, "image/png")
    }

    // High-frequency deterministic noise; the worst case for a lossy
    // encoder, so the size search actually has work to do.
    fn noise_image(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let seed = x
                    .wrapping_mul(2654435761)
                    .wrapping_add(y.wrapping_mul(40503));
                pixels.push((seed >> 8) as u8);
                pixels.push((seed >> 16) as u8);
                pixels.push((seed >> 24) as u8);
            }
        }
        SourceImage::new(width, height, pixels, 0, "image/png")
    }

    #[test]
    fn test_baseline_encode_without_bounds() {
        let img = gradient_image(64, 48);
        let request = EncodingRequest::new(TargetFormat::Jpeg);

        let result = process_image(&img, &request).unwrap();

        assert_eq!(result.format, TargetFormat::Jpeg);
        assert_eq!(result.byte_len(), result.bytes.len());
        assert!((result.quality - 0.9).abs() < 1e-6);
        assert_eq!(&result.bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_dimensions_default_to_source() {
        let img = gradient_image(64, 48);
        let request = EncodingRequest::new(TargetFormat::Png);

        let result = process_image(&img, &request).unwrap();
        let decoded = decode::decode_image(&result.bytes).unwrap();

        assert_eq!(decoded.width, 64);
        assert_eq!(decoded.height, 48);
    }

    #[test]
    fn test_dimensions_resolved_per_axis() {
        let img = gradient_image(64, 48);
        let mut request = EncodingRequest::new(TargetFormat::Png);
        request.width = Some(32);
        // Height stays at the source's 48: no aspect lock.

        let result = process_image(&img, &request).unwrap();
        let decoded = decode::decode_image(&result.bytes).unwrap();

        assert_eq!(decoded.width, 32);
        assert_eq!(decoded.height, 48);
    }

    #[test]
    fn test_max_bound_fits_or_floor() {
        let img = gradient_image(1920, 1080);
        let mut request = EncodingRequest::new(TargetFormat::Jpeg);
        request.max_size_bytes = Some(50_000);
        request.quality = 0.9;

        let result = process_image(&img, &request).unwrap();

        assert_eq!(result.format, TargetFormat::Jpeg);
        assert!(
            result.byte_len() <= 50_000 || (result.quality - QUALITY_FLOOR).abs() < 1e-3,
            "result must fit the bound or have reached the quality floor"
        );
    }

    #[test]
    fn test_max_bound_steps_quality_down() {
        let img = noise_image(512, 512);
        let mut request = EncodingRequest::new(TargetFormat::Jpeg);
        request.max_size_bytes = Some(20_000);
        request.quality = 0.9;

        let result = process_image(&img, &request).unwrap();

        // Noise at quality 0.9 is far above 20 KB, so the search must step.
        assert!(result.quality < 0.9);
        assert!(result.quality >= QUALITY_FLOOR - 1e-6);
        assert!(result.byte_len() <= 20_000 || (result.quality - QUALITY_FLOOR).abs() < 1e-3);
    }

    #[test]
    fn test_min_bound_unreachable_stops_at_ceiling() {
        let img = gradient_image(100, 100);
        let mut request = EncodingRequest::new(TargetFormat::Jpeg);
        request.min_size_bytes = Some(10_000_000);
        request.quality = 0.9;

        let result = process_image(&img, &request).unwrap();

        assert!((result.quality - QUALITY_CEILING).abs() < 1e-6);
        // The returned buffer is the quality-1.0 encode itself.
        let ceiling = encode_frame(
            &decode::resize(&img, 100, 100, request.filter()).unwrap().pixels,
            100,
            100,
            TargetFormat::Jpeg,
            QUALITY_CEILING,
        )
        .unwrap();
        assert_eq!(result.byte_len(), ceiling.len());
    }

    #[test]
    fn test_min_bound_steps_quality_up() {
        let img = gradient_image(100, 100);
        let mut request = EncodingRequest::new(TargetFormat::Jpeg);
        request.quality = 0.1;
        request.min_size_bytes = Some(2_000);

        let result = process_image(&img, &request).unwrap();

        assert!(
            result.byte_len() >= 2_000 || (result.quality - QUALITY_CEILING).abs() < 1e-3
        );
        assert!(result.quality > QUALITY_FLOOR);
    }

    #[test]
    fn test_only_one_bound_per_call() {
        // Max bound present but not exceeded, min bound unreachable: the
        // min branch runs and drives quality to the ceiling.
        let img = gradient_image(100, 100);
        let mut request = EncodingRequest::new(TargetFormat::Jpeg);
        request.max_size_bytes = Some(1_000_000);
        request.min_size_bytes = Some(10_000_000);
        request.quality = 0.9;

        let result = process_image(&img, &request).unwrap();
        assert!((result.quality - QUALITY_CEILING).abs() < 1e-6);
    }

    #[test]
    fn test_lossless_skips_search_and_is_idempotent() {
        let img = gradient_image(80, 60);
        let mut request = EncodingRequest::new(TargetFormat::Png);
        request.max_size_bytes = Some(10); // impossible, but png never steps

        let first = process_image(&img, &request).unwrap();
        let second = process_image(&img, &request).unwrap();

        assert_eq!(first.byte_len(), second.byte_len());
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn test_strict_mode_reports_unsatisfiable() {
        let img = gradient_image(80, 60);
        let mut request = EncodingRequest::new(TargetFormat::Png);
        request.max_size_bytes = Some(10);
        request.strict = true;

        let result = process_image(&img, &request);
        assert!(matches!(
            result,
            Err(ProcessError::ConstraintUnsatisfiable { .. })
        ));
    }

    #[test]
    fn test_strict_mode_passes_when_satisfied() {
        let img = gradient_image(80, 60);
        let mut request = EncodingRequest::new(TargetFormat::Jpeg);
        request.max_size_bytes = Some(1_000_000);
        request.strict = true;

        assert!(process_image(&img, &request).is_ok());
    }

    #[test]
    fn test_quality_clamped_into_result_range() {
        let img = gradient_image(32, 32);
        let mut request = EncodingRequest::new(TargetFormat::Jpeg);
        request.quality = 0.05; // accepted input, clamped for the encode

        let result = process_image(&img, &request).unwrap();
        assert!((result.quality - QUALITY_FLOOR).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_request_rejected() {
        let img = gradient_image(32, 32);

        let mut request = EncodingRequest::new(TargetFormat::Jpeg);
        request.width = Some(0);
        assert!(matches!(
            process_image(&img, &request),
            Err(ProcessError::InvalidRequest(_))
        ));

        let mut request = EncodingRequest::new(TargetFormat::Jpeg);
        request.quality = 1.5;
        assert!(matches!(
            process_image(&img, &request),
            Err(ProcessError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_parse_format_rejects_unknown_before_encode() {
        assert!(matches!(
            parse_format("bmp2"),
            Err(ProcessError::UnsupportedMedia(_))
        ));
        assert_eq!(parse_format("jpeg").unwrap(), TargetFormat::Jpeg);
        assert_eq!(parse_format("image/webp").unwrap(), TargetFormat::WebP);
    }

    #[test]
    fn test_process_bytes_end_to_end() {
        let img = gradient_image(40, 30);
        let png = crate::encode::encode_png(&img.pixels, 40, 30).unwrap();

        let mut request = EncodingRequest::new(TargetFormat::Jpeg);
        request.width = Some(20);
        request.height = Some(15);

        let result = process_bytes(&png, &request).unwrap();
        assert_eq!(&result.bytes[..2], &[0xFF, 0xD8]);

        let decoded = decode::decode_image(&result.bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (20, 15));
    }

    #[test]
    fn test_process_bytes_rejects_non_image() {
        let request = EncodingRequest::new(TargetFormat::Png);
        let result = process_bytes(b"not an image", &request);
        assert!(matches!(result, Err(ProcessError::UnsupportedMedia(_))));
    }

    #[test]
    fn test_processed_filename() {
        assert_eq!(
            processed_filename("photo.png", TargetFormat::Jpeg),
            "processed_photo.jpeg"
        );
        assert_eq!(
            processed_filename("archive.tar.gz", TargetFormat::Png),
            "processed_archive.png"
        );
        assert_eq!(
            processed_filename("noext", TargetFormat::WebP),
            "processed_noext.webp"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn format_strategy() -> impl Strategy<Value = TargetFormat> {
        prop_oneof![
            Just(TargetFormat::Png),
            Just(TargetFormat::Jpeg),
            Just(TargetFormat::WebP),
        ]
    }

    proptest! {
        /// Property: the returned quality is always within [0.1, 1.0] and
        /// the reported byte length is the actual buffer length.
        #[test]
        fn prop_result_invariants(
            width in 1u32..=32,
            height in 1u32..=32,
            quality in 0.0f32..=1.0,
            format in format_strategy(),
            max_kb in prop::option::of(1u64..=64),
        ) {
            let mut pixels = Vec::with_capacity((width * height * 3) as usize);
            for i in 0..(width * height * 3) {
                pixels.push((i.wrapping_mul(37) % 256) as u8);
            }
            let img = SourceImage::new(width, height, pixels, 0, "image/png");

            let mut request = EncodingRequest::new(format);
            request.quality = quality;
            request.max_size_bytes = max_kb.map(|kb| kb * 1024);

            let result = process_image(&img, &request).unwrap();

            prop_assert!(result.quality >= QUALITY_FLOOR - 1e-6);
            prop_assert!(result.quality <= QUALITY_CEILING + 1e-6);
            prop_assert_eq!(result.byte_len(), result.bytes.len());
            prop_assert!(!result.bytes.is_empty());
        }
    }
}
