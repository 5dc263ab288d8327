//! Image resampling and aspect-fit helpers.
//!
//! All functions return new `SourceImage` instances without modifying the
//! input; nothing here holds state across calls.

use super::{DecodeError, FilterType, SourceImage};

/// Resize an image to exact dimensions.
///
/// The two axes are resolved independently; callers that want to preserve
/// the aspect ratio should compute the target with [`fit_dimensions`] (or
/// use [`resize_to_fit`]) first.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either dimension is zero.
pub fn resize(
    image: &SourceImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<SourceImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(SourceImage::from_rgb_image(
        resized,
        image.source_size,
        image.source_mime.clone(),
    ))
}

/// Resize an image to fit within a bounding box, preserving aspect ratio.
///
/// If the image already fits, it is returned unchanged.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either bound is zero.
pub fn resize_to_fit(
    image: &SourceImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<SourceImage, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::InvalidDimensions);
    }

    if image.width <= max_width && image.height <= max_height {
        return Ok(image.clone());
    }

    let (new_width, new_height) = fit_dimensions(image.width, image.height, max_width, max_height);
    resize(image, new_width, new_height, filter)
}

/// Compute the largest dimensions that preserve the source aspect ratio
/// while fitting within the given bounding box.
///
/// Uses `ratio = min(max_width / src_width, max_height / src_height)` and
/// rounds both axes to the nearest integer. Pure function.
pub fn fit_dimensions(src_width: u32, src_height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if src_width == 0 || src_height == 0 {
        return (0, 0);
    }

    let ratio = (max_width as f64 / src_width as f64).min(max_height as f64 / src_height as f64);

    let width = (src_width as f64 * ratio).round() as u32;
    let height = (src_height as f64 * ratio).round() as u32;

    (width.max(1), height.max(1))
}
