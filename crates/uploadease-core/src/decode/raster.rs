//! Raster image decoding with EXIF orientation handling.
//!
//! The browser `<img>` element the popup previously relied on sniffed the
//! container format and applied EXIF orientation implicitly; both behaviors
//! are reproduced here so a photo taken sideways comes out upright.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageFormat;
use image::ImageReader;

use super::{DecodeError, Orientation, SourceImage};

/// Decode a raster image (PNG, JPEG, WebP, or GIF) from raw file bytes.
///
/// The container format is sniffed from the bytes rather than trusted from
/// the declared MIME type. JPEG input has EXIF orientation correction
/// applied before the pixels are returned.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedMedia` if the bytes are not a
/// recognized raster image, or `DecodeError::CorruptedFile` if the image is
/// truncated or malformed.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader.format().ok_or_else(|| {
        DecodeError::UnsupportedMedia("input is not a recognized raster image".to_string())
    })?;

    // Orientation only matters for JPEG; other supported containers either
    // have no EXIF or are produced pre-oriented.
    let orientation = if format == ImageFormat::Jpeg {
        extract_orientation(bytes)
    } else {
        Orientation::Normal
    };

    let img = reader.decode().map_err(|e| match e {
        image::ImageError::Unsupported(err) => DecodeError::UnsupportedMedia(err.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let oriented = apply_orientation(img, orientation);

    Ok(SourceImage::from_rgb_image(
        oriented.into_rgb8(),
        bytes.len(),
        format.to_mime_type(),
    ))
}

/// Extract EXIF orientation from JPEG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
