//! Normalises uploaded images before OCR: size checks, a downscale for
//! oversized photos, and grayscale PNG re-encoding so every decoder format
//! reaches the engine the same way.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageOutputFormat};
use tracing::debug;

use super::ExtractionError;

/// Smallest plausible image payload (a minimal PNG is ~67 bytes).
const MIN_IMAGE_BYTES: usize = 67;

/// Phone photos above this edge length are shrunk before OCR.
pub const MAX_OCR_DIMENSION: u32 = 4000;

/// Reject payloads that cannot be a real image before decoding them.
pub fn validate_image_bytes(bytes: &[u8]) -> Result<(), ExtractionError> {
    if bytes.len() < MIN_IMAGE_BYTES {
        return Err(ExtractionError::ImageProcessing(
            "Image data too small to be valid".into(),
        ));
    }
    Ok(())
}

/// Decode, downscale if needed, convert to grayscale, and re-encode as PNG.
pub fn prepare_for_ocr(image_bytes: &[u8]) -> Result<Vec<u8>, ExtractionError> {
    validate_image_bytes(image_bytes)?;

    let img = image::load_from_memory(image_bytes)
        .map_err(|e| ExtractionError::ImageProcessing(format!("Decode failed: {e}")))?;

    let img = downscale(img, MAX_OCR_DIMENSION);
    let gray = DynamicImage::ImageLuma8(img.to_luma8());

    let mut cursor = Cursor::new(Vec::new());
    gray.write_to(&mut cursor, ImageOutputFormat::Png)
        .map_err(|e| ExtractionError::ImageProcessing(format!("PNG encoding failed: {e}")))?;
    Ok(cursor.into_inner())
}

fn downscale(img: DynamicImage, max_dim: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    if w.max(h) <= max_dim {
        return img;
    }
    debug!(from = format!("{w}x{h}"), max_dim, "Downscaling oversized image for OCR");
    img.resize(max_dim, max_dim, FilterType::Triangle)
}
