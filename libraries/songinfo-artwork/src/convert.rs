use crate::error::Result;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use songinfo_core::ArtworkData;
use tracing::debug;

/// JPEG quality used when re-encoding
pub const JPEG_QUALITY: u8 = 90;

/// Turn downloaded image bytes into embeddable JPEG artwork.
///
/// JPEG input is passed through untouched; any other decodable format is
/// flattened to RGB and re-encoded.
pub fn to_jpeg(bytes: Vec<u8>) -> Result<ArtworkData> {
    if matches!(image::guess_format(&bytes), Ok(ImageFormat::Jpeg)) {
        return Ok(ArtworkData::jpeg(bytes));
    }

    let decoded = image::load_from_memory(&bytes)?;
    debug!(
        width = decoded.width(),
        height = decoded.height(),
        "Re-encoding artwork as JPEG"
    );

    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY).encode_image(&rgb)?;

    Ok(ArtworkData::jpeg(encoded))
}
