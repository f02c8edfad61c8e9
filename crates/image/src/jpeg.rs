use {
    crate::*,
    crates_image::{ExtendedColorType, ImageEncoder, codecs::jpeg::JpegEncoder},
};

/// Encode an RGB raster as baseline JPEG. `quality` is clamped to `1..=100`.
pub fn rgb_to_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    image.format.ensure_format(PixelFormat::Rgb8)?;
    if image.is_empty() {
        return Err(ImageError::Encode(format!(
            "cannot encode empty raster {}",
            image.size
        )));
    }
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(
            &image.data,
            image.size.x as u32,
            image.size.y as u32,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Encode on the blocking pool so frame delivery is never held up by it.
pub async fn encode_jpeg(image: Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    tokio::task::spawn_blocking(move || rgb_to_jpeg(&image, quality))
        .await
        .map_err(|e| ImageError::Encode(format!("encoder task failed: {e}")))?
}

/// Decode any supported still image (JPEG, PNG) into an RGB raster.
pub fn decode_rgb(data: &[u8]) -> Result<Image, ImageError> {
    let decoded = crates_image::load_from_memory(data)?;
    Ok(Image::from_buffer(decoded.to_rgb8()))
}
