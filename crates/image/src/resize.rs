use {
    crate::*,
    base::Vec2,
    crates_image::imageops::{self, FilterType},
};

/// Bilinear resize of an RGB raster.
pub fn resize(image: &Image, size: Vec2<usize>) -> Result<Image, ImageError> {
    if size.is_empty() {
        return Err(ImageError::InvalidFrame(format!(
            "cannot resize to empty size {size}"
        )));
    }
    if image.is_empty() {
        return Err(ImageError::InvalidFrame(format!(
            "cannot resize empty raster {}",
            image.size
        )));
    }
    if image.size == size {
        image.format.ensure_format(PixelFormat::Rgb8)?;
        return Ok(image.clone());
    }
    let buffer = image.to_buffer()?;
    let resized = imageops::resize(&buffer, size.x as u32, size.y as u32, FilterType::Triangle);
    Ok(Image::from_buffer(resized))
}

/// Rec. 601 luminance of every pixel, in `[0, 255]`, row-major.
pub fn luma(image: &Image) -> Result<Vec<f32>, ImageError> {
    image.format.ensure_format(PixelFormat::Rgb8)?;
    Ok(image
        .data
        .chunks_exact(3)
        .map(|px| 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32)
        .collect())
}
