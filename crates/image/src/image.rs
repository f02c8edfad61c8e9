use {crate::*, base::Vec2, crates_image::RgbImage};

/// A packed raster.
///
/// For `PixelFormat::Rgb8` the data is row-major `[R, G, B, ...]` with no row
/// padding, so `data.len() == size.x * size.y * 3`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

impl Image {
    pub fn new(size: Vec2<usize>, data: Vec<u8>, format: PixelFormat) -> Self {
        Self { size, data, format }
    }

    /// Create an RGB raster, checking that `data` covers exactly `size`.
    pub fn rgb(size: Vec2<usize>, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = size
            .checked_area()
            .and_then(|area| area.checked_mul(3))
            .ok_or_else(|| ImageError::InvalidFrame(format!("size {size} overflows")))?;
        if data.len() != expected {
            return Err(ImageError::InvalidFrame(format!(
                "RGB raster {size} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self::new(size, data, PixelFormat::Rgb8))
    }

    /// An RGB raster where every pixel has the same color.
    pub fn filled(size: Vec2<usize>, color: [u8; 3]) -> Self {
        let data = color.repeat(size.area());
        Self::new(size, data, PixelFormat::Rgb8)
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty() || self.data.is_empty()
    }

    /// RGB value at `(x, y)`, or `None` outside the raster or for non-RGB formats.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if self.format != PixelFormat::Rgb8 || x >= self.size.x || y >= self.size.y {
            return None;
        }
        let i = (y * self.size.x + x) * 3;
        let px = self.data.get(i..i + 3)?;
        Some([px[0], px[1], px[2]])
    }

    pub(crate) fn to_buffer(&self) -> Result<RgbImage, ImageError> {
        self.format.ensure_format(PixelFormat::Rgb8)?;
        RgbImage::from_raw(self.size.x as u32, self.size.y as u32, self.data.clone())
            .ok_or_else(|| {
                ImageError::InvalidFrame(format!(
                    "RGB raster {} has {} bytes",
                    self.size,
                    self.data.len()
                ))
            })
    }

    pub(crate) fn from_buffer(buffer: RgbImage) -> Self {
        let (width, height) = buffer.dimensions();
        Self::new(
            Vec2::new(width as usize, height as usize),
            buffer.into_raw(),
            PixelFormat::Rgb8,
        )
    }
}
