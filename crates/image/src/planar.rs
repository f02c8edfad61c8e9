use {crate::*, base::Vec2};

/// One plane of a planar frame as handed out by the camera.
///
/// `row_stride` is the distance in bytes between the starts of two rows and may
/// be wider than the logical row (the extra bytes are padding). `pixel_stride`
/// is the distance between two samples of the same row: 1 for fully planar
/// chroma, 2 when U and V are interleaved in one buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub data: Vec<u8>,
    pub row_stride: usize,
    pub pixel_stride: usize,
}

impl Plane {
    pub fn new(data: Vec<u8>, row_stride: usize, pixel_stride: usize) -> Self {
        Self {
            data,
            row_stride,
            pixel_stride,
        }
    }

    /// A plane whose samples are adjacent (`pixel_stride == 1`).
    pub fn packed(data: Vec<u8>, row_stride: usize) -> Self {
        Self::new(data, row_stride, 1)
    }

    // Bytes needed to read `size` samples. The last row only needs to reach its
    // last sample, cameras routinely omit the trailing padding there.
    fn required_len(&self, size: Vec2<usize>) -> Option<usize> {
        let last_row = (size.y - 1).checked_mul(self.row_stride)?;
        let last_col = (size.x - 1).checked_mul(self.pixel_stride)?;
        last_row.checked_add(last_col)?.checked_add(1)
    }

    fn validate(&self, name: &str, size: Vec2<usize>) -> Result<(), ImageError> {
        if self.pixel_stride == 0 {
            return Err(ImageError::InvalidFrame(format!(
                "{name} plane has zero pixel stride"
            )));
        }
        let row_span = (size.x - 1)
            .checked_mul(self.pixel_stride)
            .and_then(|span| span.checked_add(1))
            .ok_or_else(|| ImageError::InvalidFrame(format!("{name} plane row overflows")))?;
        if size.y > 1 && self.row_stride < row_span {
            return Err(ImageError::InvalidFrame(format!(
                "{name} plane row stride {} is shorter than its row ({row_span} bytes)",
                self.row_stride
            )));
        }
        let required = self
            .required_len(size)
            .ok_or_else(|| ImageError::InvalidFrame(format!("{name} plane size overflows")))?;
        if self.data.len() < required {
            return Err(ImageError::InvalidFrame(format!(
                "{name} plane too short: got {} bytes, need {required} for {size}",
                self.data.len()
            )));
        }
        Ok(())
    }

    // only valid after `validate` succeeded for a size containing (x, y)
    #[inline]
    fn sample(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.row_stride + x * self.pixel_stride]
    }
}

/// A YUV 4:2:0 camera frame: full resolution luma, chroma subsampled by two in
/// both directions (odd sizes round the chroma planes up).
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarFrame {
    pub size: Vec2<usize>,
    pub y: Plane,
    pub u: Plane,
    pub v: Plane,
}

impl PlanarFrame {
    pub fn new(size: Vec2<usize>, y: Plane, u: Plane, v: Plane) -> Self {
        Self { size, y, u, v }
    }

    /// Split a contiguous YU12 (I420) buffer into its three planes.
    pub fn from_yu12(size: Vec2<usize>, data: &[u8]) -> Result<Self, ImageError> {
        let (y_len, c_len) = packed_420_len(size)?;
        let expected = y_len + 2 * c_len;
        if data.len() < expected {
            return Err(ImageError::InvalidFrame(format!(
                "YU12 frame too short: got {} bytes, expected {expected} for {size}",
                data.len()
            )));
        }
        let chroma = size.half_ceil();
        Ok(Self::new(
            size,
            Plane::packed(data[..y_len].to_vec(), size.x),
            Plane::packed(data[y_len..y_len + c_len].to_vec(), chroma.x),
            Plane::packed(data[y_len + c_len..expected].to_vec(), chroma.x),
        ))
    }

    pub fn chroma_size(&self) -> Vec2<usize> {
        self.size.half_ceil()
    }

    /// Layout of the chroma planes. Interleaved chroma is semi-planar
    /// whichever of U and V comes first.
    pub fn format(&self) -> PixelFormat {
        if self.u.pixel_stride == 2 && self.v.pixel_stride == 2 {
            PixelFormat::Yuv420SemiPlanar
        } else {
            PixelFormat::Yuv420Planar
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty() || self.y.data.is_empty()
    }

    /// Check that every plane can be read at this frame's size.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.size.is_empty() {
            return Err(ImageError::InvalidFrame(format!(
                "frame size {} is empty",
                self.size
            )));
        }
        self.size
            .checked_area()
            .and_then(|area| area.checked_mul(3))
            .ok_or_else(|| ImageError::InvalidFrame(format!("frame size {} overflows", self.size)))?;
        let chroma = self.chroma_size();
        self.y.validate("Y", self.size)?;
        self.u.validate("U", chroma)?;
        self.v.validate("V", chroma)?;
        Ok(())
    }

    /// Convert straight to an interleaved RGB raster.
    pub fn to_rgb(&self) -> Result<Image, ImageError> {
        self.validate()?;
        let (width, height) = (self.size.x, self.size.y);
        let mut rgb = Vec::with_capacity(width * height * 3);
        for row in 0..height {
            for col in 0..width {
                let y = self.y.sample(col, row);
                let u = self.u.sample(col / 2, row / 2);
                let v = self.v.sample(col / 2, row / 2);
                let (r, g, b) = yuv_to_rgb(y, u, v);
                rgb.extend_from_slice(&[r, g, b]);
            }
        }
        Ok(Image::new(self.size, rgb, PixelFormat::Rgb8))
    }

    /// Repack into a single NV21 buffer: packed luma, then `[V, U]` pairs.
    ///
    /// Row padding is dropped from every row of every plane.
    pub fn to_nv21(&self) -> Result<Vec<u8>, ImageError> {
        self.validate()?;
        let chroma = self.chroma_size();
        let mut nv21 = Vec::with_capacity(self.size.area() + 2 * chroma.area());
        for row in 0..self.size.y {
            for col in 0..self.size.x {
                nv21.push(self.y.sample(col, row));
            }
        }
        for row in 0..chroma.y {
            for col in 0..chroma.x {
                nv21.push(self.v.sample(col, row));
                nv21.push(self.u.sample(col, row));
            }
        }
        Ok(nv21)
    }
}

// Luma and per-chroma-plane byte counts of a packed 4:2:0 buffer. Rejects
// sizes whose whole buffer length `y + 2 * c` does not fit in a usize.
fn packed_420_len(size: Vec2<usize>) -> Result<(usize, usize), ImageError> {
    if size.is_empty() {
        return Err(ImageError::InvalidFrame(format!("frame size {size} is empty")));
    }
    let y_len = size.checked_area();
    let c_len = size.half_ceil().checked_area();
    match (y_len, c_len) {
        (Some(y_len), Some(c_len))
            if c_len
                .checked_mul(2)
                .and_then(|c| c.checked_add(y_len))
                .is_some() =>
        {
            Ok((y_len, c_len))
        }
        _ => Err(ImageError::InvalidFrame(format!("frame size {size} overflows"))),
    }
}

/// Expand an NV21 buffer into an interleaved RGB raster.
pub fn nv21_to_rgb(size: Vec2<usize>, data: &[u8]) -> Result<Image, ImageError> {
    let (y_len, c_len) = packed_420_len(size)?;
    let chroma = size.half_ceil();
    let expected = y_len + 2 * c_len;
    if data.len() < expected {
        return Err(ImageError::InvalidFrame(format!(
            "NV21 frame too short: got {} bytes, expected {expected} for {size}",
            data.len()
        )));
    }

    let (y_plane, vu_plane) = data.split_at(y_len);
    let mut rgb = Vec::with_capacity(y_len * 3);
    for row in 0..size.y {
        for col in 0..size.x {
            let y = y_plane[row * size.x + col];
            let i = ((row / 2) * chroma.x + col / 2) * 2;
            let (r, g, b) = yuv_to_rgb(y, vu_plane[i + 1], vu_plane[i]);
            rgb.extend_from_slice(&[r, g, b]);
        }
    }
    Ok(Image::new(size, rgb, PixelFormat::Rgb8))
}
