use {crate::*, base::Vec2, crates_image::imageops};

/// Axis-aligned box in frame pixel coordinates. May reach outside the frame,
/// `crop` clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The box covering a whole raster of `size`.
    pub fn full(size: Vec2<usize>) -> Self {
        Self::new(
            0,
            0,
            size.x.min(i32::MAX as usize) as i32,
            size.y.min(i32::MAX as usize) as i32,
        )
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }
}

// clamp one axis to [start, start + len) with at least one pixel
fn clamp_span(start: i32, end: i32, extent: usize) -> (u32, u32) {
    let extent = extent.min(i32::MAX as usize) as i64;
    let start = (start as i64).clamp(0, extent - 1);
    let end = (end as i64).min(extent);
    let len = if end - start <= 0 { 1 } else { end - start };
    (start as u32, len as u32)
}

/// Cut `bounds` out of an RGB raster.
///
/// Never fails: the box is clamped to the raster and a degenerate result is
/// widened to one pixel. An empty (or non-RGB) source gives a 1x1 black raster.
pub fn crop(image: &Image, bounds: BoundingBox) -> Image {
    let buffer = match image.is_empty() {
        true => None,
        false => image.to_buffer().ok(),
    };
    let Some(buffer) = buffer else {
        return Image::filled(Vec2::new(1, 1), [0, 0, 0]);
    };
    let (x, width) = clamp_span(bounds.left, bounds.right, image.size.x);
    let (y, height) = clamp_span(bounds.top, bounds.bottom, image.size.y);
    let view = imageops::crop_imm(&buffer, x, y, width, height);
    Image::from_buffer(view.to_image())
}
