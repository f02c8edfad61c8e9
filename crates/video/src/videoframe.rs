use {
    base::Vec2,
    image::{Image, ImageError, PixelFormat, PlanarFrame, Rotation, rotate},
    std::{fmt, time::Duration},
};

/// Runs a callback once when dropped. Attached to frames whose buffer belongs
/// to the source (a camera buffer pool, for instance) and must be handed back.
pub struct FrameRelease {
    callback: Option<Box<dyn FnOnce() + Send>>,
}

impl FrameRelease {
    pub fn new(callback: impl FnOnce() + Send + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }
}

impl Drop for FrameRelease {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
    }
}

impl fmt::Debug for FrameRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRelease")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub enum FramePixels {
    Planar(PlanarFrame),
    Rgb(Image),
}

#[derive(Debug)]
pub struct VideoFrame {
    pub pixels: FramePixels,
    /// Clockwise rotation needed to display the frame upright.
    pub rotation: Rotation,
    /// Capture time, monotonic since the source started.
    pub timestamp: Duration,
    /// Assigned by the frame channel on send, 0 before that.
    pub sequence: u64,
    release: Option<FrameRelease>,
}

impl VideoFrame {
    pub fn new(pixels: FramePixels, rotation: Rotation, timestamp: Duration) -> Self {
        Self {
            pixels,
            rotation,
            timestamp,
            sequence: 0,
            release: None,
        }
    }

    pub fn planar(frame: PlanarFrame, rotation: Rotation, timestamp: Duration) -> Self {
        Self::new(FramePixels::Planar(frame), rotation, timestamp)
    }

    pub fn rgb(image: Image, rotation: Rotation, timestamp: Duration) -> Self {
        Self::new(FramePixels::Rgb(image), rotation, timestamp)
    }

    /// Attach a callback that fires when this frame is dropped.
    pub fn with_release(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.release = Some(FrameRelease::new(callback));
        self
    }

    /// Size of the pixel data as captured, before rotation.
    pub fn size(&self) -> Vec2<usize> {
        match &self.pixels {
            FramePixels::Planar(frame) => frame.size,
            FramePixels::Rgb(image) => image.size,
        }
    }

    /// Size once `rotation` has been applied.
    pub fn upright_size(&self) -> Vec2<usize> {
        match self.rotation.is_transposing() {
            true => self.size().transposed(),
            false => self.size(),
        }
    }

    pub fn format(&self) -> PixelFormat {
        match &self.pixels {
            FramePixels::Planar(frame) => frame.format(),
            FramePixels::Rgb(image) => image.format,
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.pixels {
            FramePixels::Planar(frame) => frame.is_empty(),
            FramePixels::Rgb(image) => image.is_empty(),
        }
    }

    /// Upright RGB raster for this frame.
    pub fn to_rgb(&self) -> Result<Image, ImageError> {
        match &self.pixels {
            FramePixels::Planar(frame) => rotate(&frame.to_rgb()?, self.rotation),
            FramePixels::Rgb(image) => rotate(image, self.rotation),
        }
    }
}
