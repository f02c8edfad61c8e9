//! Raster utilities for the frame analysis pipeline.
//!
//! Everything here works on `Image`, a packed raster described by its size and
//! `PixelFormat`. Camera frames arrive as planar YUV 4:2:0 (`PlanarFrame`) and
//! are converted to interleaved RGB before any other step touches them.

mod crop;
mod error;
mod image;
mod jpeg;
mod pixelformat;
mod planar;
mod resize;
mod rotate;

pub use crop::*;
pub use error::*;
pub use image::*;
pub use jpeg::*;
pub use pixelformat::*;
pub use planar::*;
pub use resize::*;
pub use rotate::*;
