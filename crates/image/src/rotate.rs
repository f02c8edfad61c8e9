use {crate::*, crates_image::imageops};

/// Clockwise rotation the camera reports for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Accept any multiple of 90, negative or beyond a full turn.
    pub fn from_degrees(degrees: i32) -> Result<Self, ImageError> {
        if degrees % 90 != 0 {
            return Err(ImageError::InvalidFrame(format!(
                "rotation must be a multiple of 90 degrees, got {degrees}"
            )));
        }
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            _ => Ok(Rotation::Deg270),
        }
    }

    pub fn degrees(&self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// True when width and height trade places.
    pub fn is_transposing(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Rotate an RGB raster clockwise.
pub fn rotate(image: &Image, rotation: Rotation) -> Result<Image, ImageError> {
    if rotation == Rotation::Deg0 {
        return Ok(image.clone());
    }
    let buffer = image.to_buffer()?;
    let rotated = match rotation {
        Rotation::Deg0 => buffer,
        Rotation::Deg90 => imageops::rotate90(&buffer),
        Rotation::Deg180 => imageops::rotate180(&buffer),
        Rotation::Deg270 => imageops::rotate270(&buffer),
    };
    Ok(Image::from_buffer(rotated))
}
