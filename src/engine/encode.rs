use std::{fmt, io::Cursor, str::FromStr};

use image::{ImageFormat, RgbaImage};

use crate::foundation::error::{WaveformError, WaveformResult};

/// Raster container used for rendered images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    /// Baseline TIFF, the wire format existing callers expect.
    #[default]
    Tiff,
    /// PNG.
    Png,
}

impl RasterFormat {
    /// Identifier accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tiff => "tiff",
            Self::Png => "png",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Tiff => ImageFormat::Tiff,
            Self::Png => ImageFormat::Png,
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RasterFormat {
    type Err = WaveformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiff" => Ok(Self::Tiff),
            "png" => Ok(Self::Png),
            other => Err(WaveformError::config(format!(
                "unknown image format: {other:?} [options: tiff, png]"
            ))),
        }
    }
}

/// Encode an image into an in-memory container.
pub fn encode_image(image: &RgbaImage, format: RasterFormat) -> WaveformResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, format.image_format())
        .map_err(|e| WaveformError::encode(format!("write {format} image: {e}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/engine/encode.rs"]
mod tests;
