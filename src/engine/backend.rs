use image::RgbaImage;

use crate::{
    engine::{
        decode,
        encode::{self, RasterFormat},
        raster, reduce,
    },
    foundation::error::WaveformResult,
    render::policy::RenderPolicy,
};

/// Classified failure of one rendering call.
///
/// These are data-quality problems of a single request; the orchestrator reports them in that
/// request's response and keeps going.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The payload is not a recognized audio container.
    #[error("malformed audio container: {0}")]
    Format(String),

    /// The container is fine but its sample data is not.
    #[error("invalid audio sample data: {0}")]
    InvalidData(String),

    /// The stream ended before the container said it would.
    #[error("unexpected end of audio stream")]
    UnexpectedEos,

    /// Anything the other kinds do not describe.
    #[error("render failed: {0}")]
    Unclassified(String),
}

/// Turns audio bytes into a waveform image.
///
/// The orchestrator only talks to this trait, so callers can plug in their own decoder or
/// rasterizer. [`WaveformEngine`] is the bundled implementation.
pub trait RenderEngine: Send + Sync {
    /// Decode `audio` and rasterize its waveform under `policy`.
    fn render(&self, audio: &[u8], policy: &RenderPolicy) -> Result<RgbaImage, EngineError>;

    /// Encode a rendered image into a raster container.
    fn encode_image(&self, image: &RgbaImage, format: RasterFormat) -> WaveformResult<Vec<u8>> {
        encode::encode_image(image, format)
    }
}

/// Default engine: RIFF/WAVE PCM in, RMS bar waveform out.
#[derive(Clone, Copy, Debug, Default)]
pub struct WaveformEngine;

impl WaveformEngine {
    /// Create the default engine.
    pub fn new() -> Self {
        Self
    }
}

impl RenderEngine for WaveformEngine {
    fn render(&self, audio: &[u8], policy: &RenderPolicy) -> Result<RgbaImage, EngineError> {
        let pcm = decode::decode_wav(audio)?;
        let bars = reduce::rms_bars(&pcm, policy.resolution_hz);
        raster::draw_waveform(&bars, policy)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/backend.rs"]
mod tests;
