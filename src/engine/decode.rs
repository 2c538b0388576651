use std::io::Cursor;

use crate::engine::backend::EngineError;

/// Decoded audio: interleaved samples normalized to `[-1, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct PcmAudio {
    /// Frames per second.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Interleaved samples.
    pub samples: Vec<f64>,
}

impl PcmAudio {
    /// Playback length in seconds.
    pub fn duration_sec(&self) -> f64 {
        let frames = self.samples.len() as f64 / f64::from(self.channels.max(1));
        frames / f64::from(self.sample_rate.max(1))
    }
}

/// Decode a RIFF/WAVE byte buffer.
pub fn decode_wav(bytes: &[u8]) -> Result<PcmAudio, EngineError> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).map_err(classify)?;
    let spec = reader.spec();
    if spec.channels == 0 || spec.sample_rate == 0 {
        return Err(EngineError::Format(format!(
            "wav header declares {} channels at {} Hz",
            spec.channels, spec.sample_rate
        )));
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<Vec<_>, _>>(),
        hound::SampleFormat::Int => {
            let full_scale = f64::from(1u32 << (spec.bits_per_sample.clamp(1, 32) - 1));
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / full_scale))
                .collect::<Result<Vec<_>, _>>()
        }
    }
    .map_err(classify)?;

    if samples.is_empty() {
        return Err(EngineError::InvalidData("stream holds no samples".to_owned()));
    }

    tracing::debug!(
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        bits = spec.bits_per_sample,
        samples = samples.len(),
        "decoded wav payload"
    );

    Ok(PcmAudio {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        samples,
    })
}

fn classify(err: hound::Error) -> EngineError {
    match err {
        // A cursor over memory only fails by running out of bytes.
        hound::Error::IoError(_) => EngineError::UnexpectedEos,
        hound::Error::FormatError(msg) => EngineError::Format(msg.to_owned()),
        hound::Error::Unsupported => {
            EngineError::Format("unsupported wav encoding".to_owned())
        }
        e @ (hound::Error::InvalidSampleFormat
        | hound::Error::TooWide
        | hound::Error::UnfinishedSample) => EngineError::InvalidData(e.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/decode.rs"]
mod tests;
