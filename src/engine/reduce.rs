use std::num::NonZeroU32;

use crate::engine::decode::PcmAudio;

/// Number of interleaved samples folded into one waveform bar.
pub fn samples_per_bar(pcm: &PcmAudio, resolution_hz: NonZeroU32) -> usize {
    let per_second = u64::from(pcm.sample_rate) * u64::from(pcm.channels);
    let window = per_second / u64::from(resolution_hz.get());
    usize::try_from(window.max(1)).unwrap_or(usize::MAX)
}

/// Root-mean-square of each bar-sized window; a trailing partial window still yields a bar.
pub fn rms_bars(pcm: &PcmAudio, resolution_hz: NonZeroU32) -> Vec<f64> {
    let window = samples_per_bar(pcm, resolution_hz);
    pcm.samples
        .chunks(window)
        .map(|chunk| {
            let sum_sq: f64 = chunk.iter().map(|s| s * s).sum();
            (sum_sq / chunk.len() as f64).sqrt()
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/engine/reduce.rs"]
mod tests;
