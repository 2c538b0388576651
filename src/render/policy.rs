use std::num::NonZeroU32;

use crate::color::{
    hex::Rgb8,
    policy::{ColorPolicy, ColorStrategy},
};

/// Immutable rendering policy shared by every request of a batch.
///
/// Built once at startup and passed by reference; nothing downstream mutates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderPolicy {
    /// Resolved colors and strategy.
    pub colors: ColorPolicy,
    /// Waveform bars per second of audio.
    pub resolution_hz: NonZeroU32,
    /// Horizontal pixel magnification.
    pub scale_x: NonZeroU32,
    /// Vertical pixel magnification.
    pub scale_y: NonZeroU32,
    /// Curvature applied to bars when `scale_x > 1`.
    pub sharpness: u32,
    /// Seed for the `fuzz` strategy; `None` draws from thread-local entropy.
    pub fuzz_seed: Option<u64>,
}

impl RenderPolicy {
    /// Aggregate already-validated options into a policy.
    pub fn build(
        colors: ColorPolicy,
        resolution_hz: NonZeroU32,
        scale_x: NonZeroU32,
        scale_y: NonZeroU32,
        sharpness: u32,
    ) -> Self {
        Self {
            colors,
            resolution_hz,
            scale_x,
            scale_y,
            sharpness,
            fuzz_seed: None,
        }
    }

    /// Same policy with a fixed `fuzz` seed.
    pub fn with_fuzz_seed(self, fuzz_seed: Option<u64>) -> Self {
        Self { fuzz_seed, ..self }
    }

    /// The selected color strategy.
    pub fn strategy(&self) -> ColorStrategy {
        self.colors.strategy
    }

    /// Whether two renders of the same audio are guaranteed to be pixel-identical.
    pub fn is_deterministic(&self) -> bool {
        self.strategy().is_deterministic() || self.fuzz_seed.is_some()
    }
}

impl Default for RenderPolicy {
    /// White background, black solid waveform, unit resolution and scale.
    fn default() -> Self {
        let colors = ColorPolicy {
            background: Rgb8::new(255, 255, 255),
            foreground: Rgb8::BLACK,
            alternate: Rgb8::BLACK,
            strategy: ColorStrategy::Solid,
        };
        Self::build(colors, NonZeroU32::MIN, NonZeroU32::MIN, NonZeroU32::MIN, 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/policy.rs"]
mod tests;
