use std::ops::Range;

use image::{Rgba, RgbaImage};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    color::{hex::Rgb8, policy::ColorFill},
    engine::backend::EngineError,
    render::policy::RenderPolicy,
};

/// Image height before vertical scaling.
pub const BASE_HEIGHT: u32 = 128;

/// Upper bound on `width * height` of a rendered image.
pub const MAX_IMAGE_PIXELS: u64 = 1 << 28;

const BASE_GAIN: f64 = 10.0;

/// Vertical gain applied to bar values.
///
/// Starts at 10 and loses 0.25 for every 0.05 the loudest bar exceeds 0.30, so loud audio
/// clips less.
pub fn clipping_gain(peak: f64) -> f64 {
    if peak > 0.30 {
        let steps = ((peak - 0.30) / 0.05).ceil();
        BASE_GAIN - 0.25 * steps
    } else {
        BASE_GAIN
    }
}

/// Rasterize one symmetric bar per value.
pub fn draw_waveform(bars: &[f64], policy: &RenderPolicy) -> Result<RgbaImage, EngineError> {
    let scale_x = policy.scale_x.get();
    let (width, height) = canvas_size(bars.len(), policy)?;
    let mut img = RgbaImage::new(width, height);

    let mut background = FillSampler::new(policy.colors.background_fill(), policy.fuzz_seed);
    let mut foreground = FillSampler::new(policy.colors.foreground_fill(), policy.fuzz_seed);

    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = background.sample((x / scale_x) as usize, x, y, width);
    }

    let gain = clipping_gain(bars.iter().copied().fold(0.0, f64::max));
    let h = i64::from(height);
    let half_y = h / 2;
    let peak = i64::from(scale_x / 2);
    let sharpness = i64::from(policy.sharpness);
    let tallest = f64::from(height) * BASE_GAIN;
    let reach = peak
        .max(i64::from(scale_x) - 1 - peak)
        .saturating_mul(sharpness);

    for (bar, &value) in bars.iter().enumerate() {
        // NaN clamps to NaN and casts to 0.
        let scaled = (value * f64::from(height) * gain).floor().clamp(0.0, tallest) as i64;
        let top = half_y - scaled / 2;
        let x0 = bar as u32 * scale_x;

        for y in visible_rows(top, scaled, h, reach) {
            for i in 0..i64::from(scale_x) {
                // Columns away from the bar's center are pulled toward the midline.
                let mut adjust = -(i - peak).abs().saturating_mul(sharpness);
                if y < half_y {
                    adjust = -adjust;
                }
                let py = y.saturating_add(adjust);
                if !(0..h).contains(&py) {
                    continue;
                }
                let (px, py) = (x0 + i as u32, py as u32);
                img.put_pixel(px, py, foreground.sample(bar, px, py, width));
            }
        }
    }

    Ok(img)
}

/// Rows of a bar spanning `top..top + scaled` that can land on a canvas `height` tall once
/// shifted by at most `reach` pixels.
fn visible_rows(top: i64, scaled: i64, height: i64, reach: i64) -> Range<i64> {
    let start = top.max(0i64.saturating_sub(reach));
    let end = top.saturating_add(scaled).min(height.saturating_add(reach));
    start..end.max(start)
}

fn canvas_size(bars: usize, policy: &RenderPolicy) -> Result<(u32, u32), EngineError> {
    let width = (bars as u64).saturating_mul(u64::from(policy.scale_x.get()));
    let height = u64::from(BASE_HEIGHT) * u64::from(policy.scale_y.get());
    if width == 0 {
        return Err(EngineError::InvalidData("no waveform bars to draw".to_owned()));
    }
    if width.saturating_mul(height) > MAX_IMAGE_PIXELS {
        return Err(EngineError::Unclassified(format!(
            "{width}x{height} image exceeds the {MAX_IMAGE_PIXELS} pixel limit"
        )));
    }
    // Both fit: their product is below MAX_IMAGE_PIXELS.
    Ok((width as u32, height as u32))
}

struct FillSampler {
    fill: ColorFill,
    rng: Option<StdRng>,
}

impl FillSampler {
    fn new(fill: ColorFill, seed: Option<u64>) -> Self {
        let rng = matches!(fill, ColorFill::Fuzz { .. }).then(|| match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        });
        Self { fill, rng }
    }

    fn sample(&mut self, bar: usize, x: u32, y: u32, width: u32) -> Rgba<u8> {
        let color = match self.fill {
            ColorFill::Solid(c) => c,
            ColorFill::Checker { a, b, period } => {
                let period = period.max(1);
                if ((x / period) ^ (y / period)) & 1 == 1 { b } else { a }
            }
            ColorFill::Stripe { a, b } => {
                if bar % 2 == 1 { b } else { a }
            }
            ColorFill::Gradient { start, end } => {
                lerp(start, end, f64::from(x) / f64::from(width.saturating_sub(1).max(1)))
            }
            ColorFill::Fuzz { a, b } => match self.rng.as_mut() {
                Some(rng) => {
                    if rng.gen_bool(0.5) { b } else { a }
                }
                None => a,
            },
        };
        color.to_rgba()
    }
}

fn lerp(start: Rgb8, end: Rgb8, t: f64) -> Rgb8 {
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t) as u8;
    Rgb8::new(
        mix(start.r, end.r),
        mix(start.g, end.g),
        mix(start.b, end.b),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/engine/raster.rs"]
mod tests;
