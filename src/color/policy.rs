use std::{fmt, str::FromStr};

use crate::{
    color::hex::{Rgb8, hex_to_rgb},
    foundation::error::{WaveformError, WaveformResult},
};

/// Side length, in pixels, of one checkerboard cell.
pub const CHECKER_PERIOD: u32 = 10;

/// How foreground colors are distributed across the waveform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorStrategy {
    /// Foreground and alternate in a fixed checkerboard.
    Checker,
    /// Random pick between foreground and alternate per pixel.
    Fuzz,
    /// Interpolation from foreground to alternate along the time axis.
    Gradient,
    /// Foreground only.
    Solid,
    /// Foreground and alternate per waveform bar.
    Stripe,
}

impl ColorStrategy {
    /// Every strategy, in the order they are listed to users.
    pub const ALL: [Self; 5] = [
        Self::Checker,
        Self::Fuzz,
        Self::Gradient,
        Self::Solid,
        Self::Stripe,
    ];

    /// Identifier accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Checker => "checker",
            Self::Fuzz => "fuzz",
            Self::Gradient => "gradient",
            Self::Solid => "solid",
            Self::Stripe => "stripe",
        }
    }

    /// Help string listing the accepted identifiers, e.g. `[options: checker, fuzz, ...]`.
    pub fn options() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|s| s.name()).collect();
        format!("[options: {}]", names.join(", "))
    }

    /// Whether rendering with this strategy gives identical pixels on every run.
    pub fn is_deterministic(self) -> bool {
        !matches!(self, Self::Fuzz)
    }
}

impl fmt::Display for ColorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorStrategy {
    type Err = WaveformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| {
                WaveformError::config(format!("unknown function: {s:?} {}", Self::options()))
            })
    }
}

/// Concrete coloring function handed to the rendering engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorFill {
    /// Every pixel in one color.
    Solid(Rgb8),
    /// `a` and `b` alternate every `period` pixels in both axes.
    Checker {
        /// Color of even cells.
        a: Rgb8,
        /// Color of odd cells.
        b: Rgb8,
        /// Cell size in pixels.
        period: u32,
    },
    /// `a` on even bars, `b` on odd bars.
    Stripe {
        /// Even bar color.
        a: Rgb8,
        /// Odd bar color.
        b: Rgb8,
    },
    /// Linear blend from `start` (left edge) to `end` (right edge).
    Gradient {
        /// Color at the left edge.
        start: Rgb8,
        /// Color at the right edge.
        end: Rgb8,
    },
    /// Uniform random choice between `a` and `b`.
    Fuzz {
        /// First candidate.
        a: Rgb8,
        /// Second candidate.
        b: Rgb8,
    },
}

/// Resolved colors plus the selected strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPolicy {
    /// Color behind the waveform.
    pub background: Rgb8,
    /// Primary waveform color.
    pub foreground: Rgb8,
    /// Secondary waveform color; equals `foreground` when none was given.
    pub alternate: Rgb8,
    /// Distribution of `foreground`/`alternate` over the waveform.
    pub strategy: ColorStrategy,
}

impl ColorPolicy {
    /// Resolve hex color strings and a strategy name.
    ///
    /// Malformed colors silently become black. An empty `alt_hex` copies the foreground. An
    /// unknown `strategy` is a [`WaveformError::Config`] and must stop the process before any
    /// request is handled.
    pub fn resolve(
        bg_hex: &str,
        fg_hex: &str,
        alt_hex: &str,
        strategy: &str,
    ) -> WaveformResult<Self> {
        let strategy: ColorStrategy = strategy.parse()?;
        let foreground = hex_to_rgb(fg_hex);
        let alternate = if alt_hex.is_empty() {
            foreground
        } else {
            hex_to_rgb(alt_hex)
        };

        Ok(Self {
            background: hex_to_rgb(bg_hex),
            foreground,
            alternate,
            strategy,
        })
    }

    /// The coloring function used for waveform pixels.
    pub fn foreground_fill(&self) -> ColorFill {
        let (a, b) = (self.foreground, self.alternate);
        match self.strategy {
            ColorStrategy::Checker => ColorFill::Checker {
                a,
                b,
                period: CHECKER_PERIOD,
            },
            ColorStrategy::Fuzz => ColorFill::Fuzz { a, b },
            ColorStrategy::Gradient => ColorFill::Gradient { start: a, end: b },
            ColorStrategy::Solid => ColorFill::Solid(a),
            ColorStrategy::Stripe => ColorFill::Stripe { a, b },
        }
    }

    /// The coloring function used behind the waveform.
    pub fn background_fill(&self) -> ColorFill {
        ColorFill::Solid(self.background)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/policy.rs"]
mod tests;
