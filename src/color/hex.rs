/// An opaque 8-bit-per-channel RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Fallback color for anything that does not parse.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert into a fully opaque RGBA pixel.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

/// Parse `#rgb`, `#rrggbb`, `rgb` or `rrggbb` into a color.
///
/// Never fails: any other length or a non-hex digit yields [`Rgb8::BLACK`], so a malformed
/// flag value still produces a usable (if surprising) color.
pub fn hex_to_rgb(hex: &str) -> Rgb8 {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Rgb8::BLACK;
    }

    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_owned(),
        _ => return Rgb8::BLACK,
    };

    match u32::from_str_radix(&expanded, 16) {
        Ok(rgb) => Rgb8::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
        Err(_) => Rgb8::BLACK,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/hex.rs"]
mod tests;
