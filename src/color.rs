use std::fmt;

use palette::Srgb;

use crate::error::{RankError, Result};

/// An 8-bit RGB color as read from a decoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl PixelColor {
    /// Color used for padding entries.
    pub const WHITE: PixelColor = PixelColor::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Parse `rrggbb` or `#rrggbb` (any case).
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(RankError::InvalidSeed(format!(
                "hex color must be 6 characters, got {s:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| RankError::InvalidSeed(format!("invalid hex color {s:?}")))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// True when every channel of `other` lies within `tolerance` of ours.
    ///
    /// Each channel is bounded independently (not a Euclidean distance), so the
    /// relation is symmetric but not transitive.
    pub fn within_tolerance(&self, other: &PixelColor, tolerance: u32) -> bool {
        let close = |a: u8, b: u8| u32::from(a.abs_diff(b)) <= tolerance;
        close(self.red, other.red) && close(self.green, other.green) && close(self.blue, other.blue)
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl fmt::Display for PixelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Srgb<u8>> for PixelColor {
    fn from(c: Srgb<u8>) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}

impl From<PixelColor> for Srgb<u8> {
    fn from(c: PixelColor) -> Self {
        Srgb::new(c.red, c.green, c.blue)
    }
}

impl From<image::Rgb<u8>> for PixelColor {
    fn from(px: image::Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        Self::new(r, g, b)
    }
}

impl From<[u8; 3]> for PixelColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}
