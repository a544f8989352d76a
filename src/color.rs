//! Neutral RGB color type with hex parsing and formatting.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An 8-bit-per-channel RGB color.
///
/// Parsed from a 6-hex-digit triplet with an optional leading `#`,
/// case-insensitive. Any other length is rejected as [`Error::InvalidColor`].
///
/// # Example
///
/// ```rust
/// use qrgen::color::Rgb;
///
/// let fg: Rgb = "#1a2b3c".parse().unwrap();
/// assert_eq!(fg, Rgb::new(0x1a, 0x2b, 0x3c));
/// assert_eq!(fg.to_hex(), "#1a2b3c");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Formats as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Converts to a fully opaque RGBA pixel.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let parse = |range| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Rgb { r: parse(0..2)?, g: parse(2..4)?, b: parse(4..6)? })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
