//! Render configuration and the closed set of output formats.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::color::Rgb;
use crate::error::Error;

/// Error correction level, trading data density for redundancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ecc {
    /// Recovers ~7% of data.
    Low,
    /// Recovers ~15% of data.
    #[default]
    Medium,
    /// Recovers ~25% of data.
    Quartile,
    /// Recovers ~30% of data.
    High,
}

impl Ecc {
    /// Parses the single-letter level name. Unrecognized input falls back
    /// to [`Ecc::Medium`], matching the CLI default.
    pub fn parse(s: &str) -> Ecc {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ecc::Low,
            "M" => Ecc::Medium,
            "Q" => Ecc::Quartile,
            "H" => Ecc::High,
            _ => Ecc::Medium,
        }
    }

    pub(crate) fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            Ecc::Low => qrcode::EcLevel::L,
            Ecc::Medium => qrcode::EcLevel::M,
            Ecc::Quartile => qrcode::EcLevel::Q,
            Ecc::High => qrcode::EcLevel::H,
        }
    }
}

/// Output format, dispatched as a closed variant set rather than by
/// open-ended string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
    Terminal,
}

impl OutputFormat {
    /// Infers a format from a file extension, when one is recognized.
    pub fn from_extension(path: &Path) -> Option<OutputFormat> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "svg" => Some(OutputFormat::Svg),
            _ => None,
        }
    }

    /// Default output filename extension for file-backed formats.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Terminal => "terminal",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "terminal" => Ok(OutputFormat::Terminal),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Configures QR code generation.
///
/// `size` is the requested canvas edge in pixels; when it is smaller than
/// the bordered module count the raster output grows to one pixel per
/// module instead of shrinking below readability.
#[derive(Debug, Clone)]
pub struct Options {
    /// Requested image size in pixels.
    pub size: u32,
    /// Error correction level.
    pub level: Ecc,
    pub foreground: Rgb,
    pub background: Rgb,
    /// Quiet-zone width in modules.
    pub border: u32,
    /// Optional logo image to overlay on the symbol center.
    pub logo_path: Option<PathBuf>,
    /// Logo edge as a fraction of the canvas, clamped to `[0.05, 0.4]`.
    pub logo_scale: f64,
}

impl Default for Options {
    /// Sensible defaults: 256px, level M, black on white, 4-module border.
    fn default() -> Self {
        Options {
            size: 256,
            level: Ecc::Medium,
            foreground: Rgb::BLACK,
            background: Rgb::WHITE,
            border: 4,
            logo_path: None,
            logo_scale: 0.2,
        }
    }
}

impl Options {
    /// Rejects configurations no renderer can satisfy.
    pub fn validate(&self) -> Result<(), Error> {
        if self.size == 0 {
            return Err(Error::InvalidCanvasSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecc_parse() {
        assert_eq!(Ecc::parse("L"), Ecc::Low);
        assert_eq!(Ecc::parse("m"), Ecc::Medium);
        assert_eq!(Ecc::parse("q"), Ecc::Quartile);
        assert_eq!(Ecc::parse(" H "), Ecc::High);
        assert_eq!(Ecc::parse("X"), Ecc::Medium);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_extension(Path::new("a/qr.PNG")), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_extension(Path::new("qr.svg")), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_extension(Path::new("qr.txt")), None);
        assert_eq!(OutputFormat::from_extension(Path::new("qr")), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("Terminal".parse::<OutputFormat>().unwrap(), OutputFormat::Terminal);
        assert!(matches!("bmp".parse::<OutputFormat>(), Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let opts = Options { size: 0, ..Options::default() };
        assert!(matches!(opts.validate(), Err(Error::InvalidCanvasSize)));
    }
}
