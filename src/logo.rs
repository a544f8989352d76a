//! Logo scaling and compositing for raster and vector output.
//!
//! Overlaying a logo deliberately destroys the modules beneath it; the
//! symbol stays readable only because the caller picked an error correction
//! level with enough redundancy to cover the obscured area.

use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::debug;

use crate::error::Error;
use crate::options::Options;

const DEFAULT_LOGO_SCALE: f64 = 0.2;
const MIN_LOGO_SCALE: f64 = 0.05;
const MAX_LOGO_SCALE: f64 = 0.4;
const LOGO_PADDING_SCALE: f64 = 0.12;

/// Clamps the requested logo scale into `[0.05, 0.4]`; a non-positive
/// value resolves to the default of `0.2`.
pub fn clamp_scale(scale: f64) -> f64 {
    if scale <= 0.0 {
        return DEFAULT_LOGO_SCALE;
    }
    scale.clamp(MIN_LOGO_SCALE, MAX_LOGO_SCALE)
}

fn load_logo(path: &Path) -> Result<DynamicImage, Error> {
    image::open(path).map_err(|source| Error::LogoUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Resizes `src` to fit inside a `size`-pixel square, preserving aspect
/// ratio, and centers it on a transparent background.
fn scale_to_square(src: &DynamicImage, size: u32) -> RgbaImage {
    let mut dst = RgbaImage::new(size, size);

    let (src_w, src_h) = (src.width(), src.height());
    if src_w == 0 || src_h == 0 {
        return dst;
    }

    let scale = (size as f64 / src_w as f64).min(size as f64 / src_h as f64);
    let new_w = ((src_w as f64 * scale).round() as u32).max(1);
    let new_h = ((src_h as f64 * scale).round() as u32).max(1);

    let resized = image::imageops::resize(&src.to_rgba8(), new_w, new_h, FilterType::CatmullRom);
    let offset_x = (size.saturating_sub(new_w)) / 2;
    let offset_y = (size.saturating_sub(new_h)) / 2;
    image::imageops::overlay(&mut dst, &resized, i64::from(offset_x), i64::from(offset_y));

    dst
}

/// Loads the logo and pre-renders it as a `size`-pixel square PNG, for
/// embedding into vector output.
fn scaled_logo_png(path: &Path, size: u32) -> Result<Vec<u8>, Error> {
    let logo = load_logo(path)?;
    let scaled = scale_to_square(&logo, size);

    let mut buf = Vec::new();
    scaled.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Composites the configured logo onto the center of a finished raster
/// canvas, painting a background-colored square behind it for contrast.
///
/// A no-op when no logo is configured or the computed logo size rounds
/// below one pixel. An unreadable logo file is an error, never skipped.
pub fn overlay_logo(canvas: &mut RgbaImage, opts: &Options, canvas_size: u32) -> Result<(), Error> {
    let Some(path) = opts.logo_path.as_deref() else {
        return Ok(());
    };

    let scale = clamp_scale(opts.logo_scale);
    let logo_size = (f64::from(canvas_size) * scale).round() as u32;
    if logo_size < 1 {
        return Ok(());
    }

    let padding = (f64::from(logo_size) * LOGO_PADDING_SCALE).round() as u32;
    let bg_size = (logo_size + padding * 2).min(canvas_size);
    let bg_x = (canvas_size - bg_size) / 2;
    let bg_y = (canvas_size - bg_size) / 2;

    let bg = opts.background.to_rgba();
    for y in bg_y..bg_y + bg_size {
        for x in bg_x..bg_x + bg_size {
            canvas.put_pixel(x, y, bg);
        }
    }

    let logo = load_logo(path)?;
    let scaled = scale_to_square(&logo, logo_size);
    let logo_x = (canvas_size - logo_size) / 2;
    let logo_y = (canvas_size - logo_size) / 2;
    image::imageops::overlay(canvas, &scaled, i64::from(logo_x), i64::from(logo_y));
    debug!(logo_size, bg_size, "composited logo onto raster canvas");

    Ok(())
}

/// Builds the SVG fragment for the configured logo: a background rect plus
/// an embedded base64 PNG, both positioned in floating matrix units.
///
/// Returns an empty string when no logo is configured.
pub fn svg_logo_element(opts: &Options, total_modules: usize) -> Result<String, Error> {
    let Some(path) = opts.logo_path.as_deref() else {
        return Ok(String::new());
    };

    let scale = clamp_scale(opts.logo_scale);
    let total = total_modules as f64;
    let logo_units = total * scale;
    let padding_units = logo_units * LOGO_PADDING_SCALE;
    let bg_units = logo_units + padding_units * 2.0;

    let bg_x = (total - bg_units) / 2.0;
    let bg_y = (total - bg_units) / 2.0;
    let logo_x = (total - logo_units) / 2.0;
    let logo_y = (total - logo_units) / 2.0;

    let pixel_size = ((f64::from(opts.size) * scale).round() as u32).max(1);
    let png = scaled_logo_png(path, pixel_size)?;
    let encoded = BASE64.encode(&png);

    Ok(format!(
        r#"<rect x="{bg_x:.2}" y="{bg_y:.2}" width="{bg_units:.2}" height="{bg_units:.2}" fill="{bg}"/><image href="data:image/png;base64,{encoded}" x="{logo_x:.2}" y="{logo_y:.2}" width="{logo_units:.2}" height="{logo_units:.2}"/>"#,
        bg = opts.background.to_hex(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_clamp_scale() {
        assert_eq!(clamp_scale(0.2), 0.2);
        assert_eq!(clamp_scale(0.01), MIN_LOGO_SCALE);
        assert_eq!(clamp_scale(0.9), MAX_LOGO_SCALE);
        assert_eq!(clamp_scale(0.0), DEFAULT_LOGO_SCALE);
        assert_eq!(clamp_scale(-1.0), DEFAULT_LOGO_SCALE);
    }

    #[test]
    fn test_scale_to_square_fits_wide_image() {
        let src = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            40,
            20,
            Rgba([10, 20, 30, 255]),
        ));
        let out = scale_to_square(&src, 20);
        assert_eq!(out.dimensions(), (20, 20));
        // Wide source scales to 20x10, centered vertically; corners stay transparent.
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        assert_eq!(out.get_pixel(10, 10)[3], 255);
    }

    #[test]
    fn test_overlay_without_logo_is_noop() {
        let opts = Options::default();
        let mut canvas = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
        let before = canvas.clone();
        overlay_logo(&mut canvas, &opts, 16).unwrap();
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_overlay_unreadable_logo_errors() {
        let opts = Options {
            logo_path: Some("no/such/logo.png".into()),
            ..Options::default()
        };
        let mut canvas = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
        assert!(matches!(
            overlay_logo(&mut canvas, &opts, 64),
            Err(Error::LogoUnreadable { .. })
        ));
    }

    #[test]
    fn test_overlay_paints_contrast_square() {
        let dir = tempfile::tempdir().unwrap();
        let logo_path = dir.path().join("logo.png");
        RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]))
            .save(&logo_path)
            .unwrap();

        let opts = Options {
            logo_path: Some(logo_path),
            ..Options::default()
        };
        // Start from an all-foreground canvas so the contrast square shows.
        let mut canvas = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
        overlay_logo(&mut canvas, &opts, 100).unwrap();

        // logo 20px, padding 2px: background square spans 38..62.
        assert_eq!(*canvas.get_pixel(39, 39), Rgba([255, 255, 255, 255]));
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        // Logo pixels land in the center.
        assert_eq!(*canvas.get_pixel(50, 50), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_svg_element_embeds_base64() {
        let dir = tempfile::tempdir().unwrap();
        let logo_path = dir.path().join("logo.png");
        RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]))
            .save(&logo_path)
            .unwrap();

        let opts = Options {
            logo_path: Some(logo_path),
            ..Options::default()
        };
        let element = svg_logo_element(&opts, 33).unwrap();
        assert!(element.contains("data:image/png;base64,"));
        assert!(element.starts_with("<rect"));
    }

    #[test]
    fn test_svg_element_empty_without_logo() {
        assert_eq!(svg_logo_element(&Options::default(), 33).unwrap(), "");
    }
}
