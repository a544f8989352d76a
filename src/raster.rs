//! PNG rendering of a module matrix.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::error::Error;
use crate::logo;
use crate::matrix::Matrix;
use crate::options::Options;

/// Encodes `data` and renders it as PNG bytes.
///
/// # Example
///
/// ```rust
/// use qrgen::{raster, Options};
///
/// let png = raster::render_png("https://example.com", &Options::default()).unwrap();
/// assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
/// ```
pub fn render_png(data: &str, opts: &Options) -> Result<Vec<u8>, Error> {
    let matrix = Matrix::encode(data, opts)?;
    let img = render_image(&matrix, opts)?;

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Rasterizes a bordered matrix onto an RGBA canvas, compositing the logo
/// when one is configured.
///
/// Every module occupies `scale = floor(size / modules)` pixels, clamped to
/// at least one, so a request smaller than the module count grows the
/// canvas to one pixel per module instead of dropping modules. When the
/// scaled symbol does not divide the canvas evenly the quiet margin gains
/// an extra trailing pixel; the asymmetry is accepted.
pub fn render_image(matrix: &Matrix, opts: &Options) -> Result<RgbaImage, Error> {
    opts.validate()?;

    let total = matrix.size() as u32;
    if total == 0 {
        return Err(Error::EmptyInput);
    }

    let size = opts.size.max(total);
    let scale = (size / total).max(1);
    let actual = total * scale;
    let pad = (size - actual) / 2;
    debug!(size, total, scale, pad, "rasterizing QR symbol");

    let fg = opts.foreground.to_rgba();
    let mut img = RgbaImage::from_pixel(size, size, opts.background.to_rgba());
    for (px, py, pixel) in img.enumerate_pixels_mut() {
        if px < pad || py < pad {
            continue;
        }
        let (x, y) = ((px - pad) / scale, (py - pad) / scale);
        if x < total && y < total && matrix.get(x as usize, y as usize) {
            *pixel = fg;
        }
    }

    logo::overlay_logo(&mut img, opts, size)?;

    Ok(img)
}
