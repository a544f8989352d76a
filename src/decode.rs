//! QR payload extraction from images.

use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::error::Error;

/// Extracts every readable QR payload from an image.
///
/// Grids that are detected but fail to decode are skipped; an image with
/// no readable symbol at all is [`Error::SymbolNotFound`].
pub fn decode_image(img: &DynamicImage) -> Result<Vec<String>, Error> {
    let mut prepared = rqrr::PreparedImage::prepare(img.to_luma8());
    let grids = prepared.detect_grids();
    debug!(grids = grids.len(), "detected QR grids");

    let mut results = Vec::new();
    for grid in grids {
        match grid.decode() {
            Ok((_, content)) => results.push(content),
            Err(err) => debug!(?err, "skipping undecodable grid"),
        }
    }

    if results.is_empty() {
        return Err(Error::SymbolNotFound);
    }
    Ok(results)
}

/// Loads an image file and extracts QR payloads from it.
pub fn decode_file(path: impl AsRef<Path>) -> Result<Vec<String>, Error> {
    let img = image::open(path)?;
    decode_image(&img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_blank_image_is_symbol_not_found() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            64,
            64,
            Rgba([255, 255, 255, 255]),
        ));
        assert!(matches!(decode_image(&img), Err(Error::SymbolNotFound)));
    }

    #[test]
    fn test_missing_file_is_image_error() {
        assert!(matches!(decode_file("no/such/image.png"), Err(Error::Image(_))));
    }
}
