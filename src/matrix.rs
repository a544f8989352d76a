//! Module matrix: encoding entry point and quiet-zone padding.

use qrcode::QrCode;
use tracing::debug;

use crate::error::Error;
use crate::options::Options;

/// A square, row-major grid of modules; `true` is dark, `false` is light.
///
/// Immutable once built. Produced either by [`Matrix::encode`] or by
/// padding an existing matrix with [`Matrix::with_border`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    size: usize,
    modules: Vec<bool>,
}

impl Matrix {
    /// Builds a matrix from row-major module values.
    ///
    /// # Panics
    ///
    /// Panics if `modules.len() != size * size`.
    pub fn from_modules(size: usize, modules: Vec<bool>) -> Self {
        assert_eq!(modules.len(), size * size, "module count must be size squared");
        Matrix { size, modules }
    }

    /// Encodes `data` and applies the configured quiet zone.
    ///
    /// Selects the smallest symbol version that holds the payload under the
    /// requested error correction level. Empty (or all-whitespace) input is
    /// rejected; oversized input surfaces the encoder's capacity error.
    pub fn encode(data: &str, opts: &Options) -> Result<Matrix, Error> {
        if data.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let code = QrCode::with_error_correction_level(data, opts.level.to_ec_level())
            .map_err(Error::Encode)?;

        let size = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();
        let matrix = Matrix { size, modules };
        debug!(size, border = opts.border, "encoded QR symbol");

        Ok(matrix.with_border(opts.border as usize))
    }

    /// Edge length in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module value at `(x, y)`. Coordinates must be in bounds.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.size + x]
    }

    /// Number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| **m).count()
    }

    /// Returns a copy padded with a light quiet zone of width `border`.
    ///
    /// The result has edge `size + 2 * border`; the original modules sit
    /// unchanged at offset `(border, border)`. A zero border returns a
    /// plain copy, the caller's matrix is never mutated.
    pub fn with_border(&self, border: usize) -> Matrix {
        if border == 0 || self.size == 0 {
            return self.clone();
        }

        let total = self.size + border * 2;
        let mut modules = vec![false; total * total];
        for y in 0..self.size {
            let src = y * self.size;
            let dst = (y + border) * total + border;
            modules[dst..dst + self.size].copy_from_slice(&self.modules[src..src + self.size]);
        }

        Matrix { size: total, modules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_dark(size: usize) -> Matrix {
        Matrix::from_modules(size, vec![true; size * size])
    }

    #[test]
    fn test_border_dimensions() {
        for border in 0..5 {
            let padded = all_dark(21).with_border(border);
            assert_eq!(padded.size(), 21 + 2 * border);
        }
    }

    #[test]
    fn test_border_ring_is_light() {
        let border = 3;
        let padded = all_dark(7).with_border(border);
        let total = padded.size();
        for y in 0..total {
            for x in 0..total {
                let inside = x >= border && x < total - border && y >= border && y < total - border;
                assert_eq!(padded.get(x, y), inside, "module at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_zero_border_is_identity() {
        let m = Matrix::from_modules(2, vec![true, false, false, true]);
        assert_eq!(m.with_border(0), m);
    }

    #[test]
    fn test_center_copied_unchanged() {
        let m = Matrix::from_modules(2, vec![true, false, false, true]);
        let padded = m.with_border(4);
        assert!(padded.get(4, 4));
        assert!(!padded.get(5, 4));
        assert!(!padded.get(4, 5));
        assert!(padded.get(5, 5));
    }

    #[test]
    fn test_encode_rejects_empty() {
        assert!(matches!(Matrix::encode("", &Options::default()), Err(Error::EmptyInput)));
        assert!(matches!(Matrix::encode("   ", &Options::default()), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_encode_applies_border() {
        let opts = Options { border: 4, ..Options::default() };
        let bare = Matrix::encode("https://example.com", &Options { border: 0, ..opts.clone() })
            .unwrap();
        let padded = Matrix::encode("https://example.com", &opts).unwrap();
        assert_eq!(padded.size(), bare.size() + 8);
        // QR symbols are odd-sized; even padding keeps them odd.
        assert_eq!(padded.size() % 2, 1);
    }

    #[test]
    fn test_encode_unicode() {
        assert!(Matrix::encode("こんにちは", &Options::default()).is_ok());
    }

    #[test]
    fn test_encode_capacity_error() {
        let huge = "a".repeat(8000);
        assert!(matches!(
            Matrix::encode(&huge, &Options::default()),
            Err(Error::Encode(_))
        ));
    }

    #[test]
    fn test_dark_count() {
        let m = Matrix::from_modules(2, vec![true, false, false, true]);
        assert_eq!(m.dark_count(), 2);
        assert_eq!(m.with_border(1).dark_count(), 2);
    }
}
