//! SVG rendering of a module matrix.

use crate::error::Error;
use crate::logo;
use crate::matrix::Matrix;
use crate::options::Options;

/// Encodes `data` and renders it as an SVG document.
pub fn render_svg(data: &str, opts: &Options) -> Result<Vec<u8>, Error> {
    let matrix = Matrix::encode(data, opts)?;
    render_document(&matrix, opts).map(String::into_bytes)
}

/// Renders a bordered matrix as SVG markup.
///
/// The view box spans one unit per module while the requested size only
/// sets the display width/height, so vector output carries none of the
/// raster path's integer truncation. `shape-rendering="crispEdges"` keeps
/// module boundaries sharp at any zoom. The logo element, when configured,
/// is appended after the module group so it draws on top.
pub fn render_document(matrix: &Matrix, opts: &Options) -> Result<String, Error> {
    opts.validate()?;

    let total = matrix.size();
    if total == 0 {
        return Err(Error::EmptyInput);
    }

    let fg = opts.foreground.to_hex();
    let bg = opts.background.to_hex();

    let mut svg = String::new();
    svg += &format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {total} {total}" shape-rendering="crispEdges">"#,
        size = opts.size,
    );
    svg += &format!(r#"<rect width="100%" height="100%" fill="{bg}"/>"#);
    svg += &format!(r#"<g fill="{fg}">"#);

    for y in 0..total {
        for x in 0..total {
            if matrix.get(x, y) {
                svg += &format!(r#"<rect x="{x}" y="{y}" width="1" height="1"/>"#);
            }
        }
    }

    svg += "</g>";
    svg += &logo::svg_logo_element(opts, total)?;
    svg += "</svg>";

    Ok(svg)
}
