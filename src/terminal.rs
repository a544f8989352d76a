//! Terminal rendering with Unicode half-block glyphs.
//!
//! Two module rows are packed into one character row, halving the line
//! count a symbol needs on screen.

use crate::color::Rgb;
use crate::error::Error;
use crate::matrix::Matrix;
use crate::options::Options;

/// Controls ANSI color output and inversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalOptions {
    /// Emit 24-bit ANSI color codes for the configured colors.
    pub use_color: bool,
    /// Swap dark and light modules, for dark-background terminals.
    pub invert: bool,
}

/// Encodes `data` and renders it as a terminal text block.
pub fn render_terminal(data: &str, opts: &Options, term: TerminalOptions) -> Result<String, Error> {
    let matrix = Matrix::encode(data, opts)?;
    Ok(render_text(&matrix, opts, term))
}

/// Renders a bordered matrix as half-block text.
///
/// Rows are consumed in pairs; an odd final row borrows a synthetic light
/// row for its lower half. In color mode, set-color sequences are emitted
/// only when the color changes within a character row, the trackers reset
/// at each row start, and every row ends with a style reset.
pub fn render_text(matrix: &Matrix, opts: &Options, term: TerminalOptions) -> String {
    let height = matrix.size();
    if height == 0 {
        return String::new();
    }
    let width = height;

    let mut out = String::new();
    for y in (0..height).step_by(2) {
        let mut last_fg: Option<Rgb> = None;
        let mut last_bg: Option<Rgb> = None;

        for x in 0..width {
            let mut upper = matrix.get(x, y);
            let mut lower = if y + 1 < height { matrix.get(x, y + 1) } else { false };
            if term.invert {
                upper = !upper;
                lower = !lower;
            }

            if term.use_color {
                let (glyph, fg, bg) = block_for(upper, lower, opts.foreground, opts.background);
                if last_fg != Some(fg) {
                    out += &set_fg(fg);
                    last_fg = Some(fg);
                }
                if last_bg != Some(bg) {
                    out += &set_bg(bg);
                    last_bg = Some(bg);
                }
                out.push(glyph);
            } else {
                out.push(glyph_for(upper, lower));
            }
        }

        if term.use_color {
            out += "\x1b[0m";
        }
        out.push('\n');
    }

    out
}

fn glyph_for(upper: bool, lower: bool) -> char {
    match (upper, lower) {
        (true, true) => '█',
        (true, false) => '▀',
        (false, true) => '▄',
        (false, false) => ' ',
    }
}

/// Maps a module pair to its glyph and colors. The all-light pair renders
/// entirely in the background color so empty cells never pick up a
/// foreground tint.
fn block_for(upper: bool, lower: bool, fg: Rgb, bg: Rgb) -> (char, Rgb, Rgb) {
    let glyph = glyph_for(upper, lower);
    if !upper && !lower {
        (glyph, bg, bg)
    } else {
        (glyph, fg, bg)
    }
}

fn set_fg(c: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", c.r, c.g, c.b)
}

fn set_bg(c: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", c.r, c.g, c.b)
}
