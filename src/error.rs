//! Error type shared by every library operation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while encoding, rendering or decoding QR codes.
///
/// Rendering is deterministic: a given input always produces the same
/// artifact or the same error, so callers never need retry logic.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no data provided")]
    EmptyInput,

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("size must be greater than zero")]
    InvalidCanvasSize,

    #[error("border size must be zero or positive")]
    InvalidBorder,

    /// The encoder could not fit the payload into any supported symbol
    /// version, or rejected it outright.
    #[error("QR encoding failed: {0:?}")]
    Encode(qrcode::types::QrError),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read logo {path}: {source}")]
    LogoUnreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no QR code data found")]
    SymbolNotFound,

    #[error("clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
