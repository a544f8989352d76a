//! # qrgen
//!
//! A Rust library and CLI for generating QR codes with customizable
//! rendering options.
//!
//! `qrgen` turns text into QR codes and renders them as PNG images, SVG
//! documents or Unicode half-block terminal art. Symbol encoding and
//! recognition are delegated to the `qrcode` and `rqrr` crates; everything
//! from the quiet zone outward is handled here: pixel scaling, vector
//! markup, ANSI color output, and logo compositing.
//!
//! ## Features
//!
//! - Render QR codes as PNG bytes, SVG markup or terminal text blocks.
//! - Four error correction levels, custom hex colors, configurable
//!   quiet-zone border.
//! - Overlay a center logo on PNG and SVG output, backed by a contrast
//!   square and the symbol's error correction redundancy.
//! - Decode QR payloads back out of images.
//! - WiFi network and vCard payload templating.
//!
//! ## Example
//!
//! Render a PNG with default options:
//!
//! ```rust
//! use qrgen::{raster, Options};
//!
//! let png = raster::render_png("https://example.com", &Options::default()).unwrap();
//! assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
//! ```
//!
//! Render for a terminal:
//!
//! ```rust
//! use qrgen::terminal::{render_terminal, TerminalOptions};
//! use qrgen::Options;
//!
//! let art = render_terminal("hello", &Options::default(), TerminalOptions::default()).unwrap();
//! print!("{art}");
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: encoding entry point and quiet-zone padding.
//! - [`raster`], [`vector`], [`terminal`]: the three renderers.
//! - [`logo`]: center logo scaling and compositing.
//! - [`decode`]: payload extraction from images.
//! - [`formats`]: WiFi and vCard payload templating.
//! - [`output`]: file, clipboard and viewer sinks.

#![forbid(unsafe_code)]

pub mod color;
pub mod decode;
pub mod error;
pub mod formats;
pub mod logo;
pub mod matrix;
pub mod options;
pub mod output;
pub mod raster;
pub mod terminal;
pub mod vector;

pub use color::Rgb;
pub use error::Error;
pub use matrix::Matrix;
pub use options::{Ecc, Options, OutputFormat};
