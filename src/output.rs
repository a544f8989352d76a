//! Output sinks: files, clipboard and the system viewer.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::process::Command;

use arboard::{Clipboard, ImageData};
use tracing::debug;

use crate::error::Error;

/// Writes bytes to `path`, creating parent directories as needed.
pub fn write_file(path: impl AsRef<Path>, data: &[u8]) -> Result<(), Error> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, data)?;
    debug!(path = %path.display(), bytes = data.len(), "wrote output file");
    Ok(())
}

/// Copies text to the system clipboard.
pub fn copy_text(text: &str) -> Result<(), Error> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Copies PNG bytes to the system clipboard as an image.
pub fn copy_png(png: &[u8]) -> Result<(), Error> {
    let img = image::load_from_memory(png)?.to_rgba8();
    let (width, height) = img.dimensions();

    let mut clipboard = Clipboard::new()?;
    clipboard.set_image(ImageData {
        width: width as usize,
        height: height as usize,
        bytes: Cow::Owned(img.into_raw()),
    })?;
    Ok(())
}

/// Opens `path` in the platform's default viewer. The viewer is spawned
/// and not waited on.
pub fn open_in_viewer(path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    let mut cmd = if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(path);
        c
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };
    cmd.spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/qr.png");
        write_file(&path, b"payload").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"payload");
    }

    #[test]
    fn test_write_file_existing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.svg");
        write_file(&path, b"<svg/>").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
    }
}
