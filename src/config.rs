//! TOML config file loading.
//!
//! Values merge beneath CLI flags and `QR_*` environment variables:
//! an explicitly set flag always wins, then the environment, then the
//! config file, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

/// Top-level config file contents. Keys mirror the CLI flag names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileConfig {
    pub output: Option<PathBuf>,
    pub size: Option<u32>,
    pub format: Option<String>,
    pub level: Option<String>,
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub border: Option<i64>,
    pub logo: Option<PathBuf>,
    pub logo_scale: Option<f64>,
    pub invert: Option<bool>,
    pub terminal_color: Option<bool>,
    pub terminal: Option<bool>,
    pub open: Option<bool>,
    pub copy: Option<bool>,
    pub quiet: Option<bool>,
    pub wifi: WifiSection,
    pub vcard: VcardSection,
    pub batch: BatchSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WifiSection {
    pub ssid: Option<String>,
    pub pass: Option<String>,
    pub security: Option<String>,
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct VcardSection {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub org: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BatchSection {
    pub file: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub size: Option<u32>,
    pub format: Option<String>,
    pub prefix: Option<String>,
    pub quiet: Option<bool>,
}

/// Loads the config file.
///
/// An explicitly given path that cannot be read or parsed is an error. The
/// implicit search locations (`./qrgen.toml`, the user config dir, the home
/// dir) are best-effort: a broken file there logs a warning and is skipped.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<FileConfig> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        return toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()));
    }

    for candidate in search_paths() {
        let Ok(text) = fs::read_to_string(&candidate) else {
            continue;
        };
        match toml::from_str(&text) {
            Ok(cfg) => return Ok(cfg),
            Err(err) => {
                warn!(path = %candidate.display(), %err, "skipping unparsable config file");
            }
        }
    }

    Ok(FileConfig::default())
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("qrgen.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("qrgen").join("qrgen.toml"));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join("qrgen.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let cfg: FileConfig = toml::from_str(
            r##"
            size = 512
            format = "svg"
            fg = "#112233"
            logo-scale = 0.3
            terminal-color = true

            [wifi]
            ssid = "HomeNet"
            security = "WPA"

            [batch]
            prefix = "code-"
            "##,
        )
        .unwrap();

        assert_eq!(cfg.size, Some(512));
        assert_eq!(cfg.format.as_deref(), Some("svg"));
        assert_eq!(cfg.fg.as_deref(), Some("#112233"));
        assert_eq!(cfg.logo_scale, Some(0.3));
        assert_eq!(cfg.terminal_color, Some(true));
        assert_eq!(cfg.wifi.ssid.as_deref(), Some("HomeNet"));
        assert_eq!(cfg.batch.prefix.as_deref(), Some("code-"));
        assert_eq!(cfg.border, None);
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let cfg: FileConfig = toml::from_str("").unwrap();
        assert!(cfg.size.is_none());
        assert!(cfg.wifi.ssid.is_none());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        assert!(load(Some(Path::new("no/such/qrgen.toml"))).is_err());
    }

    #[test]
    fn test_explicit_file_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "size = 128\nborder = 2").unwrap();
        let cfg = load(Some(file.path())).unwrap();
        assert_eq!(cfg.size, Some(128));
        assert_eq!(cfg.border, Some(2));
    }

    #[test]
    fn test_explicit_broken_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "size = ").unwrap();
        assert!(load(Some(file.path())).is_err());
    }
}
