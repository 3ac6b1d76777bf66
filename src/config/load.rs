//! Config loading for triptych.
//!
//! Handles finding, reading and deserializing `triptych.toml` into [RawConfig], and
//! converting it into the [Config] used at runtime. Also writes the default file for
//! `tri --init`.

use crate::config::{Display, General, InternalGeneral, Keys, OpenerTools, PreviewTools};

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Configuration exactly as read from the toml file.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    display: Display,
    preview: PreviewTools,
    opener: OpenerTools,
    keys: Keys,
}

/// Processed configuration, borrowed by the app for its whole lifetime.
#[derive(Debug, Default)]
pub struct Config {
    general: InternalGeneral,
    display: Display,
    preview: PreviewTools,
    opener: OpenerTools,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            display: raw.display,
            preview: raw.preview,
            opener: raw.opener,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Loads the config from [Config::default_path].
    ///
    /// A missing file or a parse error falls back to the internal defaults.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("[triptych] Error parsing config: {}", e);
                Self::default()
            }
        }
    }

    /// Reads and parses a specific config file.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> io::Result<Self> {
        toml::from_str::<RawConfig>(content)
            .map(Config::from)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Replaces the pin file location.
    pub fn with_pins_file(mut self, path: PathBuf) -> Self {
        self.general.set_pins_file(path);
        self
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    #[inline]
    pub fn preview(&self) -> &PreviewTools {
        &self.preview
    }

    #[inline]
    pub fn opener(&self) -> &OpenerTools {
        &self.opener
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the configuration file path.
    /// Checks TRIPTYCH_CONFIG first, then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/triptych/triptych.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("TRIPTYCH_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("triptych/triptych.toml");
        }

        if let Some(home) = dirs::home_dir() {
            return home.join(".config/triptych/triptych.toml");
        }
        PathBuf::from("triptych.toml")
    }

    /// Writes the commented default config to `path`. Fails if the file already exists.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

const DEFAULT_TOML: &str = r##"# triptych.toml - default configuration for triptych
#
# Commented values are the internal defaults.

[general]
# show_hidden = false
# pins_file = "~/.local/share/triptych/pins"
# log_file = "~/.cache/triptych/triptych.log"

[display]
# pins = true
# icons = true

[display.layout]
# pins = 15
# parent = 20
# main = 35
# preview = 30

[preview]
# transcoder = "ffmpeg"
# thumbnail_width = 400
# highlighter = "bat"
# highlighter_fallback = "batcat"

[opener]
# cmd = "xdg-open"
# media_player = "mpv"
# archiver = "zip"

[keys]
# go_up = ["k", "Up"]
# go_down = ["j", "Down"]
# go_parent = ["h", "Left", "Backspace"]
# open = ["l", "Right", "Enter"]
# go_to_top = ["g"]
# go_to_bottom = ["G"]
# toggle_select = ["space", "v"]
# select_all = ["a"]
# clear_selection = ["Esc"]
# yank = ["y"]
# cut = ["x"]
# paste = ["p"]
# rename = ["r"]
# create = ["n"]
# create_directory = ["N"]
# delete = ["d"]
# zip = ["z"]
# pin = ["b"]
# unpin = ["u"]
# toggle_focus = ["Tab"]
# toggle_hidden = ["."]
# quit = ["q"]
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use tempfile::tempdir;

    #[test]
    fn default_toml_parses_to_defaults() -> Result<(), Box<dyn error::Error>> {
        let cfg = Config::parse(DEFAULT_TOML)?;
        assert!(!cfg.general().show_hidden());
        assert!(cfg.display().pins());
        assert_eq!(cfg.preview().highlighters(), vec!["bat", "batcat"]);
        assert_eq!(cfg.keys().go_down(), ["j", "Down"]);
        Ok(())
    }

    #[test]
    fn partial_sections_keep_other_defaults() -> Result<(), Box<dyn error::Error>> {
        let cfg = Config::parse(
            r#"
            [general]
            show_hidden = true
            pins_file = "/tmp/triptych-test-pins"

            [preview]
            highlighter_fallback = ""

            [keys]
            quit = ["Q"]
            "#,
        )?;
        assert!(cfg.general().show_hidden());
        assert_eq!(cfg.general().pins_file(), Path::new("/tmp/triptych-test-pins"));
        assert_eq!(cfg.preview().highlighters(), vec!["bat"]);
        assert_eq!(cfg.keys().quit(), ["Q"]);
        assert_eq!(cfg.keys().yank(), ["y"]);
        assert_eq!(cfg.opener().archiver(), "zip");
        Ok(())
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::parse("[general]\nshow_hidden = 3").is_err());
    }

    #[test]
    fn generate_default_refuses_overwrite() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("triptych.toml");
        Config::generate_default(&path)?;
        assert!(path.is_file());
        assert!(Config::generate_default(&path).is_err());
        Config::load_from(&path)?;
        Ok(())
    }
}
