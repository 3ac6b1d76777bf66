//! The `[general]` section.
//!
//! [General] is what the toml file holds; [InternalGeneral] resolves the optional
//! paths against the platform data and cache directories.

use crate::core::pins;
use crate::utils::expand_home_path;

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    pins_file: Option<String>,
    log_file: Option<String>,
}

#[derive(Debug)]
pub struct InternalGeneral {
    show_hidden: bool,
    pins_file: PathBuf,
    log_file: PathBuf,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        let pins_file = g
            .pins_file
            .as_deref()
            .map(expand_home_path)
            .unwrap_or_else(pins::default_path);
        let log_file = g
            .log_file
            .as_deref()
            .map(expand_home_path)
            .unwrap_or_else(default_log_path);
        Self {
            show_hidden: g.show_hidden,
            pins_file,
            log_file,
        }
    }
}

impl Default for InternalGeneral {
    fn default() -> Self {
        General::default().into()
    }
}

impl InternalGeneral {
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn pins_file(&self) -> &Path {
        &self.pins_file
    }

    #[inline]
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Points the pin file somewhere else.
    pub fn set_pins_file(&mut self, path: PathBuf) {
        self.pins_file = path;
    }
}

fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("triptych")
        .join("triptych.log")
}
