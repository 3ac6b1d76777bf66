//! The `[preview]` and `[opener]` sections: which external programs to run.

use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct PreviewTools {
    transcoder: String,
    thumbnail_width: u32,
    highlighter: String,
    highlighter_fallback: String,
}

impl Default for PreviewTools {
    fn default() -> Self {
        PreviewTools {
            transcoder: "ffmpeg".into(),
            thumbnail_width: 400,
            highlighter: "bat".into(),
            highlighter_fallback: "batcat".into(),
        }
    }
}

impl PreviewTools {
    #[inline]
    pub fn transcoder(&self) -> &str {
        &self.transcoder
    }

    #[inline]
    pub fn thumbnail_width(&self) -> u32 {
        self.thumbnail_width.max(16)
    }

    /// Highlighter binaries in the order they are tried. Blank names are skipped.
    pub fn highlighters(&self) -> Vec<&str> {
        [self.highlighter.trim(), self.highlighter_fallback.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct OpenerTools {
    cmd: String,
    media_player: String,
    archiver: String,
}

impl Default for OpenerTools {
    fn default() -> Self {
        let cmd = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        OpenerTools {
            cmd: cmd.into(),
            media_player: "mpv".into(),
            archiver: "zip".into(),
        }
    }
}

impl OpenerTools {
    #[inline]
    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    #[inline]
    pub fn media_player(&self) -> &str {
        &self.media_player
    }

    #[inline]
    pub fn archiver(&self) -> &str {
        &self.archiver
    }
}
