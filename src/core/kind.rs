//! Extension based classification of entries.
//!
//! The classification decides both the preview route (image job, text job, raw read)
//! and which external program "open" hands the file to.

use phf::phf_map;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Image,
    Video,
    Audio,
    Code,
    Other,
}

/// How the preview pane obtains content for an entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PreviewKind {
    /// Inline listing built on the UI thread.
    Listing,
    /// Transcoded still frame, drawn through the graphics protocol.
    Image,
    /// Highlighted lines with a raw fallback.
    Text,
    /// Best-effort raw read, never cached.
    Raw,
}

static EXT_KIND: phf::Map<&'static str, EntryKind> = phf_map! {
    "mp4" => EntryKind::Video,
    "mkv" => EntryKind::Video,
    "avi" => EntryKind::Video,
    "mov" => EntryKind::Video,
    "flv" => EntryKind::Video,
    "wmv" => EntryKind::Video,
    "webm" => EntryKind::Video,

    "png" => EntryKind::Image,
    "jpg" => EntryKind::Image,
    "jpeg" => EntryKind::Image,
    "gif" => EntryKind::Image,
    "bmp" => EntryKind::Image,
    "webp" => EntryKind::Image,
    "svg" => EntryKind::Image,
    "tiff" => EntryKind::Image,

    "mp3" => EntryKind::Audio,
    "flac" => EntryKind::Audio,
    "wav" => EntryKind::Audio,
    "ogg" => EntryKind::Audio,
    "m4a" => EntryKind::Audio,
    "opus" => EntryKind::Audio,

    "cpp" => EntryKind::Code,
    "h" => EntryKind::Code,
    "hpp" => EntryKind::Code,
    "c" => EntryKind::Code,
    "py" => EntryKind::Code,
    "js" => EntryKind::Code,
    "ts" => EntryKind::Code,
    "rs" => EntryKind::Code,
    "go" => EntryKind::Code,
    "txt" => EntryKind::Code,
    "md" => EntryKind::Code,
    "json" => EntryKind::Code,
    "toml" => EntryKind::Code,
    "css" => EntryKind::Code,
    "html" => EntryKind::Code,
    "sh" => EntryKind::Code,
    "lua" => EntryKind::Code,
    "conf" => EntryKind::Code,
    "yaml" => EntryKind::Code,
    "yml" => EntryKind::Code,
};

impl EntryKind {
    /// Classifies by lower-cased extension. Directories are decided by the caller.
    pub fn from_ext(ext: &str) -> Self {
        EXT_KIND.get(ext).copied().unwrap_or(EntryKind::Other)
    }

    #[inline]
    pub fn is_media(self) -> bool {
        matches!(self, EntryKind::Video | EntryKind::Audio)
    }

    pub fn preview_kind(self) -> PreviewKind {
        match self {
            EntryKind::Directory => PreviewKind::Listing,
            EntryKind::Image | EntryKind::Video => PreviewKind::Image,
            EntryKind::Code => PreviewKind::Text,
            EntryKind::Audio | EntryKind::Other => PreviewKind::Raw,
        }
    }
}
