//! Nerd Font icons for entries.
//!
//! A handful of extensions get a language specific glyph; everything else falls back
//! to one glyph per [EntryKind].

use crate::core::catalog::Entry;
use crate::core::kind::EntryKind;

use phf::phf_map;

static EXT_ICON_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "rs" => "\u{e7a8}",
    "py" => "\u{e606}",
    "js" => "\u{e74e}",
    "ts" => "\u{e628}",
    "md" => "\u{f48a}",
    "html" => "\u{e736}",
    "css" => "\u{e749}",
    "json" => "\u{e60b}",
    "toml" => "\u{e6b2}",
    "sh" => "\u{e795}",
    "go" => "\u{e627}",
    "c" => "\u{e61e}",
    "cpp" => "\u{e61d}",
    "h" => "\u{f0fd}",
    "lua" => "\u{e620}",
    "zip" => "\u{f1c6}",
    "tar" => "\u{f1c6}",
    "gz" => "\u{f1c6}",
    "pdf" => "\u{f1c1}",
};

fn kind_icon(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Directory => "\u{f07b}",
        EntryKind::Video => "\u{f03d}",
        EntryKind::Image => "\u{f03e}",
        EntryKind::Audio => "\u{f001}",
        EntryKind::Code => "\u{f121}",
        EntryKind::Other => "\u{f15b}",
    }
}

pub fn nerd_font_icon(entry: &Entry) -> &'static str {
    if entry.is_dir() {
        return kind_icon(EntryKind::Directory);
    }
    EXT_ICON_MAP
        .get(entry.ext())
        .copied()
        .unwrap_or_else(|| kind_icon(entry.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn directory_and_extension_icons() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let sub = dir.path().join("sub.rs");
        fs::create_dir(&sub)?;
        let file = dir.path().join("main.RS");
        fs::write(&file, "")?;
        let clip = dir.path().join("clip.mkv");
        fs::write(&clip, "")?;

        assert_eq!(nerd_font_icon(&Entry::from_path(sub)), "\u{f07b}");
        assert_eq!(nerd_font_icon(&Entry::from_path(file)), "\u{e7a8}");
        assert_eq!(nerd_font_icon(&Entry::from_path(clip)), "\u{f03d}");
        Ok(())
    }
}
