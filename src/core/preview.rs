//! Synchronous preview helpers.
//!
//! Binary detection, the bounded raw line reader used as the last fallback tier,
//! and the small formatters shown in the preview header.

use chrono::{DateTime, Local};
use humansize::{BINARY, format_size as humanize};
use unicode_width::UnicodeWidthChar;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::time::SystemTime;

/// Line shown instead of content for files that look binary.
pub const BINARY_MARKER: &str = "[Binary File]";

/// Number of leading bytes scanned for a NUL byte.
const BINARY_PEEK_BYTES: usize = 512;

/// Tab stop width used when expanding tabs.
const TAB_WIDTH: usize = 4;

/// Returns true if the first 512 bytes of `path` contain a NUL byte.
pub fn is_binary(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let mut buf = [0u8; BINARY_PEEK_BYTES];
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(buf[..filled].contains(&0))
}

/// Expands tabs, drops control characters and truncates to `width` display columns.
pub fn fit_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(line.len().min(width));
    let mut col = 0;

    for ch in line.chars() {
        if ch == '\t' {
            let spaces = TAB_WIDTH - (col % TAB_WIDTH);
            if col + spaces > width {
                break;
            }
            out.extend(std::iter::repeat_n(' ', spaces));
            col += spaces;
            continue;
        }
        if ch.is_control() {
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if col + w > width {
            break;
        }
        out.push(ch);
        col += w;
    }
    out
}

/// Reads at most `max_lines` lines of `path`, each fitted to `width`.
///
/// Invalid UTF-8 is replaced lossily. Any io error ends the read and keeps what
/// was collected so far.
pub fn read_lines(path: &Path, max_lines: usize, width: usize) -> Vec<String> {
    let Ok(file) = File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .split(b'\n')
        .take(max_lines)
        .map_while(Result::ok)
        .map(|raw| {
            let text = String::from_utf8_lossy(&raw);
            fit_width(text.trim_end_matches('\r'), width)
        })
        .collect()
}

/// Best-effort preview for unclassified files: binary marker or raw lines.
pub fn raw_preview(path: &Path, max_lines: usize, width: usize) -> Vec<String> {
    match is_binary(path) {
        Ok(true) => vec![BINARY_MARKER.to_string()],
        Ok(false) => read_lines(path, max_lines, width),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "raw preview unreadable");
            Vec::new()
        }
    }
}

/// Formats a byte count with 1024-based units.
pub fn format_size(size: u64) -> String {
    humanize(size, BINARY)
}

/// Formats a modification time in local time, "-" when unknown.
pub fn format_modified(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format("%Y-%m-%d %H:%M").to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}
