//! Error taxonomy for triptych operations.
//!
//! Every mutation and external tool call reports one of these variants.
//! The app layer turns them into a single status-line message, so the `Display`
//! output is written for the status line.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FmError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("File exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Cannot move across devices: {}", .0.display())]
    CrossDevice(PathBuf),

    #[error("Cannot paste a directory into itself: {}", .0.display())]
    IntoItself(PathBuf),

    #[error("{0} is not installed")]
    ToolMissing(String),

    #[error("{tool} failed ({status})")]
    ToolFailed { tool: String, status: String },

    #[error("{0} produced no output")]
    EmptyOutput(String),

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("Clipboard empty")]
    ClipboardEmpty,
}

pub type FmResult<T> = Result<T, FmError>;

impl FmError {
    /// Maps an io error raised while touching `path` into the matching variant.
    pub fn at(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FmError::NotFound(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => FmError::AlreadyExists(path.to_path_buf()),
            io::ErrorKind::CrossesDevices => FmError::CrossDevice(path.to_path_buf()),
            _ => FmError::Io(err),
        }
    }

    /// Maps a spawn error for `tool`; a missing binary becomes [FmError::ToolMissing].
    pub fn spawn(err: io::Error, tool: &str) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            FmError::ToolMissing(tool.to_string())
        } else {
            FmError::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_kinds_map_to_variants() {
        let p = Path::new("/tmp/x");
        let e = FmError::at(io::Error::from(io::ErrorKind::NotFound), p);
        assert!(matches!(e, FmError::NotFound(ref q) if q == p));

        let e = FmError::at(io::Error::from(io::ErrorKind::AlreadyExists), p);
        assert!(matches!(e, FmError::AlreadyExists(_)));

        let e = FmError::at(io::Error::from(io::ErrorKind::PermissionDenied), p);
        assert!(matches!(e, FmError::Io(_)));
    }

    #[test]
    fn spawn_not_found_is_tool_missing() {
        let e = FmError::spawn(io::Error::from(io::ErrorKind::NotFound), "bat");
        assert_eq!(e.to_string(), "bat is not installed");
    }

    #[test]
    fn display_messages() {
        assert_eq!(FmError::ClipboardEmpty.to_string(), "Clipboard empty");
        let e = FmError::ToolFailed {
            tool: "zip".into(),
            status: "exit status: 12".into(),
        };
        assert_eq!(e.to_string(), "zip failed (exit status: 12)");
        assert_eq!(
            FmError::AlreadyExists(PathBuf::from("a.txt")).to_string(),
            "File exists: a.txt"
        );
    }
}
