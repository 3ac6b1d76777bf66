//! Filesystem mutations for triptych.
//!
//! All operations are synchronous and return [FmResult]. Paste follows the clipboard
//! policy: copy never overwrites (an existing destination is skipped), and a move that
//! crosses devices falls back to copy-then-delete.

use crate::core::error::{FmError, FmResult};

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Clipboard mode a paste runs under.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PasteMode {
    Copy,
    Cut,
}

/// Per-item paste outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PasteOutcome {
    Done,
    Skipped,
}

/// Checks a user supplied entry name and returns it trimmed.
pub fn validate_name(name: &str) -> FmResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains('/')
        || trimmed.contains('\0')
        || (cfg!(windows) && trimmed.contains('\\'))
    {
        return Err(FmError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}

/// Deepest directory nesting [copy_recursive] descends into.
pub const MAX_COPY_DEPTH: usize = 64;

/// Recursively copies files and directories from `src` to `dest`.
///
/// Symlinks are recreated as links and never followed.
pub fn copy_recursive(src: &Path, dest: &Path) -> io::Result<()> {
    copy_entry(src, dest, 0)
}

fn copy_entry(src: &Path, dest: &Path, depth: usize) -> io::Result<()> {
    let meta = fs::symlink_metadata(src)?;
    if meta.is_symlink() {
        return copy_link(src, dest);
    }
    if !meta.is_dir() {
        fs::copy(src, dest)?;
        return Ok(());
    }

    if depth >= MAX_COPY_DEPTH {
        return Err(io::Error::other(format!(
            "maximum copy depth ({MAX_COPY_DEPTH}) exceeded at {}",
            src.display()
        )));
    }
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        copy_entry(&entry.path(), &dest.join(entry.file_name()), depth + 1)?;
    }
    Ok(())
}

#[cfg(unix)]
fn copy_link(src: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(src)?, dest)
}

#[cfg(not(unix))]
fn copy_link(src: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(src, dest).map(|_| ())
}

/// Removes a file, or a directory with all of its contents.
pub fn remove_path(path: &Path) -> FmResult<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| FmError::at(e, path))?;
    let res = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    res.map_err(|e| FmError::at(e, path))
}

/// Moves `src` to `dest`, copying then deleting when a rename crosses devices.
pub fn move_path(src: &Path, dest: &Path) -> FmResult<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tracing::info!(src = %src.display(), dest = %dest.display(), "cross-device move, copying");
            copy_then_remove(src, dest)
        }
        Err(e) => Err(FmError::at(e, src)),
    }
}

/// Move fallback: copies `src` to `dest`, then deletes `src`.
///
/// A failed copy removes the partial destination and leaves `src` untouched.
pub fn copy_then_remove(src: &Path, dest: &Path) -> FmResult<()> {
    if let Err(e) = copy_recursive(src, dest) {
        if fs::symlink_metadata(dest).is_ok() {
            let _ = remove_path(dest);
        }
        return Err(FmError::at(e, dest));
    }
    remove_path(src)
}

/// Pastes a single clipboard item into `dest_dir`.
pub fn paste_item(src: &Path, dest_dir: &Path, mode: PasteMode) -> FmResult<PasteOutcome> {
    let name = src
        .file_name()
        .ok_or_else(|| FmError::InvalidName(src.display().to_string()))?;
    let meta = fs::symlink_metadata(src).map_err(|e| FmError::at(e, src))?;
    let dest = dest_dir.join(name);

    if meta.is_dir() && dest_dir.starts_with(src) && dest != src {
        return Err(FmError::IntoItself(src.to_path_buf()));
    }

    match mode {
        PasteMode::Copy => {
            if dest.exists() {
                return Ok(PasteOutcome::Skipped);
            }
            copy_recursive(src, &dest).map_err(|e| FmError::at(e, &dest))?;
        }
        PasteMode::Cut => {
            if dest == src {
                return Ok(PasteOutcome::Done);
            }
            if dest.exists() {
                return Err(FmError::AlreadyExists(dest));
            }
            move_path(src, &dest)?;
        }
    }
    Ok(PasteOutcome::Done)
}

/// Creates an empty file. Never truncates an existing one.
pub fn create_file(dir: &Path, name: &str) -> FmResult<PathBuf> {
    let path = dir.join(validate_name(name)?);
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| FmError::at(e, &path))?;
    Ok(path)
}

pub fn create_dir(dir: &Path, name: &str) -> FmResult<PathBuf> {
    let path = dir.join(validate_name(name)?);
    fs::create_dir(&path).map_err(|e| FmError::at(e, &path))?;
    Ok(path)
}

/// Renames `path` within its parent directory, refusing to replace an existing entry.
pub fn rename(path: &Path, new_name: &str) -> FmResult<PathBuf> {
    let new_name = validate_name(new_name)?;
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let target = parent.join(new_name);
    if target == path {
        return Ok(target);
    }
    if target.exists() {
        return Err(FmError::AlreadyExists(target));
    }
    fs::rename(path, &target).map_err(|e| FmError::at(e, path))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn copy_skips_existing_destination() -> Result<(), Box<dyn error::Error>> {
        let src_dir = tempdir()?;
        let dst_dir = tempdir()?;
        let src = src_dir.path().join("a.txt");
        fs::write(&src, "new")?;
        fs::write(dst_dir.path().join("a.txt"), "old")?;

        let out = paste_item(&src, dst_dir.path(), PasteMode::Copy)?;
        assert_eq!(out, PasteOutcome::Skipped);
        assert_eq!(fs::read_to_string(dst_dir.path().join("a.txt"))?, "old");
        Ok(())
    }

    #[test]
    fn copy_is_recursive() -> Result<(), Box<dyn error::Error>> {
        let src_dir = tempdir()?;
        let dst_dir = tempdir()?;
        let tree = src_dir.path().join("tree");
        fs::create_dir_all(tree.join("inner"))?;
        fs::write(tree.join("inner").join("leaf.txt"), "leaf")?;

        paste_item(&tree, dst_dir.path(), PasteMode::Copy)?;
        assert_eq!(
            fs::read_to_string(dst_dir.path().join("tree/inner/leaf.txt"))?,
            "leaf"
        );
        assert!(tree.exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn copy_keeps_symlinks_as_links() -> Result<(), Box<dyn error::Error>> {
        let src_dir = tempdir()?;
        let dst_dir = tempdir()?;
        let tree = src_dir.path().join("tree");
        fs::create_dir(&tree)?;
        fs::write(tree.join("f.txt"), "f")?;
        std::os::unix::fs::symlink("..", tree.join("up"))?;

        assert_eq!(paste_item(&tree, dst_dir.path(), PasteMode::Copy)?, PasteOutcome::Done);

        let copied = dst_dir.path().join("tree");
        assert!(fs::symlink_metadata(copied.join("up"))?.is_symlink());
        assert_eq!(fs::read_link(copied.join("up"))?, Path::new(".."));
        assert_eq!(fs::read_dir(&copied)?.count(), 2);
        Ok(())
    }

    #[test]
    fn copy_stops_at_depth_limit() -> Result<(), Box<dyn error::Error>> {
        let src_dir = tempdir()?;
        let dst_dir = tempdir()?;
        let mut deep = src_dir.path().join("d");
        for _ in 0..MAX_COPY_DEPTH {
            deep.push("d");
        }
        fs::create_dir_all(&deep)?;

        let res = copy_recursive(&src_dir.path().join("d"), &dst_dir.path().join("d"));
        assert!(res.is_err());
        Ok(())
    }

    #[test]
    fn copy_then_remove_moves_tree() -> Result<(), Box<dyn error::Error>> {
        let src_dir = tempdir()?;
        let dst_dir = tempdir()?;
        let tree = src_dir.path().join("tree");
        fs::create_dir_all(tree.join("inner"))?;
        fs::write(tree.join("inner").join("leaf.txt"), "leaf")?;

        let dest = dst_dir.path().join("tree");
        copy_then_remove(&tree, &dest)?;
        assert!(!tree.exists());
        assert_eq!(fs::read_to_string(dest.join("inner/leaf.txt"))?, "leaf");
        Ok(())
    }

    #[test]
    fn copy_then_remove_keeps_source_on_failure() -> Result<(), Box<dyn error::Error>> {
        let src_dir = tempdir()?;
        let dst_dir = tempdir()?;
        let src = src_dir.path().join("m.txt");
        fs::write(&src, "m")?;

        // The destination's parent does not exist, so the copy fails.
        let dest = dst_dir.path().join("missing").join("m.txt");
        assert!(copy_then_remove(&src, &dest).is_err());
        assert!(src.exists());
        assert!(!dest.exists());
        Ok(())
    }

    #[test]
    fn cut_moves_and_refuses_overwrite() -> Result<(), Box<dyn error::Error>> {
        let src_dir = tempdir()?;
        let dst_dir = tempdir()?;
        let src = src_dir.path().join("m.txt");
        fs::write(&src, "moved")?;

        assert_eq!(paste_item(&src, dst_dir.path(), PasteMode::Cut)?, PasteOutcome::Done);
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dst_dir.path().join("m.txt"))?, "moved");

        fs::write(&src, "again")?;
        let err = paste_item(&src, dst_dir.path(), PasteMode::Cut);
        assert!(matches!(err, Err(FmError::AlreadyExists(_))));
        assert!(src.exists());
        Ok(())
    }

    #[test]
    fn cut_into_same_directory_is_noop() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let src = dir.path().join("stay.txt");
        fs::write(&src, "x")?;
        assert_eq!(paste_item(&src, dir.path(), PasteMode::Cut)?, PasteOutcome::Done);
        assert!(src.exists());
        Ok(())
    }

    #[test]
    fn stale_source_is_not_found() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let gone = dir.path().join("gone.txt");
        let res = paste_item(&gone, dir.path(), PasteMode::Copy);
        assert!(matches!(res, Err(FmError::NotFound(_))));
        Ok(())
    }

    #[test]
    fn directory_into_itself_is_rejected() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let outer = dir.path().join("outer");
        let inner = outer.join("inner");
        fs::create_dir_all(&inner)?;
        let res = paste_item(&outer, &inner, PasteMode::Copy);
        assert!(matches!(res, Err(FmError::IntoItself(_))));
        Ok(())
    }

    #[test]
    fn create_file_never_truncates() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = create_file(dir.path(), " notes.txt ")?;
        assert_eq!(path, dir.path().join("notes.txt"));
        fs::write(&path, "keep")?;

        let again = create_file(dir.path(), "notes.txt");
        assert!(matches!(again, Err(FmError::AlreadyExists(_))));
        assert_eq!(fs::read_to_string(&path)?, "keep");
        Ok(())
    }

    #[test]
    fn invalid_names_are_rejected() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        for bad in ["", "   ", ".", "..", "a/b"] {
            assert!(matches!(
                create_dir(dir.path(), bad),
                Err(FmError::InvalidName(_))
            ));
        }
        Ok(())
    }

    #[test]
    fn rename_within_parent() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let old = dir.path().join("notes.txt");
        File::create(&old)?;
        File::create(dir.path().join("taken.txt"))?;

        let new = rename(&old, "notes-v2.txt")?;
        assert_eq!(new, dir.path().join("notes-v2.txt"));
        assert!(!old.exists());

        let clash = rename(&new, "taken.txt");
        assert!(matches!(clash, Err(FmError::AlreadyExists(_))));
        Ok(())
    }

    #[test]
    fn remove_handles_files_and_trees() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("f");
        File::create(&file)?;
        let tree = dir.path().join("t");
        fs::create_dir_all(tree.join("x/y"))?;

        remove_path(&file)?;
        remove_path(&tree)?;
        assert!(!file.exists() && !tree.exists());
        assert!(matches!(remove_path(&file), Err(FmError::NotFound(_))));
        Ok(())
    }
}
