//! Pin file persistence.
//!
//! Plain text, one absolute directory path per line, newline terminated.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default pin file location: `<data_dir>/triptych/pins`.
pub fn default_path() -> PathBuf {
    dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".local/share")))
        .unwrap_or_else(std::env::temp_dir)
        .join("triptych")
        .join("pins")
}

/// Reads the pin file. Blank, duplicate and non-directory lines are dropped.
/// A missing file is an empty list.
pub fn load(file: &Path) -> Vec<PathBuf> {
    let content = match fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(file = %file.display(), error = %e, "could not read pin file");
            }
            return Vec::new();
        }
    };

    let mut pins: Vec<PathBuf> = Vec::new();
    for line in content.lines() {
        if line.is_empty() {
            continue;
        }
        let path = PathBuf::from(line);
        if path.is_absolute() && path.is_dir() && !pins.contains(&path) {
            pins.push(path);
        } else {
            tracing::debug!(pin = line, "pruned pin");
        }
    }
    pins
}

/// Writes the full pin list, creating the parent directory when needed.
pub fn save(file: &Path, pins: &[PathBuf]) -> io::Result<()> {
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = String::new();
    for pin in pins {
        out.push_str(&pin.to_string_lossy());
        out.push('\n');
    }
    fs::write(file, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use tempfile::tempdir;

    #[test]
    fn round_trip_and_prune() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::create_dir(&a)?;
        fs::create_dir(&b)?;
        let file = dir.path().join("state").join("pins");

        save(&file, &[a.clone(), b.clone()])?;
        assert_eq!(load(&file), vec![a.clone(), b.clone()]);

        fs::remove_dir(&b)?;
        assert_eq!(load(&file), vec![a]);
        Ok(())
    }

    #[test]
    fn junk_lines_are_dropped() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("pins");
        let real = dir.path().to_string_lossy().into_owned();
        fs::write(&file, format!("\nrelative/path\n{real}\n{real}\n/no/such/dir\n"))?;

        assert_eq!(load(&file), vec![dir.path().to_path_buf()]);
        Ok(())
    }

    #[test]
    fn missing_file_is_empty() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        assert!(load(&dir.path().join("nope")).is_empty());
        Ok(())
    }
}
