//! Helpers for triptych.

use crate::core::graphics::DELETE_ALL;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::{self, Write};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Runs `f` with the terminal handed back to the user.
///
/// Clears graphics placements, leaves raw mode and the alternate screen, then restores
/// both once `f` returns. The result of `f` is returned even if restoring fails.
pub fn with_suspended_terminal<T>(f: impl FnOnce() -> T) -> io::Result<T> {
    let mut stdout = io::stdout();
    stdout.write_all(DELETE_ALL.as_bytes())?;
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, Show)?;

    let out = f();

    execute!(io::stdout(), EnterAlternateScreen, Hide)?;
    enable_raw_mode()?;
    Ok(out)
}

/// Shortens the home directory prefix of `path` to "~".
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}

/// Expands a leading "~" to the home directory.
pub fn expand_home_path(raw: &str) -> PathBuf {
    if raw == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw));
    }
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_round_trip() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let p = home.join("music").join("a");
        let short = shorten_home_path(&p);
        assert!(short.starts_with('~'));
        assert_eq!(expand_home_path(&short.replace(MAIN_SEPARATOR, "/")), p);
        assert_eq!(shorten_home_path(&home), "~");
    }

    #[test]
    fn non_home_paths_untouched() {
        assert_eq!(expand_home_path("/etc/hosts"), PathBuf::from("/etc/hosts"));
        assert_eq!(expand_home_path("~user/x"), PathBuf::from("~user/x"));
    }
}
