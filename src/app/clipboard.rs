//! Clipboard model.
//!
//! `Empty -> Holding(mode) -> Empty`. Copy and cut replace whatever was held. A
//! copy paste leaves the clipboard intact so it can be repeated, and a cut paste
//! empties it once at least one item moved.

use crate::core::error::{FmError, FmResult};
use crate::core::fileops::{self, PasteMode, PasteOutcome};

use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct Clipboard {
    paths: Vec<PathBuf>,
    mode: Option<PasteMode>,
}

/// Summary of one paste run.
#[derive(Debug, Default)]
pub struct PasteReport {
    pub pasted: usize,
    pub skipped: usize,
    pub failures: Vec<(PathBuf, FmError)>,
}

impl PasteReport {
    /// Status line text for this report.
    pub fn summary(&self) -> String {
        let mut msg = format!("Pasted {} items", self.pasted);
        if self.skipped > 0 {
            msg.push_str(&format!(", {} skipped", self.skipped));
        }
        if let Some((_, first)) = self.failures.first() {
            msg.push_str(&format!(", {} failed: {}", self.failures.len(), first));
        }
        msg
    }
}

impl Clipboard {
    /// Replaces the clipboard contents. An empty list leaves the clipboard empty.
    pub fn fill(&mut self, paths: Vec<PathBuf>, mode: PasteMode) {
        if paths.is_empty() {
            self.clear();
            return;
        }
        self.paths = paths;
        self.mode = Some(mode);
    }

    pub fn clear(&mut self) {
        self.paths.clear();
        self.mode = None;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
    }

    #[inline]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    #[inline]
    pub fn mode(&self) -> Option<PasteMode> {
        self.mode
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Pastes every held path into `dest_dir`, collecting per-item failures.
    pub fn paste(&mut self, dest_dir: &Path) -> FmResult<PasteReport> {
        let Some(mode) = self.mode else {
            return Err(FmError::ClipboardEmpty);
        };

        let mut report = PasteReport::default();
        for src in &self.paths {
            match fileops::paste_item(src, dest_dir, mode) {
                Ok(PasteOutcome::Done) => report.pasted += 1,
                Ok(PasteOutcome::Skipped) => report.skipped += 1,
                Err(e) => {
                    tracing::warn!(src = %src.display(), error = %e, "paste failed");
                    report.failures.push((src.clone(), e));
                }
            }
        }

        if mode == PasteMode::Cut && report.pasted > 0 {
            self.clear();
        }
        Ok(report)
    }
}
