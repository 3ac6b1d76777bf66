//! Pinned directory list with its own cursor.
//!
//! Every mutation rewrites the pin file. A failed write keeps the in-memory change
//! and is reported to the caller.

use crate::core::error::FmResult;
use crate::core::pins;

use std::path::{Path, PathBuf};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinOutcome {
    Added,
    AlreadyPinned,
}

#[derive(Debug)]
pub struct PinList {
    pins: Vec<PathBuf>,
    cursor: usize,
    file: Option<PathBuf>,
}

impl PinList {
    /// Loads the list from `file`, pruning entries that no longer exist.
    pub fn load(file: PathBuf) -> Self {
        Self {
            pins: pins::load(&file),
            cursor: 0,
            file: Some(file),
        }
    }

    /// A list that is never persisted.
    pub fn in_memory(pins: Vec<PathBuf>) -> Self {
        Self {
            pins,
            cursor: 0,
            file: None,
        }
    }

    #[inline]
    pub fn pins(&self) -> &[PathBuf] {
        &self.pins
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn selected(&self) -> Option<&Path> {
        self.pins.get(self.cursor).map(PathBuf::as_path)
    }

    pub fn move_up(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_down(&mut self) -> bool {
        if self.cursor + 1 >= self.pins.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Appends `dir` unless it is already pinned.
    pub fn pin(&mut self, dir: PathBuf) -> FmResult<PinOutcome> {
        if self.pins.contains(&dir) {
            return Ok(PinOutcome::AlreadyPinned);
        }
        self.pins.push(dir);
        self.persist()?;
        Ok(PinOutcome::Added)
    }

    /// Removes the pin under the cursor and clamps the cursor.
    pub fn unpin_selected(&mut self) -> FmResult<Option<PathBuf>> {
        if self.cursor >= self.pins.len() {
            return Ok(None);
        }
        let removed = self.pins.remove(self.cursor);
        self.cursor = self.cursor.min(self.pins.len().saturating_sub(1));
        self.persist()?;
        Ok(Some(removed))
    }

    fn persist(&self) -> FmResult<()> {
        if let Some(file) = &self.file {
            pins::save(file, &self.pins)?;
        }
        Ok(())
    }
}
