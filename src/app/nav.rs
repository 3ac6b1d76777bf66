//! Navigation and selection state for triptych.
//!
//! Owns the current and parent catalogs, the cursor, the scroll offset and the
//! multi-selection set. Catalogs are always replaced wholesale, and every reload clears
//! the selection and clamps the cursor.

use crate::core::catalog::{self, Entry};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub struct NavState {
    current_dir: PathBuf,
    entries: Vec<Entry>,
    parent_entries: Vec<Entry>,
    cursor: usize,
    scroll: usize,
    selected: HashSet<PathBuf>,
    show_hidden: bool,
}

impl NavState {
    /// Opens `dir` with the cursor on the first entry.
    pub fn new(dir: PathBuf, show_hidden: bool) -> Self {
        let mut nav = Self {
            current_dir: dir,
            entries: Vec::new(),
            parent_entries: Vec::new(),
            cursor: 0,
            scroll: 0,
            selected: HashSet::new(),
            show_hidden,
        };
        nav.reload(None);
        nav
    }

    // Getters / Accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn parent_entries(&self) -> &[Entry] {
        &self.parent_entries
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    #[inline]
    pub fn selected(&self) -> &HashSet<PathBuf> {
        &self.selected
    }

    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn is_selected(&self, path: &Path) -> bool {
        self.selected.contains(path)
    }

    pub fn current_entry(&self) -> Option<&Entry> {
        self.entries.get(self.cursor)
    }

    /// Index of the current directory inside the parent catalog.
    pub fn parent_cursor(&self) -> Option<usize> {
        let name = self.current_dir.file_name()?.to_string_lossy();
        self.parent_entries.iter().position(|e| e.name() == name)
    }

    // Catalog reloads

    /// Rebuilds both catalogs for the current directory.
    ///
    /// Clears the selection. The cursor moves to the entry named `focus` when present,
    /// otherwise it is clamped to the new length.
    pub fn reload(&mut self, focus: Option<&str>) {
        self.entries = catalog::load(&self.current_dir, self.show_hidden);
        self.parent_entries = match self.current_dir.parent() {
            Some(parent) => catalog::load(parent, self.show_hidden),
            None => Vec::new(),
        };
        self.selected.clear();

        let focused = focus.and_then(|name| self.entries.iter().position(|e| e.name() == name));
        self.cursor = match focused {
            Some(idx) => idx,
            None => self.cursor.min(self.entries.len().saturating_sub(1)),
        };
        self.scroll = self.scroll.min(self.cursor);
    }

    /// Changes directory, re-selecting the previous directory's leaf name if it is listed.
    pub fn change_dir(&mut self, dir: PathBuf) {
        let leaf = self
            .current_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        self.current_dir = dir;
        self.cursor = 0;
        self.scroll = 0;
        self.reload(leaf.as_deref());
    }

    /// Goes to the parent directory. Returns false at the filesystem root.
    pub fn go_parent(&mut self) -> bool {
        match self.current_dir.parent() {
            Some(parent) => {
                let parent = parent.to_path_buf();
                self.change_dir(parent);
                true
            }
            None => false,
        }
    }

    /// Enters the directory under the cursor. Returns false if it is not a directory.
    pub fn enter(&mut self) -> bool {
        match self.current_entry() {
            Some(entry) if entry.is_dir() => {
                let dir = entry.path().to_path_buf();
                self.change_dir(dir);
                true
            }
            _ => false,
        }
    }

    pub fn set_show_hidden(&mut self, show: bool) {
        self.show_hidden = show;
        let focus = self.current_entry().map(|e| e.name().to_string());
        self.reload(focus.as_deref());
    }

    // Cursor movement

    pub fn move_up(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_down(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn go_top(&mut self) {
        self.cursor = 0;
    }

    pub fn go_bottom(&mut self) {
        self.cursor = self.entries.len().saturating_sub(1);
    }

    /// Adjusts the scroll offset so the cursor is visible in `height` rows.
    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }
        let max_scroll = self.entries.len().saturating_sub(height);
        self.scroll = self.scroll.min(max_scroll);
    }

    // Selection

    /// Flips the cursor entry's membership and advances the cursor by one.
    pub fn toggle_selected(&mut self) -> bool {
        let Some(path) = self.current_entry().map(|e| e.path().to_path_buf()) else {
            return false;
        };
        if !self.selected.remove(&path) {
            self.selected.insert(path);
        }
        self.move_down();
        true
    }

    pub fn select_all(&mut self) {
        self.selected = self.entries.iter().map(|e| e.path().to_path_buf()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Multi-selection in catalog order, or the cursor entry when nothing is selected.
    pub fn targets(&self) -> Vec<PathBuf> {
        if self.selected.is_empty() {
            return self
                .current_entry()
                .map(|e| vec![e.path().to_path_buf()])
                .unwrap_or_default();
        }
        self.entries
            .iter()
            .filter(|e| self.selected.contains(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect()
    }

    /// Like [NavState::targets], then clears the selection.
    pub fn take_targets(&mut self) -> Vec<PathBuf> {
        let targets = self.targets();
        self.selected.clear();
        targets
    }
}
