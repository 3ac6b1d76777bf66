//! Input action handler methods for triptych.
//!
//! This module implements [AppState] methods that process key events, file/nav/pin
//! actions and the prompts (rename, create, zip, delete confirmation). Every error is
//! turned into the status message here; nothing propagates to the terminal loop.

use crate::app::actions::InputMode;
use crate::app::keymap::{Action, FileAction, NavAction, PinAction, SystemAction};
use crate::app::pins::PinOutcome;
use crate::app::state::{AppState, Focus, KeypressResult};
use crate::core::fileops::{self, PasteMode};
use crate::utils::{shorten_home_path, with_suspended_terminal};

use crossterm::event::{KeyCode::*, KeyEvent, KeyModifiers};

/// AppState input and action handlers
impl<'a> AppState<'a> {
    // Prompt handling

    /// Handles key events while a prompt is open.
    ///
    /// The delete confirmation is decided by a single key. The other prompts edit a
    /// line until Enter submits it or Esc cancels it.
    pub(super) fn handle_input_mode(&mut self, key: KeyEvent) -> KeypressResult {
        let Some(mode) = self.actions.input_mode() else {
            return KeypressResult::Continue;
        };

        // Ctrl/Alt chords never type into a prompt.
        let plain = key.modifiers.difference(KeyModifiers::SHIFT).is_empty();

        if mode == InputMode::ConfirmDelete {
            let confirmed = plain && matches!(key.code, Char('y'));
            self.actions.exit_mode();
            if confirmed {
                self.delete_targets();
            }
            return KeypressResult::Consumed;
        }

        match key.code {
            Enter => {
                let input = self.actions.take_input();
                self.submit_input(mode, &input);
            }
            Esc => self.actions.exit_mode(),
            Left => self.actions.move_cursor_left(),
            Right => self.actions.move_cursor_right(),
            Home => self.actions.cursor_home(),
            End => self.actions.cursor_end(),
            Backspace => self.actions.backspace_at_cursor(),
            Char(c) if plain => self.actions.insert_at_cursor(c),
            _ => return KeypressResult::Continue,
        }
        KeypressResult::Consumed
    }

    /// Runs a submitted prompt. An empty answer aborts without side effects.
    fn submit_input(&mut self, mode: InputMode, input: &str) {
        if input.trim().is_empty() {
            return;
        }
        match mode {
            InputMode::Rename => self.rename_entry(input),
            InputMode::NewFile => self.create_entry(input, false),
            InputMode::NewFolder => self.create_entry(input, true),
            InputMode::ZipName => self.zip_targets(input),
            InputMode::ConfirmDelete => {}
        }
    }

    // Action dispatch

    pub(super) fn handle_sys_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Quit => KeypressResult::Quit,
        }
    }

    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> KeypressResult {
        match action {
            NavAction::GoUp => {
                self.nav.move_up();
            }
            NavAction::GoDown => {
                self.nav.move_down();
            }
            NavAction::GoParent => {
                if self.nav.go_parent() {
                    self.preview.invalidate();
                }
            }
            NavAction::Open => return self.open_entry(),
            NavAction::GoToTop => {
                self.nav.go_top();
                self.set_status("Top");
            }
            NavAction::GoToBottom => {
                self.nav.go_bottom();
                self.set_status("Bottom");
            }
            NavAction::ToggleSelect => {
                self.nav.toggle_selected();
            }
            NavAction::SelectAll => {
                self.nav.select_all();
                let count = self.nav.selected().len();
                self.set_status(format!("Selected {count} items"));
            }
            NavAction::ClearSelection => {
                self.nav.clear_selection();
                self.set_status("Selection cleared");
            }
            NavAction::ToggleFocus => {
                if self.config.display().pins() {
                    self.focus = match self.focus {
                        Focus::Files => Focus::Pins,
                        Focus::Pins => Focus::Files,
                    };
                }
            }
            NavAction::ToggleHidden => {
                let show = !self.nav.show_hidden();
                self.nav.set_show_hidden(show);
                self.preview.invalidate();
                self.set_status(if show {
                    "Showing hidden files"
                } else {
                    "Hidden files masked"
                });
            }
        }
        KeypressResult::Consumed
    }

    pub(super) fn handle_file_action(&mut self, action: FileAction) -> KeypressResult {
        match action {
            FileAction::Yank => self.fill_clipboard(PasteMode::Copy),
            FileAction::Cut => self.fill_clipboard(PasteMode::Cut),
            FileAction::Paste => self.paste_clipboard(),
            FileAction::Rename => {
                if let Some(entry) = self.nav.current_entry() {
                    let name = entry.name().to_string();
                    self.actions
                        .enter_mode(InputMode::Rename, format!("Rename {name} to:"), name);
                }
            }
            FileAction::Create => {
                self.actions
                    .enter_mode(InputMode::NewFile, "New file name:", String::new());
            }
            FileAction::CreateDirectory => {
                self.actions
                    .enter_mode(InputMode::NewFolder, "New folder name:", String::new());
            }
            FileAction::Delete => {
                let count = self.nav.targets().len();
                if count > 0 {
                    self.actions.enter_mode(
                        InputMode::ConfirmDelete,
                        format!("Delete {count} items? (y/n)"),
                        String::new(),
                    );
                }
            }
            FileAction::Zip => {
                if !self.nav.targets().is_empty() {
                    self.actions.enter_mode(
                        InputMode::ZipName,
                        "Zip name (without .zip):",
                        String::new(),
                    );
                }
            }
        }
        KeypressResult::Consumed
    }

    pub(super) fn handle_pin_action(&mut self, action: PinAction) -> KeypressResult {
        match action {
            PinAction::Pin => self.pin_current_dir(),
            PinAction::Unpin => self.unpin_selected(),
        }
        KeypressResult::Consumed
    }

    /// Keys that behave differently while the pinned pane has focus.
    ///
    /// Returns None for actions that fall through to the normal handlers.
    pub(super) fn handle_pins_focus(&mut self, action: Action) -> Option<KeypressResult> {
        match action {
            Action::Nav(NavAction::GoUp) => {
                self.pins.move_up();
            }
            Action::Nav(NavAction::GoDown) => {
                self.pins.move_down();
            }
            Action::Nav(NavAction::Open) => self.jump_to_pin(),
            Action::Pin(PinAction::Unpin) | Action::File(FileAction::Delete) => {
                self.unpin_selected()
            }
            _ => return None,
        }
        Some(KeypressResult::Consumed)
    }

    // Navigation

    fn open_entry(&mut self) -> KeypressResult {
        let Some(entry) = self.nav.current_entry() else {
            return KeypressResult::Consumed;
        };

        if entry.is_dir() {
            if self.nav.enter() {
                self.preview.invalidate();
            }
            return KeypressResult::Consumed;
        }

        let path = entry.path().to_path_buf();
        let kind = entry.kind();
        let opener = &self.opener;
        match with_suspended_terminal(|| opener.open(&path, kind)) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(path = %path.display(), error = %e, "open failed");
                self.set_status(format!("Open failed: {e}"));
            }
            Err(e) => {
                tracing::error!(error = %e, "terminal suspend failed");
                self.set_status(format!("Terminal error: {e}"));
            }
        }
        KeypressResult::OpenedExternal
    }

    fn jump_to_pin(&mut self) {
        let Some(pin) = self.pins.selected().map(|p| p.to_path_buf()) else {
            return;
        };
        if !pin.is_dir() {
            self.set_status(format!("Not a directory: {}", shorten_home_path(&pin)));
            return;
        }
        self.nav.change_dir(pin);
        self.preview.invalidate();
        self.focus = Focus::Files;
    }

    // Pins

    fn pin_current_dir(&mut self) {
        let dir = self.nav.current_dir().to_path_buf();
        let shown = shorten_home_path(&dir);
        match self.pins.pin(dir) {
            Ok(PinOutcome::Added) => self.set_status(format!("Pinned {shown}")),
            Ok(PinOutcome::AlreadyPinned) => self.set_status("Already pinned"),
            Err(e) => {
                tracing::warn!(error = %e, "pin file not written");
                self.set_status(format!("Pinned {shown}, but not saved: {e}"));
            }
        }
    }

    fn unpin_selected(&mut self) {
        match self.pins.unpin_selected() {
            Ok(Some(removed)) => {
                self.set_status(format!("Unpinned {}", shorten_home_path(&removed)))
            }
            Ok(None) => self.set_status("No pins"),
            Err(e) => {
                tracing::warn!(error = %e, "pin file not written");
                self.set_status(format!("Unpinned, but not saved: {e}"));
            }
        }
    }

    // Clipboard

    fn fill_clipboard(&mut self, mode: PasteMode) {
        let targets = self.nav.take_targets();
        if targets.is_empty() {
            return;
        }
        let count = targets.len();
        self.clipboard.fill(targets, mode);
        self.set_status(match mode {
            PasteMode::Copy => format!("Yanked {count} items"),
            PasteMode::Cut => format!("Cut {count} items"),
        });
    }

    fn paste_clipboard(&mut self) {
        let dest = self.nav.current_dir().to_path_buf();
        match self.clipboard.paste(&dest) {
            Ok(report) => {
                let focus = self.current_name();
                self.reload(focus.as_deref());
                self.set_status(report.summary());
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    // Mutations

    fn rename_entry(&mut self, new_name: &str) {
        let Some(path) = self.nav.current_entry().map(|e| e.path().to_path_buf()) else {
            return;
        };
        match fileops::rename(&path, new_name) {
            Ok(renamed) => {
                let name = renamed
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.reload(Some(&name));
                self.set_status(format!("Renamed to {name}"));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "rename failed");
                self.set_status(format!("Rename failed: {e}"));
            }
        }
    }

    fn create_entry(&mut self, name: &str, is_dir: bool) {
        let dir = self.nav.current_dir().to_path_buf();
        let res = if is_dir {
            fileops::create_dir(&dir, name)
        } else {
            fileops::create_file(&dir, name)
        };

        match res {
            Ok(path) => {
                let created = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.reload(Some(&created));
                let what = if is_dir { "folder" } else { "file" };
                self.set_status(format!("Created {what}: {created}"));
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), name, error = %e, "create failed");
                self.set_status(e.to_string());
            }
        }
    }

    fn delete_targets(&mut self) {
        let targets = self.nav.take_targets();
        let mut deleted = 0;
        let mut failures = Vec::new();
        for target in &targets {
            match fileops::remove_path(target) {
                Ok(()) => deleted += 1,
                Err(e) => {
                    tracing::warn!(path = %target.display(), error = %e, "delete failed");
                    failures.push(e);
                }
            }
        }

        let focus = self.current_name();
        self.reload(focus.as_deref());

        let mut msg = format!("Deleted {deleted} items");
        if let Some(first) = failures.first() {
            msg.push_str(&format!(", {} failed: {first}", failures.len()));
        }
        self.set_status(msg);
    }

    fn zip_targets(&mut self, name: &str) {
        let name = name.trim();
        let dest = if name.ends_with(".zip") {
            name.to_string()
        } else {
            format!("{name}.zip")
        };
        if let Err(e) = fileops::validate_name(&dest) {
            self.set_status(e.to_string());
            return;
        }

        let names: Vec<String> = self
            .nav
            .targets()
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        if names.is_empty() {
            return;
        }

        match self.archiver.archive(self.nav.current_dir(), &names, &dest) {
            Ok(()) => {
                self.reload(Some(&dest));
                self.set_status(format!("Zipped {} items to {dest}", names.len()));
            }
            Err(e) => {
                tracing::warn!(dest = %dest, error = %e, "zip failed");
                self.set_status(format!("Zip failed: {e}"));
            }
        }
    }

    fn current_name(&self) -> Option<String> {
        self.nav.current_entry().map(|e| e.name().to_string())
    }
}
