//! Prompt and input modes for triptych.
//!
//! [ActionContext] holds the active [ActionMode] and the line editor used by the
//! rename, create, zip and delete-confirmation prompts. It only edits text; the
//! handlers in `app::handlers` decide what a submitted line does.

/// Input prompts that take over the keyboard until submitted or cancelled.
///
/// - Rename: new name for the entry under the cursor
/// - NewFile / NewFolder: name of the entry to create
/// - ConfirmDelete: `y` confirms, anything else aborts
/// - ZipName: archive name, `.zip` is appended when missing
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Rename,
    NewFile,
    NewFolder,
    ConfirmDelete,
    ZipName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionMode {
    Normal,
    Input { mode: InputMode, prompt: String },
}

#[derive(Debug)]
pub struct ActionContext {
    mode: ActionMode,
    input_buffer: String,
    /// Cursor position in chars, not bytes.
    input_cursor_pos: usize,
}

impl Default for ActionContext {
    fn default() -> Self {
        Self {
            mode: ActionMode::Normal,
            input_buffer: String::new(),
            input_cursor_pos: 0,
        }
    }
}

impl ActionContext {
    // Getters / accessors

    #[inline]
    pub fn mode(&self) -> &ActionMode {
        &self.mode
    }

    #[inline]
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    #[inline]
    pub fn input_cursor_pos(&self) -> usize {
        self.input_cursor_pos
    }

    pub fn input_mode(&self) -> Option<InputMode> {
        match self.mode {
            ActionMode::Input { mode, .. } => Some(mode),
            ActionMode::Normal => None,
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        match &self.mode {
            ActionMode::Input { prompt, .. } => Some(prompt),
            ActionMode::Normal => None,
        }
    }

    // Mode functions

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, ActionMode::Input { .. })
    }

    /// Opens a prompt with `initial_value` in the buffer and the cursor at its end.
    pub fn enter_mode(&mut self, mode: InputMode, prompt: impl Into<String>, initial_value: String) {
        self.mode = ActionMode::Input {
            mode,
            prompt: prompt.into(),
        };
        self.input_cursor_pos = initial_value.chars().count();
        self.input_buffer = initial_value;
    }

    pub fn exit_mode(&mut self) {
        self.mode = ActionMode::Normal;
        self.input_buffer.clear();
        self.input_cursor_pos = 0;
    }

    /// Leaves the prompt and hands back what was typed.
    pub fn take_input(&mut self) -> String {
        let input = std::mem::take(&mut self.input_buffer);
        self.exit_mode();
        input
    }

    // Line editing

    fn byte_offset(&self) -> usize {
        self.input_buffer
            .char_indices()
            .nth(self.input_cursor_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len())
    }

    pub fn insert_at_cursor(&mut self, c: char) {
        let at = self.byte_offset();
        self.input_buffer.insert(at, c);
        self.input_cursor_pos += 1;
    }

    pub fn backspace_at_cursor(&mut self) {
        if self.input_cursor_pos == 0 {
            return;
        }
        self.input_cursor_pos -= 1;
        let at = self.byte_offset();
        self.input_buffer.remove(at);
    }

    pub fn move_cursor_left(&mut self) {
        self.input_cursor_pos = self.input_cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.input_cursor_pos < self.input_buffer.chars().count() {
            self.input_cursor_pos += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.input_cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.input_cursor_pos = self.input_buffer.chars().count();
    }
}
