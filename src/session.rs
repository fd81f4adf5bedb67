//! Session state and the input-mode state machine
//!
//! The session is rebuilt at process start and never persisted. All mode
//! transitions live here as plain methods so the state machine can be
//! exercised without a live display.

/// Current input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Browsing: cursor/selection/hover/scroll only, no record mutation
    View,
    /// Field editing on the locked tile
    Edit,
    /// Typing a value for one field command (entered from Edit)
    CommandInput,
    /// Whole-record naming shortcut (entered from View)
    LegacyInput,
    /// Y/N gate before overwriting the metadata file
    SaveConfirm,
    /// Y/N gate before terminating the process
    QuitConfirm,
}

/// Maximum entries kept in the recent-edited-name ring
pub const RECENT_NAMES_MAX: usize = 6;

/// Per-process editor session
pub struct Session {
    pub mode: Mode,

    /// Keyboard cursor, tile-grid coordinates (multiples of tile size)
    pub cursor: (u32, u32),

    /// Explicitly selected tile (auto-follows the cursor in View)
    pub selected: Option<(u32, u32)>,

    /// Tile under the mouse pointer, if inside the viewport
    pub hover: Option<(u32, u32)>,

    /// Viewport scroll offset in sheet pixels (tile-size multiples)
    pub scroll: (u32, u32),

    /// Tile frozen at Edit entry; mutation target for all field commands
    pub locked: Option<(u32, u32)>,

    /// Field tag awaiting input while in CommandInput
    pub command_tag: Option<String>,

    /// Recently edited sprite names, most recent last, deduplicated
    pub recent_names: Vec<String>,

    /// Status line shown at the bottom of the window
    pub status: String,
}

impl Session {
    pub fn new() -> Self {
        Self {
            mode: Mode::View,
            cursor: (0, 0),
            selected: Some((0, 0)), // initial position is auto-selected
            hover: None,
            scroll: (0, 0),
            locked: None,
            command_tag: None,
            recent_names: Vec::new(),
            status: String::from(
                "Arrows to move (auto-select), F1 for EDIT, Shift+Enter for legacy naming",
            ),
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    /// The tile all field commands operate on: the locked tile while an edit
    /// session is active, the cursor otherwise.
    pub fn active_tile(&self) -> (u32, u32) {
        self.locked.unwrap_or(self.cursor)
    }

    /// View -> Edit. Captures the cursor tile as the locked tile.
    pub fn enter_edit(&mut self) -> bool {
        if self.mode != Mode::View {
            return false;
        }
        self.mode = Mode::Edit;
        self.locked = Some(self.cursor);
        true
    }

    /// Edit -> View. Refused while a command prompt is open; the caller is
    /// responsible for the auto-save that accompanies a successful exit.
    pub fn exit_edit(&mut self) -> bool {
        if self.mode != Mode::Edit {
            return false;
        }
        self.mode = Mode::View;
        self.locked = None;
        true
    }

    /// Edit -> CommandInput for one field tag.
    pub fn begin_command(&mut self, tag: &str) -> bool {
        if self.mode != Mode::Edit {
            return false;
        }
        self.mode = Mode::CommandInput;
        self.command_tag = Some(tag.to_string());
        true
    }

    /// CommandInput -> Edit after a commit or cancel.
    pub fn finish_command(&mut self) {
        if self.mode == Mode::CommandInput {
            self.mode = Mode::Edit;
            self.command_tag = None;
        }
    }

    /// View -> LegacyInput. Requires a selected tile.
    pub fn begin_legacy_input(&mut self) -> bool {
        if self.mode != Mode::View || self.selected.is_none() {
            return false;
        }
        self.mode = Mode::LegacyInput;
        true
    }

    /// LegacyInput -> View.
    pub fn finish_legacy_input(&mut self) {
        if self.mode == Mode::LegacyInput {
            self.mode = Mode::View;
        }
    }

    /// View -> SaveConfirm.
    pub fn begin_save_confirm(&mut self) -> bool {
        if self.mode != Mode::View {
            return false;
        }
        self.mode = Mode::SaveConfirm;
        true
    }

    /// View -> QuitConfirm. Refused while Edit is active so uncommitted
    /// state cannot be lost.
    pub fn begin_quit_confirm(&mut self) -> bool {
        match self.mode {
            Mode::View => {
                self.mode = Mode::QuitConfirm;
                true
            }
            Mode::Edit => {
                self.set_status("Cannot quit in EDIT mode - Exit EDIT with F2 first");
                false
            }
            _ => false,
        }
    }

    /// Resolve a transient confirm state back to View (No/Esc path, or the
    /// Yes path of SaveConfirm; the Yes path of QuitConfirm terminates).
    pub fn resolve_confirm(&mut self) {
        if matches!(self.mode, Mode::SaveConfirm | Mode::QuitConfirm) {
            self.mode = Mode::View;
        }
    }

    /// Record a name in the recent-edit ring: dedup on re-insert, most
    /// recent last, bounded length.
    pub fn note_edited_name(&mut self, name: &str) {
        if let Some(pos) = self.recent_names.iter().position(|n| n == name) {
            self.recent_names.remove(pos);
        }
        self.recent_names.push(name.to_string());
        if self.recent_names.len() > RECENT_NAMES_MAX {
            let excess = self.recent_names.len() - RECENT_NAMES_MAX;
            self.recent_names.drain(..excess);
        }
    }

    /// True while record mutation is permitted (Edit-derived states).
    pub fn can_mutate(&self) -> bool {
        matches!(
            self.mode,
            Mode::Edit | Mode::CommandInput | Mode::LegacyInput
        )
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_entry_locks_cursor_tile() {
        let mut s = Session::new();
        s.cursor = (16, 8);
        assert!(s.enter_edit());
        assert_eq!(s.mode, Mode::Edit);
        assert_eq!(s.locked, Some((16, 8)));
        assert_eq!(s.active_tile(), (16, 8));

        // Cursor is frozen as the command target even if it were to move
        s.cursor = (0, 0);
        assert_eq!(s.active_tile(), (16, 8));
    }

    #[test]
    fn exit_edit_refused_while_command_input_active() {
        let mut s = Session::new();
        s.enter_edit();
        s.begin_command("ACT_NAME");
        assert_eq!(s.mode, Mode::CommandInput);

        // The exit trigger must be a no-op mid-command
        assert!(!s.exit_edit());
        assert_eq!(s.mode, Mode::CommandInput);

        s.finish_command();
        assert!(s.exit_edit());
        assert_eq!(s.mode, Mode::View);
        assert_eq!(s.locked, None);
    }

    #[test]
    fn quit_refused_in_edit_mode() {
        let mut s = Session::new();
        s.enter_edit();
        assert!(!s.begin_quit_confirm());
        assert_eq!(s.mode, Mode::Edit);
        assert!(s.status.contains("Cannot quit"));
    }

    #[test]
    fn legacy_input_requires_selection() {
        let mut s = Session::new();
        s.selected = None;
        assert!(!s.begin_legacy_input());

        s.selected = Some((8, 0));
        assert!(s.begin_legacy_input());
        assert_eq!(s.mode, Mode::LegacyInput);
        s.finish_legacy_input();
        assert_eq!(s.mode, Mode::View);
    }

    #[test]
    fn command_only_from_edit() {
        let mut s = Session::new();
        assert!(!s.begin_command("NAME"));
        s.enter_edit();
        assert!(s.begin_command("NAME"));
        assert_eq!(s.command_tag.as_deref(), Some("NAME"));
        s.finish_command();
        assert_eq!(s.command_tag, None);
    }

    #[test]
    fn recent_names_dedup_and_bound() {
        let mut s = Session::new();
        for name in ["a", "b", "c", "d", "e", "f", "g"] {
            s.note_edited_name(name);
        }
        assert_eq!(s.recent_names.len(), RECENT_NAMES_MAX);
        assert_eq!(s.recent_names.first().map(String::as_str), Some("b"));
        assert_eq!(s.recent_names.last().map(String::as_str), Some("g"));

        // Re-inserting moves the entry to the most-recent slot
        s.note_edited_name("c");
        assert_eq!(s.recent_names.len(), RECENT_NAMES_MAX);
        assert_eq!(s.recent_names.last().map(String::as_str), Some("c"));
        assert_eq!(s.recent_names.iter().filter(|n| *n == "c").count(), 1);
    }

    #[test]
    fn view_is_read_only() {
        let mut s = Session::new();
        assert!(!s.can_mutate());
        s.enter_edit();
        assert!(s.can_mutate());
        s.begin_command("NAME");
        assert!(s.can_mutate());
    }
}
