//! Application state and per-frame input routing
//!
//! `AppState` is the single constructed context: document, session, sheet
//! geometry. Input arrives as a plain `FrameInput` snapshot built from
//! polling in `main`, so the whole router runs headless in tests.

use std::path::{Path, PathBuf};

use crate::document::{
    load_document, metadata_path_for, open_or_create_for_resource, save_document, FieldSet,
    SpriteDocument, NAME_FIELD,
};
use crate::grid::SheetGeometry;
use crate::session::{Mode, Session};
use crate::sheet::SpriteSheet;
use crate::ui::{MouseState, PromptState, Rect};

/// Screen position of the sheet viewport
pub const SHEET_VIEW_X: f32 = 12.0;
pub const SHEET_VIEW_Y: f32 = 12.0;
/// Viewport size in pixels; sheets larger than this scroll
pub const SHEET_VIEW_W: f32 = 384.0;
pub const SHEET_VIEW_H: f32 = 384.0;
/// Grid bounds used before any resource is opened
pub const DEFAULT_SHEET_SIZE: u32 = 256;

/// One frame of polled input. Pressed-edge flags are true for exactly the
/// frame the key went down.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub mouse: MouseState,
    /// Characters typed this frame (prompt modes)
    pub chars: Vec<char>,
    pub backspace: bool,

    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,

    /// Enter
    pub confirm: bool,
    /// Escape
    pub cancel: bool,
    /// Shift held (not an edge)
    pub shift: bool,
    pub space: bool,

    /// N: the NAME command in Edit, "No" in confirm gates
    pub key_n: bool,
    /// Y: "Yes" in confirm gates
    pub key_y: bool,
    /// Q: disabled quit shortcut, guidance only
    pub key_q: bool,
    /// 1-8: field command hotkeys while in Edit
    pub digit: Option<u8>,

    /// F1: enter Edit
    pub edit_mode: bool,
    /// F2: exit Edit (auto-save)
    pub view_mode: bool,
    /// F3: manual save while in Edit
    pub manual_save: bool,
    /// F5: explicit schema sync while in Edit
    pub sync_schema: bool,
    /// F10: save (confirm-gated)
    pub save: bool,
    /// F11: reload metadata from disk
    pub load: bool,
    /// F12: quit (confirm-gated)
    pub quit: bool,
    /// Ctrl+O: open a resource file
    pub open_resource: bool,
}

/// What the frame loop should do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    /// Confirmed quit: terminate the process
    Quit,
    /// Show the native file-open dialog for a resource image
    PickResource,
}

/// The whole editor: document, session, geometry, loaded sheet
pub struct AppState {
    pub doc: SpriteDocument,
    pub session: Session,
    pub geometry: SheetGeometry,
    pub sheet: Option<SpriteSheet>,
    pub resource_path: Option<PathBuf>,
    pub metadata_path: PathBuf,
    /// Shared buffer for CommandInput and LegacyInput (modes are exclusive)
    pub prompt: PromptState,
}

impl AppState {
    pub fn new(doc: SpriteDocument, metadata_path: PathBuf) -> Self {
        let tile = doc.meta.sprite_size;
        let geometry = SheetGeometry::new(
            tile,
            DEFAULT_SHEET_SIZE,
            DEFAULT_SHEET_SIZE,
            Rect::new(SHEET_VIEW_X, SHEET_VIEW_Y, SHEET_VIEW_W, SHEET_VIEW_H),
        );
        Self {
            doc,
            session: Session::new(),
            geometry,
            sheet: None,
            resource_path: None,
            metadata_path,
            prompt: PromptState::new(),
        }
    }

    /// Route the frame's input to the handler for the current mode
    pub fn update(&mut self, input: &FrameInput) -> AppAction {
        match self.session.mode {
            Mode::SaveConfirm => {
                self.update_save_confirm(input);
                AppAction::None
            }
            Mode::QuitConfirm => self.update_quit_confirm(input),
            Mode::LegacyInput => {
                self.update_legacy_input(input);
                AppAction::None
            }
            Mode::CommandInput => {
                self.update_command_input(input);
                AppAction::None
            }
            Mode::View | Mode::Edit => self.update_normal(input),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // View / Edit
    // ─────────────────────────────────────────────────────────────────────

    fn update_normal(&mut self, input: &FrameInput) -> AppAction {
        self.handle_cursor_movement(input);
        self.update_hover(input);
        self.handle_selection(input);
        self.handle_mode_switch(input);

        if self.session.mode == Mode::Edit {
            self.handle_edit_commands(input);
        }

        // Quit trigger is routed in both modes so the Edit-mode refusal
        // produces its message
        if input.quit && self.session.begin_quit_confirm() {
            self.session
                .set_status("Really quit? [Y]Yes / [N]No / [ESC]Cancel");
            return AppAction::None;
        }

        // ESC/Q never quit; point at F12 instead
        if input.cancel || input.key_q {
            if self.session.mode == Mode::Edit {
                self.session
                    .set_status("Cannot quit in EDIT mode - Exit EDIT with F2 first");
            } else {
                self.session
                    .set_status("Use F12 to quit (ESC/Q disabled for safety)");
            }
        }

        if self.session.mode == Mode::View {
            return self.handle_view_triggers(input);
        }
        AppAction::None
    }

    /// Arrow keys move the cursor one tile (View only), auto-selecting and
    /// nudging the scroll so the cursor stays visible. Shift+arrows pan the
    /// viewport without touching the cursor.
    fn handle_cursor_movement(&mut self, input: &FrameInput) {
        if self.session.mode != Mode::View {
            return;
        }
        let dx = input.right as i32 - input.left as i32;
        let dy = input.down as i32 - input.up as i32;
        if dx == 0 && dy == 0 {
            return;
        }

        if input.shift {
            self.session.scroll = self.geometry.nudge_scroll(self.session.scroll, dx, dy);
            return;
        }

        let tile = self.geometry.tile_size as i64;
        let (cx, cy) = self.session.cursor;
        let x = cx as i64 + dx as i64 * tile;
        let y = cy as i64 + dy as i64 * tile;
        let moved = self.geometry.clamp_tile(x, y);
        if moved != self.session.cursor {
            self.session.cursor = moved;
            self.session.selected = Some(moved);
            self.session.scroll = self.geometry.scroll_to_show(self.session.scroll, moved);
            self.session
                .set_status(format!("Auto-selected sprite at ({}, {})", moved.0, moved.1));
        }
    }

    fn update_hover(&mut self, input: &FrameInput) {
        self.session.hover =
            self.geometry
                .tile_at(input.mouse.x, input.mouse.y, self.session.scroll);
    }

    fn handle_selection(&mut self, input: &FrameInput) {
        if self.session.mode != Mode::View {
            return;
        }
        // Click select; holding the button drags the selection across tiles
        let drag = input.mouse.left_down
            && self.session.hover.is_some()
            && self.session.hover != self.session.selected;
        if input.mouse.clicked(&self.geometry.viewport) || drag {
            if let Some(tile) = self.session.hover {
                self.session.selected = Some(tile);
                self.session.cursor = tile;
                self.session
                    .set_status(format!("Selected sprite at ({}, {})", tile.0, tile.1));
            }
        }
        // Space: manual select at cursor
        if input.space {
            self.session.selected = Some(self.session.cursor);
            let (x, y) = self.session.cursor;
            self.session
                .set_status(format!("Manually selected sprite at ({}, {})", x, y));
        }
        // Right click on the already-selected tile opens the property editor
        if input.mouse.right_pressed
            && input.mouse.inside(&self.geometry.viewport)
            && self.session.hover.is_some()
            && self.session.hover == self.session.selected
        {
            if let Some(tile) = self.session.selected {
                self.session.cursor = tile;
                self.enter_edit_mode();
            }
        }
    }

    fn handle_mode_switch(&mut self, input: &FrameInput) {
        if input.edit_mode && self.session.mode == Mode::View {
            self.enter_edit_mode();
        }
        // Exit is only reachable from Edit itself; a pending CommandInput
        // never reaches this branch
        if input.view_mode && self.session.mode == Mode::Edit {
            let saved = self.save_to_disk();
            self.session.exit_edit();
            if saved {
                self.session.set_status("VIEW mode - Changes auto-saved");
            }
        }
    }

    fn enter_edit_mode(&mut self) {
        if self.session.enter_edit() {
            let (x, y) = self.session.active_tile();
            self.session.set_status(format!(
                "EDIT mode: Sprite ({}, {}) locked - Commands: N, 1-8",
                x, y
            ));
        }
    }

    fn handle_edit_commands(&mut self, input: &FrameInput) {
        if input.manual_save {
            self.save_to_disk();
        }
        if input.sync_schema {
            let added = self.doc.sync_schema();
            self.session
                .set_status(format!("Schema sync: added {} missing fields", added));
        }
        if input.key_n {
            self.begin_field_command(NAME_FIELD.to_string());
            self.session.set_status("Enter sprite name:");
            return;
        }
        if let Some(d) = input.digit {
            let tags = self.doc.schema_tags();
            if let Some(tag) = d.checked_sub(1).and_then(|i| tags.get(i as usize)) {
                let tag = tag.clone();
                self.session.set_status(format!("Enter {}:", tag));
                self.begin_field_command(tag);
            }
        }
    }

    fn begin_field_command(&mut self, tag: String) {
        if self.session.begin_command(&tag) {
            self.prompt.clear();
        }
    }

    fn handle_view_triggers(&mut self, input: &FrameInput) -> AppAction {
        // Legacy whole-record naming: Shift+Enter on a selected tile
        if input.confirm && input.shift && self.session.selected.is_some() {
            if self.session.begin_legacy_input() {
                self.prompt.clear();
                self.session.set_status("Enter sprite name (legacy mode):");
            }
            return AppAction::None;
        }
        if input.save && self.session.begin_save_confirm() {
            self.session.set_status(format!(
                "Save to {}? [Y]Yes / [N]No / [ESC]Cancel",
                self.metadata_path.display()
            ));
        }
        if input.load {
            self.reload_from_disk();
        }
        if input.open_resource {
            return AppAction::PickResource;
        }
        AppAction::None
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transient input states
    // ─────────────────────────────────────────────────────────────────────

    fn update_command_input(&mut self, input: &FrameInput) {
        self.prompt.feed(&input.chars, input.backspace);
        if input.confirm {
            self.commit_command();
        } else if input.cancel {
            self.prompt.clear();
            self.session.finish_command();
            self.session.set_status("Command cancelled");
        }
    }

    /// Commit the pending field command against the locked tile (or the
    /// cursor when no edit lock exists).
    fn commit_command(&mut self) {
        debug_assert!(self.session.can_mutate());
        let Some(tag) = self.session.command_tag.clone() else {
            self.session.finish_command();
            return;
        };
        let (x, y) = self.session.active_tile();
        let value = self.prompt.take();

        if tag == NAME_FIELD {
            match self.doc.set_name(x, y, &value) {
                Ok(()) => {
                    self.session.note_edited_name(&value);
                    self.session.set_status(format!(
                        "Set group name '{}' to sprite ({}, {})",
                        value, x, y
                    ));
                }
                Err(e) => self.session.set_status(e.to_string()),
            }
        } else {
            match self.doc.set_field(x, y, &tag, &value) {
                Ok(FieldSet::Updated { name }) => {
                    self.session.note_edited_name(&name);
                    self.session
                        .set_status(format!("Set {} to '{}'", tag, value));
                }
                Ok(FieldSet::CreatedPlaceholder) => {
                    self.session.set_status("Created new sprite - Set NAME first");
                }
                Err(e) => self.session.set_status(e.to_string()),
            }
        }
        self.session.finish_command();
    }

    fn update_legacy_input(&mut self, input: &FrameInput) {
        self.prompt.feed(&input.chars, input.backspace);
        if input.confirm {
            let name = self.prompt.take();
            if let (false, Some((x, y))) = (name.is_empty(), self.session.selected) {
                if self.doc.set_legacy_record(x, y, &name).is_ok() {
                    self.session.note_edited_name(&name);
                    self.session.set_status(format!("Added sprite '{}'", name));
                    self.session.selected = None;
                }
            }
            self.session.finish_legacy_input();
        } else if input.cancel {
            self.prompt.clear();
            self.session.finish_legacy_input();
            self.session.set_status("Cancelled");
        }
    }

    fn update_save_confirm(&mut self, input: &FrameInput) {
        if input.key_y {
            self.session.resolve_confirm();
            self.save_to_disk();
        } else if input.key_n || input.cancel {
            self.session.resolve_confirm();
            self.session.set_status("Save cancelled");
        }
    }

    fn update_quit_confirm(&mut self, input: &FrameInput) -> AppAction {
        if input.key_y {
            return AppAction::Quit;
        }
        if input.key_n || input.cancel {
            self.session.resolve_confirm();
            self.session.set_status("Quit cancelled");
        }
        AppAction::None
    }

    // ─────────────────────────────────────────────────────────────────────
    // Persistence boundary: I/O failures become status messages here
    // ─────────────────────────────────────────────────────────────────────

    /// Save the document; true on success
    pub fn save_to_disk(&mut self) -> bool {
        match save_document(&self.doc, &self.metadata_path) {
            Ok(()) => {
                let n = self.doc.sprite_count();
                if self.session.mode == Mode::Edit {
                    self.session
                        .set_status(format!("Saved {} sprites (EDIT mode active)", n));
                } else {
                    self.session.set_status(format!(
                        "Saved {} sprites to {}",
                        n,
                        self.metadata_path.display()
                    ));
                }
                true
            }
            Err(e) => {
                self.session.set_status(format!("Save error: {}", e));
                false
            }
        }
    }

    /// Reload the document from disk. Missing or malformed files both land
    /// on an empty table; only malformed files surface a diagnostic.
    pub fn reload_from_disk(&mut self) {
        let tile = self.doc.meta.sprite_size;
        let resource = self.doc.meta.resource_file.clone();
        match load_document(&self.metadata_path) {
            Ok(doc) => {
                let n = doc.sprite_count();
                self.doc = doc;
                self.session.set_status(format!(
                    "Loaded {} sprites from {}",
                    n,
                    self.metadata_path.display()
                ));
            }
            Err(e) if e.is_missing_file() => {
                self.doc = SpriteDocument::from_template(tile, &resource);
                self.session.set_status(format!(
                    "{} not found - starting with empty sprite list",
                    self.metadata_path.display()
                ));
            }
            Err(e) => {
                self.doc = SpriteDocument::from_template(tile, &resource);
                self.session
                    .set_status(format!("Invalid metadata ({}) - starting with empty sprite list", e));
            }
        }
    }

    /// Open a resource image: load the sheet, then its metadata document
    /// (instantiating the template when none exists).
    pub fn open_resource(&mut self, path: &Path) {
        let sheet = match SpriteSheet::load(path) {
            Ok(s) => s,
            Err(e) => {
                self.session.set_status(format!("Open failed: {}", e));
                return;
            }
        };

        let resource_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.metadata_path = metadata_path_for(path);

        match open_or_create_for_resource(
            &self.metadata_path,
            &resource_name,
            self.geometry.tile_size,
        ) {
            Ok((doc, true)) => {
                self.session.set_status(format!(
                    "Opened {} - created {} from template",
                    resource_name,
                    self.metadata_path.display()
                ));
                self.doc = doc;
            }
            Ok((doc, false)) => {
                self.session.set_status(format!(
                    "Opened {} - loaded {} sprites",
                    resource_name,
                    doc.sprite_count()
                ));
                self.doc = doc;
            }
            Err(e) => {
                // Keep the malformed file on disk untouched; edit in memory
                self.doc = SpriteDocument::from_template(
                    self.geometry.tile_size,
                    &resource_name,
                );
                self.session.set_status(format!(
                    "Invalid metadata ({}) - starting with empty sprite list",
                    e
                ));
            }
        }

        self.geometry.tile_size = self.doc.meta.sprite_size;
        self.geometry.sheet_width = sheet.width;
        self.geometry.sheet_height = sheet.height;
        self.sheet = Some(sheet);
        self.resource_path = Some(path.to_path_buf());

        // Reset view position for the new bank
        self.session.cursor = (0, 0);
        self.session.selected = Some((0, 0));
        self.session.hover = None;
        self.session.scroll = (0, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{load_document, PLACEHOLDER_NAME, UNDEFINED_VALUE};
    use tempfile::tempdir;

    fn press(set: impl FnOnce(&mut FrameInput)) -> FrameInput {
        let mut input = FrameInput::default();
        set(&mut input);
        input
    }

    fn typed(text: &str) -> FrameInput {
        press(|i| i.chars = text.chars().collect())
    }

    fn app_with_tempfile() -> (AppState, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("my_resource.sprites.json");
        let doc = SpriteDocument::from_template(8, "my_resource.png");
        (AppState::new(doc, path), dir)
    }

    #[test]
    fn edit_name_field_exit_roundtrip() {
        let (mut app, _dir) = app_with_tempfile();

        // Move cursor one tile right: (8, 0), auto-selected
        app.update(&press(|i| i.right = true));
        assert_eq!(app.session.cursor, (8, 0));
        assert_eq!(app.session.selected, Some((8, 0)));

        // Enter EDIT: tile locked
        app.update(&press(|i| i.edit_mode = true));
        assert_eq!(app.session.mode, Mode::Edit);
        assert_eq!(app.session.locked, Some((8, 0)));

        // NAME command: type Hero, confirm
        app.update(&press(|i| i.key_n = true));
        assert_eq!(app.session.mode, Mode::CommandInput);
        app.update(&typed("Hero"));
        app.update(&press(|i| i.confirm = true));
        assert_eq!(app.session.mode, Mode::Edit);

        // Field 1 (ACT_NAME): type Idle, confirm
        app.update(&press(|i| i.digit = Some(1)));
        app.update(&typed("Idle"));
        app.update(&press(|i| i.confirm = true));

        // Exit EDIT: auto-save fires
        app.update(&press(|i| i.view_mode = true));
        assert_eq!(app.session.mode, Mode::View);
        assert_eq!(app.session.locked, None);

        // Reload from disk and check the record
        let loaded = load_document(&app.metadata_path).unwrap();
        let rec = loaded.sprites.get("8_0").unwrap();
        assert_eq!(rec.name, "Hero");
        assert_eq!(rec.fields.get("ACT_NAME").map(String::as_str), Some("Idle"));

        // Recent ring saw the name
        assert!(app.session.recent_names.contains(&"Hero".to_string()));
    }

    #[test]
    fn exit_trigger_is_noop_while_command_input_active() {
        let (mut app, _dir) = app_with_tempfile();
        app.update(&press(|i| i.edit_mode = true));
        app.update(&press(|i| i.key_n = true));
        assert_eq!(app.session.mode, Mode::CommandInput);

        app.update(&press(|i| i.view_mode = true));
        assert_eq!(app.session.mode, Mode::CommandInput);
        // No save occurred
        assert!(!app.metadata_path.exists());
    }

    #[test]
    fn quit_refused_while_editing() {
        let (mut app, _dir) = app_with_tempfile();
        app.update(&press(|i| i.edit_mode = true));
        let action = app.update(&press(|i| i.quit = true));
        assert_eq!(action, AppAction::None);
        assert_eq!(app.session.mode, Mode::Edit);
        assert!(app.session.status.contains("Cannot quit"));
    }

    #[test]
    fn quit_gate_yes_and_no() {
        let (mut app, _dir) = app_with_tempfile();
        app.update(&press(|i| i.quit = true));
        assert_eq!(app.session.mode, Mode::QuitConfirm);

        // No: back to View
        app.update(&press(|i| i.key_n = true));
        assert_eq!(app.session.mode, Mode::View);
        assert_eq!(app.session.status, "Quit cancelled");

        // Yes: the loop is told to terminate
        app.update(&press(|i| i.quit = true));
        let action = app.update(&press(|i| i.key_y = true));
        assert_eq!(action, AppAction::Quit);
    }

    #[test]
    fn save_gate_cancel_leaves_disk_untouched() {
        let (mut app, _dir) = app_with_tempfile();
        app.update(&press(|i| i.save = true));
        assert_eq!(app.session.mode, Mode::SaveConfirm);
        app.update(&press(|i| i.cancel = true));
        assert_eq!(app.session.mode, Mode::View);
        assert_eq!(app.session.status, "Save cancelled");
        assert!(!app.metadata_path.exists());

        // Confirmed save writes the file
        app.update(&press(|i| i.save = true));
        app.update(&press(|i| i.key_y = true));
        assert!(app.metadata_path.exists());
    }

    #[test]
    fn field_on_empty_tile_creates_placeholder_then_name_preserves_it() {
        let (mut app, _dir) = app_with_tempfile();
        app.update(&press(|i| i.edit_mode = true));

        // Field command on a tile with no record
        app.update(&press(|i| i.digit = Some(2)));
        app.update(&typed("4"));
        app.update(&press(|i| i.confirm = true));
        assert!(app.session.status.contains("Set NAME first"));

        let rec = app.doc.record_at(0, 0).unwrap();
        assert_eq!(rec.name, PLACEHOLDER_NAME);
        assert_eq!(
            rec.fields.get("ACT_NAME").map(String::as_str),
            Some(UNDEFINED_VALUE)
        );

        // Naming the tile keeps the established field set
        app.update(&press(|i| i.key_n = true));
        app.update(&typed("Coin"));
        app.update(&press(|i| i.confirm = true));
        let rec = app.doc.record_at(0, 0).unwrap();
        assert_eq!(rec.name, "Coin");
        assert_eq!(
            rec.fields.get("ACT_NAME").map(String::as_str),
            Some(UNDEFINED_VALUE)
        );
    }

    #[test]
    fn empty_field_value_is_rejected_with_message() {
        let (mut app, _dir) = app_with_tempfile();
        app.update(&press(|i| i.edit_mode = true));
        app.update(&press(|i| i.key_n = true));
        app.update(&typed("Hero"));
        app.update(&press(|i| i.confirm = true));

        // Empty value for an existing record: no-op plus diagnostic
        app.update(&press(|i| i.digit = Some(1)));
        app.update(&press(|i| i.confirm = true));
        assert_eq!(app.session.status, "Cannot set empty field");
        assert!(app.doc.record_at(0, 0).unwrap().fields.is_empty());
    }

    #[test]
    fn command_cancel_discards_buffer() {
        let (mut app, _dir) = app_with_tempfile();
        app.update(&press(|i| i.edit_mode = true));
        app.update(&press(|i| i.key_n = true));
        app.update(&typed("Junk"));
        app.update(&press(|i| i.cancel = true));
        assert_eq!(app.session.mode, Mode::Edit);
        assert!(app.prompt.is_empty());
        assert!(app.doc.record_at(0, 0).is_none());
    }

    #[test]
    fn legacy_naming_shortcut() {
        let (mut app, _dir) = app_with_tempfile();
        app.update(&press(|i| i.right = true));
        app.update(&press(|i| {
            i.confirm = true;
            i.shift = true;
        }));
        assert_eq!(app.session.mode, Mode::LegacyInput);

        app.update(&typed("Door"));
        app.update(&press(|i| i.confirm = true));
        assert_eq!(app.session.mode, Mode::View);
        assert_eq!(app.session.selected, None);

        let rec = app.doc.record_at(8, 0).unwrap();
        assert_eq!(rec.name, "Door");
        assert_eq!(
            rec.fields.get("ACT_NAME").map(String::as_str),
            Some(UNDEFINED_VALUE)
        );
    }

    #[test]
    fn click_selects_hovered_tile() {
        let (mut app, _dir) = app_with_tempfile();
        let input = press(|i| {
            i.mouse.x = SHEET_VIEW_X + 17.0;
            i.mouse.y = SHEET_VIEW_Y + 9.0;
            i.mouse.left_pressed = true;
        });
        app.update(&input);
        assert_eq!(app.session.hover, Some((16, 8)));
        assert_eq!(app.session.selected, Some((16, 8)));
        assert_eq!(app.session.cursor, (16, 8));
    }

    #[test]
    fn held_button_drags_selection_across_tiles() {
        let (mut app, _dir) = app_with_tempfile();
        app.update(&press(|i| {
            i.mouse.x = SHEET_VIEW_X + 1.0;
            i.mouse.y = SHEET_VIEW_Y + 1.0;
            i.mouse.left_pressed = true;
            i.mouse.left_down = true;
        }));
        assert_eq!(app.session.selected, Some((0, 0)));

        // Next frame the button is still held over another tile
        app.update(&press(|i| {
            i.mouse.x = SHEET_VIEW_X + 25.0;
            i.mouse.y = SHEET_VIEW_Y + 1.0;
            i.mouse.left_down = true;
        }));
        assert_eq!(app.session.selected, Some((24, 0)));
        assert_eq!(app.session.cursor, (24, 0));
    }

    #[test]
    fn out_of_range_digits_are_ignored() {
        let (mut app, _dir) = app_with_tempfile();
        app.update(&press(|i| i.edit_mode = true));
        app.update(&press(|i| i.digit = Some(0)));
        assert_eq!(app.session.mode, Mode::Edit);
        app.update(&press(|i| i.digit = Some(9)));
        assert_eq!(app.session.mode, Mode::Edit);
        assert_eq!(app.session.command_tag, None);
    }

    #[test]
    fn non_ascii_names_from_edited_files_reach_recent_ring() {
        let (mut app, _dir) = app_with_tempfile();
        // Metadata files are hand-editable; names are arbitrary UTF-8
        app.doc.set_name(0, 0, "ぱぱぱ").unwrap();
        app.update(&press(|i| i.edit_mode = true));
        app.update(&press(|i| i.digit = Some(1)));
        app.update(&typed("Idle"));
        app.update(&press(|i| i.confirm = true));
        assert!(app.session.recent_names.contains(&"ぱぱぱ".to_string()));
    }

    #[test]
    fn right_click_on_selected_tile_enters_edit() {
        let (mut app, _dir) = app_with_tempfile();
        let at_origin = |i: &mut FrameInput| {
            i.mouse.x = SHEET_VIEW_X + 1.0;
            i.mouse.y = SHEET_VIEW_Y + 1.0;
        };
        app.update(&press(|i| {
            at_origin(i);
            i.mouse.left_pressed = true;
        }));
        app.update(&press(|i| {
            at_origin(i);
            i.mouse.right_pressed = true;
        }));
        assert_eq!(app.session.mode, Mode::Edit);
        assert_eq!(app.session.locked, Some((0, 0)));
    }

    #[test]
    fn escape_in_view_points_at_f12() {
        let (mut app, _dir) = app_with_tempfile();
        app.update(&press(|i| i.cancel = true));
        assert_eq!(app.session.mode, Mode::View);
        assert!(app.session.status.contains("F12"));
    }

    #[test]
    fn cursor_stays_inside_sheet_and_scroll_clamped() {
        let (mut app, _dir) = app_with_tempfile();
        // Default sheet is 256 wide; hammer the right arrow past the edge
        for _ in 0..50 {
            app.update(&press(|i| i.right = true));
        }
        assert_eq!(app.session.cursor, (248, 0));
        let (mx, _) = app.geometry.max_scroll();
        assert!(app.session.scroll.0 <= mx);
    }

    #[test]
    fn shift_arrows_pan_without_moving_cursor() {
        let (mut app, _dir) = app_with_tempfile();
        app.geometry.sheet_width = 1024;
        app.geometry.sheet_height = 1024;

        app.update(&press(|i| {
            i.shift = true;
            i.right = true;
        }));
        assert_eq!(app.session.scroll, (8, 0));
        assert_eq!(app.session.cursor, (0, 0));

        // Pan is clamped at the origin
        app.update(&press(|i| {
            i.shift = true;
            i.left = true;
        }));
        app.update(&press(|i| {
            i.shift = true;
            i.left = true;
        }));
        assert_eq!(app.session.scroll, (0, 0));
    }

    #[test]
    fn reload_missing_file_gives_empty_table() {
        let (mut app, _dir) = app_with_tempfile();
        app.doc.set_name(0, 0, "Hero").unwrap();
        app.update(&press(|i| i.load = true));
        assert_eq!(app.doc.sprite_count(), 0);
        assert!(app.session.status.contains("not found"));
    }

    #[test]
    fn reload_malformed_file_reports_and_empties() {
        let (mut app, _dir) = app_with_tempfile();
        std::fs::write(&app.metadata_path, "{ broken").unwrap();
        app.update(&press(|i| i.load = true));
        assert_eq!(app.doc.sprite_count(), 0);
        assert!(app.session.status.contains("Invalid metadata"));
    }

    #[test]
    fn schema_sync_is_an_explicit_edit_command() {
        let (mut app, _dir) = app_with_tempfile();
        app.update(&press(|i| i.edit_mode = true));
        app.update(&press(|i| i.key_n = true));
        app.update(&typed("Hero"));
        app.update(&press(|i| i.confirm = true));

        app.update(&press(|i| i.sync_schema = true));
        assert!(app.session.status.contains("Schema sync"));
        let rec = app.doc.record_at(0, 0).unwrap();
        assert_eq!(rec.fields.len(), app.doc.schema_tags().len());
    }
}
