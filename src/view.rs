//! Frame rendering: sheet viewport, property panel, status lines
//!
//! Pure presentation over `AppState`; nothing in here mutates state. The
//! only live inputs are the mouse position (for the crosshair) and the
//! clock (for the prompt caret blink).

use macroquad::prelude::*;

use crate::app::{AppState, SHEET_VIEW_H, SHEET_VIEW_W, SHEET_VIEW_X, SHEET_VIEW_Y};
use crate::document::NAME_FIELD;
use crate::session::Mode;
use crate::ui::theme;
use crate::ui::Rect as UiRect;

pub const WINDOW_WIDTH: i32 = 820;
pub const WINDOW_HEIGHT: i32 = 520;

// Layout, left to right: viewport, property panel, recent-names column
const PANEL_X: f32 = SHEET_VIEW_X + SHEET_VIEW_W + 24.0;
const PANEL_Y: f32 = SHEET_VIEW_Y + 8.0;
const RECENT_X: f32 = PANEL_X + 220.0;
const LINE_H: f32 = 18.0;

const STATUS_Y: f32 = SHEET_VIEW_Y + SHEET_VIEW_H + 22.0;
const CONTROLS_Y: f32 = WINDOW_HEIGHT as f32 - 12.0;

/// Shown in the side panel when a record has no value for a schema tag
const NO_VALUE: &str = "-";

pub fn draw(app: &AppState, mouse: (f32, f32)) {
    clear_background(theme::BG_COLOR);

    draw_sheet(app);
    draw_grid(app);
    draw_tile_marks(app);
    draw_panel(app);
    draw_recent_names(app);
    draw_status(app);
    draw_controls(app);
    draw_crosshair(app, mouse);
}

fn draw_sheet(app: &AppState) {
    let (vw, vh) = app.geometry.visible_size();
    match &app.sheet {
        Some(sheet) => {
            let (sx, sy) = app.session.scroll;
            sheet.draw_region(
                (SHEET_VIEW_X, SHEET_VIEW_Y),
                UiRect::new(sx as f32, sy as f32, vw as f32, vh as f32),
            );
        }
        None => {
            draw_rectangle(
                SHEET_VIEW_X,
                SHEET_VIEW_Y,
                vw as f32,
                vh as f32,
                Color::new(0.09, 0.09, 0.12, 1.0),
            );
            draw_text(
                "No resource loaded - Ctrl+O to open an image",
                SHEET_VIEW_X + 12.0,
                SHEET_VIEW_Y + 24.0,
                theme::FONT_SIZE_CONTENT,
                theme::TEXT_DIM,
            );
        }
    }
}

/// Tile grid over the visible sheet region. Red while an edit session is
/// active, so the mode is readable at a glance.
fn draw_grid(app: &AppState) {
    let color = match app.session.mode {
        Mode::Edit | Mode::CommandInput => theme::GRID_EDIT,
        _ => theme::GRID_VIEW,
    };
    let (vw, vh) = app.geometry.visible_size();
    let (w, h) = (vw as f32, vh as f32);
    let step = app.geometry.tile_size as f32;

    let mut x = 0.0;
    while x <= w {
        draw_line(
            SHEET_VIEW_X + x,
            SHEET_VIEW_Y,
            SHEET_VIEW_X + x,
            SHEET_VIEW_Y + h,
            1.0,
            color,
        );
        x += step;
    }
    let mut y = 0.0;
    while y <= h {
        draw_line(
            SHEET_VIEW_X,
            SHEET_VIEW_Y + y,
            SHEET_VIEW_X + w,
            SHEET_VIEW_Y + y,
            1.0,
            color,
        );
        y += step;
    }
}

fn outline_tile(app: &AppState, tile: (u32, u32), inset: f32, color: Color) {
    if let Some((x, y)) = app.geometry.tile_to_screen(tile, app.session.scroll) {
        let ts = app.geometry.tile_size as f32;
        draw_rectangle_lines(
            x + inset,
            y + inset,
            ts - inset * 2.0,
            ts - inset * 2.0,
            1.0,
            color,
        );
    }
}

fn draw_tile_marks(app: &AppState) {
    if let Some(hover) = app.session.hover {
        outline_tile(app, hover, 0.0, theme::HOVER_COLOR);
    }
    if let Some(selected) = app.session.selected {
        outline_tile(app, selected, 0.0, theme::SELECT_COLOR);
    }
    match app.session.locked {
        // Locked tile: stacked outlines make the edit target unmistakable
        Some(locked) => {
            for inset in 0..3 {
                outline_tile(app, locked, inset as f32, theme::CURSOR_EDIT);
            }
        }
        None => outline_tile(app, app.session.cursor, 0.0, theme::CURSOR_VIEW),
    }
}

fn draw_panel(app: &AppState) {
    let (x, y) = app.session.active_tile();
    let mut line = PANEL_Y + LINE_H;

    draw_text(
        "SPRITE PROPERTIES",
        PANEL_X,
        line,
        theme::FONT_SIZE_HEADER,
        theme::HEADER_COLOR,
    );
    line += LINE_H * 1.4;

    draw_text(
        &format!("Position: ({}, {})", x, y),
        PANEL_X,
        line,
        theme::FONT_SIZE_CONTENT,
        theme::TEXT_COLOR,
    );
    line += LINE_H;
    draw_text(
        &format!("Number:   {}", app.geometry.tile_index((x, y))),
        PANEL_X,
        line,
        theme::FONT_SIZE_CONTENT,
        theme::TEXT_COLOR,
    );
    line += LINE_H * 1.4;

    let record = app.doc.record_at(x, y);

    let (name_text, name_color) = match record {
        Some(rec) => (rec.name.clone(), theme::NAME_COLOR),
        None => ("(no record)".to_string(), theme::TEXT_DIM),
    };
    draw_text(
        &format!("N]{}: {}", NAME_FIELD, name_text),
        PANEL_X,
        line,
        theme::FONT_SIZE_CONTENT,
        name_color,
    );
    line += LINE_H;

    for (i, tag) in app.doc.schema_tags().iter().enumerate().take(8) {
        let value = record.and_then(|rec| rec.fields.get(tag));
        let (text, color) = match value {
            Some(v) => (v.as_str(), theme::FIELD_COLOR),
            None => (NO_VALUE, theme::TEXT_DIM),
        };
        draw_text(
            &format!("{}]{}: {}", i + 1, tag, text),
            PANEL_X,
            line,
            theme::FONT_SIZE_CONTENT,
            color,
        );
        line += LINE_H;
    }

    line += LINE_H * 0.4;
    draw_text(
        &format!("Sprites defined: {}", app.doc.sprite_count()),
        PANEL_X,
        line,
        theme::FONT_SIZE_SMALL,
        theme::TEXT_DIM,
    );
    if let Some(path) = &app.resource_path {
        line += LINE_H * 0.8;
        draw_text(
            &format!("Resource: {}", path.display()),
            PANEL_X,
            line,
            theme::FONT_SIZE_SMALL,
            theme::TEXT_DIM,
        );
    }
}

fn draw_recent_names(app: &AppState) {
    let mut line = PANEL_Y + LINE_H;
    draw_text(
        "RECENT",
        RECENT_X,
        line,
        theme::FONT_SIZE_HEADER,
        theme::HEADER_COLOR,
    );
    line += LINE_H * 1.4;

    // Most recent first; the latest entry is highlighted
    for (i, name) in app.session.recent_names.iter().rev().enumerate() {
        let color = if i == 0 {
            theme::SELECT_COLOR
        } else {
            theme::TEXT_COLOR
        };
        draw_text(
            &shorten_name(name),
            RECENT_X,
            line,
            theme::FONT_SIZE_CONTENT,
            color,
        );
        line += LINE_H;
    }
}

/// Column-width cap for ring entries. Names from hand-edited metadata files
/// are arbitrary UTF-8, so the cut is on chars, never on bytes.
fn shorten_name(name: &str) -> String {
    if name.chars().count() > 8 {
        let head: String = name.chars().take(8).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

fn mode_indicator(mode: Mode) -> (&'static str, Color) {
    match mode {
        Mode::View => ("[VIEW] F1>EDIT", theme::TEXT_COLOR),
        Mode::Edit => ("[EDIT] F2>VIEW", theme::CURSOR_EDIT),
        Mode::CommandInput => ("[EDIT] entering value", theme::CURSOR_EDIT),
        Mode::LegacyInput => ("[NAME] entering name", theme::PROMPT_COLOR),
        Mode::SaveConfirm => ("[SAVE?]", theme::WARN_COLOR),
        Mode::QuitConfirm => ("[QUIT?]", theme::WARN_COLOR),
    }
}

fn draw_status(app: &AppState) {
    let (indicator, color) = mode_indicator(app.session.mode);
    draw_text(
        indicator,
        SHEET_VIEW_X,
        STATUS_Y,
        theme::FONT_SIZE_CONTENT,
        color,
    );

    let message_color = match app.session.mode {
        Mode::SaveConfirm | Mode::QuitConfirm => theme::WARN_COLOR,
        _ => theme::TEXT_COLOR,
    };
    draw_text(
        &app.session.status,
        SHEET_VIEW_X + 160.0,
        STATUS_Y,
        theme::FONT_SIZE_CONTENT,
        message_color,
    );

    // Active prompt line with a blinking caret
    let prompt_tag = match app.session.mode {
        Mode::CommandInput => app.session.command_tag.as_deref(),
        Mode::LegacyInput => Some(NAME_FIELD),
        _ => None,
    };
    if let Some(tag) = prompt_tag {
        let caret = if get_time() % 1.0 < 0.5 { "_" } else { " " };
        draw_text(
            &format!("{}> {}{}", tag, app.prompt.text, caret),
            SHEET_VIEW_X,
            STATUS_Y + LINE_H,
            theme::FONT_SIZE_CONTENT,
            theme::PROMPT_COLOR,
        );
    }
}

fn draw_controls(app: &AppState) {
    let text = match app.session.mode {
        Mode::View => {
            "Arrows move  Shift+Arrows pan  Click select  RClick edit  F1 EDIT  F10 save  F11 load  F12 quit  Ctrl+O open"
        }
        Mode::Edit => "N name  1-8 fields  F3 save  F5 sync schema  F2 back to VIEW",
        Mode::CommandInput | Mode::LegacyInput => "Enter confirm  ESC cancel  Backspace erase",
        Mode::SaveConfirm | Mode::QuitConfirm => "Y confirm  N / ESC cancel",
    };
    draw_text(
        text,
        SHEET_VIEW_X,
        CONTROLS_Y,
        theme::FONT_SIZE_SMALL,
        theme::TEXT_DIM,
    );
}

/// Crosshair in place of the OS cursor while over the viewport
fn draw_crosshair(app: &AppState, mouse: (f32, f32)) {
    let (mx, my) = mouse;
    if !app.geometry.viewport.contains(mx, my) {
        return;
    }
    draw_line(mx - 5.0, my, mx + 6.0, my, 1.0, theme::HOVER_COLOR);
    draw_line(mx, my - 5.0, mx, my + 6.0, 1.0, theme::HOVER_COLOR);
    draw_rectangle(mx, my, 1.0, 1.0, theme::TEXT_COLOR);
}
