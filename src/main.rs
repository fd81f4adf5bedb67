//! SpriteDefiner: a visual editor for sprite-sheet tile metadata
//!
//! Point at a tile on the sheet, lock it, and attach a group name plus
//! free-form string fields. Everything lands in a human-editable JSON file
//! next to the resource image.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod document;
mod grid;
mod session;
mod sheet;
mod ui;
mod view;

use std::path::PathBuf;

use macroquad::prelude::*;

use app::{AppAction, AppState, FrameInput};
use document::SpriteDocument;

/// Tile edge used until a metadata file says otherwise
const DEFAULT_TILE_SIZE: u32 = 8;
/// Metadata file loaded at startup when no resource is given
const DEFAULT_METADATA_FILE: &str = "sprites.json";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("SpriteDefiner v{}", VERSION),
        window_width: view::WINDOW_WIDTH,
        window_height: view::WINDOW_HEIGHT,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let doc = SpriteDocument::from_template(DEFAULT_TILE_SIZE, "");
    let mut app = AppState::new(doc, PathBuf::from(DEFAULT_METADATA_FILE));

    // Optional resource image on the command line; otherwise pick up a
    // bank-less metadata file from the working directory when one exists
    match std::env::args().nth(1) {
        Some(arg) => app.open_resource(&PathBuf::from(arg)),
        None => app.reload_from_disk(),
    }

    loop {
        let input = poll_input();

        match app.update(&input) {
            AppAction::Quit => break,
            AppAction::PickResource => pick_resource(&mut app),
            AppAction::None => {}
        }

        let mouse = mouse_position();
        // Crosshair replaces the OS cursor over the viewport
        show_mouse(!app.geometry.viewport.contains(mouse.0, mouse.1));

        view::draw(&app, mouse);
        next_frame().await;
    }
}

/// Snapshot this frame's input into the plain struct the router consumes
fn poll_input() -> FrameInput {
    let mut input = FrameInput::default();

    let (mx, my) = mouse_position();
    input.mouse.x = mx;
    input.mouse.y = my;
    input.mouse.left_down = is_mouse_button_down(MouseButton::Left);
    input.mouse.left_pressed = is_mouse_button_pressed(MouseButton::Left);
    input.mouse.right_pressed = is_mouse_button_pressed(MouseButton::Right);

    while let Some(ch) = get_char_pressed() {
        input.chars.push(ch);
    }
    input.backspace = is_key_pressed(KeyCode::Backspace);

    input.left = is_key_pressed(KeyCode::Left);
    input.right = is_key_pressed(KeyCode::Right);
    input.up = is_key_pressed(KeyCode::Up);
    input.down = is_key_pressed(KeyCode::Down);

    input.confirm = is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter);
    input.cancel = is_key_pressed(KeyCode::Escape);
    input.shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
    input.space = is_key_pressed(KeyCode::Space);

    input.key_n = is_key_pressed(KeyCode::N);
    input.key_y = is_key_pressed(KeyCode::Y);
    input.key_q = is_key_pressed(KeyCode::Q);

    const DIGITS: [KeyCode; 8] = [
        KeyCode::Key1,
        KeyCode::Key2,
        KeyCode::Key3,
        KeyCode::Key4,
        KeyCode::Key5,
        KeyCode::Key6,
        KeyCode::Key7,
        KeyCode::Key8,
    ];
    input.digit = DIGITS
        .iter()
        .position(|&k| is_key_pressed(k))
        .map(|i| i as u8 + 1);

    input.edit_mode = is_key_pressed(KeyCode::F1);
    input.view_mode = is_key_pressed(KeyCode::F2);
    input.manual_save = is_key_pressed(KeyCode::F3);
    input.sync_schema = is_key_pressed(KeyCode::F5);
    input.save = is_key_pressed(KeyCode::F10);
    input.load = is_key_pressed(KeyCode::F11);
    input.quit = is_key_pressed(KeyCode::F12);

    let ctrl = is_key_down(KeyCode::LeftControl)
        || is_key_down(KeyCode::RightControl)
        || is_key_down(KeyCode::LeftSuper)
        || is_key_down(KeyCode::RightSuper);
    input.open_resource = ctrl && is_key_pressed(KeyCode::O);

    input
}

#[cfg(not(target_arch = "wasm32"))]
fn pick_resource(app: &mut AppState) {
    let dialog = rfd::FileDialog::new()
        .add_filter("Sprite sheet image", &["png", "bmp", "jpg", "jpeg"])
        .set_directory(".");

    if let Some(path) = dialog.pick_file() {
        app.open_resource(&path);
    }
}

#[cfg(target_arch = "wasm32")]
fn pick_resource(app: &mut AppState) {
    app.session
        .set_status("File dialog not available in browser");
}
