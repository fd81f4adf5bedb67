//! Sheet geometry: pointer-to-tile mapping and viewport scrolling
//!
//! All coordinates are in sheet pixels; tile coordinates are always
//! multiples of the tile size. The viewport rect is in screen pixels.

use crate::ui::Rect;

/// Geometry of the loaded sprite sheet and the on-screen viewport
#[derive(Debug, Clone, Copy)]
pub struct SheetGeometry {
    /// Edge length of one tile in pixels (commonly 8)
    pub tile_size: u32,
    /// Sheet dimensions in pixels
    pub sheet_width: u32,
    pub sheet_height: u32,
    /// Screen-space rectangle the sheet is drawn into
    pub viewport: Rect,
}

impl SheetGeometry {
    pub fn new(tile_size: u32, sheet_width: u32, sheet_height: u32, viewport: Rect) -> Self {
        Self {
            tile_size,
            sheet_width,
            sheet_height,
            viewport,
        }
    }

    /// Viewport size in sheet pixels (the sheet may be smaller than the rect)
    pub fn visible_size(&self) -> (u32, u32) {
        (
            (self.viewport.w as u32).min(self.sheet_width),
            (self.viewport.h as u32).min(self.sheet_height),
        )
    }

    /// Largest legal scroll offset: sheet size minus viewport size
    pub fn max_scroll(&self) -> (u32, u32) {
        let (vw, vh) = self.visible_size();
        (
            self.sheet_width.saturating_sub(vw),
            self.sheet_height.saturating_sub(vh),
        )
    }

    /// Clamp a scroll offset into `[0, sheet - viewport]`
    pub fn clamp_scroll(&self, scroll: (u32, u32)) -> (u32, u32) {
        let (mx, my) = self.max_scroll();
        (scroll.0.min(mx), scroll.1.min(my))
    }

    /// Nudge the scroll offset by whole tiles in each axis, clamped
    pub fn nudge_scroll(&self, scroll: (u32, u32), dx: i32, dy: i32) -> (u32, u32) {
        let step = self.tile_size as i64;
        let x = scroll.0 as i64 + dx as i64 * step;
        let y = scroll.1 as i64 + dy as i64 * step;
        self.clamp_scroll((x.max(0) as u32, y.max(0) as u32))
    }

    /// Containing tile for a screen-space pointer position, or None when the
    /// pointer is outside the viewport rectangle.
    pub fn tile_at(&self, px: f32, py: f32, scroll: (u32, u32)) -> Option<(u32, u32)> {
        if !self.viewport.contains(px, py) {
            return None;
        }
        let (vw, vh) = self.visible_size();
        let rel_x = px - self.viewport.x;
        let rel_y = py - self.viewport.y;
        // The rect may be wider than the sheet; positions past the sheet edge
        // address no tile.
        if rel_x >= vw as f32 || rel_y >= vh as f32 {
            return None;
        }
        let sheet_x = rel_x as u32 + scroll.0;
        let sheet_y = rel_y as u32 + scroll.1;
        let tile = self.tile_size;
        Some((sheet_x / tile * tile, sheet_y / tile * tile))
    }

    /// Screen position of a tile's top-left corner, or None when the tile is
    /// not fully inside the viewport under the given scroll.
    pub fn tile_to_screen(&self, tile: (u32, u32), scroll: (u32, u32)) -> Option<(f32, f32)> {
        let (vw, vh) = self.visible_size();
        if tile.0 < scroll.0 || tile.1 < scroll.1 {
            return None;
        }
        let local_x = tile.0 - scroll.0;
        let local_y = tile.1 - scroll.1;
        if local_x + self.tile_size > vw || local_y + self.tile_size > vh {
            return None;
        }
        Some((
            self.viewport.x + local_x as f32,
            self.viewport.y + local_y as f32,
        ))
    }

    /// Clamp a tile coordinate into the sheet, snapped to the grid
    pub fn clamp_tile(&self, x: i64, y: i64) -> (u32, u32) {
        let tile = self.tile_size as i64;
        let max_x = self.sheet_width as i64 - tile;
        let max_y = self.sheet_height as i64 - tile;
        let cx = x.clamp(0, max_x.max(0)) / tile * tile;
        let cy = y.clamp(0, max_y.max(0)) / tile * tile;
        (cx as u32, cy as u32)
    }

    /// Linear tile index, row-major over the sheet grid
    pub fn tile_index(&self, tile: (u32, u32)) -> u32 {
        let cols = self.sheet_width / self.tile_size;
        (tile.1 / self.tile_size) * cols + tile.0 / self.tile_size
    }

    /// Minimal tile-step scroll adjustment that keeps the cursor tile fully
    /// visible, clamped to the legal range.
    pub fn scroll_to_show(&self, scroll: (u32, u32), cursor: (u32, u32)) -> (u32, u32) {
        let (vw, vh) = self.visible_size();
        let tile = self.tile_size;
        let mut s = scroll;
        if cursor.0 < s.0 {
            s.0 = cursor.0;
        } else if cursor.0 + tile > s.0 + vw {
            s.0 = cursor.0 + tile - vw;
        }
        if cursor.1 < s.1 {
            s.1 = cursor.1;
        } else if cursor.1 + tile > s.1 + vh {
            s.1 = cursor.1 + tile - vh;
        }
        // Keep offsets on the tile grid
        s.0 = s.0 / tile * tile + if s.0 % tile != 0 { tile } else { 0 };
        s.1 = s.1 / tile * tile + if s.1 % tile != 0 { tile } else { 0 };
        self.clamp_scroll(s)
    }
}
