//! Sprite sheet resource: an opaque, read-only image bank
//!
//! The engine resource is consumed as an indexed image; the editor never
//! writes to it. Decoding goes through the `image` crate so PNG/JPEG/BMP
//! banks all work, then the pixels are uploaded once as a GPU texture.

use std::path::Path;

use macroquad::prelude::{
    draw_texture_ex, DrawTextureParams, FilterMode, Texture2D, WHITE,
};

use crate::ui::Rect;

/// Error type for sheet loading
#[derive(Debug)]
pub enum SheetError {
    DecodeError(image::ImageError),
    /// Sheet dimensions exceed what the texture upload path supports
    TooLarge(u32, u32),
}

impl From<image::ImageError> for SheetError {
    fn from(e: image::ImageError) -> Self {
        SheetError::DecodeError(e)
    }
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetError::DecodeError(e) => write!(f, "Decode error: {}", e),
            SheetError::TooLarge(w, h) => write!(f, "Sheet too large: {}x{}", w, h),
        }
    }
}

/// A loaded sprite sheet texture with its pixel dimensions
pub struct SpriteSheet {
    pub texture: Texture2D,
    pub width: u32,
    pub height: u32,
}

impl SpriteSheet {
    /// Decode an image file and upload it as a nearest-filtered texture
    pub fn load(path: &Path) -> Result<Self, SheetError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        if width > u16::MAX as u32 || height > u16::MAX as u32 {
            return Err(SheetError::TooLarge(width, height));
        }
        let texture = Texture2D::from_rgba8(width as u16, height as u16, img.as_raw());
        texture.set_filter(FilterMode::Nearest);
        Ok(Self {
            texture,
            width,
            height,
        })
    }

    /// Draw the bank region `(src_x, src_y, w, h)` at a screen position,
    /// pixel for pixel.
    pub fn draw_region(&self, dest: (f32, f32), src: Rect) {
        draw_texture_ex(
            &self.texture,
            dest.0,
            dest.1,
            WHITE,
            DrawTextureParams {
                source: Some(macroquad::prelude::Rect::new(src.x, src.y, src.w, src.h)),
                dest_size: Some(macroquad::prelude::vec2(src.w, src.h)),
                ..Default::default()
            },
        );
    }
}
