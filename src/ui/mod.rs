//! Immediate-mode UI primitives for the sprite definer
//!
//! Simple rectangle-based layout, polled mouse state, and a filtered prompt
//! buffer. Rebuilt each frame; no retained widget tree.

mod input;
mod prompt;
mod rect;
pub mod theme;

pub use input::*;
pub use prompt::*;
pub use rect::*;
