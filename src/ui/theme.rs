//! UI Theme - Shared colors and styling constants
//!
//! Centralized color definitions for a consistent look across all panels.

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Dark background color
pub const BG_COLOR: Color = Color::new(0.05, 0.05, 0.07, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.85, 0.85, 0.9, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.45, 0.45, 0.5, 1.0);

/// Panel header text
pub const HEADER_COLOR: Color = Color::new(0.3, 0.85, 0.9, 1.0);

// =============================================================================
// Grid & Highlight Colors
// =============================================================================

/// Grid lines while browsing
pub const GRID_VIEW: Color = Color::new(0.35, 0.35, 0.4, 1.0);

/// Grid lines while an edit session is active
pub const GRID_EDIT: Color = Color::new(0.6, 0.15, 0.15, 1.0);

/// Keyboard cursor in View mode
pub const CURSOR_VIEW: Color = Color::new(0.2, 0.9, 0.3, 1.0);

/// Keyboard cursor / locked tile in Edit mode
pub const CURSOR_EDIT: Color = Color::new(0.95, 0.2, 0.2, 1.0);

/// Selected tile outline
pub const SELECT_COLOR: Color = Color::new(0.95, 0.2, 0.2, 1.0);

/// Mouse hover outline
pub const HOVER_COLOR: Color = Color::new(0.2, 0.85, 0.9, 1.0);

// =============================================================================
// Status & Prompt Colors
// =============================================================================

/// Command prompt text
pub const PROMPT_COLOR: Color = Color::new(0.95, 0.85, 0.3, 1.0);

/// Confirm-gate warnings
pub const WARN_COLOR: Color = Color::new(0.95, 0.5, 0.3, 1.0);

/// Schema field rows in the side panel
pub const FIELD_COLOR: Color = Color::new(0.4, 0.85, 0.45, 1.0);

/// Name row highlight in the side panel
pub const NAME_COLOR: Color = Color::new(0.95, 0.85, 0.3, 1.0);

// =============================================================================
// Font Sizes
// =============================================================================

/// Panel header text size
pub const FONT_SIZE_HEADER: f32 = 16.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 14.0;

/// Small/detail text size
pub const FONT_SIZE_SMALL: f32 = 12.0;
