//! Color definitions and the system palette layout
//!
//! All colors are RGB565, the native format of the small SPI panels this
//! toolkit targets.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

/// Pixel color used by every surface operation.
pub type Color = Rgb565;

/// Number of entries in a [`Palette`](crate::assets::Palette).
pub const PALETTE_SIZE: usize = 16;

// ============================================================================
// System color slots
// ============================================================================
//
// Offsets into the system palette used by the framework for its own
// elements. Replacing the system palette re-skins the whole UI.

/// Default (application) background
pub const SYS_COLOR_BACKGROUND: i32 = 0;
/// Default foreground
pub const SYS_COLOR_FOREGROUND: i32 = 1;
/// Window background
pub const SYS_COLOR_WIN_BACKGROUND: i32 = 2;
/// Window foreground
pub const SYS_COLOR_WIN_FOREGROUND: i32 = 3;
/// Control background
pub const SYS_COLOR_CTRL_BACKGROUND: i32 = 4;
/// Control foreground
pub const SYS_COLOR_CTRL_FOREGROUND: i32 = 5;
/// Control highlight (pressed state)
pub const SYS_COLOR_CTRL_HIGHLIGHT: i32 = 6;
/// Control border
pub const SYS_COLOR_CTRL_BORDER: i32 = 7;
/// Dialog background
pub const SYS_COLOR_DLG_BACKGROUND: i32 = 8;
/// Dialog foreground
pub const SYS_COLOR_DLG_FOREGROUND: i32 = 9;
/// Success indicator
pub const SYS_COLOR_ICON_SUCCESS: i32 = 10;
/// Alternate success indicator
pub const SYS_COLOR_ICON_SUCCESS_ALT: i32 = 11;
/// Warning indicator
pub const SYS_COLOR_ICON_WARNING: i32 = 12;
/// Alternate warning indicator
pub const SYS_COLOR_ICON_WARNING_ALT: i32 = 13;
/// Error indicator
pub const SYS_COLOR_ICON_ERROR: i32 = 14;
/// Alternate error indicator
pub const SYS_COLOR_ICON_ERROR_ALT: i32 = 15;

// ============================================================================
// Base Colors
// ============================================================================

/// Very dark gray-blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);

/// Slightly lighter than background, used for windows
pub const COLOR_SURFACE: Rgb565 = Rgb565::new(26 >> 3, 32 >> 2, 33 >> 3);

/// Medium gray for borders
pub const COLOR_STROKE: Rgb565 = Rgb565::new(43 >> 3, 55 >> 2, 57 >> 3);

/// Raised control face
pub const COLOR_CONTROL: Rgb565 = Rgb565::new(52 >> 3, 64 >> 2, 68 >> 3);

/// Dialog panel
pub const COLOR_DIALOG: Rgb565 = Rgb565::new(36 >> 3, 44 >> 2, 48 >> 3);

/// Bright teal-green accent
pub const COLOR_ACCENT: Rgb565 = Rgb565::new(95 >> 3, 185 >> 2, 141 >> 3);

// ============================================================================
// Status Colors
// ============================================================================

pub const COLOR_SUCCESS: Rgb565 = Rgb565::new(76 >> 3, 154 >> 2, 113 >> 3);
pub const COLOR_SUCCESS_ALT: Rgb565 = Rgb565::new(24 >> 3, 40 >> 2, 36 >> 3);
pub const COLOR_WARNING: Rgb565 = Rgb565::new(200 >> 3, 145 >> 2, 85 >> 3);
pub const COLOR_WARNING_ALT: Rgb565 = Rgb565::new(45 >> 3, 37 >> 2, 28 >> 3);
pub const COLOR_ERROR: Rgb565 = Rgb565::new(190 >> 3, 95 >> 2, 95 >> 3);
pub const COLOR_ERROR_ALT: Rgb565 = Rgb565::new(43 >> 3, 29 >> 2, 29 >> 3);

// ============================================================================
// Text Colors
// ============================================================================

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Light gray - for secondary text
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// The built-in system palette, indexed by the `SYS_COLOR_*` slots.
pub const SYSTEM_PALETTE: [Rgb565; PALETTE_SIZE] = [
    COLOR_BACKGROUND,  // SYS_COLOR_BACKGROUND
    WHITE,             // SYS_COLOR_FOREGROUND
    COLOR_SURFACE,     // SYS_COLOR_WIN_BACKGROUND
    LIGHT_GRAY,        // SYS_COLOR_WIN_FOREGROUND
    COLOR_CONTROL,     // SYS_COLOR_CTRL_BACKGROUND
    WHITE,             // SYS_COLOR_CTRL_FOREGROUND
    COLOR_ACCENT,      // SYS_COLOR_CTRL_HIGHLIGHT
    COLOR_STROKE,      // SYS_COLOR_CTRL_BORDER
    COLOR_DIALOG,      // SYS_COLOR_DLG_BACKGROUND
    WHITE,             // SYS_COLOR_DLG_FOREGROUND
    COLOR_SUCCESS,     // SYS_COLOR_ICON_SUCCESS
    COLOR_SUCCESS_ALT, // SYS_COLOR_ICON_SUCCESS_ALT
    COLOR_WARNING,     // SYS_COLOR_ICON_WARNING
    COLOR_WARNING_ALT, // SYS_COLOR_ICON_WARNING_ALT
    COLOR_ERROR,       // SYS_COLOR_ICON_ERROR
    COLOR_ERROR_ALT,   // SYS_COLOR_ICON_ERROR_ALT
];
