//! Palettes, images, fonts and where they come from
//!
//! The coordinator loads its palette, font and icon strip once at startup
//! through an [`AssetSource`] using the [`SYSTEM_RESOURCE`] name. Two sources
//! ship with the crate:
//!
//! - [`BuiltinAssets`] - compiled-in system palette, 6x10 font and a
//!   procedurally drawn icon strip
//! - [`AssetBundle`] - named resources decoded from a `postcard` blob

mod builtin;
mod bundle;
mod icons;
mod image;

pub use builtin::BuiltinAssets;
pub use bundle::{AssetBundle, NamedFont, NamedImage, NamedPalette};
pub use icons::*;
pub use image::{Image, ImageFormat, PixelValue};

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_6X10, FONT_10X20};

use crate::colors::{Color, PALETTE_SIZE, SYSTEM_PALETTE};
use crate::error::AssetError;

/// Resource name the coordinator loads its assets from.
pub const SYSTEM_RESOURCE: &str = "system";

/// A fixed table of [`PALETTE_SIZE`] colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: [Color; PALETTE_SIZE],
}

impl Palette {
    pub const fn new(colors: [Color; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    /// The compiled-in system palette.
    pub const fn system() -> Self {
        Self::new(SYSTEM_PALETTE)
    }

    /// Color at `index`, `None` past the end of the table.
    pub fn color(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Color at `index` wrapped into the table, so every integer is valid.
    ///
    /// Negative indices wrap from the end (`-1` is the last entry).
    pub fn wrapped(&self, index: i32) -> Color {
        self.colors[index.rem_euclid(PALETTE_SIZE as i32) as usize]
    }

    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::system()
    }
}

/// A bitmap font usable by the surface text primitives.
#[derive(Clone, Copy)]
pub struct Font {
    face: &'static MonoFont<'static>,
}

impl Font {
    pub const fn new(face: &'static MonoFont<'static>) -> Self {
        Self { face }
    }

    /// Look up one of the compiled-in faces by name (`"5x8"`, `"6x10"`,
    /// `"10x20"`).
    pub fn by_face(face: &str) -> Result<Self, AssetError> {
        match face {
            "5x8" => Ok(Self::new(&FONT_5X8)),
            "6x10" => Ok(Self::new(&FONT_6X10)),
            "10x20" => Ok(Self::new(&FONT_10X20)),
            _ => Err(AssetError::UnknownFontFace),
        }
    }

    pub fn face(&self) -> &'static MonoFont<'static> {
        self.face
    }

    /// Height of a line of text in pixels.
    pub fn line_height(&self) -> i32 {
        self.face.character_size.height as i32
    }

    /// Width of `text` in pixels when drawn with this font.
    pub fn text_width(&self, text: &str) -> i32 {
        let advance = self.face.character_size.width + self.face.character_spacing;
        let chars = text.chars().count() as u32;
        (chars * advance).saturating_sub(self.face.character_spacing) as i32
    }
}

impl core::fmt::Debug for Font {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Font")
            .field("character_size", &self.face.character_size)
            .finish()
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.face, other.face)
    }
}

/// Something that can produce named palettes, icon strips and fonts.
pub trait AssetSource {
    fn load_palette(&self, name: &str) -> Result<Palette, AssetError>;

    fn load_icon(&self, name: &str) -> Result<Image, AssetError>;

    fn load_font(&self, name: &str) -> Result<Font, AssetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_matches_modulo() {
        let palette = Palette::system();
        for i in -64..64 {
            assert_eq!(palette.wrapped(i), palette.wrapped(i.rem_euclid(16)));
        }
        assert_eq!(palette.wrapped(16), palette.wrapped(0));
        assert_eq!(palette.wrapped(-1), palette.wrapped(15));
        assert_eq!(palette.wrapped(i32::MIN), palette.wrapped(i32::MIN.rem_euclid(16)));
        assert_eq!(palette.wrapped(i32::MAX), palette.wrapped(15));
    }

    #[test]
    fn test_font_faces() {
        assert!(Font::by_face("6x10").is_ok());
        assert_eq!(Font::by_face("7x13").unwrap_err(), AssetError::UnknownFontFace);
        let font = Font::by_face("6x10").unwrap();
        assert_eq!(font.line_height(), 10);
        assert_eq!(font.text_width("abc"), 18);
        assert_eq!(font.text_width(""), 0);
    }
}
