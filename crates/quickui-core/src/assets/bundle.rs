//! Named resources serialized with `postcard`
//!
//! A bundle is the on-flash (or on-disk) form of the asset collaborator:
//! palettes are stored as raw RGB565 words, images in their packed form
//! and fonts as the name of a compiled-in face.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use serde::{Deserialize, Serialize};

use super::{AssetSource, Font, Image, Palette};
use crate::colors::PALETTE_SIZE;
use crate::error::AssetError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPalette {
    pub name: String,
    pub colors: [u16; PALETTE_SIZE],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedImage {
    pub name: String,
    pub image: Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedFont {
    pub name: String,
    /// One of the faces accepted by [`Font::by_face`]
    pub face: String,
}

/// A set of named palettes, icon images and fonts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBundle {
    pub palettes: Vec<NamedPalette>,
    pub images: Vec<NamedImage>,
    pub fonts: Vec<NamedFont>,
}

impl AssetBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a bundle produced by [`AssetBundle::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        postcard::from_bytes(bytes).map_err(|e| {
            log::warn!("Asset bundle decode failed: {:?}", e);
            AssetError::Malformed
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, AssetError> {
        postcard::to_allocvec(self).map_err(|_| AssetError::Malformed)
    }

    pub fn with_palette(mut self, name: &str, palette: &Palette) -> Self {
        let mut colors = [0u16; PALETTE_SIZE];
        for (raw, color) in colors.iter_mut().zip(palette.colors()) {
            *raw = RawU16::from(*color).into_inner();
        }
        self.palettes.push(NamedPalette {
            name: name.to_string(),
            colors,
        });
        self
    }

    pub fn with_image(mut self, name: &str, image: Image) -> Self {
        self.images.push(NamedImage {
            name: name.to_string(),
            image,
        });
        self
    }

    pub fn with_font(mut self, name: &str, face: &str) -> Self {
        self.fonts.push(NamedFont {
            name: name.to_string(),
            face: face.to_string(),
        });
        self
    }
}

fn not_found(name: &str) -> AssetError {
    AssetError::NotFound {
        name: name.to_string(),
    }
}

impl AssetSource for AssetBundle {
    fn load_palette(&self, name: &str) -> Result<Palette, AssetError> {
        let entry = self
            .palettes
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| not_found(name))?;
        let mut colors = [Rgb565::default(); PALETTE_SIZE];
        for (color, raw) in colors.iter_mut().zip(entry.colors.iter()) {
            *color = Rgb565::from(RawU16::new(*raw));
        }
        Ok(Palette::new(colors))
    }

    fn load_icon(&self, name: &str) -> Result<Image, AssetError> {
        self.images
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.image.clone())
            .ok_or_else(|| not_found(name))
    }

    fn load_font(&self, name: &str) -> Result<Font, AssetError> {
        let entry = self
            .fonts
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| not_found(name))?;
        Font::by_face(&entry.face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ImageFormat, SYSTEM_RESOURCE};
    use crate::colors::COLOR_ACCENT;

    fn sample_bundle() -> AssetBundle {
        let mut colors = [Rgb565::default(); PALETTE_SIZE];
        colors[3] = COLOR_ACCENT;
        AssetBundle::new()
            .with_palette(SYSTEM_RESOURCE, &Palette::new(colors))
            .with_image(SYSTEM_RESOURCE, Image::blank(32, 16, ImageFormat::Mono))
            .with_font(SYSTEM_RESOURCE, "10x20")
    }

    #[test]
    fn test_bundle_survives_encoding() {
        let bytes = sample_bundle().to_bytes().unwrap();
        let decoded = AssetBundle::from_bytes(&bytes).unwrap();

        let palette = decoded.load_palette(SYSTEM_RESOURCE).unwrap();
        assert_eq!(palette.color(3), Some(COLOR_ACCENT));
        assert_eq!(decoded.load_icon(SYSTEM_RESOURCE).unwrap().width(), 32);
        assert_eq!(decoded.load_font(SYSTEM_RESOURCE).unwrap().line_height(), 20);
    }

    #[test]
    fn test_missing_names_and_garbage() {
        let bundle = sample_bundle();
        assert!(matches!(
            bundle.load_palette("night"),
            Err(AssetError::NotFound { .. })
        ));
        assert_eq!(
            AssetBundle::from_bytes(&[0xFF, 0xFF, 0xFF]).unwrap_err(),
            AssetError::Malformed
        );
    }
}
