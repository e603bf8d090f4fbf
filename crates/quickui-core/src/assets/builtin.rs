use alloc::string::ToString;

use super::icons::system_icon_strip;
use super::{AssetSource, Font, Image, Palette, SYSTEM_RESOURCE};
use crate::error::AssetError;

/// Compiled-in system resources.
///
/// Only the [`SYSTEM_RESOURCE`] name resolves; anything else is
/// [`AssetError::NotFound`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinAssets;

impl BuiltinAssets {
    fn check(name: &str) -> Result<(), AssetError> {
        if name == SYSTEM_RESOURCE {
            Ok(())
        } else {
            Err(AssetError::NotFound {
                name: name.to_string(),
            })
        }
    }
}

impl AssetSource for BuiltinAssets {
    fn load_palette(&self, name: &str) -> Result<Palette, AssetError> {
        Self::check(name)?;
        Ok(Palette::system())
    }

    fn load_icon(&self, name: &str) -> Result<Image, AssetError> {
        Self::check(name)?;
        Ok(system_icon_strip())
    }

    fn load_font(&self, name: &str) -> Result<Font, AssetError> {
        Self::check(name)?;
        Font::by_face("6x10")
    }
}
