//! System palette, font and icon strip shared by every window

use log::{info, warn};

use crate::assets::{icon_source, AssetSource, Font, Image, Palette, MAX_ICON, SYSTEM_RESOURCE};
use crate::colors::Color;
use crate::error::UiResult;
use crate::geometry::Point;
use crate::surface::Surface;

/// Read-only resources loaded once when the application starts.
///
/// Handed to windows through their [`Canvas`](crate::window::Canvas) and
/// [`Ui`](crate::app::Ui) context.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemResources {
    pub palette: Palette,
    pub font: Font,
    /// `None` when the icon strip could not be loaded
    pub icons: Option<Image>,
}

impl SystemResources {
    /// Load the [`SYSTEM_RESOURCE`] assets from `source`.
    ///
    /// A missing palette or font is an error; missing icons are tolerated
    /// and only disable [`draw_system_icon`](Self::draw_system_icon).
    pub fn load(source: &impl AssetSource) -> UiResult<Self> {
        let palette = source.load_palette(SYSTEM_RESOURCE)?;
        let font = source.load_font(SYSTEM_RESOURCE)?;
        let icons = match source.load_icon(SYSTEM_RESOURCE) {
            Ok(icons) => Some(icons),
            Err(e) => {
                warn!("System icons unavailable: {}", e);
                None
            }
        };
        info!(
            "System resources loaded (icons: {})",
            if icons.is_some() { "yes" } else { "no" }
        );
        Ok(Self {
            palette,
            font,
            icons,
        })
    }

    /// Palette entry `index` wrapped into range. Never fails.
    pub fn system_color(&self, index: i32) -> Color {
        self.palette.wrapped(index)
    }

    /// Draw frame `index` of the icon strip with its top-left at `at`.
    ///
    /// Out of range indices and a missing icon strip draw nothing.
    pub fn draw_system_icon(
        &self,
        surface: &mut dyn Surface,
        at: Point,
        index: i32,
        color: Color,
    ) {
        let Some(icons) = self.icons.as_ref() else {
            return;
        };
        if !(0..=MAX_ICON).contains(&index) {
            return;
        }
        surface.draw_image(at, icons, Some(icon_source(index)), None, color, None);
    }
}
