//! Window-local drawing context.

use crate::assets::{Font, Image, Palette};
use crate::colors::Color;
use crate::geometry::{Dimension, Point, Rectangle};
use crate::resources::SystemResources;
use crate::surface::Surface;

/// Drawing context handed to a window's paint callbacks.
///
/// Coordinates are local to the window: `(0, 0)` is its top-left corner.
/// Output is clipped to the window and to every ancestor.
pub struct Canvas<'a> {
    surface: &'a mut dyn Surface,
    resources: &'a SystemResources,
    size: Dimension,
    background: Color,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(
        surface: &'a mut dyn Surface,
        resources: &'a SystemResources,
        size: Dimension,
        background: Color,
    ) -> Self {
        Self {
            surface,
            resources,
            size,
            background,
        }
    }

    /// The window area in local coordinates.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_parts(Point::ORIGIN, self.size)
    }

    pub fn size(&self) -> Dimension {
        self.size
    }

    /// Background colour of the window being painted.
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn resources(&self) -> &SystemResources {
        self.resources
    }

    pub fn font(&self) -> &Font {
        &self.resources.font
    }

    pub fn palette(&self) -> &Palette {
        &self.resources.palette
    }

    pub fn system_color(&self, index: i32) -> Color {
        self.resources.system_color(index)
    }

    /// Fill the whole window with its background colour.
    pub fn erase(&mut self) {
        let (bounds, color) = (self.bounds(), self.background);
        self.surface.fill_rect(bounds, color);
    }

    pub fn put_pixel(&mut self, at: Point, color: Color) {
        self.surface.put_pixel(at, color);
    }

    pub fn fill_rect(&mut self, rect: Rectangle, color: Color) {
        self.surface.fill_rect(rect, color);
    }

    pub fn draw_line(&mut self, start: Point, end: Point, color: Color) {
        self.surface.draw_line(start, end, color);
    }

    pub fn draw_box(&mut self, rect: Rectangle, color: Color) {
        self.surface.draw_box(rect, color);
    }

    /// Draw an image; indexed images resolve through the system palette.
    pub fn draw_image(
        &mut self,
        at: Point,
        image: &Image,
        source: Option<Rectangle>,
        mask: Option<&Image>,
        color: Color,
    ) {
        let palette = &self.resources.palette;
        self.surface
            .draw_image(at, image, source, mask, color, Some(palette));
    }

    pub fn draw_char(&mut self, at: Point, color: Color, ch: char) {
        let font = self.resources.font;
        self.surface.draw_char(&font, at, color, ch);
    }

    /// Draw text in the system font with its top-left at `at`.
    pub fn draw_string(&mut self, at: Point, color: Color, text: &str) {
        let font = self.resources.font;
        self.surface.draw_string(&font, at, color, text);
    }

    pub fn draw_system_icon(&mut self, at: Point, index: i32, color: Color) {
        self.resources
            .draw_system_icon(&mut *self.surface, at, index, color);
    }
}
