//! Offset-translating wrapper around the driver.

use embassy_time::Instant;

use crate::assets::{Font, Image, Palette};
use crate::colors::Color;
use crate::event::TouchEvent;
use crate::geometry::{Point, Rectangle};
use crate::surface::{Driver, Surface};

/// Forwards drawing to the driver shifted by the current paint offset.
///
/// The offset is the absolute origin of the window being painted. It is
/// reset to the origin at the start of each repaint pass and only changed
/// while a pass is running. Clip rectangles are already absolute and are
/// forwarded untouched.
pub(crate) struct Painter<D> {
    driver: D,
    offset: Point,
}

impl<D: Driver> Painter<D> {
    pub(crate) fn new(driver: D) -> Self {
        Self {
            driver,
            offset: Point::ORIGIN,
        }
    }

    pub(crate) fn offset(&self) -> Point {
        self.offset
    }

    pub(crate) fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    pub(crate) fn driver(&self) -> &D {
        &self.driver
    }

    pub(crate) fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub(crate) fn now(&self) -> Instant {
        self.driver.now()
    }

    pub(crate) fn grab_events(&mut self) {
        self.driver.grab_events();
    }

    pub(crate) fn next_touch_event(&mut self) -> Option<TouchEvent> {
        self.driver.next_touch_event()
    }
}

impl<D: Driver> Surface for Painter<D> {
    fn begin_paint(&mut self) {
        self.driver.begin_paint();
    }

    fn end_paint(&mut self) {
        self.driver.end_paint();
    }

    fn set_clip(&mut self, clip: Rectangle) {
        self.driver.set_clip(clip);
    }

    fn put_pixel(&mut self, at: Point, color: Color) {
        self.driver.put_pixel(at.translate(self.offset), color);
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Color) {
        self.driver.fill_rect(rect.translate(self.offset), color);
    }

    fn draw_line(&mut self, start: Point, end: Point, color: Color) {
        self.driver
            .draw_line(start.translate(self.offset), end.translate(self.offset), color);
    }

    fn draw_box(&mut self, rect: Rectangle, color: Color) {
        self.driver.draw_box(rect.translate(self.offset), color);
    }

    fn draw_image(
        &mut self,
        at: Point,
        image: &Image,
        source: Option<Rectangle>,
        mask: Option<&Image>,
        color: Color,
        palette: Option<&Palette>,
    ) {
        self.driver
            .draw_image(at.translate(self.offset), image, source, mask, color, palette);
    }

    fn draw_char(&mut self, font: &Font, at: Point, color: Color, ch: char) {
        self.driver
            .draw_char(font, at.translate(self.offset), color, ch);
    }

    fn draw_string(&mut self, font: &Font, at: Point, color: Color, text: &str) {
        self.driver
            .draw_string(font, at.translate(self.offset), color, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawCall, RecordingDriver};

    #[test]
    fn test_primitives_are_translated_by_offset() {
        let mut painter = Painter::new(RecordingDriver::new(100, 100));
        painter.set_offset(Point::new(5, 7));
        painter.put_pixel(Point::new(1, 1), Color::default());
        painter.fill_rect(Rectangle::new(0, 0, 3, 3), Color::default());
        painter.draw_line(Point::new(0, 0), Point::new(2, 0), Color::default());
        painter.set_clip(Rectangle::new(5, 7, 10, 10));

        assert_eq!(
            painter.driver().calls,
            [
                DrawCall::Pixel(Point::new(6, 8)),
                DrawCall::Fill(Rectangle::new(5, 7, 3, 3), Color::default()),
                DrawCall::Line(Point::new(5, 7), Point::new(7, 7)),
                DrawCall::Clip(Rectangle::new(5, 7, 10, 10)),
            ]
        );
    }
}
