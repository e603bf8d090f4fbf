//! The drawing and input contract a display driver satisfies
//!
//! All [`Surface`] coordinates are device coordinates. Windows never talk
//! to a `Surface` directly: they paint through a
//! [`Canvas`](crate::window::Canvas), whose calls the coordinator translates
//! by the absolute origin of the window being painted.

use embassy_time::Instant;

use crate::assets::{Font, Image, Palette};
use crate::colors::Color;
use crate::event::TouchEvent;
use crate::geometry::{Dimension, Point, Rectangle};

/// Drawing primitives in device coordinates.
///
/// Implementations are best-effort: a primitive that cannot be rendered is
/// dropped (and may be logged), never reported to the caller.
pub trait Surface {
    /// Start of a batch of paint operations.
    fn begin_paint(&mut self) {}

    /// End of a batch of paint operations; a good moment to flush.
    fn end_paint(&mut self) {}

    /// Restrict subsequent drawing to `clip`.
    fn set_clip(&mut self, clip: Rectangle);

    fn put_pixel(&mut self, at: Point, color: Color);

    fn fill_rect(&mut self, rect: Rectangle, color: Color);

    fn draw_line(&mut self, start: Point, end: Point, color: Color);

    /// One pixel outline just inside `rect`.
    fn draw_box(&mut self, rect: Rectangle, color: Color);

    /// Draw `image` (or its `source` sub-rectangle) with its top-left at `at`.
    ///
    /// `color` paints set bits of mono images, `palette` resolves indexed
    /// images, and pixels clear in `mask` are skipped.
    fn draw_image(
        &mut self,
        at: Point,
        image: &Image,
        source: Option<Rectangle>,
        mask: Option<&Image>,
        color: Color,
        palette: Option<&Palette>,
    );

    /// Draw one character with its top-left at `at`.
    fn draw_char(&mut self, font: &Font, at: Point, color: Color, ch: char);

    /// Draw a string with its top-left at `at`.
    fn draw_string(&mut self, font: &Font, at: Point, color: Color, text: &str);
}

/// A physical display plus its touch input and clock.
pub trait Driver: Surface {
    /// Size of the display in pixels.
    fn size(&self) -> Dimension;

    /// Ask for a different display size. Drivers are free to ignore this.
    fn request_size(&mut self, _preferred: Dimension) {}

    /// Collect input from the hardware into the pending event queue.
    ///
    /// May block for up to one frame interval.
    fn grab_events(&mut self);

    /// Pop the oldest pending touch sample.
    fn next_touch_event(&mut self) -> Option<TouchEvent>;

    /// Current time for the timer subsystem.
    fn now(&self) -> Instant;

    /// The host asked for the application to close (simulator window closed).
    fn close_requested(&self) -> bool {
        false
    }
}
