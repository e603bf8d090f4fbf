//! [`Driver`] adapter over any `embedded-graphics` draw target
//!
//! [`GraphicsDriver`] renders the [`Surface`] primitives with
//! `embedded-graphics`, keeps a bounded queue of pending touch samples and
//! gets its input and clock from an [`EventPump`]:
//!
//! - on hardware the pump reads the touch controller
//! - in the desktop simulator it translates SDL mouse events
//! - [`ManualPump`] is the headless pump: events are injected with
//!   [`GraphicsDriver::add_event`] and time only moves when told to

use core::fmt::Debug;

use embassy_time::{Duration, Instant};
use embedded_graphics::Drawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle as EgRectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::Deque;
use log::{debug, warn};

use crate::assets::{Font, Image, Palette, PixelValue};
use crate::colors::Color;
use crate::event::TouchEvent;
use crate::framebuffer::FrameBuffer;
use crate::geometry::{Dimension, Point as UiPoint, Rectangle};
use crate::surface::{Driver, Surface};

/// Maximum number of touch samples buffered between two frames
pub const TOUCH_QUEUE_CAPACITY: usize = 32;

/// Bounded FIFO of touch samples waiting for the coordinator.
#[derive(Debug)]
pub struct TouchQueue {
    events: Deque<TouchEvent, TOUCH_QUEUE_CAPACITY>,
}

impl TouchQueue {
    pub fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Queue a sample. When the queue is full the new sample is dropped.
    pub fn push(&mut self, event: TouchEvent) -> bool {
        if self.events.push_back(event).is_err() {
            warn!("Touch queue full, dropping {:?}", event);
            return false;
        }
        true
    }

    pub fn pop(&mut self) -> Option<TouchEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for TouchQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of input events and time for a [`GraphicsDriver`].
pub trait EventPump<T> {
    /// Move any new hardware input into `queue`.
    fn pump(&mut self, target: &mut T, queue: &mut TouchQueue);

    fn now(&self) -> Instant;

    fn close_requested(&self) -> bool {
        false
    }

    /// Handle a preferred display size request; ignored by default.
    fn request_size(&mut self, _target: &mut T, _size: Dimension) {}
}

/// Headless pump with a manually advanced clock.
#[derive(Debug, Clone, Copy)]
pub struct ManualPump {
    now: Instant,
}

impl ManualPump {
    pub fn new() -> Self {
        Self {
            now: Instant::from_millis(0),
        }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn set_now(&mut self, now: Instant) {
        self.now = now;
    }
}

impl Default for ManualPump {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPump<FrameBuffer> for ManualPump {
    fn pump(&mut self, _target: &mut FrameBuffer, _queue: &mut TouchQueue) {}

    fn now(&self) -> Instant {
        self.now
    }

    fn request_size(&mut self, target: &mut FrameBuffer, size: Dimension) {
        debug!("Resizing framebuffer to {}x{}", size.width, size.height);
        target.resize(size.into());
    }
}

/// A [`Driver`] drawing onto an `embedded-graphics` target.
pub struct GraphicsDriver<T, P> {
    target: T,
    pump: P,
    events: TouchQueue,
    clip: EgRectangle,
}

impl GraphicsDriver<FrameBuffer, ManualPump> {
    /// An off-screen driver of the given size, driven by hand.
    pub fn headless(size: Dimension) -> Self {
        Self::new(FrameBuffer::new(size.into()), ManualPump::new())
    }
}

impl<T, P> GraphicsDriver<T, P>
where
    T: DrawTarget<Color = Rgb565>,
    T::Error: Debug,
    P: EventPump<T>,
{
    pub fn new(target: T, pump: P) -> Self {
        let clip = target.bounding_box();
        Self {
            target,
            pump,
            events: TouchQueue::new(),
            clip,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn pump_mut(&mut self) -> &mut P {
        &mut self.pump
    }

    /// Inject a touch sample as if it came from the hardware.
    pub fn add_event(&mut self, event: TouchEvent) -> bool {
        self.events.push(event)
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn report<E: Debug>(result: Result<(), E>) {
        if let Err(e) = result {
            warn!("Draw error: {:?}", e);
        }
    }

    fn resolve_pixel(
        value: PixelValue,
        color: Color,
        palette: Option<&Palette>,
    ) -> Option<Rgb565> {
        match value {
            PixelValue::Mono(true) => Some(color),
            PixelValue::Mono(false) => None,
            PixelValue::Index(index) => palette.and_then(|p| p.color(index as usize)),
            PixelValue::Raw(raw) => Some(Rgb565::from(RawU16::new(raw))),
        }
    }
}

impl<T, P> Surface for GraphicsDriver<T, P>
where
    T: DrawTarget<Color = Rgb565>,
    T::Error: Debug,
    P: EventPump<T>,
{
    fn set_clip(&mut self, clip: Rectangle) {
        self.clip = EgRectangle::from(clip).intersection(&self.target.bounding_box());
    }

    fn put_pixel(&mut self, at: UiPoint, color: Color) {
        let mut target = self.target.clipped(&self.clip);
        Self::report(Pixel(at.into(), color).draw(&mut target));
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Color) {
        let mut target = self.target.clipped(&self.clip);
        Self::report(target.fill_solid(&rect.into(), color));
    }

    fn draw_line(&mut self, start: UiPoint, end: UiPoint, color: Color) {
        let mut target = self.target.clipped(&self.clip);
        Self::report(
            Line::new(start.into(), end.into())
                .into_styled(PrimitiveStyle::with_stroke(color, 1))
                .draw(&mut target),
        );
    }

    fn draw_box(&mut self, rect: Rectangle, color: Color) {
        let mut target = self.target.clipped(&self.clip);
        Self::report(
            EgRectangle::from(rect)
                .into_styled(PrimitiveStyle::with_stroke(color, 1))
                .draw(&mut target),
        );
    }

    fn draw_image(
        &mut self,
        at: UiPoint,
        image: &Image,
        source: Option<Rectangle>,
        mask: Option<&Image>,
        color: Color,
        palette: Option<&Palette>,
    ) {
        let whole = Rectangle::new(0, 0, image.width() as i32, image.height() as i32);
        let source = source.map_or(whole, |s| s.intersection(&whole));
        if source.is_empty() {
            return;
        }

        let pixels = (source.y..source.y + source.height).flat_map(move |sy| {
            (source.x..source.x + source.width).filter_map(move |sx| {
                if let Some(mask) = mask
                    && !mask.is_set(sx, sy)
                {
                    return None;
                }
                let value = image.pixel(sx, sy)?;
                let rgb = Self::resolve_pixel(value, color, palette)?;
                let device = Point::new(at.x + sx - source.x, at.y + sy - source.y);
                Some(Pixel(device, rgb))
            })
        });

        let mut target = self.target.clipped(&self.clip);
        Self::report(target.draw_iter(pixels));
    }

    fn draw_char(&mut self, font: &Font, at: UiPoint, color: Color, ch: char) {
        let mut buf = [0u8; 4];
        self.draw_string(font, at, color, ch.encode_utf8(&mut buf));
    }

    fn draw_string(&mut self, font: &Font, at: UiPoint, color: Color, text: &str) {
        let style = MonoTextStyle::new(font.face(), color);
        let mut target = self.target.clipped(&self.clip);
        Self::report(
            Text::with_baseline(text, at.into(), style, Baseline::Top)
                .draw(&mut target)
                .map(|_| ()),
        );
    }
}

impl<T, P> Driver for GraphicsDriver<T, P>
where
    T: DrawTarget<Color = Rgb565>,
    T::Error: Debug,
    P: EventPump<T>,
{
    fn size(&self) -> Dimension {
        self.target.bounding_box().size.into()
    }

    fn request_size(&mut self, preferred: Dimension) {
        self.pump.request_size(&mut self.target, preferred);
        self.clip = self.target.bounding_box();
    }

    fn grab_events(&mut self) {
        self.pump.pump(&mut self.target, &mut self.events);
    }

    fn next_touch_event(&mut self) -> Option<TouchEvent> {
        self.events.pop()
    }

    fn now(&self) -> Instant {
        self.pump.now()
    }

    fn close_requested(&self) -> bool {
        self.pump.close_requested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{BuiltinAssets, AssetSource, ImageFormat, SYSTEM_RESOURCE};
    use crate::colors::PALETTE_SIZE;
    use alloc::vec;

    fn driver() -> GraphicsDriver<FrameBuffer, ManualPump> {
        GraphicsDriver::headless(Dimension::new(32, 24))
    }

    fn px(driver: &GraphicsDriver<FrameBuffer, ManualPump>, x: i32, y: i32) -> Option<Rgb565> {
        driver.target().pixel(Point::new(x, y))
    }

    #[test]
    fn test_fill_respects_clip() {
        let mut d = driver();
        d.set_clip(Rectangle::new(4, 4, 4, 4));
        d.fill_rect(Rectangle::new(0, 0, 32, 24), Rgb565::RED);
        assert_eq!(px(&d, 4, 4), Some(Rgb565::RED));
        assert_eq!(px(&d, 7, 7), Some(Rgb565::RED));
        assert_eq!(px(&d, 8, 7), Some(Rgb565::BLACK));
        assert_eq!(px(&d, 3, 4), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_box_is_outline_only() {
        let mut d = driver();
        d.draw_box(Rectangle::new(2, 2, 5, 5), Rgb565::GREEN);
        assert_eq!(px(&d, 2, 2), Some(Rgb565::GREEN));
        assert_eq!(px(&d, 6, 6), Some(Rgb565::GREEN));
        assert_eq!(px(&d, 4, 4), Some(Rgb565::BLACK));
        assert_eq!(px(&d, 7, 7), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_mono_image_uses_color_and_source() {
        let mut d = driver();
        let mut image = Image::blank(4, 2, ImageFormat::Mono);
        image.set_mono(2, 1, true);
        d.draw_image(
            UiPoint::new(10, 10),
            &image,
            Some(Rectangle::new(2, 0, 2, 2)),
            None,
            Rgb565::BLUE,
            None,
        );
        assert_eq!(px(&d, 10, 11), Some(Rgb565::BLUE));
        assert_eq!(px(&d, 10, 10), Some(Rgb565::BLACK));
        assert_eq!(d.target().dirty_area().map(|a| a.size), Some(Size::new(1, 1)));
    }

    #[test]
    fn test_indexed_image_with_mask() {
        let mut d = driver();
        let image = Image::new(2, 1, ImageFormat::Indexed, vec![0x12]).unwrap();
        let mut mask = Image::blank(2, 1, ImageFormat::Mono);
        mask.set_mono(1, 0, true);
        let palette = BuiltinAssets.load_palette(SYSTEM_RESOURCE).unwrap();
        assert_eq!(palette.colors().len(), PALETTE_SIZE);

        d.draw_image(UiPoint::new(0, 0), &image, None, Some(&mask), Rgb565::RED, Some(&palette));
        assert_eq!(px(&d, 0, 0), Some(Rgb565::BLACK));
        assert_eq!(px(&d, 1, 0), palette.color(2));
    }

    #[test]
    fn test_text_is_drawn_from_top_left() {
        let mut d = driver();
        let font = BuiltinAssets.load_font(SYSTEM_RESOURCE).unwrap();
        d.draw_char(&font, UiPoint::new(1, 1), Rgb565::WHITE, 'H');
        let area = d.target().dirty_area().unwrap();
        assert!(area.top_left.x >= 1 && area.top_left.y >= 1);
        assert!(area.top_left.y < 1 + font.line_height());
    }

    #[test]
    fn test_event_queue_is_fifo_and_bounded() {
        let mut d = driver();
        assert!(d.add_event(TouchEvent::touch(1, 1)));
        assert!(d.add_event(TouchEvent::release(2, 2)));
        d.grab_events();
        assert_eq!(d.next_touch_event(), Some(TouchEvent::touch(1, 1)));
        assert_eq!(d.next_touch_event(), Some(TouchEvent::release(2, 2)));
        assert_eq!(d.next_touch_event(), None);

        for i in 0..TOUCH_QUEUE_CAPACITY as i32 {
            assert!(d.add_event(TouchEvent::drag(i, i)));
        }
        assert!(!d.add_event(TouchEvent::drag(99, 99)));
        assert_eq!(d.pending_events(), TOUCH_QUEUE_CAPACITY);
    }

    #[test]
    fn test_preferred_size_resizes_framebuffer() {
        let mut d = driver();
        d.request_size(Dimension::new(64, 48));
        assert_eq!(d.size(), Dimension::new(64, 48));
        d.fill_rect(Rectangle::new(60, 40, 4, 4), Rgb565::RED);
        assert_eq!(px(&d, 63, 47), Some(Rgb565::RED));
    }
}
