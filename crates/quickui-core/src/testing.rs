//! Recording driver for unit tests.

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use embassy_time::{Duration, Instant};

use crate::assets::{Font, Image, Palette};
use crate::colors::Color;
use crate::event::TouchEvent;
use crate::geometry::{Dimension, Point, Rectangle};
use crate::surface::{Driver, Surface};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCall {
    Begin,
    End,
    Clip(Rectangle),
    Pixel(Point),
    Fill(Rectangle, Color),
    Line(Point, Point),
    Box(Rectangle),
    Image { at: Point, source: Option<Rectangle> },
    Char(Point, char),
    Text(Point, String),
}

/// Records every surface call and serves touch events from a queue.
pub(crate) struct RecordingDriver {
    pub(crate) calls: Vec<DrawCall>,
    pub(crate) events: VecDeque<TouchEvent>,
    pub(crate) size: Dimension,
    pub(crate) now: Instant,
    pub(crate) honour_size_requests: bool,
    pub(crate) grabs: usize,
}

impl RecordingDriver {
    pub(crate) fn new(width: i32, height: i32) -> Self {
        Self {
            calls: Vec::new(),
            events: VecDeque::new(),
            size: Dimension::new(width, height),
            now: Instant::from_millis(0),
            honour_size_requests: false,
            grabs: 0,
        }
    }

    pub(crate) fn advance(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
    }
}

impl Surface for RecordingDriver {
    fn begin_paint(&mut self) {
        self.calls.push(DrawCall::Begin);
    }

    fn end_paint(&mut self) {
        self.calls.push(DrawCall::End);
    }

    fn set_clip(&mut self, clip: Rectangle) {
        self.calls.push(DrawCall::Clip(clip));
    }

    fn put_pixel(&mut self, at: Point, _color: Color) {
        self.calls.push(DrawCall::Pixel(at));
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Color) {
        self.calls.push(DrawCall::Fill(rect, color));
    }

    fn draw_line(&mut self, start: Point, end: Point, _color: Color) {
        self.calls.push(DrawCall::Line(start, end));
    }

    fn draw_box(&mut self, rect: Rectangle, _color: Color) {
        self.calls.push(DrawCall::Box(rect));
    }

    fn draw_image(
        &mut self,
        at: Point,
        _image: &Image,
        source: Option<Rectangle>,
        _mask: Option<&Image>,
        _color: Color,
        _palette: Option<&Palette>,
    ) {
        self.calls.push(DrawCall::Image { at, source });
    }

    fn draw_char(&mut self, _font: &Font, at: Point, _color: Color, ch: char) {
        self.calls.push(DrawCall::Char(at, ch));
    }

    fn draw_string(&mut self, _font: &Font, at: Point, _color: Color, text: &str) {
        self.calls.push(DrawCall::Text(at, text.to_string()));
    }
}

impl Driver for RecordingDriver {
    fn size(&self) -> Dimension {
        self.size
    }

    fn request_size(&mut self, preferred: Dimension) {
        if self.honour_size_requests {
            self.size = preferred;
        }
    }

    fn grab_events(&mut self) {
        self.grabs += 1;
    }

    fn next_touch_event(&mut self) -> Option<TouchEvent> {
        self.events.pop_front()
    }

    fn now(&self) -> Instant {
        self.now
    }
}
