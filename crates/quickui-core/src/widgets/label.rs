//! Static text window

use embedded_graphics::text::Alignment;

use crate::colors::{Color, SYS_COLOR_WIN_FOREGROUND};
use crate::geometry::Point;
use crate::window::{Canvas, WindowHandler};

/// Maximum label length in bytes; longer text is truncated
pub const LABEL_CAPACITY: usize = 64;

/// A single line of text in the system font, vertically centred.
///
/// Labels do not react to touch; create them with accept-touch disabled so
/// presses fall through to the parent.
pub struct Label {
    text: heapless::String<LABEL_CAPACITY>,
    alignment: Alignment,
    color: Option<Color>,
}

impl Label {
    pub fn new(text: &str) -> Self {
        let mut label = Self {
            text: heapless::String::new(),
            alignment: Alignment::Left,
            color: None,
        };
        label.set_text(text);
        label
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Text colour; the window foreground system colour by default.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Returns true if it changed; the caller marks the
    /// window dirty.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text.as_str() == text {
            return false;
        }
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
        true
    }
}

impl WindowHandler for Label {
    fn on_paint(&mut self, canvas: &mut Canvas<'_>) {
        let color = self
            .color
            .unwrap_or_else(|| canvas.system_color(SYS_COLOR_WIN_FOREGROUND));
        let font = *canvas.font();
        let size = canvas.size();
        let width = font.text_width(&self.text);
        let x = match self.alignment {
            Alignment::Left => 0,
            Alignment::Center => (size.width - width) / 2,
            Alignment::Right => size.width - width,
        };
        let y = (size.height - font.line_height()) / 2;
        canvas.draw_string(Point::new(x, y), color, &self.text);
    }
}
