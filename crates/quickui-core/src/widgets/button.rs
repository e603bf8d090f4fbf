//! Push button window

use alloc::boxed::Box;

use crate::colors::{
    SYS_COLOR_CTRL_BACKGROUND, SYS_COLOR_CTRL_BORDER, SYS_COLOR_CTRL_FOREGROUND,
    SYS_COLOR_CTRL_HIGHLIGHT, SYS_COLOR_WIN_FOREGROUND,
};
use crate::event::TouchKind;
use crate::geometry::{Point, Rectangle};
use crate::app::Ui;
use crate::window::{Canvas, WindowHandler};

/// Button state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Normal,
    Pressed,
    Disabled,
}

type ClickHandler = Box<dyn FnMut(&mut Ui<'_>)>;

/// A bordered button with a centred caption.
///
/// The button relies on touch capture: after the touch-down it keeps
/// receiving the drag and release samples even outside its bounds, shows
/// itself pressed only while the finger is over it, and fires its click
/// handler on a release inside.
pub struct Button {
    label: heapless::String<32>,
    state: ButtonState,
    on_click: Option<ClickHandler>,
}

impl Button {
    pub fn new(label: &str) -> Self {
        let mut label_string = heapless::String::new();
        label_string.push_str(label).ok();

        Self {
            label: label_string,
            state: ButtonState::Normal,
            on_click: None,
        }
    }

    /// Called with the button's [`Ui`] context when it is clicked.
    pub fn on_click(mut self, handler: impl FnMut(&mut Ui<'_>) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Enable or disable the button. Returns true if the state changed; the
    /// caller marks the window dirty.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let new_state = if enabled {
            ButtonState::Normal
        } else {
            ButtonState::Disabled
        };

        if self.state == new_state {
            return false;
        }
        self.state = new_state;
        true
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, ButtonState::Disabled)
    }

    fn update_state(&mut self, ui: &mut Ui<'_>, state: ButtonState) {
        if self.state != state {
            self.state = state;
            let this = ui.this();
            ui.mark_dirty(this);
        }
    }
}

impl WindowHandler for Button {
    fn on_paint(&mut self, canvas: &mut Canvas<'_>) {
        let bounds = canvas.bounds();
        let (fill, text) = match self.state {
            ButtonState::Normal => (SYS_COLOR_CTRL_BACKGROUND, SYS_COLOR_CTRL_FOREGROUND),
            ButtonState::Pressed => (SYS_COLOR_CTRL_HIGHLIGHT, SYS_COLOR_CTRL_FOREGROUND),
            ButtonState::Disabled => (SYS_COLOR_CTRL_BACKGROUND, SYS_COLOR_WIN_FOREGROUND),
        };
        let (fill, text, border) = (
            canvas.system_color(fill),
            canvas.system_color(text),
            canvas.system_color(SYS_COLOR_CTRL_BORDER),
        );

        canvas.fill_rect(bounds, fill);
        canvas.draw_box(bounds, border);

        let font = *canvas.font();
        let at = Point::new(
            (bounds.width - font.text_width(&self.label)) / 2,
            (bounds.height - font.line_height()) / 2,
        );
        canvas.draw_string(at, text, &self.label);
    }

    fn on_touch_event(&mut self, ui: &mut Ui<'_>, kind: TouchKind, at: Point) {
        if !self.is_enabled() {
            return;
        }
        let inside = ui
            .tree()
            .rect(ui.this())
            .is_some_and(|rect| Rectangle::from_parts(Point::ORIGIN, rect.size()).contains(at));

        match kind {
            TouchKind::Touch => self.update_state(ui, ButtonState::Pressed),
            TouchKind::Drag => {
                let state = if inside {
                    ButtonState::Pressed
                } else {
                    ButtonState::Normal
                };
                self.update_state(ui, state);
            }
            TouchKind::Release => {
                self.update_state(ui, ButtonState::Normal);
                if inside && let Some(handler) = self.on_click.as_mut() {
                    handler(ui);
                }
            }
        }
    }
}
