//! Modal message dialog with a single OK button

use alloc::string::{String, ToString};

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle as EgRectangle;
use embedded_layout::align::{Align, horizontal, vertical};
use log::debug;

use super::Button;
use crate::app::Ui;
use crate::assets::{ICON_INFO, SYSTEM_ICON_SIZE};
use crate::colors::{SYS_COLOR_CTRL_BORDER, SYS_COLOR_DLG_FOREGROUND};
use crate::error::UiResult;
use crate::geometry::{Point as UiPoint, Rectangle};
use crate::window::{Canvas, WindowHandler, WindowId};

const PADDING: i32 = 6;
const MIN_WIDTH: i32 = 120;
const BUTTON_WIDTH: i32 = 48;
const BUTTON_HEIGHT: i32 = 20;

/// Title, message and an OK button that dismisses the dialog.
pub struct MessageBox {
    title: String,
    message: String,
}

impl MessageBox {
    /// Create the dialog centred on the screen and show it.
    ///
    /// Returns `None` (and creates nothing) while another dialog is active.
    /// Pressing OK hides the dialog and destroys it.
    pub fn open(ui: &mut Ui<'_>, title: &str, message: &str) -> UiResult<Option<WindowId>> {
        if ui.active_dialog().is_some() {
            return Ok(None);
        }

        let font = ui.resources().font;
        let line = font.line_height();
        let text_width = font
            .text_width(title)
            .max(font.text_width(message) + SYSTEM_ICON_SIZE + PADDING);
        let width = (text_width + 2 * PADDING).max(MIN_WIDTH);
        let height = 4 * PADDING + line + SYSTEM_ICON_SIZE.max(line) + BUTTON_HEIGHT;

        let screen: EgRectangle = ui
            .tree()
            .rect(ui.root())
            .unwrap_or(Rectangle::EMPTY)
            .into();
        let placed = EgRectangle::new(
            Point::zero(),
            Size::new(width.max(0) as u32, height.max(0) as u32),
        )
        .align_to(&screen, horizontal::Center, vertical::Center);

        let dialog = ui.create_dialog(
            placed.into(),
            MessageBox {
                title: title.to_string(),
                message: message.to_string(),
            },
        )?;

        let ok = Button::new("OK").on_click(move |ui| {
            debug!("Message box {:?} dismissed", dialog);
            ui.set_visible(dialog, false).ok();
            ui.destroy(dialog).ok();
        });
        let button_rect = Rectangle::new(
            (width - BUTTON_WIDTH) / 2,
            height - PADDING - BUTTON_HEIGHT,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        );
        ui.create_window(dialog, button_rect, ok)?;

        if !ui.show_dialog(dialog) {
            ui.destroy(dialog)?;
            return Ok(None);
        }
        Ok(Some(dialog))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl WindowHandler for MessageBox {
    fn on_paint(&mut self, canvas: &mut Canvas<'_>) {
        let bounds = canvas.bounds();
        let line = canvas.font().line_height();
        let text = canvas.system_color(SYS_COLOR_DLG_FOREGROUND);
        let border = canvas.system_color(SYS_COLOR_CTRL_BORDER);

        canvas.draw_box(bounds, border);
        canvas.draw_string(UiPoint::new(PADDING, PADDING), text, &self.title);
        let rule = 2 * PADDING + line - PADDING / 2;
        canvas.draw_line(
            UiPoint::new(PADDING, rule),
            UiPoint::new(bounds.width - PADDING - 1, rule),
            border,
        );

        let body = 2 * PADDING + line;
        canvas.draw_system_icon(UiPoint::new(PADDING, body), ICON_INFO, text);
        canvas.draw_string(
            UiPoint::new(2 * PADDING + SYSTEM_ICON_SIZE, body),
            text,
            &self.message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppHandler, Application};
    use crate::assets::BuiltinAssets;
    use crate::event::TouchEvent;
    use crate::testing::RecordingDriver;

    struct Host;

    impl WindowHandler for Host {}

    impl AppHandler for Host {}

    #[test]
    fn test_open_centres_and_ok_dismisses() {
        let mut app =
            Application::new(RecordingDriver::new(320, 240), Host, &BuiltinAssets).unwrap();
        let dialog = MessageBox::open(&mut app.ui(), "Hello", "World").unwrap().unwrap();
        assert_eq!(app.active_dialog(), Some(dialog));

        let rect = app.tree().absolute_rect(dialog).unwrap();
        assert_eq!(rect.x, (320 - rect.width) / 2);
        assert_eq!(rect.y, (240 - rect.height) / 2);
        assert_eq!(
            app.tree().handler::<MessageBox>(dialog).map(|m| m.title()),
            Some("Hello")
        );

        // A second box is refused while this one is up
        assert_eq!(MessageBox::open(&mut app.ui(), "Again", "No").unwrap(), None);

        let button = app.tree().children(dialog)[0];
        let at = app.tree().absolute_rect(button).unwrap();
        app.dispatch_touch(TouchEvent::touch(at.x + 2, at.y + 2));
        app.dispatch_touch(TouchEvent::release(at.x + 2, at.y + 2));

        assert!(!app.tree().contains(dialog));
        assert!(!app.tree().contains(button));
        app.repaint(false);
        assert_eq!(app.active_dialog(), None);
    }
}
