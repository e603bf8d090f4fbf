//! Desktop simulator for the quickui window toolkit.
//!
//! Runs the toolkit demo in an SDL2 window via `embedded-graphics-simulator`:
//! four coloured corner windows (the bottom right one hidden) recoloured at
//! random by a timer, sample text following the pointer when the background
//! is touched, the system icon strip and a button that opens a message box.
//!
//! # Input
//!
//! | Input            | Touch sample |
//! |------------------|--------------|
//! | Mouse button down| Touch        |
//! | Mouse move (held)| Drag         |
//! | Mouse button up  | Release      |
//! | Q / Escape       | Quit         |

use std::time::{Duration, Instant as StdInstant};

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use quickui_core::assets::{BuiltinAssets, MAX_ICON, SYSTEM_ICON_SIZE};
use quickui_core::colors::{PALETTE_SIZE, SYS_COLOR_FOREGROUND};
use quickui_core::driver::{EventPump, GraphicsDriver, TouchQueue};
use quickui_core::timer::TimerId;
use quickui_core::widgets::{Button, MessageBox};
use quickui_core::{
    AppHandler, Application, Canvas, Dimension, Point as UiPoint, Rectangle, TouchEvent,
    TouchKind, Ui, WindowHandler, WindowId,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Size the simulated panel starts with.
const NATIVE_SIZE: Size = Size::new(320, 240);

/// Size the demo asks for.
const PREFERRED_SIZE: Dimension = Dimension::new(480, 272);

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

// ---------------------------------------------------------------------------
// Demo constants
// ---------------------------------------------------------------------------

const CORNER_SIZE: i32 = 25;
const CORNER_OFFSET: i32 = 10;
const RECOLOR_INTERVAL: embassy_time::Duration = embassy_time::Duration::from_millis(250);

// ---------------------------------------------------------------------------
// SDL event pump
// ---------------------------------------------------------------------------

/// Feeds SDL mouse input to the driver and paces frames.
struct SdlPump {
    window: Window,
    pressed: bool,
    closed: bool,
    last_frame: StdInstant,
}

impl SdlPump {
    fn new(window: Window) -> Self {
        Self {
            window,
            pressed: false,
            closed: false,
            last_frame: StdInstant::now(),
        }
    }
}

impl EventPump<SimulatorDisplay<Rgb565>> for SdlPump {
    fn pump(&mut self, display: &mut SimulatorDisplay<Rgb565>, queue: &mut TouchQueue) {
        // Also lazily creates the SDL window on the first call
        self.window.update(display);

        for event in self.window.events() {
            match event {
                SimulatorEvent::Quit => self.closed = true,
                SimulatorEvent::KeyDown { keycode, .. }
                    if keycode == Keycode::Q || keycode == Keycode::Escape =>
                {
                    self.closed = true;
                }
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    self.pressed = true;
                    queue.push(TouchEvent::touch(point.x, point.y));
                }
                SimulatorEvent::MouseMove { point } if self.pressed => {
                    queue.push(TouchEvent::drag(point.x, point.y));
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    self.pressed = false;
                    queue.push(TouchEvent::release(point.x, point.y));
                }
                _ => {}
            }
        }

        let elapsed = self.last_frame.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
        self.last_frame = StdInstant::now();
    }

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn close_requested(&self) -> bool {
        self.closed
    }

    fn request_size(&mut self, display: &mut SimulatorDisplay<Rgb565>, size: Dimension) {
        info!("Resizing simulated display to {}x{}", size.width, size.height);
        *display = SimulatorDisplay::new(size.into());
    }
}

// ---------------------------------------------------------------------------
// Demo application
// ---------------------------------------------------------------------------

struct DemoApp {
    corners: Vec<WindowId>,
    text_at: Option<UiPoint>,
    rng: SmallRng,
}

impl DemoApp {
    fn new() -> Self {
        Self {
            corners: Vec::new(),
            text_at: None,
            rng: SmallRng::from_entropy(),
        }
    }
}

impl WindowHandler for DemoApp {
    fn on_paint(&mut self, canvas: &mut Canvas<'_>) {
        let color = canvas.system_color(SYS_COLOR_FOREGROUND);
        let strip_x = (canvas.size().width - (MAX_ICON + 1) * (SYSTEM_ICON_SIZE + 4)) / 2;
        for icon in 0..=MAX_ICON {
            let at = UiPoint::new(strip_x + icon * (SYSTEM_ICON_SIZE + 4), CORNER_OFFSET);
            canvas.draw_system_icon(at, icon, color);
        }

        if let Some(at) = self.text_at {
            canvas.draw_string(at, Rgb565::RED, "This is some sample text!!!");
        }
    }

    fn on_touch_event(&mut self, ui: &mut Ui<'_>, kind: TouchKind, at: UiPoint) {
        info!("Got {:?} @ {}, {}", kind, at.x, at.y);
        self.text_at = (kind != TouchKind::Release).then_some(at);
        let root = ui.root();
        ui.mark_dirty(root);
    }

    fn on_timer(&mut self, ui: &mut Ui<'_>, _timer: TimerId, _lateness: embassy_time::Duration) {
        if self.corners.is_empty() {
            return;
        }
        let window = self.corners[self.rng.gen_range(0..self.corners.len())];
        let color = ui
            .resources()
            .palette
            .wrapped(self.rng.gen_range(0..PALETTE_SIZE as i32));
        if let Err(e) = ui.set_background(window, Some(color)) {
            error!("Recolour failed: {}", e);
        }
    }
}

impl AppHandler for DemoApp {
    fn on_initialise(&mut self, ui: &mut Ui<'_>) {
        let root = ui.root();
        let screen = ui.tree().rect(root).unwrap_or(Rectangle::EMPTY);
        let right = screen.width - CORNER_OFFSET - CORNER_SIZE;
        let bottom = screen.height - CORNER_OFFSET - CORNER_SIZE;

        let corners = [
            (CORNER_OFFSET, CORNER_OFFSET, Rgb565::RED),
            (right, CORNER_OFFSET, Rgb565::GREEN),
            (CORNER_OFFSET, bottom, Rgb565::BLUE),
            (right, bottom, Rgb565::WHITE),
        ];
        for (x, y, color) in corners {
            let rect = Rectangle::new(x, y, CORNER_SIZE, CORNER_SIZE);
            match ui.tree_mut().create_plain(root, rect) {
                Ok(id) => {
                    ui.set_background(id, Some(color)).ok();
                    self.corners.push(id);
                }
                Err(e) => error!("Could not create corner window: {}", e),
            }
        }
        // Hide the bottom right one to exercise visibility
        if let Some(&hidden) = self.corners.last() {
            ui.set_visible(hidden, false).ok();
        }

        ui.set_background(root, Some(Rgb565::BLACK)).ok();

        let button = Button::new("Dialog").on_click(|ui| {
            match MessageBox::open(ui, "quickui", "Hello from a dialog") {
                Ok(Some(id)) => info!("Opened message box {:?}", id),
                Ok(None) => info!("A dialog is already open"),
                Err(e) => error!("Could not open message box: {}", e),
            }
        });
        let button_rect = Rectangle::new((screen.width - 80) / 2, screen.height / 2, 80, 24);
        if let Err(e) = ui.create_window(root, button_rect, button) {
            error!("Could not create button: {}", e);
        }

        if let Err(e) = ui.repeat(RECOLOR_INTERVAL) {
            error!("Could not start recolour timer: {}", e);
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting quickui simulator");

    let display = SimulatorDisplay::<Rgb565>::new(NATIVE_SIZE);
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let window = Window::new("quickui simulator", &output_settings);
    let driver = GraphicsDriver::new(display, SdlPump::new(window));

    let mut app = match Application::with_preferred_size(
        driver,
        PREFERRED_SIZE,
        DemoApp::new(),
        &BuiltinAssets,
    ) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    app.run();
    info!("Simulator exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recolour_picks_corner_and_palette_entry() {
        let driver = GraphicsDriver::headless(PREFERRED_SIZE);
        let mut app = Application::new(driver, DemoApp::new(), &BuiltinAssets).unwrap();
        let mut demo = DemoApp::new();
        demo.on_initialise(&mut app.ui());
        assert_eq!(demo.corners.len(), 4);

        let timer = app.ui().once(RECOLOR_INTERVAL).unwrap();
        for _ in 0..32 {
            demo.on_timer(&mut app.ui(), timer, embassy_time::Duration::from_ticks(0));
        }

        let palette = app.palette().colors();
        let recoloured = demo
            .corners
            .iter()
            .filter_map(|&id| app.tree().background(id))
            .filter(|color| palette.contains(color))
            .count();
        assert!(recoloured > 0);
        assert!(!app.tree().is_visible(demo.corners[3]));
    }
}
