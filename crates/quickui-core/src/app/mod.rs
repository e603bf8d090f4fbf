//! The root coordinator
//!
//! [`Application`] owns the driver, the window tree and the application's
//! own [`AppHandler`]. It is the root window of the tree: its geometry is
//! fixed to the display and it receives every touch sample no other window
//! claims. On top of the tree it adds:
//!
//! - a single modal dialog slot that, while its dialog is visible, takes
//!   over both repainting and touch routing
//! - touch capture: the window hit by a touch-down receives the following
//!   drags and the release, wherever they land
//! - dirty-driven repaint with every window painted in its own coordinates
//! - the timer set, polled once per frame
//!
//! # Frame
//!
//! Each [`step`](Application::step) runs one frame:
//!
//! 1. grab input and dispatch every pending touch sample in arrival order
//! 2. deliver expired timers
//! 3. call [`AppHandler::on_update`]
//! 4. repaint what is dirty

mod context;
mod dialog;
mod painter;
mod router;

pub use context::{LoopControl, Ui};

use log::{debug, info};

use crate::assets::{AssetSource, Font, Image, Palette};
use crate::colors::{
    Color, SYS_COLOR_BACKGROUND, SYS_COLOR_DLG_BACKGROUND, SYS_COLOR_WIN_BACKGROUND,
};
use crate::error::UiResult;
use crate::event::TouchEvent;
use crate::geometry::{Dimension, Point, Rectangle};
use crate::resources::SystemResources;
use crate::surface::{Driver, Surface};
use crate::timer::TimerSet;
use crate::window::{Canvas, WindowHandler, WindowId, WindowKind, WindowTree};

use context::UiState;
use dialog::{DialogSlot, DialogState};
use painter::Painter;
use router::TouchRouter;

/// Behaviour of the application's own (root) window.
///
/// The root erases to [`SYS_COLOR_BACKGROUND`] by default and receives any
/// touch sample that no window captured, with raw screen coordinates.
pub trait AppHandler: WindowHandler {
    /// Called once by [`Application::run`] before the first frame.
    fn on_initialise(&mut self, _ui: &mut Ui<'_>) {}

    /// Called once per frame after input and timers, before the repaint.
    fn on_update(&mut self, _ui: &mut Ui<'_>) {}
}

/// Default background palette slot for a window of `kind`.
fn default_background(kind: WindowKind) -> i32 {
    match kind {
        WindowKind::Root => SYS_COLOR_BACKGROUND,
        WindowKind::Window => SYS_COLOR_WIN_BACKGROUND,
        WindowKind::Dialog => SYS_COLOR_DLG_BACKGROUND,
    }
}

/// The coordinator: one per program, owned by whoever bootstraps it.
pub struct Application<D, H> {
    painter: Painter<D>,
    handler: H,
    state: UiState,
}

impl<D: Driver, H: AppHandler> Application<D, H> {
    /// Bind to the driver's native size and load the system resources.
    pub fn new(driver: D, handler: H, assets: &impl AssetSource) -> UiResult<Self> {
        let resources = SystemResources::load(assets)?;
        let size = driver.size();
        info!("Application bound to {}x{} display", size.width, size.height);

        let state = UiState {
            tree: WindowTree::new(size),
            dialog: DialogSlot::default(),
            router: TouchRouter::default(),
            timers: TimerSet::new(driver.now()),
            resources,
            control: LoopControl::new(),
        };
        Ok(Self {
            painter: Painter::new(driver),
            handler,
            state,
        })
    }

    /// Ask the driver for `preferred` first. The driver may ignore it, in
    /// which case the native size is used.
    pub fn with_preferred_size(
        mut driver: D,
        preferred: Dimension,
        handler: H,
        assets: &impl AssetSource,
    ) -> UiResult<Self> {
        driver.request_size(preferred);
        if driver.size() != preferred {
            info!(
                "Driver kept {}x{} instead of preferred {}x{}",
                driver.size().width,
                driver.size().height,
                preferred.width,
                preferred.height
            );
        }
        Self::new(driver, handler, assets)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Screen area covered by the root window.
    pub fn bounds(&self) -> Rectangle {
        let root = self.state.tree.root();
        self.state.tree.rect(root).unwrap_or(Rectangle::EMPTY)
    }

    pub fn tree(&self) -> &WindowTree {
        &self.state.tree
    }

    pub fn tree_mut(&mut self) -> &mut WindowTree {
        &mut self.state.tree
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn driver(&self) -> &D {
        self.painter.driver()
    }

    pub fn driver_mut(&mut self) -> &mut D {
        self.painter.driver_mut()
    }

    /// A [`Ui`] context for the root window, for setting up windows outside
    /// of a callback.
    pub fn ui(&mut self) -> Ui<'_> {
        let root = self.state.tree.root();
        Ui::new(&mut self.state, root)
    }

    /// Shared run flag; clear it to stop [`run`](Self::run).
    pub fn loop_control(&self) -> LoopControl {
        self.state.control.clone()
    }

    pub fn resources(&self) -> &SystemResources {
        &self.state.resources
    }

    pub fn palette(&self) -> &Palette {
        &self.state.resources.palette
    }

    pub fn font(&self) -> &Font {
        &self.state.resources.font
    }

    pub fn icons(&self) -> Option<&Image> {
        self.state.resources.icons.as_ref()
    }

    /// `palette[index mod PALETTE_SIZE]`; any index is valid.
    pub fn system_color(&self, index: i32) -> Color {
        self.state.resources.system_color(index)
    }

    /// The drawing surface, translated by the current paint offset.
    pub fn surface(&mut self) -> &mut dyn Surface {
        &mut self.painter
    }

    /// Current paint offset.
    pub fn offset(&self) -> Point {
        self.painter.offset()
    }

    /// Draw system icon `index` at `at` (relative to the current offset).
    /// Nothing is drawn for an out of range index or without icons.
    pub fn draw_system_icon(&mut self, at: Point, index: i32, color: Color) {
        self.state
            .resources
            .draw_system_icon(&mut self.painter, at, index, color);
    }

    // -----------------------------------------------------------------------
    // Dialogs and touch
    // -----------------------------------------------------------------------

    /// Make `dialog` the modal dialog and show it.
    ///
    /// Returns false, changing nothing, while another dialog is active.
    pub fn show_dialog(&mut self, dialog: WindowId) -> bool {
        self.state.show_dialog(dialog)
    }

    pub fn active_dialog(&self) -> Option<WindowId> {
        self.state.dialog.current()
    }

    /// The window currently capturing touch input, if any.
    pub fn touch_target(&self) -> Option<WindowId> {
        self.state.router.target(&self.state.tree)
    }

    /// Route one touch sample.
    ///
    /// A visible dialog limits hit testing to its subtree. The captured
    /// window receives the sample in its own coordinates; without a
    /// capture the application handler gets the raw screen point.
    pub fn dispatch_touch(&mut self, event: TouchEvent) {
        let root = self.state.tree.root();
        let search = match self.state.dialog.check(&self.state.tree) {
            DialogState::Active(dialog) => dialog,
            DialogState::Dismissed => {
                self.state.router.reset();
                root
            }
            DialogState::Inactive => root,
        };

        let target = self
            .state
            .router
            .route(&self.state.tree, search, &event)
            .unwrap_or(root);
        let origin = self
            .state
            .tree
            .absolute_origin(target)
            .unwrap_or(Point::ORIGIN);
        let local = event.point.relative_to(origin);
        self.call_handler(target, |handler, ui| {
            handler.on_touch_event(ui, event.kind, local);
        });
    }

    /// Run `f` on the handler of `id`, or on the application handler for
    /// the root. Windows without a handler are skipped.
    fn call_handler(
        &mut self,
        id: WindowId,
        f: impl FnOnce(&mut dyn WindowHandler, &mut Ui<'_>),
    ) {
        if id == self.state.tree.root() {
            f(&mut self.handler, &mut Ui::new(&mut self.state, id));
            return;
        }
        let Some(mut handler) = self.state.tree.take_handler(id) else {
            return;
        };
        f(handler.as_mut(), &mut Ui::new(&mut self.state, id));
        self.state.tree.restore_handler(id, handler);
    }

    // -----------------------------------------------------------------------
    // Repaint
    // -----------------------------------------------------------------------

    /// Repaint dirty windows, or everything when `force` is set.
    ///
    /// While a dialog is visible only its subtree is painted. A dialog
    /// found hidden is dropped and the whole tree is repainted.
    pub fn repaint(&mut self, force: bool) {
        self.painter.set_offset(Point::ORIGIN);
        self.painter.begin_paint();

        let screen = self.bounds();
        let force = match self.state.dialog.check(&self.state.tree) {
            DialogState::Active(dialog) => {
                let parent_origin = self
                    .state
                    .tree
                    .parent(dialog)
                    .and_then(|p| self.state.tree.absolute_origin(p))
                    .unwrap_or(Point::ORIGIN);
                self.paint_window(dialog, parent_origin, screen, force);
                self.painter.end_paint();
                return;
            }
            DialogState::Dismissed => {
                self.state.router.reset();
                true
            }
            DialogState::Inactive => force,
        };

        let root = self.state.tree.root();
        self.paint_window(root, Point::ORIGIN, screen, force);
        self.painter.end_paint();
    }

    fn paint_window(&mut self, id: WindowId, parent_origin: Point, parent_clip: Rectangle, force: bool) {
        let tree = &self.state.tree;
        if !tree.is_visible(id) {
            return;
        }
        let (Some(rect), Some(kind)) = (tree.rect(id), tree.kind(id)) else {
            return;
        };
        let origin = parent_origin.translate(rect.origin());
        let clip = Rectangle::from_parts(origin, rect.size()).intersection(&parent_clip);
        let repaint = force || tree.is_dirty(id);
        let children = tree.children(id).to_vec();

        if repaint {
            let background = tree
                .background(id)
                .unwrap_or_else(|| self.state.resources.system_color(default_background(kind)));
            self.painter.set_offset(origin);
            self.painter.set_clip(clip);
            self.paint_contents(id, rect.size(), background);
            self.state.tree.clear_dirty(id);
        }

        for child in children {
            self.paint_window(child, origin, clip, repaint);
        }
    }

    fn paint_contents(&mut self, id: WindowId, size: Dimension, background: Color) {
        let root = self.state.tree.root();
        let mut handler = if id == root {
            None
        } else {
            self.state.tree.take_handler(id)
        };

        let mut canvas = Canvas::new(&mut self.painter, &self.state.resources, size, background);
        if id == root {
            self.handler.on_erase_background(&mut canvas);
            self.handler.on_paint(&mut canvas);
        } else if let Some(handler) = handler.as_mut() {
            handler.on_erase_background(&mut canvas);
            handler.on_paint(&mut canvas);
        } else {
            canvas.erase();
        }

        if let Some(handler) = handler {
            self.state.tree.restore_handler(id, handler);
        }
    }

    // -----------------------------------------------------------------------
    // Run loop
    // -----------------------------------------------------------------------

    /// Run one frame: input, timers, update, repaint.
    pub fn step(&mut self) {
        self.painter.grab_events();
        while let Some(event) = self.painter.next_touch_event() {
            self.dispatch_touch(event);
        }

        let now = self.painter.now();
        for expired in self.state.timers.update(now) {
            debug!("{:?} expired for {:?}", expired.id, expired.owner);
            self.call_handler(expired.owner, |handler, ui| {
                handler.on_timer(ui, expired.id, expired.lateness);
            });
        }

        let root = self.state.tree.root();
        self.handler.on_update(&mut Ui::new(&mut self.state, root));

        self.repaint(false);
    }

    /// Initialise the application, then run frames until an exit is
    /// requested or the driver reports the host closed.
    pub fn run(&mut self) {
        let root = self.state.tree.root();
        self.handler.on_initialise(&mut Ui::new(&mut self.state, root));
        info!("Entering run loop");

        while self.state.control.is_running() && !self.painter.driver().close_requested() {
            self.step();
        }
        info!("Run loop finished");
    }
}
