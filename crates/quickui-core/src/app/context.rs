//! State shared between the coordinator and window callbacks.

use alloc::rc::Rc;
use core::cell::Cell;

use embassy_time::Duration;
use log::info;

use super::dialog::{DialogSlot, DialogState};
use super::router::TouchRouter;
use crate::colors::Color;
use crate::error::UiResult;
use crate::geometry::Rectangle;
use crate::resources::SystemResources;
use crate::timer::{TimerId, TimerSet};
use crate::window::{WindowHandler, WindowId, WindowTree};

/// Run flag for [`Application::run`](super::Application::run).
///
/// Clones share the flag, so a handle can be kept outside the application.
#[derive(Debug, Clone)]
pub struct LoopControl {
    running: Rc<Cell<bool>>,
}

impl LoopControl {
    pub fn new() -> Self {
        Self {
            running: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Make the run loop return after the current iteration.
    pub fn request_exit(&self) {
        self.running.set(false);
    }
}

impl Default for LoopControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the coordinator owns apart from the driver and the
/// application handler.
pub(crate) struct UiState {
    pub(crate) tree: WindowTree,
    pub(crate) dialog: DialogSlot,
    pub(crate) router: TouchRouter,
    pub(crate) timers: TimerSet,
    pub(crate) resources: SystemResources,
    pub(crate) control: LoopControl,
}

impl UiState {
    pub(crate) fn show_dialog(&mut self, dialog: WindowId) -> bool {
        if !self.tree.contains(dialog) {
            return false;
        }
        // A dialog hidden since the last pass no longer blocks a new one
        if self.dialog.check(&self.tree) == DialogState::Dismissed {
            self.router.reset();
        }
        if !self.dialog.install(dialog) {
            return false;
        }
        // Already checked the id is live
        let _ = self.tree.set_visible(dialog, true);
        self.tree.mark_dirty(dialog);
        self.tree.mark_dirty(self.tree.root());
        self.router.reset();
        true
    }

    pub(crate) fn destroy(&mut self, id: WindowId) -> UiResult<()> {
        for destroyed in self.tree.destroy(id)? {
            self.timers.cancel_owned_by(destroyed);
        }
        Ok(())
    }
}

/// Access to the application from inside a window callback.
///
/// `this()` is the window being called back (the root for the application
/// handler).
pub struct Ui<'a> {
    state: &'a mut UiState,
    this: WindowId,
}

impl<'a> Ui<'a> {
    pub(crate) fn new(state: &'a mut UiState, this: WindowId) -> Self {
        Self { state, this }
    }

    pub fn this(&self) -> WindowId {
        self.this
    }

    pub fn root(&self) -> WindowId {
        self.state.tree.root()
    }

    pub fn tree(&self) -> &WindowTree {
        &self.state.tree
    }

    pub fn tree_mut(&mut self) -> &mut WindowTree {
        &mut self.state.tree
    }

    pub fn resources(&self) -> &SystemResources {
        &self.state.resources
    }

    pub fn system_color(&self, index: i32) -> Color {
        self.state.resources.system_color(index)
    }

    pub fn create_window<H: WindowHandler>(
        &mut self,
        parent: WindowId,
        rect: Rectangle,
        handler: H,
    ) -> UiResult<WindowId> {
        self.state.tree.create(parent, rect, handler)
    }

    pub fn create_dialog<H: WindowHandler>(
        &mut self,
        rect: Rectangle,
        handler: H,
    ) -> UiResult<WindowId> {
        self.state.tree.create_dialog(rect, handler)
    }

    /// Destroy a window and its children, cancelling their timers.
    pub fn destroy(&mut self, id: WindowId) -> UiResult<()> {
        self.state.destroy(id)
    }

    /// Make `dialog` the modal dialog. False if one is already active.
    pub fn show_dialog(&mut self, dialog: WindowId) -> bool {
        self.state.show_dialog(dialog)
    }

    pub fn active_dialog(&self) -> Option<WindowId> {
        self.state.dialog.current()
    }

    pub fn set_visible(&mut self, id: WindowId, visible: bool) -> UiResult<()> {
        self.state.tree.set_visible(id, visible)
    }

    pub fn mark_dirty(&mut self, id: WindowId) {
        self.state.tree.mark_dirty(id);
    }

    pub fn set_background(&mut self, id: WindowId, color: Option<Color>) -> UiResult<()> {
        self.state.tree.set_background(id, color)
    }

    /// Typed access to another window's handler.
    pub fn handler_mut<T: WindowHandler>(&mut self, id: WindowId) -> Option<&mut T> {
        self.state.tree.handler_mut(id)
    }

    /// Call `on_timer` of this window every `interval`.
    pub fn repeat(&mut self, interval: Duration) -> UiResult<TimerId> {
        self.state.timers.repeat(self.this, interval)
    }

    /// Call `on_timer` of this window once after `delay`.
    pub fn once(&mut self, delay: Duration) -> UiResult<TimerId> {
        self.state.timers.once(self.this, delay)
    }

    pub fn cancel(&mut self, timer: TimerId) -> bool {
        self.state.timers.cancel(timer)
    }

    /// Stop the run loop after the current iteration.
    pub fn request_exit(&mut self) {
        info!("Exit requested by {:?}", self.this);
        self.state.control.request_exit();
    }
}
