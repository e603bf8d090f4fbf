//! Window identity, per-window behaviour and the window tree
//!
//! Windows are nodes in a [`WindowTree`] arena and are addressed by a
//! generational [`WindowId`], so an id held after its window was destroyed
//! simply stops resolving. What a window *does* lives in a
//! [`WindowHandler`] trait object registered with the node.
//!
//! # Callbacks
//!
//! The coordinator drives handlers in a fixed order each frame:
//!
//! 1. **`on_touch_event`** - for every queued touch sample routed to the window
//! 2. **`on_timer`** - for every expired timer the window owns
//! 3. **`on_erase_background`** then **`on_paint`** - when the window is dirty
//!    or its parent was repainted

mod canvas;
mod tree;

pub use canvas::Canvas;
pub use tree::WindowTree;

use core::any::Any;
use embassy_time::Duration;

use crate::app::Ui;
use crate::event::TouchKind;
use crate::geometry::Point;
use crate::timer::TimerId;

/// Stable handle to a window in a [`WindowTree`].
///
/// The generation changes whenever an arena slot is reused, so a stale id
/// never aliases a newer window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId {
    index: u32,
    generation: u32,
}

impl WindowId {
    pub(crate) const ROOT: WindowId = WindowId {
        index: 0,
        generation: 0,
    };

    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) const fn index(self) -> usize {
        self.index as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

/// Role of a node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// The coordinator's own window; always present, covers the display
    Root,
    /// An ordinary child window
    Window,
    /// A modal dialog, created hidden under the root
    Dialog,
}

// ---------------------------------------------------------------------------
// WindowHandler trait
// ---------------------------------------------------------------------------

/// Behaviour attached to a window.
///
/// Every method has a default, so a handler only implements what it needs.
/// Coordinates passed to `on_touch_event` are local to the window and the
/// [`Canvas`] handed to the paint callbacks is already translated to it.
pub trait WindowHandler: Any {
    /// Clear the window before painting. Fills the window background by default.
    fn on_erase_background(&mut self, canvas: &mut Canvas<'_>) {
        canvas.erase();
    }

    /// Paint the window contents.
    fn on_paint(&mut self, _canvas: &mut Canvas<'_>) {}

    /// A touch sample routed to this window, in window coordinates.
    fn on_touch_event(&mut self, _ui: &mut Ui<'_>, _kind: TouchKind, _at: Point) {}

    /// A timer owned by this window expired `lateness` after its due time.
    fn on_timer(&mut self, _ui: &mut Ui<'_>, _timer: TimerId, _lateness: Duration) {}
}
