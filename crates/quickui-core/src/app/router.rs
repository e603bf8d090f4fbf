use log::debug;

use crate::event::TouchEvent;
use crate::window::{WindowId, WindowTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TouchState {
    Idle,
    Captured(WindowId),
}

/// Decides which window receives each touch sample.
///
/// A touch-down hit-tests from the search root and captures the resolved
/// accept-touch window; drags and releases go to the captured window even
/// when they fall outside it. A touch-down that misses the search root,
/// a change of active dialog or destroying the captured window all drop
/// the capture.
#[derive(Debug)]
pub(crate) struct TouchRouter {
    state: TouchState,
}

impl Default for TouchRouter {
    fn default() -> Self {
        Self {
            state: TouchState::Idle,
        }
    }
}

impl TouchRouter {
    pub(crate) fn reset(&mut self) {
        self.state = TouchState::Idle;
    }

    /// The captured window, if it is still alive.
    pub(crate) fn target(&self, tree: &WindowTree) -> Option<WindowId> {
        match self.state {
            TouchState::Captured(id) if tree.contains(id) => Some(id),
            _ => None,
        }
    }

    /// Update the capture for `event` and return the window it goes to.
    /// `None` means the application handler gets the raw sample.
    pub(crate) fn route(
        &mut self,
        tree: &WindowTree,
        search: WindowId,
        event: &TouchEvent,
    ) -> Option<WindowId> {
        if event.is_touch_down() {
            let hit = tree
                .window_at(search, event.point)
                .and_then(|w| tree.accept_touch_target(w));
            debug!("Touch at {:?} captured by {:?}", event.point, hit);
            self.state = hit.map_or(TouchState::Idle, TouchState::Captured);
        }

        let target = self.target(tree);
        if target.is_none() {
            self.state = TouchState::Idle;
        }
        target
    }
}
