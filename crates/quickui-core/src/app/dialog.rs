use log::{debug, info};

use crate::window::{WindowId, WindowTree};

/// What the dialog slot holds at the start of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DialogState {
    /// No dialog installed
    Inactive,
    /// A visible dialog owns painting and touch routing
    Active(WindowId),
    /// The installed dialog was hidden or destroyed and has just been dropped
    Dismissed,
}

/// The single modal dialog slot.
#[derive(Debug, Default)]
pub(crate) struct DialogSlot {
    current: Option<WindowId>,
}

impl DialogSlot {
    pub(crate) fn current(&self) -> Option<WindowId> {
        self.current
    }

    /// Install `dialog`. Refused while another dialog is installed.
    pub(crate) fn install(&mut self, dialog: WindowId) -> bool {
        if let Some(active) = self.current {
            debug!("Refusing dialog {:?}, {:?} is active", dialog, active);
            return false;
        }
        info!("Showing dialog {:?}", dialog);
        self.current = Some(dialog);
        true
    }

    /// Resolve the slot against the tree, dropping a dialog that is no
    /// longer visible.
    pub(crate) fn check(&mut self, tree: &WindowTree) -> DialogState {
        match self.current {
            None => DialogState::Inactive,
            Some(dialog) if tree.is_visible(dialog) => DialogState::Active(dialog),
            Some(dialog) => {
                info!("Dialog {:?} dismissed", dialog);
                self.current = None;
                DialogState::Dismissed
            }
        }
    }
}
