//! Arena of windows with parent-owned child lists.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use log::debug;

use super::{WindowHandler, WindowId, WindowKind};
use crate::colors::Color;
use crate::error::{UiError, UiResult};
use crate::geometry::{Dimension, Point, Rectangle};

struct WindowNode {
    /// Position and size relative to the parent
    rect: Rectangle,
    parent: Option<WindowId>,
    /// Back to front; the last child is drawn last and hit first
    children: Vec<WindowId>,
    visible: bool,
    dirty: bool,
    accept_touch: bool,
    background: Option<Color>,
    kind: WindowKind,
    handler: Option<Box<dyn WindowHandler>>,
}

struct Slot {
    generation: u32,
    node: Option<WindowNode>,
}

/// Every live window, indexed by [`WindowId`].
///
/// The root window always exists, sits at `(0, 0)` and covers the display;
/// moving or resizing it is silently ignored.
pub struct WindowTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl WindowTree {
    /// A tree holding only the root window, sized to `size`.
    pub fn new(size: Dimension) -> Self {
        let root = WindowNode {
            rect: Rectangle::from_parts(Point::ORIGIN, size),
            parent: None,
            children: Vec::new(),
            visible: true,
            dirty: true,
            accept_touch: true,
            background: None,
            kind: WindowKind::Root,
            handler: None,
        };
        Self {
            slots: alloc::vec![Slot {
                generation: 0,
                node: Some(root),
            }],
            free: Vec::new(),
        }
    }

    pub fn root(&self) -> WindowId {
        WindowId::ROOT
    }

    /// Whether `id` refers to a live window.
    pub fn contains(&self, id: WindowId) -> bool {
        self.node(id).is_some()
    }

    /// Number of live windows, root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn node(&self, id: WindowId) -> Option<&WindowNode> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: WindowId) -> Option<&mut WindowNode> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    fn require_mut(&mut self, id: WindowId) -> UiResult<&mut WindowNode> {
        self.node_mut(id).ok_or(UiError::UnknownWindow(id))
    }

    // -----------------------------------------------------------------------
    // Creation and destruction
    // -----------------------------------------------------------------------

    /// Create a visible child of `parent` with the given behaviour.
    pub fn create<H: WindowHandler>(
        &mut self,
        parent: WindowId,
        rect: Rectangle,
        handler: H,
    ) -> UiResult<WindowId> {
        self.insert(parent, rect, WindowKind::Window, Some(Box::new(handler)))
    }

    /// Create a visible child of `parent` that only paints its background.
    pub fn create_plain(&mut self, parent: WindowId, rect: Rectangle) -> UiResult<WindowId> {
        self.insert(parent, rect, WindowKind::Window, None)
    }

    /// Create a hidden dialog under the root. Show it with
    /// [`Application::show_dialog`](crate::app::Application::show_dialog).
    pub fn create_dialog<H: WindowHandler>(
        &mut self,
        rect: Rectangle,
        handler: H,
    ) -> UiResult<WindowId> {
        let id = self.insert(
            WindowId::ROOT,
            rect,
            WindowKind::Dialog,
            Some(Box::new(handler)),
        )?;
        if let Some(node) = self.node_mut(id) {
            node.visible = false;
        }
        Ok(id)
    }

    fn insert(
        &mut self,
        parent: WindowId,
        rect: Rectangle,
        kind: WindowKind,
        handler: Option<Box<dyn WindowHandler>>,
    ) -> UiResult<WindowId> {
        if !self.contains(parent) {
            return Err(UiError::UnknownWindow(parent));
        }

        let node = WindowNode {
            rect,
            parent: Some(parent),
            children: Vec::new(),
            visible: true,
            dirty: true,
            accept_touch: true,
            background: None,
            kind,
            handler,
        };

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.generation = slot.generation.wrapping_add(1);
                slot.node = Some(node);
                WindowId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                WindowId::new(index, 0)
            }
        };

        self.require_mut(parent)?.children.push(id);
        debug!("Created {:?} {:?} under {:?} at {:?}", kind, id, parent, rect);
        Ok(id)
    }

    /// Destroy a window and all of its descendants.
    ///
    /// Returns every destroyed id, parents before children.
    pub fn destroy(&mut self, id: WindowId) -> UiResult<Vec<WindowId>> {
        if id == WindowId::ROOT {
            return Err(UiError::RootWindow);
        }
        let parent = self
            .node(id)
            .ok_or(UiError::UnknownWindow(id))?
            .parent;

        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.retain(|child| *child != id);
            parent.dirty = true;
        }

        let mut destroyed = Vec::new();
        let mut pending = alloc::vec![id];
        while let Some(next) = pending.pop() {
            let slot = &mut self.slots[next.index()];
            if let Some(node) = slot.node.take() {
                pending.extend(node.children.iter().copied());
                self.free.push(next.index() as u32);
                destroyed.push(next);
            }
        }
        debug!("Destroyed {:?} ({} windows)", id, destroyed.len());
        Ok(destroyed)
    }

    // -----------------------------------------------------------------------
    // Geometry and flags
    // -----------------------------------------------------------------------

    pub fn kind(&self, id: WindowId) -> Option<WindowKind> {
        self.node(id).map(|n| n.kind)
    }

    pub fn parent(&self, id: WindowId) -> Option<WindowId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: WindowId) -> &[WindowId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Position and size relative to the parent.
    pub fn rect(&self, id: WindowId) -> Option<Rectangle> {
        self.node(id).map(|n| n.rect)
    }

    /// Move or resize a window. Ignored for the root.
    pub fn set_rect(&mut self, id: WindowId, rect: Rectangle) -> UiResult<()> {
        if id == WindowId::ROOT {
            debug!("Ignoring attempt to move the root window");
            return Ok(());
        }
        let node = self.require_mut(id)?;
        node.rect = rect;
        node.dirty = true;
        if let Some(parent) = node.parent {
            self.mark_dirty(parent);
        }
        Ok(())
    }

    /// Top-left corner in screen coordinates.
    pub fn absolute_origin(&self, id: WindowId) -> Option<Point> {
        let mut origin = Point::ORIGIN;
        let mut current = Some(id);
        while let Some(next) = current {
            let node = self.node(next)?;
            origin = origin.translate(node.rect.origin());
            current = node.parent;
        }
        Some(origin)
    }

    /// Bounds in screen coordinates.
    pub fn absolute_rect(&self, id: WindowId) -> Option<Rectangle> {
        let size = self.node(id)?.rect.size();
        Some(Rectangle::from_parts(self.absolute_origin(id)?, size))
    }

    /// Visibility flag of the window itself; false for unknown ids.
    pub fn is_visible(&self, id: WindowId) -> bool {
        self.node(id).is_some_and(|n| n.visible)
    }

    /// Show or hide a window.
    ///
    /// Showing marks the window dirty; hiding marks its parent dirty so the
    /// uncovered area is repainted. The root cannot be hidden.
    pub fn set_visible(&mut self, id: WindowId, visible: bool) -> UiResult<()> {
        if id == WindowId::ROOT {
            return Ok(());
        }
        let node = self.require_mut(id)?;
        if node.visible == visible {
            return Ok(());
        }
        node.visible = visible;
        if visible {
            node.dirty = true;
        } else if let Some(parent) = node.parent {
            self.mark_dirty(parent);
        }
        Ok(())
    }

    pub fn is_dirty(&self, id: WindowId) -> bool {
        self.node(id).is_some_and(|n| n.dirty)
    }

    /// Request a repaint of `id` (and therefore its children) on the next pass.
    pub fn mark_dirty(&mut self, id: WindowId) {
        if let Some(node) = self.node_mut(id) {
            node.dirty = true;
        }
    }

    pub(crate) fn clear_dirty(&mut self, id: WindowId) {
        if let Some(node) = self.node_mut(id) {
            node.dirty = false;
        }
    }

    /// Explicit background colour, if one was set.
    pub fn background(&self, id: WindowId) -> Option<Color> {
        self.node(id).and_then(|n| n.background)
    }

    /// Override the background colour; `None` restores the system default.
    pub fn set_background(&mut self, id: WindowId, color: Option<Color>) -> UiResult<()> {
        let node = self.require_mut(id)?;
        node.background = color;
        node.dirty = true;
        Ok(())
    }

    pub fn accepts_touch(&self, id: WindowId) -> bool {
        self.node(id).is_some_and(|n| n.accept_touch)
    }

    /// Whether the window takes touch input itself. Ignored for the root.
    pub fn set_accept_touch(&mut self, id: WindowId, accept: bool) -> UiResult<()> {
        if id == WindowId::ROOT {
            return Ok(());
        }
        self.require_mut(id)?.accept_touch = accept;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Touch targeting
    // -----------------------------------------------------------------------

    /// The window itself if it accepts touch, else its nearest accepting
    /// ancestor. Always resolves for a live window since the root accepts.
    pub fn accept_touch_target(&self, id: WindowId) -> Option<WindowId> {
        let mut current = Some(id);
        while let Some(next) = current {
            let node = self.node(next)?;
            if node.accept_touch || node.kind == WindowKind::Root {
                return Some(next);
            }
            current = node.parent;
        }
        None
    }

    /// Deepest visible window under `point` (screen coordinates), searching
    /// from `search` downwards. Later siblings are on top.
    pub fn window_at(&self, search: WindowId, point: Point) -> Option<WindowId> {
        let parent_origin = match self.node(search)?.parent {
            Some(parent) => self.absolute_origin(parent)?,
            None => Point::ORIGIN,
        };
        self.hit(search, point.relative_to(parent_origin))
    }

    /// `point` is relative to the parent of `id`.
    fn hit(&self, id: WindowId, point: Point) -> Option<WindowId> {
        let node = self.node(id)?;
        if !node.visible || !node.rect.contains(point) {
            return None;
        }
        let local = point.relative_to(node.rect.origin());
        node.children
            .iter()
            .rev()
            .find_map(|child| self.hit(*child, local))
            .or(Some(id))
    }

    // -----------------------------------------------------------------------
    // Handlers
    // -----------------------------------------------------------------------

    /// Typed access to the handler registered for `id`.
    pub fn handler<T: WindowHandler>(&self, id: WindowId) -> Option<&T> {
        let handler: &dyn Any = self.node(id)?.handler.as_deref()?;
        handler.downcast_ref::<T>()
    }

    /// Typed mutable access to the handler registered for `id`.
    pub fn handler_mut<T: WindowHandler>(&mut self, id: WindowId) -> Option<&mut T> {
        let handler: &mut dyn Any = self.node_mut(id)?.handler.as_deref_mut()?;
        handler.downcast_mut::<T>()
    }

    /// Detach the handler while it is being called back.
    pub(crate) fn take_handler(&mut self, id: WindowId) -> Option<Box<dyn WindowHandler>> {
        self.node_mut(id).and_then(|n| n.handler.take())
    }

    /// Reattach a handler taken with [`take_handler`](Self::take_handler).
    /// Dropped if the window was destroyed in the meantime.
    pub(crate) fn restore_handler(&mut self, id: WindowId, handler: Box<dyn WindowHandler>) {
        if let Some(node) = self.node_mut(id) {
            node.handler = Some(handler);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe(u32);

    impl WindowHandler for Probe {}

    fn tree() -> WindowTree {
        WindowTree::new(Dimension::new(100, 100))
    }

    #[test]
    fn test_capture_scenario_hit_test() {
        let mut t = tree();
        let w = t.create(t.root(), Rectangle::new(5, 5, 10, 10), Probe(1)).unwrap();
        assert_eq!(t.window_at(t.root(), Point::new(7, 7)), Some(w));
        assert_eq!(t.window_at(t.root(), Point::new(15, 15)), Some(t.root()));
        assert_eq!(t.window_at(t.root(), Point::new(200, 200)), None);
        assert_eq!(
            Point::new(7, 7).relative_to(t.absolute_origin(w).unwrap()),
            Point::new(2, 2)
        );
    }

    #[test]
    fn test_nested_hit_and_topmost_sibling() {
        let mut t = tree();
        let outer = t.create_plain(t.root(), Rectangle::new(10, 10, 50, 50)).unwrap();
        let inner = t.create_plain(outer, Rectangle::new(5, 5, 10, 10)).unwrap();
        let over = t.create_plain(outer, Rectangle::new(0, 0, 20, 20)).unwrap();

        assert_eq!(t.absolute_origin(inner), Some(Point::new(15, 15)));
        // `over` was added last so it wins where they overlap
        assert_eq!(t.window_at(t.root(), Point::new(16, 16)), Some(over));
        t.set_visible(over, false).unwrap();
        assert_eq!(t.window_at(t.root(), Point::new(16, 16)), Some(inner));
        assert_eq!(t.window_at(outer, Point::new(40, 40)), Some(outer));
        assert_eq!(t.window_at(inner, Point::new(40, 40)), None);
    }

    #[test]
    fn test_accept_touch_walks_to_ancestor() {
        let mut t = tree();
        let panel = t.create_plain(t.root(), Rectangle::new(0, 0, 50, 50)).unwrap();
        let label = t.create_plain(panel, Rectangle::new(0, 0, 10, 10)).unwrap();
        t.set_accept_touch(label, false).unwrap();
        assert_eq!(t.accept_touch_target(label), Some(panel));
        t.set_accept_touch(panel, false).unwrap();
        assert_eq!(t.accept_touch_target(label), Some(t.root()));
        t.set_accept_touch(t.root(), false).unwrap();
        assert!(t.accepts_touch(t.root()));
    }

    #[test]
    fn test_root_geometry_is_fixed() {
        let mut t = tree();
        t.set_rect(t.root(), Rectangle::new(10, 10, 5, 5)).unwrap();
        assert_eq!(t.rect(t.root()), Some(Rectangle::new(0, 0, 100, 100)));
        assert_eq!(t.destroy(t.root()), Err(UiError::RootWindow));
        t.set_visible(t.root(), false).unwrap();
        assert!(t.is_visible(t.root()));
    }

    #[test]
    fn test_visibility_marks_dirty() {
        let mut t = tree();
        let w = t.create_plain(t.root(), Rectangle::new(0, 0, 10, 10)).unwrap();
        t.clear_dirty(w);
        t.clear_dirty(t.root());

        t.set_visible(w, false).unwrap();
        assert!(t.is_dirty(t.root()));
        assert!(!t.is_dirty(w));

        t.clear_dirty(t.root());
        t.set_visible(w, true).unwrap();
        assert!(t.is_dirty(w));
        assert!(!t.is_dirty(t.root()));
    }

    #[test]
    fn test_destroy_is_recursive_and_ids_go_stale() {
        let mut t = tree();
        let a = t.create_plain(t.root(), Rectangle::new(0, 0, 10, 10)).unwrap();
        let b = t.create_plain(a, Rectangle::new(0, 0, 5, 5)).unwrap();
        let destroyed = t.destroy(a).unwrap();
        assert_eq!(destroyed.len(), 2);
        assert!(!t.contains(a) && !t.contains(b));
        assert!(t.children(t.root()).is_empty());
        assert_eq!(t.len(), 1);

        // Reused slot gets a new generation
        let c = t.create_plain(t.root(), Rectangle::new(0, 0, 1, 1)).unwrap();
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert!(!t.is_visible(a));
        assert_eq!(t.destroy(a), Err(UiError::UnknownWindow(a)));
    }

    #[test]
    fn test_dialog_starts_hidden() {
        let mut t = tree();
        let d = t.create_dialog(Rectangle::new(20, 20, 40, 40), Probe(7)).unwrap();
        assert!(!t.is_visible(d));
        assert_eq!(t.kind(d), Some(WindowKind::Dialog));
        assert_eq!(t.parent(d), Some(t.root()));
    }

    #[test]
    fn test_typed_handler_access() {
        let mut t = tree();
        let w = t.create(t.root(), Rectangle::new(0, 0, 10, 10), Probe(3)).unwrap();
        t.handler_mut::<Probe>(w).unwrap().0 += 1;
        assert_eq!(t.handler::<Probe>(w).map(|p| p.0), Some(4));

        let taken = t.take_handler(w).unwrap();
        assert!(t.handler::<Probe>(w).is_none());
        t.restore_handler(w, taken);
        assert_eq!(t.handler::<Probe>(w).map(|p| p.0), Some(4));
    }
}
