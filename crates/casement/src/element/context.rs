//! Handles passed into element methods.
//!
//! [`TreeView`] is the shared view an element gets for its read-only methods;
//! [`ElementContext`] is the exclusive handle for mutating methods. Both know
//! which element they were created for and expose the base ("super")
//! behaviors that overrides delegate to.

use casement_core::logging::targets;
use casement_core::{Bounds, ElementId, Point, RenderNodeId, TaskQueue};

use super::container;
use super::events::ButtonEvent;
use super::scene::SceneBackend;
use super::tree::ElementTree;
use crate::graphics::ImageBuffer;

/// Shared access to the tree, focused on one element.
#[derive(Clone, Copy)]
pub struct TreeView<'a> {
    tree: &'a ElementTree,
    id: ElementId,
}

impl<'a> TreeView<'a> {
    pub(crate) fn new(tree: &'a ElementTree, id: ElementId) -> Self {
        Self { tree, id }
    }

    #[inline]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The whole tree.
    #[inline]
    pub fn tree(&self) -> &'a ElementTree {
        self.tree
    }

    /// A view of another element in the same tree.
    pub fn view(&self, id: ElementId) -> TreeView<'a> {
        TreeView::new(self.tree, id)
    }

    pub fn position(&self) -> Point {
        self.tree.position(self.id).unwrap_or_default()
    }

    pub fn is_visible(&self) -> bool {
        self.tree.is_visible(self.id).unwrap_or(false)
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.tree.parent(self.id).ok().flatten()
    }

    /// Children front to back. Empty for leaves.
    pub fn children(&self) -> &'a [ElementId] {
        self.tree.children(self.id).unwrap_or(&[])
    }

    pub fn is_container(&self) -> bool {
        self.tree.is_container(self.id)
    }

    /// The element's node in the attached scene.
    pub fn render_node(&self) -> Option<RenderNodeId> {
        self.tree.render_node(self.id)
    }

    /// This element's dimensions, through its own override.
    pub fn dimensions(&self) -> Bounds {
        self.tree.dimensions(self.id).unwrap_or_default()
    }

    /// The base dimensions: child union for containers, empty for leaves.
    pub fn super_dimensions(&self) -> Bounds {
        if self.is_container() {
            container::dimensions(self.tree, self.id)
        } else {
            Bounds::ZERO
        }
    }

    /// The base pointer area: child union for containers, dimensions for leaves.
    pub fn super_pointer_area(&self) -> Bounds {
        if self.is_container() {
            container::pointer_area(self.tree, self.id)
        } else {
            self.dimensions()
        }
    }
}

/// Exclusive access to the tree from inside one element's method.
///
/// The element itself is checked out of the tree while the method runs, so
/// it cannot be reached through the tree again until the method returns.
/// Everything else, including its parent and children, can.
pub struct ElementContext<'a> {
    tree: &'a mut ElementTree,
    id: ElementId,
}

impl<'a> ElementContext<'a> {
    pub(crate) fn new(tree: &'a mut ElementTree, id: ElementId) -> Self {
        Self { tree, id }
    }

    #[inline]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The whole tree.
    #[inline]
    pub fn tree(&mut self) -> &mut ElementTree {
        &mut *self.tree
    }

    /// A read-only view of this element.
    pub fn view(&self) -> TreeView<'_> {
        TreeView::new(&*self.tree, self.id)
    }

    pub fn position(&self) -> Point {
        self.view().position()
    }

    pub fn set_position(&mut self, position: Point) {
        if let Err(err) = self.tree.set_position(self.id, position) {
            tracing::error!(target: targets::TREE, id = ?self.id, %err, "set_position failed");
        }
    }

    pub fn is_visible(&self) -> bool {
        self.view().is_visible()
    }

    pub fn set_visible(&mut self, visible: bool) {
        if let Err(err) = self.tree.set_visible(self.id, visible) {
            tracing::error!(target: targets::TREE, id = ?self.id, %err, "set_visible failed");
        }
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.view().parent()
    }

    /// Children front to back, copied out so the tree may be mutated while iterating.
    pub fn children(&self) -> Vec<ElementId> {
        self.view().children().to_vec()
    }

    /// Dimensions of another element.
    pub fn dimensions_of(&self, id: ElementId) -> Bounds {
        self.tree.dimensions(id).unwrap_or_default()
    }

    /// Tell the parent container that this element changed size.
    pub fn invalidate_parent(&mut self) {
        if let Some(parent) = self.parent() {
            self.tree.invalidate(parent);
        }
    }

    /// Schedule a layout pass for this container.
    pub fn invalidate(&mut self) {
        self.tree.invalidate(self.id);
    }

    /// Run `task` once the current tree operation completes.
    ///
    /// Use this to reach ancestors, which are checked out while a
    /// descendant's method runs.
    pub fn defer<F>(&mut self, task: F)
    where
        F: FnOnce(&mut ElementTree) + Send + 'static,
    {
        self.tree.defer(task);
    }

    /// A handle to the tree's deferred task queue.
    pub fn tasks(&self) -> TaskQueue<ElementTree> {
        self.tree.tasks()
    }

    pub fn render_node(&self) -> Option<RenderNodeId> {
        self.tree.render_node(self.id)
    }

    /// The attached scene backend, if this element has a node in it.
    pub fn scene(&mut self) -> Option<(&mut (dyn SceneBackend + 'static), RenderNodeId)> {
        let node = self.render_node()?;
        self.tree.scene_backend().map(|scene| (scene, node))
    }

    /// Push a new image to this element's scene node, if it has one.
    pub fn update_scene_buffer(&mut self, image: Option<&ImageBuffer>) {
        if let Some((scene, node)) = self.scene() {
            scene.set_buffer(node, image);
        }
    }

    // =========================================================================
    // Base behaviors
    // =========================================================================

    /// Base pointer motion: focus tracking for containers, accept for leaves.
    pub fn super_pointer_motion(&mut self, x: i32, y: i32, time_msec: u32) -> bool {
        if self.tree.is_container(self.id) {
            container::pointer_motion(self.tree, self.id, x, y, time_msec)
        } else {
            true
        }
    }

    /// Base button handling: forward to the focused child for containers.
    pub fn super_pointer_button(&mut self, event: &ButtonEvent) -> bool {
        if self.tree.is_container(self.id) {
            container::pointer_button(self.tree, self.id, event)
        } else {
            false
        }
    }

    /// Base leave: forward to the focused child and clear focus.
    pub fn super_pointer_leave(&mut self) {
        if self.tree.is_container(self.id) {
            container::pointer_leave(self.tree, self.id);
        }
    }

    /// Base layout update: notify the parent, or refocus at the root.
    pub fn super_update_layout(&mut self) {
        if self.tree.is_container(self.id) {
            container::update_layout(self.tree, self.id);
        }
    }
}
