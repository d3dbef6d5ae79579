//! The element trait.
//!
//! Every node of an [`ElementTree`](super::ElementTree) holds a boxed
//! [`Element`]. The trait is the element's table of overridable behaviors:
//! each method has a default that delegates to the base behavior through a
//! `super_*` call on the [`TreeView`] or [`ElementContext`] it receives.
//! Containers get container dispatch as their base, leaves get leaf
//! behavior.
//!
//! An override that extends rather than replaces the base calls the
//! matching `super_*` method itself, before or after its own work:
//!
//! ```ignore
//! impl Element for HoverLabel {
//!     fn pointer_leave(&mut self, cx: &mut ElementContext<'_>) {
//!         cx.super_pointer_leave();
//!         self.hovered = false;
//!     }
//! }
//! ```

use std::any::Any;

use casement_core::{Bounds, RenderNodeId};

use super::context::{ElementContext, TreeView};
use super::events::ButtonEvent;
use super::scene::SceneBackend;

/// A positioned, hit-testable node in the element tree.
///
/// All methods have defaults; a type that overrides nothing behaves as the
/// base element (or base container, when inserted with
/// [`ElementTree::insert_container`](super::ElementTree::insert_container)).
pub trait Element: AsAny + 'static {
    /// The element's extent relative to its own position.
    ///
    /// Leaves default to empty bounds. Containers default to the union of
    /// their visible children's extents and the origin.
    fn dimensions(&self, view: TreeView<'_>) -> Bounds {
        view.super_dimensions()
    }

    /// The area that accepts pointer input, relative to the element's position.
    ///
    /// Defaults to [`dimensions`](Self::dimensions) for leaves and the union of
    /// the children's pointer areas for containers.
    fn pointer_area(&self, view: TreeView<'_>) -> Bounds {
        view.super_pointer_area()
    }

    /// Pointer moved to `(x, y)`, in the element's own coordinates.
    ///
    /// Returns whether the element accepted the motion. Only an accepting
    /// element becomes its container's pointer focus.
    fn pointer_motion(
        &mut self,
        cx: &mut ElementContext<'_>,
        x: i32,
        y: i32,
        time_msec: u32,
    ) -> bool {
        cx.super_pointer_motion(x, y, time_msec)
    }

    /// A button event while the element holds pointer focus.
    ///
    /// Returns whether the event was consumed.
    fn pointer_button(&mut self, cx: &mut ElementContext<'_>, event: &ButtonEvent) -> bool {
        cx.super_pointer_button(event)
    }

    /// The pointer left the element.
    fn pointer_leave(&mut self, cx: &mut ElementContext<'_>) {
        cx.super_pointer_leave();
    }

    /// Re-arrange after a child was added, removed, shown, hidden or resized.
    ///
    /// Only invoked on containers. The base behavior notifies the parent, or
    /// re-evaluates pointer focus when this is the root.
    fn update_layout(&mut self, cx: &mut ElementContext<'_>) {
        cx.super_update_layout();
    }

    /// Create this element's node in the scene, beneath `parent`.
    ///
    /// The default creates a plain tree node. Children of containers are
    /// created by the tree afterwards.
    fn create_render_node(
        &self,
        view: TreeView<'_>,
        scene: &mut dyn SceneBackend,
        parent: Option<RenderNodeId>,
    ) -> RenderNodeId {
        scene.create_tree(parent, view.position(), view.is_visible())
    }

    /// Release resources before the element is dropped.
    ///
    /// Children of a container have already been destroyed when this runs.
    fn destroy(&mut self, _cx: &mut ElementContext<'_>) {}
}

/// Upcast to `Any` for typed access to concrete elements.
///
/// Implemented for every element; do not implement by hand.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
