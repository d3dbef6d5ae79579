//! The element arena.
//!
//! [`ElementTree`] owns every element. Elements refer to each other by
//! [`ElementId`]; containers keep an ordered child list, children keep a
//! back-reference to their container.
//!
//! # Operations and settling
//!
//! Every public operation is a unit of work. Structural changes made during
//! it only mark containers dirty; when the outermost operation returns, the
//! tree *settles*: dirty containers get their `update_layout` pass deepest
//! first, and tasks posted with [`ElementTree::defer`] run. Operations issued
//! from inside element methods (through [`ElementContext::tree`]) nest in the
//! current unit and settle with it.
//!
//! # Example
//!
//! ```
//! use casement::element::{ElementTree, InsertAt};
//! use casement::element::widgets::{BoxLayout, Orientation};
//!
//! let mut tree = ElementTree::new();
//! let root = tree.insert_container(BoxLayout::new(Orientation::Horizontal, 0));
//! let inner = tree.insert_container(BoxLayout::new(Orientation::Vertical, 0));
//! tree.set_visible(inner, true).unwrap();
//! tree.add(root, inner, InsertAt::Back).unwrap();
//! assert_eq!(tree.parent(inner).unwrap(), Some(root));
//! ```

use std::fmt::Write as FmtWrite;

use slotmap::SlotMap;

use casement_core::logging::{span_names, targets};
use casement_core::{
    Bounds, ElementId, Point, PreconditionViolation, RenderNodeId, Result, TaskQueue,
    ToolkitError, TreeFormatOptions, TreeStyle,
};

use super::base::{ContainerState, ElementBase, PointerSample};
use super::context::{ElementContext, TreeView};
use super::events::ButtonEvent;
use super::invalidation::LayoutInvalidator;
use super::scene::SceneState;
use super::traits::Element;

/// Upper bound on layout passes and tasks in one settle.
const MAX_SETTLE_STEPS: usize = 4096;

/// Where to insert a child into a container's sequence.
///
/// The front of the sequence is topmost for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    Front,
    Back,
    /// Directly in front of the given sibling.
    Before(ElementId),
}

pub(crate) struct Node {
    pub(crate) base: ElementBase,
    pub(crate) container: Option<ContainerState>,
    /// `None` while the element is checked out for one of its own methods.
    pub(crate) element: Option<Box<dyn Element>>,
}

/// Arena owning a forest of elements.
pub struct ElementTree {
    pub(crate) nodes: SlotMap<ElementId, Node>,
    invalidator: LayoutInvalidator,
    tasks: TaskQueue<ElementTree>,
    pub(crate) scene: Option<SceneState>,
    /// Nesting depth of the operation in progress.
    depth: usize,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementTree")
            .field("elements", &self.nodes.len())
            .field("scene_attached", &self.scene.is_some())
            .finish()
    }
}

impl ElementTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            invalidator: LayoutInvalidator::new(),
            tasks: TaskQueue::new(),
            scene: None,
            depth: 0,
        }
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Insert a leaf element. It starts hidden, unparented, at the origin.
    pub fn insert_element<E: Element>(&mut self, element: E) -> ElementId {
        self.insert_node(element, None)
    }

    /// Insert an element that can hold children.
    pub fn insert_container<E: Element>(&mut self, element: E) -> ElementId {
        self.insert_node(element, Some(ContainerState::default()))
    }

    fn insert_node<E: Element>(&mut self, element: E, container: Option<ContainerState>) -> ElementId {
        let type_name = std::any::type_name::<E>();
        let id = self.nodes.insert(Node {
            base: ElementBase::new(type_name),
            container,
            element: Some(Box::new(element)),
        });
        tracing::trace!(target: targets::TREE, ?id, type_name, "inserted element");
        id
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_container(&self, id: ElementId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.container.is_some())
    }

    fn node(&self, id: ElementId) -> Result<&Node> {
        self.nodes.get(id).ok_or(ToolkitError::InvalidElementId(id))
    }

    fn node_mut(&mut self, id: ElementId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(ToolkitError::InvalidElementId(id))
    }

    fn container_state(&self, id: ElementId) -> Result<&ContainerState> {
        self.node(id)?
            .container
            .as_ref()
            .ok_or(PreconditionViolation::NotAContainer.into())
    }

    fn container_state_mut(&mut self, id: ElementId) -> Result<&mut ContainerState> {
        self.node_mut(id)?
            .container
            .as_mut()
            .ok_or(PreconditionViolation::NotAContainer.into())
    }

    /// State the tree keeps for an element.
    pub fn base(&self, id: ElementId) -> Result<&ElementBase> {
        Ok(&self.node(id)?.base)
    }

    pub fn position(&self, id: ElementId) -> Result<Point> {
        Ok(self.node(id)?.base.position)
    }

    pub fn is_visible(&self, id: ElementId) -> Result<bool> {
        Ok(self.node(id)?.base.visible)
    }

    pub fn parent(&self, id: ElementId) -> Result<Option<ElementId>> {
        Ok(self.node(id)?.base.parent)
    }

    /// Children front to back.
    pub fn children(&self, id: ElementId) -> Result<&[ElementId]> {
        Ok(&self.container_state(id)?.children)
    }

    /// The child of `id` that currently holds pointer focus.
    pub fn pointer_focus(&self, id: ElementId) -> Result<Option<ElementId>> {
        Ok(self.container_state(id)?.pointer_focus)
    }

    pub(crate) fn set_pointer_focus(&mut self, id: ElementId, focus: Option<ElementId>) -> Option<ElementId> {
        match self.container_state_mut(id) {
            Ok(state) => std::mem::replace(&mut state.pointer_focus, focus),
            Err(_) => None,
        }
    }

    /// The child of `id` holding the primary button grab.
    pub fn button_grab(&self, id: ElementId) -> Result<Option<ElementId>> {
        Ok(self.container_state(id)?.button_grab)
    }

    pub(crate) fn set_button_grab(&mut self, id: ElementId, grab: Option<ElementId>) {
        if let Ok(state) = self.container_state_mut(id) {
            state.button_grab = grab;
        }
    }

    pub(crate) fn last_pointer(&self, id: ElementId) -> Option<PointerSample> {
        self.nodes.get(id).and_then(|node| node.base.last_pointer)
    }

    pub(crate) fn render_node(&self, id: ElementId) -> Option<RenderNodeId> {
        self.nodes.get(id).and_then(|node| node.base.render_node)
    }

    /// The element's extent relative to its position, as it reports it.
    ///
    /// While the element is executing one of its own mutating methods it
    /// cannot be asked, and the base (container or leaf) extent is returned.
    pub fn dimensions(&self, id: ElementId) -> Result<Bounds> {
        let node = self.node(id)?;
        let view = TreeView::new(self, id);
        Ok(match node.element.as_deref() {
            Some(element) => element.dimensions(view),
            None => {
                tracing::debug!(target: targets::TREE, ?id, "dimensions of checked-out element, using base");
                view.super_dimensions()
            }
        })
    }

    /// The element's pointer area relative to its position.
    pub fn pointer_area(&self, id: ElementId) -> Result<Bounds> {
        let node = self.node(id)?;
        let view = TreeView::new(self, id);
        Ok(match node.element.as_deref() {
            Some(element) => element.pointer_area(view),
            None => view.super_pointer_area(),
        })
    }

    /// Position in the coordinates of the element's root.
    pub fn absolute_position(&self, id: ElementId) -> Result<Point> {
        let mut position = self.position(id)?;
        let mut current = self.parent(id)?;
        while let Some(parent) = current {
            position = position.offset(self.position(parent)?);
            current = self.parent(parent)?;
        }
        Ok(position)
    }

    /// The nearest container above `id` holding a `T`.
    ///
    /// Ancestors that are checked out are skipped.
    pub fn find_ancestor<T: Element>(&self, id: ElementId) -> Option<ElementId> {
        let mut current = self.nodes.get(id)?.base.parent;
        while let Some(candidate) = current {
            let node = self.nodes.get(candidate)?;
            if node.element.as_deref().is_some_and(|element| element.as_any().is::<T>()) {
                return Some(candidate);
            }
            current = node.base.parent;
        }
        None
    }

    /// Whether `ancestor` is `id` or lies above it.
    fn is_self_or_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.nodes.get(candidate).and_then(|node| node.base.parent);
        }
        false
    }

    /// A read-only view of one element.
    pub fn view(&self, id: ElementId) -> Result<TreeView<'_>> {
        self.node(id)?;
        Ok(TreeView::new(self, id))
    }

    /// Typed shared access to a concrete element.
    pub fn get<T: Element>(&self, id: ElementId) -> Result<&T> {
        let element = self.node(id)?.element.as_deref().ok_or(ToolkitError::ElementInUse(id))?;
        element.as_any().downcast_ref::<T>().ok_or(ToolkitError::TypeMismatch {
            expected: std::any::type_name::<T>(),
        })
    }

    /// Typed exclusive access to a concrete element together with its context.
    ///
    /// Counts as a tree operation: layout settles when it returns.
    pub fn with<T: Element, R>(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut T, &mut ElementContext<'_>) -> R,
    ) -> Result<R> {
        self.operation(|tree| {
            tree.call_mut(id, |element, cx| {
                let concrete = element.as_any_mut().downcast_mut::<T>().ok_or(ToolkitError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                })?;
                Ok(f(concrete, cx))
            })?
        })
    }

    /// Check an element out of its slot, run `f` on it, and put it back.
    pub(crate) fn call_mut<R>(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut dyn Element, &mut ElementContext<'_>) -> R,
    ) -> Result<R> {
        let mut element = self.node_mut(id)?.element.take().ok_or(ToolkitError::ElementInUse(id))?;
        let result = {
            let mut cx = ElementContext::new(self, id);
            f(element.as_mut(), &mut cx)
        };
        match self.nodes.get_mut(id) {
            Some(node) => node.element = Some(element),
            None => tracing::error!(target: targets::TREE, ?id, "element vanished while checked out"),
        }
        Ok(result)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    pub fn set_position(&mut self, id: ElementId, position: Point) -> Result<()> {
        self.operation(|tree| {
            let node = tree.node_mut(id)?;
            if node.base.position == position {
                return Ok(());
            }
            node.base.position = position;
            tree.scene_set_position(id, position);
            Ok(())
        })
    }

    /// Show or hide an element. Its container re-lays out.
    pub fn set_visible(&mut self, id: ElementId, visible: bool) -> Result<()> {
        self.operation(|tree| {
            let node = tree.node_mut(id)?;
            if node.base.visible == visible {
                return Ok(());
            }
            node.base.visible = visible;
            let parent = node.base.parent;
            tree.scene_set_enabled(id, visible);
            if let Some(parent) = parent {
                tree.invalidate(parent);
            }
            Ok(())
        })
    }

    /// Add an unparented element to a container.
    pub fn add(&mut self, container: ElementId, element: ElementId, at: InsertAt) -> Result<()> {
        self.operation(|tree| {
            tree.container_state(container)?;
            let node = tree.node(element)?;
            if tree.is_self_or_ancestor(element, container) {
                return Err(PreconditionViolation::SelfInsertion.into());
            }
            if node.base.parent.is_some() {
                return Err(PreconditionViolation::AlreadyParented.into());
            }

            let state = tree.container_state_mut(container)?;
            let index = match at {
                InsertAt::Front => 0,
                InsertAt::Back => state.children.len(),
                InsertAt::Before(sibling) => state
                    .children
                    .iter()
                    .position(|child| *child == sibling)
                    .ok_or(PreconditionViolation::ReferenceNotAChild)?,
            };
            state.children.insert(index, element);
            tree.node_mut(element)?.base.parent = Some(container);
            tracing::debug!(target: targets::TREE, ?container, ?element, ?at, "added element");

            tree.scene_attach_subtree(element);
            tree.invalidate(container);
            Ok(())
        })
    }

    /// Remove a child from its container. The child stays alive, unparented.
    ///
    /// If the child held pointer focus it receives a leave.
    pub fn remove(&mut self, container: ElementId, element: ElementId) -> Result<()> {
        self.operation(|tree| {
            tree.container_state(container)?;
            if tree.node(element)?.base.parent != Some(container) {
                return Err(PreconditionViolation::NotAChild.into());
            }

            let state = tree.container_state_mut(container)?;
            state.children.retain(|child| *child != element);
            let had_focus = state.pointer_focus == Some(element);
            if had_focus {
                state.pointer_focus = None;
            }
            if state.button_grab == Some(element) {
                state.button_grab = None;
            }
            tree.node_mut(element)?.base.parent = None;
            tracing::debug!(target: targets::TREE, ?container, ?element, "removed element");

            if had_focus {
                tree.dispatch_pointer_leave(element)?;
            }
            tree.scene_detach_subtree(element);
            tree.invalidate(container);
            Ok(())
        })
    }

    /// Move an element into `container`, detaching it from its current one.
    pub fn reparent(&mut self, element: ElementId, container: ElementId, at: InsertAt) -> Result<()> {
        self.operation(|tree| {
            tree.container_state(container)?;
            if tree.is_self_or_ancestor(element, container) {
                return Err(PreconditionViolation::SelfInsertion.into());
            }
            if let InsertAt::Before(sibling) = at {
                if sibling == element || tree.parent(sibling)? != Some(container) {
                    return Err(PreconditionViolation::ReferenceNotAChild.into());
                }
            }
            if let Some(current) = tree.parent(element)? {
                tree.remove(current, element)?;
            }
            tree.add(container, element, at)
        })
    }

    /// Destroy an element and, for containers, everything beneath it.
    ///
    /// Children are destroyed before their container; each element's
    /// `destroy` hook runs before it is dropped.
    pub fn destroy(&mut self, id: ElementId) -> Result<()> {
        self.operation(|tree| {
            tree.node(id)?;
            if let Some(busy) = tree.first_checked_out(id) {
                return Err(ToolkitError::ElementInUse(busy));
            }
            if let Some(parent) = tree.parent(id)? {
                tree.remove(parent, id)?;
            } else {
                tree.scene_detach_subtree(id);
            }
            tree.destroy_subtree(id);
            Ok(())
        })
    }

    fn first_checked_out(&self, id: ElementId) -> Option<ElementId> {
        let node = self.nodes.get(id)?;
        if node.element.is_none() {
            return Some(id);
        }
        node.container
            .as_ref()
            .and_then(|state| state.children.iter().find_map(|child| self.first_checked_out(*child)))
    }

    fn destroy_subtree(&mut self, id: ElementId) {
        let children = self
            .nodes
            .get_mut(id)
            .and_then(|node| node.container.as_mut())
            .map(|state| {
                state.pointer_focus = None;
                state.button_grab = None;
                std::mem::take(&mut state.children)
            })
            .unwrap_or_default();
        for child in children {
            self.destroy_subtree(child);
        }

        if let Err(err) = self.call_mut(id, |element, cx| element.destroy(cx)) {
            tracing::error!(target: targets::TREE, ?id, %err, "destroy hook failed");
        }
        self.invalidator.clear(id);
        if let Some(node) = self.nodes.remove(id) {
            tracing::trace!(target: targets::TREE, ?id, type_name = node.base.type_name(), "destroyed element");
        }
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Deliver pointer motion to an element, in its own coordinates.
    pub fn pointer_motion(&mut self, id: ElementId, x: i32, y: i32, time_msec: u32) -> Result<bool> {
        let _span = tracing::trace_span!(target: targets::INPUT, span_names::POINTER_DISPATCH).entered();
        self.operation(|tree| tree.dispatch_pointer_motion(id, x, y, time_msec))
    }

    /// Deliver a button event to an element.
    pub fn pointer_button(&mut self, id: ElementId, event: &ButtonEvent) -> Result<bool> {
        let _span = tracing::trace_span!(target: targets::INPUT, span_names::POINTER_DISPATCH).entered();
        self.operation(|tree| tree.dispatch_pointer_button(id, event))
    }

    /// Tell an element the pointer has left it.
    pub fn pointer_leave(&mut self, id: ElementId) -> Result<()> {
        self.operation(|tree| tree.dispatch_pointer_leave(id))
    }

    pub(crate) fn dispatch_pointer_motion(&mut self, id: ElementId, x: i32, y: i32, time_msec: u32) -> Result<bool> {
        self.node_mut(id)?.base.last_pointer = Some(PointerSample { x, y, time_msec });
        self.call_mut(id, |element, cx| element.pointer_motion(cx, x, y, time_msec))
    }

    pub(crate) fn dispatch_pointer_button(&mut self, id: ElementId, event: &ButtonEvent) -> Result<bool> {
        self.call_mut(id, |element, cx| element.pointer_button(cx, event))
    }

    pub(crate) fn dispatch_pointer_leave(&mut self, id: ElementId) -> Result<()> {
        self.node_mut(id)?.base.last_pointer = None;
        self.call_mut(id, |element, cx| element.pointer_leave(cx))
    }

    // =========================================================================
    // Layout and deferred work
    // =========================================================================

    /// Schedule a layout pass for a container.
    ///
    /// Invalidating a leaf invalidates its container instead.
    pub fn invalidate(&mut self, id: ElementId) {
        let target = if self.is_container(id) {
            Some(id)
        } else {
            self.parent(id).ok().flatten()
        };
        if let Some(target) = target {
            self.invalidator.invalidate(target);
        }
        if self.depth == 0 {
            self.settle();
        }
    }

    /// Whether a container awaits a layout pass.
    pub fn is_layout_dirty(&self, id: ElementId) -> bool {
        self.invalidator.is_dirty(id)
    }

    /// Run `task` once the current operation completes, or now if idle.
    pub fn defer<F>(&mut self, task: F)
    where
        F: FnOnce(&mut ElementTree) + Send + 'static,
    {
        self.tasks.post(task);
        if self.depth == 0 {
            self.settle();
        }
    }

    /// A handle to the deferred task queue, for slots that outlive a borrow of the tree.
    ///
    /// Tasks posted through the handle run at the end of the next operation.
    pub fn tasks(&self) -> TaskQueue<ElementTree> {
        self.tasks.clone()
    }

    /// Run `f` as one operation; settle when the outermost one returns.
    pub(crate) fn operation<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        if self.depth == 0 {
            self.settle();
        }
        result
    }

    /// Lay out dirty containers deepest first and run deferred tasks until
    /// neither remains.
    fn settle(&mut self) {
        let _span = tracing::trace_span!(target: targets::LAYOUT, span_names::LAYOUT_SETTLE).entered();
        self.depth += 1;
        let tasks = self.tasks.clone();
        let mut steps = 0;
        loop {
            if steps == MAX_SETTLE_STEPS {
                tracing::warn!(
                    target: targets::LAYOUT,
                    steps,
                    "layout did not settle, dropping remaining invalidations"
                );
                self.invalidator.clear_all();
                break;
            }
            steps += 1;

            let nodes = &self.nodes;
            let next = self.invalidator.take_deepest(|id| {
                nodes.contains_key(id).then(|| depth_in(nodes, id))
            });
            if let Some(id) = next {
                tracing::trace!(target: targets::LAYOUT, ?id, "update_layout");
                if let Err(err) = self.call_mut(id, |element, cx| element.update_layout(cx)) {
                    tracing::error!(target: targets::LAYOUT, ?id, %err, "layout pass failed");
                }
                continue;
            }
            if !tasks.run_next(self) {
                break;
            }
        }
        self.depth -= 1;
    }

    // =========================================================================
    // Debugging
    // =========================================================================

    /// Render the subtree under `root` as text.
    pub fn format_tree(&self, root: ElementId, options: &TreeFormatOptions) -> Result<String> {
        self.node(root)?;
        let mut output = String::new();
        self.format_subtree_into(root, 0, true, options, &mut output);
        Ok(output)
    }

    fn format_subtree_into(
        &self,
        id: ElementId,
        depth: usize,
        is_last: bool,
        options: &TreeFormatOptions,
        output: &mut String,
    ) {
        if options.exceeds_depth(depth) {
            return;
        }
        let Some(node) = self.nodes.get(id) else {
            return;
        };

        output.push_str(&options.prefix(depth, is_last));
        if options.show_types {
            output.push_str(node.base.type_name());
        } else {
            output.push_str(if node.container.is_some() { "container" } else { "element" });
        }
        if options.show_ids {
            let _ = write!(output, " [{id:?}]");
        }
        if options.show_geometry {
            let position = node.base.position;
            let bounds = self.dimensions(id).unwrap_or_default();
            let _ = write!(
                output,
                " @({}, {}) {}x{}",
                position.x,
                position.y,
                bounds.width(),
                bounds.height()
            );
        }
        if !node.base.visible {
            output.push_str(" (hidden)");
        }
        if options.style == TreeStyle::Compact {
            output.push(';');
        }
        output.push('\n');

        let children: Vec<ElementId> = node
            .container
            .as_ref()
            .map(|state| {
                state
                    .children
                    .iter()
                    .copied()
                    .filter(|child| options.show_hidden || self.is_visible(*child).unwrap_or(false))
                    .collect()
            })
            .unwrap_or_default();
        let count = children.len();
        for (index, child) in children.into_iter().enumerate() {
            self.format_subtree_into(child, depth + 1, index + 1 == count, options, output);
        }
    }
}

fn depth_in(nodes: &SlotMap<ElementId, Node>, id: ElementId) -> usize {
    let mut depth = 0;
    let mut current = nodes.get(id).and_then(|node| node.base.parent);
    while let Some(parent) = current {
        depth += 1;
        current = nodes.get(parent).and_then(|node| node.base.parent);
    }
    depth
}
