//! Scene backend interface.
//!
//! The toolkit does not draw. A [`SceneBackend`] mirrors the element tree as
//! a tree of render nodes: every container becomes a tree node, every
//! buffer-backed leaf a buffer node. Node positions are relative to the
//! parent node, so the backend resolves absolute coordinates by nesting.
//!
//! Once a scene is attached to a root element, the tree keeps it in sync:
//! elements added beneath an attached container get nodes, removed elements
//! lose theirs, and position, visibility and image changes are forwarded.

use casement_core::logging::targets;
use casement_core::{ElementId, Point, PreconditionViolation, RenderNodeId, Result};

use super::context::TreeView;
use super::tree::ElementTree;
use crate::graphics::ImageBuffer;

/// A retained scene graph the element tree renders into.
pub trait SceneBackend {
    /// Create a grouping node. `parent` is `None` only for the scene root.
    fn create_tree(&mut self, parent: Option<RenderNodeId>, position: Point, enabled: bool) -> RenderNodeId;

    /// Create a node displaying an image.
    fn create_buffer(
        &mut self,
        parent: Option<RenderNodeId>,
        position: Point,
        enabled: bool,
        image: Option<&ImageBuffer>,
    ) -> RenderNodeId;

    fn set_position(&mut self, node: RenderNodeId, position: Point);

    fn set_enabled(&mut self, node: RenderNodeId, enabled: bool);

    /// Replace the image of a buffer node. The node keeps its own reference.
    fn set_buffer(&mut self, node: RenderNodeId, image: Option<&ImageBuffer>);

    /// Restack `node` directly beneath its sibling `sibling`.
    fn place_below(&mut self, node: RenderNodeId, sibling: RenderNodeId);

    /// Release a node. Children have been released before.
    fn destroy_node(&mut self, node: RenderNodeId);
}

pub(crate) struct SceneState {
    backend: Box<dyn SceneBackend>,
    root: ElementId,
}

impl ElementTree {
    /// Mirror the subtree under `root` into `backend`.
    ///
    /// Replaces any previously attached scene, releasing its nodes.
    pub fn attach_scene(&mut self, root: ElementId, backend: Box<dyn SceneBackend>) -> Result<()> {
        self.operation(|tree| {
            if tree.parent(root)?.is_some() {
                return Err(PreconditionViolation::AlreadyParented.into());
            }
            if let Some(previous) = tree.detach_scene() {
                tracing::debug!(target: targets::SCENE, "replacing attached scene");
                drop(previous);
            }
            let mut state = SceneState { backend, root };
            tree.create_render_nodes(state.backend.as_mut(), root, None);
            tree.scene = Some(state);
            tracing::debug!(target: targets::SCENE, ?root, "scene attached");
            Ok(())
        })
    }

    /// Release every render node and hand the backend back.
    pub fn detach_scene(&mut self) -> Option<Box<dyn SceneBackend>> {
        let mut state = self.scene.take()?;
        self.destroy_render_nodes(state.backend.as_mut(), state.root);
        tracing::debug!(target: targets::SCENE, root = ?state.root, "scene detached");
        Some(state.backend)
    }

    /// The root of the attached scene, if any.
    pub fn scene_root(&self) -> Option<ElementId> {
        self.scene.as_ref().map(|state| state.root)
    }

    pub(crate) fn scene_backend(&mut self) -> Option<&mut (dyn SceneBackend + 'static)> {
        self.scene.as_mut().map(|state| state.backend.as_mut())
    }

    pub(crate) fn scene_set_position(&mut self, id: ElementId, position: Point) {
        if let Some(node) = self.render_node(id) {
            if let Some(scene) = self.scene_backend() {
                scene.set_position(node, position);
            }
        }
    }

    pub(crate) fn scene_set_enabled(&mut self, id: ElementId, enabled: bool) {
        if let Some(node) = self.render_node(id) {
            if let Some(scene) = self.scene_backend() {
                scene.set_enabled(node, enabled);
            }
        }
    }

    /// Give a newly added element nodes, if its container is in the scene.
    pub(crate) fn scene_attach_subtree(&mut self, id: ElementId) {
        let Some(parent) = self.parent(id).ok().flatten() else {
            return;
        };
        let Some(parent_node) = self.render_node(parent) else {
            return;
        };
        let Some(mut state) = self.scene.take() else {
            return;
        };

        self.create_render_nodes(state.backend.as_mut(), id, Some(parent_node));

        // Keep scene stacking in line with the container's sequence.
        let in_front = self.children(parent).ok().and_then(|children| {
            let index = children.iter().position(|child| *child == id)?;
            index.checked_sub(1).map(|front| children[front])
        });
        if let (Some(node), Some(sibling)) = (
            self.render_node(id),
            in_front.and_then(|sibling| self.render_node(sibling)),
        ) {
            state.backend.place_below(node, sibling);
        }
        self.scene = Some(state);
    }

    /// Release the nodes of a detached or destroyed subtree.
    pub(crate) fn scene_detach_subtree(&mut self, id: ElementId) {
        if self.render_node(id).is_none() {
            return;
        }
        if let Some(mut state) = self.scene.take() {
            self.destroy_render_nodes(state.backend.as_mut(), id);
            self.scene = Some(state);
        }
    }

    fn create_render_nodes(&mut self, backend: &mut dyn SceneBackend, id: ElementId, parent: Option<RenderNodeId>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let render_node = match node.element.as_deref() {
            Some(element) => element.create_render_node(TreeView::new(self, id), backend, parent),
            None => backend.create_tree(parent, node.base.position, node.base.visible),
        };
        tracing::trace!(target: targets::SCENE, ?id, ?render_node, "render node created");

        let children = match self.nodes.get_mut(id) {
            Some(node) => {
                node.base.render_node = Some(render_node);
                node.container.as_ref().map(|state| state.children.clone()).unwrap_or_default()
            }
            None => return,
        };
        // Back to front, so later nodes stack on top.
        for child in children.into_iter().rev() {
            self.create_render_nodes(backend, child, Some(render_node));
        }
    }

    fn destroy_render_nodes(&mut self, backend: &mut dyn SceneBackend, id: ElementId) {
        let children = self
            .nodes
            .get(id)
            .and_then(|node| node.container.as_ref())
            .map(|state| state.children.clone())
            .unwrap_or_default();
        for child in children {
            self.destroy_render_nodes(backend, child);
        }
        if let Some(render_node) = self.nodes.get_mut(id).and_then(|node| node.base.render_node.take()) {
            backend.destroy_node(render_node);
            tracing::trace!(target: targets::SCENE, ?id, ?render_node, "render node destroyed");
        }
    }
}
