//! Image-backed leaf element.

use casement_core::{Bounds, RenderNodeId};

use crate::element::{Element, ElementContext, SceneBackend, TreeView};
use crate::graphics::ImageBuffer;

/// A leaf showing one image.
///
/// Its dimensions are the image's size; without an image it is empty and
/// cannot be hit. Widgets that paint embed a `Buffer` and delegate to it.
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    image: Option<ImageBuffer>,
}

impl Buffer {
    pub fn new(image: Option<ImageBuffer>) -> Self {
        Self { image }
    }

    pub fn image(&self) -> Option<&ImageBuffer> {
        self.image.as_ref()
    }

    /// Replace the displayed image, releasing the previous one.
    ///
    /// The scene node is updated and, when the size changed, the container
    /// re-lays out.
    pub fn set_image(&mut self, cx: &mut ElementContext<'_>, image: Option<ImageBuffer>) {
        if let (Some(current), Some(new)) = (&self.image, &image) {
            if current.ptr_eq(new) {
                return;
            }
        }
        let resized = self.bounds() != bounds_of(image.as_ref());
        self.image = image;
        cx.update_scene_buffer(self.image.as_ref());
        if resized {
            cx.invalidate_parent();
        }
    }

    pub fn bounds(&self) -> Bounds {
        bounds_of(self.image.as_ref())
    }

    pub(crate) fn render_node(
        &self,
        view: TreeView<'_>,
        scene: &mut dyn SceneBackend,
        parent: Option<RenderNodeId>,
    ) -> RenderNodeId {
        scene.create_buffer(parent, view.position(), view.is_visible(), self.image.as_ref())
    }
}

fn bounds_of(image: Option<&ImageBuffer>) -> Bounds {
    image.map(|image| Bounds::from_size(image.size())).unwrap_or(Bounds::ZERO)
}

impl Element for Buffer {
    fn dimensions(&self, _view: TreeView<'_>) -> Bounds {
        self.bounds()
    }

    fn create_render_node(
        &self,
        view: TreeView<'_>,
        scene: &mut dyn SceneBackend,
        parent: Option<RenderNodeId>,
    ) -> RenderNodeId {
        self.render_node(view, scene, parent)
    }
}
