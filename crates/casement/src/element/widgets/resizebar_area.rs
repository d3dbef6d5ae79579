//! One grabbable area of a resize bar.

use casement_core::{Bounds, RenderNodeId};

use super::Buffer;
use super::window::{Edges, defer_to_window};
use crate::element::{ButtonEvent, ButtonEventKind, Element, ElementContext, SceneBackend, TreeView};
use crate::graphics::{self, ImageBuffer, RgbaImage};
use crate::style::ResizeBarStyle;

/// A slice of the resize bar that starts an interactive resize along
/// `edges` when pressed.
#[derive(Debug)]
pub struct ResizeBarArea {
    buffer: Buffer,
    edges: Edges,
    released_image: Option<ImageBuffer>,
    pressed_image: Option<ImageBuffer>,
    pressed: bool,
}

impl ResizeBarArea {
    pub fn new(edges: Edges) -> Self {
        Self {
            buffer: Buffer::default(),
            edges,
            released_image: None,
            pressed_image: None,
            pressed: false,
        }
    }

    #[inline]
    pub fn edges(&self) -> Edges {
        self.edges
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Redraw from the band `[position, position + width)` of the bar background.
    pub fn redraw(
        &mut self,
        cx: &mut ElementContext<'_>,
        background: &RgbaImage,
        position: i32,
        width: i32,
        style: &ResizeBarStyle,
    ) {
        let draw = |raised: bool| {
            let mut image = graphics::crop(background, position, 0, width.max(0) as u32, style.height.max(0) as u32);
            graphics::bezel(&mut image, style.bezel_width, raised);
            ImageBuffer::new(image)
        };
        self.released_image = Some(draw(true));
        self.pressed_image = Some(draw(false));
        self.apply(cx);
    }

    fn apply(&mut self, cx: &mut ElementContext<'_>) {
        let image = if self.pressed { self.pressed_image.clone() } else { self.released_image.clone() };
        self.buffer.set_image(cx, image);
    }
}

impl Element for ResizeBarArea {
    fn dimensions(&self, _view: TreeView<'_>) -> Bounds {
        self.buffer.bounds()
    }

    fn create_render_node(
        &self,
        view: TreeView<'_>,
        scene: &mut dyn SceneBackend,
        parent: Option<RenderNodeId>,
    ) -> RenderNodeId {
        self.buffer.render_node(view, scene, parent)
    }

    fn pointer_button(&mut self, cx: &mut ElementContext<'_>, event: &ButtonEvent) -> bool {
        if !event.button.is_primary() {
            return false;
        }
        match event.kind {
            ButtonEventKind::Down => {
                self.pressed = true;
                self.apply(cx);
                let edges = self.edges;
                defer_to_window(cx, move |window, cx| window.request_resize(cx, edges));
            }
            ButtonEventKind::Up => {
                self.pressed = false;
                self.apply(cx);
            }
            ButtonEventKind::Click | ButtonEventKind::DoubleClick => {}
        }
        true
    }
}
