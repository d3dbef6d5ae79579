//! The title band of a title bar.

use casement_core::{Bounds, RenderNodeId};

use super::Buffer;
use super::window::defer_to_window;
use crate::element::{ButtonEvent, ButtonEventKind, Element, ElementContext, SceneBackend, TreeView};
use crate::graphics::{self, ImageBuffer, RgbaImage};
use crate::style::TitleBarStyle;

/// Leaf showing the window title on a slice of the title bar background.
///
/// Pressing it with the primary button starts an interactive move of the
/// window it belongs to.
#[derive(Debug, Default)]
pub struct TitleBarTitle {
    buffer: Buffer,
    focused: Option<ImageBuffer>,
    blurred: Option<ImageBuffer>,
    activated: bool,
    text: String,
}

impl TitleBarTitle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redraw from the band `[position, position + width)` of the title bar
    /// backgrounds.
    pub fn redraw(
        &mut self,
        cx: &mut ElementContext<'_>,
        focused_background: &RgbaImage,
        blurred_background: &RgbaImage,
        position: i32,
        width: i32,
        style: &TitleBarStyle,
    ) {
        self.focused = Some(draw_title(focused_background, position, width, style));
        self.blurred = Some(draw_title(blurred_background, position, width, style));
        self.apply(cx);
    }

    pub fn set_activated(&mut self, cx: &mut ElementContext<'_>, activated: bool) {
        self.activated = activated;
        self.apply(cx);
    }

    #[inline]
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The image currently shown.
    pub fn displayed_image(&self) -> Option<&ImageBuffer> {
        self.buffer.image()
    }

    fn apply(&mut self, cx: &mut ElementContext<'_>) {
        let image = if self.activated { self.focused.clone() } else { self.blurred.clone() };
        self.buffer.set_image(cx, image);
    }
}

fn draw_title(background: &RgbaImage, position: i32, width: i32, style: &TitleBarStyle) -> ImageBuffer {
    let mut title = graphics::crop(background, position, 0, width.max(0) as u32, style.height.max(0) as u32);
    graphics::bezel(&mut title, style.bezel_width, true);
    ImageBuffer::new(title)
}

impl Element for TitleBarTitle {
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
        if event.kind == ButtonEventKind::Down {
            defer_to_window(cx, |window, cx| window.request_move(cx));
        }
        true
    }
}
