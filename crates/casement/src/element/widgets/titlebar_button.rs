//! Square title bar buttons.

use casement_core::logging::targets;
use casement_core::{Bounds, RenderNodeId, Result};

use super::Button;
use super::window::defer_to_window;
use crate::element::{ButtonEvent, Element, ElementContext, SceneBackend, TreeView};
use crate::graphics::{self, ImageBuffer, RgbaImage};
use crate::style::TitleBarStyle;

/// What a title bar button does, and which icon it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleBarButtonKind {
    Minimize,
    Close,
}

impl TitleBarButtonKind {
    fn draw_icon(self, image: &mut RgbaImage, color: u32) {
        match self {
            TitleBarButtonKind::Minimize => graphics::minimize_icon(image, color),
            TitleBarButtonKind::Close => graphics::close_icon(image, color),
        }
    }
}

/// A [`Button`] painted on a square cut from the title bar background.
///
/// Clicking it asks the enclosing window to minimize or close.
#[derive(Debug)]
pub struct TitleBarButton {
    kind: TitleBarButtonKind,
    button: Button,
    focused_released: Option<ImageBuffer>,
    focused_pressed: Option<ImageBuffer>,
    blurred: Option<ImageBuffer>,
    activated: bool,
}

impl TitleBarButton {
    pub fn new(kind: TitleBarButtonKind) -> Self {
        let button = Button::new().with_click_handler(move |cx| match kind {
            TitleBarButtonKind::Minimize => defer_to_window(cx, |window, cx| window.request_minimize(cx)),
            TitleBarButtonKind::Close => defer_to_window(cx, |window, cx| window.request_close(cx)),
        });
        Self {
            kind,
            button,
            focused_released: None,
            focused_pressed: None,
            blurred: None,
            activated: false,
        }
    }

    #[inline]
    pub fn kind(&self) -> TitleBarButtonKind {
        self.kind
    }

    pub fn button(&self) -> &Button {
        &self.button
    }

    /// Redraw from the square at `position` of the title bar backgrounds.
    pub fn redraw(
        &mut self,
        cx: &mut ElementContext<'_>,
        focused_background: &RgbaImage,
        blurred_background: &RgbaImage,
        position: i32,
        style: &TitleBarStyle,
    ) -> Result<()> {
        let draw = |background: &RgbaImage, pressed: bool, color: u32| {
            let size = style.height.max(0) as u32;
            let mut image = graphics::crop(background, position, 0, size, size);
            graphics::bezel(&mut image, style.bezel_width, !pressed);
            self.kind.draw_icon(&mut image, color);
            ImageBuffer::new(image)
        };
        self.focused_released = Some(draw(focused_background, false, style.focused_text_color));
        self.focused_pressed = Some(draw(focused_background, true, style.focused_text_color));
        self.blurred = Some(draw(blurred_background, false, style.blurred_text_color));
        self.apply(cx)
    }

    pub fn set_activated(&mut self, cx: &mut ElementContext<'_>, activated: bool) {
        self.activated = activated;
        if let Err(err) = self.apply(cx) {
            tracing::error!(target: targets::WINDOW, kind = ?self.kind, %err, "cannot switch button images");
        }
    }

    fn apply(&mut self, cx: &mut ElementContext<'_>) -> Result<()> {
        let released = if self.activated { &self.focused_released } else { &self.blurred };
        match (released.clone(), self.focused_pressed.clone()) {
            (Some(released), Some(pressed)) => self.button.set(cx, released, pressed),
            _ => Ok(()),
        }
    }
}

impl Element for TitleBarButton {
    fn dimensions(&self, view: TreeView<'_>) -> Bounds {
        self.button.dimensions(view)
    }

    fn create_render_node(
        &self,
        view: TreeView<'_>,
        scene: &mut dyn SceneBackend,
        parent: Option<RenderNodeId>,
    ) -> RenderNodeId {
        self.button.create_render_node(view, scene, parent)
    }

    fn pointer_motion(&mut self, cx: &mut ElementContext<'_>, x: i32, y: i32, time_msec: u32) -> bool {
        self.button.pointer_motion(cx, x, y, time_msec)
    }

    fn pointer_button(&mut self, cx: &mut ElementContext<'_>, event: &ButtonEvent) -> bool {
        self.button.pointer_button(cx, event)
    }

    fn pointer_leave(&mut self, cx: &mut ElementContext<'_>) {
        self.button.pointer_leave(cx);
    }
}
