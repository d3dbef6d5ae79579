//! Push button.
//!
//! A [`Button`] tracks two facts about the pointer: whether it is inside
//! the button and whether the primary button is held down. The pressed
//! image shows only while both hold; otherwise the released image does.
//!
//! | inside | pressed | shows    |
//! |--------|---------|----------|
//! | no     | no      | released |
//! | yes    | no      | released |
//! | yes    | yes     | pressed  |
//! | no     | yes     | released |
//!
//! A click fires [`Button::clicked`] (and the click handler, if any) only
//! while the pointer is inside.

use casement_core::logging::targets;
use casement_core::{Bounds, PreconditionViolation, RenderNodeId, Result, Signal};

use super::Buffer;
use crate::element::{ButtonEvent, ButtonEventKind, Element, ElementContext, SceneBackend, TreeView};
use crate::graphics::ImageBuffer;

/// Callback run on click with the button's context.
pub type ClickHandler = Box<dyn FnMut(&mut ElementContext<'_>)>;

#[derive(Default)]
pub struct Button {
    buffer: Buffer,
    released_image: Option<ImageBuffer>,
    pressed_image: Option<ImageBuffer>,
    pressed: bool,
    pointer_inside: bool,
    on_click: Option<ClickHandler>,
    /// Emitted on every click inside the button.
    pub clicked: Signal<()>,
}

impl Button {
    /// A button without images. It is empty until [`set`](Self::set) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A button showing `released`, and `pressed` while held.
    pub fn with_images(released: ImageBuffer, pressed: ImageBuffer) -> Result<Self> {
        check_sizes(&released, &pressed)?;
        let buffer = Buffer::new(Some(released.clone()));
        Ok(Self {
            buffer,
            released_image: Some(released),
            pressed_image: Some(pressed),
            ..Self::default()
        })
    }

    /// Run `handler` on every click, after [`clicked`](Self::clicked) is emitted.
    ///
    /// The handler runs while the button's ancestors are busy; use
    /// [`ElementContext::defer`] to reach them.
    pub fn with_click_handler(mut self, handler: impl FnMut(&mut ElementContext<'_>) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Replace both images. They must be of equal size.
    pub fn set(&mut self, cx: &mut ElementContext<'_>, released: ImageBuffer, pressed: ImageBuffer) -> Result<()> {
        check_sizes(&released, &pressed)?;
        self.released_image = Some(released);
        self.pressed_image = Some(pressed);
        self.apply_state(cx);
        Ok(())
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    #[inline]
    pub fn is_pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// The image currently shown.
    pub fn displayed_image(&self) -> Option<&ImageBuffer> {
        self.buffer.image()
    }

    fn apply_state(&mut self, cx: &mut ElementContext<'_>) {
        let image = if self.pressed && self.pointer_inside {
            self.pressed_image.clone()
        } else {
            self.released_image.clone()
        };
        self.buffer.set_image(cx, image);
    }

    fn click(&mut self, cx: &mut ElementContext<'_>) {
        tracing::debug!(target: targets::INPUT, id = ?cx.id(), "button clicked");
        self.clicked.emit(());
        if let Some(handler) = self.on_click.as_mut() {
            handler(cx);
        }
    }
}

fn check_sizes(released: &ImageBuffer, pressed: &ImageBuffer) -> Result<()> {
    if released.size() != pressed.size() {
        return Err(PreconditionViolation::MismatchedButtonImages.into());
    }
    Ok(())
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("pressed", &self.pressed)
            .field("pointer_inside", &self.pointer_inside)
            .field("clicked", &self.clicked)
            .finish_non_exhaustive()
    }
}

impl Element for Button {
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

    fn pointer_motion(&mut self, cx: &mut ElementContext<'_>, _x: i32, _y: i32, _time_msec: u32) -> bool {
        if !self.pointer_inside {
            self.pointer_inside = true;
            self.apply_state(cx);
        }
        true
    }

    fn pointer_button(&mut self, cx: &mut ElementContext<'_>, event: &ButtonEvent) -> bool {
        if !event.button.is_primary() {
            return false;
        }
        match event.kind {
            ButtonEventKind::Down => {
                self.pressed = true;
                self.apply_state(cx);
            }
            ButtonEventKind::Up => {
                self.pressed = false;
                self.apply_state(cx);
            }
            ButtonEventKind::Click => {
                if self.pointer_inside {
                    self.click(cx);
                }
            }
            ButtonEventKind::DoubleClick => {}
        }
        true
    }

    fn pointer_leave(&mut self, cx: &mut ElementContext<'_>) {
        cx.super_pointer_leave();
        self.pointer_inside = false;
        self.apply_state(cx);
    }
}
