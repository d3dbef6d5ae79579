//! Linear layout container.

use casement_core::logging::targets;
use casement_core::Point;

use crate::element::{Element, ElementContext};

/// Callback run after each layout pass of a [`BoxLayout`].
pub type LayoutHook = Box<dyn FnMut(&mut ElementContext<'_>)>;

/// Axis along which a [`BoxLayout`] stacks its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// A container that places its visible children edge to edge.
///
/// Children are laid out in sequence order, front first, starting at 0 on
/// the layout axis with `margin` pixels between neighbours. The cross axis
/// position is always 0. Hidden children take no space.
///
/// Insert it with [`ElementTree::insert_container`](crate::element::ElementTree::insert_container).
pub struct BoxLayout {
    orientation: Orientation,
    margin: i32,
    hook: Option<LayoutHook>,
}

impl BoxLayout {
    pub fn new(orientation: Orientation, margin: i32) -> Self {
        Self { orientation, margin, hook: None }
    }

    /// Run `hook` after every layout pass, once children are positioned.
    pub fn with_hook(mut self, hook: impl FnMut(&mut ElementContext<'_>) + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn margin(&self) -> i32 {
        self.margin
    }

    /// Position the visible children of the container `cx` belongs to.
    fn arrange(&self, cx: &mut ElementContext<'_>) {
        let mut offset = 0;
        for child in cx.children() {
            if !cx.tree().is_visible(child).unwrap_or(false) {
                continue;
            }
            let dimensions = cx.dimensions_of(child);
            let position = match self.orientation {
                Orientation::Horizontal => {
                    let position = Point::new(offset - dimensions.left, 0);
                    offset += dimensions.width() + self.margin;
                    position
                }
                Orientation::Vertical => {
                    let position = Point::new(0, offset - dimensions.top);
                    offset += dimensions.height() + self.margin;
                    position
                }
            };
            if let Err(err) = cx.tree().set_position(child, position) {
                tracing::warn!(target: targets::LAYOUT, ?child, %err, "cannot position box child");
            }
        }
    }
}

impl std::fmt::Debug for BoxLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxLayout")
            .field("orientation", &self.orientation)
            .field("margin", &self.margin)
            .field("has_hook", &self.hook.is_some())
            .finish()
    }
}

impl Element for BoxLayout {
    fn update_layout(&mut self, cx: &mut ElementContext<'_>) {
        self.arrange(cx);
        if let Some(hook) = self.hook.as_mut() {
            hook(cx);
        }
        cx.super_update_layout();
    }
}
