//! Per-node state kept by the tree on behalf of every element.

use casement_core::{ElementId, Point, RenderNodeId};

/// State common to every element.
///
/// Widgets never own this directly; the [`ElementTree`](super::ElementTree)
/// keeps one per node and exposes it through the tree and
/// [`ElementContext`](super::ElementContext).
#[derive(Debug, Clone)]
pub struct ElementBase {
    /// Position relative to the parent container's origin.
    pub(crate) position: Point,
    pub(crate) visible: bool,
    /// Owning container; a back-reference only.
    pub(crate) parent: Option<ElementId>,
    /// Node in the attached scene, if any.
    pub(crate) render_node: Option<RenderNodeId>,
    /// Last pointer position delivered to this element, in its own coordinates.
    pub(crate) last_pointer: Option<PointerSample>,
    pub(crate) type_name: &'static str,
}

impl ElementBase {
    pub(crate) fn new(type_name: &'static str) -> Self {
        Self {
            position: Point::ZERO,
            visible: false,
            parent: None,
            render_node: None,
            last_pointer: None,
            type_name,
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[inline]
    pub fn render_node(&self) -> Option<RenderNodeId> {
        self.render_node
    }

    /// Short type name of the element, without module path.
    pub fn type_name(&self) -> &'static str {
        short_type_name(self.type_name)
    }
}

/// A pointer position with its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerSample {
    pub x: i32,
    pub y: i32,
    pub time_msec: u32,
}

/// Child list and pointer focus of a container node.
#[derive(Debug, Clone, Default)]
pub(crate) struct ContainerState {
    /// Children front to back; index 0 is topmost.
    pub(crate) children: Vec<ElementId>,
    /// The child that accepted the last pointer motion.
    pub(crate) pointer_focus: Option<ElementId>,
    /// The child that accepted the last primary Down. It keeps receiving
    /// primary button events until the next Down, wherever the pointer is.
    pub(crate) button_grab: Option<ElementId>,
}

pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    // Strip generics first so "a::B<c::D>" yields "B".
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
