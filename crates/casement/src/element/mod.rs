//! Element tree for Casement.
//!
//! This module provides the retained-mode core the decorations are built from:
//!
//! - [`ElementTree`]: arena owning every element, with containment and settling
//! - [`Element`] trait: overridable geometry, input and layout behaviors
//! - [`ElementContext`] / [`TreeView`]: an element's access to the tree
//! - Pointer routing: motion picks a focused child, buttons follow focus
//! - [`SceneBackend`]: mirror of the tree as render nodes
//! - [`widgets`]: box layout, buttons, title bar, resize bar and window
//!
//! # Example
//!
//! ```
//! use casement::element::{ButtonEvent, ButtonEventKind, ElementTree};
//! use casement::element::widgets::{FakeContent, Window};
//! use casement::style::WindowStyle;
//!
//! let mut tree = ElementTree::new();
//! let content = FakeContent::new(300, 200);
//! let window = Window::create(&mut tree, Box::new(content.clone()), &WindowStyle::default()).unwrap();
//! tree.set_visible(window, true).unwrap();
//!
//! // Click the close button in the top-right corner.
//! tree.pointer_motion(window, 290, 10, 0).unwrap();
//! for kind in [ButtonEventKind::Down, ButtonEventKind::Up, ButtonEventKind::Click] {
//!     tree.pointer_button(window, &ButtonEvent::primary(kind)).unwrap();
//! }
//! assert_eq!(content.state().close_requests, 1);
//! ```

mod base;
mod container;
mod context;
mod events;
mod invalidation;
mod scene;
mod traits;
mod tree;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use base::{ElementBase, PointerSample};
pub use context::{ElementContext, TreeView};
pub use events::{ButtonEvent, ButtonEventKind, PointerButton};
pub use scene::SceneBackend;
pub use traits::{AsAny, Element};
pub use tree::{ElementTree, InsertAt};
