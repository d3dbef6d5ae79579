//! Prelude module for Casement.
//!
//! ```ignore
//! use casement::prelude::*;
//! ```

// ============================================================================
// Core
// ============================================================================

pub use casement_core::{Bounds, ElementId, Point, Result, Serial, Signal, Size, ToolkitError};

// ============================================================================
// Element Tree
// ============================================================================

pub use crate::element::{
    ButtonEvent, ButtonEventKind, Element, ElementContext, ElementTree, InsertAt, PointerButton,
    SceneBackend, TreeView,
};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::element::widgets::{
    BoxLayout, Button, Content, ContentElement, Edges, FakeContent, Orientation, ResizeBar, TitleBar,
    Window, WindowHost,
};

// ============================================================================
// Styles and Images
// ============================================================================

pub use crate::graphics::ImageBuffer;
pub use crate::style::{Fill, WindowStyle};
