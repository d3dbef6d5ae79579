//! Casement - a retained-mode element toolkit for compositor window decorations.
//!
//! Casement keeps window decorations as a tree of positioned elements. The
//! compositor feeds pointer input into the tree and mirrors it into its
//! scene graph; the toolkit decides what was hit, keeps buttons and bars in
//! the right state, and holds window moves back until the client has
//! redrawn at the size that goes with them.
//!
//! # Crates
//!
//! - `casement-core`: ids, errors, geometry, serials, signals and tasks
//! - `casement`: the element tree, the decoration widgets and their styles
//!
//! # Example
//!
//! ```
//! use casement::prelude::*;
//!
//! let mut tree = ElementTree::new();
//! let content = FakeContent::new(640, 480);
//! let window = Window::create(&mut tree, Box::new(content), &WindowStyle::default()).unwrap();
//! tree.set_visible(window, true).unwrap();
//!
//! let bounds = tree.dimensions(window).unwrap();
//! assert_eq!(bounds.width(), 642);
//! ```

pub use casement_core::*;

pub mod element;
pub mod graphics;
pub mod prelude;
pub mod style;
