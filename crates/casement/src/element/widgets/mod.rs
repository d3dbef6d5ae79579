//! The decoration widget set.
//!
//! Widgets are [`Element`](super::Element) implementations built by
//! composition: an image-backed leaf embeds a [`Buffer`], a clickable one a
//! [`Button`], and a container that stacks its children a [`BoxLayout`].
//!
//! - [`Window`]: bordered container around title bar, content and resize bar
//! - [`TitleBar`], [`TitleBarTitle`], [`TitleBarButton`]
//! - [`ResizeBar`], [`ResizeBarArea`]
//! - [`ContentElement`]: places a client surface, seen through [`Content`]

mod box_layout;
mod buffer;
mod button;
mod content;
mod pending;
mod resizebar;
mod resizebar_area;
mod titlebar;
mod titlebar_button;
mod titlebar_title;
mod window;

pub use box_layout::{BoxLayout, LayoutHook, Orientation};
pub use buffer::Buffer;
pub use button::{Button, ClickHandler};
pub use content::{Commit, Content, ContentElement, FakeContent, FakeContentState};
pub use pending::{MAX_PENDING, PendingUpdate};
pub use resizebar::ResizeBar;
pub use resizebar_area::ResizeBarArea;
pub use titlebar::TitleBar;
pub use titlebar_button::{TitleBarButton, TitleBarButtonKind};
pub use titlebar_title::TitleBarTitle;
pub use window::{Edges, Window, WindowHost};
