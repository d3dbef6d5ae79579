//! Window content: the client side of a window.
//!
//! The toolkit does not know what a window shows. A [`Content`]
//! implementation (typically an adapter for a client surface) answers size
//! requests with a serial and later reports the size it committed at that
//! serial. [`ContentElement`] places it in the element tree.

use std::sync::Arc;

use parking_lot::Mutex;

use casement_core::logging::targets;
use casement_core::{Bounds, Serial, Size};

use crate::element::{Element, ElementContext, TreeView};

/// What a window needs from the thing it decorates.
pub trait Content {
    /// Ask the client to close.
    fn request_close(&mut self);

    /// Ask the client to resize. The returned serial identifies the request;
    /// the commit that honours it reports the same serial.
    fn request_size(&mut self, width: i32, height: i32) -> Serial;

    fn set_activated(&mut self, activated: bool);

    /// The client's current size.
    fn size(&self) -> Size;
}

/// A size the content committed, with the serial it answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub serial: Serial,
    pub size: Size,
}

/// Leaf element wrapping a [`Content`].
///
/// Its dimensions are the last committed size, or the content's own size
/// before the first commit.
pub struct ContentElement {
    content: Box<dyn Content>,
    committed: Option<Commit>,
}

impl ContentElement {
    pub fn new(content: Box<dyn Content>) -> Self {
        Self { content, committed: None }
    }

    pub fn content(&self) -> &dyn Content {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> &mut dyn Content {
        self.content.as_mut()
    }

    pub fn committed(&self) -> Option<Commit> {
        self.committed
    }

    pub fn size(&self) -> Size {
        match self.committed {
            Some(commit) => commit.size,
            None => self.content.size(),
        }
    }

    /// Record the size the client committed at `serial`.
    pub fn commit_size(&mut self, cx: &mut ElementContext<'_>, serial: Serial, width: i32, height: i32) {
        let size = Size::new(width, height);
        tracing::trace!(target: targets::WINDOW, %serial, width, height, "content committed");
        let resized = self.size() != size;
        self.committed = Some(Commit { serial, size });
        if resized {
            cx.invalidate_parent();
        }
    }
}

impl std::fmt::Debug for ContentElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentElement")
            .field("size", &self.size())
            .field("committed", &self.committed)
            .finish_non_exhaustive()
    }
}

impl Element for ContentElement {
    fn dimensions(&self, _view: TreeView<'_>) -> Bounds {
        Bounds::from_size(self.size())
    }
}

// ============================================================================
// Fake content
// ============================================================================

/// What a [`FakeContent`] has been asked to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeContentState {
    pub size: Size,
    pub activated: bool,
    pub close_requests: usize,
    /// Every size request, in order, with the serial it was answered with.
    pub size_requests: Vec<(Serial, Size)>,
    /// The serial handed out last.
    pub serial: Serial,
}

/// A [`Content`] that records requests instead of talking to a client.
///
/// Clones share state, so a test can keep one while the window owns
/// another. Serials start at 1 and increase by one per size request.
#[derive(Debug, Clone, Default)]
pub struct FakeContent {
    state: Arc<Mutex<FakeContentState>>,
}

impl FakeContent {
    pub fn new(width: i32, height: i32) -> Self {
        let content = Self::default();
        content.state.lock().size = Size::new(width, height);
        content
    }

    /// Start serials after `serial` instead of 0.
    pub fn with_serial(self, serial: Serial) -> Self {
        self.state.lock().serial = serial;
        self
    }

    pub fn state(&self) -> FakeContentState {
        self.state.lock().clone()
    }

    /// The most recent size request.
    pub fn last_request(&self) -> Option<(Serial, Size)> {
        self.state.lock().size_requests.last().copied()
    }

    /// Change the client's own size, as a client-initiated resize would.
    pub fn set_size(&self, width: i32, height: i32) {
        self.state.lock().size = Size::new(width, height);
    }
}

impl Content for FakeContent {
    fn request_close(&mut self) {
        self.state.lock().close_requests += 1;
    }

    fn request_size(&mut self, width: i32, height: i32) -> Serial {
        let mut state = self.state.lock();
        state.serial = state.serial.next();
        let serial = state.serial;
        state.size_requests.push((serial, Size::new(width, height)));
        serial
    }

    fn set_activated(&mut self, activated: bool) {
        self.state.lock().activated = activated;
    }

    fn size(&self) -> Size {
        self.state.lock().size
    }
}
