//! Decorated toplevel window.
//!
//! A [`Window`] is a bordered container around a vertical box holding,
//! front to back, a [`TitleBar`], the [`ContentElement`] and a
//! [`ResizeBar`]. Whenever the box re-lays out, the bars are re-flowed to
//! the width of the content.
//!
//! # Deferred moves
//!
//! When a window is moved and resized at once, the move must wait for the
//! client to redraw at the new size, or the old contents would briefly show
//! at the new position. [`Window::request_position_and_size`] therefore
//! only forwards the size and parks the position in a pending slot keyed by
//! the serial the content answered with. [`Window::on_serial`] applies it
//! once the client has committed at that serial:
//!
//! ```
//! use casement::element::ElementTree;
//! use casement::element::widgets::{FakeContent, Window};
//! use casement::style::WindowStyle;
//! use casement_core::Point;
//!
//! let mut tree = ElementTree::new();
//! let content = FakeContent::new(200, 100);
//! let window = Window::create(&mut tree, Box::new(content.clone()), &WindowStyle::default()).unwrap();
//!
//! let serial = tree
//!     .with::<Window, _>(window, |window, cx| window.request_position_and_size(cx, 10, 20, 300, 150))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(tree.position(window).unwrap(), Point::ZERO);
//!
//! tree.with::<Window, _>(window, |window, cx| window.commit_size(cx, serial, 300, 150))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(tree.position(window).unwrap(), Point::new(10, 20));
//! ```

use std::sync::Arc;

use slotmap::Key;

use casement_core::logging::{span_names, targets};
use casement_core::{Bounds, ElementId, Point, Result, Serial, Signal, Size};

use super::pending::{PendingUpdate, PendingUpdates};
use super::{BoxLayout, Content, ContentElement, Orientation, ResizeBar, TitleBar};
use crate::element::{ButtonEvent, ButtonEventKind, Element, ElementContext, ElementTree, InsertAt, TreeView};
use crate::style::WindowStyle;

bitflags::bitflags! {
    /// Window edges an interactive resize moves.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Edges: u32 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

/// The workspace a window lives in.
///
/// Methods are called while the window is busy handling input, so an
/// implementation that wants to act on the window itself must post to the
/// tree's task queue rather than call into it.
pub trait WindowHost {
    fn activate_window(&self, window: ElementId);

    /// Bring the window to the top of the stacking order.
    fn raise_window(&self, window: ElementId);

    /// Start an interactive move driven by the pointer.
    fn begin_move(&self, window: ElementId);

    /// Start an interactive resize of `edges` driven by the pointer.
    fn begin_resize(&self, window: ElementId, edges: Edges);

    fn minimize(&self, window: ElementId);
}

/// Run `f` on the window enclosing the element of `cx`, once the current
/// operation completes and the window is free again.
pub(crate) fn defer_to_window<F>(cx: &mut ElementContext<'_>, f: F)
where
    F: FnOnce(&mut Window, &mut ElementContext<'_>) + Send + 'static,
{
    let origin = cx.id();
    cx.defer(move |tree| {
        let Some(window) = tree.find_ancestor::<Window>(origin) else {
            tracing::debug!(target: targets::WINDOW, ?origin, "element is not inside a window");
            return;
        };
        if let Err(err) = tree.with::<Window, _>(window, f) {
            tracing::warn!(target: targets::WINDOW, ?window, %err, "cannot forward request to window");
        }
    });
}

/// Destroy the parts of a widget whose construction failed, newest first.
pub(crate) fn release_partial(tree: &mut ElementTree, created: Vec<ElementId>) {
    for id in created.into_iter().rev() {
        if !tree.contains(id) {
            continue;
        }
        if let Err(err) = tree.destroy(id) {
            tracing::warn!(target: targets::TREE, ?id, %err, "cannot release partially built element");
        }
    }
}

pub struct Window {
    layout: ElementId,
    titlebar: ElementId,
    content: ElementId,
    resizebar: ElementId,
    style: WindowStyle,
    title: String,
    activated: bool,
    server_side_decorated: bool,
    host: Option<Arc<dyn WindowHost>>,
    updates: PendingUpdates,
    /// Emitted with the new state when activation changes.
    pub activated_changed: Signal<bool>,
    /// Emitted with the new title when it changes.
    pub title_changed: Signal<String>,
}

impl Window {
    /// Build a decorated window around `content`.
    ///
    /// The window starts hidden, unparented and deactivated, titled
    /// "Unnamed window …". On failure nothing created here is left behind.
    pub fn create(tree: &mut ElementTree, content: Box<dyn Content>, style: &WindowStyle) -> Result<ElementId> {
        let mut created = Vec::new();
        let result = Self::build(tree, content, style, &mut created);
        if let Err(err) = &result {
            tracing::warn!(target: targets::WINDOW, %err, "window creation failed, releasing parts");
            release_partial(tree, created);
        }
        result
    }

    fn build(
        tree: &mut ElementTree,
        content: Box<dyn Content>,
        style: &WindowStyle,
        created: &mut Vec<ElementId>,
    ) -> Result<ElementId> {
        let content = tree.insert_element(ContentElement::new(content));
        created.push(content);
        let titlebar = TitleBar::create(tree, &style.titlebar)?;
        created.push(titlebar);
        let resizebar = ResizeBar::create(tree, &style.resizebar)?;
        created.push(resizebar);

        let layout = tree.insert_container(
            BoxLayout::new(Orientation::Vertical, style.margin.width)
                .with_hook(move |cx| sync_decoration_widths(cx, titlebar, content, resizebar)),
        );
        created.push(layout);

        let window = tree.insert_container(Window {
            layout,
            titlebar,
            content,
            resizebar,
            style: *style,
            title: String::new(),
            activated: false,
            server_side_decorated: true,
            host: None,
            updates: PendingUpdates::new(),
            activated_changed: Signal::new(),
            title_changed: Signal::new(),
        });
        created.push(window);

        tree.add(window, layout, InsertAt::Back)?;
        tree.set_position(layout, Point::new(style.border.width, style.border.width))?;
        tree.set_visible(layout, true)?;
        for part in [titlebar, content, resizebar] {
            tree.add(layout, part, InsertAt::Back)?;
            tree.set_visible(part, true)?;
        }
        tree.with::<Window, _>(window, |window, cx| window.set_title(cx, None))?;

        tracing::debug!(target: targets::WINDOW, ?window, "window created");
        Ok(window)
    }

    // =========================================================================
    // Parts
    // =========================================================================

    pub fn titlebar(&self) -> ElementId {
        self.titlebar
    }

    pub fn content(&self) -> ElementId {
        self.content
    }

    pub fn resizebar(&self) -> ElementId {
        self.resizebar
    }

    /// The vertical box holding title bar, content and resize bar.
    pub fn layout(&self) -> ElementId {
        self.layout
    }

    pub fn set_host(&mut self, host: Option<Arc<dyn WindowHost>>) {
        self.host = host;
    }

    // =========================================================================
    // Title and activation
    // =========================================================================

    /// Set the title. `None` names the window after its id.
    pub fn set_title(&mut self, cx: &mut ElementContext<'_>, title: Option<&str>) {
        let title = match title {
            Some(title) => title.to_owned(),
            None => format!("Unnamed window {:?}", cx.id().data()),
        };
        if title == self.title {
            return;
        }
        self.title = title;

        let text = self.title.clone();
        let result = cx.tree().with::<TitleBar, _>(self.titlebar, |bar, cx| bar.set_title(cx, &text));
        log_failure("set title bar title", result);
        self.title_changed.emit(self.title.clone());
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Activate or deactivate: forwards to the content and the title bar.
    pub fn set_activated(&mut self, cx: &mut ElementContext<'_>, activated: bool) {
        let changed = self.activated != activated;
        self.activated = activated;

        let result = self.with_content(cx, |content| content.set_activated(activated));
        log_failure("activate content", result);
        let result = cx
            .tree()
            .with::<TitleBar, _>(self.titlebar, |bar, cx| bar.set_activated(cx, activated));
        log_failure("activate title bar", result);

        if changed {
            self.activated_changed.emit(activated);
        }
    }

    #[inline]
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Show or hide title bar, resize bar and border.
    pub fn set_server_side_decorated(&mut self, cx: &mut ElementContext<'_>, decorated: bool) {
        if self.server_side_decorated == decorated {
            return;
        }
        self.server_side_decorated = decorated;
        tracing::debug!(target: targets::WINDOW, id = ?cx.id(), decorated, "decorations changed");

        for part in [self.titlebar, self.resizebar] {
            log_failure("toggle decoration", cx.tree().set_visible(part, decorated));
        }
        let border = self.border_width();
        log_failure(
            "move window layout",
            cx.tree().set_position(self.layout, Point::new(border, border)),
        );
        cx.invalidate();
    }

    #[inline]
    pub fn is_server_side_decorated(&self) -> bool {
        self.server_side_decorated
    }

    fn border_width(&self) -> i32 {
        if self.server_side_decorated { self.style.border.width } else { 0 }
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Ask the content to close.
    pub fn request_close(&mut self, cx: &mut ElementContext<'_>) {
        tracing::debug!(target: targets::WINDOW, id = ?cx.id(), "close requested");
        let result = self.with_content(cx, |content| content.request_close());
        log_failure("request close", result);
    }

    pub fn request_minimize(&mut self, cx: &mut ElementContext<'_>) {
        tracing::info!(target: targets::WINDOW, id = ?cx.id(), "minimize requested");
        if let Some(host) = &self.host {
            host.minimize(cx.id());
        }
    }

    /// Start an interactive move.
    pub fn request_move(&mut self, cx: &mut ElementContext<'_>) {
        match &self.host {
            Some(host) => host.begin_move(cx.id()),
            None => tracing::debug!(target: targets::WINDOW, id = ?cx.id(), "move requested without host"),
        }
    }

    /// Start an interactive resize of `edges`.
    pub fn request_resize(&mut self, cx: &mut ElementContext<'_>, edges: Edges) {
        match &self.host {
            Some(host) => host.begin_resize(cx.id(), edges),
            None => tracing::debug!(target: targets::WINDOW, id = ?cx.id(), ?edges, "resize requested without host"),
        }
    }

    /// Ask the content for a new size. The window follows once it commits.
    pub fn request_size(&mut self, cx: &mut ElementContext<'_>, width: i32, height: i32) -> Result<Serial> {
        self.with_content(cx, |content| content.request_size(width, height))
    }

    /// Resize, and move to `(x, y)` once the content has committed the new size.
    ///
    /// Returns the serial the move waits for.
    pub fn request_position_and_size(
        &mut self,
        cx: &mut ElementContext<'_>,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<Serial> {
        let serial = self.request_size(cx, width, height)?;
        let update = PendingUpdate { serial, x, y, width, height };
        if let Some(dropped) = self.updates.push(update) {
            tracing::warn!(
                target: targets::WINDOW,
                id = ?cx.id(),
                dropped = %dropped.serial,
                x = dropped.x,
                y = dropped.y,
                "pending updates exhausted, dropping the oldest"
            );
        }
        tracing::trace!(target: targets::WINDOW, id = ?cx.id(), %serial, x, y, width, height, "update pending");
        Ok(serial)
    }

    // =========================================================================
    // Commits
    // =========================================================================

    /// The content committed at `serial`: apply every pending move issued
    /// at or before it.
    ///
    /// Only the newest of the released moves is applied; older ones were
    /// superseded. Serials must arrive in non-decreasing order.
    pub fn on_serial(&mut self, cx: &mut ElementContext<'_>, serial: Serial) {
        let _span = tracing::trace_span!(target: targets::WINDOW, span_names::SERIAL_RECONCILE).entered();
        let released = self.updates.take_through(serial);
        let Some(newest) = released.last().copied() else {
            return;
        };

        if let Some(exact) = released.iter().find(|update| update.serial == serial) {
            let committed = cx
                .tree()
                .get::<ContentElement>(self.content)
                .map(|content| content.size())
                .unwrap_or_default();
            if committed.width != exact.width || committed.height != exact.height {
                tracing::error!(
                    target: targets::WINDOW,
                    id = ?cx.id(),
                    %serial,
                    requested_width = exact.width,
                    requested_height = exact.height,
                    committed_width = committed.width,
                    committed_height = committed.height,
                    "content committed a different size than requested"
                );
            }
        }

        tracing::debug!(
            target: targets::WINDOW,
            id = ?cx.id(),
            %serial,
            released = released.len(),
            x = newest.x,
            y = newest.y,
            "pending updates applied"
        );
        cx.set_position(Point::new(newest.x, newest.y));
    }

    /// Record the size the content committed at `serial`, then reconcile.
    pub fn commit_size(&mut self, cx: &mut ElementContext<'_>, serial: Serial, width: i32, height: i32) -> Result<()> {
        cx.tree()
            .with::<ContentElement, _>(self.content, |content, cx| content.commit_size(cx, serial, width, height))?;
        self.on_serial(cx, serial);
        Ok(())
    }

    /// The content's size.
    pub fn size(&self, cx: &ElementContext<'_>) -> Size {
        cx.dimensions_of(self.content).size()
    }

    pub fn pending_count(&self) -> usize {
        self.updates.pending_len()
    }

    pub fn available_count(&self) -> usize {
        self.updates.available_len()
    }

    /// Moves still waiting for their serial, oldest first.
    pub fn pending_updates(&self) -> Vec<PendingUpdate> {
        self.updates.iter_pending().copied().collect()
    }

    fn with_content<R>(&self, cx: &mut ElementContext<'_>, f: impl FnOnce(&mut dyn Content) -> R) -> Result<R> {
        cx.tree()
            .with::<ContentElement, _>(self.content, |content, _| f(content.content_mut()))
    }
}

/// Layout hook of the window box: size the bars to the content.
fn sync_decoration_widths(cx: &mut ElementContext<'_>, titlebar: ElementId, content: ElementId, resizebar: ElementId) {
    let width = cx.dimensions_of(content).width();
    let result = cx.tree().with::<TitleBar, _>(titlebar, |bar, cx| bar.set_width(cx, width));
    log_failure("size title bar", result);
    let result = cx.tree().with::<ResizeBar, _>(resizebar, |bar, cx| bar.set_width(cx, width));
    log_failure("size resize bar", result);
}

fn log_failure<T>(what: &str, result: Result<T>) {
    if let Err(err) = result {
        tracing::error!(target: targets::WINDOW, %err, "{what} failed");
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("title", &self.title)
            .field("activated", &self.activated)
            .field("server_side_decorated", &self.server_side_decorated)
            .field("pending", &self.updates.pending_len())
            .finish_non_exhaustive()
    }
}

impl Element for Window {
    fn dimensions(&self, view: TreeView<'_>) -> Bounds {
        let inner = view.super_dimensions();
        let border = self.border_width();
        Bounds::new(inner.left, inner.top, inner.right + border, inner.bottom + border)
    }

    /// A press anywhere activates and raises the window before the event
    /// reaches the element under the pointer.
    fn pointer_button(&mut self, cx: &mut ElementContext<'_>, event: &ButtonEvent) -> bool {
        if event.kind == ButtonEventKind::Down {
            match self.host.clone() {
                Some(host) => {
                    host.activate_window(cx.id());
                    host.raise_window(cx.id());
                }
                None => self.set_activated(cx, true),
            }
        }
        cx.super_pointer_button(event)
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::element::widgets::{FakeContent, MAX_PENDING, TitleBarTitle};

    #[derive(Debug, Default)]
    struct RecordingHost {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingHost {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    impl WindowHost for RecordingHost {
        fn activate_window(&self, _window: ElementId) {
            self.calls.lock().push("activate".into());
        }
        fn raise_window(&self, _window: ElementId) {
            self.calls.lock().push("raise".into());
        }
        fn begin_move(&self, _window: ElementId) {
            self.calls.lock().push("move".into());
        }
        fn begin_resize(&self, _window: ElementId, edges: Edges) {
            self.calls.lock().push(format!("resize {edges:?}"));
        }
        fn minimize(&self, _window: ElementId) {
            self.calls.lock().push("minimize".into());
        }
    }

    fn setup() -> (ElementTree, ElementId, FakeContent) {
        let mut tree = ElementTree::new();
        let content = FakeContent::new(200, 100);
        let window = Window::create(&mut tree, Box::new(content.clone()), &WindowStyle::default()).unwrap();
        tree.set_visible(window, true).unwrap();
        (tree, window, content)
    }

    fn with_window<R>(tree: &mut ElementTree, window: ElementId, f: impl FnOnce(&mut Window, &mut ElementContext<'_>) -> R) -> R {
        tree.with::<Window, _>(window, f).unwrap()
    }

    #[test]
    fn test_parts_are_stacked_vertically() {
        let (tree, window, _) = setup();
        let parts = tree.get::<Window>(window).unwrap();
        let (layout, titlebar, content, resizebar) = (parts.layout(), parts.titlebar(), parts.content(), parts.resizebar());

        assert_eq!(tree.children(window).unwrap(), &[layout]);
        assert_eq!(tree.children(layout).unwrap(), &[titlebar, content, resizebar]);
        assert_eq!(tree.position(layout).unwrap(), Point::new(1, 1));
        assert_eq!(tree.position(titlebar).unwrap(), Point::new(0, 0));
        assert_eq!(tree.position(content).unwrap(), Point::new(0, 23));
        assert_eq!(tree.position(resizebar).unwrap(), Point::new(0, 124));
    }

    #[test]
    fn test_bars_follow_content_width() {
        let (mut tree, window, _) = setup();
        let (titlebar, resizebar) = {
            let parts = tree.get::<Window>(window).unwrap();
            (parts.titlebar(), parts.resizebar())
        };
        assert_eq!(tree.get::<TitleBar>(titlebar).unwrap().width(), 200);
        assert_eq!(tree.get::<ResizeBar>(resizebar).unwrap().width(), 200);
        assert_eq!(tree.dimensions(window).unwrap(), Bounds::new(0, 0, 202, 133));

        let serial = with_window(&mut tree, window, |w, cx| w.request_size(cx, 300, 100)).unwrap();
        with_window(&mut tree, window, |w, cx| w.commit_size(cx, serial, 300, 100)).unwrap();
        assert_eq!(tree.get::<TitleBar>(titlebar).unwrap().width(), 300);
        assert_eq!(tree.get::<ResizeBar>(resizebar).unwrap().width(), 300);
        assert_eq!(tree.dimensions(window).unwrap(), Bounds::new(0, 0, 302, 133));
    }

    #[test]
    fn test_default_title_names_the_window() {
        let (mut tree, window, _) = setup();
        assert!(tree.get::<Window>(window).unwrap().title().starts_with("Unnamed window "));

        let changes = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&changes);
        tree.get::<Window>(window).unwrap().title_changed.connect(move |title: &String| {
            seen.lock().push(title.clone());
        });
        with_window(&mut tree, window, |w, cx| w.set_title(cx, Some("xterm")));
        with_window(&mut tree, window, |w, cx| w.set_title(cx, Some("xterm")));
        assert_eq!(*changes.lock(), vec!["xterm".to_string()]);

        let titlebar = tree.get::<Window>(window).unwrap().titlebar();
        let title = tree.get::<TitleBar>(titlebar).unwrap().title();
        assert_eq!(tree.get::<TitleBarTitle>(title).unwrap().text(), "xterm");
    }

    #[test]
    fn test_activation_reaches_content_and_titlebar() {
        let (mut tree, window, content) = setup();
        let events = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&events);
        tree.get::<Window>(window).unwrap().activated_changed.connect(move |activated: &bool| {
            seen.lock().push(*activated);
        });

        with_window(&mut tree, window, |w, cx| w.set_activated(cx, true));
        assert!(content.state().activated);
        let titlebar = tree.get::<Window>(window).unwrap().titlebar();
        assert!(tree.get::<TitleBar>(titlebar).unwrap().is_activated());

        with_window(&mut tree, window, |w, cx| w.set_activated(cx, false));
        assert!(!content.state().activated);
        assert_eq!(*events.lock(), vec![true, false]);
    }

    #[test]
    fn test_move_waits_for_serial() {
        let (mut tree, window, content) = setup();
        let serial = with_window(&mut tree, window, |w, cx| w.request_position_and_size(cx, 10, 10, 200, 100))
            .unwrap();
        assert_eq!(content.last_request(), Some((serial, Size::new(200, 100))));
        assert_eq!(tree.position(window).unwrap(), Point::ZERO);

        // An older serial releases nothing.
        with_window(&mut tree, window, |w, cx| w.on_serial(cx, Serial::new(serial.get().wrapping_sub(1))));
        assert_eq!(tree.position(window).unwrap(), Point::ZERO);

        with_window(&mut tree, window, |w, cx| w.on_serial(cx, serial));
        assert_eq!(tree.position(window).unwrap(), Point::new(10, 10));
    }

    #[test]
    fn test_newer_serial_supersedes_older_moves() {
        let mut tree = ElementTree::new();
        let content = FakeContent::new(200, 100).with_serial(Serial::new(4));
        let window = Window::create(&mut tree, Box::new(content.clone()), &WindowStyle::default()).unwrap();

        let first = with_window(&mut tree, window, |w, cx| w.request_position_and_size(cx, 10, 10, 200, 100))
            .unwrap();
        let second = with_window(&mut tree, window, |w, cx| w.request_position_and_size(cx, 50, 50, 300, 150))
            .unwrap();
        assert_eq!((first, second), (Serial::new(5), Serial::new(6)));
        assert_eq!(with_window(&mut tree, window, |w, _| w.pending_count()), 2);

        with_window(&mut tree, window, |w, cx| w.commit_size(cx, second, 300, 150)).unwrap();
        assert_eq!(tree.position(window).unwrap(), Point::new(50, 50));
        let (pending, available) = with_window(&mut tree, window, |w, _| (w.pending_count(), w.available_count()));
        assert_eq!((pending, available), (0, MAX_PENDING));
    }

    #[test]
    fn test_later_moves_stay_pending() {
        let (mut tree, window, _) = setup();
        let first = with_window(&mut tree, window, |w, cx| w.request_position_and_size(cx, 1, 1, 10, 10)).unwrap();
        with_window(&mut tree, window, |w, cx| w.request_position_and_size(cx, 2, 2, 20, 20)).unwrap();
        with_window(&mut tree, window, |w, cx| w.request_position_and_size(cx, 3, 3, 30, 30)).unwrap();

        with_window(&mut tree, window, |w, cx| w.commit_size(cx, first, 10, 10)).unwrap();
        assert_eq!(tree.position(window).unwrap(), Point::new(1, 1));
        let pending = with_window(&mut tree, window, |w, _| w.pending_updates());
        assert_eq!(pending.iter().map(|update| update.x).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_mismatched_commit_still_moves() {
        let (mut tree, window, _) = setup();
        let serial = with_window(&mut tree, window, |w, cx| w.request_position_and_size(cx, 7, 8, 300, 300))
            .unwrap();
        with_window(&mut tree, window, |w, cx| w.commit_size(cx, serial, 250, 250)).unwrap();
        assert_eq!(tree.position(window).unwrap(), Point::new(7, 8));
    }

    #[test]
    fn test_pool_is_conserved_when_exhausted() {
        let (mut tree, window, _) = setup();
        for n in 0..(MAX_PENDING as i32 + 6) {
            with_window(&mut tree, window, |w, cx| w.request_position_and_size(cx, n, n, 100, 100)).unwrap();
            let (pending, available) = with_window(&mut tree, window, |w, _| (w.pending_count(), w.available_count()));
            assert_eq!(pending + available, MAX_PENDING);
        }
        let pending = with_window(&mut tree, window, |w, _| w.pending_updates());
        assert_eq!(pending.len(), MAX_PENDING);
        assert_eq!(pending[0].x, 6);
    }

    #[test]
    fn test_press_activates_through_host_first() {
        let (mut tree, window, _) = setup();
        let host = Arc::new(RecordingHost::default());
        let handle: Arc<dyn WindowHost> = host.clone();
        with_window(&mut tree, window, |w, _| w.set_host(Some(handle)));

        // Over the title: x past the minimize button, y inside the bar.
        tree.pointer_motion(window, 100, 10, 0).unwrap();
        tree.pointer_button(window, &ButtonEvent::primary(ButtonEventKind::Down)).unwrap();
        assert_eq!(host.calls(), vec!["activate", "raise", "move"]);
    }

    #[test]
    fn test_press_without_host_activates_window() {
        let (mut tree, window, content) = setup();
        tree.pointer_motion(window, 100, 60, 0).unwrap();
        tree.pointer_button(window, &ButtonEvent::primary(ButtonEventKind::Down)).unwrap();
        assert!(tree.get::<Window>(window).unwrap().is_activated());
        assert!(content.state().activated);
    }

    #[test]
    fn test_undecorated_window_hides_bars() {
        let (mut tree, window, _) = setup();
        with_window(&mut tree, window, |w, cx| w.set_server_side_decorated(cx, false));
        let parts = tree.get::<Window>(window).unwrap();
        let (layout, titlebar, content, resizebar) = (parts.layout(), parts.titlebar(), parts.content(), parts.resizebar());
        assert!(!tree.is_visible(titlebar).unwrap());
        assert!(!tree.is_visible(resizebar).unwrap());
        assert_eq!(tree.position(layout).unwrap(), Point::ZERO);
        assert_eq!(tree.position(content).unwrap(), Point::ZERO);
        assert_eq!(tree.dimensions(window).unwrap(), Bounds::new(0, 0, 200, 100));
    }

    #[test]
    fn test_release_partial_skips_what_it_cannot_destroy() {
        let mut tree = ElementTree::new();
        let busy = tree.insert_element(ContentElement::new(Box::new(FakeContent::new(1, 1))));
        let part = tree.insert_container(BoxLayout::new(Orientation::Vertical, 0));
        let child = tree.insert_element(ContentElement::new(Box::new(FakeContent::new(1, 1))));
        tree.add(part, child, InsertAt::Back).unwrap();

        // `busy` is checked out while the cleanup runs, so destroying it fails.
        tree.with::<ContentElement, _>(busy, |_, cx| release_partial(cx.tree(), vec![busy, part, child]))
            .unwrap();
        assert!(tree.contains(busy));
        assert!(!tree.contains(part));
        assert!(!tree.contains(child));
    }
}
