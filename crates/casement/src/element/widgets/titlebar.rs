//! Window title bar.
//!
//! A horizontal box holding, front to back, the minimize button, the title
//! and the close button. [`TitleBar::set_width`] adapts it to the width of
//! the window content:
//!
//! * the close button shows once the bar is wider than three heights,
//! * the minimize button shows once it is wider than four heights,
//! * the title takes whatever remains between them.

use casement_core::logging::targets;
use casement_core::{ElementId, Result};

use super::window::release_partial;
use super::{BoxLayout, Orientation, TitleBarButton, TitleBarButtonKind, TitleBarTitle};
use crate::element::{Element, ElementContext, ElementTree, InsertAt};
use crate::graphics::{self, RgbaImage};
use crate::style::TitleBarStyle;

#[derive(Debug)]
pub struct TitleBar {
    layout: BoxLayout,
    style: TitleBarStyle,
    width: i32,
    activated: bool,
    minimize: ElementId,
    title: ElementId,
    close: ElementId,
}

impl TitleBar {
    /// Build a title bar with its buttons and title in `tree`.
    ///
    /// The bar starts hidden and zero wide; its children are visible.
    pub fn create(tree: &mut ElementTree, style: &TitleBarStyle) -> Result<ElementId> {
        let mut created = Vec::new();
        let result = Self::build(tree, style, &mut created);
        if result.is_err() {
            release_partial(tree, created);
        }
        result
    }

    fn build(tree: &mut ElementTree, style: &TitleBarStyle, created: &mut Vec<ElementId>) -> Result<ElementId> {
        let minimize = tree.insert_element(TitleBarButton::new(TitleBarButtonKind::Minimize));
        created.push(minimize);
        let title = tree.insert_element(TitleBarTitle::new());
        created.push(title);
        let close = tree.insert_element(TitleBarButton::new(TitleBarButtonKind::Close));
        created.push(close);

        let bar = tree.insert_container(TitleBar {
            layout: BoxLayout::new(Orientation::Horizontal, style.margin.width),
            style: *style,
            width: 0,
            activated: false,
            minimize,
            title,
            close,
        });
        created.push(bar);

        for child in [minimize, title, close] {
            tree.add(bar, child, InsertAt::Back)?;
            tree.set_visible(child, true)?;
        }
        Ok(bar)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn minimize_button(&self) -> ElementId {
        self.minimize
    }

    pub fn title(&self) -> ElementId {
        self.title
    }

    pub fn close_button(&self) -> ElementId {
        self.close
    }

    /// Re-flow the bar for `width`. Nothing is redrawn if the width is unchanged.
    pub fn set_width(&mut self, cx: &mut ElementContext<'_>, width: i32) {
        if self.width == width {
            return;
        }
        self.width = width;
        let style = self.style;
        let height = style.height;
        let margin = style.margin.width;

        let focused = background(width, &style, true);
        let blurred = background(width, &style, false);

        let show_close = 3 * height < width;
        let show_minimize = 4 * height < width;
        let close_position = if show_close { width - height } else { width };
        let title_position = if show_minimize { height + margin } else { 0 };
        let title_end = if show_close { close_position - margin } else { width };
        let title_width = (title_end - title_position).max(0);
        tracing::debug!(
            target: targets::WINDOW,
            width,
            show_minimize,
            show_close,
            title_position,
            title_width,
            "title bar re-flowed"
        );

        let result = cx.tree().with::<TitleBarTitle, _>(self.title, |title, cx| {
            title.redraw(cx, &focused, &blurred, title_position, title_width, &style)
        });
        log_failure("redraw title", result);

        for (button, shown, position) in [(self.minimize, show_minimize, 0), (self.close, show_close, close_position)] {
            if shown {
                let result = cx.tree().with::<TitleBarButton, _>(button, |button, cx| {
                    button.redraw(cx, &focused, &blurred, position, &style)
                });
                log_failure("redraw title bar button", result.and_then(|redrawn| redrawn));
            }
            log_failure("show title bar button", cx.tree().set_visible(button, shown));
        }

        cx.invalidate();
    }

    /// Switch between the focused and blurred look.
    pub fn set_activated(&mut self, cx: &mut ElementContext<'_>, activated: bool) {
        if self.activated == activated {
            return;
        }
        self.activated = activated;
        let result = cx.tree().with::<TitleBarTitle, _>(self.title, |title, cx| title.set_activated(cx, activated));
        log_failure("activate title", result);
        for button in [self.minimize, self.close] {
            let result = cx
                .tree()
                .with::<TitleBarButton, _>(button, |button, cx| button.set_activated(cx, activated));
            log_failure("activate title bar button", result);
        }
    }

    pub fn set_title(&mut self, cx: &mut ElementContext<'_>, text: &str) {
        let result = cx.tree().with::<TitleBarTitle, _>(self.title, |title, _| title.set_text(text));
        log_failure("set title", result);
    }
}

/// Paint a full-width background for the bar.
fn background(width: i32, style: &TitleBarStyle, focused: bool) -> RgbaImage {
    let mut image = RgbaImage::new(width.max(0) as u32, style.height.max(0) as u32);
    let fill = if focused { &style.focused_fill } else { &style.blurred_fill };
    graphics::fill(&mut image, fill);
    image
}

fn log_failure<T>(what: &str, result: Result<T>) {
    if let Err(err) = result {
        tracing::error!(target: targets::WINDOW, %err, "{what} failed");
    }
}

impl Element for TitleBar {
    fn update_layout(&mut self, cx: &mut ElementContext<'_>) {
        self.layout.update_layout(cx);
    }
}
