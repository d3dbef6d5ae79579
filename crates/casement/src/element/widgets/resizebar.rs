//! Window resize bar.
//!
//! A horizontal box along the bottom of a window: a left corner, the bottom
//! edge, and a right corner. The corners resize along two edges at once and
//! only appear when the bar is wide enough for both of them plus some edge.

use casement_core::logging::targets;
use casement_core::{ElementId, Result};

use super::window::{Edges, release_partial};
use super::{BoxLayout, Orientation, ResizeBarArea};
use crate::element::{Element, ElementContext, ElementTree, InsertAt};
use crate::graphics::{self, RgbaImage};
use crate::style::ResizeBarStyle;

#[derive(Debug)]
pub struct ResizeBar {
    layout: BoxLayout,
    style: ResizeBarStyle,
    width: i32,
    left: ElementId,
    center: ElementId,
    right: ElementId,
}

impl ResizeBar {
    /// Build a resize bar with its three areas in `tree`.
    pub fn create(tree: &mut ElementTree, style: &ResizeBarStyle) -> Result<ElementId> {
        let mut created = Vec::new();
        let result = Self::build(tree, style, &mut created);
        if result.is_err() {
            release_partial(tree, created);
        }
        result
    }

    fn build(tree: &mut ElementTree, style: &ResizeBarStyle, created: &mut Vec<ElementId>) -> Result<ElementId> {
        let left = tree.insert_element(ResizeBarArea::new(Edges::BOTTOM | Edges::LEFT));
        created.push(left);
        let center = tree.insert_element(ResizeBarArea::new(Edges::BOTTOM));
        created.push(center);
        let right = tree.insert_element(ResizeBarArea::new(Edges::BOTTOM | Edges::RIGHT));
        created.push(right);

        let bar = tree.insert_container(ResizeBar {
            layout: BoxLayout::new(Orientation::Horizontal, style.margin.width),
            style: *style,
            width: 0,
            left,
            center,
            right,
        });
        created.push(bar);

        for child in [left, center, right] {
            tree.add(bar, child, InsertAt::Back)?;
            tree.set_visible(child, true)?;
        }
        Ok(bar)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// The areas, left to right.
    pub fn areas(&self) -> [ElementId; 3] {
        [self.left, self.center, self.right]
    }

    /// Re-flow the areas for `width`. Nothing is redrawn if it is unchanged.
    pub fn set_width(&mut self, cx: &mut ElementContext<'_>, width: i32) {
        if self.width == width {
            return;
        }
        self.width = width;
        let style = self.style;
        let corner = style.corner_width;
        let margin = style.margin.width;

        let mut background = RgbaImage::new(width.max(0) as u32, style.height.max(0) as u32);
        graphics::fill(&mut background, &style.fill);

        let show_corners = width > 2 * (corner + margin);
        let layout = if show_corners {
            [
                (self.left, Some((0, corner))),
                (self.center, Some((corner + margin, width - 2 * (corner + margin)))),
                (self.right, Some((width - corner, corner))),
            ]
        } else {
            [(self.left, None), (self.center, Some((0, width))), (self.right, None)]
        };
        tracing::debug!(target: targets::WINDOW, width, show_corners, "resize bar re-flowed");

        for (area, band) in layout {
            if let Some((position, band_width)) = band {
                let result = cx.tree().with::<ResizeBarArea, _>(area, |area, cx| {
                    area.redraw(cx, &background, position, band_width, &style)
                });
                if let Err(err) = result {
                    tracing::error!(target: targets::WINDOW, ?area, %err, "cannot redraw resize bar area");
                }
            }
            if let Err(err) = cx.tree().set_visible(area, band.is_some()) {
                tracing::error!(target: targets::WINDOW, ?area, %err, "cannot show resize bar area");
            }
        }

        cx.invalidate();
    }
}

impl Element for ResizeBar {
    fn update_layout(&mut self, cx: &mut ElementContext<'_>) {
        self.layout.update_layout(cx);
    }
}
