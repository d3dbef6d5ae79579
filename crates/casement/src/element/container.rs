//! Base container behavior: geometry aggregation and pointer dispatch.
//!
//! These are the behaviors a container-backed element gets from its
//! `super_*` calls. They operate on the tree by ID because the container
//! element itself is checked out while they run.

use casement_core::logging::targets;
use casement_core::{Bounds, ElementId};

use super::events::{ButtonEvent, ButtonEventKind};
use super::tree::ElementTree;

/// Union of the visible children's extents, always including the origin.
pub(crate) fn dimensions(tree: &ElementTree, id: ElementId) -> Bounds {
    union_of_children(tree, id, |tree, child| tree.dimensions(child).unwrap_or_default())
}

/// Union of the visible children's pointer areas, always including the origin.
pub(crate) fn pointer_area(tree: &ElementTree, id: ElementId) -> Bounds {
    union_of_children(tree, id, |tree, child| tree.pointer_area(child).unwrap_or_default())
}

fn union_of_children(
    tree: &ElementTree,
    id: ElementId,
    extent: impl Fn(&ElementTree, ElementId) -> Bounds,
) -> Bounds {
    let mut bounds = Bounds::ZERO;
    for &child in tree.children(id).unwrap_or(&[]) {
        if !tree.is_visible(child).unwrap_or(false) {
            continue;
        }
        let position = tree.position(child).unwrap_or_default();
        bounds = bounds.union(&extent(tree, child).offset(position));
    }
    bounds
}

/// Find the child under `(x, y)` and make it the pointer focus.
///
/// Children are tried front to back. A child is hit when the point lies in
/// its pointer area and it accepts the motion; a child that declines lets
/// the search continue to the ones behind it. The previous focus receives
/// exactly one leave when focus moves away from it.
pub(crate) fn pointer_motion(
    tree: &mut ElementTree,
    id: ElementId,
    x: i32,
    y: i32,
    time_msec: u32,
) -> bool {
    let children = tree.children(id).map(<[_]>::to_vec).unwrap_or_default();
    for child in children {
        if !tree.is_visible(child).unwrap_or(false) {
            continue;
        }
        let position = tree.position(child).unwrap_or_default();
        let area = tree.pointer_area(child).unwrap_or_default().offset(position);
        if !area.contains(x, y) {
            continue;
        }

        let accepted = match tree.dispatch_pointer_motion(child, x - position.x, y - position.y, time_msec) {
            Ok(accepted) => accepted,
            Err(err) => {
                tracing::warn!(target: targets::INPUT, ?child, %err, "motion dispatch failed");
                false
            }
        };
        if !accepted {
            continue;
        }

        let previous = tree.set_pointer_focus(id, Some(child));
        if let Some(previous) = previous.filter(|previous| *previous != child) {
            tracing::trace!(target: targets::INPUT, container = ?id, from = ?previous, to = ?child, "pointer focus moved");
            leave(tree, previous);
        }
        return true;
    }

    // Nothing here took the pointer, so it is outside this container.
    if let Some(previous) = tree.set_pointer_focus(id, None) {
        leave(tree, previous);
    }
    false
}

/// Forward a button event into the container.
///
/// A primary Down goes to the focused child, which takes the button grab
/// if it accepts. Primary Up, Click and DoubleClick go to the grab holder,
/// even after the pointer has moved off it. Other buttons follow focus.
pub(crate) fn pointer_button(tree: &mut ElementTree, id: ElementId, event: &ButtonEvent) -> bool {
    if !event.button.is_primary() {
        return match tree.pointer_focus(id).ok().flatten() {
            Some(focus) => forward_button(tree, focus, event),
            None => false,
        };
    }

    match event.kind {
        ButtonEventKind::Down => {
            let focus = tree.pointer_focus(id).ok().flatten();
            let accepted = focus.is_some_and(|focus| forward_button(tree, focus, event));
            let grab = focus.filter(|_| accepted);
            tracing::trace!(target: targets::INPUT, container = ?id, ?grab, "button grab");
            tree.set_button_grab(id, grab);
            accepted
        }
        ButtonEventKind::Up | ButtonEventKind::Click | ButtonEventKind::DoubleClick => {
            match tree.button_grab(id).ok().flatten() {
                Some(grab) => forward_button(tree, grab, event),
                None => false,
            }
        }
    }
}

fn forward_button(tree: &mut ElementTree, child: ElementId, event: &ButtonEvent) -> bool {
    match tree.dispatch_pointer_button(child, event) {
        Ok(consumed) => consumed,
        Err(err) => {
            tracing::warn!(target: targets::INPUT, ?child, %err, "button dispatch failed");
            false
        }
    }
}

/// Forward leave to the focused child and clear focus.
pub(crate) fn pointer_leave(tree: &mut ElementTree, id: ElementId) {
    if let Some(previous) = tree.set_pointer_focus(id, None) {
        leave(tree, previous);
    }
}

/// Propagate a layout change to the parent, or refocus at the root.
pub(crate) fn update_layout(tree: &mut ElementTree, id: ElementId) {
    if let Some(parent) = tree.parent(id).ok().flatten() {
        tree.invalidate(parent);
        return;
    }

    // Children may have moved under a stationary pointer.
    if let Some(sample) = tree.last_pointer(id) {
        pointer_motion(tree, id, sample.x, sample.y, sample.time_msec);
    }
}

fn leave(tree: &mut ElementTree, element: ElementId) {
    if let Err(err) = tree.dispatch_pointer_leave(element) {
        tracing::warn!(target: targets::INPUT, ?element, %err, "leave dispatch failed");
    }
}
