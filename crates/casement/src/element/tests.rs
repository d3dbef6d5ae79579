use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use casement_core::{Bounds, ElementId, Point, PreconditionViolation, Size, ToolkitError, TreeFormatOptions};

use super::*;

type Log = Arc<Mutex<Vec<String>>>;

struct Group;

impl Element for Group {}

#[derive(Default)]
struct CountingGroup {
    passes: Arc<AtomicUsize>,
}

impl Element for CountingGroup {
    fn update_layout(&mut self, cx: &mut ElementContext<'_>) {
        self.passes.fetch_add(1, Ordering::SeqCst);
        cx.super_update_layout();
    }
}

struct Recorder {
    name: &'static str,
    size: Size,
    accepts: bool,
    log: Log,
}

impl Element for Recorder {
    fn dimensions(&self, _view: TreeView<'_>) -> Bounds {
        Bounds::from_size(self.size)
    }

    fn pointer_motion(&mut self, _cx: &mut ElementContext<'_>, x: i32, y: i32, _time_msec: u32) -> bool {
        self.log.lock().push(format!("{} motion {x},{y}", self.name));
        self.accepts
    }

    fn pointer_button(&mut self, _cx: &mut ElementContext<'_>, event: &ButtonEvent) -> bool {
        self.log.lock().push(format!("{} {:?}", self.name, event.kind));
        true
    }

    fn pointer_leave(&mut self, cx: &mut ElementContext<'_>) {
        cx.super_pointer_leave();
        self.log.lock().push(format!("{} leave", self.name));
    }
}

fn setup() -> (ElementTree, ElementId, Log) {
    let mut tree = ElementTree::new();
    let root = tree.insert_container(Group);
    tree.set_visible(root, true).unwrap();
    (tree, root, Log::default())
}

fn recorder(tree: &mut ElementTree, root: ElementId, log: &Log, name: &'static str, at: Point) -> ElementId {
    let id = tree.insert_element(Recorder {
        name,
        size: Size::new(10, 10),
        accepts: true,
        log: Arc::clone(log),
    });
    tree.add(root, id, InsertAt::Back).unwrap();
    tree.set_position(id, at).unwrap();
    tree.set_visible(id, true).unwrap();
    id
}

/// Log entries whose event word is `kind`, such as "motion" or "leave".
fn entries(log: &Log, kind: &str) -> Vec<String> {
    log.lock().iter().filter(|entry| entry.split(' ').nth(1) == Some(kind)).cloned().collect()
}

// =========================================================================
// Containment
// =========================================================================

#[test]
fn test_add_rejects_parented_element() {
    let (mut tree, root, log) = setup();
    let other = tree.insert_container(Group);
    let a = recorder(&mut tree, root, &log, "a", Point::ZERO);

    let err = tree.add(other, a, InsertAt::Back).unwrap_err();
    assert_eq!(err, ToolkitError::Precondition(PreconditionViolation::AlreadyParented));
    assert_eq!(tree.parent(a).unwrap(), Some(root));
}

#[test]
fn test_add_to_leaf_fails() {
    let (mut tree, root, log) = setup();
    let a = recorder(&mut tree, root, &log, "a", Point::ZERO);
    let loose = tree.insert_element(Group);
    let err = tree.add(a, loose, InsertAt::Back).unwrap_err();
    assert_eq!(err, ToolkitError::Precondition(PreconditionViolation::NotAContainer));
}

#[test]
fn test_add_beneath_itself_fails() {
    let (mut tree, root, _) = setup();
    let inner = tree.insert_container(Group);
    tree.add(root, inner, InsertAt::Back).unwrap();
    let err = tree.add(inner, root, InsertAt::Back).unwrap_err();
    assert_eq!(err, ToolkitError::Precondition(PreconditionViolation::SelfInsertion));
    let err = tree.add(root, root, InsertAt::Back).unwrap_err();
    assert_eq!(err, ToolkitError::Precondition(PreconditionViolation::SelfInsertion));
}

#[test]
fn test_remove_requires_child() {
    let (mut tree, root, log) = setup();
    let other = tree.insert_container(Group);
    let a = recorder(&mut tree, root, &log, "a", Point::ZERO);
    let err = tree.remove(other, a).unwrap_err();
    assert_eq!(err, ToolkitError::Precondition(PreconditionViolation::NotAChild));

    tree.remove(root, a).unwrap();
    assert_eq!(tree.parent(a).unwrap(), None);
    assert!(tree.children(root).unwrap().is_empty());
}

#[test]
fn test_insert_positions() {
    let (mut tree, root, log) = setup();
    let a = recorder(&mut tree, root, &log, "a", Point::ZERO);
    let b = tree.insert_element(Group);
    let c = tree.insert_element(Group);
    tree.add(root, b, InsertAt::Front).unwrap();
    tree.add(root, c, InsertAt::Before(a)).unwrap();
    assert_eq!(tree.children(root).unwrap(), &[b, c, a]);

    let d = tree.insert_element(Group);
    let stranger = tree.insert_element(Group);
    let err = tree.add(root, d, InsertAt::Before(stranger)).unwrap_err();
    assert_eq!(err, ToolkitError::Precondition(PreconditionViolation::ReferenceNotAChild));
    assert_eq!(tree.parent(d).unwrap(), None);
}

#[test]
fn test_reparent_detaches_first() {
    let (mut tree, root, log) = setup();
    let other = tree.insert_container(Group);
    let a = recorder(&mut tree, root, &log, "a", Point::ZERO);

    tree.reparent(a, other, InsertAt::Back).unwrap();
    assert_eq!(tree.parent(a).unwrap(), Some(other));
    assert!(tree.children(root).unwrap().is_empty());
    assert_eq!(tree.children(other).unwrap(), &[a]);
}

#[test]
fn test_destroy_releases_subtree() {
    let (mut tree, root, log) = setup();
    let inner = tree.insert_container(Group);
    tree.add(root, inner, InsertAt::Back).unwrap();
    let a = recorder(&mut tree, inner, &log, "a", Point::ZERO);
    let b = recorder(&mut tree, inner, &log, "b", Point::ZERO);
    assert_eq!(tree.len(), 4);

    tree.destroy(inner).unwrap();
    assert_eq!(tree.len(), 1);
    for id in [inner, a, b] {
        assert!(!tree.contains(id));
    }
    assert!(tree.children(root).unwrap().is_empty());
    assert_eq!(tree.position(a).unwrap_err(), ToolkitError::InvalidElementId(a));
}

#[test]
fn test_typed_access() {
    let (mut tree, root, log) = setup();
    let a = recorder(&mut tree, root, &log, "a", Point::ZERO);
    assert_eq!(tree.get::<Recorder>(a).unwrap().name, "a");
    assert!(matches!(tree.get::<Group>(a), Err(ToolkitError::TypeMismatch { .. })));

    let nested = tree.with::<Group, _>(root, |_, cx| {
        let id = cx.id();
        cx.tree().get::<Group>(id).map(|_| ())
    });
    assert_eq!(nested.unwrap(), Err(ToolkitError::ElementInUse(root)));
}

// =========================================================================
// Geometry
// =========================================================================

#[test]
fn test_container_dimensions_cover_visible_children() {
    let (mut tree, root, log) = setup();
    recorder(&mut tree, root, &log, "a", Point::new(5, 5));
    let hidden = recorder(&mut tree, root, &log, "b", Point::new(100, 100));
    tree.set_visible(hidden, false).unwrap();

    assert_eq!(tree.dimensions(root).unwrap(), Bounds::new(0, 0, 15, 15));
    assert_eq!(tree.pointer_area(root).unwrap(), Bounds::new(0, 0, 15, 15));
}

#[test]
fn test_absolute_position_accumulates() {
    let (mut tree, root, log) = setup();
    let inner = tree.insert_container(Group);
    tree.add(root, inner, InsertAt::Back).unwrap();
    tree.set_position(inner, Point::new(3, 4)).unwrap();
    let a = recorder(&mut tree, inner, &log, "a", Point::new(10, 20));
    assert_eq!(tree.absolute_position(a).unwrap(), Point::new(13, 24));
}

// =========================================================================
// Pointer routing
// =========================================================================

#[test]
fn test_motion_focuses_frontmost_hit() {
    let (mut tree, root, log) = setup();
    let a = recorder(&mut tree, root, &log, "a", Point::ZERO);
    let b = recorder(&mut tree, root, &log, "b", Point::new(5, 5));

    assert!(tree.pointer_motion(root, 7, 7, 0).unwrap());
    assert_eq!(tree.pointer_focus(root).unwrap(), Some(a));
    assert_eq!(*log.lock(), vec!["a motion 7,7"]);

    tree.pointer_motion(root, 12, 12, 0).unwrap();
    assert_eq!(tree.pointer_focus(root).unwrap(), Some(b));
    assert_eq!(entries(&log, "motion").last().unwrap(), "b motion 7,7");
    assert_eq!(entries(&log, "leave"), vec!["a leave"]);
}

#[test]
fn test_declined_motion_falls_through() {
    let (mut tree, root, log) = setup();
    let a = recorder(&mut tree, root, &log, "a", Point::ZERO);
    let b = recorder(&mut tree, root, &log, "b", Point::ZERO);
    tree.with::<Recorder, _>(a, |a, _| a.accepts = false).unwrap();

    tree.pointer_motion(root, 1, 1, 0).unwrap();
    assert_eq!(tree.pointer_focus(root).unwrap(), Some(b));
}

#[test]
fn test_focus_change_sends_exactly_one_leave() {
    let (mut tree, root, log) = setup();
    recorder(&mut tree, root, &log, "a", Point::ZERO);
    recorder(&mut tree, root, &log, "b", Point::new(20, 0));

    tree.pointer_motion(root, 5, 5, 0).unwrap();
    tree.pointer_motion(root, 6, 5, 0).unwrap();
    assert!(entries(&log, "leave").is_empty());

    tree.pointer_motion(root, 25, 5, 0).unwrap();
    assert_eq!(entries(&log, "leave"), vec!["a leave"]);

    assert!(!tree.pointer_motion(root, 100, 100, 0).unwrap());
    assert_eq!(tree.pointer_focus(root).unwrap(), None);
    assert_eq!(entries(&log, "leave"), vec!["a leave", "b leave"]);

    tree.pointer_leave(root).unwrap();
    assert_eq!(entries(&log, "leave").len(), 2);
}

#[test]
fn test_hidden_child_is_not_hit() {
    let (mut tree, root, log) = setup();
    let a = recorder(&mut tree, root, &log, "a", Point::ZERO);
    tree.set_visible(a, false).unwrap();
    assert!(!tree.pointer_motion(root, 1, 1, 0).unwrap());
    assert!(log.lock().is_empty());
}

#[test]
fn test_buttons_follow_focus() {
    let (mut tree, root, log) = setup();
    recorder(&mut tree, root, &log, "a", Point::ZERO);
    let down = ButtonEvent::primary(ButtonEventKind::Down);

    assert!(!tree.pointer_button(root, &down).unwrap());
    tree.pointer_motion(root, 1, 1, 0).unwrap();
    assert!(tree.pointer_button(root, &down).unwrap());
    assert_eq!(log.lock().last().unwrap(), "a Down");
}

#[test]
fn test_release_goes_to_element_that_took_the_press() {
    let (mut tree, root, log) = setup();
    let a = recorder(&mut tree, root, &log, "a", Point::ZERO);
    let b = recorder(&mut tree, root, &log, "b", Point::new(10, 0));

    tree.pointer_motion(root, 1, 1, 0).unwrap();
    assert!(tree.pointer_button(root, &ButtonEvent::primary(ButtonEventKind::Down)).unwrap());
    assert_eq!(tree.button_grab(root).unwrap(), Some(a));

    tree.pointer_motion(root, 11, 1, 1).unwrap();
    assert_eq!(tree.pointer_focus(root).unwrap(), Some(b));
    for kind in [ButtonEventKind::Up, ButtonEventKind::Click] {
        assert!(tree.pointer_button(root, &ButtonEvent::primary(kind)).unwrap());
    }
    assert_eq!(entries(&log, "Up"), vec!["a Up"]);
    assert_eq!(entries(&log, "Click"), vec!["a Click"]);

    // The next press goes to whatever is under the pointer now.
    tree.pointer_button(root, &ButtonEvent::primary(ButtonEventKind::Down)).unwrap();
    assert_eq!(entries(&log, "Down"), vec!["a Down", "b Down"]);
    assert_eq!(tree.button_grab(root).unwrap(), Some(b));
}

#[test]
fn test_secondary_buttons_ignore_the_grab() {
    let (mut tree, root, log) = setup();
    recorder(&mut tree, root, &log, "a", Point::ZERO);
    recorder(&mut tree, root, &log, "b", Point::new(10, 0));

    tree.pointer_motion(root, 1, 1, 0).unwrap();
    tree.pointer_button(root, &ButtonEvent::primary(ButtonEventKind::Down)).unwrap();
    tree.pointer_motion(root, 11, 1, 1).unwrap();
    let right = ButtonEvent::new(PointerButton::Right, ButtonEventKind::Up, 2);
    tree.pointer_button(root, &right).unwrap();
    assert_eq!(entries(&log, "Up"), vec!["b Up"]);
}

#[test]
fn test_release_without_press_goes_nowhere() {
    let (mut tree, root, log) = setup();
    recorder(&mut tree, root, &log, "a", Point::ZERO);
    tree.pointer_motion(root, 1, 1, 0).unwrap();
    assert!(!tree.pointer_button(root, &ButtonEvent::primary(ButtonEventKind::Up)).unwrap());
    assert!(entries(&log, "Up").is_empty());
}

#[test]
fn test_removing_grab_holder_releases_grab() {
    let (mut tree, root, log) = setup();
    let a = recorder(&mut tree, root, &log, "a", Point::ZERO);
    tree.pointer_motion(root, 1, 1, 0).unwrap();
    tree.pointer_button(root, &ButtonEvent::primary(ButtonEventKind::Down)).unwrap();
    tree.remove(root, a).unwrap();
    assert_eq!(tree.button_grab(root).unwrap(), None);
    assert!(!tree.pointer_button(root, &ButtonEvent::primary(ButtonEventKind::Up)).unwrap());
    assert!(entries(&log, "Up").is_empty());
}

#[test]
fn test_grab_follows_nested_containers() {
    let (mut tree, root, log) = setup();
    let inner = tree.insert_container(Group);
    tree.add(root, inner, InsertAt::Back).unwrap();
    tree.set_visible(inner, true).unwrap();
    let a = recorder(&mut tree, inner, &log, "a", Point::ZERO);
    recorder(&mut tree, root, &log, "b", Point::new(10, 0));

    tree.pointer_motion(root, 1, 1, 0).unwrap();
    tree.pointer_button(root, &ButtonEvent::primary(ButtonEventKind::Down)).unwrap();
    assert_eq!(tree.button_grab(root).unwrap(), Some(inner));
    assert_eq!(tree.button_grab(inner).unwrap(), Some(a));

    tree.pointer_motion(root, 11, 1, 1).unwrap();
    tree.pointer_button(root, &ButtonEvent::primary(ButtonEventKind::Up)).unwrap();
    assert_eq!(entries(&log, "Up"), vec!["a Up"]);
}

#[test]
fn test_removing_focused_child_sends_leave() {
    let (mut tree, root, log) = setup();
    let a = recorder(&mut tree, root, &log, "a", Point::ZERO);
    tree.pointer_motion(root, 1, 1, 0).unwrap();
    tree.remove(root, a).unwrap();
    assert_eq!(entries(&log, "leave"), vec!["a leave"]);
    assert_eq!(tree.pointer_focus(root).unwrap(), None);
}

#[test]
fn test_nested_focus_chain_leaves_bottom_up() {
    let (mut tree, root, log) = setup();
    let inner = tree.insert_container(Group);
    tree.add(root, inner, InsertAt::Back).unwrap();
    tree.set_visible(inner, true).unwrap();
    let a = recorder(&mut tree, inner, &log, "a", Point::ZERO);

    tree.pointer_motion(root, 1, 1, 0).unwrap();
    assert_eq!(tree.pointer_focus(root).unwrap(), Some(inner));
    assert_eq!(tree.pointer_focus(inner).unwrap(), Some(a));

    tree.pointer_leave(root).unwrap();
    assert_eq!(entries(&log, "leave"), vec!["a leave"]);
    assert_eq!(tree.pointer_focus(inner).unwrap(), None);
}

// =========================================================================
// Layout and deferred work
// =========================================================================

#[test]
fn test_layout_settles_up_to_root() {
    let mut tree = ElementTree::new();
    let root_group = CountingGroup::default();
    let root_passes = Arc::clone(&root_group.passes);
    let root = tree.insert_container(root_group);
    let inner_group = CountingGroup::default();
    let inner_passes = Arc::clone(&inner_group.passes);
    let inner = tree.insert_container(inner_group);
    tree.add(root, inner, InsertAt::Back).unwrap();
    root_passes.store(0, Ordering::SeqCst);
    inner_passes.store(0, Ordering::SeqCst);

    let leaf = tree.insert_element(Group);
    tree.add(inner, leaf, InsertAt::Back).unwrap();
    assert_eq!(inner_passes.load(Ordering::SeqCst), 1);
    assert_eq!(root_passes.load(Ordering::SeqCst), 1);
    assert!(!tree.is_layout_dirty(inner));
    assert!(!tree.is_layout_dirty(root));
}

#[test]
fn test_position_change_does_not_relayout() {
    let mut tree = ElementTree::new();
    let group = CountingGroup::default();
    let passes = Arc::clone(&group.passes);
    let root = tree.insert_container(group);
    let leaf = tree.insert_element(Group);
    tree.add(root, leaf, InsertAt::Back).unwrap();
    passes.store(0, Ordering::SeqCst);

    tree.set_position(leaf, Point::new(4, 4)).unwrap();
    assert_eq!(passes.load(Ordering::SeqCst), 0);
}

#[test]
fn test_deferred_task_runs_after_operation() {
    let (mut tree, root, _) = setup();
    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);
    tree.with::<Group, _>(root, move |_, cx| {
        let inner = Arc::clone(&flag);
        cx.defer(move |_| inner.store(true, Ordering::SeqCst));
        assert!(!flag.load(Ordering::SeqCst));
    })
    .unwrap();
    assert!(ran.load(Ordering::SeqCst));
}

#[test]
fn test_find_ancestor_by_type() {
    let mut tree = ElementTree::new();
    let outer = tree.insert_container(CountingGroup::default());
    let middle = tree.insert_container(Group);
    let leaf = tree.insert_element(Group);
    tree.add(outer, middle, InsertAt::Back).unwrap();
    tree.add(middle, leaf, InsertAt::Back).unwrap();

    assert_eq!(tree.find_ancestor::<CountingGroup>(leaf), Some(outer));
    assert_eq!(tree.find_ancestor::<Group>(leaf), Some(middle));
    assert_eq!(tree.find_ancestor::<CountingGroup>(outer), None);
}

#[test]
fn test_format_tree_lists_types() {
    let (mut tree, root, log) = setup();
    let a = recorder(&mut tree, root, &log, "a", Point::new(2, 3));
    tree.set_visible(a, false).unwrap();

    let detailed = tree.format_tree(root, &TreeFormatOptions::detailed()).unwrap();
    assert!(detailed.contains("Group"));
    assert!(detailed.contains("Recorder"));
    assert!(detailed.contains("@(2, 3) 10x10"));
    assert!(detailed.contains("(hidden)"));

    let minimal = tree.format_tree(root, &TreeFormatOptions::minimal()).unwrap();
    assert!(!minimal.contains("Recorder"));
}
