//! Integration tests for mirroring a decorated window into a scene backend.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use casement::element::widgets::{FakeContent, TitleBar, Window};
use casement::element::{ButtonEvent, ButtonEventKind, ElementTree, SceneBackend};
use casement::graphics::ImageBuffer;
use casement::style::WindowStyle;
use casement::{ElementId, Point, RenderNodeId};

#[derive(Debug, Clone, PartialEq)]
struct NodeRecord {
    parent: Option<RenderNodeId>,
    position: Point,
    enabled: bool,
    buffer: bool,
    image: Option<ImageBuffer>,
}

#[derive(Debug, Default)]
struct SceneLog {
    next: u64,
    nodes: HashMap<RenderNodeId, NodeRecord>,
    destroyed: usize,
    buffer_updates: usize,
}

#[derive(Debug, Default, Clone)]
struct RecordingScene {
    log: Arc<Mutex<SceneLog>>,
}

impl RecordingScene {
    fn create(&mut self, parent: Option<RenderNodeId>, position: Point, enabled: bool, image: Option<ImageBuffer>, buffer: bool) -> RenderNodeId {
        let mut log = self.log.lock();
        log.next += 1;
        let id = RenderNodeId(log.next);
        log.nodes.insert(id, NodeRecord { parent, position, enabled, buffer, image });
        id
    }

    fn live(&self) -> usize {
        self.log.lock().nodes.len()
    }

    fn buffers(&self) -> usize {
        self.log.lock().nodes.values().filter(|node| node.buffer).count()
    }

    fn roots(&self) -> Vec<NodeRecord> {
        self.log.lock().nodes.values().filter(|node| node.parent.is_none()).cloned().collect()
    }
}

impl SceneBackend for RecordingScene {
    fn create_tree(&mut self, parent: Option<RenderNodeId>, position: Point, enabled: bool) -> RenderNodeId {
        self.create(parent, position, enabled, None, false)
    }

    fn create_buffer(
        &mut self,
        parent: Option<RenderNodeId>,
        position: Point,
        enabled: bool,
        image: Option<&ImageBuffer>,
    ) -> RenderNodeId {
        self.create(parent, position, enabled, image.cloned(), true)
    }

    fn set_position(&mut self, node: RenderNodeId, position: Point) {
        if let Some(record) = self.log.lock().nodes.get_mut(&node) {
            record.position = position;
        }
    }

    fn set_enabled(&mut self, node: RenderNodeId, enabled: bool) {
        if let Some(record) = self.log.lock().nodes.get_mut(&node) {
            record.enabled = enabled;
        }
    }

    fn set_buffer(&mut self, node: RenderNodeId, image: Option<&ImageBuffer>) {
        let mut log = self.log.lock();
        log.buffer_updates += 1;
        if let Some(record) = log.nodes.get_mut(&node) {
            record.image = image.cloned();
        }
    }

    fn place_below(&mut self, _node: RenderNodeId, _sibling: RenderNodeId) {}

    fn destroy_node(&mut self, node: RenderNodeId) {
        let mut log = self.log.lock();
        log.nodes.remove(&node);
        log.destroyed += 1;
    }
}

fn setup() -> (ElementTree, ElementId, FakeContent, RecordingScene) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let mut tree = ElementTree::new();
    let content = FakeContent::new(200, 100);
    let window = Window::create(&mut tree, Box::new(content.clone()), &WindowStyle::default()).unwrap();
    tree.set_visible(window, true).unwrap();
    let scene = RecordingScene::default();
    tree.attach_scene(window, Box::new(scene.clone())).unwrap();
    (tree, window, content, scene)
}

fn close_button(tree: &ElementTree, window: ElementId) -> ElementId {
    let titlebar = tree.get::<Window>(window).unwrap().titlebar();
    tree.get::<TitleBar>(titlebar).unwrap().close_button()
}

#[test]
fn test_attach_mirrors_whole_window() {
    let (tree, window, _, scene) = setup();
    // Window, box, title bar, content, resize bar, plus three buffers per bar.
    assert_eq!(scene.live(), 11);
    assert_eq!(scene.buffers(), 6);
    assert_eq!(scene.roots().len(), 1);
    assert_eq!(tree.scene_root(), Some(window));
}

#[test]
fn test_window_move_reaches_scene() {
    let (mut tree, window, _, scene) = setup();
    let serial = tree
        .with::<Window, _>(window, |window, cx| window.request_position_and_size(cx, 40, 30, 200, 100))
        .unwrap()
        .unwrap();
    assert_eq!(scene.roots()[0].position, Point::ZERO);

    tree.with::<Window, _>(window, |window, cx| window.commit_size(cx, serial, 200, 100))
        .unwrap()
        .unwrap();
    assert_eq!(scene.roots()[0].position, Point::new(40, 30));
}

#[test]
fn test_narrow_window_disables_button_nodes() {
    let (mut tree, window, _, scene) = setup();
    let close = close_button(&tree, window);
    let node = tree.view(close).unwrap().render_node().unwrap();
    assert!(scene.log.lock().nodes[&node].enabled);

    let serial = tree
        .with::<Window, _>(window, |window, cx| window.request_size(cx, 60, 100))
        .unwrap()
        .unwrap();
    tree.with::<Window, _>(window, |window, cx| window.commit_size(cx, serial, 60, 100))
        .unwrap()
        .unwrap();
    assert!(!scene.log.lock().nodes[&node].enabled);
}

#[test]
fn test_press_swaps_button_image() {
    let (mut tree, window, _, scene) = setup();
    let close = close_button(&tree, window);
    let node = tree.view(close).unwrap().render_node().unwrap();
    let released = scene.log.lock().nodes[&node].image.clone().unwrap();

    tree.pointer_motion(window, 190, 10, 0).unwrap();
    tree.pointer_button(window, &ButtonEvent::primary(ButtonEventKind::Down)).unwrap();
    let pressed = scene.log.lock().nodes[&node].image.clone().unwrap();
    assert!(!pressed.ptr_eq(&released));
    assert_eq!(pressed.size(), released.size());
}

#[test]
fn test_destroy_releases_every_node() {
    let (mut tree, window, _, scene) = setup();
    tree.destroy(window).unwrap();
    assert_eq!(scene.live(), 0);
    assert_eq!(scene.log.lock().destroyed, 11);
}

#[test]
fn test_detach_hands_backend_back() {
    let (mut tree, window, _, scene) = setup();
    assert!(tree.detach_scene().is_some());
    assert_eq!(scene.live(), 0);
    assert_eq!(tree.scene_root(), None);
    assert!(tree.view(window).unwrap().render_node().is_none());
}
