use super::*;
use crate::scene::config::SceneConfig;

#[test]
fn listeners_register_and_unregister() {
    let mut host = HeadlessHost::new(10, 10);
    let a = host.add_listener(EventKind::Click);
    let b = host.add_listener(EventKind::PointerMove);
    assert_ne!(a, b);
    assert!(host.has_listener(EventKind::Click));
    host.remove_listener(a);
    host.remove_listener(a);
    assert!(!host.has_listener(EventKind::Click));
    assert_eq!(host.listener_count(), 1);
}

#[test]
fn single_pending_frame_slot() {
    let mut host = HeadlessHost::new(10, 10);
    let token = CancelToken::new();
    let first = host.request_frame(token.clone());
    let second = host.request_frame(token);
    assert_ne!(first, second);
    assert_eq!(host.pending_tick().map(|t| t.request), Some(second));

    host.cancel_frame(first);
    assert!(host.pending_tick().is_some());
    host.cancel_frame(second);
    assert!(host.pending_tick().is_none());
}

#[test]
fn events_without_listener_are_dropped() {
    let mut host = HeadlessHost::new(100, 100);
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    host.pointer_move(5.0, 5.0);
    host.dispatch_events(&mut scene);
    assert_eq!(scene.state().cursor, crate::foundation::core::Point::ZERO);
}

#[test]
fn resize_updates_surface_immediately() {
    let mut host = HeadlessHost::detached();
    assert_eq!(host.surface_size(), None);
    host.resize(30, 40);
    assert_eq!(host.surface_size(), Some(Surface::new(30, 40)));
}

#[test]
fn run_frame_advances_clock_only_when_a_frame_fires() {
    let mut host = HeadlessHost::new(10, 10);
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    let mut canvas = crate::canvas::record::RecordingCanvas::new();
    assert!(!host.run_frame(&mut scene, &mut canvas));
    assert_eq!(host.now(), Duration::ZERO);

    scene.start(&mut host);
    assert!(host.run_frame(&mut scene, &mut canvas));
    assert_eq!(host.now(), FRAME_INTERVAL);
}
