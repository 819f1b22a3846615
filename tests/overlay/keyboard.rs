//! Global shortcuts delivered through the context's keyboard hub.

use super::common::Harness;
use docsearch::{Disposition, KeyEvent};

#[test]
fn test_ctrl_k_toggles() {
    let h = Harness::new();
    let overlay = h.mount();
    let keys = h.ctx.keyboard();

    assert_eq!(keys.dispatch(&KeyEvent::char('k').with_ctrl()), Disposition::DefaultPrevented);
    assert!(overlay.is_open());

    assert_eq!(keys.dispatch(&KeyEvent::char('k').with_ctrl()), Disposition::DefaultPrevented);
    assert!(!overlay.is_open());
}

#[test]
fn test_cmd_k_toggles() {
    let h = Harness::new();
    let overlay = h.mount();

    h.ctx.keyboard().dispatch(&KeyEvent::char('k').with_meta());
    assert!(overlay.is_open());
}

#[test]
fn test_escape_closes_and_is_noop_when_closed() {
    let h = Harness::new();
    let overlay = h.mount();
    let keys = h.ctx.keyboard();

    assert_eq!(keys.dispatch(&KeyEvent::escape()), Disposition::Ignored);
    assert!(!overlay.is_open());

    overlay.open();
    assert_eq!(keys.dispatch(&KeyEvent::escape()), Disposition::DefaultPrevented);
    assert!(!overlay.is_open());

    // Escape never opens.
    keys.dispatch(&KeyEvent::escape());
    assert!(!overlay.is_open());
}

#[test]
fn test_plain_typing_is_not_a_shortcut() {
    let h = Harness::new();
    let overlay = h.mount();
    overlay.open();

    assert_eq!(h.ctx.keyboard().dispatch(&KeyEvent::char('k')), Disposition::Ignored);
    assert!(overlay.is_open());
}

#[test]
fn test_inert_instance_ignores_keys() {
    let h = Harness::new();
    let desktop = h.mount();
    let mobile = h.mount();
    assert_eq!(h.ctx.keyboard().listener_count(), 2);

    h.ctx.keyboard().dispatch(&KeyEvent::char('k').with_ctrl());
    assert!(desktop.is_open());
    assert!(!mobile.is_open());

    assert_eq!(mobile.handle_key(&KeyEvent::escape()), Disposition::Ignored);
}

#[test]
fn test_unmounted_instance_stops_listening() {
    let h = Harness::new();
    let overlay = h.mount();
    drop(overlay);

    assert_eq!(
        h.ctx.keyboard().dispatch(&KeyEvent::char('k').with_ctrl()),
        Disposition::Ignored
    );
}
