use std::sync::{Arc, Mutex};

use formkit::prelude::*;
use formkit::id::SequentialIds;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Change(bool),
    Emit(bool),
    Touched,
}

/// Register adapter callbacks and a public listener that all log into one
/// shared, ordered list.
fn wire(toggle: &ToggleControl) -> Arc<Mutex<Vec<Call>>> {
    let calls = Arc::new(Mutex::new(Vec::new()));

    let c = Arc::clone(&calls);
    toggle.register_on_change(Arc::new(move |v: &bool| c.lock().unwrap().push(Call::Change(*v))));
    let c = Arc::clone(&calls);
    toggle.register_on_touched(Arc::new(move || c.lock().unwrap().push(Call::Touched)));
    let c = Arc::clone(&calls);
    toggle.subscribe_change(Arc::new(move |v: &bool| c.lock().unwrap().push(Call::Emit(*v))));

    calls
}

// ============================================================================
// External writes
// ============================================================================

#[test]
fn test_set_value_is_silent() {
    for v in [true, false, true, true, false] {
        let toggle = ToggleControl::new();
        let calls = wire(&toggle);

        toggle.set_value(v);

        assert_eq!(toggle.value(), v);
        assert!(calls.lock().unwrap().is_empty());
    }
}

#[test]
fn test_write_value_none_coerces_to_false() {
    let toggle = ToggleControl::new().with_value(true);
    toggle.write_value(None);
    assert!(!toggle.value());

    toggle.write_value(Some(true));
    assert!(toggle.value());
}

#[test]
fn test_set_value_accepted_while_disabled() {
    let toggle = ToggleControl::new().with_disabled(true);
    toggle.set_value(true);
    assert!(toggle.value());
}

// ============================================================================
// User interaction
// ============================================================================

#[test]
fn test_toggle_notifies_in_order() {
    let toggle = ToggleControl::new();
    let calls = wire(&toggle);

    assert!(toggle.toggle());

    assert!(toggle.value());
    assert_eq!(
        *calls.lock().unwrap(),
        vec![Call::Change(true), Call::Emit(true), Call::Touched]
    );

    toggle.toggle();
    assert!(!toggle.value());
    assert_eq!(calls.lock().unwrap().len(), 6);
    assert_eq!(calls.lock().unwrap()[3], Call::Change(false));
}

#[test]
fn test_toggle_disabled_is_noop() {
    let toggle = ToggleControl::new().with_disabled(true);
    let calls = wire(&toggle);

    assert!(!toggle.toggle());
    assert!(!toggle.handle_interaction());

    assert!(!toggle.value());
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_toggle_before_registration() {
    let toggle = ToggleControl::new();
    toggle.toggle();
    toggle.mark_as_touched();
    assert!(toggle.value());
}

#[test]
fn test_set_disabled_keeps_value() {
    let toggle = ToggleControl::new().with_value(true);
    toggle.set_disabled_state(true);
    assert!(toggle.value());
    assert!(toggle.is_disabled());

    toggle.set_disabled_state(false);
    assert!(toggle.value());
    assert!(!toggle.is_disabled());
}

#[test]
fn test_loading_does_not_block_toggle() {
    let toggle = ToggleControl::new().with_loading(true);
    assert!(toggle.toggle());
    assert!(toggle.value());
}

#[test]
fn test_blur_marks_touched_only() {
    let toggle = ToggleControl::new();
    let calls = wire(&toggle);

    toggle.handle_event(&Event::Blur, &LayoutResult::new());

    assert!(!toggle.value());
    assert_eq!(*calls.lock().unwrap(), vec![Call::Touched]);
}

#[test]
fn test_on_change_builder() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    let toggle = ToggleControl::new().on_change(move |v| s.lock().unwrap().push(*v));

    toggle.toggle();
    toggle.toggle();

    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
}

// ============================================================================
// Event routing
// ============================================================================

#[test]
fn test_activation_keys_toggle() {
    let toggle = ToggleControl::new();

    let result = toggle.on_key(&KeyCombo::key(Key::SPACE));
    assert_eq!(result, EventResult::Consumed);
    assert!(toggle.value());

    toggle.on_key(&KeyCombo::key(Key::Enter));
    assert!(!toggle.value());
}

#[test]
fn test_other_keys_ignored() {
    let toggle = ToggleControl::new();

    assert_eq!(toggle.on_key(&KeyCombo::key(Key::Down)), EventResult::Ignored);
    assert_eq!(
        toggle.on_key(&KeyCombo::key(Key::SPACE).ctrl()),
        EventResult::Ignored
    );
    assert!(!toggle.value());
}

#[test]
fn test_click_toggles() {
    let toggle = ToggleControl::new();
    let result = toggle.handle_event(&Event::Click, &LayoutResult::new());
    assert!(result.prevents_default());
    assert!(toggle.value());
}

#[test]
fn test_disabled_not_focusable() {
    let toggle = ToggleControl::new();
    assert!(toggle.is_focusable());
    toggle.set_disabled(true);
    assert!(!toggle.is_focusable());
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_view_mirrors_aria() {
    let toggle = ToggleControl::new();

    let view = toggle.view();
    assert_eq!(view.aria.get("role"), Some("switch"));
    assert_eq!(view.aria.get("aria-checked"), Some("false"));
    assert_eq!(view.aria.get("aria-labelledby"), None);

    toggle.toggle();
    assert_eq!(toggle.view().aria.get("aria-checked"), Some("true"));
}

#[test]
fn test_view_label_and_classes() {
    let ids = SequentialIds::new();
    let toggle = ToggleControl::with_ids(&ids)
        .with_label("Wi-Fi")
        .with_value(true)
        .with_loading(true);

    let view = toggle.view();
    assert_eq!(view.id, "ui-switch-0");
    assert_eq!(view.label, "Wi-Fi");
    assert_eq!(view.label_id.as_deref(), Some("ui-switch-0-label"));
    assert_eq!(view.aria.get("aria-labelledby"), Some("ui-switch-0-label"));
    assert_eq!(view.aria.get("aria-busy"), Some("true"));
    assert_eq!(
        view.classes(),
        vec!["ui-switch", "ui-switch-checked", "ui-switch-loading"]
    );
}

#[test]
fn test_ids_are_unique_per_source() {
    let ids = SequentialIds::new();
    let a = ToggleControl::with_ids(&ids);
    let b = ToggleControl::with_ids(&ids);
    assert_eq!(a.id().as_str(), "ui-switch-0");
    assert_eq!(b.id().as_str(), "ui-switch-1");

    let c = ToggleControl::new().with_id("newsletter");
    assert_eq!(c.id().as_str(), "newsletter");
}

#[test]
fn test_default_ids_are_process_unique() {
    let a = ToggleControl::new();
    let b = ToggleControl::default();
    assert!(a.id().as_str().starts_with("ui-switch-"));
    assert!(b.id().as_str().starts_with("ui-switch-"));
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_intrinsic_width() {
    let toggle = ToggleControl::new();
    assert_eq!(toggle.intrinsic_width(), 3);
    toggle.set_label("Sound");
    assert_eq!(toggle.intrinsic_width(), 9);
}

#[test]
fn test_dirty_tracking() {
    let toggle = ToggleControl::new();
    assert!(!toggle.is_dirty());

    toggle.toggle();
    assert!(toggle.is_dirty());

    toggle.clear_dirty();
    toggle.set_value(true);
    assert!(!toggle.is_dirty());
}
