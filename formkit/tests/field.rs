use formkit::prelude::*;

fn plans() -> SelectControl<&'static str> {
    SelectControl::new([("free", "Free"), ("pro", "Pro"), ("team", "Team")]).with_id("plan")
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn test_bind_writes_initial_value() {
    let field = FormField::new(Some("pro"));
    let select = plans();

    field.bind(&select);

    assert_eq!(select.value(), Some("pro"));
    assert_eq!(select.selected_label(), "Pro");
    assert_eq!(field.binding_count(), 1);
    assert!(!field.is_dirty());
    assert!(!field.is_touched());
}

#[test]
fn test_bind_toggle_none_is_false() {
    let field: FormField<bool> = FormField::new(None);
    let toggle = ToggleControl::new().with_value(true);

    field.bind(&toggle);

    assert!(!toggle.value());
}

#[test]
fn test_bind_disabled_field() {
    let field = FormField::disabled(Some(true));
    let toggle = ToggleControl::new();

    field.bind(&toggle);

    assert!(toggle.value());
    assert!(toggle.is_disabled());
}

// ============================================================================
// View to model
// ============================================================================

#[test]
fn test_user_selection_updates_field() {
    let field = FormField::new(None);
    let select = plans();
    field.bind(&select);

    select.on_key(&KeyCombo::key(Key::Enter));
    assert!(field.is_touched());
    assert!(!field.is_dirty());

    select.on_key(&KeyCombo::key(Key::End));
    select.on_key(&KeyCombo::key(Key::Enter));

    assert_eq!(field.value(), Some("team"));
    assert!(field.is_dirty());
}

#[test]
fn test_user_toggle_updates_field() {
    let field = FormField::new(Some(false));
    let toggle = ToggleControl::new();
    field.bind(&toggle);

    toggle.handle_event(&Event::Click, &LayoutResult::new());

    assert_eq!(field.value(), Some(true));
    assert!(field.is_dirty());
    assert!(field.is_touched());
}

#[test]
fn test_blur_marks_field_touched() {
    let field = FormField::new(Some(false));
    let toggle = ToggleControl::new();
    field.bind(&toggle);

    toggle.handle_event(&Event::Blur, &LayoutResult::new());

    assert!(field.is_touched());
    assert!(!field.is_dirty());
}

// ============================================================================
// Model to view
// ============================================================================

#[test]
fn test_set_value_writes_every_binding() {
    let field = FormField::new(None);
    let primary = plans();
    let mirror = plans().with_id("plan-mirror");
    field.bind(&primary);
    field.bind(&mirror);

    field.set_value(Some("free"));

    assert_eq!(primary.selected_label(), "Free");
    assert_eq!(mirror.selected_label(), "Free");
    assert!(!field.is_dirty());
}

#[test]
fn test_set_value_does_not_echo() {
    let field = FormField::new(Some(false));
    let toggle = ToggleControl::new();
    field.bind(&toggle);

    field.set_value(Some(true));

    assert!(toggle.value());
    assert!(!field.is_dirty());
    assert!(!field.is_touched());
}

#[test]
fn test_disable_propagates() {
    let field = FormField::new(Some("free"));
    let select = plans();
    field.bind(&select);
    select.open();

    field.disable();

    assert!(field.is_disabled());
    assert!(select.is_disabled());
    assert!(!select.is_open());

    field.enable();
    assert!(!select.is_disabled());
}

#[test]
fn test_reset_restores_initial() {
    let field = FormField::new(Some("free"));
    let select = plans();
    field.bind(&select);

    select.click_option(1);
    assert_eq!(field.value(), Some("pro"));

    field.reset();

    assert_eq!(field.value(), Some("free"));
    assert_eq!(select.selected_label(), "Free");
    assert!(!field.is_dirty());
    assert!(!field.is_touched());
}

// ============================================================================
// Lifetimes
// ============================================================================

#[test]
fn test_control_outlives_field() {
    let toggle = ToggleControl::new();
    {
        let field = FormField::new(Some(false));
        field.bind(&toggle);
    }
    // Callbacks now point at a dropped field
    assert!(toggle.toggle());
    assert!(toggle.value());
}

#[test]
fn test_field_clones_share_state() {
    let field = FormField::new(Some(false));
    let other = field.clone();
    let toggle = ToggleControl::new();
    field.bind(&toggle);

    toggle.toggle();

    assert_eq!(other.value(), Some(true));
    assert_eq!(other.binding_count(), 1);
}
