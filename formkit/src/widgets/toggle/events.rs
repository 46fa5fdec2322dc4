//! Event handling for the Toggle widget.

use crate::adapter::{ChangeFn, FormControl, TouchedFn};
use crate::event::{EventResult, KeyCombo};
use crate::id::WidgetId;
use crate::widgets::traits::Widget;

use super::ToggleControl;

impl Widget for ToggleControl {
    fn id(&self) -> WidgetId {
        ToggleControl::id(self).clone()
    }

    fn is_dirty(&self) -> bool {
        ToggleControl::is_dirty(self)
    }

    fn clear_dirty(&self) {
        ToggleControl::clear_dirty(self)
    }

    fn is_focusable(&self) -> bool {
        !self.is_disabled()
    }

    fn on_key(&self, key: &KeyCombo) -> EventResult {
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }
        if !key.key.is_activation() {
            return EventResult::Ignored;
        }
        // Activation keys never scroll the page, even when disabled
        self.toggle();
        EventResult::Consumed
    }

    fn on_click(&self) -> EventResult {
        self.toggle();
        EventResult::Consumed
    }

    fn on_blur(&self) {
        self.mark_as_touched();
    }
}

impl FormControl for ToggleControl {
    type Value = bool;

    /// `None` coerces to `false`.
    fn write_value(&self, value: Option<bool>) {
        self.set_value(value.unwrap_or(false));
    }

    fn register_on_change(&self, f: ChangeFn<bool>) {
        self.callbacks.set_on_change(f);
    }

    fn register_on_touched(&self, f: TouchedFn) {
        self.callbacks.set_on_touched(f);
    }

    fn set_disabled_state(&self, disabled: bool) {
        self.set_disabled(disabled);
    }
}
