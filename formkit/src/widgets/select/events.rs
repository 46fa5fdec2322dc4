//! Event handling for the Select widget.

use crate::adapter::{ChangeFn, FormControl, TouchedFn};
use crate::event::{EventResult, Key, KeyCombo};
use crate::id::WidgetId;
use crate::layout::{self, LayoutResult};
use crate::widgets::traits::Widget;

use super::SelectControl;

impl<V> Widget for SelectControl<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    fn id(&self) -> WidgetId {
        SelectControl::id(self).clone()
    }

    fn is_dirty(&self) -> bool {
        SelectControl::is_dirty(self)
    }

    fn clear_dirty(&self) {
        SelectControl::clear_dirty(self)
    }

    fn is_focusable(&self) -> bool {
        !self.is_disabled()
    }

    fn on_key(&self, key: &KeyCombo) -> EventResult {
        if self.is_disabled() {
            return EventResult::Ignored;
        }
        // Ignore keys with ctrl/alt modifiers
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }

        if !self.is_open() {
            // Closed state - open on Enter, Space, Down or Up
            match key.key {
                Key::Enter | Key::Char(' ') | Key::Down | Key::Up => {
                    self.open();
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            }
        } else {
            // Open state - navigate and select
            match key.key {
                Key::Enter | Key::Char(' ') => {
                    self.commit_focused();
                    EventResult::Consumed
                }
                Key::Down => {
                    self.move_focus(true);
                    EventResult::Consumed
                }
                Key::Up => {
                    self.move_focus(false);
                    EventResult::Consumed
                }
                Key::Home => {
                    self.focus_first();
                    EventResult::Consumed
                }
                Key::End => {
                    self.focus_last();
                    EventResult::Consumed
                }
                Key::Escape => {
                    self.close();
                    EventResult::Consumed
                }
                // Focus still moves on
                Key::Tab | Key::BackTab => {
                    self.close();
                    EventResult::Handled
                }
                _ => EventResult::Ignored,
            }
        }
    }

    fn on_click(&self) -> EventResult {
        if self.is_disabled() {
            return EventResult::Ignored;
        }
        // No change event on toggle - only on actual selection
        self.toggle_open();
        EventResult::Consumed
    }

    fn on_option_click(&self, index: usize) -> EventResult {
        if !self.is_open() {
            return EventResult::Ignored;
        }
        // Clicks on disabled rows are swallowed without selecting
        self.click_option(index);
        EventResult::Consumed
    }

    fn on_option_hover(&self, index: usize) -> EventResult {
        if self.hover_option(index) {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    fn on_pointer_down(&self, x: u16, y: u16, layout: &LayoutResult) -> EventResult {
        if !self.is_open() {
            return EventResult::Ignored;
        }

        let id = SelectControl::id(self);
        let listbox = id.listbox_id();
        if layout::hit_any(layout, [id.as_str(), listbox.as_str()], x, y) {
            return EventResult::Ignored;
        }

        // Outside the trigger and the list: close, but let the host act too
        self.handle_outside_interaction();
        EventResult::Handled
    }

    fn on_blur(&self) {
        self.close();
        self.mark_as_touched();
    }
}

impl<V> FormControl for SelectControl<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    type Value = V;

    fn write_value(&self, value: Option<V>) {
        self.set_value(value);
    }

    fn register_on_change(&self, f: ChangeFn<V>) {
        self.callbacks.set_on_change(f);
    }

    fn register_on_touched(&self, f: TouchedFn) {
        self.callbacks.set_on_touched(f);
    }

    fn set_disabled_state(&self, disabled: bool) {
        self.set_disabled(disabled);
    }
}
