//! Event routing shared by all controls.

use crate::event::{Event, EventResult, KeyCombo};
use crate::id::WidgetId;
use crate::layout::LayoutResult;

/// A control that reacts to host input.
///
/// All handlers default to `EventResult::Ignored`, so a control only
/// implements the events it cares about. Hosts usually call
/// [`handle_event`](Widget::handle_event) and let it route.
pub trait Widget: Send + Sync {
    /// Unique id of this control instance.
    fn id(&self) -> WidgetId;

    /// Whether observable state changed since the last `clear_dirty`.
    fn is_dirty(&self) -> bool;

    fn clear_dirty(&self);

    /// Whether the control currently accepts input focus.
    fn is_focusable(&self) -> bool {
        true
    }

    /// Key press while focused.
    fn on_key(&self, _key: &KeyCombo) -> EventResult {
        EventResult::Ignored
    }

    /// Activation click on the control itself.
    fn on_click(&self) -> EventResult {
        EventResult::Ignored
    }

    /// Click on a rendered option row.
    fn on_option_click(&self, _index: usize) -> EventResult {
        EventResult::Ignored
    }

    /// Pointer over a rendered option row.
    fn on_option_hover(&self, _index: usize) -> EventResult {
        EventResult::Ignored
    }

    /// Pointer interaction anywhere on the host surface.
    fn on_pointer_down(&self, _x: u16, _y: u16, _layout: &LayoutResult) -> EventResult {
        EventResult::Ignored
    }

    fn on_focus(&self) {}

    fn on_blur(&self) {}

    /// Route a host event to the matching handler.
    fn handle_event(&self, event: &Event, layout: &LayoutResult) -> EventResult {
        match event {
            Event::Key(key) => self.on_key(key),
            Event::Click => self.on_click(),
            Event::OptionClick(index) => self.on_option_click(*index),
            Event::OptionHover(index) => self.on_option_hover(*index),
            Event::PointerDown { x, y, .. } => self.on_pointer_down(*x, *y, layout),
            Event::Focus => {
                self.on_focus();
                EventResult::Ignored
            }
            Event::Blur => {
                self.on_blur();
                EventResult::Ignored
            }
        }
    }
}
