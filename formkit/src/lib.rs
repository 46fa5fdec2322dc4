//! Headless form controls: a toggle switch and a select dropdown.
//!
//! Controls own their interaction state (value, open/closed, keyboard focus)
//! and expose it as render snapshots; the host draws them and forwards input
//! as [`Event`]s. Both controls implement the [`FormControl`] adapter so a
//! form layer such as [`FormField`] can bind a value to them in both
//! directions.

pub mod adapter;
pub mod aria;
pub mod event;
pub mod field;
pub mod id;
pub mod layout;
pub mod schedule;
pub mod scroll;
pub mod widgets;

pub use adapter::{ChangeFn, FormControl, TouchedFn};
pub use event::{Event, EventResult, Key, KeyCombo, Modifiers, MouseButton};
pub use field::FormField;
pub use id::{GlobalIds, IdSource, SequentialIds, UuidIds, WidgetId};
pub use layout::{LayoutResult, Rect};
pub use schedule::{FrameQueue, TaskHandle};
pub use widgets::{SelectControl, SelectOption, ToggleControl, Widget};

pub mod prelude {
    pub use crate::adapter::FormControl;
    pub use crate::event::{Event, EventResult, Key, KeyCombo, Modifiers};
    pub use crate::field::FormField;
    pub use crate::layout::{LayoutResult, Rect};
    pub use crate::schedule::FrameQueue;
    pub use crate::widgets::{SelectControl, SelectOption, SelectView, ToggleControl, ToggleView, Widget};
}
