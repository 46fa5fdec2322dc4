//! Select widget - a single-value dropdown with keyboard navigation.

pub mod events;
pub mod item;
pub mod render;
mod state;

pub use item::SelectOption;
pub use render::{OptionRow, SelectView};
pub use state::SelectControl;
