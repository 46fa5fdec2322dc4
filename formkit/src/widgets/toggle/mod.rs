//! Toggle widget - a boolean on/off switch with optional label.

pub mod events;
pub mod render;
mod state;

pub use render::ToggleView;
pub use state::ToggleControl;
