//! Form controls.
//!
//! Each control is a cheap-to-clone handle over shared state: the host keeps
//! one clone for rendering and event forwarding while the form layer holds
//! another through the [`FormControl`](crate::adapter::FormControl) adapter.
//!
//! Controls never render themselves. `view()` returns a plain snapshot the
//! host turns into terminal cells, DOM nodes, or anything else.

pub mod select;
pub mod toggle;
pub mod traits;

pub use select::{SelectControl, SelectOption, SelectView};
pub use toggle::{ToggleControl, ToggleView};
pub use traits::Widget;
