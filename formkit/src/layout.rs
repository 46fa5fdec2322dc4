//! Geometry reported by the host after a render pass.

use std::collections::HashMap;

/// Element id -> absolute rect, as laid out by the host.
pub type LayoutResult = HashMap<String, Rect>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if a point is inside this rect.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Whether `(x, y)` falls inside any of the rects registered under `ids`.
pub fn hit_any<'a>(
    layout: &LayoutResult,
    ids: impl IntoIterator<Item = &'a str>,
    x: u16,
    y: u16,
) -> bool {
    ids.into_iter()
        .filter_map(|id| layout.get(id))
        .any(|rect| rect.contains(x, y))
}
