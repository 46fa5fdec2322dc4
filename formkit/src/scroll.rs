//! Scroll bookkeeping for a vertical list of rows.

use serde::{Deserialize, Serialize};

/// Scroll state of a dropdown option list.
///
/// `viewport` and `content_height` are fed from host layout; `offset` is the
/// first visible row position and is always clamped to the valid range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListScroll {
    /// Current scroll offset (rows from top).
    pub offset: u16,
    /// Visible height of the list.
    pub viewport: u16,
    /// Total height of all rows.
    pub content_height: u16,
}

impl ListScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum scroll offset (content_height - viewport).
    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport)
    }

    /// Whether content exceeds viewport (scrolling needed).
    pub fn can_scroll(&self) -> bool {
        self.content_height > self.viewport
    }

    /// Update viewport and content sizes, clamping the offset.
    pub fn set_dimensions(&mut self, viewport: u16, content_height: u16) {
        self.viewport = viewport;
        self.content_height = content_height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Adjust the offset so the span `[top, top + height)` is visible.
    ///
    /// Returns true if the offset changed.
    pub fn ensure_visible(&mut self, top: u16, height: u16) -> bool {
        let before = self.offset;
        let bottom = top.saturating_add(height);

        if top < self.offset {
            self.offset = top;
        } else if bottom > self.offset.saturating_add(self.viewport) {
            self.offset = bottom.saturating_sub(self.viewport);
        }
        self.offset = self.offset.min(self.max_offset());

        self.offset != before
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

/// Height in cells of `count` rows of `row_height`, saturating at `u16::MAX`.
pub(crate) fn rows_extent(count: usize, row_height: u16) -> u16 {
    u16::try_from(count)
        .unwrap_or(u16::MAX)
        .saturating_mul(row_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll(viewport: u16, content: u16) -> ListScroll {
        let mut s = ListScroll::new();
        s.set_dimensions(viewport, content);
        s
    }

    #[test]
    fn test_row_below_viewport_scrolls_down() {
        let mut s = scroll(3, 10);
        assert!(s.ensure_visible(5, 1));
        assert_eq!(s.offset, 3);
    }

    #[test]
    fn test_row_above_viewport_scrolls_up() {
        let mut s = scroll(3, 10);
        s.offset = 6;
        assert!(s.ensure_visible(2, 1));
        assert_eq!(s.offset, 2);
    }

    #[test]
    fn test_visible_row_keeps_offset() {
        let mut s = scroll(3, 10);
        s.offset = 2;
        assert!(!s.ensure_visible(3, 1));
        assert_eq!(s.offset, 2);
    }

    #[test]
    fn test_offset_clamped_when_content_shrinks() {
        let mut s = scroll(3, 10);
        s.offset = 7;
        s.set_dimensions(3, 4);
        assert_eq!(s.offset, 1);
        assert!(s.can_scroll());
    }

    #[test]
    fn test_rows_extent_saturates() {
        assert_eq!(rows_extent(4, 2), 8);
        assert_eq!(rows_extent(65_536, 1), u16::MAX);
        assert_eq!(rows_extent(70_000, 1), u16::MAX);
        assert_eq!(rows_extent(40_000, 2), u16::MAX);
    }
}
