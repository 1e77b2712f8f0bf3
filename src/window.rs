//! Fixed-size list windowing.
//!
//! Only the rows that intersect the viewport (plus a small overscan) are
//! materialised, regardless of how many tasks pass the filter. Heights and
//! offsets are in terminal rows. Windowing decides what gets drawn and
//! nothing else: order and membership come from the filtered slice.

use std::ops::Range;

/// Rows rendered past each edge of the viewport.
pub const DEFAULT_OVERSCAN: usize = 2;

/// Task row height when none is configured: border, three content lines, border.
pub const DEFAULT_ROW_HEIGHT: usize = 5;

/// Scroll state for a list whose items all share one height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    item_height: usize,
    viewport_height: usize,
    scroll_offset: usize,
    overscan: usize,
}

impl ListWindow {
    /// Create a window scrolled to the top. A zero item height is treated as one.
    pub fn new(item_height: usize, viewport_height: usize) -> Self {
        ListWindow {
            item_height: item_height.max(1),
            viewport_height,
            scroll_offset: 0,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn item_height(&self) -> usize {
        self.item_height
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Resize the viewport (the terminal changed size) and re-clamp.
    pub fn set_viewport_height(&mut self, viewport_height: usize, item_count: usize) {
        self.viewport_height = viewport_height;
        self.clamp(item_count);
    }

    /// Total scrollable height of `item_count` rows.
    pub fn content_height(&self, item_count: usize) -> usize {
        item_count * self.item_height
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self, item_count: usize) -> usize {
        self.content_height(item_count)
            .saturating_sub(self.viewport_height)
    }

    /// Pull the offset back inside the content after the item count shrank.
    pub fn clamp(&mut self, item_count: usize) {
        self.scroll_offset = self.scroll_offset.min(self.max_offset(item_count));
    }

    /// Scroll by `delta` rows, negative meaning up.
    pub fn scroll_by(&mut self, delta: isize, item_count: usize) {
        self.scroll_offset = if delta < 0 {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as usize)
        };
        self.clamp(item_count);
    }

    /// Scroll the minimum distance needed for `index` to be fully visible.
    ///
    /// An item taller than the viewport is aligned to the top edge.
    pub fn scroll_to_item(&mut self, index: usize, item_count: usize) {
        if item_count == 0 {
            self.scroll_offset = 0;
            return;
        }
        let index = index.min(item_count - 1);
        let top = index * self.item_height;
        let bottom = top + self.item_height;

        if top < self.scroll_offset || self.item_height > self.viewport_height {
            self.scroll_offset = top;
        } else if bottom > self.scroll_offset + self.viewport_height {
            self.scroll_offset = bottom - self.viewport_height;
        }
        self.clamp(item_count);
    }

    /// Indices of the items to materialise for a list of `item_count`.
    pub fn visible_range(&self, item_count: usize) -> Range<usize> {
        if item_count == 0 || self.viewport_height == 0 {
            return 0..0;
        }
        let offset = self.scroll_offset.min(self.max_offset(item_count));
        let first = offset / self.item_height;
        let last = (offset + self.viewport_height).div_ceil(self.item_height);

        let start = first.saturating_sub(self.overscan);
        let end = (last + self.overscan).min(item_count);
        start..end
    }

    /// Top edge of `index` relative to the viewport; negative when scrolled past.
    pub fn item_top(&self, index: usize) -> isize {
        (index * self.item_height) as isize - self.scroll_offset as isize
    }
}
