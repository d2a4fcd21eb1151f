//! Uniform-height row virtualization on top of `virtualizer`.
//!
//! Every row is `row_height` units tall. Space before the first row (a non-sticky header) is
//! virtualizer padding, so item starts are content offsets. Variable-height rows are not
//! supported on this path.

use virtualizer::Align;
use virtualizer::VirtualItem;
use virtualizer::Virtualizer;
use virtualizer::VirtualizerOptions;

pub const DEFAULT_OVERSCAN: usize = 5;
pub const DEFAULT_VIRTUALIZE_THRESHOLD: usize = 1000;

/// The virtualized path is taken only above the threshold.
pub fn should_virtualize(row_count: usize, threshold: usize) -> bool {
    row_count > threshold
}

/// Inclusive index range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

pub struct RowWindow {
    v: Virtualizer,
    items: Vec<VirtualItem>,
    row_count: usize,
    row_height: u32,
    overscan: usize,
    padding_start: u32,
    viewport: u32,
}

impl Default for RowWindow {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl RowWindow {
    pub fn new(row_count: usize, row_height: u32) -> Self {
        let row_height = row_height.max(1);
        Self {
            v: build_virtualizer(row_count, row_height, DEFAULT_OVERSCAN),
            items: Vec::new(),
            row_count,
            row_height,
            overscan: DEFAULT_OVERSCAN,
            padding_start: 0,
            viewport: 0,
        }
    }

    pub fn set_count(&mut self, row_count: usize) {
        if row_count != self.row_count {
            self.row_count = row_count;
            self.v.set_count(row_count);
            self.clamp();
        }
    }

    /// The size closure captures the height, so a new height rebuilds the virtualizer.
    pub fn set_row_height(&mut self, row_height: u32) {
        let row_height = row_height.max(1);
        if row_height == self.row_height {
            return;
        }
        let offset = self.v.scroll_offset();
        self.row_height = row_height;
        self.v = build_virtualizer(self.row_count, row_height, self.overscan);
        self.v.set_padding(self.padding_start, 0);
        self.v.set_viewport_size(self.viewport);
        self.v.set_scroll_offset(offset);
        self.clamp();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.overscan = overscan;
        self.v.set_overscan(overscan);
    }

    pub fn set_padding_start(&mut self, padding: u32) {
        if padding != self.padding_start {
            self.padding_start = padding;
            self.v.set_padding(padding, 0);
            self.clamp();
        }
    }

    pub fn set_viewport(&mut self, viewport: u32) {
        self.viewport = viewport;
        self.v.set_viewport_size(viewport);
        self.clamp();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.v.scroll_offset()
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.v.set_scroll_offset(offset.min(self.max_scroll_offset()));
    }

    pub fn total_size(&self) -> u64 {
        self.v.total_size()
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.v.total_size().saturating_sub(self.viewport as u64)
    }

    /// Materialized rows (overscan included) in ascending index order.
    pub fn virtual_rows(&mut self) -> &[VirtualItem] {
        self.v.collect_virtual_items(&mut self.items);
        &self.items
    }

    pub fn visible_range(&mut self) -> Option<RowRange> {
        let rows = self.virtual_rows();
        let first = rows.first()?;
        let last = rows.last()?;
        Some(RowRange {
            start: first.index,
            end: last.index,
        })
    }

    /// Scrolls the minimum distance that brings row `index` fully into view.
    pub fn reveal(&mut self, index: usize) {
        if index < self.row_count {
            self.v.scroll_to_index(index, Align::Auto);
            self.clamp();
        }
    }

    fn clamp(&mut self) {
        let max = self.max_scroll_offset();
        if self.v.scroll_offset() > max {
            self.v.set_scroll_offset(max);
        }
    }
}

fn build_virtualizer(count: usize, row_height: u32, overscan: usize) -> Virtualizer {
    let mut opts = VirtualizerOptions::new(count, move |_| row_height);
    opts.overscan = overscan;
    Virtualizer::new(opts)
}
