//! Geometry of one frame: where gutters and columns land horizontally, and which body
//! blocks (rows, detail rows, the empty-state row) occupy which content offsets.
//!
//! The center (unpinned) group scrolls horizontally and is virtualized with `virtualizer`,
//! since column widths vary. Pinned groups are laid out directly at the edges.

use crate::datatable::column::Pin;
use crate::datatable::column::PinGroups;
use std::sync::Arc;
use virtualizer::Align;
use virtualizer::VirtualItem;
use virtualizer::Virtualizer;
use virtualizer::VirtualizerOptions;

pub const EXPAND_GUTTER_WIDTH: u16 = 2;
pub const SELECT_GUTTER_WIDTH: u16 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gutter {
    Expand,
    Select,
}

/// One column as placed on screen for this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSlot {
    /// Index into the column slice.
    pub column: usize,
    pub pin: Option<Pin>,
    pub x: u16,
    /// Visible width after clipping.
    pub width: u16,
    /// Cells of the column hidden off the left edge.
    pub clip_left: u32,
    /// Absolute x of the resize handle, when it is on screen.
    pub handle_x: Option<u16>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HorizontalLayout {
    pub gutters: Vec<(Gutter, u16, u16)>,
    pub slots: Vec<ColumnSlot>,
    pub center_x: u16,
    pub center_width: u16,
}

impl HorizontalLayout {
    pub fn gutter_at(&self, x: u16) -> Option<Gutter> {
        self.gutters
            .iter()
            .find(|(_, gx, gw)| x >= *gx && x < gx + gw)
            .map(|(g, _, _)| *g)
    }

    pub fn handle_at(&self, x: u16) -> Option<usize> {
        self.slots
            .iter()
            .find(|s| s.handle_x == Some(x))
            .map(|s| s.column)
    }

    pub fn slot_at(&self, x: u16) -> Option<&ColumnSlot> {
        self.slots.iter().find(|s| x >= s.x && x < s.x + s.width)
    }
}

/// Inputs for [`ColumnStrip::layout`].
#[derive(Clone, Copy, Debug)]
pub struct StripInputs<'a> {
    pub x: u16,
    pub width: u16,
    pub expandable: bool,
    pub selectable: bool,
    pub groups: &'a PinGroups,
    /// Effective width per column index (hidden columns included, unused).
    pub widths: &'a [u16],
    pub gap: u16,
}

/// Horizontal layout state that survives between frames: the center-group virtualizer and
/// the scroll offset it owns.
pub struct ColumnStrip {
    v: Virtualizer,
    items: Vec<VirtualItem>,
    sizes: Vec<u32>,
    gap: u32,
    viewport: u32,
    overscan: usize,
}

impl Default for ColumnStrip {
    fn default() -> Self {
        let overscan = 2;
        Self {
            v: build_virtualizer(&[], 1, overscan),
            items: Vec::new(),
            sizes: Vec::new(),
            gap: 1,
            viewport: 0,
            overscan,
        }
    }
}

impl ColumnStrip {
    pub fn scroll_offset(&self) -> u64 {
        self.v.scroll_offset()
    }

    pub fn total_size(&self) -> u64 {
        self.v.total_size()
    }

    pub fn scroll_by(&mut self, delta: i64) {
        let max = self.v.total_size().saturating_sub(self.viewport as u64);
        let next = (self.v.scroll_offset() as i64)
            .saturating_add(delta)
            .clamp(0, max as i64) as u64;
        self.v.set_scroll_offset(next);
    }

    /// Scrolls the minimum distance that shows center column `pos` (position in the group).
    pub fn reveal(&mut self, pos: usize) {
        if pos < self.sizes.len() {
            self.v.scroll_to_index(pos, Align::Auto);
        }
    }

    fn sync(&mut self, sizes: Vec<u32>, gap: u32, viewport: u32) {
        if sizes != self.sizes || gap != self.gap {
            let offset = self.v.scroll_offset();
            self.v = build_virtualizer(&sizes, gap, self.overscan);
            self.sizes = sizes;
            self.gap = gap;
            self.v.set_scroll_offset(offset);
        }
        self.viewport = viewport;
        self.v.set_viewport_size(viewport);
        let max = self.v.total_size().saturating_sub(viewport as u64);
        if self.v.scroll_offset() > max {
            self.v.set_scroll_offset(max);
        }
    }

    pub fn layout(&mut self, input: StripInputs<'_>) -> HorizontalLayout {
        let mut out = HorizontalLayout::default();
        let right_edge = input.x.saturating_add(input.width);
        let mut cursor = input.x;

        let mut push_gutter = |g: Gutter, w: u16, cursor: &mut u16| {
            let w = w.min(right_edge.saturating_sub(*cursor));
            if w > 0 {
                out.gutters.push((g, *cursor, w));
            }
            *cursor += w;
        };
        if input.expandable {
            push_gutter(Gutter::Expand, EXPAND_GUTTER_WIDTH, &mut cursor);
        }
        if input.selectable {
            push_gutter(Gutter::Select, SELECT_GUTTER_WIDTH, &mut cursor);
        }

        let span = |c: usize| input.widths[c].saturating_add(input.gap);

        for &c in &input.groups.left {
            if cursor >= right_edge {
                break;
            }
            out.slots.push(fixed_slot(
                c,
                Some(Pin::Left),
                cursor,
                input.widths[c],
                input.gap,
                right_edge,
            ));
            cursor = cursor.saturating_add(span(c)).min(right_edge);
        }

        let right_total: u16 = input
            .groups
            .right
            .iter()
            .fold(0u16, |acc, &c| acc.saturating_add(span(c)));
        let right_start = right_edge.saturating_sub(right_total).max(cursor);

        out.center_x = cursor;
        out.center_width = right_start - cursor;

        let sizes: Vec<u32> = input
            .groups
            .center
            .iter()
            .map(|&c| input.widths[c].max(1) as u32)
            .collect();
        self.sync(sizes, input.gap as u32, out.center_width as u32);
        self.v.collect_virtual_items(&mut self.items);
        let scroll_x = self.v.scroll_offset();
        for item in self.items.iter().copied() {
            let c = input.groups.center[item.index];
            let (x, width, clip_left) =
                clip_x(out.center_x, out.center_width, scroll_x, item.start, item.size);
            if width == 0 {
                continue;
            }
            let handle_rel = (item.start + item.size as u64) as i64 - scroll_x as i64;
            let handle_x = handle_for(
                out.center_x,
                out.center_width,
                handle_rel,
                input.gap,
                x + width,
            );
            out.slots.push(ColumnSlot {
                column: c,
                pin: None,
                x,
                width,
                clip_left,
                handle_x,
            });
        }

        let mut cursor = right_start;
        for &c in &input.groups.right {
            if cursor >= right_edge {
                break;
            }
            out.slots.push(fixed_slot(
                c,
                Some(Pin::Right),
                cursor,
                input.widths[c],
                input.gap,
                right_edge,
            ));
            cursor = cursor.saturating_add(span(c)).min(right_edge);
        }

        out
    }
}

fn build_virtualizer(sizes: &[u32], gap: u32, overscan: usize) -> Virtualizer {
    let sizes = Arc::new(sizes.to_vec());
    let sizes2 = sizes.clone();
    let mut opts = VirtualizerOptions::new(sizes.len(), move |i| {
        sizes2.get(i).copied().unwrap_or(1).max(1)
    });
    opts.gap = gap;
    opts.overscan = overscan;
    Virtualizer::new(opts)
}

fn fixed_slot(
    column: usize,
    pin: Option<Pin>,
    x: u16,
    width: u16,
    gap: u16,
    right_edge: u16,
) -> ColumnSlot {
    let visible = width.min(right_edge.saturating_sub(x));
    let handle = if gap > 0 {
        x.checked_add(width)
    } else {
        x.checked_add(width.saturating_sub(1))
    };
    ColumnSlot {
        column,
        pin,
        x,
        width: visible,
        clip_left: 0,
        handle_x: handle.filter(|h| *h < right_edge),
    }
}

/// Clips a span starting at content offset `start` against a viewport scrolled to `scroll`.
fn clip_x(area_x: u16, area_w: u16, scroll: u64, start: u64, size: u32) -> (u16, u16, u32) {
    let rel = start as i64 - scroll as i64;
    let clip_left = (-rel).max(0) as u32;
    let x = rel.max(0).min(area_w as i64) as u16;
    let max_w = area_w.saturating_sub(x);
    let visible_w = size.saturating_sub(clip_left).min(max_w as u32) as u16;
    (area_x + x, visible_w, clip_left)
}

fn handle_for(area_x: u16, area_w: u16, end_rel: i64, gap: u16, cell_end: u16) -> Option<u16> {
    let rel = if gap > 0 { end_rel } else { end_rel - 1 };
    if rel < 0 || rel >= area_w as i64 {
        return None;
    }
    let hx = area_x + rel as u16;
    if gap == 0 && hx >= cell_end {
        return None;
    }
    Some(hx)
}

/// What occupies a stretch of the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyBlockKind {
    /// The "no data" row spanning every column.
    Empty,
    Row(usize),
    /// Expanded detail content for a row.
    Detail(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyBlock {
    pub kind: BodyBlockKind,
    pub start: u64,
    pub height: u32,
}

impl BodyBlock {
    pub fn end(&self) -> u64 {
        self.start + self.height as u64
    }
}

pub fn empty_body(lead: u32, row_height: u32) -> Vec<BodyBlock> {
    vec![BodyBlock {
        kind: BodyBlockKind::Empty,
        start: lead as u64,
        height: row_height.max(1),
    }]
}

/// Every row in data order, each followed by its detail block when `detail_height` says so.
pub fn plain_body(
    row_count: usize,
    lead: u32,
    row_height: u32,
    mut detail_height: impl FnMut(usize) -> Option<u32>,
) -> Vec<BodyBlock> {
    let mut blocks = Vec::with_capacity(row_count);
    let mut offset = lead as u64;
    for i in 0..row_count {
        blocks.push(BodyBlock {
            kind: BodyBlockKind::Row(i),
            start: offset,
            height: row_height,
        });
        offset += row_height as u64;
        if let Some(h) = detail_height(i).filter(|h| *h > 0) {
            blocks.push(BodyBlock {
                kind: BodyBlockKind::Detail(i),
                start: offset,
                height: h,
            });
            offset += h as u64;
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(left: &[usize], center: &[usize], right: &[usize]) -> PinGroups {
        PinGroups {
            left: left.to_vec(),
            center: center.to_vec(),
            right: right.to_vec(),
        }
    }

    #[test]
    fn gutters_then_pinned_then_center() {
        let g = groups(&[0], &[1, 2], &[3]);
        let widths = [5u16, 6, 6, 4];
        let mut strip = ColumnStrip::default();
        let l = strip.layout(StripInputs {
            x: 0,
            width: 40,
            expandable: true,
            selectable: true,
            groups: &g,
            widths: &widths,
            gap: 1,
        });
        assert_eq!(l.gutters, vec![(Gutter::Expand, 0, 2), (Gutter::Select, 2, 4)]);
        let cols: Vec<usize> = l.slots.iter().map(|s| s.column).collect();
        assert_eq!(cols, vec![0, 1, 2, 3]);
        assert_eq!(l.slots[0].x, 6);
        assert_eq!(l.slots[0].handle_x, Some(11));
        assert_eq!(l.center_x, 12);
        // right group hugs the right edge: 40 - (4 + 1)
        assert_eq!(l.slots[3].x, 35);
        assert_eq!(l.slots[3].pin, Some(Pin::Right));
        assert_eq!(l.handle_at(11), Some(0));
        assert_eq!(l.gutter_at(3), Some(Gutter::Select));
    }

    #[test]
    fn center_scroll_clips_first_column() {
        let g = groups(&[], &[0, 1, 2], &[]);
        let widths = [10u16, 10, 10];
        let mut strip = ColumnStrip::default();
        let input = StripInputs {
            x: 0,
            width: 12,
            expandable: false,
            selectable: false,
            groups: &g,
            widths: &widths,
            gap: 1,
        };
        strip.layout(input);
        strip.scroll_by(4);
        let l = strip.layout(input);
        assert_eq!(strip.scroll_offset(), 4);
        let first = l.slots[0];
        assert_eq!((first.column, first.x, first.width, first.clip_left), (0, 0, 6, 4));
        assert_eq!(first.handle_x, Some(6));
    }

    #[test]
    fn extreme_widths_and_gap_saturate() {
        let g = groups(&[0], &[1], &[2]);
        let widths = [u16::MAX; 3];
        let mut strip = ColumnStrip::default();
        let l = strip.layout(StripInputs {
            x: 0,
            width: 40,
            expandable: false,
            selectable: false,
            groups: &g,
            widths: &widths,
            gap: u16::MAX,
        });
        assert_eq!(l.slots.len(), 1);
        assert_eq!((l.slots[0].x, l.slots[0].width), (0, 40));
        assert_eq!(l.slots[0].handle_x, None);
        assert_eq!(l.center_width, 0);
    }

    #[test]
    fn plain_body_interleaves_details() {
        let blocks = plain_body(3, 0, 2, |i| if i == 1 { Some(3) } else { None });
        let kinds: Vec<BodyBlockKind> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BodyBlockKind::Row(0),
                BodyBlockKind::Row(1),
                BodyBlockKind::Detail(1),
                BodyBlockKind::Row(2)
            ]
        );
        assert_eq!(blocks[3].start, 7);
        assert_eq!(blocks[2].end(), 7);
    }
}
