//! Low-level drawing helpers shared by the table renderer.
//!
//! Everything here clips by display columns (wide chars count as two) and never writes
//! outside the `max_cols` budget it is given.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

const TAB_WIDTH: usize = 4;

/// Scroll geometry along one axis, in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    pub offset: u64,
    pub viewport: u64,
    pub content: u64,
}

impl ScrollMetrics {
    pub fn max_offset(&self) -> u64 {
        self.content.saturating_sub(self.viewport)
    }
}

pub fn render_scrollbar(area: Rect, buf: &mut Buffer, metrics: ScrollMetrics, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if metrics.content <= metrics.viewport || metrics.content == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((metrics.viewport as f64 / metrics.content as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_offset = metrics.max_offset().max(1) as f64;
    let thumb_top = ((metrics.offset as f64 / max_offset) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            " "
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

/// Writes chars left to right, skipping `start_col` display columns first.
struct ClippedWriter<'a> {
    buf: &'a mut Buffer,
    x: u16,
    y: u16,
    start_col: usize,
    max_cols: usize,
    col: usize,
    out_cols: usize,
}

impl<'a> ClippedWriter<'a> {
    fn new(buf: &'a mut Buffer, x: u16, y: u16, start_col: u32, max_cols: u16) -> Self {
        Self {
            buf,
            x,
            y,
            start_col: start_col as usize,
            max_cols: max_cols as usize,
            col: 0,
            out_cols: 0,
        }
    }

    fn put_cell(&mut self, symbol: &str, style: Style) {
        let dx = self.out_cols as u16;
        if let Some(cell) = self.buf.cell_mut((self.x + dx, self.y)) {
            cell.set_style(style);
            cell.set_symbol(symbol);
        }
        self.out_cols += 1;
    }

    /// Returns `false` once the budget is exhausted.
    fn push(&mut self, ch: char, style: Style) -> bool {
        if ch == '\t' {
            for _ in 0..TAB_WIDTH {
                if !self.push(' ', style) {
                    return false;
                }
            }
            return true;
        }

        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            return true;
        }
        if self.col + w <= self.start_col {
            self.col += w;
            return true;
        }
        // A wide char straddling the left clip edge is dropped entirely.
        if self.col < self.start_col {
            self.col += w;
            return true;
        }
        if self.out_cols + w > self.max_cols {
            return false;
        }

        let mut tmp = [0u8; 4];
        let s = ch.encode_utf8(&mut tmp);
        self.put_cell(s, style);
        self.col += w;
        if w == 2 {
            self.put_cell("", style);
        }
        true
    }
}

pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    if max_cols == 0 {
        return;
    }
    let mut w = ClippedWriter::new(buf, x, y, start_col, max_cols);
    for ch in input.chars() {
        if !w.push(ch, style) {
            return;
        }
    }
}

/// Like [`render_str_clipped`], but for a styled [`Line`]. Spans without a style of their
/// own (and the line itself) fall back to `fallback_style`.
pub fn render_line_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    line: &Line<'_>,
    fallback_style: Style,
) {
    if max_cols == 0 {
        return;
    }
    let base = fallback_style.patch(line.style);
    let mut w = ClippedWriter::new(buf, x, y, start_col, max_cols);
    for span in &line.spans {
        let style = base.patch(span.style);
        for ch in span.content.chars() {
            if !w.push(ch, style) {
                return;
            }
        }
    }
}

/// Renders `input` horizontally centered in the first row of `area`.
pub fn render_str_centered(area: Rect, buf: &mut Buffer, input: &str, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let w = display_width(input).min(area.width as usize) as u16;
    let x = area.x + (area.width - w) / 2;
    render_str_clipped(x, area.y, 0, w, buf, input, style);
}

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}
