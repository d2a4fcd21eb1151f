//! A one-line key legend for a data table, grouped by concern.

use crate::keymap::HelpSection;
use crate::render;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug)]
pub struct HelpBarOptions {
    pub style: Style,
    pub key_style: Style,
    pub group_style: Style,
    /// Between bindings of one section.
    pub separator: String,
    /// Between sections.
    pub section_separator: String,
}

impl Default for HelpBarOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            key_style: Style::default(),
            group_style: Style::default().add_modifier(Modifier::DIM),
            separator: " • ".to_string(),
            section_separator: " │ ".to_string(),
        }
    }
}

/// Key legend, typically fed from
/// [`DataTableView::help_sections`](crate::datatable::DataTableView::help_sections) so only
/// enabled features are listed.
///
/// Sections that do not fit in full are dropped from the end; the first section is always
/// drawn, clipped if it must be.
#[derive(Clone, Debug, Default)]
pub struct HelpBar {
    sections: Vec<HelpSection>,
    options: HelpBarOptions,
}

impl HelpBar {
    pub fn new(sections: Vec<HelpSection>) -> Self {
        Self {
            sections,
            options: HelpBarOptions::default(),
        }
    }

    pub fn with_options(sections: Vec<HelpSection>, options: HelpBarOptions) -> Self {
        Self { sections, options }
    }

    pub fn set_sections(&mut self, sections: Vec<HelpSection>) {
        self.sections = sections;
    }

    pub fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.options.style);
        let line = self.fitted_line(area.width as usize);
        render::render_line_clipped(
            area.x,
            area.y,
            0,
            area.width,
            buf,
            &line,
            self.options.style,
        );
    }

    fn fitted_line(&self, width: usize) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut used = 0usize;
        for (i, section) in self.sections.iter().enumerate() {
            let mut piece = Vec::new();
            if i > 0 {
                piece.push(Span::styled(
                    self.options.section_separator.clone(),
                    self.options.style,
                ));
            }
            piece.extend(self.section_spans(section));
            let piece_width: usize = piece.iter().map(|s| s.content.width()).sum();
            if i > 0 && used + piece_width > width {
                break;
            }
            used += piece_width;
            spans.extend(piece);
        }
        Line::from(spans)
    }

    fn section_spans(&self, section: &HelpSection) -> Vec<Span<'static>> {
        let o = &self.options;
        let mut spans = vec![Span::styled(
            format!("{}: ", section.group.label()),
            o.group_style,
        )];
        for (i, b) in section.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(o.separator.clone(), o.style));
            }
            spans.push(Span::styled(b.help_key.clone(), o.key_style));
            spans.push(Span::styled(format!(" {}", b.help_desc), o.style));
        }
        spans
    }
}
