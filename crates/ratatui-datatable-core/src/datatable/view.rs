use crate::datatable::column::Column;
use crate::datatable::column::ColumnWidths;
use crate::datatable::column::PinGroups;
use crate::datatable::column::Record;
use crate::datatable::column::WidthDefaults;
use crate::datatable::column::partition_columns;
use crate::datatable::column::validate_column_ids;
use crate::datatable::expansion;
use crate::datatable::layout;
use crate::datatable::layout::BodyBlock;
use crate::datatable::layout::BodyBlockKind;
use crate::datatable::layout::ColumnStrip;
use crate::datatable::layout::Gutter;
use crate::datatable::layout::HorizontalLayout;
use crate::datatable::layout::StripInputs;
use crate::datatable::resize::ResizeController;
use crate::datatable::resize::clamp_width;
use crate::datatable::row_key::RowKey;
use crate::datatable::selection;
use crate::datatable::selection::RowIdSet;
use crate::datatable::selection::SelectionMode;
use crate::datatable::sort;
use crate::datatable::sort::SortState;
use crate::datatable::state::StateBinding;
use crate::datatable::window;
use crate::datatable::window::RowWindow;
use crate::error::Result;
use crate::input::InputEvent;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap::DataTableBindings;
use crate::keymap::HelpGroup;
use crate::keymap::HelpSection;
use crate::keymap::TableKeyAction;
use crate::render;
use crate::render::ScrollMetrics;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use std::collections::BTreeMap;
use std::time::Duration;
use std::time::Instant;

const HSCROLL_STEP: i64 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataTableAction {
    None,
    Redraw,
    RowClicked { index: usize, id: String },
    RowDoubleClicked { index: usize, id: String },
    SelectionChanged,
    ExpansionChanged,
    SortChanged(SortState),
    ColumnResized { id: String, width: u16 },
}

/// Row spacing preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Density {
    Compact,
    #[default]
    Standard,
    Comfortable,
}

impl Density {
    pub fn row_height(self) -> u32 {
        match self {
            Density::Compact => 1,
            Density::Standard => 2,
            Density::Comfortable => 3,
        }
    }
}

/// Options for [`DataTableView`].
#[derive(Clone, Debug)]
pub struct DataTableViewOptions {
    pub selectable: bool,
    pub selection_mode: SelectionMode,
    pub expandable: bool,
    pub density: Density,
    /// Overrides the density row height.
    pub row_height: Option<u32>,
    pub striped: bool,
    pub sticky_header: bool,
    /// Row counts strictly above this take the virtualized path.
    pub virtualize_threshold: usize,
    pub overscan_rows: usize,
    pub col_gap: u16,
    pub width_defaults: WidthDefaults,
    pub empty_text: String,
    pub double_click_interval: Duration,
    pub show_scrollbar: bool,
    pub style: Style,
    pub header_style: Style,
    pub cursor_style: Style,
    pub selected_style: Style,
    pub stripe_style: Style,
    pub grid_line_style: Style,
    pub scrollbar_style: Style,
}

impl Default for DataTableViewOptions {
    fn default() -> Self {
        Self {
            selectable: false,
            selection_mode: SelectionMode::Multiple,
            expandable: false,
            density: Density::Standard,
            row_height: None,
            striped: false,
            sticky_header: true,
            virtualize_threshold: window::DEFAULT_VIRTUALIZE_THRESHOLD,
            overscan_rows: window::DEFAULT_OVERSCAN,
            col_gap: 1,
            width_defaults: WidthDefaults::default(),
            empty_text: "No data available".to_string(),
            double_click_interval: Duration::from_millis(400),
            show_scrollbar: true,
            style: Style::default(),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            selected_style: Style::default().add_modifier(Modifier::BOLD),
            stripe_style: Style::default(),
            grid_line_style: Style::default(),
            scrollbar_style: Style::default(),
        }
    }
}

impl DataTableViewOptions {
    pub fn row_height(&self) -> u32 {
        self.row_height
            .unwrap_or_else(|| self.density.row_height())
            .max(1)
    }
}

/// Renders the detail content of an expanded row.
pub type ExpandedRenderer<T> = Box<dyn Fn(&T) -> Vec<Line<'static>>>;

#[derive(Clone, Copy)]
struct TableStyles {
    base: Style,
    header: Style,
    cursor: Style,
    selected: Style,
    stripe: Style,
    grid_line: Style,
    muted: Style,
    accent: Style,
    scrollbar: Style,
}

struct BodyPlan {
    blocks: Vec<BodyBlock>,
    details: BTreeMap<usize, Vec<Line<'static>>>,
    total: u64,
}

#[derive(Clone, Copy, Debug)]
struct VisibleBlock {
    kind: BodyBlockKind,
    y: u16,
    height: u16,
}

/// Geometry of the last rendered frame, used for hit testing.
#[derive(Clone, Debug)]
struct Frame {
    content: Rect,
    header_y: Option<u16>,
    lead: u32,
    viewport: u32,
    horizontal: HorizontalLayout,
    visible: Vec<VisibleBlock>,
}

struct PaintContext<'a> {
    content: Rect,
    layout: &'a HorizontalLayout,
    styles: TableStyles,
}

/// A data table over app-owned rows with pinned columns, selection, expansion, sorting and
/// column resizing.
///
/// The table is immediate-mode: rows are passed to every `render` and `handle_event` call and
/// never stored. Small tables render every row (with expanded detail rows). Above
/// [`DataTableViewOptions::virtualize_threshold`] only the rows near the viewport are drawn,
/// at a uniform height.
///
/// Selection, expansion, sort and column widths are each either owned by the table or
/// controlled by the app (see [`DataTableView::control_selection`] and friends).
pub struct DataTableView<T> {
    options: DataTableViewOptions,
    bindings: DataTableBindings,
    columns: Vec<Column<T>>,
    groups: PinGroups,
    row_key: RowKey<T>,
    expanded_renderer: Option<ExpandedRenderer<T>>,
    selection: StateBinding<RowIdSet>,
    expansion: StateBinding<RowIdSet>,
    sort: StateBinding<SortState>,
    widths: StateBinding<ColumnWidths>,
    resize: ResizeController,
    rows: RowWindow,
    strip: ColumnStrip,
    scroll_y: u64,
    cursor: Option<usize>,
    header_focus: Option<usize>,
    last_click: Option<(String, Instant)>,
    virtualized: Option<bool>,
    frame: Option<Frame>,
}

impl<T> Default for DataTableView<T> {
    fn default() -> Self {
        Self {
            options: DataTableViewOptions::default(),
            bindings: DataTableBindings::default(),
            columns: Vec::new(),
            groups: PinGroups::default(),
            row_key: RowKey::default(),
            expanded_renderer: None,
            selection: StateBinding::default(),
            expansion: StateBinding::default(),
            sort: StateBinding::default(),
            widths: StateBinding::default(),
            resize: ResizeController::new(),
            rows: RowWindow::default(),
            strip: ColumnStrip::default(),
            scroll_y: 0,
            cursor: None,
            header_focus: None,
            last_click: None,
            virtualized: None,
            frame: None,
        }
    }
}

impl<T> DataTableView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DataTableViewOptions) -> Self {
        let mut v = Self::default();
        v.set_options(options);
        v
    }

    pub fn options(&self) -> &DataTableViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DataTableViewOptions) {
        self.options = options;
        self.rows.set_overscan(self.options.overscan_rows);
        self.rows.set_row_height(self.options.row_height());
    }

    pub fn bindings(&self) -> &DataTableBindings {
        &self.bindings
    }

    /// Help sections for the features this table has turned on.
    pub fn help_sections(&self) -> Vec<HelpSection> {
        let sortable = self.columns.iter().any(|c| c.visible && c.sortable);
        self.bindings
            .help_sections()
            .into_iter()
            .filter(|s| match s.group {
                HelpGroup::Select => self.options.selectable,
                HelpGroup::Expand => self.options.expandable,
                HelpGroup::Sort => sortable,
                HelpGroup::Navigate | HelpGroup::Resize => true,
            })
            .collect()
    }

    pub fn set_bindings(&mut self, bindings: DataTableBindings) {
        self.bindings = bindings;
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Replaces the column definitions. Column ids must be unique.
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) -> Result<()> {
        validate_column_ids(&columns)?;
        let focused = self
            .header_focus
            .and_then(|c| self.columns.get(c))
            .map(|c| c.id.clone());
        self.columns = columns;
        self.groups = partition_columns(&self.columns);
        self.header_focus = focused.and_then(|id| {
            self.groups
                .iter()
                .find(|&c| self.columns[c].id == id)
        });
        Ok(())
    }

    pub fn set_row_key(&mut self, row_key: RowKey<T>) {
        self.row_key = row_key;
    }

    pub fn set_expanded_renderer(&mut self, f: impl Fn(&T) -> Vec<Line<'static>> + 'static) {
        self.expanded_renderer = Some(Box::new(f));
    }

    pub fn clear_expanded_renderer(&mut self) {
        self.expanded_renderer = None;
    }

    /// Hands selection ownership to the app. Changes are requested through `on_change` and
    /// only take effect once the app calls [`DataTableView::set_selection`].
    pub fn control_selection(
        &mut self,
        value: RowIdSet,
        on_change: impl FnMut(&RowIdSet) + 'static,
    ) {
        self.selection = StateBinding::external(value, on_change);
    }

    pub fn control_expansion(
        &mut self,
        value: RowIdSet,
        on_change: impl FnMut(&RowIdSet) + 'static,
    ) {
        self.expansion = StateBinding::external(value, on_change);
    }

    pub fn control_sort(&mut self, value: SortState, on_change: impl FnMut(&SortState) + 'static) {
        self.sort = StateBinding::external(value, on_change);
    }

    pub fn control_column_widths(
        &mut self,
        value: ColumnWidths,
        on_change: impl FnMut(&ColumnWidths) + 'static,
    ) {
        self.widths = StateBinding::external(value, on_change);
    }

    pub fn set_selection(&mut self, value: RowIdSet) {
        self.selection.sync(value);
    }

    pub fn set_expansion(&mut self, value: RowIdSet) {
        self.expansion.sync(value);
    }

    pub fn set_sort(&mut self, value: SortState) {
        self.sort.sync(value);
    }

    pub fn set_column_widths(&mut self, value: ColumnWidths) {
        self.widths.sync(value);
    }

    pub fn selection(&self) -> &RowIdSet {
        self.selection.get()
    }

    pub fn expansion(&self) -> &RowIdSet {
        self.expansion.get()
    }

    pub fn sort(&self) -> &SortState {
        self.sort.get()
    }

    pub fn column_widths(&self) -> &ColumnWidths {
        self.widths.get()
    }

    /// Effective width of a column after overrides, defaults and clamping.
    pub fn column_width(&self, id: &str) -> Option<u16> {
        let c = self.columns.iter().position(|c| c.id == id)?;
        Some(self.effective_width(c))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor;
    }

    /// Id of the column whose header has keyboard focus.
    pub fn header_focus(&self) -> Option<&str> {
        self.header_focus
            .and_then(|c| self.columns.get(c))
            .map(|c| c.id.as_str())
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_dragging()
    }

    /// Whether the last render took the virtualized path.
    pub fn is_virtualized(&self) -> bool {
        self.virtualized.unwrap_or(false)
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_y
    }

    pub fn scroll_x(&self) -> u64 {
        self.strip.scroll_offset()
    }

    fn effective_width(&self, c: usize) -> u16 {
        let col = &self.columns[c];
        let defaults = self.options.width_defaults;
        let (min, max) = defaults.bounds(col);
        clamp_width(defaults.current_width(col, self.widths.get()) as i32, min, max)
    }

    fn effective_widths(&self) -> Vec<u16> {
        (0..self.columns.len())
            .map(|c| self.effective_width(c))
            .collect()
    }

    fn styles(&self, theme: &Theme) -> TableStyles {
        let base = if self.options.style == Style::default() {
            theme.text_primary
        } else {
            self.options.style
        };
        let grid_line = if self.options.grid_line_style == Style::default() {
            theme.text_muted
        } else {
            self.options.grid_line_style
        };
        TableStyles {
            base,
            header: self.options.header_style.patch(theme.accent),
            cursor: self.options.cursor_style,
            selected: self.options.selected_style.patch(theme.accent),
            stripe: theme.surface_alt.patch(self.options.stripe_style),
            grid_line,
            muted: theme.text_muted,
            accent: theme.accent,
            scrollbar: self.options.scrollbar_style,
        }
    }

    fn frame_metrics(&self) -> Option<(u32, u32)> {
        self.frame.as_ref().map(|f| (f.lead, f.viewport))
    }

    fn request_selection(&mut self, next: RowIdSet) {
        tracing::debug!(
            controlled = self.selection.is_controlled(),
            selected = next.len(),
            "selection change requested"
        );
        self.selection.request(next);
    }

    fn request_expansion(&mut self, next: RowIdSet) {
        tracing::debug!(
            controlled = self.expansion.is_controlled(),
            expanded = next.len(),
            "expansion change requested"
        );
        self.expansion.request(next);
    }

    fn request_sort(&mut self, next: SortState) {
        tracing::debug!(
            controlled = self.sort.is_controlled(),
            column = ?next.column,
            direction = ?next.direction,
            "sort change requested"
        );
        self.sort.request(next);
    }

    fn request_widths(&mut self, next: ColumnWidths) {
        tracing::debug!(
            controlled = self.widths.is_controlled(),
            "column widths change requested"
        );
        self.widths.request(next);
    }
}

impl<T: Record> DataTableView<T> {
    /// Draws the table into `area`.
    ///
    /// Fails when a row identity cannot be resolved or two rows share one.
    pub fn render(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        data: &[T],
    ) -> Result<()> {
        let _span = tracing::trace_span!(
            "datatable.render",
            rows = data.len(),
            width = area.width,
            height = area.height
        )
        .entered();

        if area.width == 0 || area.height == 0 {
            self.frame = None;
            return Ok(());
        }

        let ids = self.row_key.resolve_all(data)?;
        self.clamp_cursor(data.len());
        let styles = self.styles(theme);

        let (content, scrollbar_x) = if self.options.show_scrollbar && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        let header_h = 1u16;
        let sticky = self.options.sticky_header;
        let body = if sticky {
            Rect::new(
                content.x,
                content.y + header_h,
                content.width,
                content.height - header_h,
            )
        } else {
            content
        };
        let lead = if sticky { 0 } else { header_h as u32 };
        let viewport = body.height as u32;

        buf.set_style(content, styles.base);

        let plan = self.plan_body(data, &ids, lead, viewport);

        let widths = self.effective_widths();
        let horizontal = self.strip.layout(StripInputs {
            x: content.x,
            width: content.width,
            expandable: self.options.expandable,
            selectable: self.options.selectable,
            groups: &self.groups,
            widths: &widths,
            gap: self.options.col_gap,
        });

        let header_y = if sticky {
            Some(content.y)
        } else if self.scroll_y < lead as u64 {
            Some(body.y)
        } else {
            None
        };

        let ctx = PaintContext {
            content,
            layout: &horizontal,
            styles,
        };

        if let Some(y) = header_y {
            self.render_header(y, &ctx, &ids, buf);
        }

        let mut visible = Vec::new();
        let window_end = self.scroll_y + viewport as u64;
        for block in &plan.blocks {
            let top = block.start.max(self.scroll_y);
            let bottom = block.end().min(window_end);
            if top >= bottom {
                continue;
            }
            let y = body.y + (top - self.scroll_y) as u16;
            let height = (bottom - top) as u16;
            let skip = (top - block.start) as u32;
            visible.push(VisibleBlock {
                kind: block.kind,
                y,
                height,
            });
            match block.kind {
                BodyBlockKind::Empty => self.render_empty(y, height, skip, &ctx, buf),
                BodyBlockKind::Row(i) => {
                    self.render_row(i, &data[i], &ids[i], y, height, skip, &ctx, buf)
                }
                BodyBlockKind::Detail(i) => {
                    let lines = plan.details.get(&i).map(Vec::as_slice).unwrap_or(&[]);
                    render_detail(lines, y, height, skip, &ctx, buf);
                }
            }
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, body.y, 1, body.height),
                buf,
                ScrollMetrics {
                    offset: self.scroll_y,
                    viewport: viewport as u64,
                    content: plan.total,
                },
                styles.scrollbar,
            );
        }

        self.frame = Some(Frame {
            content,
            header_y,
            lead,
            viewport,
            horizontal,
            visible,
        });
        Ok(())
    }

    pub fn handle_event(&mut self, event: InputEvent, data: &[T]) -> Result<DataTableAction> {
        self.handle_event_at(event, data, Instant::now())
    }

    /// Like [`DataTableView::handle_event`], with an explicit timestamp for double-click
    /// detection.
    pub fn handle_event_at(
        &mut self,
        event: InputEvent,
        data: &[T],
        now: Instant,
    ) -> Result<DataTableAction> {
        let ids = self.row_key.resolve_all(data)?;
        self.clamp_cursor(data.len());
        Ok(match event {
            InputEvent::Paste(_) => DataTableAction::None,
            InputEvent::Key(key) => self.handle_key(key, data, &ids),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse, data, &ids, now),
        })
    }

    fn clamp_cursor(&mut self, len: usize) {
        self.cursor = match self.cursor {
            Some(_) if len == 0 => None,
            Some(c) => Some(c.min(len - 1)),
            None => None,
        };
    }

    fn plan_body(&mut self, data: &[T], ids: &[String], lead: u32, viewport: u32) -> BodyPlan {
        let row_height = self.options.row_height();
        let virtualized = window::should_virtualize(data.len(), self.options.virtualize_threshold);
        if self.virtualized != Some(virtualized) {
            tracing::debug!(rows = data.len(), virtualized, "datatable render path selected");
            self.virtualized = Some(virtualized);
        }

        let mut details = BTreeMap::new();
        if data.is_empty() {
            let blocks = layout::empty_body(lead, row_height);
            let total = blocks.last().map(BodyBlock::end).unwrap_or(lead as u64);
            self.scroll_y = self.scroll_y.min(total.saturating_sub(viewport as u64));
            return BodyPlan {
                blocks,
                details,
                total,
            };
        }

        if virtualized {
            self.rows.set_count(data.len());
            self.rows.set_row_height(row_height);
            self.rows.set_overscan(self.options.overscan_rows);
            self.rows.set_padding_start(lead);
            self.rows.set_viewport(viewport);
            self.rows.set_scroll_offset(self.scroll_y);
            self.scroll_y = self.rows.scroll_offset();
            let blocks = self
                .rows
                .virtual_rows()
                .iter()
                .map(|r| BodyBlock {
                    kind: BodyBlockKind::Row(r.index),
                    start: r.start,
                    height: r.size,
                })
                .collect();
            return BodyPlan {
                blocks,
                details,
                total: self.rows.total_size(),
            };
        }

        if self.options.expandable {
            if let Some(renderer) = self.expanded_renderer.as_ref() {
                let expanded = self.expansion.get();
                for (i, row) in data.iter().enumerate() {
                    if expanded.contains(&ids[i]) {
                        details.insert(i, renderer(row));
                    }
                }
            }
        }
        let blocks = layout::plain_body(data.len(), lead, row_height, |i| {
            details.get(&i).map(|lines| lines.len().max(1) as u32)
        });
        let total = blocks.last().map(BodyBlock::end).unwrap_or(lead as u64);
        self.scroll_y = self.scroll_y.min(total.saturating_sub(viewport as u64));
        BodyPlan {
            blocks,
            details,
            total,
        }
    }

    fn reveal_row(&mut self, index: usize, data: &[T], ids: &[String]) {
        let Some((lead, viewport)) = self.frame_metrics() else {
            return;
        };
        if index == 0 {
            self.scroll_y = 0;
        }
        let plan = self.plan_body(data, ids, lead, viewport);
        if index == 0 {
            return;
        }
        if self.is_virtualized() {
            self.rows.reveal(index);
            self.scroll_y = self.rows.scroll_offset();
            return;
        }
        let Some(block) = plan
            .blocks
            .iter()
            .find(|b| b.kind == BodyBlockKind::Row(index))
        else {
            return;
        };
        let viewport = viewport as u64;
        if block.start < self.scroll_y {
            self.scroll_y = block.start;
        } else if block.end() > self.scroll_y + viewport {
            self.scroll_y = block.end().saturating_sub(viewport);
        }
    }

    fn handle_key(&mut self, key: KeyEvent, data: &[T], ids: &[String]) -> DataTableAction {
        let Some(action) = self.bindings.action_for(&key) else {
            return DataTableAction::None;
        };
        match action {
            TableKeyAction::CancelDrag => {
                if self.resize.is_dragging() {
                    self.resize.cancel();
                    DataTableAction::Redraw
                } else {
                    DataTableAction::None
                }
            }
            TableKeyAction::CursorUp => self.move_cursor_by(-1, data, ids),
            TableKeyAction::CursorDown => self.move_cursor_by(1, data, ids),
            TableKeyAction::PageUp => self.move_cursor_by(-(self.page_rows() as i64), data, ids),
            TableKeyAction::PageDown => self.move_cursor_by(self.page_rows() as i64, data, ids),
            TableKeyAction::Top => self.move_cursor_to(0, data, ids),
            TableKeyAction::Bottom => {
                self.move_cursor_to(data.len().saturating_sub(1), data, ids)
            }
            TableKeyAction::ScrollLeft => self.scroll_x_by(-HSCROLL_STEP),
            TableKeyAction::ScrollRight => self.scroll_x_by(HSCROLL_STEP),
            TableKeyAction::ToggleSelect => match self.cursor {
                Some(index) => self.toggle_selected(index, ids),
                None => DataTableAction::None,
            },
            TableKeyAction::ToggleSelectAll => self.toggle_select_all(ids),
            TableKeyAction::ToggleExpand => match self.cursor {
                Some(index) => self.toggle_expanded(index, ids),
                None => DataTableAction::None,
            },
            TableKeyAction::FocusPrevHeader => self.move_header_focus(-1),
            TableKeyAction::FocusNextHeader => self.move_header_focus(1),
            TableKeyAction::CycleSort => match self.header_focus {
                Some(c) => self.click_sort(c),
                None => DataTableAction::None,
            },
            TableKeyAction::Activate => match self.cursor {
                Some(index) => DataTableAction::RowClicked {
                    index,
                    id: ids[index].clone(),
                },
                None => DataTableAction::None,
            },
        }
    }

    fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        data: &[T],
        ids: &[String],
        now: Instant,
    ) -> DataTableAction {
        if self.resize.is_dragging() {
            match mouse.kind {
                MouseEventKind::Drag(MouseButton::Left) => return self.drag_resize(mouse.x),
                MouseEventKind::Up(MouseButton::Left) => {
                    self.resize.end();
                    return DataTableAction::Redraw;
                }
                _ => {}
            }
        }

        let row_height = self.options.row_height() as i64;
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_y_by(row_height, data, ids),
            MouseEventKind::ScrollUp => self.scroll_y_by(-row_height, data, ids),
            MouseEventKind::ScrollRight => self.scroll_x_by(HSCROLL_STEP),
            MouseEventKind::ScrollLeft => self.scroll_x_by(-HSCROLL_STEP),
            MouseEventKind::Down(MouseButton::Left) => self.press(mouse.x, mouse.y, ids, now),
            _ => DataTableAction::None,
        }
    }

    fn press(&mut self, x: u16, y: u16, ids: &[String], now: Instant) -> DataTableAction {
        let Some(frame) = self.frame.as_ref() else {
            return DataTableAction::None;
        };
        let c = frame.content;
        if x < c.x || x >= c.x + c.width || y < c.y || y >= c.y + c.height {
            return DataTableAction::None;
        }
        let gutter = frame.horizontal.gutter_at(x);

        if frame.header_y == Some(y) {
            let handle = frame.horizontal.handle_at(x);
            let slot = frame.horizontal.slot_at(x).map(|s| s.column);
            return self.press_header(x, handle, gutter, slot, ids);
        }

        let Some(block) = frame
            .visible
            .iter()
            .find(|b| y >= b.y && y < b.y + b.height)
            .copied()
        else {
            return DataTableAction::None;
        };
        let BodyBlockKind::Row(index) = block.kind else {
            return DataTableAction::None;
        };
        if index >= ids.len() {
            return DataTableAction::None;
        }

        match gutter {
            Some(Gutter::Expand) => return self.toggle_expanded(index, ids),
            Some(Gutter::Select) => return self.toggle_selected(index, ids),
            None => {}
        }

        self.cursor = Some(index);
        let id = ids[index].clone();
        let interval = self.options.double_click_interval;
        let is_double = matches!(
            &self.last_click,
            Some((last, at)) if *last == id && now.saturating_duration_since(*at) <= interval
        );
        if is_double {
            self.last_click = None;
            DataTableAction::RowDoubleClicked { index, id }
        } else {
            self.last_click = Some((id.clone(), now));
            DataTableAction::RowClicked { index, id }
        }
    }

    fn press_header(
        &mut self,
        x: u16,
        handle: Option<usize>,
        gutter: Option<Gutter>,
        slot: Option<usize>,
        ids: &[String],
    ) -> DataTableAction {
        if let Some(c) = handle {
            self.resize.begin(self.columns[c].id.clone(), x as i32);
            return DataTableAction::Redraw;
        }
        if gutter == Some(Gutter::Select) {
            return self.toggle_select_all(ids);
        }
        let Some(c) = slot else {
            return DataTableAction::None;
        };
        self.header_focus = Some(c);
        if self.columns[c].sortable {
            self.click_sort(c)
        } else {
            DataTableAction::Redraw
        }
    }

    fn drag_resize(&mut self, x: u16) -> DataTableAction {
        let Some(id) = self.resize.active_column().map(str::to_string) else {
            return DataTableAction::None;
        };
        let Some(c) = self.columns.iter().position(|col| col.id == id) else {
            tracing::warn!(column = %id, "resized column no longer exists, cancelling drag");
            self.resize.cancel();
            return DataTableAction::Redraw;
        };
        let current = self.effective_width(c);
        let bounds = self.options.width_defaults.bounds(&self.columns[c]);
        let Some(width) = self.resize.drag_to(x as i32, current, bounds) else {
            return DataTableAction::None;
        };
        let mut next = self.widths.get().clone();
        next.insert(id.clone(), width);
        self.request_widths(next);
        DataTableAction::ColumnResized { id, width }
    }

    fn page_rows(&self) -> u32 {
        let viewport = self.frame_metrics().map(|(_, v)| v).unwrap_or(0);
        (viewport / self.options.row_height()).max(1)
    }

    fn move_cursor_by(&mut self, delta: i64, data: &[T], ids: &[String]) -> DataTableAction {
        if data.is_empty() {
            return DataTableAction::None;
        }
        let next = match self.cursor {
            Some(cur) => (cur as i64 + delta).clamp(0, data.len() as i64 - 1) as usize,
            None => 0,
        };
        self.move_cursor_to(next, data, ids)
    }

    fn move_cursor_to(&mut self, index: usize, data: &[T], ids: &[String]) -> DataTableAction {
        if data.is_empty() || self.cursor == Some(index) {
            return DataTableAction::None;
        }
        self.cursor = Some(index);
        self.reveal_row(index, data, ids);
        DataTableAction::Redraw
    }

    fn scroll_y_by(&mut self, delta: i64, data: &[T], ids: &[String]) -> DataTableAction {
        let Some((lead, viewport)) = self.frame_metrics() else {
            return DataTableAction::None;
        };
        let before = self.scroll_y;
        self.scroll_y = (before as i64).saturating_add(delta).max(0) as u64;
        self.plan_body(data, ids, lead, viewport);
        if self.scroll_y != before {
            DataTableAction::Redraw
        } else {
            DataTableAction::None
        }
    }

    fn scroll_x_by(&mut self, delta: i64) -> DataTableAction {
        let before = self.strip.scroll_offset();
        self.strip.scroll_by(delta);
        if self.strip.scroll_offset() != before {
            DataTableAction::Redraw
        } else {
            DataTableAction::None
        }
    }

    fn toggle_selected(&mut self, index: usize, ids: &[String]) -> DataTableAction {
        if !self.options.selectable {
            return DataTableAction::None;
        }
        let id = &ids[index];
        let checked = !self.selection.get().contains(id);
        let next = selection::toggle_row(
            self.selection.get(),
            self.options.selection_mode,
            id,
            checked,
        );
        self.request_selection(next);
        DataTableAction::SelectionChanged
    }

    fn toggle_select_all(&mut self, ids: &[String]) -> DataTableAction {
        if !self.options.selectable || self.options.selection_mode != SelectionMode::Multiple {
            return DataTableAction::None;
        }
        let state = selection::header_state(ids.iter().map(String::as_str), self.selection.get());
        let next = selection::toggle_all(ids.iter().map(String::as_str), !state.all_selected);
        self.request_selection(next);
        DataTableAction::SelectionChanged
    }

    fn toggle_expanded(&mut self, index: usize, ids: &[String]) -> DataTableAction {
        if !self.options.expandable {
            return DataTableAction::None;
        }
        let next = expansion::toggle_row(self.expansion.get(), &ids[index]);
        self.request_expansion(next);
        DataTableAction::ExpansionChanged
    }

    fn click_sort(&mut self, c: usize) -> DataTableAction {
        let Some(col) = self.columns.get(c) else {
            return DataTableAction::None;
        };
        if !col.sortable {
            return DataTableAction::None;
        }
        let next = self.sort.get().clicked(&col.id);
        self.request_sort(next.clone());
        DataTableAction::SortChanged(next)
    }

    fn move_header_focus(&mut self, delta: i64) -> DataTableAction {
        let order: Vec<usize> = self.groups.iter().collect();
        if order.is_empty() {
            return DataTableAction::None;
        }
        let pos = match self.header_focus.and_then(|c| order.iter().position(|&o| o == c)) {
            Some(p) => (p as i64 + delta).clamp(0, order.len() as i64 - 1) as usize,
            None => 0,
        };
        let c = order[pos];
        if self.header_focus == Some(c) {
            return DataTableAction::None;
        }
        self.header_focus = Some(c);
        if let Some(center_pos) = self.groups.center.iter().position(|&o| o == c) {
            self.strip.reveal(center_pos);
        }
        DataTableAction::Redraw
    }

    fn render_header(&self, y: u16, ctx: &PaintContext<'_>, ids: &[String], buf: &mut Buffer) {
        let styles = ctx.styles;
        buf.set_style(Rect::new(ctx.content.x, y, ctx.content.width, 1), styles.header);

        for &(gutter, gx, gw) in &ctx.layout.gutters {
            if gutter == Gutter::Select && self.options.selection_mode == SelectionMode::Multiple {
                let state =
                    selection::header_state(ids.iter().map(String::as_str), self.selection.get());
                render::render_str_clipped(gx, y, 0, gw, buf, state.glyph(), styles.header);
            }
        }

        let sort_state = self.sort.get();
        for slot in &ctx.layout.slots {
            let col = &self.columns[slot.column];
            let mut line = col.header.to_line();
            if col.sortable {
                let direction = sort_state.direction_for(&col.id);
                let style = if direction.is_some() {
                    styles.accent
                } else {
                    styles.muted
                };
                line.spans.push(Span::raw(" "));
                line.spans.push(Span::styled(sort::indicator(direction), style));
            }
            let style = if self.header_focus == Some(slot.column) {
                styles.header.patch(styles.cursor)
            } else {
                styles.header
            };
            render::render_line_clipped(slot.x, y, slot.clip_left, slot.width, buf, &line, style);

            if let Some(hx) = slot.handle_x {
                let active = self.resize.active_column() == Some(col.id.as_str());
                let handle_style = if active { styles.accent } else { styles.grid_line };
                if self.options.col_gap > 0 {
                    buf.set_stringn(hx, y, "│", 1, handle_style);
                } else if active {
                    buf.set_style(Rect::new(hx, y, 1, 1), handle_style);
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_row(
        &self,
        index: usize,
        row: &T,
        id: &str,
        y: u16,
        height: u16,
        skip: u32,
        ctx: &PaintContext<'_>,
        buf: &mut Buffer,
    ) {
        let styles = ctx.styles;
        let mut style = styles.base;
        if self.options.striped && index % 2 == 1 {
            style = style.patch(styles.stripe);
        }
        if self.selection.get().contains(id) {
            style = style.patch(styles.selected);
        }
        if self.cursor == Some(index) {
            style = style.patch(styles.cursor);
        }
        buf.set_style(Rect::new(ctx.content.x, y, ctx.content.width, height), style);

        if self.options.col_gap > 0 {
            for slot in &ctx.layout.slots {
                if let Some(hx) = slot.handle_x {
                    for dy in 0..height {
                        buf.set_stringn(hx, y + dy, "│", 1, style.patch(styles.grid_line));
                    }
                }
            }
        }

        // Cell text sits on the first line of the row.
        if skip > 0 {
            return;
        }
        for &(gutter, gx, gw) in &ctx.layout.gutters {
            let glyph = match gutter {
                Gutter::Expand => expansion::chevron(self.expansion.get().contains(id)),
                Gutter::Select => {
                    if self.selection.get().contains(id) {
                        "[x]"
                    } else {
                        "[ ]"
                    }
                }
            };
            render::render_str_clipped(gx, y, 0, gw, buf, glyph, style);
        }
        for slot in &ctx.layout.slots {
            let line = self.columns[slot.column].accessor.cell(row);
            render::render_line_clipped(slot.x, y, slot.clip_left, slot.width, buf, &line, style);
        }
    }

    fn render_empty(
        &self,
        y: u16,
        height: u16,
        skip: u32,
        ctx: &PaintContext<'_>,
        buf: &mut Buffer,
    ) {
        let area = Rect::new(ctx.content.x, y, ctx.content.width, height);
        buf.set_style(area, ctx.styles.base);
        if skip == 0 {
            render::render_str_centered(area, buf, &self.options.empty_text, ctx.styles.muted);
        }
    }
}

fn render_detail(
    lines: &[Line<'static>],
    y: u16,
    height: u16,
    skip: u32,
    ctx: &PaintContext<'_>,
    buf: &mut Buffer,
) {
    let indent: u16 = ctx.layout.gutters.iter().map(|(_, _, w)| *w).sum();
    let x = ctx.content.x + indent.min(ctx.content.width);
    let width = ctx.content.width.saturating_sub(indent);
    buf.set_style(
        Rect::new(ctx.content.x, y, ctx.content.width, height),
        ctx.styles.base,
    );
    for dy in 0..height {
        if let Some(line) = lines.get(skip as usize + dy as usize) {
            render::render_line_clipped(x, y + dy, 0, width, buf, line, ctx.styles.base);
        }
    }
}
