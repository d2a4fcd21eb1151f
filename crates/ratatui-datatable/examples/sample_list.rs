use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_datatable::crossterm_input::input_event_from_crossterm;
use ratatui_datatable::datatable::Accessor;
use ratatui_datatable::datatable::Column;
use ratatui_datatable::datatable::DataTableAction;
use ratatui_datatable::datatable::DataTableView;
use ratatui_datatable::datatable::DataTableViewOptions;
use ratatui_datatable::datatable::Density;
use ratatui_datatable::datatable::Pin;
use ratatui_datatable::datatable::Record;
use ratatui_datatable::datatable::SortState;
use ratatui_datatable::help::HelpBar;
use ratatui_datatable::help::HelpBarOptions;
use ratatui_datatable::theme::Theme;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

const SAMPLE_COUNT: usize = 5000;

#[derive(Clone, Debug)]
struct Sample {
    id: String,
    name: String,
    patient_id: String,
    sample_type: &'static str,
    status: &'static str,
    batch_id: String,
    created_at: String,
}

impl Record for Sample {
    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        let v = match key {
            "id" => self.id.as_str(),
            "name" => self.name.as_str(),
            "patientId" => self.patient_id.as_str(),
            "sampleType" => self.sample_type,
            "status" => self.status,
            "batchId" => self.batch_id.as_str(),
            "createdAt" => self.created_at.as_str(),
            _ => return None,
        };
        Some(Cow::Borrowed(v))
    }
}

fn generate_samples(n: usize) -> Vec<Sample> {
    const TYPES: [&str; 5] = ["Blood", "Urine", "Saliva", "Tissue", "Plasma"];
    const STATUSES: [&str; 4] = ["received", "in_progress", "completed", "rejected"];
    (0..n)
        .map(|i| Sample {
            id: format!("S-{i:05}"),
            name: format!("Sample {i}"),
            patient_id: format!("P-{:04}", (i * 7) % 1200),
            sample_type: TYPES[i % TYPES.len()],
            status: STATUSES[(i / 3) % STATUSES.len()],
            batch_id: format!("B-{:03}", i / 50),
            created_at: format!("2024-{:02}-{:02}", 1 + (i / 28) % 12, 1 + i % 28),
        })
        .collect()
}

fn status_line(s: &Sample) -> Line<'static> {
    let style = match s.status {
        "completed" => Style::default().green(),
        "rejected" => Style::default().red(),
        "in_progress" => Style::default().yellow(),
        _ => Style::default(),
    };
    Line::from(Span::styled(s.status.replace('_', " "), style))
}

fn columns() -> Vec<Column<Sample>> {
    vec![
        Column::new("id", "Sample ID", Accessor::field("id"))
            .width(10)
            .pinned(Pin::Left)
            .sortable(),
        Column::new("name", "Name", Accessor::field("name"))
            .width(14)
            .sortable(),
        Column::new("patientId", "Patient", Accessor::field("patientId")).width(10),
        Column::new("sampleType", "Type", Accessor::field("sampleType"))
            .width(10)
            .sortable(),
        Column::new("batchId", "Batch", Accessor::field("batchId")).width(8),
        Column::new("createdAt", "Created", Accessor::field("createdAt"))
            .width(12)
            .sortable(),
        Column::new("status", "Status", Accessor::func(status_line))
            .width(12)
            .min_width(8)
            .pinned(Pin::Right)
            .sortable(),
    ]
}

fn compare_samples(a: &Sample, b: &Sample, column: &str) -> Ordering {
    a.field(column).cmp(&b.field(column))
}

/// Reorders `rows` for `sort`, restoring generation order when unsorted.
fn apply_sort(rows: &mut Vec<Sample>, original: &[Sample], sort: &SortState) {
    rows.clear();
    rows.extend_from_slice(original);
    sort.sort_rows(rows, compare_samples);
}

fn init_tracing() {
    let Ok(path) = std::env::var("DATATABLE_LOG") else {
        return;
    };
    let Ok(file) = File::create(path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> io::Result<()> {
    init_tracing();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>) -> io::Result<()> {
    let theme = Theme::default();
    let original = generate_samples(SAMPLE_COUNT);
    let mut rows = original.clone();
    tracing::info!(samples = rows.len(), "sample list loaded");

    let mut table = DataTableView::with_options(DataTableViewOptions {
        selectable: true,
        expandable: true,
        striped: true,
        density: Density::Compact,
        ..Default::default()
    });
    table.set_columns(columns()).map_err(io::Error::other)?;
    table.set_expanded_renderer(|s: &Sample| {
        vec![
            Line::from(format!("patient {}  batch {}", s.patient_id, s.batch_id)),
            Line::from(format!("collected {}  type {}", s.created_at, s.sample_type)).dim(),
        ]
    });
    let help = HelpBar::with_options(
        table.help_sections(),
        HelpBarOptions {
            style: theme.text_muted,
            key_style: theme.accent,
            ..Default::default()
        },
    );
    let mut status = String::from("q to quit");

    loop {
        let mut render_result = Ok(());
        terminal.draw(|f| {
            let area = f.area();
            let block = Block::default()
                .title(format!("Samples ({})", rows.len()))
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let buf = f.buffer_mut();
            let table_area = Rect::new(
                inner.x,
                inner.y,
                inner.width,
                inner.height.saturating_sub(2),
            );
            let status_area = Rect::new(inner.x, inner.y + table_area.height, inner.width, 1);
            let help_area = Rect::new(inner.x, status_area.y + 1, inner.width, 1);

            render_result = table.render(table_area, buf, &theme, &rows);
            let span = Span::styled(status.clone(), theme.text_muted);
            buf.set_span(status_area.x, status_area.y, &span, status_area.width);
            help.render_ref(help_area, buf);
        })?;
        render_result.map_err(io::Error::other)?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let ev = crossterm::event::read()?;
        if let Event::Key(key) = &ev {
            if key.code == KeyCode::Char('q') {
                return Ok(());
            }
        }
        let Some(ev) = input_event_from_crossterm(ev) else {
            continue;
        };
        match table.handle_event(ev, &rows).map_err(io::Error::other)? {
            DataTableAction::SortChanged(sort) => {
                apply_sort(&mut rows, &original, &sort);
                status = match (&sort.column, sort.direction) {
                    (Some(c), Some(d)) => format!("sorted by {c} {d:?}"),
                    _ => "unsorted".to_string(),
                };
            }
            DataTableAction::RowClicked { id, .. } => status = format!("clicked {id}"),
            DataTableAction::RowDoubleClicked { id, .. } => status = format!("opened {id}"),
            DataTableAction::SelectionChanged => {
                status = format!("{} selected", table.selection().len());
            }
            DataTableAction::ColumnResized { id, width } => {
                status = format!("{id} width {width}");
            }
            DataTableAction::ExpansionChanged
            | DataTableAction::Redraw
            | DataTableAction::None => {}
        }
    }
}
