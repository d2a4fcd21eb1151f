use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui_datatable::datatable::Accessor;
use ratatui_datatable::datatable::Column;
use ratatui_datatable::datatable::DataTableAction;
use ratatui_datatable::datatable::DataTableView;
use ratatui_datatable::datatable::DataTableViewOptions;
use ratatui_datatable::datatable::Density;
use ratatui_datatable::datatable::Header;
use ratatui_datatable::datatable::Pin;
use ratatui_datatable::datatable::Record;
use ratatui_datatable::datatable::RowIdSet;
use ratatui_datatable::datatable::RowKey;
use ratatui_datatable::input::InputEvent;
use ratatui_datatable::input::KeyCode;
use ratatui_datatable::input::KeyEvent;
use ratatui_datatable::input::MouseEvent;
use ratatui_datatable::input::MouseEventKind;
use ratatui_datatable::theme::Theme;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

type Row = BTreeMap<String, String>;

fn row(id: &str) -> Row {
    let mut r = Row::new();
    r.insert("id".to_string(), id.to_string());
    r.insert("name".to_string(), format!("name-{id}"));
    r
}

fn rows(n: usize) -> Vec<Row> {
    (0..n).map(|i| row(&format!("r{i}"))).collect()
}

fn compact() -> DataTableViewOptions {
    DataTableViewOptions {
        density: Density::Compact,
        ..Default::default()
    }
}

fn id_name_table(options: DataTableViewOptions) -> DataTableView<Row> {
    let mut t = DataTableView::with_options(options);
    t.set_columns(vec![
        Column::new("id", "Id", Accessor::field("id")).width(6),
        Column::new("name", "Name", Accessor::field("name"))
            .width(10)
            .sortable(),
    ])
    .expect("unique ids");
    t
}

fn render<T: Record>(t: &mut DataTableView<T>, data: &[T], width: u16, height: u16) -> Buffer {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    t.render(area, &mut buf, &Theme::default(), data)
        .expect("render");
    buf
}

fn text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| {
            buf.cell((x, y))
                .map(|c| c.symbol().to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Display column of `needle` in a row of single-width glyphs.
fn col_of(line: &str, needle: &str) -> Option<usize> {
    line.find(needle).map(|b| line[..b].chars().count())
}

fn send(t: &mut DataTableView<Row>, data: &[Row], ev: impl Into<InputEvent>) -> DataTableAction {
    t.handle_event(ev.into(), data).expect("handle_event")
}

#[test]
fn empty_data_renders_one_message_row() {
    let mut t = id_name_table(compact());
    let buf = render(&mut t, &[], 40, 6);
    assert!(text(&buf, 0).contains("Id"));
    assert!(text(&buf, 1).contains("No data available"));
    assert!(text(&buf, 2).trim().is_empty());
}

#[test]
fn pinned_groups_keep_edges_and_relative_order() {
    let mut t: DataTableView<Row> = DataTableView::with_options(compact());
    t.set_columns(vec![
        Column::new("a", "AAA", Accessor::field("id"))
            .width(5)
            .pinned(Pin::Left),
        Column::new("b", "BBB", Accessor::field("id")).width(5),
        Column::new("c", "CCC", Accessor::field("id"))
            .width(5)
            .pinned(Pin::Left),
        Column::new("d", "DDD", Accessor::field("id"))
            .width(5)
            .pinned(Pin::Right),
    ])
    .expect("unique ids");
    let buf = render(&mut t, &rows(2), 40, 6);
    let header = text(&buf, 0);
    let a = col_of(&header, "AAA").expect("A");
    let c = col_of(&header, "CCC").expect("C");
    let b = col_of(&header, "BBB").expect("B");
    let d = col_of(&header, "DDD").expect("D");
    assert_eq!((a, c, b), (0, 6, 12));
    // 39 content cells (one for the scrollbar), right group is 5 + gap
    assert_eq!(d, 33);
}

#[test]
fn large_data_is_windowed_and_reaches_the_end() {
    let mut t = id_name_table(compact());
    let data = rows(5000);
    let buf = render(&mut t, &data, 30, 10);
    assert!(t.is_virtualized());
    assert!(text(&buf, 1).contains("r0 "));

    send(&mut t, &data, KeyEvent::new(KeyCode::End));
    let buf = render(&mut t, &data, 30, 10);
    assert!(text(&buf, 9).contains("r4999"));
    assert!(text(&buf, 1).contains("r4991"));
}

#[test]
fn expanded_rows_only_in_plain_path() {
    let options = DataTableViewOptions {
        expandable: true,
        ..compact()
    };
    let mut t = id_name_table(options);
    t.set_expanded_renderer(|r: &Row| vec![Line::from(format!("detail for {}", r["id"]))]);
    t.set_expansion(RowIdSet::from(["r1".to_string()]));

    let small = rows(3);
    let buf = render(&mut t, &small, 40, 8);
    assert!(text(&buf, 2).contains("▾ r1"));
    assert!(text(&buf, 3).contains("detail for r1"));
    assert!(text(&buf, 4).contains("r2"));

    let big = rows(1001);
    let buf = render(&mut t, &big, 40, 8);
    assert!(text(&buf, 2).contains("▾ r1"));
    assert!(text(&buf, 3).contains("r2"));
}

#[test]
fn controlled_selection_waits_for_the_host() {
    let mut t = id_name_table(DataTableViewOptions {
        selectable: true,
        ..compact()
    });
    let requested: Rc<RefCell<Vec<RowIdSet>>> = Rc::default();
    let sink = requested.clone();
    t.control_selection(RowIdSet::new(), move |s| sink.borrow_mut().push(s.clone()));

    let data = rows(3);
    render(&mut t, &data, 40, 6);
    assert_eq!(
        send(&mut t, &data, MouseEvent::left_down(1, 1)),
        DataTableAction::SelectionChanged
    );
    assert!(t.selection().is_empty());
    assert_eq!(
        requested.borrow().as_slice(),
        &[RowIdSet::from(["r0".to_string()])]
    );

    t.set_selection(RowIdSet::from(["r0".to_string()]));
    let buf = render(&mut t, &data, 40, 6);
    assert!(text(&buf, 1).starts_with("[x]"));
    assert!(text(&buf, 0).starts_with("[-]"));
}

#[test]
fn header_checkbox_is_tri_state() {
    let mut t = id_name_table(DataTableViewOptions {
        selectable: true,
        ..compact()
    });
    let data = rows(3);
    let buf = render(&mut t, &data, 40, 6);
    assert!(text(&buf, 0).starts_with("[ ]"));

    send(&mut t, &data, MouseEvent::left_down(1, 2));
    let buf = render(&mut t, &data, 40, 6);
    assert!(text(&buf, 0).starts_with("[-]"));

    send(&mut t, &data, MouseEvent::left_down(1, 0));
    let buf = render(&mut t, &data, 40, 6);
    assert!(text(&buf, 0).starts_with("[x]"));
    assert_eq!(t.selection().len(), 3);

    send(&mut t, &data, MouseEvent::left_down(1, 0));
    assert!(t.selection().is_empty());
}

#[test]
fn sortable_header_shows_direction() {
    let mut t = id_name_table(compact());
    let data = rows(2);
    let buf = render(&mut t, &data, 40, 6);
    assert!(text(&buf, 0).contains("Name ↕"));

    send(&mut t, &data, MouseEvent::left_down(8, 0));
    let buf = render(&mut t, &data, 40, 6);
    assert!(text(&buf, 0).contains("Name ▲"));
    send(&mut t, &data, MouseEvent::left_down(8, 0));
    let buf = render(&mut t, &data, 40, 6);
    assert!(text(&buf, 0).contains("Name ▼"));
}

#[test]
fn non_sticky_header_scrolls_away() {
    let mut t = id_name_table(DataTableViewOptions {
        sticky_header: false,
        ..compact()
    });
    let data = rows(50);
    let buf = render(&mut t, &data, 40, 6);
    assert!(text(&buf, 0).contains("Id"));
    assert!(text(&buf, 1).contains("r0 "));

    send(
        &mut t,
        &data,
        MouseEvent::new(MouseEventKind::ScrollDown, 3, 3),
    );
    let buf = render(&mut t, &data, 40, 6);
    assert!(text(&buf, 0).contains("r0 "));
    assert!(!text(&buf, 0).contains("Id"));
}

#[test]
fn sticky_header_stays_put() {
    let mut t = id_name_table(compact());
    let data = rows(50);
    render(&mut t, &data, 40, 6);
    send(
        &mut t,
        &data,
        MouseEvent::new(MouseEventKind::ScrollDown, 3, 3),
    );
    let buf = render(&mut t, &data, 40, 6);
    assert!(text(&buf, 0).contains("Id"));
    assert!(text(&buf, 1).contains("r1 "));
}

#[test]
fn resize_drag_moves_following_columns() {
    let mut t = id_name_table(compact());
    let data = rows(2);
    render(&mut t, &data, 40, 6);

    // the separator after "Id" is its resize handle, not a row click
    assert_eq!(
        send(&mut t, &data, MouseEvent::left_down(6, 0)),
        DataTableAction::Redraw
    );
    send(&mut t, &data, MouseEvent::left_drag(8, 0));
    // drag events keep going to the resize even off the header
    send(&mut t, &data, MouseEvent::left_drag(10, 4));
    send(&mut t, &data, MouseEvent::left_up(10, 4));

    let buf = render(&mut t, &data, 40, 6);
    assert_eq!(col_of(&text(&buf, 0), "Name"), Some(11));
    assert_eq!(t.column_width("id"), Some(10));
}

#[test]
fn density_sets_row_pitch() {
    let mut t = id_name_table(DataTableViewOptions::default());
    let data = rows(3);
    let buf = render(&mut t, &data, 40, 8);
    assert!(text(&buf, 1).contains("r0 "));
    assert!(!text(&buf, 2).contains("r0"));
    assert!(text(&buf, 3).contains("r1 "));
}

#[test]
fn controlled_widths_are_reported_not_applied() {
    let mut t = id_name_table(compact());
    let seen: Rc<RefCell<Vec<u16>>> = Rc::default();
    let sink = seen.clone();
    t.control_column_widths(BTreeMap::new(), move |w| {
        sink.borrow_mut().push(w.get("id").copied().unwrap_or_default())
    });
    let data = rows(1);
    render(&mut t, &data, 40, 6);
    send(&mut t, &data, MouseEvent::left_down(6, 0));
    assert_eq!(
        send(&mut t, &data, MouseEvent::left_drag(9, 0)),
        DataTableAction::ColumnResized {
            id: "id".into(),
            width: 9
        }
    );
    send(&mut t, &data, MouseEvent::left_up(9, 0));
    assert_eq!(*seen.borrow(), vec![9]);
    assert_eq!(t.column_width("id"), Some(6));
}

#[test]
fn empty_state_survives_gutters_many_columns_and_zero_threshold() {
    let mut t: DataTableView<Row> = DataTableView::with_options(DataTableViewOptions {
        selectable: true,
        expandable: true,
        virtualize_threshold: 0,
        ..compact()
    });
    let columns = (0..12)
        .map(|i| Column::new(format!("c{i}"), format!("C{i}"), Accessor::field("id")).width(5))
        .collect();
    t.set_columns(columns).expect("unique ids");
    let buf = render(&mut t, &[], 60, 6);
    assert!(text(&buf, 0).contains("C0"));
    assert!(text(&buf, 1).contains("No data available"));
    assert!((2..6).all(|y| text(&buf, y).trim().is_empty()));
}

#[test]
fn striped_rows_alternate_background() {
    let mut t = id_name_table(DataTableViewOptions {
        striped: true,
        stripe_style: Style::default().bg(Color::DarkGray),
        ..compact()
    });
    let data = rows(4);
    let buf = render(&mut t, &data, 40, 6);
    let bg = |y: u16| buf.cell((20, y)).map(|c| c.bg);
    assert_ne!(bg(1), Some(Color::DarkGray));
    assert_eq!(bg(2), Some(Color::DarkGray));
    assert_ne!(bg(3), Some(Color::DarkGray));
    assert_eq!(bg(4), Some(Color::DarkGray));
}

#[test]
fn row_height_override_beats_density() {
    let mut t = id_name_table(DataTableViewOptions {
        row_height: Some(4),
        ..compact()
    });
    let data = rows(3);
    let buf = render(&mut t, &data, 40, 10);
    assert!(text(&buf, 1).contains("r0 "));
    assert!((2..5).all(|y| !text(&buf, y).contains('r')));
    assert!(text(&buf, 5).contains("r1 "));
    assert!(text(&buf, 9).contains("r2 "));
}

#[test]
fn virtualize_threshold_override_switches_path() {
    let options = DataTableViewOptions {
        expandable: true,
        virtualize_threshold: 2,
        ..compact()
    };
    let mut t = id_name_table(options);
    t.set_expanded_renderer(|r: &Row| vec![Line::from(format!("detail for {}", r["id"]))]);
    t.set_expansion(RowIdSet::from(["r0".to_string()]));

    let buf = render(&mut t, &rows(2), 40, 6);
    assert!(!t.is_virtualized());
    assert!(text(&buf, 2).contains("detail for r0"));

    let buf = render(&mut t, &rows(3), 40, 6);
    assert!(t.is_virtualized());
    assert!(text(&buf, 2).contains("r1 "));
}

#[test]
fn controlled_expansion_waits_for_the_host() {
    let mut t = id_name_table(DataTableViewOptions {
        expandable: true,
        ..compact()
    });
    t.set_expanded_renderer(|r: &Row| vec![Line::from(format!("detail for {}", r["id"]))]);
    let requested: Rc<RefCell<Vec<RowIdSet>>> = Rc::default();
    let sink = requested.clone();
    t.control_expansion(RowIdSet::new(), move |s| sink.borrow_mut().push(s.clone()));

    let data = rows(3);
    render(&mut t, &data, 40, 6);
    assert_eq!(
        send(&mut t, &data, MouseEvent::left_down(0, 1)),
        DataTableAction::ExpansionChanged
    );
    assert!(t.expansion().is_empty());
    let buf = render(&mut t, &data, 40, 6);
    assert!(text(&buf, 2).contains("r1 "));
    assert_eq!(
        requested.borrow().as_slice(),
        &[RowIdSet::from(["r0".to_string()])]
    );

    t.set_expansion(RowIdSet::from(["r0".to_string()]));
    let buf = render(&mut t, &data, 40, 6);
    assert!(text(&buf, 1).contains("▾ r0"));
    assert!(text(&buf, 2).contains("detail for r0"));
}

struct Item {
    code: u32,
    label: &'static str,
}

impl Record for Item {}

#[test]
fn function_accessors_and_rendered_headers() {
    let mut t: DataTableView<Item> = DataTableView::with_options(compact());
    t.set_columns(vec![
        Column::new(
            "code",
            Header::Render(Arc::new(|| Line::from("#code"))),
            Accessor::func(|i: &Item| Line::from(format!("<{}>", i.code))),
        )
        .width(8),
        Column::new(
            "label",
            "Label",
            Accessor::func(|i: &Item| Line::from(i.label.to_uppercase())),
        )
        .width(10),
    ])
    .expect("unique ids");
    t.set_row_key(RowKey::func(|i: &Item| format!("item-{}", i.code)));

    let data = vec![
        Item {
            code: 7,
            label: "seven",
        },
        Item {
            code: 9,
            label: "nine",
        },
    ];
    let buf = render(&mut t, &data, 40, 5);
    assert!(text(&buf, 0).starts_with("#code"));
    assert!(text(&buf, 1).contains("<7>"));
    assert!(text(&buf, 1).contains("SEVEN"));
    assert!(text(&buf, 2).contains("NINE"));

    let action = t
        .handle_event(MouseEvent::left_down(2, 2).into(), &data)
        .expect("handle_event");
    assert_eq!(
        action,
        DataTableAction::RowClicked {
            index: 1,
            id: "item-9".into()
        }
    );
}

#[test]
fn oversized_widths_and_gap_render() {
    let mut t: DataTableView<Row> = DataTableView::with_options(DataTableViewOptions {
        col_gap: u16::MAX,
        ..compact()
    });
    t.set_columns(vec![
        Column::new("id", "Id", Accessor::field("id"))
            .width(u16::MAX)
            .max_width(u16::MAX),
        Column::new("name", "Name", Accessor::field("name")),
    ])
    .expect("unique ids");
    let buf = render(&mut t, &rows(2), 30, 5);
    assert!(text(&buf, 1).starts_with("r0"));
}
