//! `ratatui-datatable`: a virtualized data table for ratatui.
//!
//! This is the facade crate. It re-exports the table and its primitives from
//! `ratatui-datatable-core` and adds app-level extras such as [`help::HelpBar`].
//!
//! ```no_run
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use ratatui_datatable::datatable::{Accessor, Column, DataTableView, Pin};
//! use ratatui_datatable::theme::Theme;
//! use std::collections::BTreeMap;
//!
//! let mut table: DataTableView<BTreeMap<String, String>> = DataTableView::new();
//! table
//!     .set_columns(vec![
//!         Column::new("id", "Id", Accessor::field("id")).pinned(Pin::Left),
//!         Column::new("name", "Name", Accessor::field("name")).sortable(),
//!     ])
//!     .expect("unique column ids");
//!
//! let rows: Vec<BTreeMap<String, String>> = Vec::new();
//! let area = Rect::new(0, 0, 40, 10);
//! let mut buf = Buffer::empty(area);
//! table
//!     .render(area, &mut buf, &Theme::default(), &rows)
//!     .expect("row keys resolve");
//! ```
pub use ratatui_datatable_core::datatable;
pub use ratatui_datatable_core::error;
pub use ratatui_datatable_core::input;
pub use ratatui_datatable_core::keymap;
pub use ratatui_datatable_core::render;
pub use ratatui_datatable_core::theme;

#[cfg(feature = "crossterm")]
pub use ratatui_datatable_core::crossterm_input;

pub mod help;
