//! `ratatui-datatable-core` provides the building blocks of a virtualized data table for
//! terminal UIs.
//!
//! Most users should depend on the facade crate `ratatui-datatable`. Use this crate directly if
//! you want the controllers without the facade's extras.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input and rendering from your app.
//! - Rows stay app-owned: the table borrows `&[T]` per call and never reorders it. Sorting is
//!   reported as intent ([`datatable::SortState`]) and applied by the app.
//! - Every piece of table state (selection, expansion, sort, column widths) can be owned by the
//!   table or controlled by the app.
//!
//! Useful entry points:
//! - [`datatable::DataTableView`]: the table widget.
//! - [`datatable::window::RowWindow`]: uniform-height row virtualization on its own.
//! - [`datatable::sort::SortState::sort_rows`]: stable in-memory sorting for apps.
//!
//! ## Errors
//!
//! Row identities must resolve and be unique within a data slice, and column ids must be
//! unique. Violations surface as [`error::DataTableError`] from `render`, `handle_event` and
//! `set_columns`.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod error;
pub mod input;
pub mod keymap;
pub mod render;

pub mod datatable;
