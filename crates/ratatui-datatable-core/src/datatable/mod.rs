//! The data table: column model, row identity, state controllers, virtualization and the
//! composed [`view::DataTableView`].

pub mod column;
pub mod expansion;
pub mod layout;
pub mod resize;
pub mod row_key;
pub mod selection;
pub mod sort;
pub mod state;
pub mod view;
pub mod window;

pub use column::Accessor;
pub use column::Column;
pub use column::ColumnWidths;
pub use column::Header;
pub use column::Pin;
pub use column::Record;
pub use row_key::RowKey;
pub use selection::RowIdSet;
pub use selection::SelectionMode;
pub use sort::SortDirection;
pub use sort::SortState;
pub use view::DataTableAction;
pub use view::DataTableView;
pub use view::DataTableViewOptions;
pub use view::Density;
