//! Column definitions and the column model.
//!
//! Columns are plain values supplied by the app. The only column state the table keeps
//! between frames is the width override map ([`ColumnWidths`]), keyed by column id.

use crate::error::DataTableError;
use crate::error::Result;
use ratatui::text::Line;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Column id → width override in cells. Entries exist only for resized columns.
pub type ColumnWidths = BTreeMap<String, u16>;

/// Named-field access into a row record.
///
/// Field-key accessors and field-key row identities read through this trait. Rows rendered
/// purely through function accessors and a function row key only need `impl Record for Row {}`.
pub trait Record {
    fn field(&self, _key: &str) -> Option<Cow<'_, str>> {
        None
    }
}

impl Record for BTreeMap<String, String> {
    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl Record for std::collections::HashMap<String, String> {
    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pin {
    Left,
    Right,
}

#[derive(Clone)]
pub enum Header {
    Label(String),
    Render(Arc<dyn Fn() -> Line<'static> + Send + Sync>),
}

impl Header {
    pub fn to_line(&self) -> Line<'static> {
        match self {
            Header::Label(s) => Line::raw(s.clone()),
            Header::Render(f) => f(),
        }
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::Label(s) => f.debug_tuple("Label").field(s).finish(),
            Header::Render(_) => f.write_str("Render(..)"),
        }
    }
}

impl From<&str> for Header {
    fn from(s: &str) -> Self {
        Header::Label(s.to_string())
    }
}

impl From<String> for Header {
    fn from(s: String) -> Self {
        Header::Label(s)
    }
}

/// How a cell value is produced from a row. Must be deterministic per row.
pub enum Accessor<T> {
    Field(String),
    Func(Arc<dyn Fn(&T) -> Line<'static> + Send + Sync>),
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(k) => Accessor::Field(k.clone()),
            Accessor::Func(f) => Accessor::Func(f.clone()),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(k) => f.debug_tuple("Field").field(k).finish(),
            Accessor::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl<T> Accessor<T> {
    pub fn field(key: impl Into<String>) -> Self {
        Accessor::Field(key.into())
    }

    pub fn func(f: impl Fn(&T) -> Line<'static> + Send + Sync + 'static) -> Self {
        Accessor::Func(Arc::new(f))
    }
}

impl<T: Record> Accessor<T> {
    /// A missing field renders as an empty cell.
    pub fn cell(&self, row: &T) -> Line<'static> {
        match self {
            Accessor::Field(k) => row
                .field(k)
                .map(|v| Line::raw(v.into_owned()))
                .unwrap_or_default(),
            Accessor::Func(f) => f(row),
        }
    }
}

/// One table column.
pub struct Column<T> {
    pub id: String,
    pub header: Header,
    pub accessor: Accessor<T>,
    pub width: Option<u16>,
    pub min_width: Option<u16>,
    pub max_width: Option<u16>,
    pub sortable: bool,
    pub pinned: Option<Pin>,
    pub visible: bool,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            width: self.width,
            min_width: self.min_width,
            max_width: self.max_width,
            sortable: self.sortable,
            pinned: self.pinned,
            visible: self.visible,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("width", &self.width)
            .field("pinned", &self.pinned)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

impl<T> Column<T> {
    pub fn new(id: impl Into<String>, header: impl Into<Header>, accessor: Accessor<T>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor,
            width: None,
            min_width: None,
            max_width: None,
            sortable: false,
            pinned: None,
            visible: true,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, min_width: u16) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn max_width(mut self, max_width: u16) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn pinned(mut self, pin: Pin) -> Self {
        self.pinned = Some(pin);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Fallback width and bounds for columns that do not set their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidthDefaults {
    pub width: u16,
    pub min: u16,
    pub max: u16,
}

impl Default for WidthDefaults {
    fn default() -> Self {
        Self {
            width: 16,
            min: 4,
            max: 64,
        }
    }
}

impl WidthDefaults {
    /// Override, then declared width, then the default.
    pub fn current_width<T>(&self, column: &Column<T>, widths: &ColumnWidths) -> u16 {
        widths
            .get(&column.id)
            .copied()
            .or(column.width)
            .unwrap_or(self.width)
    }

    pub fn bounds<T>(&self, column: &Column<T>) -> (u16, u16) {
        (
            column.min_width.unwrap_or(self.min),
            column.max_width.unwrap_or(self.max),
        )
    }
}

/// Visible columns split by pin side, as indices into the column slice.
///
/// Relative order within each group matches the input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PinGroups {
    pub left: Vec<usize>,
    pub center: Vec<usize>,
    pub right: Vec<usize>,
}

impl PinGroups {
    pub fn len(&self) -> usize {
        self.left.len() + self.center.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display order: left, center, right.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.left
            .iter()
            .chain(self.center.iter())
            .chain(self.right.iter())
            .copied()
    }
}

/// Filters hidden columns and stably partitions the rest by pin side.
pub fn partition_columns<T>(columns: &[Column<T>]) -> PinGroups {
    let mut groups = PinGroups::default();
    for (i, col) in columns.iter().enumerate() {
        if !col.visible {
            continue;
        }
        match col.pinned {
            Some(Pin::Left) => groups.left.push(i),
            Some(Pin::Right) => groups.right.push(i),
            None => groups.center.push(i),
        }
    }
    groups
}

pub fn validate_column_ids<T>(columns: &[Column<T>]) -> Result<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for col in columns {
        if !seen.insert(col.id.as_str()) {
            return Err(DataTableError::duplicate_column_id(&col.id));
        }
    }
    Ok(())
}
