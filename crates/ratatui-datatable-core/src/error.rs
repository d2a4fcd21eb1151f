/// Precondition violations detected by the data table.
///
/// These are caller bugs rather than runtime faults: the table reports them and does not try
/// to recover. An app that considers them impossible can simply `expect` the result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataTableError {
    /// A field-key row identity resolved to no value.
    #[error("row key field '{field}' is missing from a row")]
    MissingRowKey { field: String },

    /// Two rows in the same data slice resolved to the same identity.
    #[error("duplicate row key '{key}'")]
    DuplicateRowKey { key: String },

    /// Two column definitions share an id.
    #[error("duplicate column id '{id}'")]
    DuplicateColumnId { id: String },
}

impl DataTableError {
    pub fn missing_row_key(field: impl Into<String>) -> Self {
        Self::MissingRowKey {
            field: field.into(),
        }
    }

    pub fn duplicate_row_key(key: impl Into<String>) -> Self {
        Self::DuplicateRowKey { key: key.into() }
    }

    pub fn duplicate_column_id(id: impl Into<String>) -> Self {
        Self::DuplicateColumnId { id: id.into() }
    }
}

pub type Result<T> = std::result::Result<T, DataTableError>;
