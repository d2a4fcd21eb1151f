use crate::datatable::column::Record;
use crate::error::DataTableError;
use crate::error::Result;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Derives a stable identity string for a row.
///
/// Identities must be unique within one data slice and stable across frames; selection and
/// expansion sets are keyed by them. If a row's identity changes between frames, whatever was
/// recorded for the old identity no longer applies to it.
pub enum RowKey<T> {
    Field(String),
    Func(Arc<dyn Fn(&T) -> String + Send + Sync>),
}

impl<T> Clone for RowKey<T> {
    fn clone(&self) -> Self {
        match self {
            RowKey::Field(k) => RowKey::Field(k.clone()),
            RowKey::Func(f) => RowKey::Func(f.clone()),
        }
    }
}

impl<T> fmt::Debug for RowKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Field(k) => f.debug_tuple("Field").field(k).finish(),
            RowKey::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl<T> Default for RowKey<T> {
    fn default() -> Self {
        RowKey::Field("id".to_string())
    }
}

impl<T> RowKey<T> {
    pub fn field(key: impl Into<String>) -> Self {
        RowKey::Field(key.into())
    }

    pub fn func(f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        RowKey::Func(Arc::new(f))
    }
}

impl<T: Record> RowKey<T> {
    pub fn resolve(&self, row: &T) -> Result<String> {
        match self {
            RowKey::Field(k) => row
                .field(k)
                .map(|v| v.into_owned())
                .ok_or_else(|| DataTableError::missing_row_key(k)),
            RowKey::Func(f) => Ok(f(row)),
        }
    }

    /// Resolves every row in order and rejects duplicate identities.
    pub fn resolve_all(&self, data: &[T]) -> Result<Vec<String>> {
        let mut seen: HashSet<String> = HashSet::with_capacity(data.len());
        let mut out = Vec::with_capacity(data.len());
        for row in data {
            let key = self.resolve(row)?;
            if !seen.insert(key.clone()) {
                return Err(DataTableError::duplicate_row_key(key));
            }
            out.push(key);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    type Row = BTreeMap<String, String>;

    fn row(id: &str) -> Row {
        let mut r = Row::new();
        r.insert("id".into(), id.into());
        r.insert("name".into(), format!("sample {id}"));
        r
    }

    #[test]
    fn field_key_coerces_to_string() {
        let key: RowKey<Row> = RowKey::field("id");
        assert_eq!(key.resolve(&row("S-001")), Ok("S-001".to_string()));
    }

    #[test]
    fn missing_field_is_an_error() {
        let key: RowKey<Row> = RowKey::field("barcode");
        assert_eq!(
            key.resolve(&row("S-001")),
            Err(DataTableError::missing_row_key("barcode"))
        );
    }

    #[test]
    fn func_key_is_called() {
        let key: RowKey<Row> = RowKey::func(|r| format!("k:{}", r["id"]));
        assert_eq!(key.resolve(&row("7")), Ok("k:7".to_string()));
    }

    #[test]
    fn resolve_all_rejects_duplicates() {
        let key: RowKey<Row> = RowKey::field("id");
        let data = vec![row("a"), row("b"), row("a")];
        assert_eq!(
            key.resolve_all(&data),
            Err(DataTableError::duplicate_row_key("a"))
        );
        assert_eq!(
            key.resolve_all(&data[..2]),
            Ok(vec!["a".to_string(), "b".to_string()])
        );
    }
}
