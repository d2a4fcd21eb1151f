use crate::datatable::selection::RowIdSet;

/// Flips `id` in the expanded set. Any number of rows may be expanded at once.
pub fn toggle_row(expanded: &RowIdSet, id: &str) -> RowIdSet {
    let mut next = expanded.clone();
    if !next.remove(id) {
        next.insert(id.to_string());
    }
    next
}

pub fn chevron(expanded: bool) -> &'static str {
    if expanded { "▾" } else { "▸" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_symmetric() {
        let open = toggle_row(&RowIdSet::new(), "a");
        assert!(open.contains("a"));
        let closed = toggle_row(&open, "a");
        assert!(closed.is_empty());
    }

    #[test]
    fn rows_expand_independently() {
        let s = toggle_row(&RowIdSet::new(), "a");
        let s = toggle_row(&s, "b");
        assert_eq!(s.len(), 2);
        let s = toggle_row(&s, "a");
        assert_eq!(s.into_iter().collect::<Vec<_>>(), vec!["b".to_string()]);
    }
}
