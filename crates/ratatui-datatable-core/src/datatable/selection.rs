//! Row selection, keyed by row identity.
//!
//! All operations are pure: they take the current set and return a new one.

use std::collections::BTreeSet;

/// A set of row identities.
pub type RowIdSet = BTreeSet<String>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    #[default]
    Multiple,
}

/// Aggregate state of the header select-all checkbox.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderCheckState {
    pub all_selected: bool,
    pub indeterminate: bool,
}

impl HeaderCheckState {
    pub fn glyph(&self) -> &'static str {
        if self.all_selected {
            "[x]"
        } else if self.indeterminate {
            "[-]"
        } else {
            "[ ]"
        }
    }
}

pub fn toggle_row(selection: &RowIdSet, mode: SelectionMode, id: &str, checked: bool) -> RowIdSet {
    match mode {
        SelectionMode::Single => {
            let mut next = RowIdSet::new();
            if checked {
                next.insert(id.to_string());
            }
            next
        }
        SelectionMode::Multiple => {
            let mut next = selection.clone();
            if checked {
                next.insert(id.to_string());
            } else {
                next.remove(id);
            }
            next
        }
    }
}

/// Checked selects exactly the rows currently passed in, never a remembered superset.
pub fn toggle_all<'a>(ids: impl IntoIterator<Item = &'a str>, checked: bool) -> RowIdSet {
    if !checked {
        return RowIdSet::new();
    }
    ids.into_iter().map(str::to_string).collect()
}

pub fn header_state<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    selection: &RowIdSet,
) -> HeaderCheckState {
    let mut total = 0usize;
    let mut selected = 0usize;
    for id in ids {
        total += 1;
        if selection.contains(id) {
            selected += 1;
        }
    }
    let all_selected = total > 0 && selected == total;
    HeaderCheckState {
        all_selected,
        indeterminate: selected > 0 && !all_selected,
    }
}
