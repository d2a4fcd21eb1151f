//! Sort state and the click cycle.
//!
//! The table never reorders data. It tracks which column is sorted and in which direction,
//! and reports that intent; the app reorders its rows ([`SortState::sort_rows`] is provided
//! for apps that sort in memory).

use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// `column = None` or `direction = None` both mean "unsorted".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: Option<SortDirection>,
}

/// Direction after clicking `clicked`: a different column starts at ascending, the same
/// column cycles asc → desc → unsorted → asc.
pub fn next_direction(
    current_column: Option<&str>,
    current_direction: Option<SortDirection>,
    clicked: &str,
) -> Option<SortDirection> {
    if current_column != Some(clicked) {
        return Some(SortDirection::Asc);
    }
    match current_direction {
        Some(SortDirection::Asc) => Some(SortDirection::Desc),
        Some(SortDirection::Desc) => None,
        None => Some(SortDirection::Asc),
    }
}

impl SortState {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction: Some(direction),
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.column.is_some() && self.direction.is_some()
    }

    /// Direction shown for `column_id`, `None` when it is not the sorted column.
    pub fn direction_for(&self, column_id: &str) -> Option<SortDirection> {
        if self.column.as_deref() == Some(column_id) {
            self.direction
        } else {
            None
        }
    }

    /// State after a header click. Cycling back to unsorted also clears the column.
    pub fn clicked(&self, column_id: &str) -> SortState {
        match next_direction(self.column.as_deref(), self.direction, column_id) {
            Some(direction) => SortState::new(column_id, direction),
            None => SortState::default(),
        }
    }

    /// Stable in-memory sort by the active column.
    ///
    /// `compare(a, b, column_id)` orders two rows ascending. Descending flips the comparator
    /// rather than reversing the slice, so rows that compare equal keep their incoming order
    /// in both directions. Unsorted state leaves `rows` untouched.
    pub fn sort_rows<T>(&self, rows: &mut [T], compare: impl Fn(&T, &T, &str) -> Ordering) {
        let (Some(column), Some(direction)) = (self.column.as_deref(), self.direction) else {
            return;
        };
        match direction {
            SortDirection::Asc => rows.sort_by(|a, b| compare(a, b, column)),
            SortDirection::Desc => rows.sort_by(|a, b| compare(b, a, column)),
        }
    }
}

pub fn indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => "▲",
        Some(SortDirection::Desc) => "▼",
        None => "↕",
    }
}
