use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// A set of keys bound to one action, with the text a help bar shows for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| key_event_matches(k, event))
    }
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    if pattern.code != event.code {
        return false;
    }
    // Terminals disagree on whether `G` arrives with SHIFT set; the char already carries case.
    if matches!(pattern.code, KeyCode::Char(_)) {
        return pattern.modifiers.ctrl == event.modifiers.ctrl
            && pattern.modifiers.alt == event.modifiers.alt;
    }
    pattern.modifiers == event.modifiers
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::ctrl())
}

/// Keyboard intents understood by the data table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKeyAction {
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    ScrollLeft,
    ScrollRight,
    ToggleSelect,
    ToggleSelectAll,
    ToggleExpand,
    FocusPrevHeader,
    FocusNextHeader,
    CycleSort,
    Activate,
    CancelDrag,
}

impl TableKeyAction {
    pub fn help_group(self) -> HelpGroup {
        use TableKeyAction::*;
        match self {
            CursorUp | CursorDown | PageUp | PageDown | Top | Bottom | ScrollLeft | ScrollRight
            | Activate => HelpGroup::Navigate,
            ToggleSelect | ToggleSelectAll => HelpGroup::Select,
            ToggleExpand => HelpGroup::Expand,
            FocusPrevHeader | FocusNextHeader | CycleSort => HelpGroup::Sort,
            CancelDrag => HelpGroup::Resize,
        }
    }
}

/// The table concern a key binding belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HelpGroup {
    Navigate,
    Select,
    Expand,
    Sort,
    Resize,
}

impl HelpGroup {
    pub fn label(self) -> &'static str {
        match self {
            HelpGroup::Navigate => "move",
            HelpGroup::Select => "select",
            HelpGroup::Expand => "expand",
            HelpGroup::Sort => "sort",
            HelpGroup::Resize => "resize",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelpSection {
    pub group: HelpGroup,
    pub bindings: Vec<Binding>,
}

/// Key bindings for [`crate::datatable::view::DataTableView`].
///
/// Defaults are Vim-flavoured and mirror the other list widgets: `j/k` move, `g/G` jump,
/// `Space` toggles the cursor row.
#[derive(Clone, Debug)]
pub struct DataTableBindings {
    pub cursor_up: Binding,
    pub cursor_down: Binding,
    pub page_up: Binding,
    pub page_down: Binding,
    pub top: Binding,
    pub bottom: Binding,
    pub scroll_left: Binding,
    pub scroll_right: Binding,
    pub toggle_select: Binding,
    pub toggle_select_all: Binding,
    pub toggle_expand: Binding,
    pub focus_prev_header: Binding,
    pub focus_next_header: Binding,
    pub cycle_sort: Binding,
    pub activate: Binding,
    pub cancel_drag: Binding,
}

impl Default for DataTableBindings {
    fn default() -> Self {
        Self {
            cursor_up: Binding::new("↑/k", "up", vec![key(KeyCode::Up), key_char('k')]),
            cursor_down: Binding::new("↓/j", "down", vec![key(KeyCode::Down), key_char('j')]),
            page_up: Binding::new(
                "PgUp",
                "page up",
                vec![key(KeyCode::PageUp), key_ctrl('u')],
            ),
            page_down: Binding::new(
                "PgDn",
                "page down",
                vec![key(KeyCode::PageDown), key_ctrl('d')],
            ),
            top: Binding::new("g", "top", vec![key(KeyCode::Home), key_char('g')]),
            bottom: Binding::new("G", "bottom", vec![key(KeyCode::End), key_char('G')]),
            scroll_left: Binding::new(
                "←/h",
                "scroll left",
                vec![key(KeyCode::Left), key_char('h')],
            ),
            scroll_right: Binding::new(
                "→/l",
                "scroll right",
                vec![key(KeyCode::Right), key_char('l')],
            ),
            toggle_select: Binding::new("space", "select", vec![key_char(' ')]),
            toggle_select_all: Binding::new("^a", "select all", vec![key_ctrl('a')]),
            toggle_expand: Binding::new("o", "expand", vec![key_char('o')]),
            focus_prev_header: Binding::new("[", "prev column", vec![key_char('[')]),
            focus_next_header: Binding::new("]", "next column", vec![key_char(']')]),
            cycle_sort: Binding::new("s", "sort", vec![key_char('s')]),
            activate: Binding::new("enter", "open", vec![key(KeyCode::Enter)]),
            cancel_drag: Binding::new("esc", "cancel resize", vec![key(KeyCode::Esc)]),
        }
    }
}

impl DataTableBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<TableKeyAction> {
        self.table()
            .into_iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, action)| action)
    }

    /// Bindings grouped by the concern they drive, in display order. Empty groups are left out.
    pub fn help_sections(&self) -> Vec<HelpSection> {
        let mut sections: Vec<HelpSection> = Vec::new();
        for (binding, action) in self.table() {
            let group = action.help_group();
            match sections.last_mut() {
                Some(s) if s.group == group => s.bindings.push(binding.clone()),
                _ => sections.push(HelpSection {
                    group,
                    bindings: vec![binding.clone()],
                }),
            }
        }
        sections
    }

    fn table(&self) -> [(&Binding, TableKeyAction); 16] {
        [
            (&self.cursor_up, TableKeyAction::CursorUp),
            (&self.cursor_down, TableKeyAction::CursorDown),
            (&self.page_up, TableKeyAction::PageUp),
            (&self.page_down, TableKeyAction::PageDown),
            (&self.top, TableKeyAction::Top),
            (&self.bottom, TableKeyAction::Bottom),
            (&self.scroll_left, TableKeyAction::ScrollLeft),
            (&self.scroll_right, TableKeyAction::ScrollRight),
            (&self.activate, TableKeyAction::Activate),
            (&self.toggle_select, TableKeyAction::ToggleSelect),
            (&self.toggle_select_all, TableKeyAction::ToggleSelectAll),
            (&self.toggle_expand, TableKeyAction::ToggleExpand),
            (&self.focus_prev_header, TableKeyAction::FocusPrevHeader),
            (&self.focus_next_header, TableKeyAction::FocusNextHeader),
            (&self.cycle_sort, TableKeyAction::CycleSort),
            (&self.cancel_drag, TableKeyAction::CancelDrag),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_exact_modifiers() {
        let b = Binding::new("q", "quit", vec![key_char('q')]);
        assert!(b.matches(&key_char('q')));
        assert!(!b.matches(&key_ctrl('q')));
    }

    #[test]
    fn shifted_char_matches_without_shift_in_pattern() {
        let bindings = DataTableBindings::default();
        let shifted = key_char('G').with_modifiers(KeyModifiers::shift());
        assert_eq!(bindings.action_for(&shifted), Some(TableKeyAction::Bottom));
    }

    #[test]
    fn ctrl_a_is_select_all_not_plain_a() {
        let bindings = DataTableBindings::default();
        assert_eq!(
            bindings.action_for(&key_ctrl('a')),
            Some(TableKeyAction::ToggleSelectAll)
        );
        assert_eq!(bindings.action_for(&key_char('a')), None);
    }

    #[test]
    fn help_sections_group_by_concern() {
        let sections = DataTableBindings::default().help_sections();
        let groups: Vec<HelpGroup> = sections.iter().map(|s| s.group).collect();
        assert_eq!(
            groups,
            vec![
                HelpGroup::Navigate,
                HelpGroup::Select,
                HelpGroup::Expand,
                HelpGroup::Sort,
                HelpGroup::Resize
            ]
        );
        assert_eq!(sections[0].bindings.len(), 9);
        assert_eq!(sections[3].bindings[2].help_desc, "sort");
    }
}
