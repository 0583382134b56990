use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

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
        self.keys.iter().any(|k| k == event)
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_shift(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code).with_modifiers(KeyModifiers::SHIFT)
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::CTRL)
}

/// Key bindings of [`crate::view::DataTableView`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableBindings {
    pub row_up: Binding,
    pub row_down: Binding,
    pub column_left: Binding,
    pub column_right: Binding,
    pub scroll_left: Binding,
    pub scroll_right: Binding,
    pub first_row: Binding,
    pub last_row: Binding,
    pub toggle_expand: Binding,
    pub row_actions: Binding,
    pub sort: Binding,
    pub hide_column: Binding,
    pub show_all_columns: Binding,
    pub pin_left: Binding,
    pub pin_right: Binding,
    pub unpin: Binding,
    pub move_left: Binding,
    pub move_right: Binding,
    pub grow_column: Binding,
    pub shrink_column: Binding,
    pub next_page: Binding,
    pub previous_page: Binding,
    pub page_size: Binding,
    pub reset: Binding,
    pub contact_support: Binding,
}

impl Default for TableBindings {
    fn default() -> Self {
        Self {
            row_up: Binding::new("↑/k", "previous row", vec![key(KeyCode::Up), key_char('k')]),
            row_down: Binding::new("↓/j", "next row", vec![key(KeyCode::Down), key_char('j')]),
            column_left: Binding::new(
                "←/h",
                "previous column",
                vec![key(KeyCode::Left), key_char('h')],
            ),
            column_right: Binding::new(
                "→/l",
                "next column",
                vec![key(KeyCode::Right), key_char('l')],
            ),
            scroll_left: Binding::new("S-←", "scroll left", vec![key_shift(KeyCode::Left)]),
            scroll_right: Binding::new("S-→", "scroll right", vec![key_shift(KeyCode::Right)]),
            first_row: Binding::new("g", "first row", vec![key(KeyCode::Home), key_char('g')]),
            last_row: Binding::new("G", "last row", vec![key(KeyCode::End), key_char('G')]),
            toggle_expand: Binding::new(
                "enter",
                "expand row",
                vec![key(KeyCode::Enter), key_char(' ')],
            ),
            row_actions: Binding::new("m", "row actions", vec![key_char('m')]),
            sort: Binding::new("s", "sort column", vec![key_char('s')]),
            hide_column: Binding::new("x", "hide column", vec![key_char('x')]),
            show_all_columns: Binding::new("a", "show all columns", vec![key_char('a')]),
            pin_left: Binding::new("[", "pin left", vec![key_char('[')]),
            pin_right: Binding::new("]", "pin right", vec![key_char(']')]),
            unpin: Binding::new("u", "unpin", vec![key_char('u')]),
            move_left: Binding::new("<", "move column left", vec![key_char('<')]),
            move_right: Binding::new(">", "move column right", vec![key_char('>')]),
            grow_column: Binding::new("+", "widen column", vec![key_char('+')]),
            shrink_column: Binding::new("-", "narrow column", vec![key_char('-')]),
            next_page: Binding::new(
                "n",
                "next page",
                vec![key(KeyCode::PageDown), key_char('n')],
            ),
            previous_page: Binding::new(
                "p",
                "previous page",
                vec![key(KeyCode::PageUp), key_char('p')],
            ),
            page_size: Binding::new("r", "rows per page", vec![key_char('r')]),
            reset: Binding::new("R", "reset table", vec![key_char('R')]),
            contact_support: Binding::new("c", "contact support", vec![key_char('c')]),
        }
    }
}

impl TableBindings {
    /// Bindings worth listing in a one-line help footer.
    pub fn help(&self) -> Vec<&Binding> {
        vec![
            &self.toggle_expand,
            &self.sort,
            &self.hide_column,
            &self.pin_left,
            &self.pin_right,
            &self.move_left,
            &self.move_right,
            &self.next_page,
            &self.page_size,
            &self.reset,
        ]
    }
}
