//! Column definitions, including the two synthetic columns every data table carries.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Id of the synthetic column hosting the row expansion toggle. Always first, pinned left.
pub const EXPANDED_COLUMN_ID: &str = "Expanded";
/// Id of the synthetic column hosting the row actions menu. Always last, pinned right.
pub const ROW_ACTIONS_COLUMN_ID: &str = "RowActionsColumn";

pub const DEFAULT_COLUMN_SIZE: u16 = 16;
pub const DEFAULT_MIN_COLUMN_SIZE: u16 = 4;
pub const DEFAULT_MAX_COLUMN_SIZE: u16 = 120;

const EXPANDED_COLUMN_SIZE: u16 = 2;
const ROW_ACTIONS_COLUMN_SIZE: u16 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Data,
    Expander,
    RowActions,
}

type Accessor<T> = Rc<dyn Fn(&T) -> String>;
type Comparator<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// Caller-supplied description of one column.
///
/// Columns are cheap to clone; callbacks are reference counted.
pub struct ColumnDef<T> {
    pub id: String,
    pub header: String,
    pub size: u16,
    pub min_size: u16,
    pub max_size: u16,
    pub enable_sorting: bool,
    pub enable_resizing: bool,
    pub enable_pinning: bool,
    pub enable_hiding: bool,
    kind: ColumnKind,
    accessor: Option<Accessor<T>>,
    sort_by: Option<Comparator<T>>,
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            size: self.size,
            min_size: self.min_size,
            max_size: self.max_size,
            enable_sorting: self.enable_sorting,
            enable_resizing: self.enable_resizing,
            enable_pinning: self.enable_pinning,
            enable_hiding: self.enable_hiding,
            kind: self.kind,
            accessor: self.accessor.clone(),
            sort_by: self.sort_by.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("size", &self.size)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<T> ColumnDef<T> {
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&T) -> String + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            size: DEFAULT_COLUMN_SIZE,
            min_size: DEFAULT_MIN_COLUMN_SIZE,
            max_size: DEFAULT_MAX_COLUMN_SIZE,
            enable_sorting: true,
            enable_resizing: true,
            enable_pinning: true,
            enable_hiding: true,
            kind: ColumnKind::Data,
            accessor: Some(Rc::new(accessor)),
            sort_by: None,
        }
    }

    pub(crate) fn expander() -> Self {
        Self::synthetic(EXPANDED_COLUMN_ID, ColumnKind::Expander, EXPANDED_COLUMN_SIZE)
    }

    pub(crate) fn row_actions() -> Self {
        Self::synthetic(
            ROW_ACTIONS_COLUMN_ID,
            ColumnKind::RowActions,
            ROW_ACTIONS_COLUMN_SIZE,
        )
    }

    fn synthetic(id: &str, kind: ColumnKind, size: u16) -> Self {
        Self {
            id: id.to_string(),
            header: String::new(),
            size,
            min_size: size,
            max_size: size,
            enable_sorting: false,
            enable_resizing: false,
            enable_pinning: false,
            enable_hiding: false,
            kind,
            accessor: None,
            sort_by: None,
        }
    }

    pub fn size(mut self, size: u16) -> Self {
        self.size = size;
        self
    }

    pub fn min_size(mut self, min_size: u16) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn max_size(mut self, max_size: u16) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn sortable(mut self, enabled: bool) -> Self {
        self.enable_sorting = enabled;
        self
    }

    pub fn resizable(mut self, enabled: bool) -> Self {
        self.enable_resizing = enabled;
        self
    }

    pub fn pinnable(mut self, enabled: bool) -> Self {
        self.enable_pinning = enabled;
        self
    }

    pub fn hideable(mut self, enabled: bool) -> Self {
        self.enable_hiding = enabled;
        self
    }

    /// Overrides the default ordering (numeric when both cells parse as numbers, text otherwise).
    pub fn sort_by(mut self, cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        self.sort_by = Some(Rc::new(cmp));
        self
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn is_synthetic(&self) -> bool {
        self.kind != ColumnKind::Data
    }

    /// The column width after applying its size bounds.
    pub fn clamped_size(&self, size: u16) -> u16 {
        size.clamp(self.min_size.min(self.max_size), self.max_size)
    }

    pub fn cell_value(&self, row: &T) -> String {
        self.accessor
            .as_ref()
            .map(|f| f(row))
            .unwrap_or_default()
    }

    /// Orders two rows by this column. Without a comparator, finite numeric cells sort before
    /// text cells, numbers by value and text case-insensitively.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        if let Some(cmp) = &self.sort_by {
            return cmp(a, b);
        }
        SortKey::of(&self.cell_value(a)).cmp(&SortKey::of(&self.cell_value(b)))
    }
}

#[derive(Debug, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(cell: &str) -> Self {
        match cell.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => SortKey::Number(n),
            _ => SortKey::Text(cell.to_lowercase()),
        }
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        }
    }
}
