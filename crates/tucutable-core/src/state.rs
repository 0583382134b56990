//! Table state shapes shared by the persisted store and the table engine.
//!
//! The JSON layout (camelCase keys) is the persisted record format, so renaming fields here is a
//! storage-format change.

use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Identifier scoping every persisted record of one logical table.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(String);

impl TableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key of the persisted record, `"<tableId>-table-data"`.
    pub fn storage_key(&self) -> String {
        format!("{}-table-data", self.0)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TableId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Stable identity of a data row, produced by the caller's row id extractor.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    pub id: String,
    pub desc: bool,
}

impl ColumnSort {
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }
}

pub type SortingState = Vec<ColumnSort>;
pub type ColumnOrderState = Vec<String>;
pub type VisibilityState = BTreeMap<String, bool>;
pub type ExpandedState = BTreeSet<RowId>;
pub type ColumnFiltersState = Vec<ColumnFilter>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinSide {
    Left,
    Right,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPinningState {
    #[serde(default)]
    pub left: Vec<String>,
    #[serde(default)]
    pub right: Vec<String>,
}

impl ColumnPinningState {
    pub fn side_of(&self, id: &str) -> Option<PinSide> {
        if self.left.iter().any(|c| c == id) {
            Some(PinSide::Left)
        } else if self.right.iter().any(|c| c == id) {
            Some(PinSide::Right)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub id: String,
    pub value: String,
}

impl ColumnFilter {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Everything one table persists across sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedTableState {
    pub pagination: PaginationState,
    pub sorting: SortingState,
    pub column_order: ColumnOrderState,
    pub column_visibility: VisibilityState,
    pub column_pinning: ColumnPinningState,
    pub column_filters: ColumnFiltersState,
}

/// A state change: either a replacement value or a function of the current snapshot.
pub enum Updater<S> {
    Value(S),
    Fn(Box<dyn FnOnce(&S) -> S>),
}

impl<S> Updater<S> {
    pub fn from_fn(f: impl FnOnce(&S) -> S + 'static) -> Self {
        Updater::Fn(Box::new(f))
    }

    pub fn apply(self, current: &S) -> S {
        match self {
            Updater::Value(v) => v,
            Updater::Fn(f) => f(current),
        }
    }
}

impl<S> From<S> for Updater<S> {
    fn from(value: S) -> Self {
        Updater::Value(value)
    }
}

impl<S: fmt::Debug> fmt::Debug for Updater<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Updater::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Updater::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}
