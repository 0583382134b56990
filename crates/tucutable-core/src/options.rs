//! Configuration surface of a data table.
//!
//! These mirror the props a host passes when mounting a table. Every struct has a `Default` and
//! deserializes from camelCase JSON, so a host can keep table configuration next to its other
//! settings.

use crate::state::ColumnPinningState;
use crate::state::PaginationState;
use crate::state::SortingState;
use crate::state::VisibilityState;
use crate::status::StateMessages;
use serde::Deserialize;
use serde::Serialize;

/// Choices offered by the records-per-page selector.
pub const PAGE_SIZE_CHOICES: [usize; 4] = [5, 10, 20, 50];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationOptions {
    pub show_pagination: bool,
    /// Starting page, used only while the store still holds the default pagination.
    pub page_index: Option<usize>,
    pub page_size: Option<usize>,
    /// Show the "1-10 of 42" summary.
    pub rows_info: bool,
    pub hide_records_selector: bool,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            show_pagination: true,
            page_index: None,
            page_size: None,
            rows_info: true,
            hide_records_selector: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderOptions {
    pub header_sticky: bool,
    pub enable_hide_columns: bool,
    pub enable_pin_left_columns: bool,
    pub enable_pin_right_columns: bool,
    pub enable_sort_columns: bool,
    pub enable_resize_columns: bool,
    pub enable_drag_columns: bool,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            header_sticky: true,
            enable_hide_columns: true,
            enable_pin_left_columns: true,
            enable_pin_right_columns: true,
            enable_sort_columns: true,
            enable_resize_columns: true,
            enable_drag_columns: true,
        }
    }
}

/// Table state applied on a table's first mount, before the store holds a layout for it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitialConfig {
    pub sorting: SortingState,
    pub column_visibility: VisibilityState,
    pub column_pinning: ColumnPinningState,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataTableOptions {
    pub title: Option<String>,
    pub border: bool,
    pub initial_config: Option<InitialConfig>,
    pub is_loading: bool,
    pub is_error: bool,
    pub pagination: PaginationOptions,
    pub header_options: HeaderOptions,
    /// Compact layout: no gaps between columns.
    pub small_anatomy: bool,
    /// Repeat the column headers below the rows.
    pub show_footer: bool,
    pub state_message: StateMessages,
}

impl Default for DataTableOptions {
    fn default() -> Self {
        Self {
            title: None,
            border: true,
            initial_config: None,
            is_loading: false,
            is_error: false,
            pagination: PaginationOptions::default(),
            header_options: HeaderOptions::default(),
            small_anatomy: false,
            show_footer: false,
            state_message: StateMessages::default(),
        }
    }
}

impl DataTableOptions {
    /// The starting pagination requested by `pagination`, if any field was set.
    pub fn initial_pagination(&self) -> Option<PaginationState> {
        let p = &self.pagination;
        if p.page_index.is_none() && p.page_size.is_none() {
            return None;
        }
        let defaults = PaginationState::default();
        Some(PaginationState {
            page_index: p.page_index.unwrap_or(defaults.page_index),
            page_size: p.page_size.unwrap_or(defaults.page_size).max(1),
        })
    }

    pub fn col_gap(&self) -> u32 {
        if self.small_anatomy { 0 } else { 1 }
    }
}

/// Next entry of [`PAGE_SIZE_CHOICES`] after `current`, wrapping around.
pub fn next_page_size(current: usize) -> usize {
    PAGE_SIZE_CHOICES
        .iter()
        .copied()
        .find(|&s| s > current)
        .unwrap_or(PAGE_SIZE_CHOICES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_partial_camel_case_props() {
        let o: DataTableOptions = serde_json::from_str(
            r#"{
                "title": "Orders",
                "isLoading": true,
                "pagination": { "pageSize": 20, "hideRecordsSelector": true },
                "headerOptions": { "enableDragColumns": false },
                "stateMessage": { "empty": { "title": "No orders", "description": "" } }
            }"#,
        )
        .unwrap();
        assert_eq!(o.title.as_deref(), Some("Orders"));
        assert!(o.is_loading);
        assert!(o.pagination.show_pagination);
        assert!(o.pagination.hide_records_selector);
        assert!(!o.header_options.enable_drag_columns);
        assert!(o.header_options.enable_sort_columns);
        assert_eq!(
            o.state_message.empty.as_ref().map(|m| m.title.clone()),
            Some("No orders".to_string())
        );
        assert_eq!(
            o.initial_pagination(),
            Some(PaginationState {
                page_index: 0,
                page_size: 20
            })
        );
    }

    #[test]
    fn no_initial_pagination_by_default() {
        assert_eq!(DataTableOptions::default().initial_pagination(), None);
    }

    #[test]
    fn page_size_choices_wrap() {
        assert_eq!(next_page_size(5), 10);
        assert_eq!(next_page_size(10), 20);
        assert_eq!(next_page_size(50), 5);
        assert_eq!(next_page_size(7), 10);
    }
}
