//! Headless table engine.
//!
//! [`Table`] holds rows, column definitions and a [`TableState`] snapshot, and derives column
//! layout (order, visibility, pinning, sizing) and the row model (filtering, sorting, pagination,
//! expansion) from them. It owns no persistence; [`crate::data_table::DataTable`] feeds it state
//! from the store and forwards changes back.

mod row_model;

pub use row_model::Row;
pub use row_model::RowsInfo;

use crate::column::ColumnDef;
use crate::state::ColumnFiltersState;
use crate::state::ColumnOrderState;
use crate::state::ColumnPinningState;
use crate::state::ExpandedState;
use crate::state::PaginationState;
use crate::state::PinSide;
use crate::state::RowId;
use crate::state::SortingState;
use crate::state::VisibilityState;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Maps a row (and its position in the data) to its stable identity.
pub type GetRowId<T> = Rc<dyn Fn(&T, usize) -> RowId>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableState {
    pub sorting: SortingState,
    pub pagination: PaginationState,
    pub column_order: ColumnOrderState,
    pub column_visibility: VisibilityState,
    pub column_pinning: ColumnPinningState,
    pub column_filters: ColumnFiltersState,
    pub expanded: ExpandedState,
    pub column_sizing: BTreeMap<String, u16>,
}

pub struct Table<T> {
    data: Vec<T>,
    columns: Vec<ColumnDef<T>>,
    get_row_id: GetRowId<T>,
    state: TableState,
    initial_state: TableState,
}

impl<T> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("rows", &self.data.len())
            .field("columns", &self.columns)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<T> Table<T> {
    pub fn new(
        data: Vec<T>,
        columns: Vec<ColumnDef<T>>,
        get_row_id: GetRowId<T>,
        initial_state: TableState,
    ) -> Self {
        Self {
            data,
            columns,
            get_row_id,
            state: initial_state.clone(),
            initial_state,
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn set_state(&mut self, state: TableState) {
        self.state = state;
    }

    pub fn initial_state(&self) -> &TableState {
        &self.initial_state
    }

    /// Restores the state the table was created with.
    pub fn reset(&mut self) {
        self.state = self.initial_state.clone();
    }

    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&ColumnDef<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn row_id(&self, row: &T, index: usize) -> RowId {
        (self.get_row_id)(row, index)
    }

    pub fn get_row_can_expand(&self, _row: &Row<'_, T>) -> bool {
        true
    }

    /// Columns in state order. Ids unknown to the table are skipped; columns missing from the
    /// order are appended in definition order.
    pub fn ordered_columns(&self) -> Vec<&ColumnDef<T>> {
        let mut out: Vec<&ColumnDef<T>> = Vec::with_capacity(self.columns.len());
        for id in &self.state.column_order {
            if let Some(col) = self.column(id) {
                if !out.iter().any(|c| c.id == col.id) {
                    out.push(col);
                }
            }
        }
        for col in &self.columns {
            if !out.iter().any(|c| c.id == col.id) {
                out.push(col);
            }
        }
        out
    }

    pub fn is_column_visible(&self, id: &str) -> bool {
        match self.column(id) {
            Some(col) if !col.enable_hiding => true,
            Some(_) => self.state.column_visibility.get(id).copied().unwrap_or(true),
            None => false,
        }
    }

    pub fn column_pin_side(&self, id: &str) -> Option<PinSide> {
        self.state.column_pinning.side_of(id)
    }

    pub fn left_columns(&self) -> Vec<&ColumnDef<T>> {
        self.pinned_columns(&self.state.column_pinning.left)
    }

    pub fn right_columns(&self) -> Vec<&ColumnDef<T>> {
        self.pinned_columns(&self.state.column_pinning.right)
    }

    pub fn center_columns(&self) -> Vec<&ColumnDef<T>> {
        self.ordered_columns()
            .into_iter()
            .filter(|c| self.column_pin_side(&c.id).is_none() && self.is_column_visible(&c.id))
            .collect()
    }

    /// Visible columns in render order: left pinned, center, right pinned.
    pub fn visible_columns(&self) -> Vec<&ColumnDef<T>> {
        let mut out = self.left_columns();
        out.extend(self.center_columns());
        out.extend(self.right_columns());
        out
    }

    pub fn column_size(&self, id: &str) -> u16 {
        let Some(col) = self.column(id) else {
            return 0;
        };
        let size = self
            .state
            .column_sizing
            .get(id)
            .copied()
            .unwrap_or(col.size);
        col.clamped_size(size)
    }

    /// Sets an explicit width for a resizable column. Returns `false` if nothing changed.
    pub fn set_column_size(&mut self, id: &str, size: u16) -> bool {
        let Some(col) = self.column(id) else {
            return false;
        };
        if !col.enable_resizing {
            return false;
        }
        let size = col.clamped_size(size);
        if self.column_size(id) == size {
            return false;
        }
        self.state.column_sizing.insert(id.to_string(), size);
        true
    }

    pub fn total_size(&self) -> u32 {
        self.visible_columns()
            .iter()
            .map(|c| self.column_size(&c.id) as u32)
            .sum()
    }

    pub fn is_row_expanded(&self, id: &RowId) -> bool {
        self.state.expanded.contains(id)
    }

    pub fn toggle_row_expanded(&mut self, id: &RowId) {
        if !self.state.expanded.remove(id) {
            self.state.expanded.insert(id.clone());
        }
    }

    fn pinned_columns(&self, ids: &[String]) -> Vec<&ColumnDef<T>> {
        ids.iter()
            .filter_map(|id| self.column(id))
            .filter(|c| self.is_column_visible(&c.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::EXPANDED_COLUMN_ID;
    use crate::column::ROW_ACTIONS_COLUMN_ID;
    use crate::initial_state::augment_columns;
    use crate::state::ColumnFilter;
    use crate::state::ColumnSort;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Debug)]
    struct Order {
        id: u32,
        name: &'static str,
        amount: i64,
    }

    fn orders() -> Vec<Order> {
        vec![
            Order {
                id: 1,
                name: "Ada",
                amount: 30,
            },
            Order {
                id: 2,
                name: "Grace",
                amount: 10,
            },
            Order {
                id: 3,
                name: "Linus",
                amount: 20,
            },
        ]
    }

    fn table(state: TableState) -> Table<Order> {
        let columns = augment_columns(vec![
            ColumnDef::new("name", "Name", |o: &Order| o.name.to_string()),
            ColumnDef::new("amount", "Amount", |o: &Order| o.amount.to_string()).size(8),
        ]);
        Table::new(
            orders(),
            columns,
            Rc::new(|o: &Order, _: usize| RowId::new(o.id.to_string())),
            state,
        )
    }

    fn ids(cols: Vec<&ColumnDef<Order>>) -> Vec<String> {
        cols.into_iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn order_tolerates_unknown_and_missing_ids() {
        let t = table(TableState {
            column_order: vec!["amount".into(), "gone".into()],
            ..Default::default()
        });
        assert_eq!(
            ids(t.ordered_columns()),
            vec!["amount", EXPANDED_COLUMN_ID, "name", ROW_ACTIONS_COLUMN_ID]
        );
    }

    #[test]
    fn pinned_columns_frame_the_center() {
        let t = table(TableState {
            column_pinning: ColumnPinningState {
                left: vec![EXPANDED_COLUMN_ID.into(), "amount".into()],
                right: vec![ROW_ACTIONS_COLUMN_ID.into()],
            },
            ..Default::default()
        });
        assert_eq!(
            ids(t.visible_columns()),
            vec![EXPANDED_COLUMN_ID, "amount", "name", ROW_ACTIONS_COLUMN_ID]
        );
        assert_eq!(t.column_pin_side("amount"), Some(PinSide::Left));
    }

    #[test]
    fn hidden_columns_drop_out_but_synthetic_columns_stay() {
        let t = table(TableState {
            column_visibility: [
                ("name".to_string(), false),
                (EXPANDED_COLUMN_ID.to_string(), false),
            ]
            .into(),
            ..Default::default()
        });
        assert_eq!(
            ids(t.visible_columns()),
            vec![EXPANDED_COLUMN_ID, "amount", ROW_ACTIONS_COLUMN_ID]
        );
    }

    #[test]
    fn sorts_filters_and_paginates() {
        let t = table(TableState {
            sorting: vec![ColumnSort::desc("amount")],
            pagination: PaginationState {
                page_index: 0,
                page_size: 2,
            },
            ..Default::default()
        });
        let names: Vec<&str> = t.page_rows().iter().map(|r| r.original.name).collect();
        assert_eq!(names, vec!["Ada", "Linus"]);
        assert_eq!(t.page_count(), 2);
        assert!(t.can_next_page());
        assert!(!t.can_previous_page());

        let t = table(TableState {
            column_filters: vec![ColumnFilter::new("name", "LI")],
            ..Default::default()
        });
        assert_eq!(t.row_count(), 1);
        assert_eq!(t.page_rows()[0].id, RowId::new("3"));
    }

    #[test]
    fn expansion_follows_row_id_across_sorting() {
        let mut t = table(TableState::default());
        t.toggle_row_expanded(&RowId::new("2"));
        let mut state = t.state().clone();
        state.sorting = vec![ColumnSort::asc("amount")];
        t.set_state(state);

        let rows = t.page_rows();
        assert_eq!(rows[0].original.name, "Grace");
        assert!(rows[0].expanded);
        assert!(!rows[1].expanded);
        assert!(t.get_row_can_expand(&rows[1]));
    }

    #[test]
    fn resizing_respects_bounds_and_reset() {
        let mut t = table(TableState::default());
        assert!(t.set_column_size("name", 1000));
        assert_eq!(t.column_size("name"), crate::column::DEFAULT_MAX_COLUMN_SIZE);
        assert!(!t.set_column_size(EXPANDED_COLUMN_ID, 10));
        t.reset();
        assert_eq!(t.column_size("name"), crate::column::DEFAULT_COLUMN_SIZE);
    }
}
