//! The data table state hook.
//!
//! [`DataTable`] wires a [`TableStores`] entry and the resolved [`InitialState`] into a
//! [`Table`] engine. Change handlers take an [`Updater`], apply it against the current snapshot,
//! forward the result to the store and rebuild the engine state, so the store and the engine never
//! disagree between calls.
//!
//! The synthetic expander column is always pinned left and the row actions column always pinned
//! right, whatever the stored pinning says.

use crate::column::ColumnDef;
use crate::column::EXPANDED_COLUMN_ID;
use crate::column::ROW_ACTIONS_COLUMN_ID;
use crate::error::DataTableError;
use crate::error::Result;
use crate::initial_state::InitialState;
use crate::options::InitialConfig;
use crate::state::ColumnFilter;
use crate::state::ColumnFiltersState;
use crate::state::ColumnOrderState;
use crate::state::ColumnPinningState;
use crate::state::ColumnSort;
use crate::state::ExpandedState;
use crate::state::PaginationState;
use crate::state::PersistedTableState;
use crate::state::PinSide;
use crate::state::RowId;
use crate::state::SortingState;
use crate::state::TableId;
use crate::state::Updater;
use crate::state::VisibilityState;
use crate::status::TableStatus;
use crate::store::TableStores;
use crate::table::GetRowId;
use crate::table::Table;
use crate::table::TableState;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::rc::Rc;
use tracing::debug;

pub struct DataTable<T> {
    table_id: TableId,
    stores: TableStores,
    table: Table<T>,
    sorting: SortingState,
    first_mount: bool,
}

impl<T> std::fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("table_id", &self.table_id)
            .field("sorting", &self.sorting)
            .field("table", &self.table)
            .finish()
    }
}

impl<T> DataTable<T> {
    /// Builds the table for `table_id`.
    ///
    /// `get_row_id` gives every row a stable identity, so expansion survives sorting and
    /// pagination.
    pub fn new(
        stores: TableStores,
        table_id: impl Into<TableId>,
        data: Vec<T>,
        columns: Vec<ColumnDef<T>>,
        get_row_id: impl Fn(&T, usize) -> RowId + 'static,
    ) -> Self {
        let table_id = table_id.into();
        let init = InitialState::resolve(&stores, &table_id, columns);
        let stored = stores.get(&table_id);
        let sorting = stored.sorting.clone();
        let state = merge_state(
            stored,
            sorting.clone(),
            ExpandedState::new(),
            Default::default(),
        );
        let get_row_id: GetRowId<T> = Rc::new(get_row_id);

        let mut dt = Self {
            table: Table::new(data, init.columns, get_row_id, state),
            table_id,
            stores,
            sorting,
            first_mount: init.seeded,
        };
        dt.clamp_page_index();
        dt
    }

    /// Applies a caller-provided starting page when the store still holds the default one.
    pub fn with_initial_pagination(mut self, pagination: PaginationState) -> Self {
        if self.stores.get(&self.table_id).pagination == PaginationState::default() {
            self.stores.set_pagination(&self.table_id, pagination);
            self.sync();
            self.clamp_page_index();
        }
        self
    }

    /// Seeds sorting, visibility and pinning from `config` on the table's first mount. Once the
    /// store holds a layout for the table, whatever the user recorded there wins.
    pub fn with_initial_config(mut self, config: &InitialConfig) -> Self {
        if !self.first_mount {
            return self;
        }
        let stored = self.stores.get(&self.table_id);
        if !config.sorting.is_empty() {
            self.sorting = config.sorting.clone();
            self.stores.set_sorting(&self.table_id, config.sorting.clone());
        }
        if !config.column_visibility.is_empty() {
            let mut visibility = stored.column_visibility;
            visibility.extend(config.column_visibility.clone());
            self.stores.set_column_visibility(&self.table_id, visibility);
        }
        if !config.column_pinning.is_empty() {
            self.stores
                .set_column_pinning(&self.table_id, config.column_pinning.clone());
        }
        self.sync();
        self
    }

    pub fn table_id(&self) -> &TableId {
        &self.table_id
    }

    pub fn stores(&self) -> &TableStores {
        &self.stores
    }

    pub fn table(&self) -> &Table<T> {
        &self.table
    }

    pub fn state(&self) -> &TableState {
        self.table.state()
    }

    pub fn sorting(&self) -> &SortingState {
        &self.sorting
    }

    /// Replaces the rows. Expansion is kept for rows whose id is still present.
    pub fn set_data(&mut self, data: Vec<T>) {
        let ids: BTreeSet<RowId> = data
            .iter()
            .enumerate()
            .map(|(i, row)| self.table.row_id(row, i))
            .collect();
        self.table.set_data(data);
        let mut state = self.table.state().clone();
        state.expanded.retain(|id| ids.contains(id));
        self.table.set_state(state);
        self.clamp_page_index();
    }

    pub fn on_sorting_change(&mut self, updater: impl Into<Updater<SortingState>>) {
        let next = updater.into().apply(&self.sorting);
        debug!(table_id = %self.table_id, sorting = ?next, "sorting changed");
        self.sorting = next.clone();
        self.stores.set_sorting(&self.table_id, next);
        self.sync();
    }

    pub fn on_pagination_change(&mut self, updater: impl Into<Updater<PaginationState>>) {
        let next = updater.into().apply(&self.table.state().pagination);
        debug!(table_id = %self.table_id, ?next, "pagination changed");
        self.stores.set_pagination(&self.table_id, next);
        self.sync();
    }

    pub fn on_column_order_change(&mut self, updater: impl Into<Updater<ColumnOrderState>>) {
        let next = updater.into().apply(&self.table.state().column_order);
        debug!(table_id = %self.table_id, order = ?next, "column order changed");
        self.stores.set_column_order(&self.table_id, next);
        self.sync();
    }

    pub fn on_column_visibility_change(&mut self, updater: impl Into<Updater<VisibilityState>>) {
        let next = updater.into().apply(&self.table.state().column_visibility);
        debug!(table_id = %self.table_id, "column visibility changed");
        self.stores.set_column_visibility(&self.table_id, next);
        self.sync();
    }

    pub fn on_column_pinning_change(&mut self, updater: impl Into<Updater<ColumnPinningState>>) {
        let next = updater.into().apply(&self.table.state().column_pinning);
        debug!(table_id = %self.table_id, pinning = ?next, "column pinning changed");
        self.stores.set_column_pinning(&self.table_id, next);
        self.sync();
    }

    /// Filters always send the table back to its first page.
    pub fn on_column_filters_change(&mut self, updater: impl Into<Updater<ColumnFiltersState>>) {
        let next = updater.into().apply(&self.table.state().column_filters);
        debug!(table_id = %self.table_id, filters = ?next, "column filters changed");
        self.stores.set_column_filters(&self.table_id, next);
        let pagination = self.table.state().pagination;
        if pagination.page_index != 0 {
            self.stores.set_pagination(
                &self.table_id,
                PaginationState {
                    page_index: 0,
                    ..pagination
                },
            );
        }
        self.sync();
    }

    /// Expansion is session state: it is not persisted.
    pub fn on_expanded_change(&mut self, updater: impl Into<Updater<ExpandedState>>) {
        let mut state = self.table.state().clone();
        state.expanded = updater.into().apply(&state.expanded);
        self.table.set_state(state);
    }

    /// Clears sorting, resets the engine, and wipes the persisted record.
    pub fn reset_table(&mut self) {
        debug!(table_id = %self.table_id, "resetting table");
        self.sorting.clear();
        self.table.reset();
        self.stores.reset_store_data(&self.table_id);
        self.sync();
    }

    /// Cycles a column through unsorted, ascending and descending.
    pub fn toggle_sorting(&mut self, column_id: &str) -> Result<()> {
        let col = self.column(column_id)?;
        if !col.enable_sorting {
            return Ok(());
        }
        let next = match self.sorting.iter().find(|s| s.id == column_id) {
            None => vec![ColumnSort::asc(column_id)],
            Some(s) if !s.desc => vec![ColumnSort::desc(column_id)],
            Some(_) => Vec::new(),
        };
        self.on_sorting_change(next);
        Ok(())
    }

    pub fn toggle_column_visibility(&mut self, column_id: &str) -> Result<()> {
        let col = self.column(column_id)?;
        if !col.enable_hiding {
            return Ok(());
        }
        let visible = self.table.is_column_visible(column_id);
        let id = column_id.to_string();
        self.on_column_visibility_change(Updater::from_fn(move |v: &VisibilityState| {
            let mut v = v.clone();
            v.insert(id, !visible);
            v
        }));
        Ok(())
    }

    /// Pins a column to a side, or unpins it with `None`.
    pub fn pin_column(&mut self, column_id: &str, side: Option<PinSide>) -> Result<()> {
        let col = self.column(column_id)?;
        if !col.enable_pinning {
            return Ok(());
        }
        let id = column_id.to_string();
        self.on_column_pinning_change(Updater::from_fn(move |p: &ColumnPinningState| {
            let mut p = p.clone();
            p.left.retain(|c| *c != id);
            p.right.retain(|c| *c != id);
            match side {
                Some(PinSide::Left) => p.left.push(id),
                Some(PinSide::Right) => p.right.insert(0, id),
                None => {}
            }
            p
        }));
        Ok(())
    }

    /// Moves a column within the order. Synthetic columns stay at the ends.
    pub fn move_column(&mut self, column_id: &str, to_index: usize) -> Result<()> {
        let col = self.column(column_id)?;
        if col.is_synthetic() {
            return Ok(());
        }
        let mut order: Vec<String> = self
            .table
            .ordered_columns()
            .iter()
            .map(|c| c.id.clone())
            .collect();
        let Some(from) = order.iter().position(|c| c == column_id) else {
            return Ok(());
        };
        let id = order.remove(from);
        let lo = usize::from(order.first().is_some_and(|c| c == EXPANDED_COLUMN_ID));
        let hi = order.len()
            - usize::from(order.last().is_some_and(|c| c == ROW_ACTIONS_COLUMN_ID));
        order.insert(to_index.clamp(lo, hi), id);
        self.on_column_order_change(order);
        Ok(())
    }

    pub fn set_column_size(&mut self, column_id: &str, size: u16) -> Result<bool> {
        self.column(column_id)?;
        Ok(self.table.set_column_size(column_id, size))
    }

    pub fn set_column_filter(&mut self, column_id: &str, value: &str) -> Result<()> {
        self.column(column_id)?;
        let id = column_id.to_string();
        let value = value.to_string();
        self.on_column_filters_change(Updater::from_fn(move |f: &ColumnFiltersState| {
            let mut f: ColumnFiltersState = f.iter().filter(|c| c.id != id).cloned().collect();
            if !value.is_empty() {
                f.push(ColumnFilter::new(id, value));
            }
            f
        }));
        Ok(())
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        let last = self.table.page_count() - 1;
        self.on_pagination_change(Updater::from_fn(move |p: &PaginationState| {
            PaginationState {
                page_index: page_index.min(last),
                ..*p
            }
        }));
    }

    /// Changing the page size goes back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.on_pagination_change(PaginationState {
            page_index: 0,
            page_size: page_size.max(1),
        });
    }

    pub fn next_page(&mut self) -> bool {
        if !self.table.can_next_page() {
            return false;
        }
        self.set_page_index(self.table.state().pagination.page_index + 1);
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.table.can_previous_page() {
            return false;
        }
        self.set_page_index(self.table.state().pagination.page_index - 1);
        true
    }

    pub fn toggle_expanded(&mut self, row_id: &RowId) {
        let id = row_id.clone();
        self.on_expanded_change(Updater::from_fn(move |e: &ExpandedState| {
            let mut e = e.clone();
            if !e.remove(&id) {
                e.insert(id);
            }
            e
        }));
    }

    pub fn status(&self, is_loading: bool, is_error: bool) -> TableStatus {
        TableStatus::derive(is_loading, is_error, self.table.row_count())
    }

    fn column(&self, column_id: &str) -> Result<&ColumnDef<T>> {
        self.table
            .column(column_id)
            .ok_or_else(|| DataTableError::UnknownColumn(column_id.to_string()))
    }

    /// Keeps the page index within the current row count, e.g. after a stored page outlived its
    /// rows.
    fn clamp_page_index(&mut self) {
        let last_page = self.table.page_count() - 1;
        let pagination = self.table.state().pagination;
        if pagination.page_index > last_page {
            self.on_pagination_change(PaginationState {
                page_index: last_page,
                ..pagination
            });
        }
    }

    fn sync(&mut self) {
        let state = self.merged_state();
        self.table.set_state(state);
    }

    fn merged_state(&self) -> TableState {
        let current = self.table.state();
        merge_state(
            self.stores.get(&self.table_id),
            self.sorting.clone(),
            current.expanded.clone(),
            current.column_sizing.clone(),
        )
    }
}

/// Combines store-backed fields with the table's local state.
fn merge_state(
    stored: PersistedTableState,
    sorting: SortingState,
    expanded: ExpandedState,
    column_sizing: BTreeMap<String, u16>,
) -> TableState {
    TableState {
        sorting,
        pagination: stored.pagination,
        column_order: stored.column_order,
        column_visibility: stored.column_visibility,
        column_pinning: with_synthetic_pins(stored.column_pinning),
        column_filters: stored.column_filters,
        expanded,
        column_sizing,
    }
}

/// Forces the expander column first on the left and the row actions column last on the right.
pub fn with_synthetic_pins(pinning: ColumnPinningState) -> ColumnPinningState {
    let caller_pin = |c: &String| c != EXPANDED_COLUMN_ID && c != ROW_ACTIONS_COLUMN_ID;
    let mut left = vec![EXPANDED_COLUMN_ID.to_string()];
    left.extend(pinning.left.into_iter().filter(caller_pin));
    let mut right: Vec<String> = pinning.right.into_iter().filter(caller_pin).collect();
    right.push(ROW_ACTIONS_COLUMN_ID.to_string());
    ColumnPinningState { left, right }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::storage::Storage;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Debug)]
    struct Order {
        id: &'static str,
        name: &'static str,
        amount: u32,
    }

    fn orders() -> Vec<Order> {
        [("o1", "Ada", 30), ("o2", "Grace", 10), ("o3", "Linus", 20)]
            .into_iter()
            .map(|(id, name, amount)| Order { id, name, amount })
            .collect()
    }

    fn columns() -> Vec<ColumnDef<Order>> {
        vec![
            ColumnDef::new("name", "Name", |o: &Order| o.name.to_string()),
            ColumnDef::new("amount", "Amount", |o: &Order| o.amount.to_string()),
        ]
    }

    fn data_table(stores: &TableStores) -> DataTable<Order> {
        DataTable::new(stores.clone(), "orders", orders(), columns(), |o: &Order, _: usize| {
            RowId::new(o.id)
        })
    }

    fn visible_ids(dt: &DataTable<Order>) -> Vec<String> {
        dt.table()
            .visible_columns()
            .into_iter()
            .map(|c| c.id.clone())
            .collect()
    }

    #[test]
    fn synthetic_pins_survive_any_stored_pinning() {
        let stores = TableStores::in_memory();
        let mut dt = data_table(&stores);
        dt.on_column_pinning_change(ColumnPinningState {
            left: vec!["amount".into()],
            right: vec![EXPANDED_COLUMN_ID.into()],
        });

        let pinning = &dt.state().column_pinning;
        assert_eq!(pinning.left, vec![EXPANDED_COLUMN_ID, "amount"]);
        assert_eq!(pinning.right, vec![ROW_ACTIONS_COLUMN_ID]);
        assert_eq!(
            visible_ids(&dt),
            vec![EXPANDED_COLUMN_ID, "amount", "name", ROW_ACTIONS_COLUMN_ID]
        );
    }

    #[test]
    fn handlers_forward_updates_to_the_store() {
        let stores = TableStores::in_memory();
        let mut dt = data_table(&stores);
        dt.on_pagination_change(Updater::from_fn(|p: &PaginationState| PaginationState {
            page_index: p.page_index + 1,
            ..*p
        }));
        dt.toggle_sorting("amount").unwrap();
        dt.toggle_sorting("amount").unwrap();
        dt.toggle_column_visibility("name").unwrap();

        let stored = stores.get(&TableId::new("orders"));
        assert_eq!(stored.pagination.page_index, 1);
        assert_eq!(stored.sorting, vec![ColumnSort::desc("amount")]);
        assert_eq!(stored.column_visibility.get("name"), Some(&false));
        assert_eq!(dt.sorting(), &vec![ColumnSort::desc("amount")]);
        assert!(!dt.table().is_column_visible("name"));
    }

    #[test]
    fn reset_table_clears_sorting_store_and_engine_state() {
        let stores = TableStores::in_memory();
        let mut dt = data_table(&stores);
        dt.on_sorting_change(vec![ColumnSort::desc("amount")]);
        dt.toggle_expanded(&RowId::new("o1"));
        dt.set_column_size("name", 30).unwrap();

        dt.reset_table();

        assert!(dt.sorting().is_empty());
        assert!(dt.state().sorting.is_empty());
        assert!(dt.state().expanded.is_empty());
        assert_eq!(dt.table().column_size("name"), 16);
        assert_eq!(
            stores.get(&TableId::new("orders")),
            PersistedTableState::default()
        );
    }

    #[test]
    fn stored_state_is_restored_on_next_mount() {
        let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        {
            let mut dt = data_table(&TableStores::new(storage.clone()));
            dt.on_sorting_change(vec![ColumnSort::asc("name")]);
            dt.move_column("amount", 1).unwrap();
        }
        let dt = data_table(&TableStores::new(storage));
        assert_eq!(dt.sorting(), &vec![ColumnSort::asc("name")]);
        assert_eq!(
            visible_ids(&dt),
            vec![EXPANDED_COLUMN_ID, "amount", "name", ROW_ACTIONS_COLUMN_ID]
        );
    }

    #[test]
    fn move_column_keeps_synthetic_columns_at_the_ends() {
        let stores = TableStores::in_memory();
        let mut dt = data_table(&stores);
        dt.move_column("name", 99).unwrap();
        dt.move_column(ROW_ACTIONS_COLUMN_ID, 0).unwrap();
        assert_eq!(
            dt.state().column_order,
            vec![EXPANDED_COLUMN_ID, "amount", "name", ROW_ACTIONS_COLUMN_ID]
        );
        assert!(matches!(
            dt.move_column("missing", 0),
            Err(DataTableError::UnknownColumn(_))
        ));
    }

    #[test]
    fn expansion_is_keyed_by_row_id() {
        let stores = TableStores::in_memory();
        let mut dt = data_table(&stores);
        dt.toggle_expanded(&RowId::new("o2"));
        dt.toggle_sorting("amount").unwrap();

        let rows = dt.table().page_rows();
        assert_eq!(rows[0].id, RowId::new("o2"));
        assert!(rows[0].expanded);

        dt.set_data(orders().into_iter().filter(|o| o.id != "o2").collect());
        assert!(dt.state().expanded.is_empty());
    }

    #[test]
    fn filtering_and_page_size_return_to_first_page() {
        let stores = TableStores::in_memory();
        let mut dt = data_table(&stores);
        dt.set_page_size(1);
        assert!(dt.next_page());
        assert!(dt.next_page());
        assert!(!dt.next_page());
        assert_eq!(dt.state().pagination.page_index, 2);

        dt.set_column_filter("name", "a").unwrap();
        assert_eq!(dt.state().pagination.page_index, 0);
        assert_eq!(dt.table().row_count(), 2);
        assert!(!dt.previous_page());
    }

    #[test]
    fn initial_pagination_only_applies_over_defaults() {
        let stores = TableStores::in_memory();
        let dt = data_table(&stores).with_initial_pagination(PaginationState {
            page_index: 0,
            page_size: 25,
        });
        assert_eq!(dt.state().pagination.page_size, 25);

        let dt = data_table(&stores).with_initial_pagination(PaginationState {
            page_index: 0,
            page_size: 50,
        });
        assert_eq!(dt.state().pagination.page_size, 25);
    }

    #[test]
    fn initial_config_seeds_only_unrecorded_fields() {
        let stores = TableStores::in_memory();
        let config = InitialConfig {
            sorting: vec![ColumnSort::desc("amount")],
            column_visibility: [("name".to_string(), false)].into_iter().collect(),
            column_pinning: ColumnPinningState {
                left: vec!["name".into()],
                right: Vec::new(),
            },
        };
        let mut dt = data_table(&stores).with_initial_config(&config);
        assert_eq!(dt.sorting(), &vec![ColumnSort::desc("amount")]);
        assert!(!dt.table().is_column_visible("name"));
        assert_eq!(dt.state().column_pinning.left, vec![EXPANDED_COLUMN_ID, "name"]);

        dt.on_sorting_change(vec![ColumnSort::asc("name")]);
        let dt = data_table(&stores).with_initial_config(&config);
        assert_eq!(dt.sorting(), &vec![ColumnSort::asc("name")]);
    }

    #[test]
    fn stale_stored_page_is_clamped_on_mount() {
        let stores = TableStores::in_memory();
        let id = TableId::new("orders");
        stores.set_pagination(
            &id,
            PaginationState {
                page_index: 4,
                page_size: 2,
            },
        );

        let dt = data_table(&stores);
        assert_eq!(dt.state().pagination.page_index, 1);
        assert_eq!(stores.get(&id).pagination.page_index, 1);
        assert_eq!(dt.table().page_rows().len(), 1);

        let dt = data_table(&TableStores::in_memory()).with_initial_pagination(PaginationState {
            page_index: 7,
            page_size: 10,
        });
        assert_eq!(dt.state().pagination.page_index, 0);
    }

    #[test]
    fn initial_config_does_not_override_restored_visibility() {
        let stores = TableStores::in_memory();
        let config = InitialConfig {
            column_visibility: [("name".to_string(), false)].into_iter().collect(),
            ..Default::default()
        };
        let mut dt = data_table(&stores).with_initial_config(&config);
        assert!(!dt.table().is_column_visible("name"));
        dt.toggle_column_visibility("name").unwrap();

        let dt = data_table(&stores).with_initial_config(&config);
        assert!(dt.table().is_column_visible("name"));
    }
}
