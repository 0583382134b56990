//! Persisted per-table state.
//!
//! [`TableStores`] is a keyed registry from [`TableId`] to [`PersistedTableState`], backed by an
//! injected [`Storage`]. Every setter merges one field and writes the whole record back
//! synchronously; there is no batching.
//!
//! Persistence is best-effort: a failing backend is logged and the in-memory state keeps working
//! for the rest of the session.

use crate::error::Result;
use crate::state::ColumnFiltersState;
use crate::state::ColumnOrderState;
use crate::state::ColumnPinningState;
use crate::state::PaginationState;
use crate::state::PersistedTableState;
use crate::state::SortingState;
use crate::state::TableId;
use crate::state::VisibilityState;
use crate::storage::MemoryStorage;
use crate::storage::Storage;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;
use tracing::warn;

struct Inner {
    storage: Rc<dyn Storage>,
    tables: HashMap<TableId, PersistedTableState>,
}

/// Shared handle to the table state registry. Clones share the same registry.
#[derive(Clone)]
pub struct TableStores {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for TableStores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TableStores")
            .field("tables", &inner.tables.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for TableStores {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl TableStores {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                storage,
                tables: HashMap::new(),
            })),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStorage::new()))
    }

    pub fn storage(&self) -> Rc<dyn Storage> {
        self.inner.borrow().storage.clone()
    }

    /// Returns the current state of `table_id`, seeding it from storage on first access.
    pub fn get(&self, table_id: &TableId) -> PersistedTableState {
        self.with_state(table_id, |s| s.clone())
    }

    pub fn set_pagination(&self, table_id: &TableId, pagination: PaginationState) {
        self.update(table_id, |s| s.pagination = pagination);
    }

    pub fn set_sorting(&self, table_id: &TableId, sorting: SortingState) {
        self.update(table_id, |s| s.sorting = sorting);
    }

    pub fn set_column_order(&self, table_id: &TableId, column_order: ColumnOrderState) {
        self.update(table_id, |s| s.column_order = column_order);
    }

    pub fn set_column_visibility(&self, table_id: &TableId, visibility: VisibilityState) {
        self.update(table_id, |s| s.column_visibility = visibility);
    }

    pub fn set_column_pinning(&self, table_id: &TableId, pinning: ColumnPinningState) {
        self.update(table_id, |s| s.column_pinning = pinning);
    }

    pub fn set_column_filters(&self, table_id: &TableId, filters: ColumnFiltersState) {
        self.update(table_id, |s| s.column_filters = filters);
    }

    /// Clears the stored record of `table_id` and restores defaults.
    pub fn reset_store_data(&self, table_id: &TableId) {
        let mut inner = self.inner.borrow_mut();
        inner
            .tables
            .insert(table_id.clone(), PersistedTableState::default());
        if let Err(err) = inner.storage.remove_item(&table_id.storage_key()) {
            warn!(table_id = %table_id, %err, "failed to clear persisted table state");
        }
        debug!(table_id = %table_id, "table store reset");
    }

    /// Writes the current record of `table_id`, surfacing backend failures.
    pub fn try_persist(&self, table_id: &TableId) -> Result<()> {
        let state = self.get(table_id);
        let json = serde_json::to_string(&state)?;
        let inner = self.inner.borrow();
        inner.storage.set_item(&table_id.storage_key(), &json)?;
        Ok(())
    }

    fn update(&self, table_id: &TableId, f: impl FnOnce(&mut PersistedTableState)) {
        self.with_state(table_id, f);
        if let Err(err) = self.try_persist(table_id) {
            warn!(table_id = %table_id, %err, "failed to persist table state");
        }
    }

    fn with_state<R>(
        &self,
        table_id: &TableId,
        f: impl FnOnce(&mut PersistedTableState) -> R,
    ) -> R {
        let mut inner = self.inner.borrow_mut();
        let Inner { storage, tables } = &mut *inner;
        let state = tables
            .entry(table_id.clone())
            .or_insert_with(|| load(&**storage, table_id));
        f(state)
    }
}

fn load(storage: &dyn Storage, table_id: &TableId) -> PersistedTableState {
    let raw = match storage.get_item(&table_id.storage_key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return PersistedTableState::default(),
        Err(err) => {
            warn!(table_id = %table_id, %err, "failed to read persisted table state");
            return PersistedTableState::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(state) => {
            debug!(table_id = %table_id, "table state restored from storage");
            state
        }
        Err(err) => {
            warn!(table_id = %table_id, %err, "discarding unreadable table state");
            PersistedTableState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::state::ColumnFilter;
    use crate::state::ColumnSort;
    use pretty_assertions::assert_eq;

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get_item(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }

        fn remove_item(&self, _key: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
    }

    fn populated(stores: &TableStores, id: &TableId) {
        stores.set_pagination(
            id,
            PaginationState {
                page_index: 4,
                page_size: 50,
            },
        );
        stores.set_sorting(id, vec![ColumnSort::desc("amount")]);
        stores.set_column_order(id, vec!["name".into(), "amount".into()]);
        stores.set_column_visibility(id, [("amount".to_string(), false)].into());
        stores.set_column_pinning(
            id,
            ColumnPinningState {
                left: vec!["name".into()],
                right: vec![],
            },
        );
        stores.set_column_filters(id, vec![ColumnFilter::new("name", "ada")]);
    }

    #[test]
    fn reset_restores_defaults() {
        for name in ["orders", "", "users-2"] {
            let stores = TableStores::in_memory();
            let id = TableId::new(name);
            populated(&stores, &id);
            stores.reset_store_data(&id);
            assert_eq!(stores.get(&id), PersistedTableState::default());
            assert_eq!(stores.get(&id).pagination.page_size, 10);
            assert_eq!(stores.storage().get_item(&id.storage_key()).unwrap(), None);
        }
    }

    #[test]
    fn setters_do_not_clobber_other_fields() {
        let stores = TableStores::in_memory();
        let id = TableId::new("orders");
        populated(&stores, &id);
        stores.set_sorting(&id, vec![ColumnSort::asc("name")]);

        let s = stores.get(&id);
        assert_eq!(s.sorting, vec![ColumnSort::asc("name")]);
        assert_eq!(s.pagination.page_index, 4);
        assert_eq!(s.column_order, vec!["name".to_string(), "amount".to_string()]);
        assert_eq!(s.column_visibility.get("amount"), Some(&false));
        assert_eq!(s.column_pinning.left, vec!["name".to_string()]);
        assert_eq!(s.column_filters, vec![ColumnFilter::new("name", "ada")]);
    }

    #[test]
    fn last_pagination_write_wins() {
        let stores = TableStores::in_memory();
        let id = TableId::new("orders");
        stores.set_pagination(
            &id,
            PaginationState {
                page_index: 0,
                page_size: 10,
            },
        );
        stores.set_pagination(
            &id,
            PaginationState {
                page_index: 1,
                page_size: 10,
            },
        );
        assert_eq!(
            stores.get(&id).pagination,
            PaginationState {
                page_index: 1,
                page_size: 10
            }
        );
    }

    #[test]
    fn reload_from_same_storage_round_trips() {
        let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        let id = TableId::new("orders");
        let first = TableStores::new(storage.clone());
        populated(&first, &id);

        let second = TableStores::new(storage);
        assert_eq!(second.get(&id), first.get(&id));
    }

    #[test]
    fn tables_are_isolated_by_id() {
        let stores = TableStores::in_memory();
        populated(&stores, &TableId::new("orders"));
        assert_eq!(
            stores.get(&TableId::new("users")),
            PersistedTableState::default()
        );
    }

    #[test]
    fn unreadable_record_falls_back_to_defaults() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set_item("orders-table-data", "not json").unwrap();
        let stores = TableStores::new(storage);
        assert_eq!(
            stores.get(&TableId::new("orders")),
            PersistedTableState::default()
        );
    }

    #[test]
    fn broken_storage_still_works_for_the_session() {
        let stores = TableStores::new(Rc::new(BrokenStorage));
        let id = TableId::new("orders");
        stores.set_sorting(&id, vec![ColumnSort::desc("amount")]);
        assert_eq!(stores.get(&id).sorting, vec![ColumnSort::desc("amount")]);
        assert!(stores.try_persist(&id).is_err());
        stores.reset_store_data(&id);
        assert!(stores.get(&id).sorting.is_empty());
    }
}
