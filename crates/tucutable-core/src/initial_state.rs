use crate::column::ColumnDef;
use crate::state::ColumnOrderState;
use crate::state::TableId;
use crate::state::VisibilityState;
use crate::store::TableStores;
use tracing::debug;

/// Initial column layout of a table.
///
/// Resolving seeds the store's column order and visibility when they are still empty. It is a
/// one-time seeding: a stored order that references columns the caller no longer passes is left
/// as is.
#[derive(Debug)]
pub struct InitialState<T> {
    /// Caller columns with the expander column prepended and the row actions column appended.
    pub columns: Vec<ColumnDef<T>>,
    pub column_order: ColumnOrderState,
    pub column_visibility: VisibilityState,
    /// True when the store had no column layout for the table, i.e. its first mount.
    pub seeded: bool,
}

impl<T> InitialState<T> {
    pub fn resolve(stores: &TableStores, table_id: &TableId, columns: Vec<ColumnDef<T>>) -> Self {
        let columns = augment_columns(columns);
        let column_order: ColumnOrderState = columns.iter().map(|c| c.id.clone()).collect();
        let column_visibility: VisibilityState =
            columns.iter().map(|c| (c.id.clone(), true)).collect();

        let stored = stores.get(table_id);
        let seeded = stored.column_order.is_empty();
        if seeded {
            debug!(table_id = %table_id, "seeding column order");
            stores.set_column_order(table_id, column_order.clone());
        }
        if stored.column_visibility.is_empty() {
            debug!(table_id = %table_id, "seeding column visibility");
            stores.set_column_visibility(table_id, column_visibility.clone());
        }

        Self {
            columns,
            column_order,
            column_visibility,
            seeded,
        }
    }
}

/// Injects the synthetic columns around the caller's list.
pub fn augment_columns<T>(columns: Vec<ColumnDef<T>>) -> Vec<ColumnDef<T>> {
    let mut out = Vec::with_capacity(columns.len() + 2);
    out.push(ColumnDef::expander());
    out.extend(columns);
    out.push(ColumnDef::row_actions());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::EXPANDED_COLUMN_ID;
    use crate::column::ROW_ACTIONS_COLUMN_ID;
    use pretty_assertions::assert_eq;

    fn columns(n: usize) -> Vec<ColumnDef<u32>> {
        (0..n)
            .map(|i| ColumnDef::new(format!("c{i}"), format!("C{i}"), |v: &u32| v.to_string()))
            .collect()
    }

    #[test]
    fn augmented_list_wraps_caller_columns() {
        for n in [0, 1, 2, 17] {
            let cols = augment_columns(columns(n));
            assert_eq!(cols.len(), n + 2);
            assert_eq!(cols[0].id, EXPANDED_COLUMN_ID);
            assert_eq!(cols[n + 1].id, ROW_ACTIONS_COLUMN_ID);
        }
    }

    #[test]
    fn seeds_empty_store_once() {
        let stores = TableStores::in_memory();
        let id = TableId::new("orders");
        let init = InitialState::resolve(&stores, &id, columns(2));
        assert_eq!(
            init.column_order,
            vec!["Expanded", "c0", "c1", "RowActionsColumn"]
        );
        assert!(init.column_visibility.values().all(|v| *v));
        assert_eq!(stores.get(&id).column_order, init.column_order);

        stores.set_column_order(&id, vec!["c1".into(), "c0".into()]);
        InitialState::resolve(&stores, &id, columns(3));
        assert_eq!(stores.get(&id).column_order, vec!["c1", "c0"]);
    }
}
