use pretty_assertions::assert_eq;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::rc::Rc;
use tucutable::column::ColumnDef;
use tucutable::column::EXPANDED_COLUMN_ID;
use tucutable::column::ROW_ACTIONS_COLUMN_ID;
use tucutable::context::DataTableContext;
use tucutable::data_table::DataTable;
use tucutable::error::StorageError;
use tucutable::options::DataTableOptions;
use tucutable::state::ColumnFilter;
use tucutable::state::ColumnPinningState;
use tucutable::state::ColumnSort;
use tucutable::state::PaginationState;
use tucutable::state::PersistedTableState;
use tucutable::state::RowId;
use tucutable::state::TableId;
use tucutable::status::TableStatus;
use tucutable::storage::FileStorage;
use tucutable::storage::MemoryStorage;
use tucutable::storage::Storage;
use tucutable::store::TableStores;
use tucutable::theme::Theme;
use tucutable::view::DataTableView;

#[derive(Clone, Debug)]
struct Order {
    id: u32,
    name: String,
    amount: u32,
}

fn orders(n: u32) -> Vec<Order> {
    (1..=n)
        .map(|id| Order {
            id,
            name: format!("order-{id}"),
            amount: id * 100,
        })
        .collect()
}

fn columns() -> Vec<ColumnDef<Order>> {
    vec![
        ColumnDef::new("name", "Name", |o: &Order| o.name.clone()).size(12),
        ColumnDef::new("amount", "Amount", |o: &Order| o.amount.to_string()).size(8),
    ]
}

fn mount(stores: &TableStores, table_id: &str, data: Vec<Order>) -> DataTable<Order> {
    DataTable::new(stores.clone(), table_id, data, columns(), |o: &Order, _: usize| {
        RowId::new(o.id.to_string())
    })
}

fn ids(cols: &[&ColumnDef<Order>]) -> Vec<String> {
    cols.iter().map(|c| c.id.clone()).collect()
}

/// Storage whose writes always fail.
struct ReadOnlyStorage;

impl Storage for ReadOnlyStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("read only".into()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("read only".into()))
    }
}

#[test]
fn reset_restores_defaults_for_any_table() {
    let stores = TableStores::in_memory();
    for id in ["orders", "customers", "x"] {
        let t = TableId::new(id);
        stores.set_sorting(&t, vec![ColumnSort::desc("amount")]);
        stores.set_pagination(
            &t,
            PaginationState {
                page_index: 4,
                page_size: 50,
            },
        );
        stores.reset_store_data(&t);
        assert_eq!(stores.get(&t), PersistedTableState::default());
    }
}

#[test]
fn setters_only_touch_their_own_field() {
    let stores = TableStores::in_memory();
    let t = TableId::new("orders");
    let pinning = ColumnPinningState {
        left: vec!["name".into()],
        right: Vec::new(),
    };
    stores.set_column_pinning(&t, pinning.clone());
    stores.set_column_filters(&t, vec![ColumnFilter::new("name", "ada")]);
    stores.set_sorting(&t, vec![ColumnSort::asc("amount")]);

    let s = stores.get(&t);
    assert_eq!(s.column_pinning, pinning);
    assert_eq!(s.column_filters, vec![ColumnFilter::new("name", "ada")]);
    assert_eq!(s.sorting, vec![ColumnSort::asc("amount")]);
    assert_eq!(s.pagination, PaginationState::default());
}

#[test]
fn last_pagination_write_wins() {
    let stores = TableStores::in_memory();
    let t = TableId::new("orders");
    for (page_index, page_size) in [(1, 10), (3, 25), (0, 100)] {
        stores.set_pagination(
            &t,
            PaginationState {
                page_index,
                page_size,
            },
        );
    }
    assert_eq!(
        stores.get(&t).pagination,
        PaginationState {
            page_index: 0,
            page_size: 100,
        }
    );
}

#[test]
fn synthetic_columns_wrap_the_caller_columns() {
    let stores = TableStores::in_memory();
    let dt = mount(&stores, "orders", orders(3));

    let all: Vec<String> = dt.table().columns().iter().map(|c| c.id.clone()).collect();
    assert_eq!(all, vec![EXPANDED_COLUMN_ID, "name", "amount", ROW_ACTIONS_COLUMN_ID]);
    assert_eq!(stores.get(dt.table_id()).column_order, all);
    assert_eq!(ids(&dt.table().left_columns()), vec![EXPANDED_COLUMN_ID]);
    assert_eq!(ids(&dt.table().right_columns()), vec![ROW_ACTIONS_COLUMN_ID]);
}

#[test]
fn synthetic_pins_hold_after_caller_pinning() {
    let stores = TableStores::in_memory();
    let mut dt = mount(&stores, "orders", orders(3));
    dt.on_column_pinning_change(ColumnPinningState {
        left: vec!["amount".into()],
        right: vec!["name".into()],
    });

    let pinning = &dt.state().column_pinning;
    assert_eq!(pinning.left, vec![EXPANDED_COLUMN_ID, "amount"]);
    assert_eq!(pinning.right, vec!["name", ROW_ACTIONS_COLUMN_ID]);

    dt.on_column_pinning_change(ColumnPinningState::default());
    let pinning = &dt.state().column_pinning;
    assert_eq!(pinning.left, vec![EXPANDED_COLUMN_ID]);
    assert_eq!(pinning.right, vec![ROW_ACTIONS_COLUMN_ID]);
}

#[test]
fn empty_orders_table_shows_the_empty_block() {
    let stores = TableStores::in_memory();
    let dt = mount(&stores, "orders", Vec::new());
    assert_eq!(dt.status(false, false), TableStatus::Empty);

    let ctx = DataTableContext::provide(dt);
    let mut view = DataTableView::new(ctx, DataTableOptions::default());
    let area = Rect::new(0, 0, 60, 8);
    let mut buf = Buffer::empty(area);
    view.render(area, &mut buf, &Theme::default()).unwrap();

    let lines: Vec<String> = (0..area.height)
        .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect())
        .collect();
    assert!(lines.iter().any(|l| l.contains("No records found")));
    assert!(lines.iter().any(|l| l.contains("Name")));
}

#[test]
fn state_survives_a_reload() {
    let dir = tempfile::tempdir().unwrap();
    {
        let storage: Rc<dyn Storage> = Rc::new(FileStorage::open(dir.path()).unwrap());
        let mut dt = mount(&TableStores::new(storage), "orders", orders(30));
        dt.on_pagination_change(PaginationState {
            page_index: 2,
            page_size: 10,
        });
        dt.toggle_sorting("amount").unwrap();
        dt.toggle_column_visibility("name").unwrap();
    }

    let storage: Rc<dyn Storage> = Rc::new(FileStorage::open(dir.path()).unwrap());
    let dt = mount(&TableStores::new(storage), "orders", orders(30));
    assert_eq!(
        dt.state().pagination,
        PaginationState {
            page_index: 2,
            page_size: 10,
        }
    );
    assert_eq!(dt.sorting(), &vec![ColumnSort::asc("amount")]);
    assert!(!dt.table().is_column_visible("name"));
    assert_eq!(
        ids(&dt.table().visible_columns()),
        vec![EXPANDED_COLUMN_ID, "amount", ROW_ACTIONS_COLUMN_ID]
    );
}

#[test]
fn reset_clears_store_and_engine() {
    let storage = Rc::new(MemoryStorage::new());
    let stores = TableStores::new(storage.clone());
    let mut dt = mount(&stores, "orders", orders(30));
    dt.on_pagination_change(PaginationState {
        page_index: 1,
        page_size: 25,
    });
    dt.toggle_sorting("name").unwrap();
    assert!(storage.keys().contains(&"orders-table-data".to_string()));

    dt.reset_table();
    assert!(dt.sorting().is_empty());
    assert_eq!(dt.state().pagination, PaginationState::default());
    assert_eq!(stores.get(dt.table_id()), PersistedTableState::default());
    assert!(storage.is_empty());
}

#[test]
fn failing_storage_keeps_the_session_working() {
    let stores = TableStores::new(Rc::new(ReadOnlyStorage));
    let mut dt = mount(&stores, "orders", orders(30));
    dt.next_page();
    assert_eq!(dt.state().pagination.page_index, 1);
    assert!(stores.try_persist(dt.table_id()).is_err());

    dt.reset_table();
    assert_eq!(dt.state().pagination.page_index, 0);
}
