//! `tucutable`: data tables for ratatui that remember their state.
//!
//! This is the facade crate. It re-exports the modules of `tucutable-core` under one name, so
//! applications only depend on `tucutable`.
//!
//! ```no_run
//! use tucutable::column::ColumnDef;
//! use tucutable::context::DataTableContext;
//! use tucutable::data_table::DataTable;
//! use tucutable::options::DataTableOptions;
//! use tucutable::state::RowId;
//! use tucutable::store::TableStores;
//! use tucutable::view::DataTableView;
//!
//! struct Order {
//!     id: u32,
//!     customer: String,
//! }
//!
//! let stores = TableStores::in_memory();
//! let table = DataTable::new(
//!     stores,
//!     "orders",
//!     vec![Order { id: 1, customer: "Ada".into() }],
//!     vec![ColumnDef::new("customer", "Customer", |o: &Order| o.customer.clone())],
//!     |o: &Order, _: usize| RowId::new(o.id.to_string()),
//! );
//! let view = DataTableView::new(DataTableContext::provide(table), DataTableOptions::default());
//! # let _ = view;
//! ```
pub use tucutable_core::column;
pub use tucutable_core::context;
pub use tucutable_core::data_table;
pub use tucutable_core::error;
pub use tucutable_core::form;
pub use tucutable_core::help;
pub use tucutable_core::initial_state;
pub use tucutable_core::input;
pub use tucutable_core::keymap;
pub use tucutable_core::options;
pub use tucutable_core::render;
pub use tucutable_core::scroll;
pub use tucutable_core::settings;
pub use tucutable_core::state;
pub use tucutable_core::status;
pub use tucutable_core::sticky;
pub use tucutable_core::storage;
pub use tucutable_core::store;
pub use tucutable_core::table;
pub use tucutable_core::theme;
pub use tucutable_core::view;
pub use tucutable_core::viewport;

#[cfg(feature = "crossterm")]
pub use tucutable_core::crossterm_input;

pub use tucutable_core::error::DataTableError;
pub use tucutable_core::error::Result;
