//! `tucutable-core` keeps data-table UI state in sync with a persistent store.
//!
//! A table's pagination, sorting, column order, visibility, pinning and filters survive restarts:
//! every change goes through a [`data_table::DataTable`] handler that updates the table engine and
//! writes the table's record to a [`store::TableStores`] backed by a pluggable
//! [`storage::Storage`].
//!
//! ## Design goals
//!
//! - Explicit store: the store is injected, never global, so tests and multiple windows stay
//!   isolated.
//! - Best-effort persistence: storage failures are logged with `tracing` and the session keeps
//!   working from memory.
//! - Event-loop agnostic: you drive input and rendering from your app.
//! - Single threaded: shared state is `Rc<RefCell<_>>`, as in a UI thread.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `tucutable`.
//!
//! Useful entry points:
//! - [`data_table::DataTable`]: the state hook wiring store, columns and engine together.
//! - [`context::DataTableContext`]: shares one table between sibling widgets.
//! - [`view::DataTableView`]: ratatui rendering with pinned columns, horizontal scroll, a sticky
//!   header, expansion and pagination.
//! - [`scroll::ScrollableTable`] and [`sticky::HeaderSticky`]: scroll trackers fed by injected
//!   observers.
//! - [`form::Form`]: typed form fields with per-field validation.
pub mod error;

pub mod settings;
pub mod state;
pub mod storage;
pub mod store;
pub mod theme;

pub mod column;
pub mod initial_state;
pub mod table;

pub mod context;
pub mod data_table;
pub mod options;
pub mod status;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod form;
pub mod help;
pub mod input;
pub mod keymap;
pub mod render;
pub mod scroll;
pub mod sticky;
pub mod view;
pub mod viewport;
