//! Sharing one [`DataTable`] between sibling widgets.
//!
//! A toolbar, a column selector and the table body all hold clones of the same
//! [`DataTableContext`]. A context created with [`DataTableContext::detached`] stands for a
//! consumer mounted outside any provider; every access on it fails with
//! [`DataTableError::OutsideProvider`].

use crate::data_table::DataTable;
use crate::error::DataTableError;
use crate::error::Result;
use std::cell::RefCell;
use std::rc::Rc;

pub struct DataTableContext<T> {
    table: Option<Rc<RefCell<DataTable<T>>>>,
}

impl<T> Clone for DataTableContext<T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<T> std::fmt::Debug for DataTableContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTableContext")
            .field("provided", &self.is_provided())
            .finish()
    }
}

impl<T> DataTableContext<T> {
    pub fn provide(table: DataTable<T>) -> Self {
        Self {
            table: Some(Rc::new(RefCell::new(table))),
        }
    }

    pub fn detached() -> Self {
        Self { table: None }
    }

    pub fn is_provided(&self) -> bool {
        self.table.is_some()
    }

    pub fn with<R>(&self, f: impl FnOnce(&DataTable<T>) -> R) -> Result<R> {
        let table = self.table.as_ref().ok_or(DataTableError::OutsideProvider)?;
        Ok(f(&table.borrow()))
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut DataTable<T>) -> R) -> Result<R> {
        let table = self.table.as_ref().ok_or(DataTableError::OutsideProvider)?;
        Ok(f(&mut table.borrow_mut()))
    }
}
