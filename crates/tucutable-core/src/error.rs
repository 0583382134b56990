//! Error types for tucutable.

use thiserror::Error;

/// Main error type for table state operations.
#[derive(Error, Debug)]
pub enum DataTableError {
    /// A consumer tried to read the shared table from an empty [`crate::context::DataTableContext`].
    #[error("DataTable context used outside of a DataTableProvider")]
    OutsideProvider,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

/// Errors raised by [`crate::storage::Storage`] backends.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, DataTableError>;
