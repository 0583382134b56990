//! Loading, error and empty states of a data table.
//!
//! Failures never propagate out of the table: each status renders as a message block in place of
//! the rows.

use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_SUPPORT_LINK: &str = "https://github.com/tucu-ui/tucutable/issues";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableStatus {
    Loading,
    Error,
    Empty,
    Ready,
}

impl TableStatus {
    /// Loading wins over error, error over empty.
    pub fn derive(is_loading: bool, is_error: bool, row_count: usize) -> Self {
        if is_loading {
            TableStatus::Loading
        } else if is_error {
            TableStatus::Error
        } else if row_count == 0 {
            TableStatus::Empty
        } else {
            TableStatus::Ready
        }
    }

    pub fn shows_rows(self) -> bool {
        self == TableStatus::Ready
    }
}

/// A message block shown instead of rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateMessage {
    pub title: String,
    pub description: String,
    /// "Contact Support" link. Opening it is left to the host.
    pub support_link: Option<String>,
}

impl Default for StateMessage {
    fn default() -> Self {
        Self::empty()
    }
}

impl StateMessage {
    pub fn loading() -> Self {
        Self {
            title: "Loading".to_string(),
            description: "Fetching records...".to_string(),
            support_link: None,
        }
    }

    pub fn error() -> Self {
        Self {
            title: "Something went wrong".to_string(),
            description: "The records could not be loaded.".to_string(),
            support_link: Some(DEFAULT_SUPPORT_LINK.to_string()),
        }
    }

    pub fn empty() -> Self {
        Self {
            title: "No records found".to_string(),
            description: "There is nothing to show yet.".to_string(),
            support_link: None,
        }
    }

    pub fn for_status(status: TableStatus) -> Option<Self> {
        match status {
            TableStatus::Loading => Some(Self::loading()),
            TableStatus::Error => Some(Self::error()),
            TableStatus::Empty => Some(Self::empty()),
            TableStatus::Ready => None,
        }
    }
}

/// Per-status overrides for the default message blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateMessages {
    pub loading: Option<StateMessage>,
    pub error: Option<StateMessage>,
    pub empty: Option<StateMessage>,
}

impl StateMessages {
    pub fn resolve(&self, status: TableStatus) -> Option<StateMessage> {
        let custom = match status {
            TableStatus::Loading => self.loading.clone(),
            TableStatus::Error => self.error.clone(),
            TableStatus::Empty => self.empty.clone(),
            TableStatus::Ready => return None,
        };
        custom.or_else(|| StateMessage::for_status(status))
    }
}
