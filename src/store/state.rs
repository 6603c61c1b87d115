/// Owned store state and the read-only snapshot handed to readers

use serde::{Deserialize, Serialize};
use crate::domain::Habit;

/// Where the store is in the load lifecycle
///
/// Idle -> Pending -> Fulfilled | Rejected. Only a new load leaves the
/// settled states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one load request
///
/// Issued by `begin_load`; only the newest ticket may settle the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadTicket(pub(crate) u64);

impl LoadTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Everything the store owns
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    /// Habits in display order
    pub(crate) habits: Vec<Habit>,
    pub(crate) load: LoadStatus,
    /// Ticket of the most recent load, if any
    pub(crate) latest_ticket: Option<LoadTicket>,
    /// Commands applied while the latest load was pending
    pub(crate) mutations_while_pending: usize,
}

/// Immutable copy of the store for readers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub habits: Vec<Habit>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl From<&StoreState> for StoreSnapshot {
    fn from(state: &StoreState) -> Self {
        Self {
            habits: state.habits.clone(),
            is_loading: state.load.is_loading(),
            error: state.load.error().map(str::to_string),
        }
    }
}
