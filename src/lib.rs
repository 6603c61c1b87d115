/// Public library interface for the habit tracker
///
/// This module exports the habit store, the streak and statistics
/// calculators, the habit sources, and the `HabitTracker` handle that ties
/// them to the tokio runtime.

use std::sync::Arc;
use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

// Internal modules
mod domain;
mod store;
mod analytics;
mod loader;

// Re-export public modules and types
pub use domain::*;
pub use store::{
    Command, CommandOutcome, HabitStore, LoadStatus, LoadTicket, StoreError, StoreSnapshot,
};
pub use analytics::{summarize, HabitStats, HabitSummary};
pub use loader::{
    HabitSource, LoadError, LoadOutcome, SeedSource, DEFAULT_LOAD_ERROR, DEFAULT_SEED_DELAY,
};

/// Errors that can occur while driving the tracker
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shared handle to one habit store and the source it loads from
///
/// Cloning the handle shares the same store. Every command holds the write
/// lock for its whole update; a load only holds it to enter the pending
/// state and again to apply the result, so commands keep working while the
/// fetch is in flight.
#[derive(Clone)]
pub struct HabitTracker {
    store: Arc<RwLock<HabitStore>>,
    source: Arc<dyn HabitSource>,
}

impl HabitTracker {
    /// Create a tracker with an empty store backed by `source`
    pub fn new(source: impl HabitSource + 'static) -> Self {
        Self::with_store(HabitStore::new(), source)
    }

    /// Create a tracker around an existing store
    pub fn with_store(store: HabitStore, source: impl HabitSource + 'static) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            source: Arc::new(source),
        }
    }

    /// Apply a command
    ///
    /// `Command::Load` enters the pending state and schedules the fetch in
    /// the background; use `load` instead to get hold of the task.
    pub async fn dispatch(&self, command: Command) -> Result<CommandOutcome, StoreError> {
        match command {
            Command::Load => {
                let (ticket, _task) = self.start_load().await;
                Ok(CommandOutcome::LoadStarted { ticket })
            }
            command => self.store.write().await.dispatch(command),
        }
    }

    pub async fn create(
        &self,
        name: impl Into<String>,
        frequency: Frequency,
    ) -> Result<HabitId, StoreError> {
        self.store.write().await.create(name, frequency)
    }

    pub async fn remove(&self, id: &HabitId) -> Result<Habit, StoreError> {
        self.store.write().await.remove(id)
    }

    pub async fn toggle(&self, id: &HabitId, date: NaiveDate) -> Result<bool, StoreError> {
        self.store.write().await.toggle(id, date)
    }

    /// Start loading from the source
    ///
    /// Returns once the store is pending. The returned task finishes after
    /// the fetch result has been applied.
    pub async fn load(&self) -> JoinHandle<()> {
        let (_ticket, task) = self.start_load().await;
        task
    }

    /// Read-only copy of the current state
    pub async fn snapshot(&self) -> StoreSnapshot {
        self.store.read().await.snapshot()
    }

    pub async fn stats(&self, today: NaiveDate) -> HabitStats {
        self.store.read().await.stats(today)
    }

    pub async fn summaries(&self, today: NaiveDate) -> Vec<HabitSummary> {
        self.store.read().await.summaries(today)
    }

    async fn start_load(&self) -> (LoadTicket, JoinHandle<()>) {
        let ticket = self.store.write().await.begin_load();

        let store = Arc::clone(&self.store);
        let source = Arc::clone(&self.source);
        let task = tokio::spawn(async move {
            // The fetch runs in its own task so a panicking source still settles the store
            let fetch = tokio::spawn(async move { source.fetch().await });
            let outcome = match fetch.await {
                Ok(result) => LoadOutcome::from(result),
                Err(e) => {
                    tracing::error!(ticket = ticket.value(), "Habit source task failed: {}", e);
                    LoadOutcome::Rejected(e.to_string())
                }
            };
            store.write().await.apply(ticket, outcome);
        });

        (ticket, task)
    }
}

/// Today's date on the local calendar
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
