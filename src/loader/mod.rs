/// External habit sources
///
/// Loading is the only asynchronous boundary of the tracker. A source is
/// awaited outside the store and its result is handed back to the store as a
/// `LoadOutcome`, so the store itself never awaits anything.

pub mod seed;

pub use seed::*;

use async_trait::async_trait;
use thiserror::Error;
use crate::domain::Habit;

/// Message recorded when a source fails without saying why
pub const DEFAULT_LOAD_ERROR: &str = "Failed to fetch habits";

/// Errors that can occur while fetching habits
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("{0}")]
    Unavailable(String),
}

/// Trait defining where a full habit collection comes from
///
/// This allows the seeded in-memory source to be swapped for a real backend
/// while the store keeps the same load lifecycle.
#[async_trait]
pub trait HabitSource: Send + Sync {
    /// Fetch the complete, ordered habit collection
    async fn fetch(&self) -> Result<Vec<Habit>, LoadError>;
}

/// Settled result of a fetch, ready to be applied to the store
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The source produced a replacement collection
    Fulfilled(Vec<Habit>),
    /// The source failed with a message
    Rejected(String),
}

impl From<Result<Vec<Habit>, LoadError>> for LoadOutcome {
    fn from(result: Result<Vec<Habit>, LoadError>) -> Self {
        match result {
            Ok(habits) => LoadOutcome::Fulfilled(habits),
            Err(e) => LoadOutcome::Rejected(e.to_string()),
        }
    }
}
