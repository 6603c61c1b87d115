/// Simulated remote source that serves a fixed seed collection
///
/// Stands in for a network API: it waits for a configurable delay and then
/// either returns the two seed habits or fails with a configured message.

use std::time::Duration;
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::{Frequency, Habit, HabitId};
use crate::loader::{HabitSource, LoadError, DEFAULT_LOAD_ERROR};

/// Simulated network delay of the seed source
pub const DEFAULT_SEED_DELAY: Duration = Duration::from_millis(1000);

/// Seed habits as `(id, name)` pairs, all daily
const SEED_HABITS: [(&str, &str); 2] = [("1", "Read"), ("2", "Exercise")];

/// In-memory habit source with an artificial delay
#[derive(Debug, Clone)]
pub struct SeedSource {
    delay: Duration,
    failure: Option<String>,
}

impl SeedSource {
    /// Create a source that succeeds after the default delay
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_SEED_DELAY,
            failure: None,
        }
    }

    /// Change the simulated delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make every fetch fail with `message`
    ///
    /// An empty message falls back to the generic load error text.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.failure = Some(if message.trim().is_empty() {
            DEFAULT_LOAD_ERROR.to_string()
        } else {
            message
        });
        self
    }

    /// The habits a successful fetch returns
    pub fn seed_habits() -> Vec<Habit> {
        let created_at = Utc::now();
        SEED_HABITS
            .iter()
            .map(|(id, name)| {
                Habit::from_existing(
                    HabitId::new(*id),
                    name.to_string(),
                    Frequency::Daily,
                    [],
                    created_at,
                )
            })
            .collect()
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HabitSource for SeedSource {
    async fn fetch(&self) -> Result<Vec<Habit>, LoadError> {
        debug!("Fetching seed habits (delay {:?})", self.delay);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.failure {
            Some(message) => Err(LoadError::Unavailable(message.clone())),
            None => Ok(Self::seed_habits()),
        }
    }
}
