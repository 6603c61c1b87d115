/// Habit store: the single owner of all habit state
///
/// Commands are synchronous `&mut self` methods, so every change is applied
/// in one step and readers never observe half an update. Loading is split
/// into `begin_load` and `apply` so whatever runs the async fetch can hand
/// the result back without the store knowing how it was scheduled.

pub mod command;
pub mod state;

pub use command::*;
pub use state::*;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analytics::{self, HabitStats, HabitSummary};
use crate::domain::{DomainError, Frequency, Habit, HabitId, IdGenerator, UuidIds};
use crate::loader::{LoadOutcome, DEFAULT_LOAD_ERROR};

/// Errors that can occur while applying a command
///
/// A failed command never changes the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },
}

/// Owns the habit collection and the load lifecycle
pub struct HabitStore {
    state: StoreState,
    ids: Box<dyn IdGenerator>,
    next_ticket: u64,
}

impl HabitStore {
    /// Create an empty store that assigns UUID ids
    pub fn new() -> Self {
        Self::with_id_generator(UuidIds)
    }

    /// Create an empty store with a custom id generator
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            state: StoreState::default(),
            ids: Box::new(ids),
            next_ticket: 0,
        }
    }

    /// Apply any command through one entry point
    pub fn dispatch(&mut self, command: Command) -> Result<CommandOutcome, StoreError> {
        match command {
            Command::Create { name, frequency } => {
                let id = self.create(name, frequency)?;
                Ok(CommandOutcome::Created { id })
            }
            Command::Remove { id } => {
                self.remove(&id)?;
                Ok(CommandOutcome::Removed { id })
            }
            Command::Toggle { id, date } => {
                let completed = self.toggle(&id, date)?;
                Ok(CommandOutcome::Toggled { id, completed })
            }
            Command::Load => Ok(CommandOutcome::LoadStarted {
                ticket: self.begin_load(),
            }),
        }
    }

    /// Append a new habit with no completions
    pub fn create(
        &mut self,
        name: impl Into<String>,
        frequency: Frequency,
    ) -> Result<HabitId, StoreError> {
        let name = name.into();
        // Validate before drawing an id so rejected names don't consume one
        Habit::validate_name(&name)?;

        let habit = Habit::new(self.ids.next_id(), name, frequency, Utc::now())?;
        let id = habit.id().clone();
        debug!(habit_id = %id, name = habit.name(), "Created habit");

        self.state.habits.push(habit);
        self.note_mutation();
        Ok(id)
    }

    /// Remove a habit, returning it
    pub fn remove(&mut self, id: &HabitId) -> Result<Habit, StoreError> {
        let index = self.position(id)?;
        let habit = self.state.habits.remove(index);
        debug!(habit_id = %id, "Removed habit");

        self.note_mutation();
        Ok(habit)
    }

    /// Mark `date` done if it isn't, unmark it if it is
    ///
    /// Returns whether the habit is completed on `date` afterwards.
    pub fn toggle(&mut self, id: &HabitId, date: NaiveDate) -> Result<bool, StoreError> {
        let index = self.position(id)?;
        let completed = self.state.habits[index].toggle(date);
        debug!(habit_id = %id, %date, completed, "Toggled habit");

        self.note_mutation();
        Ok(completed)
    }

    /// Enter the pending state and issue a ticket for the new load
    ///
    /// Any earlier load that has not settled yet is superseded: its result
    /// will be ignored by `apply`.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);

        if self.state.load.is_loading() {
            warn!(ticket = ticket.value(), "Starting a load while another is pending");
        }
        info!(ticket = ticket.value(), "Loading habits");

        self.state.latest_ticket = Some(ticket);
        self.state.load = LoadStatus::Pending;
        self.state.mutations_while_pending = 0;
        ticket
    }

    /// Settle the load identified by `ticket`
    ///
    /// A fulfilled load replaces the whole collection; a rejected one only
    /// records the error. Returns `false` (and changes nothing) when the
    /// ticket is not the pending one.
    pub fn apply(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        if self.state.latest_ticket != Some(ticket) || !self.state.load.is_loading() {
            warn!(ticket = ticket.value(), "Ignoring result of a superseded load");
            return false;
        }

        match outcome {
            LoadOutcome::Fulfilled(habits) => {
                if self.state.mutations_while_pending > 0 {
                    warn!(
                        discarded = self.state.mutations_while_pending,
                        "Loaded habits replace changes made while the load was pending"
                    );
                }
                info!(ticket = ticket.value(), count = habits.len(), "Loaded habits");
                self.state.habits = habits;
                self.state.load = LoadStatus::Fulfilled;
            }
            LoadOutcome::Rejected(message) => {
                let message = if message.trim().is_empty() {
                    DEFAULT_LOAD_ERROR.to_string()
                } else {
                    message
                };
                warn!(ticket = ticket.value(), error = %message, "Failed to load habits");
                self.state.load = LoadStatus::Rejected(message);
            }
        }

        self.state.mutations_while_pending = 0;
        true
    }

    /// Habits in display order
    pub fn habits(&self) -> &[Habit] {
        &self.state.habits
    }

    pub fn habit(&self, id: &HabitId) -> Option<&Habit> {
        self.state.habits.iter().find(|habit| habit.id() == id)
    }

    pub fn is_loading(&self) -> bool {
        self.state.load.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.load.error()
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.state.load
    }

    /// Copy the current state for a reader
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::from(&self.state)
    }

    /// Collection statistics as of `today`
    pub fn stats(&self, today: NaiveDate) -> HabitStats {
        HabitStats::calculate(&self.state.habits, today)
    }

    /// Per-habit rows as of `today`
    pub fn summaries(&self, today: NaiveDate) -> Vec<HabitSummary> {
        analytics::summarize(&self.state.habits, today)
    }

    fn position(&self, id: &HabitId) -> Result<usize, StoreError> {
        self.state
            .habits
            .iter()
            .position(|habit| habit.id() == id)
            .ok_or_else(|| StoreError::HabitNotFound {
                habit_id: id.to_string(),
            })
    }

    fn note_mutation(&mut self) {
        if self.state.load.is_loading() {
            self.state.mutations_while_pending += 1;
        }
    }
}

impl Default for HabitStore {
    fn default() -> Self {
        Self::new()
    }
}
