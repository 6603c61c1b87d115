/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a user's habit
/// they want to track, along with name validation and completion toggling.

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{DomainError, Frequency, HabitId};

/// A habit represents something the user wants to do regularly
///
/// Completions are kept as a set of calendar days, so a day can only be
/// marked once and every entry is a valid date. Only the habit store
/// mutates the set; everyone else reads through the accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "HabitRecord")]
pub struct Habit {
    /// Unique identifier for this habit
    id: HabitId,
    /// Display name (e.g., "Read", "Exercise")
    name: String,
    /// How often this habit should be performed
    frequency: Frequency,
    /// Days on which the habit was completed
    completed_dates: BTreeSet<NaiveDate>,
    /// When this habit was created
    created_at: DateTime<Utc>,
}

/// Unvalidated wire form of a habit; deserializing goes through `TryFrom`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HabitRecord {
    id: HabitId,
    name: String,
    frequency: Frequency,
    #[serde(default)]
    completed_dates: BTreeSet<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl TryFrom<HabitRecord> for Habit {
    type Error = DomainError;

    fn try_from(record: HabitRecord) -> Result<Self, Self::Error> {
        Habit::validate_name(&record.name)?;
        Ok(Habit::from_existing(
            record.id,
            record.name,
            record.frequency,
            record.completed_dates,
            record.created_at,
        ))
    }
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// The name must contain something other than whitespace. It is stored
    /// exactly as given.
    pub fn new(
        id: HabitId,
        name: String,
        frequency: Frequency,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;

        Ok(Self {
            id,
            name,
            frequency,
            completed_dates: BTreeSet::new(),
            created_at,
        })
    }

    /// Create a habit from existing data (used by habit sources)
    ///
    /// This constructor assumes data is already validated.
    pub fn from_existing(
        id: HabitId,
        name: String,
        frequency: Frequency,
        completed_dates: impl IntoIterator<Item = NaiveDate>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            frequency,
            completed_dates: completed_dates.into_iter().collect(),
            created_at,
        }
    }

    pub fn id(&self) -> &HabitId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn completed_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.completed_dates
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check whether the habit was completed on the given day
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Flip the completion state for one day
    ///
    /// Returns `true` if the habit is completed on `date` afterwards.
    pub(crate) fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.completed_dates.remove(&date) {
            false
        } else {
            self.completed_dates.insert(date);
            true
        }
    }

    /// Validate habit name according to business rules
    pub(crate) fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        Ok(())
    }
}
