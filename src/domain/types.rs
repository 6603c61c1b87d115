/// Core types and enums used throughout the domain layer
///
/// This module defines the fundamental types like Frequency and the ID types
/// that are used by Habit and the habit store, plus the id generators the
/// store draws new identifiers from.

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::DomainError;

/// Date format used for every completion date, e.g. `2024-03-01`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unique identifier for a habit
///
/// This is a wrapper around a string to provide type safety. Seeded habits
/// use short numeric ids ("1", "2") while habits created at runtime get
/// whatever the store's id generator hands out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HabitId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// How often a habit should be performed
///
/// The frequency is informational: streaks are always counted in
/// consecutive calendar days regardless of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every single day
    #[default]
    Daily,
    /// Once a week
    Weekly,
}

impl Frequency {
    /// Get the display name for this frequency
    pub fn display_name(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
        }
    }

    /// Parse a frequency from user input ("daily", "Weekly", ...)
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            _ => Err(DomainError::InvalidFrequency(format!(
                "Invalid frequency '{}'. Valid options: daily, weekly",
                s
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", s)))
}

/// Source of fresh habit identifiers
///
/// The store owns one generator and asks it for an id on every create.
/// Implementations must never hand out the same id twice.
pub trait IdGenerator: Send + Sync {
    /// Produce the next unused identifier
    fn next_id(&mut self) -> HabitId;
}

/// Random v4 UUID identifiers (the default)
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> HabitId {
        HabitId(Uuid::new_v4().to_string())
    }
}

/// Monotonic counter identifiers such as `habit-1`, `habit-2`
///
/// Useful when output has to be reproducible. The prefix keeps generated ids
/// apart from the plain numeric ids of seeded habits.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("habit-")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> HabitId {
        let id = HabitId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
