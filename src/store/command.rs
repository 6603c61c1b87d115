/// Commands accepted by the habit store
///
/// The view layer speaks to the store only through these variants. Each
/// carries exactly the typed fields it needs.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{Frequency, HabitId};
use crate::store::LoadTicket;

/// A request to change the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Add a new habit at the end of the list
    #[serde(rename = "createHabit")]
    Create { name: String, frequency: Frequency },
    /// Delete a habit
    #[serde(rename = "removeHabit")]
    Remove { id: HabitId },
    /// Mark or unmark a habit for one day
    #[serde(rename = "toggleHabit")]
    Toggle { id: HabitId, date: NaiveDate },
    /// Start fetching the habit collection from the source
    #[serde(rename = "loadHabits")]
    Load,
}

/// What a successfully applied command did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CommandOutcome {
    Created { id: HabitId },
    Removed { id: HabitId },
    Toggled { id: HabitId, completed: bool },
    LoadStarted { ticket: LoadTicket },
}
