/// Statistics derived from the habit collection
///
/// Everything here is a pure function of a habit slice and a reference date.
/// Nothing is cached: the numbers are recomputed on every read so they can
/// never drift from the store.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{Habit, HabitId, Streak, STREAK_GOAL_DAYS};

/// Summary numbers for the whole collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    /// Number of habits being tracked
    pub total_habits: usize,
    /// Habits marked complete on the reference date
    pub completed_today: usize,
    /// Best current streak across all habits (0 when there are none)
    pub longest_streak: u32,
}

impl HabitStats {
    /// Aggregate statistics for `habits` as of `today`
    pub fn calculate(habits: &[Habit], today: NaiveDate) -> Self {
        let completed_today = habits
            .iter()
            .filter(|habit| habit.is_completed_on(today))
            .count();

        let longest_streak = habits
            .iter()
            .map(|habit| crate::domain::current_streak(habit.completed_dates(), today))
            .max()
            .unwrap_or(0);

        Self {
            total_habits: habits.len(),
            completed_today,
            longest_streak,
        }
    }
}

/// One row of the habit list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitSummary {
    pub habit_id: HabitId,
    pub name: String,
    /// Display label, e.g. "Daily"
    pub frequency: String,
    pub completed_today: bool,
    pub current_streak: u32,
    /// Progress toward a 30 day streak (0.0 to 1.0)
    pub goal_progress: f64,
}

/// Build the per-habit rows in display order
pub fn summarize(habits: &[Habit], today: NaiveDate) -> Vec<HabitSummary> {
    habits
        .iter()
        .map(|habit| {
            let streak = Streak::calculate(habit, today);
            HabitSummary {
                habit_id: habit.id().clone(),
                name: habit.name().to_string(),
                frequency: habit.frequency().display_name().to_string(),
                completed_today: streak.completed_today,
                current_streak: streak.current_streak,
                goal_progress: streak.goal_progress(STREAK_GOAL_DAYS),
            }
        })
        .collect()
}
