/// Streak calculation and tracking functionality
///
/// This module holds the day-walking streak algorithm and the Streak struct
/// that bundles the per-habit numbers shown next to each habit.

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{Habit, HabitId};

/// Streak length the per-habit progress bar is measured against
pub const STREAK_GOAL_DAYS: u32 = 30;

/// Count consecutive completed days ending at `today`
///
/// Starts at `today` and walks backwards one calendar day at a time for as
/// long as every day is in `completed`. If `today` itself is missing the
/// streak is 0, even when yesterday was completed.
pub fn current_streak(completed: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut checking_date = Some(today);

    // A streak can never be longer than the number of completions
    while let Some(date) = checking_date {
        if streak as usize >= completed.len() || !completed.contains(&date) {
            break;
        }
        streak += 1;
        checking_date = date.pred_opt();
    }

    streak
}

/// Calculated streak information for a habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    /// Which habit this streak data is for
    pub habit_id: HabitId,
    /// Consecutive days completed, ending today
    pub current_streak: u32,
    /// Total number of days this habit has been completed
    pub total_completions: u32,
    /// Most recent completion (None if never completed)
    pub last_completed: Option<NaiveDate>,
    /// Whether today is already marked
    pub completed_today: bool,
}

impl Streak {
    /// Calculate streak information for a habit as of `today`
    pub fn calculate(habit: &Habit, today: NaiveDate) -> Self {
        let completed = habit.completed_dates();

        Self {
            habit_id: habit.id().clone(),
            current_streak: current_streak(completed, today),
            total_completions: completed.len() as u32,
            last_completed: completed.iter().next_back().copied(),
            completed_today: completed.contains(&today),
        }
    }

    /// Fraction of `goal_days` reached by the current streak, capped at 1.0
    pub fn goal_progress(&self, goal_days: u32) -> f64 {
        if goal_days == 0 {
            return 1.0;
        }
        (self.current_streak as f64 / goal_days as f64).min(1.0)
    }
}
