/// Basic unit tests to verify core functionality
use habit_tracker::*;
use chrono::{Duration, NaiveDate};

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_create_then_snapshot() {
        let mut store = HabitStore::new();
        let before = store.snapshot().habits.len();

        store.create("Meditate", Frequency::Weekly).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.habits.len(), before + 1);
        let habit = snapshot.habits.last().unwrap();
        assert_eq!(habit.name(), "Meditate");
        assert_eq!(habit.frequency(), Frequency::Weekly);
        assert!(habit.completed_dates().is_empty());
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.error, None);
    }

    #[test]
    fn test_streak_examples() {
        let today = today();
        let full: std::collections::BTreeSet<NaiveDate> =
            [today, today - Duration::days(1), today - Duration::days(2)].into_iter().collect();
        assert_eq!(current_streak(&full, today), 3);

        let gap: std::collections::BTreeSet<NaiveDate> =
            [today, today - Duration::days(2)].into_iter().collect();
        assert_eq!(current_streak(&gap, today), 1);

        assert_eq!(current_streak(&Default::default(), today), 0);
    }

    #[test]
    fn test_streak_across_new_year_through_store() {
        let mut store = HabitStore::with_id_generator(SequentialIds::default());
        let id = store.create("Journal", Frequency::Daily).unwrap();
        for date in ["2024-12-30", "2024-12-31", "2025-01-01"] {
            store.toggle(&id, parse_date(date).unwrap()).unwrap();
        }

        assert_eq!(store.stats(today()).longest_streak, 3);
    }

    #[test]
    fn test_longest_streak_over_two_habits() {
        let today = today();
        let mut store = HabitStore::with_id_generator(SequentialIds::default());
        let short = store.create("Short", Frequency::Daily).unwrap();
        let long = store.create("Long", Frequency::Daily).unwrap();
        for offset in 0..2 {
            store.toggle(&short, today - Duration::days(offset)).unwrap();
        }
        for offset in 0..5 {
            store.toggle(&long, today - Duration::days(offset)).unwrap();
        }

        let stats = store.stats(today);
        assert_eq!(stats.longest_streak, 5);
        assert_eq!(stats.completed_today, 2);
        assert_eq!(stats.total_habits, 2);

        assert_eq!(HabitStore::new().stats(today).longest_streak, 0);
    }

    #[test]
    fn test_dispatch_from_json_commands() {
        let mut store = HabitStore::with_id_generator(SequentialIds::default());

        let create: Command =
            serde_json::from_str(r#"{"type":"createHabit","name":"Read","frequency":"daily"}"#)
                .unwrap();
        store.dispatch(create).unwrap();

        let toggle: Command =
            serde_json::from_str(r#"{"type":"toggleHabit","id":"habit-1","date":"2025-01-01"}"#)
                .unwrap();
        let outcome = store.dispatch(toggle).unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Toggled { id: HabitId::new("habit-1"), completed: true }
        );

        let remove: Command =
            serde_json::from_str(r#"{"type":"removeHabit","id":"habit-404"}"#).unwrap();
        assert!(matches!(
            store.dispatch(remove),
            Err(StoreError::HabitNotFound { .. })
        ));
        assert_eq!(store.habits().len(), 1);
    }

    #[test]
    fn test_summaries() {
        let mut store = HabitStore::with_id_generator(SequentialIds::default());
        let id = store.create("Read", Frequency::Weekly).unwrap();
        store.toggle(&id, today()).unwrap();

        let rows = store.summaries(today());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Read");
        assert_eq!(rows[0].frequency, "Weekly");
        assert!(rows[0].completed_today);
        assert_eq!(rows[0].current_streak, 1);
    }
}
