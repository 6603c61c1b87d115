/// Basic integration tests
use habit_tracker::*;
use std::time::Duration;
use async_trait::async_trait;
use chrono::NaiveDate;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 15).unwrap()
    }

    fn tracker(source: SeedSource) -> HabitTracker {
        HabitTracker::with_store(HabitStore::with_id_generator(SequentialIds::default()), source)
    }

    /// Source whose fetch never returns normally
    struct PanickingSource;

    #[async_trait]
    impl HabitSource for PanickingSource {
        async fn fetch(&self) -> Result<Vec<Habit>, LoadError> {
            panic!("habit backend crashed");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_replaces_habits_with_seed() {
        let tracker = tracker(SeedSource::new());
        tracker.create("Temporary", Frequency::Weekly).await.unwrap();

        let task = tracker.load().await;

        // Pending until the simulated delay has passed
        let pending = tracker.snapshot().await;
        assert!(pending.is_loading);
        assert_eq!(pending.error, None);

        task.await.unwrap();

        let loaded = tracker.snapshot().await;
        assert!(!loaded.is_loading);
        assert_eq!(loaded.error, None);
        let names: Vec<&str> = loaded.habits.iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["Read", "Exercise"]);
        assert!(loaded.habits.iter().all(|h| h.completed_dates().is_empty()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_load_keeps_habits_and_sets_error() {
        let tracker = tracker(SeedSource::new().failing("network down"));
        let id = tracker.create("Stretch", Frequency::Daily).await.unwrap();
        tracker.toggle(&id, today()).await.unwrap();
        let before = tracker.snapshot().await.habits;

        let task = tracker.load().await;
        assert!(tracker.snapshot().await.is_loading);
        task.await.unwrap();

        let after = tracker.snapshot().await;
        assert!(!after.is_loading);
        assert_eq!(after.error.as_deref(), Some("network down"));
        assert_eq!(after.habits, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_work_while_load_is_pending() {
        let tracker = tracker(SeedSource::new().failing("timeout"));
        let task = tracker.load().await;

        let id = tracker.create("During load", Frequency::Daily).await.unwrap();
        assert!(tracker.toggle(&id, today()).await.unwrap());
        assert_eq!(tracker.stats(today()).await.completed_today, 1);

        task.await.unwrap();

        // A rejected load leaves the interleaved changes in place
        let snapshot = tracker.snapshot().await;
        assert_eq!(snapshot.habits.len(), 1);
        assert_eq!(snapshot.error.as_deref(), Some("timeout"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_load_wins() {
        let tracker = tracker(SeedSource::new().with_delay(Duration::from_millis(50)));

        let first = tracker.load().await;
        let second = tracker.load().await;
        first.await.unwrap();
        second.await.unwrap();

        let snapshot = tracker.snapshot().await;
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.habits.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatched_load_settles_in_background() {
        let tracker = tracker(SeedSource::new());

        let outcome = tracker.dispatch(Command::Load).await.unwrap();
        assert!(matches!(outcome, CommandOutcome::LoadStarted { .. }));
        assert!(tracker.snapshot().await.is_loading);

        tokio::time::sleep(DEFAULT_SEED_DELAY + Duration::from_millis(10)).await;

        let snapshot = tracker.snapshot().await;
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.error, None);
        let names: Vec<&str> = snapshot.habits.iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["Read", "Exercise"]);
    }

    #[tokio::test]
    async fn test_panicking_source_rejects_load() {
        let tracker = HabitTracker::with_store(
            HabitStore::with_id_generator(SequentialIds::default()),
            PanickingSource,
        );
        let id = tracker.create("Journal", Frequency::Daily).await.unwrap();

        let task = tracker.load().await;
        assert!(task.await.is_ok());

        let snapshot = tracker.snapshot().await;
        assert!(!snapshot.is_loading);
        let error = snapshot.error.expect("load should be rejected");
        assert!(!error.is_empty());
        assert_eq!(snapshot.habits.len(), 1);
        assert_eq!(snapshot.habits[0].id(), &id);

        // A later command still goes through
        assert!(tracker.toggle(&id, today()).await.unwrap());
    }

    #[tokio::test]
    async fn test_dispatch_through_tracker() {
        let tracker = tracker(SeedSource::new().with_delay(Duration::ZERO));

        let outcome = tracker
            .dispatch(Command::Create { name: "Read".to_string(), frequency: Frequency::Daily })
            .await
            .unwrap();
        let id = match outcome {
            CommandOutcome::Created { id } => id,
            other => panic!("unexpected outcome: {:?}", other),
        };

        let outcome = tracker
            .dispatch(Command::Toggle { id: id.clone(), date: today() })
            .await
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Toggled { id: id.clone(), completed: true });

        let blank = tracker
            .dispatch(Command::Create { name: " ".to_string(), frequency: Frequency::Daily })
            .await;
        assert!(matches!(blank, Err(StoreError::Domain(DomainError::InvalidHabitName(_)))));

        let stats = tracker.stats(today()).await;
        assert_eq!(stats, HabitStats { total_habits: 1, completed_today: 1, longest_streak: 1 });

        tracker.remove(&id).await.unwrap();
        assert!(tracker.snapshot().await.habits.is_empty());
    }

    #[test]
    fn test_snapshot_serializes_for_readers() {
        let mut store = HabitStore::with_id_generator(SequentialIds::new("h"));
        let id = store.create("Read", Frequency::Daily).unwrap();
        store.toggle(&id, today()).unwrap();

        let value = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(value["isLoading"], false);
        assert!(value["error"].is_null());
        assert_eq!(value["habits"][0]["id"], "h1");
        assert_eq!(value["habits"][0]["completedDates"][0], "2024-08-15");
    }
}
