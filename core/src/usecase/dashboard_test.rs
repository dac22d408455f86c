#[cfg(test)]
mod tests {
    use crate::model::import::{ImportSnapshot, ImportedActivity};
    use crate::model::sport::Sport;
    use crate::model::workout::{EntryType, PlanRow, PlanTable, RaceEvent};
    use crate::repository::PlanRepository;
    use crate::service::countdown::{CountdownMood, Urgency, ALL_RACES_DONE};
    use crate::time::WeekStart;
    use crate::usecase::dashboard::DashboardUseCase;
    use crate::usecase::plan_loader::PlanLoaderUseCase;
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;

    struct MockPlanRepo {
        table: PlanTable,
    }

    impl PlanRepository for MockPlanRepo {
        fn load(&self) -> Result<PlanTable> { Ok(self.table.clone()) }
    }

    struct BrokenPlanRepo;
    impl PlanRepository for BrokenPlanRepo {
        fn load(&self) -> Result<PlanTable> { Err(anyhow!("disk on fire")) }
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn row(week: u32, day: &str, activity: &str) -> PlanRow {
        PlanRow {
            week,
            day: day.to_string(),
            activity: activity.to_string(),
            details: String::new(),
            entry_type: None,
        }
    }

    fn sample_repo() -> MockPlanRepo {
        let mut table = PlanTable::default();
        table.workouts.insert(date(9, 20), row(1, "Saturday", "Run 5 miles"));
        table.workouts.insert(date(9, 22), row(1, "Monday", "Swim 2000 yards"));
        table.workouts.insert(date(9, 25), row(2, "Thursday", "Bike 20 miles"));
        table.workouts.insert(date(9, 26), row(2, "Friday", "Rest"));
        table.workouts.insert(
            date(10, 1),
            PlanRow {
                entry_type: Some(EntryType::Race),
                ..row(2, "Wednesday", "🏁 Fall 5K")
            },
        );
        table.races.push(RaceEvent { date: date(10, 1), name: "Fall 5K".into() });
        MockPlanRepo { table }
    }

    #[test]
    fn test_dashboard_mid_plan() {
        let repo = sample_repo();
        let store = PlanLoaderUseCase::new(&repo).load_strict().unwrap();
        let dashboard = DashboardUseCase::new(&store);

        let view = dashboard.build(date(9, 26), None);
        assert_eq!(view.current_week, 2);
        assert_eq!(view.total_weeks, 2);
        assert_eq!(view.percent, 100);
        assert_eq!(view.totals.swim_yards, 2000.0);
        assert_eq!(view.totals.bike_miles, 20.0);
        assert_eq!(view.totals.run_miles, 5.0);

        let next = view.next_race.as_ref().unwrap();
        assert_eq!(next.race.name, "Fall 5K");
        assert_eq!(next.days_until, 5);
        assert_eq!(view.countdown_text, "5 Days until the Fall 5K");
        assert_eq!(view.mood, Some(CountdownMood::Nervous));
        assert_eq!(view.urgency, Some(Urgency::Close));

        let today = view.today.as_ref().unwrap();
        assert_eq!(today.sport, Sport::Rest);
        assert!(view.imported.is_none());
    }

    #[test]
    fn test_dashboard_unscheduled_day_and_after_last_race() {
        let repo = sample_repo();
        let store = PlanLoaderUseCase::new(&repo).load().unwrap().store;
        let view = DashboardUseCase::new(&store).build(date(10, 2), None);

        assert_eq!(view.current_week, 1);
        assert_eq!(view.percent, 50);
        assert!(view.next_race.is_none());
        assert!(view.mood.is_none());
        assert!(view.urgency.is_none());
        assert_eq!(view.countdown_text, ALL_RACES_DONE);
        assert!(view.today.is_none());
    }

    #[test]
    fn test_dashboard_passes_snapshot_through() {
        let repo = sample_repo();
        let store = PlanLoaderUseCase::new(&repo).load().unwrap().store;
        let activities = vec![ImportedActivity::new("Run".into(), Sport::Run, 3.0, date(9, 24))];
        let snapshot = ImportSnapshot::from_activities(&activities, date(9, 26), WeekStart::Sunday);

        let view = DashboardUseCase::new(&store).build(date(9, 26), Some(&snapshot));
        assert_eq!(view.imported.as_ref(), Some(&snapshot));
        // Imported mileage never leaks into plan totals
        assert_eq!(view.totals.run_miles, 5.0);
    }

    #[test]
    fn test_day_cards() {
        let repo = sample_repo();
        let store = PlanLoaderUseCase::new(&repo).load().unwrap().store;
        let [prev, current, next] = DashboardUseCase::new(&store).day_cards(date(9, 21));

        assert_eq!(prev.0, date(9, 20));
        assert_eq!(prev.1.map(|v| v.activity), Some("Run 5 miles".to_string()));
        assert!(current.1.is_none());
        assert_eq!(next.1.map(|v| v.sport), Some(Sport::Swim));
    }

    #[test]
    fn test_logged_on_shapes_imports_as_workouts() {
        let repo = sample_repo();
        let store = PlanLoaderUseCase::new(&repo).load().unwrap().store;
        let mut ride = ImportedActivity::new("Lunch Ride".into(), Sport::Bike, 18.4, date(9, 25));
        ride.duration = Some("1:02:03".into());
        let activities = vec![
            ride,
            ImportedActivity::new("Easy Run".into(), Sport::Run, 3.0, date(9, 24)),
        ];
        let dashboard = DashboardUseCase::new(&store);

        let logged = dashboard.logged_on(date(9, 25), &activities);
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].activity, "Bike 18.4 miles");
        assert_eq!(logged[0].sport, Sport::Bike);
        assert_eq!(logged[0].weekday, "Thursday");
        assert_eq!(logged[0].week, 2);
        assert_eq!(logged[0].details, vec!["Lunch Ride", "Duration: 1:02:03"]);

        // 9/24 has no plan entry
        assert_eq!(dashboard.logged_on(date(9, 24), &activities)[0].week, 0);
        assert!(dashboard.logged_on(date(9, 23), &activities).is_empty());
    }

    #[test]
    fn test_loader_errors() {
        assert!(PlanLoaderUseCase::new(&BrokenPlanRepo).load().is_err());

        let mut repo = sample_repo();
        repo.table.races.clear();
        let outcome = PlanLoaderUseCase::new(&repo).load().unwrap();
        assert_eq!(outcome.issues.len(), 1);
        assert!(PlanLoaderUseCase::new(&repo).load_strict().is_err());
    }
}
