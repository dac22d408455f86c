use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{PlanError, PlanIssue};
use crate::model::workout::{label_matches, weekday_label, PlanTable, RaceEvent, WorkoutEntry};

/// Read-only, date-keyed plan. Built once from a [`PlanTable`]; replacing a
/// plan means building a new store.
#[derive(Debug, Clone, Default)]
pub struct PlanStore {
    entries: BTreeMap<NaiveDate, WorkoutEntry>,
    races: Vec<RaceEvent>,
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub store: PlanStore,
    pub issues: Vec<PlanIssue>,
}

impl PlanStore {
    pub fn from_table(table: PlanTable) -> LoadOutcome {
        let mut issues = Vec::new();
        let mut entries = BTreeMap::new();
        let mut previous_week: Option<u32> = None;

        // BTreeMap iteration is date-ordered, so the week check is a single scan.
        for (date, row) in table.workouts {
            if row.week == 0 {
                issues.push(PlanIssue::WeekZero { date });
            }
            if let Some(previous) = previous_week {
                if row.week < previous {
                    issues.push(PlanIssue::WeekDecreased {
                        date,
                        week: row.week,
                        previous,
                    });
                }
            }
            previous_week = Some(row.week);

            if !label_matches(&row.day, date) {
                issues.push(PlanIssue::DayMismatch {
                    date,
                    label: row.day.clone(),
                    actual: weekday_label(date).to_string(),
                });
            }

            entries.insert(date, WorkoutEntry::from_row(date, row));
        }

        let mut races = table.races;
        let event_dates: BTreeSet<NaiveDate> = races.iter().map(|r| r.date).collect();

        for event in &races {
            let tagged = entries.get(&event.date).map(|e| e.is_race_tagged()).unwrap_or(false);
            if !tagged {
                issues.push(PlanIssue::EventWithoutRace {
                    date: event.date,
                    name: event.name.clone(),
                });
            }
        }

        for entry in entries.values().filter(|e| e.is_race_tagged()) {
            if !event_dates.contains(&entry.date) {
                issues.push(PlanIssue::RaceWithoutEvent { date: entry.date });
                races.push(RaceEvent {
                    date: entry.date,
                    name: entry.activity.clone(),
                });
            }
        }

        races.sort();
        races.dedup_by(|a, b| a.date == b.date && a.name == b.name);

        for issue in &issues {
            warn!(%issue, "plan validation");
        }
        info!(entries = entries.len(), races = races.len(), "plan loaded");

        LoadOutcome {
            store: PlanStore { entries, races },
            issues,
        }
    }

    /// Like [`PlanStore::from_table`], but any issue rejects the plan.
    pub fn from_table_strict(table: PlanTable) -> Result<PlanStore, PlanError> {
        let outcome = Self::from_table(table);
        if outcome.issues.is_empty() {
            Ok(outcome.store)
        } else {
            Err(PlanError::Invalid(outcome.issues))
        }
    }

    pub fn lookup(&self, date: NaiveDate) -> Option<&WorkoutEntry> {
        self.entries.get(&date)
    }

    /// All entries in ascending date order.
    pub fn entries(&self) -> impl Iterator<Item = (NaiveDate, &WorkoutEntry)> {
        self.entries.iter().map(|(d, e)| (*d, e))
    }

    pub fn total_weeks(&self) -> u32 {
        self.entries.values().map(|e| e.week).max().unwrap_or(0)
    }

    /// Race events in ascending date order.
    pub fn race_events(&self) -> &[RaceEvent] {
        &self.races
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.entries.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.entries.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_table(&self) -> PlanTable {
        PlanTable {
            workouts: self.entries.iter().map(|(d, e)| (*d, e.to_row())).collect(),
            races: self.races.clone(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn sample_table() -> PlanTable {
        let mut table = PlanTable::default();
        let d1 = date(2025, 9, 20);
        let d2 = date(2025, 9, 22);
        let d3 = date(2025, 10, 1);
        table.workouts.insert(d1, row(d1, 1, "Run 5 miles"));
        table.workouts.insert(d2, row(d2, 1, "Swim 2000 yards"));
        table.workouts.insert(d3, race_row(d3, 2, "🏁 Fall 5K"));
        table.races.push(RaceEvent { date: d3, name: "Fall 5K".into() });
        table
    }

    #[test]
    fn test_lookup_round_trip() {
        let table = sample_table();
        let store = PlanStore::from_table_strict(table.clone()).unwrap();

        for (date, row) in &table.workouts {
            let entry = store.lookup(*date).unwrap();
            assert_eq!(&entry.to_row(), row);
            assert_eq!(entry.date, *date);
        }
        assert_eq!(store.len(), table.workouts.len());
        assert_eq!(store.to_table(), table);
    }

    #[test]
    fn test_lookup_missing_is_none() {
        let store = PlanStore::from_table(sample_table()).store;
        assert!(store.lookup(date(2025, 9, 21)).is_none());
        assert!(store.lookup(date(2030, 1, 1)).is_none());
    }

    #[test]
    fn test_total_weeks_and_order() {
        let store = PlanStore::from_table(sample_table()).store;
        assert_eq!(store.total_weeks(), 2);
        let dates: Vec<_> = store.entries().map(|(d, _)| d).collect();
        assert_eq!(dates, vec![date(2025, 9, 20), date(2025, 9, 22), date(2025, 10, 1)]);
        assert_eq!(store.first_date(), Some(date(2025, 9, 20)));
        assert_eq!(store.last_date(), Some(date(2025, 10, 1)));
    }

    #[test]
    fn test_empty_store() {
        let store = PlanStore::from_table(PlanTable::default()).store;
        assert!(store.is_empty());
        assert_eq!(store.total_weeks(), 0);
        assert!(store.race_events().is_empty());
    }

    #[test]
    fn test_validation_detects_issues() {
        let mut table = PlanTable::default();
        let d1 = date(2025, 9, 20);
        let d2 = date(2025, 9, 21);
        let d3 = date(2025, 9, 22);
        table.workouts.insert(d1, row(d1, 2, "Run 3 miles"));
        let mut mislabeled = row(d2, 1, "Swim 1000 yards");
        mislabeled.day = "Monday".into();
        table.workouts.insert(d2, mislabeled);
        table.workouts.insert(d3, race_row(d3, 0, "Sprint Tri"));
        table.races.push(RaceEvent { date: date(2025, 12, 1), name: "Turkey Trot".into() });

        let outcome = PlanStore::from_table(table.clone());
        let issues = &outcome.issues;
        assert!(issues.contains(&PlanIssue::WeekDecreased { date: d2, week: 1, previous: 2 }));
        assert!(issues.contains(&PlanIssue::DayMismatch {
            date: d2,
            label: "Monday".into(),
            actual: "Sunday".into(),
        }));
        assert!(issues.contains(&PlanIssue::WeekZero { date: d3 }));
        assert!(issues.contains(&PlanIssue::WeekDecreased { date: d3, week: 0, previous: 1 }));
        assert!(issues.contains(&PlanIssue::RaceWithoutEvent { date: d3 }));
        assert!(issues.contains(&PlanIssue::EventWithoutRace {
            date: date(2025, 12, 1),
            name: "Turkey Trot".into(),
        }));

        // The missing race event is derived from the entry
        let races = outcome.store.race_events();
        assert_eq!(races.len(), 2);
        assert_eq!(races[0], RaceEvent { date: d3, name: "Sprint Tri".into() });

        assert!(matches!(
            PlanStore::from_table_strict(table),
            Err(PlanError::Invalid(found)) if found.len() == 6
        ));
    }

    #[test]
    fn test_races_sorted() {
        let mut table = PlanTable::default();
        let late = date(2026, 6, 1);
        let early = date(2025, 10, 1);
        table.workouts.insert(early, race_row(early, 1, "5K"));
        table.workouts.insert(late, race_row(late, 30, "Ironman"));
        table.races.push(RaceEvent { date: late, name: "Ironman".into() });
        table.races.push(RaceEvent { date: early, name: "5K".into() });

        let store = PlanStore::from_table_strict(table).unwrap();
        let dates: Vec<_> = store.race_events().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![early, late]);
    }
}
