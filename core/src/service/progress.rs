use chrono::NaiveDate;
use tracing::debug;

use crate::model::sport::Sport;
use crate::model::stats::DisciplineTotals;
use crate::model::workout::RaceEvent;
use crate::service::classifier::{classify_entry, extract_brick_legs, extract_distance, Unit};
use crate::store::PlanStore;

/// Week of the entry on `date`, falling back to week 1 for unscheduled days.
pub fn current_week(date: NaiveDate, store: &PlanStore) -> u32 {
    store.lookup(date).map(|e| e.week).unwrap_or(1)
}

pub fn percent_complete(current_week: u32, total_weeks: u32) -> u32 {
    if total_weeks == 0 {
        return 0;
    }
    let percent = (current_week as f64 / total_weeks as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u32
}

/// First race on or after `date`; a race today still counts.
pub fn next_race(date: NaiveDate, races: &[RaceEvent]) -> Option<&RaceEvent> {
    races.iter().find(|r| r.date >= date)
}

/// Whole days from `date` to `race_date`. Zero is race day.
pub fn days_until(date: NaiveDate, race_date: NaiveDate) -> i64 {
    (race_date - date).num_days()
}

/// Sums the prescribed distances of every entry strictly before `date`.
pub fn accumulate_distances(date: NaiveDate, store: &PlanStore) -> DisciplineTotals {
    let mut totals = DisciplineTotals::default();

    for (day, entry) in store.entries().take_while(|(d, _)| *d < date) {
        match classify_entry(entry) {
            Sport::Swim => match extract_distance(&entry.activity, Unit::Yards) {
                Some(yards) => totals.add_swim(yards),
                None => debug!(%day, activity = %entry.activity, "no yardage found"),
            },
            Sport::Bike => match extract_distance(&entry.activity, Unit::Miles) {
                Some(miles) => totals.add_bike(miles),
                None => debug!(%day, activity = %entry.activity, "no mileage found"),
            },
            Sport::Run => match extract_distance(&entry.activity, Unit::Miles) {
                Some(miles) => totals.add_run(miles),
                None => debug!(%day, activity = %entry.activity, "no mileage found"),
            },
            Sport::Brick => {
                let (cycle, run) = extract_brick_legs(&entry.details);
                if let Some(miles) = cycle {
                    totals.add_bike(miles);
                }
                if let Some(miles) = run {
                    totals.add_run(miles);
                }
                if cycle.is_none() && run.is_none() {
                    debug!(%day, "no brick legs found in details");
                }
            }
            Sport::Rest | Sport::Race | Sport::Other => {}
        }
    }

    totals
}
