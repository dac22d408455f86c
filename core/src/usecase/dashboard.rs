use chrono::NaiveDate;

use crate::model::import::{ImportSnapshot, ImportedActivity};
use crate::service::countdown::{countdown_text, CountdownMood, Urgency};
use crate::service::dto::{DashboardView, RaceCountdown, WorkoutView};
use crate::service::progress::{accumulate_distances, current_week, days_until, next_race, percent_complete};
use crate::store::PlanStore;

pub struct DashboardUseCase<'a> {
    store: &'a PlanStore,
}

impl<'a> DashboardUseCase<'a> {
    pub fn new(store: &'a PlanStore) -> Self {
        Self { store }
    }

    /// Everything the stats view shows for `date`. The import snapshot is
    /// passed through untouched.
    pub fn build(&self, date: NaiveDate, imported: Option<&ImportSnapshot>) -> DashboardView {
        let week = current_week(date, self.store);
        let total_weeks = self.store.total_weeks();

        let next = next_race(date, self.store.race_events()).map(|race| RaceCountdown {
            race: race.clone(),
            days_until: days_until(date, race.date),
        });
        let countdown = countdown_text(next.as_ref().map(|n| (&n.race, n.days_until)));
        let mood = next.as_ref().map(|n| CountdownMood::from_days(n.days_until));
        let urgency = next.as_ref().map(|n| Urgency::from_days(n.days_until));

        DashboardView {
            date,
            current_week: week,
            total_weeks,
            percent: percent_complete(week, total_weeks),
            next_race: next,
            countdown_text: countdown,
            mood,
            urgency,
            totals: accumulate_distances(date, self.store),
            imported: imported.cloned(),
            today: self.store.lookup(date).map(WorkoutView::from_entry),
        }
    }

    /// Views for the day before, the day itself, and the day after.
    pub fn day_cards(&self, date: NaiveDate) -> [(NaiveDate, Option<WorkoutView>); 3] {
        let card = |d: Option<NaiveDate>| {
            let d = d.unwrap_or(date);
            (d, self.store.lookup(d).map(WorkoutView::from_entry))
        };
        [card(date.pred_opt()), card(Some(date)), card(date.succ_opt())]
    }

    /// Imported activities on `date`, shaped like plan entries and tagged
    /// with the plan week of that day (0 when nothing is scheduled).
    pub fn logged_on(&self, date: NaiveDate, activities: &[ImportedActivity]) -> Vec<WorkoutView> {
        let week = self.store.lookup(date).map(|entry| entry.week).unwrap_or(0);
        activities
            .iter()
            .filter(|activity| activity.date == date)
            .map(|activity| WorkoutView::from_entry(&activity.to_workout_entry(week)))
            .collect()
    }
}
