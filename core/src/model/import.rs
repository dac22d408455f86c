use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::sport::Sport;
use crate::model::workout::{weekday_label, WorkoutEntry};
use crate::time::WeekStart;

/// An activity read from an external export file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImportedActivity {
    pub id: Uuid,
    /// Identifier from the exporting service, used to avoid importing twice.
    #[serde(default)]
    pub source_id: Option<String>,
    pub name: String,
    pub sport: Sport,
    pub distance_miles: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub duration: Option<String>,
}

impl ImportedActivity {
    pub fn new(name: String, sport: Sport, distance_miles: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_id: None,
            name,
            sport,
            distance_miles,
            date,
            duration: None,
        }
    }

    /// Renders the activity in the shape of a plan entry so the classifier
    /// and the views can treat it like any scheduled workout.
    pub fn to_workout_entry(&self, week: u32) -> WorkoutEntry {
        let verb = match self.sport {
            Sport::Swim => "Swim",
            Sport::Bike => "Bike",
            Sport::Run => "Run",
            Sport::Rest => "Walk",
            _ => "Workout",
        };
        let activity = if self.distance_miles > 0.0 {
            format!("{} {:.1} miles", verb, self.distance_miles)
        } else {
            verb.to_string()
        };
        let mut details = self.name.clone();
        if let Some(duration) = &self.duration {
            details.push_str("<br>Duration: ");
            details.push_str(duration);
        }

        WorkoutEntry {
            date: self.date,
            week,
            day: weekday_label(self.date).to_string(),
            activity,
            details,
            entry_type: None,
        }
    }
}

/// Totals over imported activities, in miles for every discipline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImportSnapshot {
    pub total_run: f64,
    pub total_bike: f64,
    pub total_swim: f64,
    pub this_week_run: f64,
    pub this_week_bike: f64,
    pub this_week_swim: f64,
    pub last_updated: DateTime<Utc>,
}

impl ImportSnapshot {
    pub fn from_activities(activities: &[ImportedActivity], today: NaiveDate, week_start: WeekStart) -> Self {
        let week_begin = week_start.start_of_week(today);
        let mut snapshot = Self {
            total_run: 0.0,
            total_bike: 0.0,
            total_swim: 0.0,
            this_week_run: 0.0,
            this_week_bike: 0.0,
            this_week_swim: 0.0,
            last_updated: Utc::now(),
        };

        for activity in activities {
            let in_week = activity.date >= week_begin && activity.date <= today;
            let miles = activity.distance_miles;
            match activity.sport {
                Sport::Run => {
                    snapshot.total_run += miles;
                    if in_week {
                        snapshot.this_week_run += miles;
                    }
                }
                Sport::Bike => {
                    snapshot.total_bike += miles;
                    if in_week {
                        snapshot.this_week_bike += miles;
                    }
                }
                Sport::Swim => {
                    snapshot.total_swim += miles;
                    if in_week {
                        snapshot.this_week_swim += miles;
                    }
                }
                _ => {}
            }
        }

        snapshot
    }

    pub fn total(&self) -> f64 {
        self.total_run + self.total_bike + self.total_swim
    }

    pub fn this_week(&self) -> f64 {
        self.this_week_run + self.this_week_bike + self.this_week_swim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_snapshot_this_week_follows_week_start() {
        // 2025-10-05 is a Sunday, 2025-10-06 a Monday.
        let activities = vec![
            ImportedActivity::new("Sunday run".into(), Sport::Run, 5.0, date(2025, 10, 5)),
            ImportedActivity::new("Tuesday ride".into(), Sport::Bike, 20.0, date(2025, 10, 7)),
            ImportedActivity::new("Old swim".into(), Sport::Swim, 1.0, date(2025, 9, 1)),
            ImportedActivity::new("Yoga".into(), Sport::Other, 0.0, date(2025, 10, 7)),
        ];
        let today = date(2025, 10, 8);

        let sunday = ImportSnapshot::from_activities(&activities, today, WeekStart::Sunday);
        assert_eq!(sunday.total_run, 5.0);
        assert_eq!(sunday.this_week_run, 5.0);
        assert_eq!(sunday.this_week_bike, 20.0);
        assert_eq!(sunday.this_week_swim, 0.0);
        assert_eq!(sunday.total(), 26.0);

        let monday = ImportSnapshot::from_activities(&activities, today, WeekStart::Monday);
        assert_eq!(monday.this_week_run, 0.0);
        assert_eq!(monday.this_week(), 20.0);
    }

    #[test]
    fn test_to_workout_entry() {
        let mut activity = ImportedActivity::new("Morning Run".into(), Sport::Run, 5.2, date(2025, 10, 1));
        activity.duration = Some("42:15".into());
        let entry = activity.to_workout_entry(4);
        assert_eq!(entry.activity, "Run 5.2 miles");
        assert_eq!(entry.day, "Wednesday");
        assert_eq!(entry.week, 4);
        assert_eq!(entry.details, "Morning Run<br>Duration: 42:15");
    }
}
