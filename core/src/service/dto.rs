use chrono::NaiveDate;
use serde::Serialize;

use crate::model::import::ImportSnapshot;
use crate::model::sport::Sport;
use crate::model::stats::DisciplineTotals;
use crate::model::workout::{RaceEvent, WorkoutEntry};
use crate::service::classifier::{classify_entry, detail_lines, extract_quantity, is_race};
use crate::service::countdown::{CountdownMood, Urgency};

/// A workout flattened for display: classification and detail lines are
/// computed once here so views never re-run the classifier.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WorkoutView {
    pub date: NaiveDate,
    pub weekday: String,
    pub week: u32,
    pub activity: String,
    pub details: Vec<String>,
    pub sport: Sport,
    pub icon: &'static str,
    pub color_class: &'static str,
    pub quantity: String,
    pub is_race: bool,
}

impl WorkoutView {
    pub fn from_entry(entry: &WorkoutEntry) -> Self {
        let sport = classify_entry(entry);
        Self {
            date: entry.date,
            weekday: entry.day.clone(),
            week: entry.week,
            activity: entry.activity.clone(),
            details: detail_lines(&entry.details).into_iter().map(str::to_string).collect(),
            sport,
            icon: sport.icon(),
            color_class: sport.color_class(),
            quantity: extract_quantity(&entry.activity).to_string(),
            is_race: is_race(entry),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RaceCountdown {
    pub race: RaceEvent,
    pub days_until: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub date: NaiveDate,
    pub current_week: u32,
    pub total_weeks: u32,
    pub percent: u32,
    pub next_race: Option<RaceCountdown>,
    pub countdown_text: String,
    pub mood: Option<CountdownMood>,
    pub urgency: Option<Urgency>,
    pub totals: DisciplineTotals,
    pub imported: Option<ImportSnapshot>,
    pub today: Option<WorkoutView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::workout::EntryType;

    #[test]
    fn test_workout_view_from_entry() {
        let entry = WorkoutEntry {
            date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            week: 3,
            day: "Wednesday".into(),
            activity: "🏁 Fall 5K 3.1 miles".into(),
            details: "Warm up 1 mile<br>Race it".into(),
            entry_type: Some(EntryType::Race),
        };
        let view = WorkoutView::from_entry(&entry);
        assert_eq!(view.sport, Sport::Race);
        assert_eq!(view.icon, "🏆");
        assert_eq!(view.quantity, "3.1 miles");
        assert_eq!(view.details, vec!["Warm up 1 mile", "Race it"]);
        assert!(view.is_race);
    }
}
