use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Race,
}

/// One row of the plan table as it is stored on disk. The date lives in the
/// table key, not in the row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlanRow {
    pub week: u32,
    pub day: String,
    pub activity: String,
    #[serde(default)]
    pub details: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    pub week: u32,
    pub day: String,
    pub activity: String,
    pub details: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
}

impl WorkoutEntry {
    pub fn from_row(date: NaiveDate, row: PlanRow) -> Self {
        Self {
            date,
            week: row.week,
            day: row.day,
            activity: row.activity,
            details: row.details,
            entry_type: row.entry_type,
        }
    }

    pub fn to_row(&self) -> PlanRow {
        PlanRow {
            week: self.week,
            day: self.day.clone(),
            activity: self.activity.clone(),
            details: self.details.clone(),
            entry_type: self.entry_type,
        }
    }

    pub fn is_race_tagged(&self) -> bool {
        self.entry_type == Some(EntryType::Race)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RaceEvent {
    pub date: NaiveDate,
    pub name: String,
}

/// The on-disk form of a plan: workouts keyed by ISO date, plus the race
/// events.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PlanTable {
    #[serde(default)]
    pub workouts: BTreeMap<NaiveDate, PlanRow>,
    #[serde(default)]
    pub races: Vec<RaceEvent>,
}

/// Full English weekday name, the form the plan table uses for `day`.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Accepts full names and three-letter abbreviations, case-insensitively.
pub fn label_matches(label: &str, date: NaiveDate) -> bool {
    let full = weekday_label(date).to_lowercase();
    let label = label.trim().to_lowercase();
    label == full || (label.len() == 3 && full.starts_with(&label))
}
