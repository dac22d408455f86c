use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::model::import::{ImportSnapshot, ImportedActivity};
use crate::model::sport::Sport;
use crate::repository::ImportCacheRepository;
use crate::time::WeekStart;

const METERS_PER_MILE: f64 = 1609.344;

#[derive(Deserialize)]
#[serde(untagged)]
enum ExportDocument {
    List(Vec<Value>),
    Wrapped { activities: Vec<Value> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SourceId {
    Number(serde_json::Number),
    Text(String),
}

/// One activity as exporting services write it. Several services send more
/// than one of the date, type and time keys, so each is its own field.
#[derive(Deserialize)]
struct ExportRecord {
    id: Option<SourceId>,
    name: Option<String>,
    #[serde(rename = "type")]
    activity_type: Option<String>,
    sport_type: Option<String>,
    sport: Option<String>,
    distance: Option<f64>,
    distance_miles: Option<f64>,
    start_date_local: Option<String>,
    start_date: Option<String>,
    date: Option<String>,
    moving_time: Option<f64>,
    elapsed_time: Option<f64>,
}

impl ExportRecord {
    fn into_activity(self) -> Option<ImportedActivity> {
        let date = [&self.start_date_local, &self.start_date, &self.date]
            .into_iter()
            .flatten()
            .find_map(|value| iso_date_prefix(value))?;

        let sport = [&self.activity_type, &self.sport_type, &self.sport]
            .into_iter()
            .flatten()
            .map(|value| Sport::from_activity_type(value))
            .next()
            .unwrap_or(Sport::Other);

        let distance_miles = self
            .distance_miles
            .or_else(|| self.distance.map(|meters| meters / METERS_PER_MILE))
            .unwrap_or(0.0);

        let name = self.name.unwrap_or_else(|| format!("{} activity", sport.label()));

        let duration = self
            .moving_time
            .or(self.elapsed_time)
            .filter(|seconds| *seconds >= 0.0)
            .map(|seconds| format_seconds(seconds.round() as u64));

        let source_id = self.id.map(|id| match id {
            SourceId::Number(n) => n.to_string(),
            SourceId::Text(s) => s,
        });

        let mut activity = ImportedActivity::new(name, sport, (distance_miles * 100.0).round() / 100.0, date);
        activity.duration = duration;
        activity.source_id = source_id;
        Some(activity)
    }
}

/// Reads an activity export. Accepts a bare array or an object with an
/// `activities` array; records that can't be read are skipped.
pub fn parse_export(json: &str) -> Result<Vec<ImportedActivity>> {
    let document: ExportDocument = serde_json::from_str(json)
        .map_err(|e| anyhow!("Export must be an array or an object with an \"activities\" array: {}", e))?;
    let records = match document {
        ExportDocument::List(items) => items,
        ExportDocument::Wrapped { activities } => activities,
    };

    let total = records.len();
    let mut activities = Vec::with_capacity(total);
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<ExportRecord>(record) {
            Ok(record) => match record.into_activity() {
                Some(activity) => activities.push(activity),
                None => debug!(index, "skipping export record without a date"),
            },
            Err(e) => debug!(index, error = %e, "skipping unreadable export record"),
        }
    }
    info!(read = activities.len(), skipped = total - activities.len(), "export parsed");
    Ok(activities)
}

fn iso_date_prefix(value: &str) -> Option<NaiveDate> {
    let prefix = value.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// "1:02:03" for an hour or more, "42:15" below that.
pub fn format_seconds(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

pub struct ImportService<R: ImportCacheRepository> {
    repo: R,
}

impl<R: ImportCacheRepository> ImportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Parses an export and stores it. Returns how many activities were new.
    pub fn import_json(&self, json: &str) -> Result<usize> {
        let activities = parse_export(json)?;
        self.repo.upsert_many(activities)
    }

    pub fn activities(&self) -> Result<Vec<ImportedActivity>> {
        self.repo.list()
    }

    pub fn snapshot(&self, today: NaiveDate, week_start: WeekStart) -> Result<Option<ImportSnapshot>> {
        let activities = self.repo.list()?;
        if activities.is_empty() {
            return Ok(None);
        }
        Ok(Some(ImportSnapshot::from_activities(&activities, today, week_start)))
    }

    pub fn clear(&self) -> Result<()> {
        self.repo.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_parse_export_array() {
        let json = r#"[
            { "id": 101, "name": "Morning Run", "type": "Run", "distance": 8046.72,
              "start_date_local": "2025-10-01T06:30:00Z", "moving_time": 2535 },
            { "name": "Pool", "sport_type": "Swim", "distance_miles": 1.1, "date": "2025-10-02" },
            { "name": "No date", "type": "Ride", "distance": 1000.0 },
            "not an object"
        ]"#;
        let activities = parse_export(json).unwrap();
        assert_eq!(activities.len(), 2);

        let run = &activities[0];
        assert_eq!(run.sport, Sport::Run);
        assert_eq!(run.distance_miles, 5.0);
        assert_eq!(run.date, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert_eq!(run.duration.as_deref(), Some("42:15"));
        assert_eq!(run.source_id.as_deref(), Some("101"));

        let swim = &activities[1];
        assert_eq!(swim.sport, Sport::Swim);
        assert_eq!(swim.distance_miles, 1.1);
        assert!(swim.source_id.is_none());
    }

    #[test]
    fn test_parse_export_prefers_first_key_when_several_are_sent() {
        let json = r#"[
            { "id": "abc", "name": "Long Ride", "type": "Ride", "sport_type": "VirtualRide",
              "start_date": "2025-10-04T13:00:00Z", "start_date_local": "2025-10-04T06:00:00-07:00",
              "moving_time": 3723, "elapsed_time": 4000, "distance": 32186.88 },
            { "name": "Bad distance", "type": "Run", "distance": "far", "date": "2025-10-05" }
        ]"#;
        let activities = parse_export(json).unwrap();
        assert_eq!(activities.len(), 1);

        let ride = &activities[0];
        assert_eq!(ride.sport, Sport::Bike);
        assert_eq!(ride.distance_miles, 20.0);
        assert_eq!(ride.date, NaiveDate::from_ymd_opt(2025, 10, 4).unwrap());
        assert_eq!(ride.duration.as_deref(), Some("1:02:03"));
        assert_eq!(ride.source_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_parse_export_wrapped_object() {
        let json = r#"{ "activities": [ { "name": "Ride", "type": "VirtualRide", "date": "2025-10-03" } ] }"#;
        let activities = parse_export(json).unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].sport, Sport::Bike);
        assert_eq!(activities[0].distance_miles, 0.0);
    }

    #[test]
    fn test_parse_export_rejects_bad_documents() {
        assert!(parse_export("not json").is_err());
        assert!(parse_export(r#"{ "runs": [] }"#).is_err());
        assert!(parse_export("42").is_err());
        assert!(parse_export("[]").unwrap().is_empty());
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(59), "0:59");
        assert_eq!(format_seconds(2535), "42:15");
        assert_eq!(format_seconds(3723), "1:02:03");
    }

    struct MemoryRepo {
        activities: RefCell<Vec<ImportedActivity>>,
    }

    impl ImportCacheRepository for MemoryRepo {
        fn list(&self) -> Result<Vec<ImportedActivity>> {
            Ok(self.activities.borrow().clone())
        }
        fn upsert_many(&self, activities: Vec<ImportedActivity>) -> Result<usize> {
            let added = activities.len();
            self.activities.borrow_mut().extend(activities);
            Ok(added)
        }
        fn clear(&self) -> Result<()> {
            self.activities.borrow_mut().clear();
            Ok(())
        }
    }

    #[test]
    fn test_import_service_snapshot() {
        let service = ImportService::new(MemoryRepo { activities: RefCell::new(Vec::new()) });
        let today = NaiveDate::from_ymd_opt(2025, 10, 8).unwrap();
        assert!(service.snapshot(today, WeekStart::Sunday).unwrap().is_none());

        let json = r#"[ { "name": "Run", "type": "Run", "distance_miles": 4.0, "date": "2025-10-07" } ]"#;
        assert_eq!(service.import_json(json).unwrap(), 1);

        let snapshot = service.snapshot(today, WeekStart::Sunday).unwrap().unwrap();
        assert_eq!(snapshot.this_week_run, 4.0);

        service.clear().unwrap();
        assert!(service.activities().unwrap().is_empty());
    }
}
