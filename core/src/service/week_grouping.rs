use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::workout::WorkoutEntry;
use crate::store::PlanStore;

/// All entries sharing one plan week, in date order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WeekBucket<'a> {
    pub week: u32,
    pub entries: Vec<&'a WorkoutEntry>,
}

impl WeekBucket<'_> {
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.entries.first().map(|e| e.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.entries.last().map(|e| e.date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries.iter().any(|e| e.date == date)
    }
}

/// Groups by the plan's own week number, not the calendar week. The map
/// iterates in ascending week order.
pub fn group_by_plan_week(store: &PlanStore) -> BTreeMap<u32, WeekBucket<'_>> {
    let mut buckets: BTreeMap<u32, WeekBucket<'_>> = BTreeMap::new();
    for (_, entry) in store.entries() {
        buckets
            .entry(entry.week)
            .or_insert_with(|| WeekBucket { week: entry.week, entries: Vec::new() })
            .entries
            .push(entry);
    }
    for bucket in buckets.values_mut() {
        bucket.entries.sort_by_key(|e| e.date);
    }
    buckets
}

/// "Sep 20 – Sep 26", from the first and last entry of a sorted bucket.
pub fn format_week_range(bucket: &WeekBucket<'_>) -> String {
    match (bucket.first_date(), bucket.last_date()) {
        (Some(first), Some(last)) => format!("{} – {}", first.format("%b %-d"), last.format("%b %-d")),
        _ => String::new(),
    }
}

pub fn bucket_for<'m, 'a>(buckets: &'m BTreeMap<u32, WeekBucket<'a>>, date: NaiveDate) -> Option<&'m WeekBucket<'a>> {
    buckets.values().find(|b| b.contains(date))
}
