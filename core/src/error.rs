use chrono::NaiveDate;
use thiserror::Error;

/// A data-quality problem found while loading a plan table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanIssue {
    #[error("{date}: week number must be positive")]
    WeekZero { date: NaiveDate },

    #[error("{date}: week {week} follows week {previous}")]
    WeekDecreased { date: NaiveDate, week: u32, previous: u32 },

    #[error("{date}: day label '{label}' does not match {actual}")]
    DayMismatch { date: NaiveDate, label: String, actual: String },

    #[error("{date}: race entry has no matching race event")]
    RaceWithoutEvent { date: NaiveDate },

    #[error("{date}: race event '{name}' has no race entry")]
    EventWithoutRace { date: NaiveDate, name: String },
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Plan failed validation with {} issue(s): {}", .0.len(), summarize(.0))]
    Invalid(Vec<PlanIssue>),
}

fn summarize(issues: &[PlanIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
