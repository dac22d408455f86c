pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod store;
pub mod time;
pub mod usecase;

pub use config::Config;
pub use error::{PlanError, PlanIssue};
pub use model::import::{ImportSnapshot, ImportedActivity};
pub use model::sport::{color_class_for, icon_for, Sport};
pub use model::stats::DisciplineTotals;
pub use model::workout::{EntryType, PlanRow, PlanTable, RaceEvent, WorkoutEntry};
pub use repository::{FileImportRepository, FilePlanRepository, ImportCacheRepository, PlanRepository};
pub use service::calendar::{layout_month, shift_month, CalendarCell, LayoutOptions, MonthLayout};
pub use service::countdown::{CountdownMood, Urgency};
pub use service::classifier::{classify_entry, classify_sport, extract_quantity, is_race};
pub use service::dto::{DashboardView, WorkoutView};
pub use service::import_service::{parse_export, ImportService};
pub use service::progress::{accumulate_distances, current_week, days_until, next_race, percent_complete};
pub use service::week_grouping::{format_week_range, group_by_plan_week, WeekBucket};
pub use store::{LoadOutcome, PlanStore};
pub use time::{parse_human_date, parse_year_month, WeekStart, YearMonth};
pub use usecase::dashboard::DashboardUseCase;
pub use usecase::plan_loader::PlanLoaderUseCase;
