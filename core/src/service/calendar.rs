use chrono::NaiveDate;
use serde::Serialize;

use crate::model::sport::Sport;
use crate::model::workout::WorkoutEntry;
use crate::service::classifier::{classify_entry, extract_quantity, is_race};
use crate::store::PlanStore;
use crate::time::{WeekStart, YearMonth};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub week_start: WeekStart,
    /// Pad the last row so the grid is always whole weeks.
    pub pad_trailing: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Sunday,
            pad_trailing: true,
        }
    }
}

/// Classification shown on a calendar day that has a workout.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Annotation {
    pub sport: Sport,
    pub icon: &'static str,
    pub color_class: &'static str,
    pub quantity: String,
    pub is_race: bool,
}

impl Annotation {
    pub fn of(entry: &WorkoutEntry) -> Self {
        let sport = classify_entry(entry);
        Self {
            sport,
            icon: sport.icon(),
            color_class: sport.color_class(),
            quantity: extract_quantity(&entry.activity).to_string(),
            is_race: is_race(entry),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CalendarCell<'a> {
    Padding,
    Day {
        date: NaiveDate,
        workout: Option<&'a WorkoutEntry>,
        annotation: Option<Annotation>,
    },
}

impl CalendarCell<'_> {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CalendarCell::Padding => None,
            CalendarCell::Day { date, .. } => Some(*date),
        }
    }

    pub fn is_padding(&self) -> bool {
        matches!(self, CalendarCell::Padding)
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct MonthLayout<'a> {
    pub month: YearMonth,
    pub week_start: WeekStart,
    pub cells: Vec<CalendarCell<'a>>,
}

impl<'a> MonthLayout<'a> {
    pub fn leading_padding(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_padding()).count()
    }

    pub fn day_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_padding()).count()
    }

    /// Rows of up to seven cells; the last row is short only when trailing
    /// padding is off.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell<'a>]> {
        self.cells.chunks(7)
    }
}

pub fn layout_month<'a>(month: YearMonth, store: &'a PlanStore, options: &LayoutOptions) -> MonthLayout<'a> {
    let offset = options.week_start.offset(month.first_day()) as usize;
    let mut cells = Vec::with_capacity(42);
    cells.extend(std::iter::repeat(CalendarCell::Padding).take(offset));

    for date in month.days() {
        let workout = store.lookup(date);
        cells.push(CalendarCell::Day {
            date,
            workout,
            annotation: workout.map(Annotation::of),
        });
    }

    if options.pad_trailing {
        let remainder = cells.len() % 7;
        if remainder != 0 {
            cells.extend(std::iter::repeat(CalendarCell::Padding).take(7 - remainder));
        }
    }

    MonthLayout {
        month,
        week_start: options.week_start,
        cells,
    }
}

/// Month navigation step.
pub fn shift_month(current: YearMonth, delta: i32) -> YearMonth {
    current.shift(delta)
}
