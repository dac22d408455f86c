use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// First column of a displayed week.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Number of cells between the start of the display week and `date`.
    pub fn offset(&self, date: NaiveDate) -> u32 {
        match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        }
    }

    pub fn start_of_week(&self, date: NaiveDate) -> NaiveDate {
        date - Duration::days(self.offset(date) as i64)
    }

    pub fn day_headers(&self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Month out of range: {}", month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(anyhow!("Year out of range: {}", year));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Moves by `delta` months, rolling the year over at either end. Stays
    /// put when the target lies outside the representable date range.
    pub fn shift(&self, delta: i32) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + delta as i64;
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) as u32 + 1;
        i32::try_from(year)
            .ok()
            .and_then(|year| Self::new(year, month).ok())
            .unwrap_or(*self)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..self.days_in_month()).map(move |i| first + Duration::days(i as i64))
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

pub fn parse_plan_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow!("Invalid date '{}': {}", input, e))
}

pub fn parse_year_month(input: &str) -> Result<YearMonth> {
    let (year, month) = input
        .trim()
        .split_once('-')
        .ok_or_else(|| anyhow!("Expected YYYY-MM, got '{}'", input))?;
    let year: i32 = year.parse().map_err(|_| anyhow!("Invalid year in '{}'", input))?;
    let month: u32 = month.parse().map_err(|_| anyhow!("Invalid month in '{}'", input))?;
    YearMonth::new(year, month)
}

/// Resolves navigation input relative to `today`.
pub fn parse_human_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return Ok(today + Duration::days(1)),
        "yesterday" | "yest" => return Ok(today - Duration::days(1)),
        "eow" => {
            // End of week (Sunday)
            let days_to_sunday = 6 - today.weekday().num_days_from_monday() as i64;
            return Ok(today + Duration::days(days_to_sunday));
        }
        "eom" => return Ok(YearMonth::of(today).last_day()),
        _ => {}
    }

    // 2. Relative format (+Nd, -Nd, +Nw, +Nm)
    if input.starts_with('+') || input.starts_with('-') {
        return parse_relative(input, today);
    }

    // 3. Weekday format (fri, 2:fri)
    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Ok(target) = parse_weekday_str(day_str) {
            let mut days_needed =
                target.num_days_from_sunday() as i64 - today.weekday().num_days_from_sunday() as i64;
            if days_needed <= 0 {
                days_needed += 7;
            }
            let ahead = (count - 1)
                .checked_mul(7)
                .and_then(|weeks| weeks.checked_add(days_needed))
                .ok_or_else(|| anyhow!("Date out of range: {}", input))?;
            return add_days(today, ahead).ok_or_else(|| anyhow!("Date out of range: {}", input));
        }
    }

    // 4. Fallback to ISO
    parse_plan_date(input).map_err(|_| anyhow!("Could not parse date: {}", input))
}

fn parse_relative(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let sign: i64 = if input.starts_with('-') { -1 } else { 1 };
    let body = &input[1..];
    if body.len() < 2 || !body.is_char_boundary(body.len() - 1) {
        return Err(anyhow!("Invalid relative format: {}", input));
    }
    let (num_str, unit) = body.split_at(body.len() - 1);
    let count: i64 = num_str
        .parse()
        .map_err(|_| anyhow!("Invalid relative format: {}", input))?;
    let count = count
        .checked_mul(sign)
        .ok_or_else(|| anyhow!("Date out of range: {}", input))?;

    match unit {
        "d" => add_days(today, count).ok_or_else(|| anyhow!("Date out of range: {}", input)),
        "w" => count
            .checked_mul(7)
            .and_then(|days| add_days(today, days))
            .ok_or_else(|| anyhow!("Date out of range: {}", input)),
        "m" => {
            // chrono clamps to the last valid day (Jan 31 + 1m -> Feb 28)
            let months = u32::try_from(count.unsigned_abs())
                .map(Months::new)
                .map_err(|_| anyhow!("Date out of range: {}", input))?;
            let shifted = if count >= 0 {
                today.checked_add_months(months)
            } else {
                today.checked_sub_months(months)
            };
            shifted.ok_or_else(|| anyhow!("Date out of range: {}", input))
        }
        _ => Err(anyhow!("Unknown unit in relative time: {}", unit)),
    }
}

fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

fn parse_weekday_token(input: &str) -> Option<(i64, &str)> {
    if input.contains(':') {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() == 2 {
            if let Ok(count) = parts[0].parse::<i64>() {
                if count >= 1 {
                    return Some((count, parts[1]));
                }
            }
        }
    } else {
        return Some((1, input));
    }
    None
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}
