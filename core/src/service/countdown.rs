use serde::Serialize;

use crate::model::workout::RaceEvent;

pub const ALL_RACES_DONE: &str = "Congratulations on completing your goals!";

pub fn countdown_text(next: Option<(&RaceEvent, i64)>) -> String {
    match next {
        None => ALL_RACES_DONE.to_string(),
        Some((race, 0)) => format!("It's Race Day for the {}!", race.name),
        Some((race, days)) => format!(
            "{} Day{} until the {}",
            days,
            if days > 1 { "s" } else { "" },
            race.name
        ),
    }
}

/// How the countdown feels as race day approaches.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CountdownMood {
    RaceDay,
    Panicking,
    Nervous,
    Feeling,
    Thinking,
    Confident,
    Relaxed,
    Chill,
}

impl CountdownMood {
    pub fn from_days(days: i64) -> Self {
        match days {
            i64::MIN..=0 => CountdownMood::RaceDay,
            1..=3 => CountdownMood::Panicking,
            4..=7 => CountdownMood::Nervous,
            8..=14 => CountdownMood::Feeling,
            15..=30 => CountdownMood::Thinking,
            31..=60 => CountdownMood::Confident,
            61..=90 => CountdownMood::Relaxed,
            _ => CountdownMood::Chill,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            CountdownMood::RaceDay => "🔥",
            CountdownMood::Panicking => "😰",
            CountdownMood::Nervous => "😬",
            CountdownMood::Feeling => "😅",
            CountdownMood::Thinking => "🤔",
            CountdownMood::Confident => "😊",
            CountdownMood::Relaxed => "😌",
            CountdownMood::Chill => "😎",
        }
    }
}

/// Drives the countdown color; each view maps a tier to its own palette.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    RaceDay,
    VeryClose,
    Close,
    GettingClose,
    MonthAway,
    FarAway,
}

impl Urgency {
    pub fn from_days(days: i64) -> Self {
        match days {
            i64::MIN..=0 => Urgency::RaceDay,
            1..=3 => Urgency::VeryClose,
            4..=7 => Urgency::Close,
            8..=14 => Urgency::GettingClose,
            15..=30 => Urgency::MonthAway,
            _ => Urgency::FarAway,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn race() -> RaceEvent {
        RaceEvent {
            date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            name: "Fall 5K".into(),
        }
    }

    #[test]
    fn test_countdown_text() {
        let race = race();
        assert_eq!(countdown_text(Some((&race, 0))), "It's Race Day for the Fall 5K!");
        assert_eq!(countdown_text(Some((&race, 1))), "1 Day until the Fall 5K");
        assert_eq!(countdown_text(Some((&race, 12))), "12 Days until the Fall 5K");
        assert_eq!(countdown_text(None), ALL_RACES_DONE);
    }

    #[test]
    fn test_mood_thresholds() {
        assert_eq!(CountdownMood::from_days(0).glyph(), "🔥");
        assert_eq!(CountdownMood::from_days(3).glyph(), "😰");
        assert_eq!(CountdownMood::from_days(7).glyph(), "😬");
        assert_eq!(CountdownMood::from_days(14).glyph(), "😅");
        assert_eq!(CountdownMood::from_days(30).glyph(), "🤔");
        assert_eq!(CountdownMood::from_days(60).glyph(), "😊");
        assert_eq!(CountdownMood::from_days(90).glyph(), "😌");
        assert_eq!(CountdownMood::from_days(91).glyph(), "😎");
    }

    #[test]
    fn test_urgency_thresholds() {
        assert_eq!(Urgency::from_days(0), Urgency::RaceDay);
        assert_eq!(Urgency::from_days(2), Urgency::VeryClose);
        assert_eq!(Urgency::from_days(14), Urgency::GettingClose);
        assert_eq!(Urgency::from_days(31), Urgency::FarAway);
    }
}
