use std::sync::LazyLock;

use regex::Regex;

use crate::model::sport::Sport;
use crate::model::workout::WorkoutEntry;

// Emoji tokens recognised in activity text. Matching happens after
// `normalize`, so variation selectors never take part in it.
const BRICK_TOKENS: [&str; 2] = ["brick", "🔀"];
const BRICK_PREFIXES: [&str; 2] = ["bike:", "cycle:"];
const SWIM_TOKENS: [&str; 2] = ["swim", "🏊"];
const BIKE_TOKENS: [&str; 3] = ["bike", "cycle", "🚴"];
const RUN_TOKENS: [&str; 2] = ["run", "🏃"];
const REST_TOKENS: [&str; 5] = ["rest", "recovery", "walk", "✨", "🚶"];
const RACE_TOKENS: [&str; 2] = ["race", "🏁"];

type Rule = (fn(&str) -> bool, Sport);

/// Evaluated top to bottom; the first matching predicate wins.
const RULES: [Rule; 6] = [
    (is_brick, Sport::Brick),
    (is_swim, Sport::Swim),
    (is_bike, Sport::Bike),
    (is_run, Sport::Run),
    (is_rest, Sport::Rest),
    (is_race_text, Sport::Race),
];

const NUMBER: &str = r"\d+(?:,\d{3})*(?:\.\d+)?";

static QUANTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){n}(?:-{n})?\s*(?:miles?|mi|yards?|yds?|meters?|km|minutes?|mins?|hours?|hrs?|m)\b",
        n = NUMBER
    ))
    .expect("valid quantity regex")
});
static MILES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({n})(?:-({n}))?\s*(?:miles?|mi)\b", n = NUMBER))
        .expect("valid miles regex")
});
static YARDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({n})(?:-({n}))?\s*(?:yards?|yds?)\b", n = NUMBER))
        .expect("valid yards regex")
});
static BRICK_CYCLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:cycl|bik)\w*\b.*?({n})(?:-({n}))?\s*(?:miles?|mi)\b",
        n = NUMBER
    ))
    .expect("valid brick cycle regex")
});
static BRICK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\brun\w*\b.*?({n})(?:-({n}))?\s*(?:miles?|mi)\b",
        n = NUMBER
    ))
    .expect("valid brick run regex")
});
static SOFT_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|\r?\n").expect("valid line break regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Miles,
    Yards,
}

/// Lowercases and drops emoji presentation selectors so that "🏃‍♂️" and
/// "🏃‍♂" compare the same.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{FE0E}' | '\u{FE0F}'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn contains_any(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| text.contains(t))
}

fn is_brick(text: &str) -> bool {
    contains_any(text, &BRICK_TOKENS)
        || contains_any(text, &BRICK_PREFIXES)
        || (is_bike(text) && is_run(text))
}

fn is_swim(text: &str) -> bool {
    contains_any(text, &SWIM_TOKENS)
}

fn is_bike(text: &str) -> bool {
    contains_any(text, &BIKE_TOKENS)
}

fn is_run(text: &str) -> bool {
    contains_any(text, &RUN_TOKENS)
}

fn is_rest(text: &str) -> bool {
    contains_any(text, &REST_TOKENS)
}

fn is_race_text(text: &str) -> bool {
    contains_any(text, &RACE_TOKENS)
}

pub fn classify_sport(activity: &str) -> Sport {
    let text = normalize(activity);
    RULES
        .iter()
        .find(|(pred, _)| pred(&text))
        .map(|(_, sport)| *sport)
        .unwrap_or(Sport::Other)
}

/// A race tag on the entry wins over whatever the text says.
pub fn classify_entry(entry: &WorkoutEntry) -> Sport {
    if entry.is_race_tagged() {
        Sport::Race
    } else {
        classify_sport(&entry.activity)
    }
}

pub fn is_race(entry: &WorkoutEntry) -> bool {
    entry.is_race_tagged() || is_race_text(&normalize(&entry.activity))
}

/// First unit-bearing quantity in `text`, or "" when there is none.
pub fn extract_quantity(text: &str) -> &str {
    QUANTITY_RE.find(text).map(|m| m.as_str()).unwrap_or("")
}

pub fn extract_distance(text: &str, unit: Unit) -> Option<f64> {
    let re = match unit {
        Unit::Miles => &*MILES_RE,
        Unit::Yards => &*YARDS_RE,
    };
    re.captures(text).and_then(|c| upper_bound(&c))
}

/// Cycle and run legs of a brick, in miles, searched line by line.
pub fn extract_brick_legs(details: &str) -> (Option<f64>, Option<f64>) {
    let lines = detail_lines(details);
    let find = |re: &Regex| {
        lines
            .iter()
            .find_map(|line| re.captures(line).and_then(|c| upper_bound(&c)))
    };
    (find(&*BRICK_CYCLE_RE), find(&*BRICK_RUN_RE))
}

pub fn detail_lines(details: &str) -> Vec<&str> {
    SOFT_BREAK_RE
        .split(details)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

// A range such as "15-18 miles" counts as its upper bound.
fn upper_bound(caps: &regex::Captures<'_>) -> Option<f64> {
    caps.get(2)
        .or_else(|| caps.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
}
