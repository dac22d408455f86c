use anyhow::Result;
use chrono::NaiveDate;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use triplan_core::{DashboardUseCase, DashboardView, ImportSnapshot, ImportedActivity, PlanStore, Urgency, WorkoutView};

#[derive(Tabled)]
struct TotalsRow {
    #[tabled(rename = "Discipline")]
    discipline: &'static str,
    #[tabled(rename = "Plan to date")]
    planned: String,
    #[tabled(rename = "Imported")]
    imported: String,
    #[tabled(rename = "This week")]
    this_week: String,
}

fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent as usize * width / 100).min(width);
    format!("[{}{}] {}%", "#".repeat(filled), "-".repeat(width - filled), percent)
}

/// ANSI color for the countdown line.
fn urgency_ansi(urgency: Option<Urgency>) -> &'static str {
    match urgency {
        Some(Urgency::RaceDay) | Some(Urgency::VeryClose) => "1;31",
        Some(Urgency::Close) => "1;91",
        Some(Urgency::GettingClose) => "1;33",
        Some(Urgency::MonthAway) => "1;35",
        Some(Urgency::FarAway) => "1;32",
        None => "1;36",
    }
}

fn print_card(label: &str, date: NaiveDate, view: Option<&WorkoutView>) {
    println!("\x1b[1m{}\x1b[0m  {}", label, date.format("%A, %B %-d"));
    match view {
        Some(v) => {
            let flag = if v.is_race { " 🏁" } else { "" };
            println!("  {} {}{}  (week {})", v.icon, v.activity, flag, v.week);
            for line in &v.details {
                println!("    {}", line);
            }
        }
        None => println!("  No workout scheduled"),
    }
}

pub fn print_day(store: &PlanStore, date: NaiveDate, imported: &[ImportedActivity], json: bool) -> Result<()> {
    let dashboard = DashboardUseCase::new(store);
    let [prev, current, next] = dashboard.day_cards(date);
    let logged = dashboard.logged_on(date, imported);
    if json {
        let day = serde_json::json!({ "workout": current.1, "logged": logged });
        println!("{}", serde_json::to_string_pretty(&day)?);
        return Ok(());
    }
    print_card("Previous", prev.0, prev.1.as_ref());
    println!();
    print_card("Today", current.0, current.1.as_ref());
    for entry in &logged {
        println!("  \x1b[2mLogged\x1b[0m {} {}", entry.icon, entry.activity);
    }
    println!();
    print_card("Next", next.0, next.1.as_ref());
    Ok(())
}

fn totals_table(view: &DashboardView) -> Table {
    let imported = view.imported.as_ref();
    let cell = |pick: fn(&ImportSnapshot) -> f64| {
        imported
            .map(|s| format!("{:.1} mi", pick(s)))
            .unwrap_or_else(|| "-".to_string())
    };
    let rows = vec![
        TotalsRow {
            discipline: "🏊 Swim",
            planned: format!("{:.0} yd", view.totals.swim_yards),
            imported: cell(|s| s.total_swim),
            this_week: cell(|s| s.this_week_swim),
        },
        TotalsRow {
            discipline: "🚴 Bike",
            planned: format!("{:.1} mi", view.totals.bike_miles),
            imported: cell(|s| s.total_bike),
            this_week: cell(|s| s.this_week_bike),
        },
        TotalsRow {
            discipline: "🏃 Run",
            planned: format!("{:.1} mi", view.totals.run_miles),
            imported: cell(|s| s.total_run),
            this_week: cell(|s| s.this_week_run),
        },
    ];
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

pub fn print_dashboard(store: &PlanStore, date: NaiveDate, snapshot: Option<&ImportSnapshot>, json: bool) -> Result<()> {
    let view = DashboardUseCase::new(store).build(date, snapshot);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let mood = view.mood.map(|m| m.glyph()).unwrap_or("🎉");
    println!("\x1b[{}m{}\x1b[0m {}", urgency_ansi(view.urgency), view.countdown_text, mood);
    println!(
        "Week {} of {}  {}",
        view.current_week,
        view.total_weeks,
        progress_bar(view.percent, 30)
    );
    if let Some(today) = &view.today {
        println!("Today: {} {}", today.icon, today.activity);
    }
    println!("{}", totals_table(&view));
    if let Some(snapshot) = &view.imported {
        println!("Imports last updated {}", snapshot.last_updated.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[----------] 0%");
        assert_eq!(progress_bar(50, 10), "[#####-----] 50%");
        assert_eq!(progress_bar(100, 10), "[##########] 100%");
    }

    #[test]
    fn test_urgency_ansi_warms_up_near_race_day() {
        assert_eq!(urgency_ansi(Some(Urgency::from_days(0))), "1;31");
        assert_eq!(urgency_ansi(Some(Urgency::from_days(10))), "1;33");
        assert_eq!(urgency_ansi(Some(Urgency::from_days(120))), "1;32");
        assert_eq!(urgency_ansi(None), "1;36");
    }
}
