use chrono::NaiveDate;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use triplan_core::service::week_grouping::bucket_for;
use triplan_core::{days_until, format_week_range, group_by_plan_week, PlanStore, WorkoutView};

#[derive(Tabled)]
struct PlanRowView {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "")]
    icon: String,
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Distance")]
    quantity: String,
}

#[derive(Tabled)]
struct RaceRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Race")]
    name: String,
    #[tabled(rename = "Days")]
    days: String,
}

pub fn show_plan(store: &PlanStore, today: NaiveDate) {
    if store.is_empty() {
        println!("The plan is empty.");
        return;
    }

    let buckets = group_by_plan_week(store);
    let current = bucket_for(&buckets, today).map(|b| b.week);

    for bucket in buckets.values() {
        let marker = if Some(bucket.week) == current { "  <- this week" } else { "" };
        println!(
            "\n\x1b[1;36mWeek {}\x1b[0m ({}){}",
            bucket.week,
            format_week_range(bucket),
            marker
        );

        let rows: Vec<PlanRowView> = bucket
            .entries
            .iter()
            .map(|entry| {
                let view = WorkoutView::from_entry(entry);
                PlanRowView {
                    date: format!("{} {}", view.date.format("%m-%d"), view.date.format("%a")),
                    icon: if view.is_race { "🏁".to_string() } else { view.icon.to_string() },
                    activity: view.activity,
                    quantity: if view.quantity.is_empty() { "-".to_string() } else { view.quantity },
                }
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::modern())
            .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
        println!("{}", table);
    }
}

pub fn show_races(store: &PlanStore, date: NaiveDate) {
    let rows: Vec<RaceRow> = store
        .race_events()
        .iter()
        .filter(|r| r.date >= date)
        .map(|r| {
            let days = days_until(date, r.date);
            RaceRow {
                date: r.date.format("%Y-%m-%d (%a)").to_string(),
                name: r.name.clone(),
                days: if days == 0 { "Race Day".to_string() } else { days.to_string() },
            }
        })
        .collect();

    if rows.is_empty() {
        println!("No races ahead.");
        return;
    }

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}
