use chrono::Datelike;
use triplan_core::{layout_month, CalendarCell, Config, LayoutOptions, PlanStore, Sport, YearMonth};
use unicode_width::UnicodeWidthChar;

const CELL_WIDTH: usize = 14;

/// Pads or truncates to an exact display width; emoji take two columns.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

fn cell_lines(cell: &CalendarCell<'_>) -> [String; 2] {
    match cell {
        CalendarCell::Padding => [fit("", CELL_WIDTH), fit("", CELL_WIDTH)],
        CalendarCell::Day { date, annotation, .. } => {
            let top = match annotation {
                Some(a) if a.is_race => format!("{:>2} 🏁", date.day()),
                _ => format!("{:>2}", date.day()),
            };
            let bottom = match annotation {
                Some(a) if a.quantity.is_empty() => a.icon.to_string(),
                Some(a) => format!("{} {}", a.icon, a.quantity),
                None => String::new(),
            };
            [fit(&top, CELL_WIDTH), fit(&bottom, CELL_WIDTH)]
        }
    }
}

pub fn render_month(store: &PlanStore, month: YearMonth, config: &Config) -> String {
    let options = LayoutOptions {
        week_start: config.week_start,
        pad_trailing: config.pad_trailing_cells,
    };
    let layout = layout_month(month, store, &options);
    let rule = format!("+{}\n", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(7));

    let mut out = String::new();
    let title = month.to_string();
    let total = (CELL_WIDTH + 1) * 7 + 1;
    out.push_str(&format!("{:^width$}\n", title, width = total));
    out.push_str(&rule);
    out.push('|');
    for header in options.week_start.day_headers() {
        out.push_str(&fit(&format!(" {}", header), CELL_WIDTH));
        out.push('|');
    }
    out.push('\n');
    out.push_str(&rule);

    for week in layout.weeks() {
        for line in 0..2 {
            out.push('|');
            for cell in week {
                out.push_str(&cell_lines(cell)[line]);
                out.push('|');
            }
            // An unpadded last week still fills the row under the rule
            for _ in week.len()..7 {
                out.push_str(&fit("", CELL_WIDTH));
                out.push('|');
            }
            out.push('\n');
        }
        out.push_str(&rule);
    }

    let legend: Vec<String> = Sport::legend()
        .iter()
        .map(|s| format!("{} {}", s.icon(), s.label()))
        .collect();
    out.push_str(&legend.join("  "));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use triplan_core::{PlanRow, PlanTable};
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn test_fit_counts_emoji_as_wide() {
        assert_eq!(fit("🏃 5 miles", 6).width(), 6);
        assert_eq!(fit("🏃 5 miles", 6), "🏃 5 m");
        assert_eq!(fit("ab", 4), "ab  ");
    }

    #[test]
    fn test_render_month_marks_workouts() {
        let mut table = PlanTable::default();
        table.workouts.insert(
            NaiveDate::from_ymd_opt(2025, 10, 2).unwrap(),
            PlanRow {
                week: 1,
                day: "Thursday".into(),
                activity: "Swim 2000 yards".into(),
                details: String::new(),
                entry_type: None,
            },
        );
        let store = PlanStore::from_table(table).store;
        let month = YearMonth::new(2025, 10).unwrap();
        let text = render_month(&store, month, &Config::default());

        assert!(text.contains("October 2025"));
        assert!(text.contains("🏊 2000 yards"));
        // Every grid row is the same display width
        let widths: Vec<usize> = text.lines().filter(|l| l.starts_with('|')).map(|l| l.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_render_month_without_trailing_padding_keeps_rows_even() {
        let store = PlanStore::from_table(PlanTable::default()).store;
        let config = Config {
            pad_trailing_cells: false,
            ..Config::default()
        };
        // October 2025 ends on a Friday, so the last week is short
        let text = render_month(&store, YearMonth::new(2025, 10).unwrap(), &config);

        let rows: Vec<&str> = text.lines().filter(|l| l.starts_with('|')).collect();
        let rule_width = text.lines().find(|l| l.starts_with('+')).map(|l| l.width()).unwrap();
        assert!(rows.iter().all(|l| l.width() == rule_width));
        assert!(rows.iter().all(|l| l.matches('|').count() == 8));
    }
}
