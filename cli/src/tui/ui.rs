use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};
use triplan_core::{layout_month, CalendarCell, DashboardView, LayoutOptions, Sport, Urgency, WorkoutView};

use crate::tui::app::{App, InputMode, View};

fn sport_color(sport: Sport) -> Color {
    match sport {
        Sport::Swim => Color::Blue,
        Sport::Bike => Color::Green,
        Sport::Run => Color::Red,
        Sport::Brick => Color::Magenta,
        Sport::Rest => Color::Gray,
        Sport::Race => Color::Yellow,
        Sport::Other => Color::LightBlue,
    }
}

fn urgency_color(urgency: Option<Urgency>) -> Color {
    match urgency {
        Some(Urgency::RaceDay) | Some(Urgency::VeryClose) => Color::Red,
        Some(Urgency::Close) => Color::LightRed,
        Some(Urgency::GettingClose) => Color::Yellow,
        Some(Urgency::MonthAway) => Color::Magenta,
        Some(Urgency::FarAway) => Color::Green,
        None => Color::Cyan,
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Countdown
            Constraint::Length(3), // Progress
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let dashboard = app.dashboard();
    draw_header(f, &dashboard, main_chunks[0]);
    draw_progress(f, &dashboard, main_chunks[1]);

    match app.view {
        View::Day => draw_day_cards(f, app, main_chunks[2]),
        View::Calendar => draw_calendar(f, app, main_chunks[2]),
    }

    draw_footer(f, app, main_chunks[3]);
}

fn draw_header(f: &mut Frame, dashboard: &DashboardView, area: Rect) {
    let mood = dashboard.mood.map(|m| m.glyph()).unwrap_or("🎉");
    let header = Paragraph::new(Line::from(vec![
        Span::styled(dashboard.countdown_text.clone(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {}", mood)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(urgency_color(dashboard.urgency)))
            .title(" TRIPLAN "),
    );
    f.render_widget(header, area);
}

fn draw_progress(f: &mut Frame, dashboard: &DashboardView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).title(" Plan Progress "))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(dashboard.percent as f64 / 100.0)
        .label(format!(
            "Week {} of {} ({}%)",
            dashboard.current_week, dashboard.total_weeks, dashboard.percent
        ));
    f.render_widget(gauge, chunks[0]);

    let totals = dashboard.totals;
    let mut spans = vec![
        Span::styled(format!("🏊 {:.0} yd  ", totals.swim_yards), Style::default().fg(Color::Blue)),
        Span::styled(format!("🚴 {:.1} mi  ", totals.bike_miles), Style::default().fg(Color::Green)),
        Span::styled(format!("🏃 {:.1} mi", totals.run_miles), Style::default().fg(Color::Red)),
    ];
    if let Some(snapshot) = &dashboard.imported {
        spans.push(Span::styled(
            format!("  | logged {:.1} mi this week", snapshot.this_week()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let totals_block = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).title(" Completed So Far "));
    f.render_widget(totals_block, chunks[1]);
}

fn draw_day_cards(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(area);

    let [prev, current, next] = app.day_cards();
    let logged = app.logged_on_selected();
    draw_card(f, "Previous", prev.0, prev.1.as_ref(), &[], false, chunks[0]);
    draw_card(f, "Selected", current.0, current.1.as_ref(), &logged, app.show_details, chunks[1]);
    draw_card(f, "Next", next.0, next.1.as_ref(), &[], false, chunks[2]);
}

fn draw_card(
    f: &mut Frame,
    label: &str,
    date: NaiveDate,
    view: Option<&WorkoutView>,
    logged: &[WorkoutView],
    details: bool,
    area: Rect,
) {
    let title = format!(" {} · {} ", label, date.format("%a %b %-d"));
    let mut lines = Vec::new();

    match view {
        Some(v) => {
            let color = sport_color(v.sport);
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", v.icon)),
                Span::styled(v.activity.clone(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ]));
            if v.is_race {
                lines.push(Line::from(Span::styled("🏁 RACE DAY", Style::default().fg(Color::Yellow))));
            }
            lines.push(Line::from(Span::styled(
                format!("Week {} · {}", v.week, v.sport.label()),
                Style::default().fg(Color::DarkGray),
            )));
            if details {
                lines.push(Line::from(""));
                for detail in &v.details {
                    lines.push(Line::from(format!("• {}", detail)));
                }
            } else if !v.details.is_empty() {
                lines.push(Line::from(Span::styled("d: show details", Style::default().fg(Color::DarkGray))));
            }
        }
        None => lines.push(Line::from(Span::styled("No workout scheduled", Style::default().fg(Color::DarkGray)))),
    }

    if !logged.is_empty() {
        lines.push(Line::from(""));
        for entry in logged {
            lines.push(Line::from(vec![
                Span::styled("Logged ", Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{} {}", entry.icon, entry.activity), Style::default().fg(sport_color(entry.sport))),
            ]));
            if details {
                for detail in &entry.details {
                    lines.push(Line::from(Span::styled(format!("  {}", detail), Style::default().fg(Color::DarkGray))));
                }
            }
        }
    }

    let card = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded))
        .wrap(Wrap { trim: true });
    f.render_widget(card, area);
}

fn draw_calendar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let options = LayoutOptions {
        week_start: app.config.week_start,
        pad_trailing: app.config.pad_trailing_cells,
    };
    let layout = layout_month(app.month, &app.store, &options);

    let rows: Vec<Row> = layout
        .weeks()
        .map(|week| {
            let cells: Vec<Cell> = week
                .iter()
                .map(|cell| match cell {
                    CalendarCell::Padding => Cell::from(""),
                    CalendarCell::Day { date, annotation, .. } => {
                        let mut day_style = Style::default();
                        if *date == app.today {
                            day_style = day_style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
                        }
                        if *date == app.selected {
                            day_style = day_style.add_modifier(Modifier::REVERSED);
                        }
                        let mut lines = vec![Line::from(Span::styled(date.format("%-d").to_string(), day_style))];
                        if let Some(a) = annotation {
                            let race = if a.is_race { "🏁" } else { "" };
                            lines.push(Line::from(Span::styled(
                                format!("{}{} {}", a.icon, race, a.quantity),
                                Style::default().fg(sport_color(a.sport)),
                            )));
                        }
                        Cell::from(lines)
                    }
                })
                .collect();
            Row::new(cells).height(2)
        })
        .collect();

    let header = Row::new(options.week_start.day_headers().to_vec()).style(Style::default().fg(Color::Yellow));
    let table = Table::new(rows, [Constraint::Ratio(1, 7); 7])
        .header(header)
        .block(
            Block::default()
                .title(format!(" {} ", app.month))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(table, chunks[0]);

    let legend: Vec<Span> = Sport::legend()
        .iter()
        .map(|s| Span::styled(format!("{} {}  ", s.icon(), s.label()), Style::default().fg(sport_color(*s))))
        .collect();
    let legend = Paragraph::new(Line::from(legend))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).title(" Legend "));
    f.render_widget(legend, chunks[1]);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let footer = match app.input_mode {
        InputMode::GoTo => Paragraph::new(format!("Go to: {}", app.input)).style(Style::default().fg(Color::Yellow)),
        InputMode::Normal => {
            let text = app.status.clone().unwrap_or_else(|| {
                "h/l: Day | t: Today | p: Calendar | [/]: Month | d: Details | g: Go to | r: Reload | q: Quit"
                    .to_string()
            });
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
        }
    };
    f.render_widget(footer, area);

    if let InputMode::GoTo = app.input_mode {
        f.set_cursor_position((area.x + 7 + app.cursor_position as u16, area.y));
    }
}
