use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};
use triplan_core::{
    parse_human_date, shift_month, Config, DashboardUseCase, DashboardView, FileImportRepository,
    FilePlanRepository, ImportService, ImportSnapshot, ImportedActivity, PlanLoaderUseCase, PlanStore, WorkoutView,
    YearMonth,
};

pub enum InputMode {
    Normal,
    GoTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Day,
    Calendar,
}

pub struct App {
    pub store: Arc<PlanStore>,
    repo: FilePlanRepository,
    pub config: Config,
    data_dir: Option<PathBuf>,
    pub snapshot: Option<ImportSnapshot>,
    logged: Vec<ImportedActivity>,
    pub today: NaiveDate,
    pub selected: NaiveDate,
    pub month: YearMonth,
    pub view: View,
    pub show_details: bool,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub status: Option<String>,
}

impl App {
    pub fn new(store: PlanStore, repo: FilePlanRepository, config: Config, data_dir: Option<PathBuf>) -> App {
        let today = Local::now().date_naive();
        let mut app = App {
            store: Arc::new(store),
            repo,
            config,
            data_dir,
            snapshot: None,
            logged: Vec::new(),
            today,
            selected: today,
            month: YearMonth::of(today),
            view: View::Day,
            show_details: false,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status: None,
        };
        app.refresh_snapshot();
        app
    }

    /// Countdown, progress and totals as of the selected day. The import
    /// snapshot always reflects the real week.
    pub fn dashboard(&self) -> DashboardView {
        DashboardUseCase::new(&self.store).build(self.selected, self.snapshot.as_ref())
    }

    pub fn logged_on_selected(&self) -> Vec<WorkoutView> {
        DashboardUseCase::new(&self.store).logged_on(self.selected, &self.logged)
    }

    pub fn day_cards(&self) -> [(NaiveDate, Option<WorkoutView>); 3] {
        DashboardUseCase::new(&self.store).day_cards(self.selected)
    }

    fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        self.month = YearMonth::of(date);
    }

    pub fn next_day(&mut self) {
        if let Some(d) = self.selected.succ_opt() {
            self.select(d);
        }
    }

    pub fn previous_day(&mut self) {
        if let Some(d) = self.selected.pred_opt() {
            self.select(d);
        }
    }

    pub fn jump_today(&mut self) {
        self.select(self.today);
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Day => View::Calendar,
            View::Calendar => View::Day,
        };
    }

    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    pub fn next_month(&mut self) {
        self.month = shift_month(self.month, 1);
    }

    pub fn previous_month(&mut self) {
        self.month = shift_month(self.month, -1);
    }

    /// Rebuilds the store from disk. The old store stays in place if the
    /// file can't be read or fails strict validation.
    pub fn reload(&mut self) {
        let loader = PlanLoaderUseCase::new(&self.repo);
        let result = if self.config.strict_validation {
            loader.load_strict().map(|store| (store, 0))
        } else {
            loader.load().map(|outcome| (outcome.store, outcome.issues.len()))
        };
        match result {
            Ok((store, issues)) => {
                info!(entries = store.len(), issues, "plan reloaded");
                self.store = Arc::new(store);
                self.status = Some(if issues == 0 {
                    "Plan reloaded".to_string()
                } else {
                    format!("Plan reloaded with {} issue(s), run `triplan validate`", issues)
                });
            }
            Err(e) => {
                warn!(error = %e, "plan reload failed");
                self.status = Some(format!("Reload failed: {}", e));
            }
        }
        self.refresh_snapshot();
    }

    fn refresh_snapshot(&mut self) {
        let loaded = FileImportRepository::new(self.data_dir.clone())
            .map(ImportService::new)
            .and_then(|service| Ok((service.activities()?, service.snapshot(self.today, self.config.week_start)?)));
        match loaded {
            Ok((activities, snapshot)) => {
                self.logged = activities;
                self.snapshot = snapshot;
            }
            Err(e) => warn!(error = %e, "could not read import cache"),
        }
    }

    pub fn enter_goto_mode(&mut self) {
        self.input_mode = InputMode::GoTo;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_goto(&mut self) {
        if !self.input.trim().is_empty() {
            match parse_human_date(&self.input, self.today) {
                Ok(date) => {
                    self.select(date);
                    self.status = None;
                }
                Err(e) => self.status = Some(e.to_string()),
            }
        }
        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }
}
