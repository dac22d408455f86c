use serde::{Deserialize, Serialize};

/// Distances accumulated over a date range. Swim is kept in yards, the
/// other disciplines in miles.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct DisciplineTotals {
    pub swim_yards: f64,
    pub bike_miles: f64,
    pub run_miles: f64,
}

impl DisciplineTotals {
    pub fn add_swim(&mut self, yards: f64) {
        self.swim_yards += yards;
    }

    pub fn add_bike(&mut self, miles: f64) {
        self.bike_miles += miles;
    }

    pub fn add_run(&mut self, miles: f64) {
        self.run_miles += miles;
    }

    pub fn is_zero(&self) -> bool {
        self.swim_yards == 0.0 && self.bike_miles == 0.0 && self.run_miles == 0.0
    }
}
