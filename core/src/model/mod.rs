pub mod import;
pub mod sport;
pub mod stats;
pub mod workout;
