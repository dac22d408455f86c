pub mod calendar;
pub mod classifier;
pub mod countdown;
pub mod dto;
pub mod import_service;
pub mod progress;
pub mod week_grouping;
