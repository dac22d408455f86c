pub mod dashboard;
pub mod plan_loader;

#[cfg(test)]
mod dashboard_test;
