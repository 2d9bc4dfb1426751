//! Progress Tracker — week statistics and the task/step status machines.

pub mod handlers;
pub mod stats;

pub use stats::WeekStats;
