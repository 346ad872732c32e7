//! Tournament business logic: schedule generation, result commits, standings.

mod results;
mod schedule;
mod standings;

pub use results::{commit_result, unlock_match};
pub use schedule::{generate, generate_schedule, regenerate_schedule, GeneratedSchedule};
pub use standings::compute_standings;
