// High-level module for the scheduling engine.
// Submodules (files in `src/algorithm`).
pub mod blocks;
pub mod options;
pub mod solver;
pub mod timetable;

// Re-export the engine surface the server layer consumes.
pub use blocks::find_contiguous_block;
pub use options::{cohort_key, feasible_options, is_long_course, BookingState};
pub use solver::{solve, SearchOutcome, SearchStats};
pub use timetable::{auto_schedule, config_from_env, modify_schedule, ScheduleReport};
