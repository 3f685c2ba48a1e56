pub mod due;
pub mod sm2;

pub use due::{is_due, select_due};
pub use sm2::{compute_next_state, is_passing, ReviewState, ScheduleError, ScheduleUpdate};
