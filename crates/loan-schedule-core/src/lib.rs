pub mod calendar;
pub mod error;
pub mod installments;
pub mod rate;
pub mod schedule;
pub mod types;

pub use error::ScheduleError;
pub use types::*;

/// Standard result type for all loan-schedule operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;
