use chrono::{Months, NaiveDate};

use crate::error::ScheduleError;
use crate::schedule::MAX_TOTAL_TERM;
use crate::types::TermFrequency;
use crate::ScheduleResult;

/// Due dates for periods 1..=total_term, stepping by whole calendar
/// months from the start date. Each date is offset from the original
/// start (not from the previous due date), so a month-end start clamps
/// per period instead of drifting: monthly from 2024-01-31 gives
/// 2024-02-29, then 2024-03-31.
///
/// The last element is the maturity date.
pub fn period_dates(
    start: NaiveDate,
    frequency: TermFrequency,
    total_term: u32,
) -> ScheduleResult<Vec<NaiveDate>> {
    if total_term == 0 {
        return Err(ScheduleError::invalid(
            "total_term",
            "Total term must be at least 1 period",
        ));
    }
    if total_term > MAX_TOTAL_TERM {
        return Err(ScheduleError::invalid(
            "total_term",
            &format!("Total term exceeds the {MAX_TOTAL_TERM}-period cap"),
        ));
    }

    let step = frequency.months_per_period();
    let mut dates = Vec::with_capacity(total_term as usize);
    for n in 1..=total_term {
        let due = start
            .checked_add_months(Months::new(n * step))
            .ok_or_else(|| {
                ScheduleError::invalid("start_date", "Due date arithmetic overflowed")
            })?;
        dates.push(due);
    }

    Ok(dates)
}
