//! Spreads the job list across consecutive calendar days. Pure: reads the
//! state, returns day buckets for rendering. All arithmetic happens in
//! integer multiples of the configured unit, so the pieces of a job always
//! sum to exactly its duration.

use chrono::NaiveDate;

use crate::model::ScheduleState;

/// The portion of one job allocated to one day
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    /// Index of the job in the schedule list
    pub job: usize,
    /// Duration of this piece, in hours
    pub hours: f64,
    /// Where this piece begins within the job, in hours
    pub offset: f64,
    /// True when the piece begins the job (offset zero)
    pub starts: bool,
    /// True when the piece completes the job's total duration
    pub ends: bool,
    /// True on every piece of the job under the cursor
    pub selected: bool,
}

/// One calendar day and the pieces placed on it. Days with a zero budget
/// show up with no pieces.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub pieces: Vec<Piece>,
}

/// Greedy single pass: fill each day's budget with job pieces in list
/// order, starting at the schedule start date. Zero-duration jobs yield no
/// pieces; an empty list yields no buckets.
pub fn partition(state: &ScheduleState) -> Vec<DayBucket> {
    let unit = state.config.unit;
    let to_units = |hours: f64| ((hours / unit).round().max(0.0)) as u64;
    let list = &state.schedule.list;

    let mut days: Vec<DayBucket> = Vec::new();
    let mut date: Option<NaiveDate> = None;
    let mut day_units: u64 = 0;
    let mut placed: u64 = 0;
    let mut j = 0;

    while j < list.len() {
        let job_units = to_units(list[j].hours);
        if job_units == 0 {
            j += 1;
            placed = 0;
            continue;
        }
        if day_units == 0 {
            let next = match date {
                None => state.schedule.start,
                Some(d) => d.succ_opt().unwrap_or(d),
            };
            if !capacity_remains(state, next) {
                break;
            }
            date = Some(next);
            day_units = to_units(state.hours.effective(next, &state.config.default_hours));
            days.push(DayBucket {
                date: next,
                pieces: Vec::new(),
            });
            continue;
        }
        let used = (job_units - placed).min(day_units);
        if let Some(day) = days.last_mut() {
            day.pieces.push(Piece {
                job: j,
                hours: used as f64 * unit,
                offset: placed as f64 * unit,
                starts: placed == 0,
                ends: placed + used == job_units,
                selected: j == state.schedule.cursor,
            });
        }
        day_units -= used;
        placed += used;
        if placed == job_units {
            j += 1;
            placed = 0;
        }
    }
    days
}

/// Whether any day at or after `from` can still hold work: some weekday
/// default is positive, or a positive override lies ahead. Stops the day
/// scan on a calendar with no capacity left.
fn capacity_remains(state: &ScheduleState, from: NaiveDate) -> bool {
    state.config.default_hours.iter().any(|&h| h > 0.0)
        || state.hours.iter().any(|(d, h)| d >= from && h > 0.0)
}
