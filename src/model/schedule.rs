use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::clipboard::ClipboardStack;
use crate::model::config::Config;
use crate::model::job::Job;

/// The job sheet: an ordered list placed against consecutive days
/// starting at `start`. `cursor` is an insertion point in
/// `[0, list.len()]`, not necessarily an existing job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub start: NaiveDate,
    pub cursor: usize,
    pub list: Vec<Job>,
}

impl Schedule {
    pub fn new(start: NaiveDate) -> Self {
        Schedule {
            start,
            cursor: 0,
            list: Vec::new(),
        }
    }

    /// Insert at `index`, clamped to the list length
    pub fn insert(&mut self, index: usize, job: Job) -> usize {
        let idx = index.min(self.list.len());
        self.list.insert(idx, job);
        idx
    }

    /// Remove the job at `index`, if any
    pub fn remove(&mut self, index: usize) -> Option<Job> {
        if index < self.list.len() {
            Some(self.list.remove(index))
        } else {
            None
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.list.len());
    }

    /// Shift the schedule start by whole days (not undoable, like cursor
    /// movement)
    pub fn shift_start(&mut self, days: i64) {
        self.start = self.start + chrono::Duration::days(days);
    }
}

/// Per-date hour budgets. Absent dates fall back to the weekday defaults
/// (Sunday first) from the config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourOverrides(BTreeMap<NaiveDate, f64>);

impl HourOverrides {
    pub fn new() -> Self {
        HourOverrides(BTreeMap::new())
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.0.get(&date).copied()
    }

    /// Set the budget for `date`, returning the previous override if any
    pub fn set(&mut self, date: NaiveDate, hours: f64) -> Option<f64> {
        self.0.insert(date, hours)
    }

    /// Remove the override for `date`, returning it if present
    pub fn clear(&mut self, date: NaiveDate) -> Option<f64> {
        self.0.remove(&date)
    }

    /// The budget in effect on `date`: the override if present, else the
    /// weekday default
    pub fn effective(&self, date: NaiveDate, defaults: &[f64; 7]) -> f64 {
        self.get(date)
            .unwrap_or_else(|| defaults[date.weekday().num_days_from_sunday() as usize])
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.0.iter().map(|(d, h)| (*d, *h))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything a command or the partition function can touch, bundled so
/// nothing lives in globals. Clips are session-local and never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleState {
    pub schedule: Schedule,
    pub hours: HourOverrides,
    pub clips: ClipboardStack,
    pub config: Config,
}

impl ScheduleState {
    pub fn new(config: Config, start: NaiveDate) -> Self {
        ScheduleState {
            schedule: Schedule::new(start),
            hours: HourOverrides::new(),
            clips: ClipboardStack::new(),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::job::Color;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn insert_clamps_index() {
        let mut schedule = Schedule::new(date("2024-01-01"));
        let at = schedule.insert(99, Job::new("a", 1.0, Color::Red));
        assert_eq!(at, 0);
        let at = schedule.insert(99, Job::new("b", 1.0, Color::Blue));
        assert_eq!(at, 1);
        assert_eq!(schedule.list[1].name, "b");
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut schedule = Schedule::new(date("2024-01-01"));
        assert!(schedule.remove(0).is_none());
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut schedule = Schedule::new(date("2024-01-01"));
        schedule.insert(0, Job::new("a", 1.0, Color::Red));
        schedule.cursor_left();
        assert_eq!(schedule.cursor, 0);
        schedule.cursor_right();
        schedule.cursor_right();
        schedule.cursor_right();
        assert_eq!(schedule.cursor, 1);
    }

    #[test]
    fn shift_start_moves_whole_days() {
        let mut schedule = Schedule::new(date("2024-01-01"));
        schedule.shift_start(1);
        assert_eq!(schedule.start, date("2024-01-02"));
        schedule.shift_start(-2);
        assert_eq!(schedule.start, date("2023-12-31"));
    }

    #[test]
    fn effective_hours_prefers_override() {
        let mut hours = HourOverrides::new();
        let defaults = [6.0; 7];
        let monday = date("2024-01-01");
        assert_eq!(hours.effective(monday, &defaults), 6.0);
        hours.set(monday, 2.5);
        assert_eq!(hours.effective(monday, &defaults), 2.5);
        hours.clear(monday);
        assert_eq!(hours.effective(monday, &defaults), 6.0);
    }

    #[test]
    fn effective_hours_uses_weekday_defaults() {
        let hours = HourOverrides::new();
        let mut defaults = [6.0; 7];
        defaults[0] = 0.0; // Sundays off
        let sunday = date("2024-01-07");
        let monday = date("2024-01-08");
        assert_eq!(hours.effective(sunday, &defaults), 0.0);
        assert_eq!(hours.effective(monday, &defaults), 6.0);
    }

    #[test]
    fn overrides_serialize_as_date_keys() {
        let mut hours = HourOverrides::new();
        hours.set(date("2024-03-05"), 4.0);
        let json = serde_json::to_string(&hours).unwrap();
        assert_eq!(json, r#"{"2024-03-05":4.0}"#);
    }
}
