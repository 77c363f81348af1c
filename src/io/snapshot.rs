//! Snapshot of the persistent part of the state: the schedule (start,
//! cursor, job list) and the hour overrides. Clips and history are
//! session-local and never serialized.

use serde::{Deserialize, Serialize};

use crate::model::schedule::{HourOverrides, Schedule};
use crate::model::ScheduleState;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    jobs: &'a Schedule,
    hours: &'a HourOverrides,
}

#[derive(Deserialize)]
struct Snapshot {
    jobs: Schedule,
    hours: HourOverrides,
}

/// Render the state as self-describing JSON text. The start date and the
/// override keys serialize as canonical `YYYY-MM-DD`.
pub fn serialize(state: &ScheduleState) -> String {
    serde_json::to_string(&SnapshotRef {
        jobs: &state.schedule,
        hours: &state.hours,
    })
    .unwrap_or_default()
}

/// Exact inverse of [`serialize`]. Empty or unparsable text leaves the
/// state untouched and returns false; state is replaced wholesale or not
/// at all. The caller is responsible for clearing history and clips when
/// this replaces a live session's state.
pub fn restore(state: &mut ScheduleState, text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    let Ok(snapshot) = serde_json::from_str::<Snapshot>(text) else {
        return false;
    };
    state.schedule = snapshot.jobs;
    state.schedule.cursor = state.schedule.cursor.min(state.schedule.list.len());
    state.hours = snapshot.hours;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Config, Job};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_state() -> ScheduleState {
        let mut s = ScheduleState::new(Config::default(), date("2024-01-01"));
        s.schedule.insert(0, Job::new("Design", 2.0, Color::Blue));
        s.schedule.insert(1, Job::new("Build", 4.0, Color::Green));
        s.schedule.cursor = 1;
        s.hours.set(date("2024-01-02"), 3.5);
        s
    }

    #[test]
    fn snapshot_shape_is_stable() {
        let json = serialize(&sample_state());
        assert_eq!(
            json,
            r#"{"jobs":{"start":"2024-01-01","cursor":1,"list":[{"name":"Design","hours":2.0,"color":"blue"},{"name":"Build","hours":4.0,"color":"green"}]},"hours":{"2024-01-02":3.5}}"#
        );
    }

    #[test]
    fn serialize_then_restore_reproduces_the_state() {
        let original = sample_state();
        let mut loaded = ScheduleState::new(Config::default(), date("2030-06-15"));
        assert!(restore(&mut loaded, &serialize(&original)));
        assert_eq!(loaded.schedule, original.schedule);
        assert_eq!(loaded.hours, original.hours);
    }

    #[test]
    fn empty_text_is_a_soft_no_op() {
        let mut state = sample_state();
        let before = state.clone();
        assert!(!restore(&mut state, ""));
        assert!(!restore(&mut state, "   \n"));
        assert_eq!(state, before);
    }

    #[test]
    fn unparsable_text_is_a_soft_no_op() {
        let mut state = sample_state();
        let before = state.clone();
        assert!(!restore(&mut state, "{ not json"));
        assert!(!restore(&mut state, r#"{"jobs": 3}"#));
        assert_eq!(state, before);
    }

    #[test]
    fn unknown_colors_reject_the_whole_snapshot() {
        let mut state = sample_state();
        let before = state.clone();
        let text = r#"{"jobs":{"start":"2024-01-01","cursor":0,"list":[{"name":"x","hours":1.0,"color":"mauve"}]},"hours":{}}"#;
        assert!(!restore(&mut state, text));
        assert_eq!(state, before);
    }

    #[test]
    fn restore_clamps_a_stale_cursor() {
        let mut state = sample_state();
        let text = r#"{"jobs":{"start":"2024-01-01","cursor":9,"list":[{"name":"x","hours":1.0,"color":"red"}]},"hours":{}}"#;
        assert!(restore(&mut state, text));
        assert_eq!(state.schedule.cursor, 1);
    }

    #[test]
    fn clips_survive_a_restore_untouched() {
        let mut state = sample_state();
        state.clips.push_clip(vec![Job::new("kept", 1.0, Color::Red)]);
        let text = serialize(&state.clone());
        assert!(restore(&mut state, &text));
        assert_eq!(state.clips.len(), 1);
    }
}
