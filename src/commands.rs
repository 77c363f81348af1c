//! The named, reversible operations over a [`ScheduleState`]. Each is a
//! `(perform, undo)` fn pair; `registry()` wires them into a [`History`].

use crate::history::{CommandError, History};
use crate::model::{Color, Job, ScheduleState};
use crate::util::dates;

pub const NEW_JOB: &str = "new job";
pub const EDIT_JOB: &str = "edit job";
pub const WORKING_HOURS: &str = "working hours";
pub const DELETE: &str = "delete";
pub const PASTE: &str = "paste";
pub const NEXT_CLIP: &str = "next clip";
pub const PREVIOUS_CLIP: &str = "previous clip";

/// Argument payloads for the schedule commands. A single enum keeps the
/// history records uniform; each command checks for its own variant.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandArgs {
    /// `new job` / `edit job` input, and `edit job`'s undo-args
    Fields {
        index: usize,
        name: String,
        hours: f64,
        color: Color,
    },
    /// `paste` input and `new job`'s undo-args
    At { index: usize },
    /// `delete` input
    Cut {
        index: usize,
        new_clip: bool,
        prepend: bool,
    },
    /// `delete`'s undo-args: the job itself plus how it entered the clip
    CutJob {
        index: usize,
        job: Job,
        new_clip: bool,
        prepend: bool,
    },
    /// `paste`'s undo-args: the span the clip occupied
    Span { index: usize, len: usize },
    /// `working hours` input and undo-args; `hours: None` clears
    Hours { date: String, hours: Option<f64> },
    /// Rotation commands carry nothing
    Empty,
}

/// Build the command table for a schedule session
pub fn registry() -> History<ScheduleState, CommandArgs> {
    let mut history = History::new();
    history.register(NEW_JOB, new_job, new_job_undo);
    history.register(EDIT_JOB, edit_job, edit_job);
    history.register(WORKING_HOURS, working_hours, working_hours);
    history.register(DELETE, delete, delete_undo);
    history.register(PASTE, paste, paste_undo);
    history.register(NEXT_CLIP, next_clip, previous_clip);
    history.register(PREVIOUS_CLIP, previous_clip, next_clip);
    history
}

fn mismatch(name: &'static str) -> CommandError {
    CommandError::new(format!("command {name:?} called with mismatched arguments"))
}

fn no_job_at(index: usize) -> CommandError {
    CommandError::new(format!("no job at index {index}"))
}

// ---------------------------------------------------------------------------
// new job
// ---------------------------------------------------------------------------

/// Insert a job and move the cursor past it. The undo-args record where it
/// actually landed (insertion clamps to the list length).
fn new_job(state: &mut ScheduleState, args: &CommandArgs) -> Result<CommandArgs, CommandError> {
    let CommandArgs::Fields {
        index,
        name,
        hours,
        color,
    } = args
    else {
        return Err(mismatch(NEW_JOB));
    };
    let at = state
        .schedule
        .insert(*index, Job::new(name.clone(), *hours, *color));
    state.schedule.cursor = at + 1;
    Ok(CommandArgs::At { index: at })
}

fn new_job_undo(state: &mut ScheduleState, args: &CommandArgs) -> Result<CommandArgs, CommandError> {
    let CommandArgs::At { index } = args else {
        return Err(mismatch(NEW_JOB));
    };
    state.schedule.remove(*index).ok_or_else(|| no_job_at(*index))?;
    state.schedule.cursor = *index;
    Ok(CommandArgs::Empty)
}

// ---------------------------------------------------------------------------
// edit job
// ---------------------------------------------------------------------------

/// Involution: swaps the job's fields with the given ones and returns the
/// previous fields, so running it again with its own result undoes it.
fn edit_job(state: &mut ScheduleState, args: &CommandArgs) -> Result<CommandArgs, CommandError> {
    let CommandArgs::Fields {
        index,
        name,
        hours,
        color,
    } = args
    else {
        return Err(mismatch(EDIT_JOB));
    };
    let job = state
        .schedule
        .list
        .get_mut(*index)
        .ok_or_else(|| no_job_at(*index))?;
    let previous = CommandArgs::Fields {
        index: *index,
        name: std::mem::replace(&mut job.name, name.clone()),
        hours: std::mem::replace(&mut job.hours, *hours),
        color: std::mem::replace(&mut job.color, *color),
    };
    Ok(previous)
}

// ---------------------------------------------------------------------------
// working hours
// ---------------------------------------------------------------------------

/// Involution: sets or clears the override for a date and returns the
/// previous value (`None` = no override) under the canonical date text.
fn working_hours(state: &mut ScheduleState, args: &CommandArgs) -> Result<CommandArgs, CommandError> {
    let CommandArgs::Hours { date, hours } = args else {
        return Err(mismatch(WORKING_HOURS));
    };
    let day = dates::parse(date)
        .ok_or_else(|| CommandError::new(format!("unrecognized date {date:?}")))?;
    let previous = match hours {
        None => state.hours.clear(day),
        Some(h) => state.hours.set(day, state.config.quantize(*h)),
    };
    Ok(CommandArgs::Hours {
        date: dates::format(day),
        hours: previous,
    })
}

// ---------------------------------------------------------------------------
// delete / paste
// ---------------------------------------------------------------------------

/// Remove the job at `index` into the clip stack: onto a fresh clip when
/// `new_clip` (or when the stack is empty), prepended when deleting
/// backward so sequential backspaces build the clip in reading order.
fn delete(state: &mut ScheduleState, args: &CommandArgs) -> Result<CommandArgs, CommandError> {
    let CommandArgs::Cut {
        index,
        new_clip,
        prepend,
    } = args
    else {
        return Err(mismatch(DELETE));
    };
    let job = state.schedule.remove(*index).ok_or_else(|| no_job_at(*index))?;
    let started_new = *new_clip || state.clips.is_empty();
    if started_new {
        state.clips.start_clip();
    }
    let clip = state
        .clips
        .top_mut()
        .ok_or_else(|| CommandError::new("clip stack unavailable"))?;
    if *prepend {
        clip.insert(0, job.clone());
    } else {
        clip.push(job.clone());
    }
    Ok(CommandArgs::CutJob {
        index: *index,
        job,
        new_clip: started_new,
        prepend: *prepend,
    })
}

/// Takes the job back out of the same end of the top clip it entered, then
/// reinserts it. Pops the clip entirely when the delete created it.
fn delete_undo(state: &mut ScheduleState, args: &CommandArgs) -> Result<CommandArgs, CommandError> {
    let CommandArgs::CutJob {
        index,
        job,
        new_clip,
        prepend,
    } = args
    else {
        return Err(mismatch(DELETE));
    };
    if *new_clip {
        state.clips.pop_clip();
    } else if let Some(clip) = state.clips.top_mut() {
        if *prepend {
            if !clip.is_empty() {
                clip.remove(0);
            }
        } else {
            clip.pop();
        }
    }
    state.schedule.insert(*index, job.clone());
    Ok(CommandArgs::Empty)
}

/// Pop the top clip and splice its jobs into the list at `index`
fn paste(state: &mut ScheduleState, args: &CommandArgs) -> Result<CommandArgs, CommandError> {
    let CommandArgs::At { index } = args else {
        return Err(mismatch(PASTE));
    };
    let clip = state
        .clips
        .pop_clip()
        .ok_or_else(|| CommandError::new("the clip stack is empty"))?;
    let len = clip.len();
    let at = (*index).min(state.schedule.list.len());
    state.schedule.list.splice(at..at, clip);
    Ok(CommandArgs::Span { index: at, len })
}

/// Extract exactly the pasted span back into a new top clip
fn paste_undo(state: &mut ScheduleState, args: &CommandArgs) -> Result<CommandArgs, CommandError> {
    let CommandArgs::Span { index, len } = args else {
        return Err(mismatch(PASTE));
    };
    let start = (*index).min(state.schedule.list.len());
    let end = (start + len).min(state.schedule.list.len());
    let clip: Vec<Job> = state.schedule.list.drain(start..end).collect();
    state.clips.push_clip(clip);
    Ok(CommandArgs::Empty)
}

// ---------------------------------------------------------------------------
// clip rotation
// ---------------------------------------------------------------------------

/// Bring the bottom clip to the top. Inverse of `previous_clip`.
fn next_clip(state: &mut ScheduleState, args: &CommandArgs) -> Result<CommandArgs, CommandError> {
    let CommandArgs::Empty = args else {
        return Err(mismatch(NEXT_CLIP));
    };
    state.clips.rotate_up();
    Ok(CommandArgs::Empty)
}

/// Send the top clip to the bottom. Inverse of `next_clip`.
fn previous_clip(state: &mut ScheduleState, args: &CommandArgs) -> Result<CommandArgs, CommandError> {
    let CommandArgs::Empty = args else {
        return Err(mismatch(PREVIOUS_CLIP));
    };
    state.clips.rotate_down();
    Ok(CommandArgs::Empty)
}
