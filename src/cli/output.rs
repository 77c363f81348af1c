//! Plain-text rendering of the schedule sheet. One line per day; each
//! piece occupies exactly one text column per duration unit, windowing the
//! job name word by word across its pieces the way a narrow label flows
//! across days.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::model::ScheduleState;
use crate::partition::partition;
use crate::util::dates;

/// Render the full sheet: start line, one line per day, cursor line
pub fn render_schedule(state: &ScheduleState) -> String {
    let days = partition(state);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "start {} ({})",
        dates::format(state.schedule.start),
        state.schedule.start.format("%a")
    );
    if state.schedule.list.is_empty() {
        out.push_str("nothing scheduled\n");
        return out;
    }
    let unit = state.config.unit;
    let mut word_offset = 0;
    for day in &days {
        let mut cells = String::new();
        for piece in &day.pieces {
            if piece.starts {
                word_offset = 0;
            }
            let cols = (piece.hours / unit).round() as usize;
            let (text, next) = window_words(&state.schedule.list[piece.job].name, cols, word_offset);
            word_offset = next;
            let open = if piece.starts { '[' } else { '…' };
            let close = if piece.ends { ']' } else { '…' };
            let mark = if piece.selected { "*" } else { "" };
            let _ = write!(cells, "{open}{text}{close}{mark} ");
        }
        let _ = writeln!(
            out,
            "{:>5} {}  {}",
            dates::format_short(day.date),
            day.date.format("%a"),
            cells.trim_end()
        );
    }
    let _ = writeln!(
        out,
        "cursor {}/{}",
        state.schedule.cursor,
        state.schedule.list.len()
    );
    out
}

/// Render the clip stack, top first (the clip `paste` would consume)
pub fn render_clips(state: &ScheduleState) -> String {
    let mut out = String::new();
    for (i, clip) in state.clips.iter_top_down().enumerate() {
        let names: Vec<&str> = clip.iter().map(|j| j.name.as_str()).collect();
        let _ = writeln!(out, "clip {}: {}", i + 1, names.join(" · "));
    }
    out
}

/// Render the palette legend from the configured colors
pub fn render_legend(state: &ScheduleState) -> String {
    let mut out = String::new();
    for (name, hex) in &state.config.colors {
        let _ = writeln!(out, "{name:<8} {hex}");
    }
    out
}

/// A `cols`-column window of `name`, continuing from `word_offset` words
/// in. Whole words only; the remainder flows into the job's next piece.
/// Returns the padded text and the word offset for that next piece.
fn window_words(name: &str, cols: usize, word_offset: usize) -> (String, usize) {
    let tokens = tokenize(name);
    let mut text = String::new();
    // Resume at the word after the last one shown, keeping its leading space
    let mut i = if word_offset == 0 { 0 } else { 2 * word_offset - 1 };
    while i < tokens.len() {
        if text.width() + tokens[i].width() > cols {
            break;
        }
        text.push_str(tokens[i]);
        i += 1;
    }
    (pad_to(text, cols), i.div_ceil(2))
}

/// Alternating word/whitespace runs; even indices are words. A name that
/// opens with whitespace gets an empty leading word to keep the parity.
fn tokenize(name: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (i, c) in name.char_indices() {
        let space = c.is_whitespace();
        match in_space {
            None => {
                if space {
                    tokens.push(&name[0..0]);
                }
                in_space = Some(space);
            }
            Some(prev) if prev != space => {
                tokens.push(&name[start..i]);
                start = i;
                in_space = Some(space);
            }
            _ => {}
        }
    }
    if !name.is_empty() {
        tokens.push(&name[start..]);
    }
    tokens
}

/// Pad (or truncate) to an exact display width
fn pad_to(mut text: String, cols: usize) -> String {
    while text.width() > cols {
        text.pop();
    }
    let pad = cols - text.width();
    text.extend(std::iter::repeat_n(' ', pad));
    text
}
