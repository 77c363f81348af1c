//! The interactive session: a line-oriented loop that keeps History and
//! the clip stack alive between commands, which is what makes cut/paste
//! and undo/redo usable. Clips and history die with the session; only the
//! schedule itself is persisted.

use std::io::{self, BufRead, Write};

use crate::cli::handlers::{App, CliError};
use crate::cli::output;
use crate::commands::{self, CommandArgs};
use crate::model::{contrasting_color, Color};
use crate::util::dates;

pub fn run(app: &mut App) -> Result<(), CliError> {
    println!("dayplan session (? for help, q to quit)");
    if !app.storage_ok {
        println!("(storage unavailable; this session will not be saved)");
    }
    redraw(app);

    let stdin = io::stdin();
    // Consecutive deletions share a clip; anything else breaks the run
    let mut was_deletion = false;
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((v, r)) => (v, r.trim()),
            None => (line, ""),
        };
        if matches!(verb, "q" | "quit") {
            break;
        }
        match step(app, verb, rest, was_deletion) {
            Ok(Outcome::Redraw) => {
                redraw(app);
                was_deletion = false;
            }
            Ok(Outcome::Deleted) => {
                redraw(app);
                was_deletion = true;
            }
            Ok(Outcome::Quiet) => {
                was_deletion = false;
            }
            Err(e) => println!("error: {e}"),
        }
    }
    Ok(())
}

enum Outcome {
    Redraw,
    Deleted,
    Quiet,
}

fn redraw(app: &App) {
    print!("{}", output::render_schedule(&app.state));
    if !app.state.clips.is_empty() {
        print!("{}", output::render_clips(&app.state));
    }
}

fn step(app: &mut App, verb: &str, rest: &str, was_deletion: bool) -> Result<Outcome, CliError> {
    match verb {
        "?" | "help" => {
            print_help();
            Ok(Outcome::Quiet)
        }
        "s" | "show" => Ok(Outcome::Redraw),
        "legend" => {
            print!("{}", output::render_legend(&app.state));
            Ok(Outcome::Quiet)
        }
        "j" | "left" => {
            app.state.schedule.cursor_left();
            Ok(Outcome::Redraw)
        }
        "l" | "right" => {
            app.state.schedule.cursor_right();
            Ok(Outcome::Redraw)
        }
        "J" | "earlier" => {
            app.state.schedule.shift_start(-1);
            app.save();
            Ok(Outcome::Redraw)
        }
        "L" | "later" => {
            app.state.schedule.shift_start(1);
            app.save();
            Ok(Outcome::Redraw)
        }
        "a" | "add" => add_verb(app, rest),
        "e" | "edit" => edit_verb(app, rest),
        "w" | "hours" => hours_verb(app, rest),
        "x" | "del" => delete_verb(app, was_deletion),
        "bs" | "back" => backspace_verb(app, was_deletion),
        "p" | "paste" => paste_verb(app),
        "r" | "pclip" => rotate_verb(app, commands::PREVIOUS_CLIP),
        "R" | "nclip" => rotate_verb(app, commands::NEXT_CLIP),
        "z" | "undo" => {
            if !app.undo()? {
                println!("nothing to undo");
            }
            Ok(Outcome::Redraw)
        }
        "y" | "redo" => {
            if !app.redo()? {
                println!("nothing to redo");
            }
            Ok(Outcome::Redraw)
        }
        _ => Err(CliError::Usage(format!(
            "unknown command {verb:?} (try ?)"
        ))),
    }
}

/// `HOURS [COLOR] NAME…`: everything after the recognized fields is the
/// job name. This is the session's field coercion; the command itself only
/// ever sees literals.
fn parse_fields<'a>(rest: &'a str) -> Result<(f64, Option<Color>, &'a str), CliError> {
    let (hours_text, rest) = match rest.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (rest, ""),
    };
    let hours: f64 = hours_text
        .parse()
        .map_err(|_| CliError::Usage(format!("{hours_text:?} is not an hour count")))?;
    if hours < 0.0 {
        return Err(CliError::Usage("hours must be non-negative".into()));
    }
    match rest.split_once(char::is_whitespace) {
        Some((first, name)) if Color::from_name(first).is_some() => {
            Ok((hours, Color::from_name(first), name.trim()))
        }
        _ if Color::from_name(rest).is_some() => Ok((hours, Color::from_name(rest), "")),
        _ => Ok((hours, None, rest)),
    }
}

fn add_verb(app: &mut App, rest: &str) -> Result<Outcome, CliError> {
    if rest.is_empty() {
        return Err(CliError::Usage("add HOURS [COLOR] NAME".into()));
    }
    let (hours, color, name) = parse_fields(rest)?;
    if name.is_empty() {
        return Err(CliError::Usage("the job needs a name".into()));
    }
    let index = app.state.schedule.cursor;
    let color = color.unwrap_or_else(|| contrasting_color(&app.state.schedule.list, index));
    let hours = app.state.config.quantize(hours);
    app.perform(
        commands::NEW_JOB,
        CommandArgs::Fields {
            index,
            name: name.to_string(),
            hours,
            color,
        },
    )?;
    Ok(Outcome::Redraw)
}

/// Edits the job under the cursor. Omitted color/name keep their values.
fn edit_verb(app: &mut App, rest: &str) -> Result<Outcome, CliError> {
    let index = app.state.schedule.cursor;
    let job = app
        .state
        .schedule
        .list
        .get(index)
        .ok_or_else(|| CliError::Usage("no job under the cursor".into()))?
        .clone();
    if rest.is_empty() {
        return Err(CliError::Usage("edit HOURS [COLOR] [NAME]".into()));
    }
    let (hours, color, name) = parse_fields(rest)?;
    app.perform(
        commands::EDIT_JOB,
        CommandArgs::Fields {
            index,
            name: if name.is_empty() {
                job.name
            } else {
                name.to_string()
            },
            hours: app.state.config.quantize(hours),
            color: color.unwrap_or(job.color),
        },
    )?;
    Ok(Outcome::Redraw)
}

/// `DATE [HOURS]`; no hours clears the override for that date
fn hours_verb(app: &mut App, rest: &str) -> Result<Outcome, CliError> {
    if rest.is_empty() {
        return Err(CliError::Usage("hours DATE [HOURS]".into()));
    }
    let (date_text, rest) = match rest.split_once(char::is_whitespace) {
        Some((d, r)) => (d, r.trim()),
        None => (rest, ""),
    };
    let date = dates::parse_input(date_text, app.today())
        .ok_or_else(|| CliError::Usage(format!("unrecognized date {date_text:?}")))?;
    let hours = if rest.is_empty() {
        None
    } else {
        let h: f64 = rest
            .parse()
            .map_err(|_| CliError::Usage(format!("{rest:?} is not an hour count")))?;
        if h < 0.0 {
            return Err(CliError::Usage("hours must be non-negative".into()));
        }
        Some(h)
    };
    app.perform(
        commands::WORKING_HOURS,
        CommandArgs::Hours {
            date: dates::format(date),
            hours,
        },
    )?;
    Ok(Outcome::Redraw)
}

fn delete_verb(app: &mut App, was_deletion: bool) -> Result<Outcome, CliError> {
    if app.state.schedule.cursor >= app.state.schedule.list.len() {
        return Err(CliError::Usage("no job under the cursor".into()));
    }
    app.perform(
        commands::DELETE,
        CommandArgs::Cut {
            index: app.state.schedule.cursor,
            new_clip: !was_deletion,
            prepend: false,
        },
    )?;
    Ok(Outcome::Deleted)
}

/// Delete the job before the cursor. The cursor step itself is not part of
/// the undoable command, matching plain cursor movement.
fn backspace_verb(app: &mut App, was_deletion: bool) -> Result<Outcome, CliError> {
    if app.state.schedule.cursor == 0 {
        return Err(CliError::Usage("nothing before the cursor".into()));
    }
    app.state.schedule.cursor_left();
    app.perform(
        commands::DELETE,
        CommandArgs::Cut {
            index: app.state.schedule.cursor,
            new_clip: !was_deletion,
            prepend: true,
        },
    )?;
    Ok(Outcome::Deleted)
}

fn paste_verb(app: &mut App) -> Result<Outcome, CliError> {
    if app.state.clips.is_empty() {
        return Err(CliError::Usage("the clip stack is empty".into()));
    }
    app.perform(
        commands::PASTE,
        CommandArgs::At {
            index: app.state.schedule.cursor,
        },
    )?;
    Ok(Outcome::Redraw)
}

fn rotate_verb(app: &mut App, name: &str) -> Result<Outcome, CliError> {
    if app.state.clips.len() < 2 {
        return Err(CliError::Usage("need at least two clips to rotate".into()));
    }
    app.perform(name, CommandArgs::Empty)?;
    Ok(Outcome::Redraw)
}

fn print_help() {
    println!(
        "\
s  show            redraw the sheet          j/l   move cursor left/right
a  add H [C] NAME  insert a job              J/L   start earlier/later
e  edit H [C] [N]  edit the cursor job       x     cut the cursor job
w  hours DATE [H]  set/clear a day budget    bs    cut the job before it
p  paste           paste the top clip        r/R   rotate the clip stack
z  undo            y  redo                   q     quit"
    );
}
