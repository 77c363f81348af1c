use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::cli::commands::{
    AddArgs, Cli, Commands, EditArgs, ExportArgs, HoursArgs, ImportArgs, StartArgs,
};
use crate::cli::{output, session};
use crate::commands::{self, CommandArgs};
use crate::history::{CommandError, History, HistoryError};
use crate::io::config_io::{self, ConfigError};
use crate::io::snapshot;
use crate::io::store::{FileStore, KvStore};
use crate::model::{contrasting_color, Color, ScheduleState};
use crate::util::dates;

/// Error type for the CLI surface
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Usage(String),
}

fn usage(message: impl Into<String>) -> CliError {
    CliError::Usage(message.into())
}

const SCHEDULE_KEY: &str = "schedule";

/// A loaded schedule plus its command history and backing store. One-shot
/// subcommands open it, apply one operation, and drop it; the interactive
/// session keeps it alive so undo and the clip stack mean something.
pub struct App {
    pub state: ScheduleState,
    pub history: History<ScheduleState, CommandArgs>,
    pub store: FileStore,
    pub storage_ok: bool,
}

impl App {
    pub fn open(dir: &Path) -> Result<App, CliError> {
        let config = config_io::read_config(dir)?;
        let store = FileStore::open(dir);
        let storage_ok = store.available();
        let mut state = ScheduleState::new(config, Local::now().date_naive());
        if let Some(text) = store.get(SCHEDULE_KEY) {
            snapshot::restore(&mut state, &text);
        }
        Ok(App {
            state,
            history: commands::registry(),
            store,
            storage_ok,
        })
    }

    /// Fire-and-forget snapshot write; failure only dims the signal
    pub fn save(&mut self) {
        if self.storage_ok {
            self.storage_ok = self
                .store
                .set(SCHEDULE_KEY, &snapshot::serialize(&self.state));
        }
    }

    /// Run a command through the history and persist on success
    pub fn perform(&mut self, name: &str, args: CommandArgs) -> Result<(), HistoryError> {
        self.history.perform(&mut self.state, name, args)?;
        self.save();
        Ok(())
    }

    pub fn undo(&mut self) -> Result<bool, CommandError> {
        let undone = self.history.undo(&mut self.state)?;
        if undone {
            self.save();
        }
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, CommandError> {
        let redone = self.history.redo(&mut self.state)?;
        if redone {
            self.save();
        }
        Ok(redone)
    }

    pub fn today(&self) -> chrono::NaiveDate {
        Local::now().date_naive()
    }
}

fn data_dir(flag: Option<String>) -> PathBuf {
    flag.map(PathBuf::from)
        .or_else(|| std::env::var_os("DAYPLAN_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(".dayplan"))
}

pub fn dispatch(cli: Cli) -> Result<(), CliError> {
    let dir = data_dir(cli.dir);
    let mut app = App::open(&dir)?;
    if !app.storage_ok {
        eprintln!(
            "warning: {} is not writable; changes will not be saved",
            dir.display()
        );
    }
    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => cmd_show(&app),
        Commands::Add(args) => cmd_add(&mut app, args),
        Commands::Edit(args) => cmd_edit(&mut app, args),
        Commands::Hours(args) => cmd_hours(&mut app, args),
        Commands::Start(args) => cmd_start(&mut app, args),
        Commands::Legend => {
            print!("{}", output::render_legend(&app.state));
            Ok(())
        }
        Commands::Export(args) => cmd_export(&app, args),
        Commands::Import(args) => cmd_import(&mut app, args),
        Commands::Session => session::run(&mut app),
    }
}

fn cmd_show(app: &App) -> Result<(), CliError> {
    print!("{}", output::render_schedule(&app.state));
    Ok(())
}

/// Resolve a color name from the CLI, or pick a contrasting one
fn resolve_color(
    name: Option<&str>,
    state: &ScheduleState,
    index: usize,
) -> Result<Color, CliError> {
    match name {
        Some(text) => Color::from_name(text)
            .ok_or_else(|| usage(format!("unknown color {text:?} (see `dp legend`)"))),
        None => Ok(contrasting_color(&state.schedule.list, index)),
    }
}

fn require_hours(hours: f64) -> Result<f64, CliError> {
    if hours < 0.0 {
        Err(usage("hours must be non-negative"))
    } else {
        Ok(hours)
    }
}

fn cmd_add(app: &mut App, args: AddArgs) -> Result<(), CliError> {
    let index = args.at.unwrap_or(app.state.schedule.cursor);
    let color = resolve_color(args.color.as_deref(), &app.state, index)?;
    let hours = app.state.config.quantize(require_hours(args.hours)?);
    app.perform(
        commands::NEW_JOB,
        CommandArgs::Fields {
            index,
            name: args.name,
            hours,
            color,
        },
    )?;
    cmd_show(app)
}

fn cmd_edit(app: &mut App, args: EditArgs) -> Result<(), CliError> {
    let index = args.index.unwrap_or(app.state.schedule.cursor);
    let job = app
        .state
        .schedule
        .list
        .get(index)
        .ok_or_else(|| usage(format!("no job at index {index}")))?
        .clone();
    let color = match args.color.as_deref() {
        Some(text) => Color::from_name(text)
            .ok_or_else(|| usage(format!("unknown color {text:?} (see `dp legend`)")))?,
        None => job.color,
    };
    let hours = match args.hours {
        Some(h) => app.state.config.quantize(require_hours(h)?),
        None => job.hours,
    };
    app.perform(
        commands::EDIT_JOB,
        CommandArgs::Fields {
            index,
            name: args.name.unwrap_or(job.name),
            hours,
            color,
        },
    )?;
    cmd_show(app)
}

fn cmd_hours(app: &mut App, args: HoursArgs) -> Result<(), CliError> {
    let Some(date_text) = args.date else {
        if app.state.hours.is_empty() {
            println!("no overrides");
        }
        for (date, hours) in app.state.hours.iter() {
            println!("{} {}", dates::format(date), hours);
        }
        return Ok(());
    };
    let date = dates::parse_input(&date_text, app.today())
        .ok_or_else(|| usage(format!("unrecognized date {date_text:?}")))?;
    let hours = match (args.hours, args.clear) {
        (_, true) => None,
        (Some(h), false) => Some(require_hours(h)?),
        (None, false) => return Err(usage("give an hour budget, or --clear")),
    };
    app.perform(
        commands::WORKING_HOURS,
        CommandArgs::Hours {
            date: dates::format(date),
            hours,
        },
    )?;
    cmd_show(app)
}

fn cmd_start(app: &mut App, args: StartArgs) -> Result<(), CliError> {
    if let Some(text) = args.date {
        let date = dates::parse_input(&text, app.today())
            .ok_or_else(|| usage(format!("unrecognized date {text:?}")))?;
        app.state.schedule.start = date;
        app.save();
    } else if args.later || args.earlier {
        app.state
            .schedule
            .shift_start(if args.later { 1 } else { -1 });
        app.save();
    }
    println!("start {}", dates::format(app.state.schedule.start));
    Ok(())
}

fn cmd_export(app: &App, args: ExportArgs) -> Result<(), CliError> {
    let text = snapshot::serialize(&app.state);
    match args.file {
        Some(path) => {
            fs::write(&path, &text)?;
            println!("wrote {path}");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Import replaces the whole state, so the old history and clips no longer
/// describe anything real; both reset.
fn cmd_import(app: &mut App, args: ImportArgs) -> Result<(), CliError> {
    let text = fs::read_to_string(&args.file)?;
    if !snapshot::restore(&mut app.state, &text) {
        return Err(usage(format!("{} is not an exported schedule", args.file)));
    }
    app.history.clear();
    app.state.clips.clear();
    app.save();
    cmd_show(app)
}
