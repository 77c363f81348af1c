use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dp", about = concat!("[=] dayplan v", env!("CARGO_PKG_VERSION"), " - your week on one sheet"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $DAYPLAN_DIR, else ./.dayplan)
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the schedule sheet
    Show,
    /// Insert a job at the cursor
    Add(AddArgs),
    /// Edit a job's fields
    Edit(EditArgs),
    /// Set or clear a date's hour budget, or list the overrides
    Hours(HoursArgs),
    /// Show, set, or shift the schedule start date
    Start(StartArgs),
    /// Print the palette legend
    Legend,
    /// Write the schedule as JSON to a file or stdout
    Export(ExportArgs),
    /// Replace the schedule from an exported JSON file
    Import(ImportArgs),
    /// Interactive editing session (cut/paste and undo live here)
    Session,
}

// ---------------------------------------------------------------------------
// Args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Job name
    pub name: String,
    /// Duration in hours (rounded to the unit)
    pub hours: f64,
    /// Palette color (default: one that differs from its neighbors)
    #[arg(long)]
    pub color: Option<String>,
    /// Insert position (default: the cursor)
    #[arg(long)]
    pub at: Option<usize>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Index of the job to edit (default: the cursor)
    pub index: Option<usize>,
    /// New name (default: unchanged)
    #[arg(long)]
    pub name: Option<String>,
    /// New duration in hours (default: unchanged)
    #[arg(long)]
    pub hours: Option<f64>,
    /// New palette color (default: unchanged)
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct HoursArgs {
    /// Date: YYYY-MM-DD, mm/dd, or mm/dd/yyyy. Omit to list overrides.
    pub date: Option<String>,
    /// Hour budget for that date (rounded to the unit)
    pub hours: Option<f64>,
    /// Remove the override instead of setting one
    #[arg(long, conflicts_with = "hours")]
    pub clear: bool,
}

#[derive(Args)]
pub struct StartArgs {
    /// New start date. Omit to show the current one.
    pub date: Option<String>,
    /// Move the start one day later
    #[arg(long, conflicts_with = "date")]
    pub later: bool,
    /// Move the start one day earlier
    #[arg(long, conflicts_with_all = ["date", "later"])]
    pub earlier: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    pub file: Option<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Input file of previously exported JSON
    pub file: String,
}
