//! Tally - a local daily habit tracker
//!
//! CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use tally::config::Config;
use tally::storage::FilePrefStore;

/// Tally - a local daily habit tracker
#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a habit
    Add {
        /// Habit name
        name: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Remove a habit and its tracking state
    Rm {
        /// Habit name or id
        habit: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Mark a habit done (or undo it)
    Done {
        /// Habit name or id
        habit: String,
        /// Unmark instead of mark
        #[arg(long, short)]
        undo: bool,
        /// Target date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Clear today's checkmarks for every habit
    Reset {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show today's habits with progress
    List {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show per-day completion summaries over a range
    History {
        /// Trailing range in days, ending today
        #[arg(long, short)]
        last: Option<u32>,
        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Skip days with zero completions
        #[arg(long)]
        active_only: bool,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show the per-habit breakdown for one date
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show the month calendar grid
    Calendar {
        /// Target month (YYYY-MM); defaults to the current month
        #[arg(long, short)]
        month: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show the trailing 90-day heatmap
    Heatmap {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show progress, achievements, and weekly insights
    Stats {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Write the weekly report to a file
    Export {
        /// Destination directory; defaults to the current directory
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Manage the daily reminder
    Remind {
        /// Action to perform
        #[command(subcommand)]
        action: RemindAction,
        /// Output as JSON
        #[arg(long, short, global = true)]
        json: bool,
        /// Suppress output
        #[arg(long, short, global = true)]
        quiet: bool,
    },
}

#[derive(Subcommand)]
enum RemindAction {
    /// Show the current reminder settings
    Show,
    /// Enable the daily reminder
    On {
        /// Reminder time (HH:MM); keeps the stored time when absent
        #[arg(long)]
        time: Option<String>,
    },
    /// Disable the daily reminder
    Off,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("tally error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Run a prepared command and print its formatted output.
macro_rules! dispatch {
    ($cmd:expr, $options:expr, $run:expr) => {{
        let cmd = $cmd;
        let options = $options;
        let output = $run(&cmd, &options);
        let formatted = cmd.format_output(&output, &options);
        if !formatted.is_empty() {
            print!("{}", formatted);
        }
        Ok(success_to_exit_code(output.success))
    }};
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load();
    let store = FilePrefStore::new()?;

    use tally::cli::add::{AddCommand, AddOptions};
    use tally::cli::calendar::{CalendarCommand, CalendarOptions};
    use tally::cli::day::{DayCommand, DayOptions};
    use tally::cli::done::{DoneCommand, DoneOptions};
    use tally::cli::export::{ExportCommand, ExportOptions};
    use tally::cli::heatmap::{HeatmapCommand, HeatmapOptions};
    use tally::cli::history::{HistoryCommand, HistoryOptions};
    use tally::cli::list::{ListCommand, ListOptions};
    use tally::cli::remind::{RemindAction as RemindActionLib, RemindCommand, RemindOptions};
    use tally::cli::reset::{ResetCommand, ResetOptions};
    use tally::cli::rm::{RmCommand, RmOptions};
    use tally::cli::stats::{StatsCommand, StatsOptions};

    match cli.command {
        Commands::Add { name, json, quiet } => dispatch!(
            AddCommand::new(store, config),
            AddOptions { json, quiet },
            |cmd: &AddCommand<_>, options| cmd.run(&name, options)
        ),
        Commands::Rm { habit, json, quiet } => dispatch!(
            RmCommand::new(store, config),
            RmOptions { json, quiet },
            |cmd: &RmCommand<_>, options| cmd.run(&habit, options)
        ),
        Commands::Done {
            habit,
            undo,
            date,
            json,
            quiet,
        } => dispatch!(
            DoneCommand::new(store, config),
            DoneOptions {
                json,
                quiet,
                undo,
                date,
            },
            |cmd: &DoneCommand<_>, options| cmd.run(&habit, options)
        ),
        Commands::Reset { json, quiet } => dispatch!(
            ResetCommand::new(store, config),
            ResetOptions { json, quiet },
            |cmd: &ResetCommand<_>, options| cmd.run(options)
        ),
        Commands::List { json, quiet } => dispatch!(
            ListCommand::new(store, config),
            ListOptions { json, quiet },
            |cmd: &ListCommand<_>, options| cmd.run(options)
        ),
        Commands::History {
            last,
            from,
            to,
            active_only,
            json,
            quiet,
        } => dispatch!(
            HistoryCommand::new(store, config),
            HistoryOptions {
                json,
                quiet,
                last,
                from,
                to,
                active_only,
            },
            |cmd: &HistoryCommand<_>, options| cmd.run(options)
        ),
        Commands::Day { date, json, quiet } => dispatch!(
            DayCommand::new(store, config),
            DayOptions { json, quiet },
            |cmd: &DayCommand<_>, options| cmd.run(&date, options)
        ),
        Commands::Calendar { month, json, quiet } => dispatch!(
            CalendarCommand::new(store, config),
            CalendarOptions { json, quiet, month },
            |cmd: &CalendarCommand<_>, options| cmd.run(options)
        ),
        Commands::Heatmap { json, quiet } => dispatch!(
            HeatmapCommand::new(store, config),
            HeatmapOptions { json, quiet },
            |cmd: &HeatmapCommand<_>, options| cmd.run(options)
        ),
        Commands::Stats { json, quiet } => dispatch!(
            StatsCommand::new(store, config),
            StatsOptions { json, quiet },
            |cmd: &StatsCommand<_>, options| cmd.run(options)
        ),
        Commands::Export { out, json, quiet } => dispatch!(
            ExportCommand::new(store, config),
            ExportOptions { json, quiet, out },
            |cmd: &ExportCommand<_>, options| cmd.run(options)
        ),
        Commands::Remind {
            action,
            json,
            quiet,
        } => {
            let (lib_action, time) = match action {
                RemindAction::Show => (RemindActionLib::Show, None),
                RemindAction::On { time } => (RemindActionLib::On, time),
                RemindAction::Off => (RemindActionLib::Off, None),
            };
            dispatch!(
                RemindCommand::new(store, config),
                RemindOptions { json, quiet, time },
                |cmd: &RemindCommand<_>, options| cmd.run(lib_action, options)
            )
        }
    }
}
