use crate::export::ExportFormat;
use crate::models::{FilterPreset, Language, SortField, SortOrder};
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rWorklog
/// CLI application to record work entries, overtime and earnings with SQLite
#[derive(Parser)]
#[command(
    name = "rworklog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple work log CLI: record work entries, overtime and earnings using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Entry selection shared by `list`, `summary` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    #[arg(
        long,
        short,
        visible_alias = "range",
        value_name = "RANGE",
        help = "Year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, A:B, all)"
    )]
    pub period: Option<String>,

    #[arg(long, value_enum, help = "Relative date window (default from config)")]
    pub filter: Option<FilterPreset>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Only entries on or after this date")]
    pub from: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Only entries on or before this date")]
    pub to: Option<String>,

    #[arg(long, value_name = "N", help = "Only entries in this ISO week number")]
    pub week: Option<u32>,

    #[arg(long, short, help = "Case-insensitive text search in both comments")]
    pub search: Option<String>,

    #[arg(long, help = "Only entries in weeks exceeding the weekly hours")]
    pub overtime: bool,

    #[arg(long, help = "Only entries with a photo")]
    pub photos: bool,

    #[arg(long, value_enum, help = "Sort field (default from config)")]
    pub sort: Option<SortField>,

    #[arg(long, value_enum, help = "Sort order (default from config)")]
    pub order: Option<SortOrder>,
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the live timer
    Start {
        #[arg(long = "en", help = "Comment (English)")]
        comment_en: Option<String>,

        #[arg(long = "nl", help = "Comment (Dutch)")]
        comment_nl: Option<String>,
    },
    /// Stop the timer and store the entry
    Stop,
    /// Show the running timer
    Status,
    /// Discard the running timer
    Cancel,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check, migrate, edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields and bad values")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing keys with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,

        #[arg(long = "set", value_name = "KEY=VALUE", help = "Update a single configuration key")]
        set: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long, value_name = "N", help = "Only the last N rows")]
        limit: Option<usize>,
    },

    /// Add a work entry
    Add {
        /// Date of the entry (YYYY-MM-DD or `today`)
        date: String,

        #[arg(long = "in", help = "Start time (HH:MM)")]
        start: String,

        #[arg(long = "out", help = "End time (HH:MM)")]
        end: String,

        #[arg(long = "en", help = "Comment (English)")]
        comment_en: Option<String>,

        #[arg(long = "nl", help = "Comment (Dutch)")]
        comment_nl: Option<String>,

        #[arg(long, help = "Photo reference (path or URI)")]
        photo: Option<String>,

        #[arg(long, help = "Materials cost")]
        cost: Option<f64>,
    },

    /// Edit a work entry by ID
    Edit {
        id: i64,

        #[arg(long, help = "New date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "in", help = "New start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "out", help = "New end time (HH:MM)")]
        end: Option<String>,

        #[arg(long = "en", help = "New English comment")]
        comment_en: Option<String>,

        #[arg(long = "nl", help = "New Dutch comment")]
        comment_nl: Option<String>,

        #[arg(long, conflicts_with = "clear_photo", help = "New photo reference")]
        photo: Option<String>,

        #[arg(long = "clear-photo", help = "Remove the photo reference")]
        clear_photo: bool,

        #[arg(long, help = "New materials cost")]
        cost: Option<f64>,
    },

    /// Delete a work entry by ID
    Del {
        id: i64,

        #[arg(long, short, help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List work entries
    List {
        #[command(flatten)]
        selection: SelectionArgs,

        #[arg(long, value_enum, ignore_case = true, help = "Comment language (default from config)")]
        lang: Option<Language>,

        #[arg(long = "details", help = "Show both comments, photo and timestamps")]
        details: bool,
    },

    /// Hours, overtime and earnings for a selection
    Summary {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Live timer
    Timer {
        #[command(subcommand)]
        action: TimerAction,
    },

    /// Export work entries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute output path")]
        file: String,

        #[command(flatten)]
        selection: SelectionArgs,

        #[arg(long, short = 'f', help = "Overwrite without asking")]
        force: bool,
    },

    /// Write a JSON backup of all entries
    Backup {
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long)]
        compress: bool,
    },

    /// Restore entries from a JSON (or zipped JSON) backup
    Restore {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Append to the stored entries instead of replacing them")]
        merge: bool,

        #[arg(long, short, help = "Do not ask for confirmation")]
        yes: bool,
    },
}
