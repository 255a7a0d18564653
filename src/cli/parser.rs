use crate::export::ExportFormat;
use crate::models::SessionField;
use clap::{Parser, Subcommand};

/// Command-line interface definition for tasktracker
/// CLI application to track freelance work sessions and earnings with SQLite
#[derive(Parser)]
#[command(
    name = "tasktracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple work session tracker: live timer, manual entries and earnings using SQLite",
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

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            requires = "edit_config",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
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
    },

    /// Run the live timer and save the session when it is stopped
    Track {
        #[arg(long, help = "Session title (asked after stopping if omitted)")]
        title: Option<String>,

        #[arg(long, help = "Session description")]
        description: Option<String>,

        #[arg(long, help = "Hourly rate (falls back to default_hourly_rate)")]
        rate: Option<String>,
    },

    /// Record a finished session by hand
    Add {
        #[arg(long, help = "Session title")]
        title: String,

        #[arg(long, help = "Session description")]
        description: Option<String>,

        /// Start time (YYYY-MM-DD HH:MM:SS)
        #[arg(long, value_name = "TIMESTAMP")]
        start: String,

        /// End time (YYYY-MM-DD HH:MM:SS)
        #[arg(long, value_name = "TIMESTAMP")]
        end: String,

        #[arg(long, help = "Hourly rate (falls back to default_hourly_rate)")]
        rate: Option<String>,
    },

    /// List sessions, most recently ended first
    List {
        /// Filter by period.
        ///
        /// Supported formats:
        /// - YYYY                  → entire year (e.g. "2025")
        /// - YYYY-MM              → entire month (e.g. "2025-06")
        /// - YYYY-MM-DD           → specific day (e.g. "2025-06-18")
        ///
        /// Ranges (start:end) in the same format:
        /// - YYYY:YYYY            → year range           (e.g. "2024:2025")
        /// - YYYY-MM:YYYY-MM      → month range          (e.g. "2025-06:2025-08")
        /// - YYYY-MM-DD:YYYY-MM-DD→ day range           (e.g. "2025-06-01:2025-06-10")
        ///
        /// If omitted (or "all"), every session is listed.
        #[arg(
            long,
            short,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range"
        )]
        range: Option<String>,
    },

    /// Show every field of one session
    Show {
        /// Session id
        id: i64,
    },

    /// Edit one field of a session; duration and earnings follow
    Edit {
        /// Session id
        id: i64,

        #[arg(long, value_enum)]
        field: SessionField,

        #[arg(long, help = "New value (timestamps as YYYY-MM-DD HH:MM:SS)")]
        value: String,

        #[arg(long, short = 'y', help = "Apply without asking for confirmation")]
        yes: bool,
    },

    /// Delete a work session by ID
    Del {
        /// Session id
        id: i64,

        #[arg(long, short = 'y', help = "Delete without asking for confirmation")]
        yes: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Compress the backup into a zip archive")]
        compress: bool,
    },

    /// Export work session data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Output file (absolute path)")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite output file without confirmation")]
        force: bool,
    },
}
