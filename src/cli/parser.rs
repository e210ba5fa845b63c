use crate::core::export::ExportFormat;
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rPonto
/// CLI application to punch in/out and keep the hour bank with SQLite
#[derive(Parser)]
#[command(
    name = "rponto",
    version = env!("CARGO_PKG_VERSION"),
    about = "A time clock CLI: punch in/out with location and keep a daily hour bank using SQLite",
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
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
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

    /// Record a punch (clock in or clock out) at the current position
    #[command(group(ArgGroup::new("direction").required(true).args(["punch_in", "punch_out"])))]
    Punch {
        #[arg(long = "in", help = "Clock in (ENTRADA)")]
        punch_in: bool,

        #[arg(long = "out", help = "Clock out (SAIDA)")]
        punch_out: bool,

        #[arg(long = "lat", allow_hyphen_values = true, help = "Latitude in decimal degrees")]
        lat: Option<f64>,

        #[arg(long = "lon", allow_hyphen_values = true, help = "Longitude in decimal degrees")]
        lon: Option<f64>,

        #[arg(long = "address", help = "Address of the current position")]
        address: Option<String>,

        #[arg(long = "photo", value_name = "FILE", help = "Photo taken for this punch")]
        photo: Option<String>,

        #[arg(
            long = "at",
            value_name = "TIMESTAMP",
            help = "Punch time (RFC3339 or 'YYYY-MM-DD HH:MM[:SS]'), default: now"
        )]
        at: Option<String>,
    },

    /// List day records with their balance
    List {
        #[arg(long = "all", help = "Show every stored day instead of the most recent ones")]
        all: bool,
    },

    /// Show the punches of one day
    Show {
        /// Date of the day (YYYY-MM-DD or 'today')
        date: String,
    },

    /// Change the time of one punch
    #[command(group(ArgGroup::new("target").required(true).args(["index", "id"])))]
    #[command(group(ArgGroup::new("when").required(true).args(["time", "at"])))]
    Edit {
        /// Date of the day (YYYY-MM-DD or 'today')
        date: String,

        #[arg(long = "index", help = "Position of the punch in the day (0-based, see `show`)")]
        index: Option<usize>,

        #[arg(long = "id", help = "Id of the punch")]
        id: Option<String>,

        #[arg(long = "time", help = "New time (HH:MM or HH:MM:SS), same day and offset")]
        time: Option<String>,

        #[arg(long = "at", help = "New full timestamp (may move the punch to another day)")]
        at: Option<String>,
    },

    /// Delete one punch of a day
    Del {
        /// Date of the day (YYYY-MM-DD or 'today')
        date: String,

        #[arg(long = "index", help = "Position of the punch in the day (0-based, see `show`)")]
        index: usize,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Submit or list adjustment requests
    Adjust {
        #[arg(long = "list", help = "List adjustment requests", conflicts_with_all = ["date", "reason", "file", "event"])]
        list: bool,

        #[arg(long = "date", required_unless_present = "list", help = "Day the request refers to")]
        date: Option<String>,

        #[arg(long = "reason", default_value = "", help = "Reason for the adjustment")]
        reason: String,

        #[arg(long = "file", value_name = "FILE", help = "Supporting document")]
        file: Option<String>,

        #[arg(long = "event", value_name = "ID", help = "Id of the punch to adjust")]
        event: Option<String>,
    },

    /// Legacy point list kept by the first version of the app
    Points {
        #[arg(long = "add", help = "Record a legacy point", requires_all = ["lat", "lon"])]
        add: bool,

        #[arg(long = "lat", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long = "lon", allow_hyphen_values = true)]
        lon: Option<f64>,

        #[arg(long = "address")]
        address: Option<String>,

        #[arg(long = "at", value_name = "TIMESTAMP")]
        at: Option<String>,
    },

    /// Convert the legacy point list into day records (one time)
    MigrateLegacy,

    /// Export day records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
