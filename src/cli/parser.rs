use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface of workhours:
/// start/stop work rounds per working group and inspect the totals
#[derive(Parser)]
#[command(
    name = "workhours",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track work rounds per working group with SQLite, from the terminal or over HTTP",
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

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start a new round for a working group
    Start {
        #[arg(long = "group", help = "Working group id (default: first group by name)")]
        group: Option<String>,
    },

    /// Stop the running round of a working group
    Stop {
        #[arg(long = "group", help = "Working group id (default: first group by name)")]
        group: Option<String>,
    },

    /// Show whether a group is running and its totals
    Status {
        #[arg(long = "group", help = "Working group id (default: first group by name)")]
        group: Option<String>,
    },

    /// Delete every round of a working group
    Reset {
        #[arg(long = "group", help = "Working group id")]
        group: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Manage working groups
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },

    /// Daily summaries and per-group totals
    Stats {
        #[arg(long = "group", help = "Working group id (default: first group by name)")]
        group: Option<String>,
    },

    /// Export rounds to CSV or JSON
    Export {
        #[arg(long = "format", value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long = "file", help = "Absolute path of the output file")]
        file: String,

        #[arg(long = "group", help = "Limit the export to one working group id")]
        group: Option<String>,

        #[arg(long = "force", help = "Overwrite the output file without asking")]
        force: bool,
    },

    /// Run the HTTP/JSON server
    Serve {
        #[arg(long = "addr", help = "Listen address (default from config or SERVER_ADDR)")]
        addr: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum GroupAction {
    /// List working groups with their overall totals
    List,

    /// Create a working group
    Add { name: String },

    /// Rename a working group
    Rename { id: String, name: String },

    /// Delete a working group without rounds
    Del { id: String },
}
