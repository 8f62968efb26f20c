use crate::models::work_type::WorkType;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rAttendance
/// CLI client to check in and out of work sessions
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple attendance CLI: check in, check out and confirm early check-outs against your attendance server",
    long_about = None
)]
pub struct Cli {
    /// Override the attendance server URL
    #[arg(global = true, long = "server")]
    pub server: Option<String>,

    /// Override audit database path (useful for tests or custom DB)
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
    /// Initialize the configuration and the audit database
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
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

    /// Store the access token used for every request
    Login {
        #[arg(long = "token", help = "Bearer token issued by the attendance server")]
        token: String,
    },

    /// Forget the stored access token
    Logout,

    /// Show the current attendance session
    Status {
        #[arg(long = "json", help = "Print the state as JSON")]
        json: bool,
    },

    /// Start a work session
    CheckIn {
        /// Work type (office requires a location fix)
        #[arg(long = "work-type", short = 'w', value_enum)]
        work_type: Option<WorkType>,

        #[arg(
            long = "skip-lunch",
            help = "Work without lunch break (no lunch deduction)"
        )]
        skip_lunch: bool,

        #[arg(
            long = "lat",
            requires = "lon",
            allow_negative_numbers = true,
            help = "Latitude to send instead of the configured location"
        )]
        lat: Option<f64>,

        #[arg(
            long = "lon",
            requires = "lat",
            allow_negative_numbers = true,
            help = "Longitude to send instead of the configured location"
        )]
        lon: Option<f64>,
    },

    /// End the current work session
    CheckOut {
        #[arg(
            long = "skip-lunch",
            help = "Work without lunch break (no lunch deduction)"
        )]
        skip_lunch: bool,

        #[arg(
            long = "memo",
            help = "Justification used if the server asks to confirm an early check-out"
        )]
        memo: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
