use clap::{Parser, Subcommand};

/// Command-line interface definition for rClock
/// Terminal digital clock with cloud-synced display preferences
#[derive(Parser)]
#[command(
    name = "rclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A digital clock for the terminal with synced display preferences",
    long_about = None
)]
pub struct Cli {
    /// Override the local cloud database path (useful for tests or multiple profiles)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Disable ANSI colours in the output
    #[arg(global = true, long = "no-color")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the local cloud database
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

    /// Sign in
    Login {
        #[arg(long = "email", help = "Account email (default: default_email from config)")]
        email: Option<String>,

        #[arg(long = "avatar", help = "Avatar URL shown next to the email")]
        avatar: Option<String>,
    },

    /// Sign out
    Logout,

    /// Render the current screen once
    Show,

    /// Run the live clock, redrawing once per tick
    Watch {
        #[arg(long = "ticks", help = "Stop after this many frames (default: run until interrupted)")]
        ticks: Option<u64>,

        #[arg(long = "no-clear", help = "Do not clear the terminal between frames")]
        no_clear: bool,
    },

    /// Set a display preference
    Set {
        /// Preference: format24h, seconds or date
        field: String,

        /// on or off
        value: String,
    },

    /// Flip a display preference
    Toggle {
        /// Preference: format24h, seconds or date
        field: String,
    },

    /// Manage the subscription of the signed-in account
    Subscribe,

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
