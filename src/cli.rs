use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mailform")]
#[command(about = "Compose an email to users picked from a directory")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output options shared by commands that can emit JSON
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every user in the directory
    Users {
        #[command(flatten)]
        output: OutputOptions,
    },

    /// Show users whose name or email contains the query
    Suggest {
        /// Text to match against names and emails (case-insensitive)
        query: String,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Fill in and submit the form in one go
    Send {
        /// Recipient by name or email; repeatable
        #[arg(long = "to", action = clap::ArgAction::Append)]
        to: Vec<String>,

        /// Make every directory user a recipient
        #[arg(long)]
        all: bool,

        /// Message subject
        #[arg(short, long, default_value = "")]
        subject: String,

        /// Message body (10 to 3000 characters)
        #[arg(short, long, default_value = "")]
        description: String,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Open the form as an interactive session on stdin
    #[command(visible_alias = "c")]
    Compose,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        #[command(flatten)]
        output: OutputOptions,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (directory.url, directory.fetch_delay_ms, directory.timeout)
        key: String,
        /// Value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (directory.url, directory.fetch_delay_ms, directory.timeout)
        key: String,
    },
}
