use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// meetslot - turn free-text meeting requests into conflict-free calendar slots
#[derive(Debug, Parser)]
#[command(name = "meetslot")]
#[command(about = "Turn free-text meeting requests into conflict-free calendar slots", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (if not specified, enters interactive terminal mode)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Seed a demo calendar and walk through three sample requests
    Demo {
        /// Write the resulting calendar as JSON
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Suggest slots for a free-text meeting request
    #[command(alias = "req")]
    Request {
        /// Requester name
        #[arg(long)]
        name: String,

        /// Requester email
        #[arg(long)]
        email: String,

        /// The meeting request, e.g. "quick call about the budget"
        #[arg(required = true)]
        message: String,

        /// Book the suggested slot with this number (1-based)
        #[arg(long)]
        confirm: Option<usize>,
    },

    /// Show the demo calendar
    Calendar {
        /// Number of days to show
        #[arg(long, default_value_t = 7)]
        days: u32,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigActions {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let cli = Cli::try_parse_from([
            "meetslot",
            "request",
            "--name",
            "John Smith",
            "--email",
            "john.smith@client.com",
            "quick call about the budget",
            "--confirm",
            "2",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Request { name, email, message, confirm }) => {
                assert_eq!(name, "John Smith");
                assert_eq!(email, "john.smith@client.com");
                assert_eq!(message, "quick call about the budget");
                assert_eq!(confirm, Some(2));
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["meetslot"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["meetslot", "calendar", "--config", "/tmp/c.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Calendar { days: 7 })));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_request_requires_message() {
        assert!(Cli::try_parse_from(["meetslot", "request", "--name", "A", "--email", "a@b.com"]).is_err());
    }
}
