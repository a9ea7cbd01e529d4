//! Command-line interface for Team Roster

pub mod serve;

use clap::{Parser, Subcommand};

/// Team Roster - users, teams and memberships over HTTP
#[derive(Parser)]
#[command(name = "team-roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(serve::ServeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseMode;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from(["team-roster", "serve", "--mode", "test", "--port", "9000"])
            .unwrap();

        let Command::Serve(args) = cli.command;
        assert_eq!(args.mode, Some(DatabaseMode::Test));
        assert_eq!(args.port, Some(9000));
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["team-roster", "serve"]).unwrap();

        let Command::Serve(args) = cli.command;
        assert!(args.mode.is_none());
        assert!(args.port.is_none());
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["team-roster", "serve", "--mode", "staging"]).is_err());
    }
}
