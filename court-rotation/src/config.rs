use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::schedule::{LeftoverPolicy, MatchType};

#[derive(Parser, Debug)]
#[command(name = "court-rotation")]
#[command(about = "Assign players to courts round by round for a match night")]
pub struct Cli {
    /// Directory holding data.json (roster) and scores.csv
    #[arg(long, env = "COURT_ROTATION_DATA", default_value = ".", global = true)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web API
    Serve {
        #[arg(short, long, default_value_t = 8080)]
        port: u16,

        /// Password required for roster edits and session reset
        #[arg(long, env = "ADMIN_PASSWORD", default_value = "admin123", hide_env_values = true)]
        admin_password: String,
    },

    /// Generate rounds from the saved roster and print them
    Schedule {
        #[arg(long, value_enum, default_value_t = MatchTypeArg::Doubles)]
        match_type: MatchTypeArg,

        #[arg(long, value_enum, default_value_t = LeftoverArg::Rest)]
        leftover: LeftoverArg,

        #[arg(short, long, default_value_t = 1)]
        rounds: usize,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Write round_<n>.txt and round_<n>.csv here
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Print the pairing matrix after the last round
        #[arg(long)]
        show_history: bool,
    },

    /// Edit the saved roster
    Roster {
        #[command(subcommand)]
        action: RosterAction,
    },

    /// Record or show scores
    Scores {
        #[command(subcommand)]
        action: ScoresAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum RosterAction {
    AddPlayer { name: String },
    RemovePlayer { name: String },
    RenamePlayer { from: String, to: String },
    /// Move a player from one position to another (0-based)
    MovePlayer { from: usize, to: usize },
    ClearPlayers,
    AddCourt { name: String },
    RemoveCourt { name: String },
    /// Move a court from one position to another (0-based)
    MoveCourt { from: usize, to: usize },
    ClearCourts,
    List,
}

#[derive(Subcommand, Debug)]
pub enum ScoresAction {
    /// Add games won, given as NAME=GAMES
    Submit {
        #[arg(required = true)]
        entries: Vec<String>,
    },
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchTypeArg {
    Singles,
    Doubles,
}

impl From<MatchTypeArg> for MatchType {
    fn from(arg: MatchTypeArg) -> Self {
        match arg {
            MatchTypeArg::Singles => MatchType::Singles,
            MatchTypeArg::Doubles => MatchType::Doubles,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeftoverArg {
    Rest,
    AmericanDoubles,
}

impl From<LeftoverArg> for LeftoverPolicy {
    fn from(arg: LeftoverArg) -> Self {
        match arg {
            LeftoverArg::Rest => LeftoverPolicy::Rest,
            LeftoverArg::AmericanDoubles => LeftoverPolicy::AmericanDoubles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_schedule_flags() {
        let cli = Cli::try_parse_from([
            "court-rotation",
            "--data-dir",
            "/tmp/night",
            "schedule",
            "--match-type",
            "singles",
            "--leftover",
            "american-doubles",
            "--rounds",
            "3",
            "--seed",
            "9",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/night"));
        match cli.command {
            Command::Schedule { match_type, leftover, rounds, seed, .. } => {
                assert_eq!(MatchType::from(match_type), MatchType::Singles);
                assert_eq!(LeftoverPolicy::from(leftover), LeftoverPolicy::AmericanDoubles);
                assert_eq!(rounds, 3);
                assert_eq!(seed, Some(9));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
