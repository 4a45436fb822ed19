use clap::Parser;
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;

use court_rotation::config::{Cli, Command, RosterAction, ScoresAction};
use court_rotation::display::{print_leaderboard, print_pairing_matrix, print_round, write_round_to_files};
use court_rotation::roster::{Roster, RosterStore};
use court_rotation::schedule::SchedulerState;
use court_rotation::scores::{ScoreBoard, ScoreStore, ScoreSubmission};
use court_rotation::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let roster_store = RosterStore::in_dir(&cli.data_dir);
    let score_store = ScoreStore::in_dir(&cli.data_dir);

    match cli.command {
        Command::Serve { port, admin_password } => {
            let roster = roster_store.load()?;
            let all_time = score_store.load()?;
            println!("Starting web server on port {}...", port);
            println!("Access the site at http://localhost:{}", port);
            let state = AppState::new(roster, all_time, roster_store, score_store, admin_password);
            web::start_server(port, state).await?;
        }
        Command::Schedule {
            match_type,
            leftover,
            rounds,
            seed,
            export_dir,
            show_history,
        } => {
            let roster = roster_store.load()?;
            println!(
                "Loaded {} player(s) and {} court(s) from {}",
                roster.players.len(),
                roster.courts.len(),
                roster_store.path().display()
            );
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let mut session = SchedulerState::new();
            for _ in 0..rounds {
                let report = match session.generate_round(
                    &roster.players,
                    &roster.courts,
                    match_type.into(),
                    leftover.into(),
                    &mut rng,
                ) {
                    Ok(report) => report,
                    Err(e) => {
                        warn!("{}", e);
                        break;
                    }
                };
                print_round(&report.round);
                if let Some(dir) = &export_dir {
                    let (document, table) = write_round_to_files(&report.round, dir)?;
                    println!("  saved {} and {}", document.display(), table.display());
                }
            }
            if show_history {
                print_pairing_matrix(session.history(), &roster.players);
            }
        }
        Command::Roster { action } => {
            let mut roster = roster_store.load()?;
            let changed = apply_roster_action(&mut roster, action)?;
            if changed {
                roster_store.save(&roster)?;
            }
        }
        Command::Scores { action } => {
            let mut board = ScoreBoard::with_all_time(score_store.load()?);
            match action {
                ScoresAction::Submit { entries } => {
                    let submission = ScoreSubmission::parse_entries(&entries[..])?;
                    board.submit(&submission)?;
                    score_store.save(&board.all_time)?;
                    print_leaderboard("All-Time", &board.all_time_leaderboard());
                }
                ScoresAction::Show => print_leaderboard("All-Time", &board.all_time_leaderboard()),
            }
        }
    }

    Ok(())
}

/// Returns whether the roster needs saving
fn apply_roster_action(roster: &mut Roster, action: RosterAction) -> Result<bool, Box<dyn std::error::Error>> {
    match action {
        RosterAction::AddPlayer { name } => roster.add_player(&name)?,
        RosterAction::RemovePlayer { name } => roster.remove_player(&name)?,
        RosterAction::RenamePlayer { from, to } => roster.rename_player(&from, &to)?,
        RosterAction::MovePlayer { from, to } => roster.move_player(from, to)?,
        RosterAction::ClearPlayers => roster.clear_players(),
        RosterAction::AddCourt { name } => roster.add_court(&name)?,
        RosterAction::RemoveCourt { name } => roster.remove_court(&name)?,
        RosterAction::MoveCourt { from, to } => roster.move_court(from, to)?,
        RosterAction::ClearCourts => roster.clear_courts(),
        RosterAction::List => {
            println!("Courts ({}):", roster.courts.len());
            for court in &roster.courts {
                println!("  Court {}", court);
            }
            println!("Players ({}):", roster.players.len());
            for player in &roster.players {
                println!("  {}", player);
            }
            return Ok(false);
        }
    }
    Ok(true)
}
