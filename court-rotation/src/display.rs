use std::fs;
use std::path::{Path, PathBuf};

use crate::export::{document::court_line, to_document, to_table};
use crate::schedule::{PairingHistory, Round};
use crate::scores::Standing;

/// Writes `round_<n>.txt` and `round_<n>.csv` into `dir`, returning both paths
pub fn write_round_to_files(round: &Round, dir: &Path) -> Result<(PathBuf, PathBuf), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let document_path = dir.join(format!("round_{}.txt", round.number));
    let table_path = dir.join(format!("round_{}.csv", round.number));
    fs::write(&document_path, to_document(round)?)?;
    fs::write(&table_path, to_table(round)?)?;
    Ok((document_path, table_path))
}

/// Prints a round in a readable format
pub fn print_round(round: &Round) {
    println!("\n=== Round {} ===", round.number);
    for assignment in &round.assignments {
        let marker = if assignment.is_american() { " (American doubles)" } else { "" };
        println!("  {}{}", court_line(&assignment.court, &assignment.players), marker);
    }
    if !round.resting.is_empty() {
        println!("⚠️  Resting ({}): {}", round.resting.len(), round.resting.join(", "));
    }
}

/// Prints who has shared a court with whom, in roster order
pub fn print_pairing_matrix(history: &PairingHistory, players: &[String]) {
    if players.is_empty() {
        return;
    }
    let width = players.iter().map(|p| p.chars().count()).max().unwrap_or(0).max(3);
    println!("\nPlayer Pairing History:");
    print!("{:width$}", "", width = width);
    for player in players {
        print!(" {:>width$}", player, width = width);
    }
    println!();
    for (player, row) in players.iter().zip(history.matrix(players)) {
        print!("{:width$}", player, width = width);
        for cell in row {
            match cell {
                Some(count) => print!(" {:>width$}", count, width = width),
                None => print!(" {:>width$}", "-", width = width),
            }
        }
        println!();
    }
}

pub fn print_leaderboard(title: &str, standings: &[Standing]) {
    println!("\n=== {} ===", title);
    if standings.is_empty() {
        println!("  (no scores yet)");
    }
    for (rank, standing) in standings.iter().enumerate() {
        println!("  {:>2}. {} - {} game(s)", rank + 1, standing.player, standing.games);
    }
}
