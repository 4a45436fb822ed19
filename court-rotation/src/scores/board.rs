use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SubmissionError;
use super::submission::ScoreSubmission;

/// Games per player for tonight and across all sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub tonight: BTreeMap<String, u32>,
    pub all_time: BTreeMap<String, u32>,
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: String,
    pub games: u32,
}

impl ScoreBoard {
    /// Starts a session on top of previously saved all-time totals
    pub fn with_all_time(all_time: BTreeMap<String, u32>) -> Self {
        Self {
            tonight: BTreeMap::new(),
            all_time,
        }
    }

    /// Adds every score to both totals, inserting unseen players at zero
    pub fn submit(&mut self, submission: &ScoreSubmission) -> Result<(), SubmissionError> {
        submission.validate()?;
        // compute every new total first so a failed submit changes nothing
        let mut updates = Vec::with_capacity(submission.scores.len());
        for (player, games) in &submission.scores {
            let overflow = || SubmissionError::Overflow(player.clone());
            let tonight = self.tonight.get(player).copied().unwrap_or(0);
            let all_time = self.all_time.get(player).copied().unwrap_or(0);
            let tonight = tonight.checked_add(*games).ok_or_else(overflow)?;
            let all_time = all_time.checked_add(*games).ok_or_else(overflow)?;
            updates.push((player, tonight, all_time));
        }
        for (player, tonight, all_time) in updates {
            self.tonight.insert(player.clone(), tonight);
            self.all_time.insert(player.clone(), all_time);
        }
        info!("Recorded scores for {} player(s)", submission.scores.len());
        Ok(())
    }

    pub fn reset_tonight(&mut self) {
        self.tonight.clear();
    }

    pub fn tonight_leaderboard(&self) -> Vec<Standing> {
        leaderboard(&self.tonight)
    }

    pub fn all_time_leaderboard(&self) -> Vec<Standing> {
        leaderboard(&self.all_time)
    }
}

/// Highest total first, ties by name
fn leaderboard(totals: &BTreeMap<String, u32>) -> Vec<Standing> {
    let mut rows: Vec<Standing> = totals
        .iter()
        .map(|(player, games)| Standing {
            player: player.clone(),
            games: *games,
        })
        .collect();
    rows.sort_by(|a, b| b.games.cmp(&a.games).then_with(|| a.player.cmp(&b.player)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn submission(entries: &[(&str, u32)]) -> ScoreSubmission {
        ScoreSubmission::new(entries.iter().map(|(n, g)| (n.to_string(), *g)).collect())
    }

    #[test]
    fn submit_accumulates_both_totals() {
        let mut board = ScoreBoard::with_all_time([("Ana".to_string(), 10)].into_iter().collect());
        board.submit(&submission(&[("Ana", 4), ("Bo", 3)])).unwrap();
        board.submit(&submission(&[("Bo", 2)])).unwrap();

        assert_eq!(board.tonight.get("Ana"), Some(&4));
        assert_eq!(board.tonight.get("Bo"), Some(&5));
        assert_eq!(board.all_time.get("Ana"), Some(&14));
        assert_eq!(board.all_time.get("Bo"), Some(&5));
    }

    #[test]
    fn overflowing_submit_is_rejected_without_changes() {
        let mut board = ScoreBoard::default();
        board.submit(&submission(&[("Ana", u32::MAX)])).unwrap();
        assert_eq!(
            board.submit(&submission(&[("Bo", 1), ("Ana", u32::MAX)])),
            Err(SubmissionError::Overflow("Ana".to_string()))
        );
        assert_eq!(board.tonight.get("Ana"), Some(&u32::MAX));
        assert_eq!(board.all_time.get("Ana"), Some(&u32::MAX));
        assert_eq!(board.tonight.get("Bo"), None);
        assert_eq!(board.all_time.get("Bo"), None);
    }

    #[test]
    fn leaderboard_orders_by_games_then_name() {
        let mut board = ScoreBoard::default();
        board.submit(&submission(&[("Cy", 3), ("Ana", 3), ("Bo", 6)])).unwrap();
        let names: Vec<String> = board.tonight_leaderboard().into_iter().map(|s| s.player).collect();
        assert_eq!(names, vec!["Bo", "Ana", "Cy"]);
    }

    #[test]
    fn reset_tonight_keeps_all_time() {
        let mut board = ScoreBoard::default();
        board.submit(&submission(&[("Ana", 1)])).unwrap();
        board.reset_tonight();
        assert!(board.tonight.is_empty());
        assert_eq!(board.all_time.get("Ana"), Some(&1));
    }
}
