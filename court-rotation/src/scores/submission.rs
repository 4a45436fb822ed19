use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SubmissionError;

/// Games won per player for one round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub scores: BTreeMap<String, u32>,
}

impl ScoreSubmission {
    pub fn new(scores: BTreeMap<String, u32>) -> Self {
        Self { scores }
    }

    /// Parses `NAME=GAMES` entries as given on the command line
    pub fn parse_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self, SubmissionError> {
        let mut scores = BTreeMap::new();
        for entry in entries {
            let entry = entry.as_ref();
            let (name, games) = entry
                .rsplit_once('=')
                .ok_or_else(|| SubmissionError::Malformed(entry.to_string()))?;
            let games: u32 = games
                .trim()
                .parse()
                .map_err(|_| SubmissionError::Malformed(entry.to_string()))?;
            *scores.entry(name.trim().to_string()).or_insert(0) += games;
        }
        let submission = Self { scores };
        submission.validate()?;
        Ok(submission)
    }

    pub fn validate(&self) -> Result<(), SubmissionError> {
        if self.scores.is_empty() {
            return Err(SubmissionError::Empty);
        }
        if self.scores.keys().any(|name| name.trim().is_empty()) {
            return Err(SubmissionError::EmptyPlayerName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_games_pairs() {
        let submission = ScoreSubmission::parse_entries(&["Ana=4", " Bo = 2", "Ana=1"]).unwrap();
        assert_eq!(submission.scores.get("Ana"), Some(&5));
        assert_eq!(submission.scores.get("Bo"), Some(&2));
    }

    #[test]
    fn rejects_malformed_and_empty() {
        assert_eq!(
            ScoreSubmission::parse_entries(&["Ana"]),
            Err(SubmissionError::Malformed("Ana".to_string()))
        );
        assert_eq!(
            ScoreSubmission::parse_entries(&["Ana=-1"]),
            Err(SubmissionError::Malformed("Ana=-1".to_string()))
        );
        assert_eq!(ScoreSubmission::parse_entries::<&str>(&[]), Err(SubmissionError::Empty));
        assert_eq!(
            ScoreSubmission::parse_entries(&["=3"]),
            Err(SubmissionError::EmptyPlayerName)
        );
    }
}
