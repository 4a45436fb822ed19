use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Singles (two players per court) or doubles (four per court).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Singles,
    #[default]
    Doubles,
}

impl MatchType {
    /// Number of players in a regular group
    pub fn arity(self) -> usize {
        match self {
            MatchType::Singles => 2,
            MatchType::Doubles => 4,
        }
    }
}

/// What happens to players who do not fit into a full group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeftoverPolicy {
    #[default]
    Rest,
    AmericanDoubles,
}

/// Role a player had in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Match,
    American,
    Rest,
}

/// One court and the players sent to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtAssignment {
    pub court: String,
    pub players: Vec<String>,
}

impl CourtAssignment {
    pub fn new(court: impl Into<String>, players: Vec<String>) -> Self {
        Self {
            court: court.into(),
            players,
        }
    }

    /// Three-player groups are American doubles whatever the match type
    pub fn is_american(&self) -> bool {
        self.players.len() == 3
    }
}

/// A generated round: ordered court assignments plus the rest group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based position in the schedule
    pub number: usize,
    pub match_type: MatchType,
    pub assignments: Vec<CourtAssignment>,
    pub resting: Vec<String>,
    pub generated_at: DateTime<Local>,
}

impl Round {
    /// Every player in the round, seated or resting
    pub fn all_players(&self) -> impl Iterator<Item = &String> {
        self.assignments
            .iter()
            .flat_map(|a| a.players.iter())
            .chain(self.resting.iter())
    }

    pub fn american_group(&self) -> Option<&CourtAssignment> {
        self.assignments.iter().find(|a| a.is_american())
    }
}

/// More players than the courts can seat in full groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityShortfall {
    pub capacity: usize,
    pub players: usize,
}

/// Result of a successful `generate_round`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: Round,
    pub shortfall: Option<CapacityShortfall>,
}
