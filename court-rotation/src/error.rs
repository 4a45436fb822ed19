use thiserror::Error;

/// Errors raised while generating a round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// No players or no courts; the round is skipped and state is left untouched.
    #[error("cannot generate a round with {players} player(s) and {courts} court(s)")]
    InsufficientResources { players: usize, courts: usize },
}

/// Which roster list an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterKind {
    Player,
    Court,
}

impl std::fmt::Display for RosterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterKind::Player => write!(f, "player"),
            RosterKind::Court => write!(f, "court"),
        }
    }
}

/// Errors raised by roster edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: RosterKind, name: String },
    #[error("{0} name must not be empty")]
    EmptyName(RosterKind),
    #[error("{kind} '{name}' not found")]
    NotFound { kind: RosterKind, name: String },
    #[error("{kind} index {index} is out of range (len {len})")]
    IndexOutOfRange { kind: RosterKind, index: usize, len: usize },
}

/// Errors raised when reading or writing the roster or score files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error("score total for '{0}' overflows")]
    ScoreOverflow(String),
}

/// Errors raised when validating a score submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("score submission is empty")]
    Empty,
    #[error("player name must not be empty")]
    EmptyPlayerName,
    #[error("malformed score entry '{0}', expected NAME=GAMES")]
    Malformed(String),
    #[error("score total for '{0}' overflows")]
    Overflow(String),
}
