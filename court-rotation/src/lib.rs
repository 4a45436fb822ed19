pub mod error;
pub mod schedule;
pub mod roster;
pub mod scores;
pub mod export;
pub mod timer;
pub mod display;
pub mod config;
pub mod web;

pub use error::{RosterError, RosterKind, ScheduleError, StoreError, SubmissionError};
pub use roster::{Roster, RosterStore};
pub use schedule::{
    CourtAssignment, LeftoverPolicy, MatchType, PairingHistory, Role, Round, RoundReport, SchedulerState,
};
pub use scores::{ScoreBoard, ScoreStore, ScoreSubmission};
