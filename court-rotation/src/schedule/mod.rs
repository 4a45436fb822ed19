pub mod types;
pub mod history;
pub mod priority;
pub mod leftover;
pub mod round;
pub mod navigator;
pub mod session;

pub use types::{CapacityShortfall, CourtAssignment, LeftoverPolicy, MatchType, Role, Round, RoundReport};
pub use history::{PairingHistory, RoleHistory};
pub use priority::{NoPriority, RecentRolePriority, ShufflePriority};
pub use round::{generate_round, Ledger, RoundRequest};
pub use navigator::RoundNavigator;
pub use session::SchedulerState;
