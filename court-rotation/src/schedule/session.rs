use log::info;
use rand::Rng;

use crate::error::ScheduleError;
use super::history::{PairingHistory, RoleHistory};
use super::navigator::RoundNavigator;
use super::priority::{RecentRolePriority, ShufflePriority};
use super::round::{generate_round, Ledger, RoundRequest};
use super::types::{LeftoverPolicy, MatchType, Round, RoundReport};

/// Everything one match night accumulates: the schedule, pairing history,
/// recent American-doubles players, role history and the viewed round.
pub struct SchedulerState {
    schedule: Vec<Round>,
    ledger: Ledger,
    navigator: RoundNavigator,
    priority: Box<dyn ShufflePriority>,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SchedulerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerState")
            .field("rounds", &self.schedule.len())
            .field("current", &self.navigator.current())
            .finish()
    }
}

impl SchedulerState {
    /// New session that favours players who rested or played American doubles
    pub fn new() -> Self {
        Self::with_priority(Box::new(RecentRolePriority))
    }

    pub fn with_priority(priority: Box<dyn ShufflePriority>) -> Self {
        Self {
            schedule: Vec::new(),
            ledger: Ledger::default(),
            navigator: RoundNavigator::default(),
            priority,
        }
    }

    /// Appends a new round and moves the pointer to it.
    ///
    /// `InsufficientResources` leaves the session unchanged.
    pub fn generate_round<R: Rng + ?Sized>(
        &mut self,
        players: &[String],
        courts: &[String],
        match_type: MatchType,
        policy: LeftoverPolicy,
        rng: &mut R,
    ) -> Result<RoundReport, ScheduleError> {
        let request = RoundRequest { players, courts, match_type, policy };
        let number = self.schedule.len() + 1;
        let report = generate_round(request, number, &mut self.ledger, self.priority.as_ref(), rng)?;
        self.schedule.push(report.round.clone());
        self.navigator.jump_to_last(self.schedule.len());
        Ok(report)
    }

    pub fn rounds(&self) -> &[Round] {
        &self.schedule
    }

    pub fn round(&self, number: usize) -> Option<&Round> {
        number.checked_sub(1).and_then(|i| self.schedule.get(i))
    }

    pub fn current_number(&self) -> usize {
        self.navigator.current()
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.round(self.navigator.current())
    }

    pub fn has_previous(&self) -> bool {
        self.navigator.has_previous()
    }

    pub fn has_next(&self) -> bool {
        self.navigator.has_next(self.schedule.len())
    }

    pub fn previous(&mut self) -> Option<&Round> {
        self.navigator.previous();
        self.current_round()
    }

    pub fn next(&mut self) -> Option<&Round> {
        self.navigator.next(self.schedule.len());
        self.current_round()
    }

    /// Clears schedule, history, recent American set and roles
    pub fn reset(&mut self) {
        self.schedule.clear();
        self.ledger.clear();
        self.navigator.reset();
        info!("Session reset");
    }

    pub fn history(&self) -> &PairingHistory {
        &self.ledger.history
    }

    pub fn recent_american(&self) -> &std::collections::BTreeSet<String> {
        &self.ledger.recent_american
    }

    pub fn roles(&self) -> &RoleHistory {
        &self.ledger.roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn skipped_round_does_not_move_pointer() {
        let mut state = SchedulerState::new();
        let mut rng = StdRng::seed_from_u64(3);
        let result = state.generate_round(
            &names(&["A"]),
            &[],
            MatchType::Singles,
            LeftoverPolicy::Rest,
            &mut rng,
        );
        assert!(result.is_err());
        assert_eq!(state.current_number(), 0);
        assert!(state.rounds().is_empty());
    }

    #[test]
    fn generate_then_navigate() {
        let mut state = SchedulerState::new();
        let mut rng = StdRng::seed_from_u64(3);
        let players = names(&["A", "B", "C", "D"]);
        let courts = names(&["1", "2"]);
        for _ in 0..3 {
            state
                .generate_round(&players, &courts, MatchType::Singles, LeftoverPolicy::Rest, &mut rng)
                .unwrap();
        }
        assert_eq!(state.current_number(), 3);
        assert!(!state.has_next());
        assert_eq!(state.previous().map(|r| r.number), Some(2));
        assert_eq!(state.next().map(|r| r.number), Some(3));
        assert_eq!(state.next().map(|r| r.number), Some(3));
    }
}
