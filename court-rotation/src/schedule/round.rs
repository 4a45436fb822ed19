use std::collections::BTreeSet;

use chrono::Local;
use log::{info, warn};
use rand::Rng;

use crate::error::ScheduleError;
use super::history::{PairingHistory, RoleHistory};
use super::leftover;
use super::priority::{prioritized_shuffle, ShufflePriority};
use super::types::{CapacityShortfall, CourtAssignment, LeftoverPolicy, MatchType, Role, Round, RoundReport};

/// Roster snapshot and settings for one round
#[derive(Debug, Clone, Copy)]
pub struct RoundRequest<'a> {
    pub players: &'a [String],
    pub courts: &'a [String],
    pub match_type: MatchType,
    pub policy: LeftoverPolicy,
}

/// Cumulative state advanced by every generated round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    pub history: PairingHistory,
    pub recent_american: BTreeSet<String>,
    pub roles: RoleHistory,
}

impl Ledger {
    pub fn clear(&mut self) {
        self.history.clear();
        self.recent_american.clear();
        self.roles.clear();
    }
}

/// Builds one round from `request` and records it in `ledger`.
///
/// The roster slices are copied before shuffling. On
/// `InsufficientResources` the ledger is left untouched.
pub fn generate_round<R: Rng + ?Sized>(
    request: RoundRequest<'_>,
    number: usize,
    ledger: &mut Ledger,
    priority: &dyn ShufflePriority,
    rng: &mut R,
) -> Result<RoundReport, ScheduleError> {
    let RoundRequest { players, courts, match_type, policy } = request;
    if players.is_empty() || courts.is_empty() {
        warn!(
            "Skipping round {}: {} player(s), {} court(s)",
            number,
            players.len(),
            courts.len()
        );
        return Err(ScheduleError::InsufficientResources {
            players: players.len(),
            courts: courts.len(),
        });
    }

    let arity = match_type.arity();
    let capacity = courts.len() * arity;
    let shortfall = if players.len() > capacity {
        warn!(
            "Round {}: {} courts seat {} players, {} on the roster",
            number,
            courts.len(),
            capacity,
            players.len()
        );
        Some(CapacityShortfall { capacity, players: players.len() })
    } else {
        None
    };

    let mut pool = players.to_vec();
    prioritized_shuffle(&mut pool, priority, &ledger.roles, rng);

    // only full groups are seated before remainder handling
    let seated = (pool.len().min(capacity) / arity) * arity;
    let leftover_players = pool.split_off(seated);

    let mut assignments: Vec<CourtAssignment> = pool
        .chunks(arity)
        .zip(courts)
        .map(|(group, court)| CourtAssignment::new(court.clone(), group.to_vec()))
        .collect();

    let resolution = leftover::resolve(
        &mut assignments,
        leftover_players,
        courts,
        match_type,
        policy,
        &ledger.recent_american,
    );

    for assignment in &assignments {
        ledger.history.record_group(&assignment.players);
        let role = if assignment.is_american() { Role::American } else { Role::Match };
        for player in &assignment.players {
            ledger.roles.record(player, role);
        }
    }
    for player in &resolution.resting {
        ledger.roles.record(player, Role::Rest);
    }
    if let Some(group) = resolution.american {
        ledger.recent_american = group.into_iter().collect();
    }

    info!(
        "Generated round {}: {} court(s) in use, {} resting",
        number,
        assignments.len(),
        resolution.resting.len()
    );

    Ok(RoundReport {
        round: Round {
            number,
            match_type,
            assignments,
            resting: resolution.resting,
            generated_at: Local::now(),
        },
        shortfall,
    })
}
