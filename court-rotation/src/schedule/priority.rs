use rand::seq::SliceRandom;
use rand::Rng;

use super::history::RoleHistory;
use super::types::Role;

/// Decides who gets drawn first when a round is shuffled.
///
/// Lower penalties are drawn earlier and so are likelier to land in a regular
/// slot. Players with equal penalties are drawn in random order.
pub trait ShufflePriority: Send + Sync {
    fn penalty(&self, player: &str, roles: &RoleHistory) -> u32;
}

/// Plain shuffle: every player has the same penalty
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPriority;

impl ShufflePriority for NoPriority {
    fn penalty(&self, _player: &str, _roles: &RoleHistory) -> u32 {
        0
    }
}

/// Players who rested or played American doubles last round are drawn first.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecentRolePriority;

impl ShufflePriority for RecentRolePriority {
    fn penalty(&self, player: &str, roles: &RoleHistory) -> u32 {
        match roles.last_role(player) {
            Some(Role::Rest) | Some(Role::American) => 0,
            Some(Role::Match) | None => 1,
        }
    }
}

/// Shuffles `players` in place, then stable-sorts by penalty.
pub fn prioritized_shuffle<R: Rng + ?Sized>(
    players: &mut [String],
    priority: &dyn ShufflePriority,
    roles: &RoleHistory,
    rng: &mut R,
) {
    players.shuffle(rng);
    players.sort_by_cached_key(|p| priority.penalty(p, roles));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rested_and_american_players_come_first() {
        let mut roles = RoleHistory::new();
        roles.record("A", Role::Match);
        roles.record("B", Role::Rest);
        roles.record("C", Role::Match);
        roles.record("D", Role::American);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut players: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
            prioritized_shuffle(&mut players, &RecentRolePriority, &roles, &mut rng);
            let mut front = players[..2].to_vec();
            front.sort();
            assert_eq!(front, vec!["B".to_string(), "D".to_string()]);
        }
    }

    #[test]
    fn no_priority_keeps_every_player() {
        let roles = RoleHistory::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut players: Vec<String> = (0..10).map(|i| format!("P{i}")).collect();
        prioritized_shuffle(&mut players, &NoPriority, &roles, &mut rng);
        let mut sorted = players.clone();
        sorted.sort();
        let mut expected: Vec<String> = (0..10).map(|i| format!("P{i}")).collect();
        expected.sort();
        assert_eq!(sorted, expected);
    }
}
