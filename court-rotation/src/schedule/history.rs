use std::collections::{BTreeMap, HashMap};

use super::types::Role;

/// How often each unordered pair of players has shared a group.
///
/// Pairs are stored under a canonical `(min, max)` key, so `count(a, b)`
/// and `count(b, a)` always read the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingHistory {
    counts: BTreeMap<(String, String), u32>,
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl PairingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, a: &str, b: &str) -> u32 {
        if a == b {
            return 0;
        }
        self.counts.get(&pair_key(a, b)).copied().unwrap_or(0)
    }

    /// Increments every pair inside `group` by one
    pub fn record_group(&mut self, group: &[String]) {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                if a == b {
                    continue;
                }
                *self.counts.entry(pair_key(a, b)).or_insert(0) += 1;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Number of distinct pairs seen so far
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Square matrix in roster order; `None` on the diagonal
    pub fn matrix(&self, players: &[String]) -> Vec<Vec<Option<u32>>> {
        players
            .iter()
            .map(|row| {
                players
                    .iter()
                    .map(|col| {
                        if row == col {
                            None
                        } else {
                            Some(self.count(row, col))
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Per-player sequence of roles, one entry appended per round the player took part in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleHistory {
    roles: HashMap<String, Vec<Role>>,
}

impl RoleHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, player: &str, role: Role) {
        self.roles.entry(player.to_string()).or_default().push(role);
    }

    pub fn last_role(&self, player: &str) -> Option<Role> {
        self.roles.get(player).and_then(|roles| roles.last().copied())
    }

    pub fn roles(&self, player: &str) -> &[Role] {
        self.roles.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn clear(&mut self) {
        self.roles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn counts_are_symmetric() {
        let mut history = PairingHistory::new();
        history.record_group(&names(&["Bea", "Al"]));
        assert_eq!(history.count("Al", "Bea"), 1);
        assert_eq!(history.count("Bea", "Al"), 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn doubles_group_counts_partners_and_opponents() {
        let mut history = PairingHistory::new();
        history.record_group(&names(&["A", "B", "C", "D"]));
        assert_eq!(history.len(), 6);
        assert_eq!(history.count("A", "D"), 1);
        history.record_group(&names(&["D", "A"]));
        assert_eq!(history.count("A", "D"), 2);
    }

    #[test]
    fn matrix_has_empty_diagonal() {
        let mut history = PairingHistory::new();
        history.record_group(&names(&["A", "B"]));
        let matrix = history.matrix(&names(&["A", "B", "C"]));
        assert_eq!(matrix[0], vec![None, Some(1), Some(0)]);
        assert_eq!(matrix[1], vec![Some(1), None, Some(0)]);
        assert_eq!(matrix[2], vec![Some(0), Some(0), None]);
    }

    #[test]
    fn role_history_tracks_last_role() {
        let mut roles = RoleHistory::new();
        assert_eq!(roles.last_role("A"), None);
        roles.record("A", Role::Match);
        roles.record("A", Role::Rest);
        assert_eq!(roles.last_role("A"), Some(Role::Rest));
        assert_eq!(roles.roles("A"), &[Role::Match, Role::Rest]);
    }
}
