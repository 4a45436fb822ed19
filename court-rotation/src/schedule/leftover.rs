use std::collections::BTreeSet;

use log::debug;

use super::types::{CourtAssignment, LeftoverPolicy, MatchType};

/// Outcome of placing the players that did not fill a full group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub resting: Vec<String>,
    /// Members of the three-player group formed this round, if any
    pub american: Option<Vec<String>>,
}

impl Resolution {
    fn rest(players: Vec<String>) -> Self {
        Self {
            resting: players,
            american: None,
        }
    }

    fn american(group: Vec<String>) -> Self {
        Self {
            resting: Vec::new(),
            american: Some(group),
        }
    }
}

/// First court, in court-list order, that holds no group yet
pub fn spare_court<'a>(assignments: &[CourtAssignment], courts: &'a [String]) -> Option<&'a String> {
    courts
        .iter()
        .find(|court| !assignments.iter().any(|a| &a.court == *court))
}

fn has_recent(players: &[String], recent: &BTreeSet<String>) -> bool {
    players.iter().any(|p| recent.contains(p))
}

/// Places `leftover` players according to `policy`, editing `assignments` in place.
///
/// Every leftover player ends up either in exactly one group or in the
/// returned rest list. Seated players are never dropped.
pub fn resolve(
    assignments: &mut Vec<CourtAssignment>,
    leftover: Vec<String>,
    courts: &[String],
    match_type: MatchType,
    policy: LeftoverPolicy,
    recent: &BTreeSet<String>,
) -> Resolution {
    if leftover.is_empty() {
        return Resolution::default();
    }
    if policy == LeftoverPolicy::Rest {
        debug!("{} leftover player(s) rest", leftover.len());
        return Resolution::rest(leftover);
    }

    match (match_type, leftover.len()) {
        (MatchType::Singles, 1) => upgrade_pair(assignments, leftover, recent),
        (MatchType::Doubles, 1) => split_four(assignments, leftover, courts, recent),
        (_, 2) | (_, 3) => match spare_court(assignments, courts) {
            Some(court) => {
                debug!("leftover group of {} placed on court {}", leftover.len(), court);
                assignments.push(CourtAssignment::new(court.clone(), leftover.clone()));
                if leftover.len() == 3 {
                    Resolution::american(leftover)
                } else {
                    Resolution::default()
                }
            }
            None => {
                debug!("no spare court for {} leftover player(s)", leftover.len());
                Resolution::rest(leftover)
            }
        },
        _ => Resolution::rest(leftover),
    }
}

/// Singles: the odd player joins a two-player group, preferring one without recent American players.
fn upgrade_pair(
    assignments: &mut [CourtAssignment],
    leftover: Vec<String>,
    recent: &BTreeSet<String>,
) -> Resolution {
    let target = assignments
        .iter()
        .position(|a| a.players.len() == 2 && !has_recent(&a.players, recent))
        // drawing seated players onto a spare court would seat them twice; reuse the first pair instead
        .or_else(|| assignments.iter().position(|a| a.players.len() == 2));

    match target {
        Some(index) => {
            let assignment = &mut assignments[index];
            assignment.players.extend(leftover);
            debug!("court {} upgraded to American doubles", assignment.court);
            Resolution::american(assignment.players.clone())
        }
        None => Resolution::rest(leftover),
    }
}

/// Doubles: one four-player group splits into singles on its own court and,
/// together with the odd player, American doubles on a spare court.
fn split_four(
    assignments: &mut Vec<CourtAssignment>,
    leftover: Vec<String>,
    courts: &[String],
    recent: &BTreeSet<String>,
) -> Resolution {
    let Some(spare) = spare_court(assignments, courts).cloned() else {
        debug!("no spare court to split a doubles group");
        return Resolution::rest(leftover);
    };
    let source = assignments
        .iter()
        .position(|a| a.players.len() == 4 && !has_recent(&a.players, recent))
        .or_else(|| assignments.iter().rposition(|a| a.players.len() == 4));
    let Some(index) = source else {
        return Resolution::rest(leftover);
    };

    let mut members = std::mem::take(&mut assignments[index].players);
    // recent American players stay in the singles half
    members.sort_by_key(|p| !recent.contains(p));
    let mut american = members.split_off(2);
    american.extend(leftover);
    assignments[index].players = members;

    debug!(
        "court {} split into singles, American doubles moved to court {}",
        assignments[index].court, spare
    );
    assignments.push(CourtAssignment::new(spare, american.clone()));
    Resolution::american(american)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rest_policy_never_touches_groups() {
        let mut assignments = vec![CourtAssignment::new("1", names(&["A", "B"]))];
        let resolution = resolve(
            &mut assignments,
            names(&["C"]),
            &names(&["1", "2"]),
            MatchType::Singles,
            LeftoverPolicy::Rest,
            &BTreeSet::new(),
        );
        assert_eq!(resolution.resting, names(&["C"]));
        assert_eq!(assignments[0].players, names(&["A", "B"]));
    }

    #[test]
    fn upgrade_prefers_group_without_recent_players() {
        let mut assignments = vec![
            CourtAssignment::new("1", names(&["A", "B"])),
            CourtAssignment::new("2", names(&["C", "D"])),
        ];
        let recent: BTreeSet<String> = names(&["A"]).into_iter().collect();
        let resolution = resolve(
            &mut assignments,
            names(&["E"]),
            &names(&["1", "2"]),
            MatchType::Singles,
            LeftoverPolicy::AmericanDoubles,
            &recent,
        );
        assert_eq!(assignments[1].players, names(&["C", "D", "E"]));
        assert_eq!(resolution.american, Some(names(&["C", "D", "E"])));
        assert!(resolution.resting.is_empty());
    }

    #[test]
    fn upgrade_falls_back_to_first_pair() {
        let mut assignments = vec![
            CourtAssignment::new("1", names(&["A", "B"])),
            CourtAssignment::new("2", names(&["C", "D"])),
        ];
        let recent: BTreeSet<String> = names(&["A", "C"]).into_iter().collect();
        resolve(
            &mut assignments,
            names(&["E"]),
            &names(&["1", "2"]),
            MatchType::Singles,
            LeftoverPolicy::AmericanDoubles,
            &recent,
        );
        assert_eq!(assignments[0].players, names(&["A", "B", "E"]));
    }

    #[test]
    fn split_keeps_recent_players_in_singles() {
        let mut assignments = vec![CourtAssignment::new("1", names(&["A", "B", "C", "D"]))];
        let recent: BTreeSet<String> = names(&["C"]).into_iter().collect();
        let resolution = resolve(
            &mut assignments,
            names(&["E"]),
            &names(&["1", "2"]),
            MatchType::Doubles,
            LeftoverPolicy::AmericanDoubles,
            &recent,
        );
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].players, names(&["C", "A"]));
        assert_eq!(assignments[1], CourtAssignment::new("2", names(&["B", "D", "E"])));
        assert_eq!(resolution.american, Some(names(&["B", "D", "E"])));
    }

    #[test]
    fn split_without_spare_court_rests() {
        let mut assignments = vec![CourtAssignment::new("1", names(&["A", "B", "C", "D"]))];
        let resolution = resolve(
            &mut assignments,
            names(&["E"]),
            &names(&["1"]),
            MatchType::Doubles,
            LeftoverPolicy::AmericanDoubles,
            &BTreeSet::new(),
        );
        assert_eq!(resolution.resting, names(&["E"]));
        assert_eq!(assignments[0].players.len(), 4);
    }

    #[test]
    fn pair_and_trio_take_the_spare_court() {
        let mut assignments = vec![CourtAssignment::new("1", names(&["A", "B", "C", "D"]))];
        let resolution = resolve(
            &mut assignments,
            names(&["E", "F"]),
            &names(&["1", "2"]),
            MatchType::Doubles,
            LeftoverPolicy::AmericanDoubles,
            &BTreeSet::new(),
        );
        assert_eq!(resolution, Resolution::default());
        assert_eq!(assignments[1], CourtAssignment::new("2", names(&["E", "F"])));

        let mut assignments = vec![CourtAssignment::new("1", names(&["A", "B", "C", "D"]))];
        let resolution = resolve(
            &mut assignments,
            names(&["E", "F", "G"]),
            &names(&["1", "2"]),
            MatchType::Doubles,
            LeftoverPolicy::AmericanDoubles,
            &BTreeSet::new(),
        );
        assert_eq!(resolution.american, Some(names(&["E", "F", "G"])));
    }
}
