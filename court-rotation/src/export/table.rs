use csv::WriterBuilder;

use crate::error::StoreError;
use crate::schedule::Round;

/// Renders a round as CSV with `Court,Players` columns.
///
/// Players are joined with `", "`; resting players get a final `Rest` row.
pub fn to_table(round: &Round) -> Result<Vec<u8>, StoreError> {
    let mut wtr = WriterBuilder::new().from_writer(Vec::new());
    wtr.write_record(["Court", "Players"])?;
    for assignment in &round.assignments {
        wtr.write_record([assignment.court.as_str(), assignment.players.join(", ").as_str()])?;
    }
    if !round.resting.is_empty() {
        wtr.write_record(["Rest", round.resting.join(", ").as_str()])?;
    }
    wtr.into_inner().map_err(|e| StoreError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{CourtAssignment, MatchType};
    use chrono::Local;

    #[test]
    fn writes_one_row_per_court() {
        let round = Round {
            number: 1,
            match_type: MatchType::Doubles,
            assignments: vec![
                CourtAssignment::new("1", vec!["A".into(), "B".into(), "C".into(), "D".into()]),
                CourtAssignment::new("2", vec!["E".into(), "F".into()]),
            ],
            resting: vec!["G".into()],
            generated_at: Local::now(),
        };
        let csv = String::from_utf8(to_table(&round).unwrap()).unwrap();
        assert_eq!(
            csv,
            "Court,Players\n1,\"A, B, C, D\"\n2,\"E, F\"\nRest,G\n"
        );
    }
}
