use std::io::Write;

use crate::schedule::Round;

/// Body lines per page, after the page title
pub const LINES_PER_PAGE: usize = 34;

const PAGE_BREAK: char = '\x0c';

/// One line per court: `Court <name>: <p1> vs <p2> [vs ...]`
pub fn court_line(court: &str, players: &[String]) -> String {
    format!("Court {}: {}", court, players.join(" vs "))
}

fn body_lines(round: &Round) -> Vec<String> {
    let mut lines: Vec<String> = round
        .assignments
        .iter()
        .map(|a| court_line(&a.court, &a.players))
        .collect();
    if !round.resting.is_empty() {
        lines.push(format!("Rest: {}", round.resting.join(", ")));
    }
    lines
}

/// Renders a round as a paginated plain-text document.
///
/// Every page opens with the round title; pages are separated by a form feed.
pub fn to_document(round: &Round) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let lines = body_lines(round);
    let title = format!("Tennis Schedule - Round {}", round.number);

    if lines.is_empty() {
        writeln!(out, "{}", title)?;
        return Ok(out);
    }

    for (page, chunk) in lines.chunks(LINES_PER_PAGE).enumerate() {
        if page > 0 {
            write!(out, "{}", PAGE_BREAK)?;
        }
        writeln!(out, "{}", title)?;
        writeln!(out)?;
        for line in chunk {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(out)
}
