//! Group tables computed from played matches.

use crate::models::{GroupMatch, StandingsRow, Team, TeamId};
use std::collections::HashMap;

/// Compute the sorted table for one group.
///
/// Only played matches count. Rows are sorted by points, goal difference, then goals for;
/// the sort is stable, so teams level on all three keep the order of `teams`.
/// `adjustments` holds manual point nudges keyed by team id.
pub fn compute_standings(
    teams: &[Team],
    matches: &[GroupMatch],
    adjustments: &HashMap<TeamId, i32>,
) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = teams
        .iter()
        .map(|team| {
            let mut row = StandingsRow::new(team.clone());
            for m in matches {
                if let Some((scored, conceded)) = m.goals_for(&team.id) {
                    row.add_result(scored, conceded);
                }
            }
            if let Some(&adjustment) = adjustments.get(&team.id) {
                row.set_adjustment(adjustment);
            }
            row
        })
        .collect();
    sort_standings(&mut rows);
    rows
}

/// Stable sort by the table order.
pub fn sort_standings(rows: &mut [StandingsRow]) {
    rows.sort_by(|a, b| a.ranking_cmp(b));
}
