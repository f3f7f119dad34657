//! Picking the knockout field from the group tables.

use crate::logic::standings::sort_standings;
use crate::models::{StandingsRow, TeamId, TournamentError};

/// How many third-placed teams go through.
pub const BEST_THIRDS: usize = 8;

/// Size of the World Cup knockout field.
pub const WORLD_CUP_QUALIFIERS: usize = 32;

/// Third-placed rows of every group, in table order, with a manual ordering applied on top.
pub fn third_place_ranking(
    group_standings: &[Vec<StandingsRow>],
    manual_order: &[TeamId],
) -> Vec<StandingsRow> {
    let mut thirds: Vec<StandingsRow> = group_standings
        .iter()
        .filter_map(|rows| rows.get(2).cloned())
        .collect();
    sort_standings(&mut thirds);
    apply_manual_order(thirds, manual_order)
}

/// Reorder `computed` so the rows named in `ids` come first, in that order.
/// Rows not named keep their computed order after them; ids without a row are ignored.
pub fn apply_manual_order(computed: Vec<StandingsRow>, ids: &[TeamId]) -> Vec<StandingsRow> {
    if ids.is_empty() {
        return computed;
    }
    let mut remaining: Vec<Option<StandingsRow>> = computed.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(remaining.len());
    for id in ids {
        let found = remaining
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|row| &row.team.id == id));
        if let Some(row) = found.and_then(Option::take) {
            ordered.push(row);
        }
    }
    ordered.extend(remaining.into_iter().flatten());
    ordered
}

/// Seeded qualifier list: group winners (seeds 1-12), runners-up (13-24), then the
/// best eight third-placed teams (25-32). Winners and runners-up are re-ranked across groups
/// with the table order.
pub fn select_qualifiers(
    group_standings: &[Vec<StandingsRow>],
    manual_thirds: &[TeamId],
) -> Result<Vec<StandingsRow>, TournamentError> {
    let mut winners: Vec<StandingsRow> = group_standings
        .iter()
        .filter_map(|rows| rows.first().cloned())
        .collect();
    let mut runners_up: Vec<StandingsRow> = group_standings
        .iter()
        .filter_map(|rows| rows.get(1).cloned())
        .collect();
    sort_standings(&mut winners);
    sort_standings(&mut runners_up);

    let best_thirds = third_place_ranking(group_standings, manual_thirds)
        .into_iter()
        .take(BEST_THIRDS);

    let mut qualifiers: Vec<StandingsRow> = winners
        .into_iter()
        .chain(runners_up)
        .chain(best_thirds)
        .collect();

    if qualifiers.len() < WORLD_CUP_QUALIFIERS {
        return Err(TournamentError::NotEnoughQualifiers {
            required: WORLD_CUP_QUALIFIERS,
            found: qualifiers.len(),
        });
    }
    qualifiers.truncate(WORLD_CUP_QUALIFIERS);
    Ok(qualifiers)
}
