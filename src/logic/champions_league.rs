//! Champions League flow: two-leg playoffs, the left/right draw, then the bracket.

use crate::logic::bracket::{perform_draw as draw_pairs, round_of_16_pairings};
use crate::logic::knockout::{decide_match, Decision};
use crate::models::{
    ChampionsLeagueSession, KnockoutBracket, MatchId, Team, TournamentError,
};

fn decide_playoff(session: &mut ChampionsLeagueSession, match_id: MatchId, decision: Decision) -> bool {
    if session.draw.is_some() {
        return false;
    }
    let rating = session.rating();
    let Some(m) = session.playoffs.iter_mut().find(|m| m.id == match_id) else {
        return false;
    };
    decide_match(m, &decision, &mut session.rng, &rating)
}

/// Simulate one two-leg playoff tie.
pub fn simulate_playoff(session: &mut ChampionsLeagueSession, match_id: MatchId) -> bool {
    decide_playoff(session, match_id, Decision::Simulated)
}

/// Pick a playoff winner by hand (shown as 3-0 on aggregate).
pub fn set_playoff_winner(session: &mut ChampionsLeagueSession, match_id: MatchId, winner: &str) -> bool {
    decide_playoff(session, match_id, Decision::Manual(winner.to_string()))
}

/// Simulate every undecided playoff tie, left half first.
pub fn simulate_all_playoffs(session: &mut ChampionsLeagueSession) -> usize {
    let ids: Vec<MatchId> = session.playoffs.iter().map(|m| m.id).collect();
    ids.into_iter()
        .filter(|&id| simulate_playoff(session, id))
        .count()
}

pub fn all_playoffs_decided(session: &ChampionsLeagueSession) -> bool {
    !session.playoffs.is_empty() && session.playoffs.iter().all(|m| m.is_decided())
}

/// Draw the direct qualifiers into the two halves and build the round of 16.
///
/// Does nothing (Ok(false)) until every playoff tie is decided, or once the draw has happened.
pub fn perform_draw(session: &mut ChampionsLeagueSession) -> Result<bool, TournamentError> {
    if session.draw.is_some() || !all_playoffs_decided(session) {
        return Ok(false);
    }
    let winners: Vec<Team> = session
        .playoffs
        .iter()
        .filter_map(|m| m.winner().cloned())
        .collect();
    let (left_winners, right_winners) = winners.split_at(session.left_playoff_count.min(winners.len()));

    let drawn = draw_pairs(&session.direct_pairs, &mut session.rng);
    let pairings = round_of_16_pairings(&drawn, left_winners, right_winners)?;
    let bracket = KnockoutBracket::new(pairings, true)?;

    for pair in &drawn {
        log::info!(
            "Draw pair {}: {} left, {} right",
            pair.pair_id,
            pair.left.display_name(),
            pair.right.display_name()
        );
    }
    session.draw = Some(drawn);
    session.knockout = Some(bracket);
    Ok(true)
}

fn decide(session: &mut ChampionsLeagueSession, match_id: MatchId, decision: Decision) -> bool {
    let rating = session.rating();
    let Some(bracket) = session.knockout.as_mut() else {
        return false;
    };
    bracket.decide(match_id, &decision, &mut session.rng, &rating)
}

/// Simulate one Ready bracket match (two legs before the final, one match in the final).
pub fn simulate_knockout_match(session: &mut ChampionsLeagueSession, match_id: MatchId) -> bool {
    decide(session, match_id, Decision::Simulated)
}

pub fn set_manual_winner(session: &mut ChampionsLeagueSession, match_id: MatchId, winner: &str) -> bool {
    decide(session, match_id, Decision::Manual(winner.to_string()))
}

/// Simulate what is left of the current round across both halves.
pub fn simulate_round(session: &mut ChampionsLeagueSession) -> usize {
    let rating = session.rating();
    match session.knockout.as_mut() {
        Some(bracket) => bracket.simulate_round(&mut session.rng, &rating),
        None => 0,
    }
}

pub fn reopen_knockout_match(session: &mut ChampionsLeagueSession, match_id: MatchId) -> bool {
    session
        .knockout
        .as_mut()
        .is_some_and(|bracket| bracket.reopen(match_id))
}
