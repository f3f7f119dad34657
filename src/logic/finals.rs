//! World Cup knockout stage: seeding the round of 32 and playing it through to the final.

use crate::logic::bracket::seeded_pairings;
use crate::logic::group_play::all_groups_complete;
use crate::logic::knockout::Decision;
use crate::logic::qualification::select_qualifiers;
use crate::models::{
    KnockoutBracket, KnockoutMatch, MatchId, Team, TournamentError, WorldCupPhase,
    WorldCupSession,
};

/// Build the round of 32 from the final group tables (Groups -> Knockout).
///
/// Before every group match is played, or once the knockout already exists, the state is left
/// as is and the current first round (possibly empty) is returned. Fewer than 32 qualifiers is
/// an error.
pub fn initialize_knockout(
    session: &mut WorldCupSession,
) -> Result<&[KnockoutMatch], TournamentError> {
    if session.phase == WorldCupPhase::Groups && all_groups_complete(session) {
        let qualifiers = select_qualifiers(&session.standings(), &session.manual_thirds)?;
        let seeds: Vec<Team> = qualifiers.into_iter().map(|row| row.team).collect();
        let bracket = KnockoutBracket::new(seeded_pairings(&seeds)?, false)?;
        session.knockout = Some(bracket);
        session.phase = WorldCupPhase::Knockout;
        log::info!("World Cup {}: knockout stage initialized", session.id);
    } else {
        log::debug!("Knockout not initialized in phase {:?}", session.phase);
    }
    Ok(session.knockout_rounds().first().map(Vec::as_slice).unwrap_or(&[]))
}

fn decide(session: &mut WorldCupSession, match_id: MatchId, decision: Decision) -> bool {
    let rating = session.rating();
    let Some(bracket) = session.knockout.as_mut() else {
        return false;
    };
    let changed = bracket.decide(match_id, &decision, &mut session.rng, &rating);
    refresh_phase(session);
    changed
}

fn refresh_phase(session: &mut WorldCupSession) {
    if let Some(bracket) = &session.knockout {
        session.phase = if bracket.is_complete() {
            WorldCupPhase::Complete
        } else {
            WorldCupPhase::Knockout
        };
    }
}

/// Simulate one Ready knockout match.
pub fn simulate_knockout_match(session: &mut WorldCupSession, match_id: MatchId) -> bool {
    decide(session, match_id, Decision::Simulated)
}

/// Pick the winner of one Ready knockout match by hand.
pub fn set_manual_winner(session: &mut WorldCupSession, match_id: MatchId, winner: &str) -> bool {
    decide(session, match_id, Decision::Manual(winner.to_string()))
}

/// Simulate what is left of the current round.
pub fn simulate_round(session: &mut WorldCupSession) -> usize {
    let rating = session.rating();
    let Some(bracket) = session.knockout.as_mut() else {
        return 0;
    };
    let decided = bracket.simulate_round(&mut session.rng, &rating);
    refresh_phase(session);
    decided
}

/// Undo a decided match; dependent later matches are reset.
pub fn reopen_knockout_match(session: &mut WorldCupSession, match_id: MatchId) -> bool {
    let Some(bracket) = session.knockout.as_mut() else {
        return false;
    };
    let changed = bracket.reopen(match_id);
    refresh_phase(session);
    changed
}
