//! Integration tests for knockout progression: pairing, deciding, advancing, and reopening.

use football_tournament_sim::logic::finals::{
    initialize_knockout, reopen_knockout_match, set_manual_winner, simulate_knockout_match,
    simulate_round,
};
use football_tournament_sim::logic::group_play::simulate_all_groups;
use football_tournament_sim::logic::qualification::select_qualifiers;
use football_tournament_sim::models::{DecisionSource, LegFormat, MatchScore, MatchState};
use football_tournament_sim::{
    KnockoutBracket, RatingParams, Team, TournamentConfig, TournamentError, WorldCupPhase,
    WorldCupSession,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn teams(n: usize) -> Vec<Team> {
    (0..n)
        .map(|i| Team::new(format!("t{i}"), format!("Team {i}"), 80 - i as i32))
        .collect()
}

/// Bracket of `n` teams paired (t0, t1), (t2, t3), ...
fn bracket(n: usize) -> KnockoutBracket {
    let t = teams(n);
    let pairings = t.chunks(2).map(|p| (p[0].clone(), p[1].clone())).collect();
    KnockoutBracket::new(pairings, false).unwrap()
}

fn knockout_session(seed: u64) -> WorldCupSession {
    let mut session = WorldCupSession::start(TournamentConfig::seeded(seed)).unwrap();
    simulate_all_groups(&mut session);
    initialize_knockout(&mut session).unwrap();
    session
}

#[test]
fn bracket_size_must_be_a_power_of_two() {
    let t = teams(6);
    let pairings = t.chunks(2).map(|p| (p[0].clone(), p[1].clone())).collect();
    assert!(matches!(
        KnockoutBracket::new(pairings, false),
        Err(TournamentError::InvalidBracketSize(6))
    ));
}

#[test]
fn round_of_32_pairs_seed_i_with_seed_31_minus_i() {
    let mut session = WorldCupSession::start(TournamentConfig::seeded(31)).unwrap();
    simulate_all_groups(&mut session);
    let seeds = select_qualifiers(&session.standings(), &session.manual_thirds).unwrap();

    let first_round = initialize_knockout(&mut session).unwrap().to_vec();
    assert_eq!(first_round.len(), 16);
    for (i, m) in first_round.iter().enumerate() {
        assert_eq!(m.team_a.as_ref().unwrap().id, seeds[i].team.id);
        assert_eq!(m.team_b.as_ref().unwrap().id, seeds[31 - i].team.id);
        assert_eq!(m.state(), MatchState::Ready);
        assert_eq!(m.legs, LegFormat::Single);
    }
    assert_eq!(session.phase(), WorldCupPhase::Knockout);

    let mut seen = std::collections::HashSet::new();
    for m in &first_round {
        assert!(seen.insert(m.team_a.clone().unwrap().id));
        assert!(seen.insert(m.team_b.clone().unwrap().id));
    }
    assert_eq!(seen.len(), 32);
}

#[test]
fn initializing_twice_keeps_the_bracket() {
    let mut session = knockout_session(32);
    let ids: Vec<_> = session.knockout_rounds()[0].iter().map(|m| m.id).collect();
    let again: Vec<_> = initialize_knockout(&mut session)
        .unwrap()
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, again);
}

#[test]
fn deciding_a_match_twice_is_a_no_op() {
    let mut session = knockout_session(33);
    let id = session.knockout_rounds()[0][0].id;
    assert!(simulate_knockout_match(&mut session, id));
    let decided = session.knockout_rounds()[0][0].clone();
    assert!(!simulate_knockout_match(&mut session, id));
    assert!(!set_manual_winner(&mut session, id, "den"));
    assert_eq!(session.knockout_rounds()[0][0], decided);
}

#[test]
fn knockout_matches_never_end_level() {
    let mut rng = StdRng::seed_from_u64(34);
    let params = RatingParams::world_cup();
    for _ in 0..50 {
        let mut b = bracket(2);
        let id = b.rounds[0][0].id;
        assert!(b.simulate(id, &mut rng, &params));
        let (a, bb) = b.rounds[0][0].result.unwrap().score.totals();
        assert_ne!(a, bb);
    }
}

#[test]
fn next_round_appears_only_when_round_is_complete() {
    let mut rng = StdRng::seed_from_u64(35);
    let params = RatingParams::world_cup();
    let mut b = bracket(4);
    let first = b.rounds[0][0].id;
    let second = b.rounds[0][1].id;

    assert!(b.simulate(first, &mut rng, &params));
    assert_eq!(b.rounds.len(), 1);
    assert!(b.simulate(second, &mut rng, &params));
    assert_eq!(b.rounds.len(), 2);
    assert_eq!(b.rounds[1].len(), 1);
    assert_eq!(b.rounds[1][0].state(), MatchState::Ready);
    assert_eq!(b.rounds[1][0].team_a.as_ref(), b.rounds[0][0].winner());
    assert_eq!(b.rounds[1][0].team_b.as_ref(), b.rounds[0][1].winner());
}

#[test]
fn manual_winner_advances_with_two_nil() {
    let mut rng = StdRng::seed_from_u64(36);
    let params = RatingParams::world_cup();
    let mut b = bracket(4);
    let id = b.rounds[0][0].id;

    assert!(!b.set_manual_winner(id, "t3", &mut rng, &params));
    assert!(b.set_manual_winner(id, "t1", &mut rng, &params));
    let result = b.rounds[0][0].result.unwrap();
    assert_eq!(result.score, MatchScore::Single { a: 0, b: 2 });
    assert_eq!(result.source, DecisionSource::Manual);
    assert_eq!(b.rounds[0][0].winner_id().map(String::as_str), Some("t1"));
}

#[test]
fn champion_is_the_final_winner() {
    let mut rng = StdRng::seed_from_u64(37);
    let params = RatingParams::world_cup();
    let mut b = bracket(4);
    assert_eq!(b.simulate_round(&mut rng, &params), 2);
    assert!(b.champion.is_none());
    let final_id = b.rounds[1][0].id;
    let finalist = b.rounds[1][0].team_b.clone().unwrap();
    assert!(b.set_manual_winner(final_id, &finalist.id, &mut rng, &params));
    assert_eq!(b.champion.as_ref(), Some(&finalist));
    assert!(b.is_complete());
    assert_eq!(b.simulate_round(&mut rng, &params), 0);
}

#[test]
fn reopen_resets_only_the_dependent_path() {
    let mut rng = StdRng::seed_from_u64(38);
    let params = RatingParams::world_cup();
    let mut b = bracket(8);
    for slot in 0..4 {
        let m = &b.rounds[0][slot];
        let (id, winner) = (m.id, m.team_a.clone().unwrap().id);
        assert!(b.set_manual_winner(id, &winner, &mut rng, &params));
    }
    let semis: Vec<_> = b.rounds[1].iter().map(|m| m.id).collect();
    assert!(b.set_manual_winner(semis[0], "t0", &mut rng, &params));
    assert!(b.set_manual_winner(semis[1], "t4", &mut rng, &params));
    let final_id = b.rounds[2][0].id;
    assert!(b.set_manual_winner(final_id, "t0", &mut rng, &params));
    assert_eq!(b.champion.as_ref().map(|t| t.id.as_str()), Some("t0"));

    let first = b.rounds[0][0].id;
    assert!(b.reopen(first));

    assert_eq!(b.rounds[0][0].state(), MatchState::Ready);
    assert_eq!(b.rounds[1][0].state(), MatchState::Pending);
    assert!(b.rounds[1][0].team_a.is_none());
    assert!(b.rounds[1][1].is_decided());
    assert_eq!(b.rounds[2][0].state(), MatchState::Pending);
    assert!(b.champion.is_none());
    assert_eq!(b.current_round(), Some(0));

    assert!(b.set_manual_winner(first, "t1", &mut rng, &params));
    let semi = &b.rounds[1][0];
    assert_eq!(semi.state(), MatchState::Ready);
    assert_eq!(semi.team_a.as_ref().map(|t| t.id.as_str()), Some("t1"));
    assert_eq!(b.rounds[2][0].team_b.as_ref().map(|t| t.id.as_str()), Some("t4"));
    assert!(!b.reopen(b.rounds[2][0].id));
}

#[test]
fn full_world_cup_run_crowns_a_champion() {
    let mut session = knockout_session(39);
    let mut rounds_played = 0;
    while session.champion().is_none() {
        assert!(simulate_round(&mut session) > 0);
        rounds_played += 1;
        assert!(rounds_played <= 5);
    }
    let sizes: Vec<usize> = session.knockout_rounds().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![16, 8, 4, 2, 1]);
    assert_eq!(session.phase(), WorldCupPhase::Complete);

    let final_match = &session.knockout_rounds()[4][0];
    assert_eq!(final_match.winner(), session.champion());
    assert_eq!(simulate_round(&mut session), 0);
}

#[test]
fn reopening_the_final_goes_back_to_knockout_phase() {
    let mut session = knockout_session(40);
    while session.champion().is_none() {
        simulate_round(&mut session);
    }
    let final_id = session.knockout_rounds()[4][0].id;
    assert!(reopen_knockout_match(&mut session, final_id));
    assert_eq!(session.phase(), WorldCupPhase::Knockout);
    assert!(session.champion().is_none());
    assert_eq!(simulate_round(&mut session), 1);
    assert_eq!(session.phase(), WorldCupPhase::Complete);
}

#[test]
fn same_seed_same_champion() {
    let run = |seed| {
        let mut session = knockout_session(seed);
        while session.champion().is_none() {
            simulate_round(&mut session);
        }
        session.champion().map(|t| t.id.clone())
    };
    assert_eq!(run(41), run(41));
}

#[test]
fn round_of_32_bracket_counts_five_rounds() {
    let session = knockout_session(42);
    let wc = session.knockout.as_ref().unwrap();
    assert_eq!(wc.total_rounds(), 5);
    assert_eq!(wc.rounds_remaining(), Some(5));

    let b = bracket(8);
    assert_eq!(b.total_rounds(), 3);
    assert_eq!(b.rounds_remaining(), Some(3));
}

#[test]
fn decided_match_is_found_by_id() {
    let mut session = knockout_session(43);
    let id = session.knockout_rounds()[0][3].id;
    assert_eq!(session.knockout_match(id).map(|m| m.state()), Some(MatchState::Ready));
    assert!(simulate_knockout_match(&mut session, id));

    let m = session.knockout_match(id).unwrap();
    assert_eq!(m.state(), MatchState::Decided);
    assert_eq!(m, &session.knockout_rounds()[0][3]);
    assert!(session.knockout_match(uuid::Uuid::new_v4()).is_none());
}

#[test]
fn rounds_remaining_runs_out_with_the_champion() {
    let mut rng = StdRng::seed_from_u64(44);
    let params = RatingParams::world_cup();
    let mut b = bracket(4);
    assert_eq!(b.rounds_remaining(), Some(2));
    b.simulate_round(&mut rng, &params);
    assert_eq!(b.rounds_remaining(), Some(1));
    b.simulate_round(&mut rng, &params);
    assert_eq!(b.rounds_remaining(), None);
    assert_eq!(b.get(b.rounds[1][0].id).and_then(|m| m.winner()), b.champion.as_ref());
}
