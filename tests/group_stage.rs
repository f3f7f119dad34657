//! Integration tests for the group stage: tables, manual results, and overrides.

use football_tournament_sim::logic::finals::initialize_knockout;
use football_tournament_sim::logic::group_play::{
    move_team, nudge_points, set_manual_match_result, simulate_all_groups, simulate_group,
    simulate_group_match, MAX_MANUAL_GOALS,
};
use football_tournament_sim::logic::setup::start_world_cup_with_groups;
use football_tournament_sim::logic::standings::compute_standings;
use football_tournament_sim::models::{MoveDirection, StandingsRow};
use football_tournament_sim::{
    Team, TournamentConfig, TournamentError, WorldCupPhase, WorldCupSession,
};
use std::collections::HashMap;

fn team(id: &str, strength: i32) -> Team {
    Team::new(id, id.to_uppercase(), strength)
}

fn scripted_session() -> WorldCupSession {
    let mut session = WorldCupSession::new(TournamentConfig::seeded(42));
    let teams = vec![team("a", 85), team("b", 80), team("c", 75), team("d", 70)];
    start_world_cup_with_groups(&mut session, vec![("A".to_string(), teams)]);
    session
}

/// Matches are created as a-b, a-c, a-d, b-c, b-d, c-d.
fn play_script(session: &mut WorldCupSession) {
    let scores = [(2, 0), (1, 1), (3, 0), (1, 0), (0, 0), (2, 2)];
    let ids: Vec<_> = session.group("A").unwrap().matches.iter().map(|m| m.id).collect();
    for (id, (a, b)) in ids.into_iter().zip(scores) {
        assert!(set_manual_match_result(session, "A", id, a, b));
    }
}

fn order(session: &WorldCupSession) -> Vec<String> {
    session
        .group("A")
        .unwrap()
        .standings
        .iter()
        .map(|r| r.team.id.clone())
        .collect()
}

#[test]
fn start_builds_full_round_robin() {
    let session = WorldCupSession::start(TournamentConfig::seeded(1)).unwrap();
    assert_eq!(session.phase(), WorldCupPhase::Groups);
    assert_eq!(session.groups().len(), 12);
    for group in session.groups() {
        assert_eq!(group.teams.len(), 4);
        assert_eq!(group.matches.len(), 6);
        assert_eq!(group.standings.len(), 4);
    }
    assert!(session.started_at.is_some());
}

#[test]
fn scripted_group_table() {
    let mut session = scripted_session();
    play_script(&mut session);

    let rows = &session.group("A").unwrap().standings;
    assert_eq!(order(&session), vec!["a", "b", "c", "d"]);

    assert_eq!((rows[0].won, rows[0].drawn, rows[0].lost), (2, 1, 0));
    assert_eq!(rows[0].points, 7);
    assert_eq!((rows[0].goals_for, rows[0].goals_against), (6, 1));
    assert_eq!(rows[0].goal_difference, 5);

    assert_eq!(rows[1].points, 4);
    assert_eq!(rows[1].goal_difference, -1);

    // c and d are level on points; goal difference splits them
    assert_eq!(rows[2].points, 2);
    assert_eq!(rows[3].points, 2);
    assert_eq!(rows[2].goal_difference, -1);
    assert_eq!(rows[3].goal_difference, -3);
}

#[test]
fn played_match_keeps_its_score() {
    let mut session = scripted_session();
    play_script(&mut session);
    let id = session.group("A").unwrap().matches[0].id;
    assert!(!set_manual_match_result(&mut session, "A", id, 0, 5));
    assert!(!simulate_group_match(&mut session, "A", id));
    assert_eq!(session.group("A").unwrap().matches[0].score_a, Some(2));
}

#[test]
fn unknown_group_or_match_is_a_no_op() {
    let mut session = scripted_session();
    let id = session.group("A").unwrap().matches[0].id;
    assert!(!simulate_group_match(&mut session, "Z", id));
    assert!(!simulate_group_match(&mut session, "A", uuid::Uuid::new_v4()));
    assert_eq!(simulate_group(&mut session, "Z"), 0);
}

#[test]
fn standings_invariants_hold_after_simulation() {
    let mut session = WorldCupSession::start(TournamentConfig::seeded(7)).unwrap();
    assert_eq!(simulate_all_groups(&mut session), 72);

    for group in session.groups() {
        let mut scored = 0;
        let mut conceded = 0;
        for row in &group.standings {
            assert_eq!(row.played, 3);
            assert_eq!(row.won + row.drawn + row.lost, row.played);
            assert_eq!(row.points, 3 * row.won + row.drawn);
            assert_eq!(
                row.goal_difference,
                row.goals_for as i32 - row.goals_against as i32
            );
            scored += row.goals_for;
            conceded += row.goals_against;
        }
        assert_eq!(scored, conceded);
        for pair in group.standings.windows(2) {
            assert!(pair[0].ranking_cmp(&pair[1]).is_le());
        }
    }
}

#[test]
fn simulating_again_changes_nothing() {
    let mut session = WorldCupSession::start(TournamentConfig::seeded(8)).unwrap();
    simulate_all_groups(&mut session);
    let before = session.standings();
    assert_eq!(simulate_all_groups(&mut session), 0);
    assert_eq!(simulate_group(&mut session, "A"), 0);
    assert_eq!(session.standings(), before);
}

#[test]
fn teams_level_on_everything_keep_input_order() {
    let teams = vec![team("w", 70), team("x", 90), team("y", 80), team("z", 60)];
    let rows = compute_standings(&teams, &[], &HashMap::new());
    let ids: Vec<_> = rows.iter().map(|r| r.team.id.as_str()).collect();
    assert_eq!(ids, vec!["w", "x", "y", "z"]);
}

#[test]
fn nudge_survives_recompute_and_reorders() {
    let mut session = scripted_session();
    play_script(&mut session);

    assert!(nudge_points(&mut session, "A", "d", 3));
    assert_eq!(order(&session), vec!["a", "d", "b", "c"]);
    let d = &session.group("A").unwrap().standings[1];
    assert_eq!(d.points, 5);
    assert_eq!(d.point_adjustment, 3);
}

#[test]
fn nudge_never_takes_points_below_zero() {
    let mut session = scripted_session();
    play_script(&mut session);

    assert!(nudge_points(&mut session, "A", "c", -10));
    let c = session
        .group("A")
        .unwrap()
        .standings
        .iter()
        .find(|r| r.team.id == "c")
        .unwrap();
    assert_eq!(c.points, 0);
    assert!(!nudge_points(&mut session, "A", "c", -1));
    assert!(!nudge_points(&mut session, "A", "nobody", 1));
}

#[test]
fn move_team_swaps_neighbours() {
    let mut session = scripted_session();
    play_script(&mut session);

    assert!(move_team(&mut session, "A", 1, MoveDirection::Up));
    assert_eq!(order(&session), vec!["b", "a", "c", "d"]);
    assert!(!move_team(&mut session, "A", 0, MoveDirection::Up));
    assert!(!move_team(&mut session, "A", 3, MoveDirection::Down));
    assert!(move_team(&mut session, "A", 2, MoveDirection::Down));
    assert_eq!(order(&session), vec!["b", "a", "d", "c"]);
}

#[test]
fn knockout_waits_for_unplayed_groups() {
    let mut session = WorldCupSession::start(TournamentConfig::seeded(9)).unwrap();
    simulate_group(&mut session, "A");
    let first_round = initialize_knockout(&mut session).unwrap();
    assert!(first_round.is_empty());
    assert_eq!(session.phase(), WorldCupPhase::Groups);
    assert!(session.knockout.is_none());
}

#[test]
fn too_few_groups_cannot_fill_the_bracket() {
    let mut session = WorldCupSession::new(TournamentConfig::seeded(10));
    let groups = vec![
        ("A".to_string(), vec![team("a1", 80), team("a2", 78), team("a3", 76), team("a4", 74)]),
        ("B".to_string(), vec![team("b1", 80), team("b2", 78), team("b3", 76), team("b4", 74)]),
    ];
    start_world_cup_with_groups(&mut session, groups);
    simulate_all_groups(&mut session);

    let result = initialize_knockout(&mut session);
    assert!(matches!(
        result,
        Err(TournamentError::NotEnoughQualifiers { required: 32, found: 6 })
    ));
    assert_eq!(session.phase(), WorldCupPhase::Groups);
}

#[test]
fn group_operations_are_locked_outside_groups_phase() {
    let mut session = WorldCupSession::new(TournamentConfig::seeded(11));
    assert_eq!(session.phase(), WorldCupPhase::Setup);
    assert_eq!(simulate_all_groups(&mut session), 0);
    assert!(!nudge_points(&mut session, "A", "den", 1));
}

#[test]
fn absurd_manual_scores_are_refused() {
    let mut session = scripted_session();
    let id = session.group("A").unwrap().matches[0].id;

    assert!(!set_manual_match_result(&mut session, "A", id, u32::MAX, 0));
    assert!(!set_manual_match_result(&mut session, "A", id, 0, MAX_MANUAL_GOALS + 1));
    let group = session.group("A").unwrap();
    assert!(!group.matches[0].played());
    assert!(group.standings.iter().all(|r| r.played == 0));

    assert!(set_manual_match_result(&mut session, "A", id, MAX_MANUAL_GOALS, 0));
    let a = &session.group("A").unwrap().standings[0];
    assert_eq!(a.goals_for, MAX_MANUAL_GOALS);
}

#[test]
fn table_totals_saturate_instead_of_wrapping() {
    let mut row = StandingsRow::new(team("a", 80));
    row.add_result(u32::MAX, 0);
    row.add_result(5, 0);
    assert_eq!(row.goals_for, u32::MAX);
    assert_eq!(row.goal_difference, i32::MAX);
    assert_eq!(row.points, 6);

    let mut row = StandingsRow::new(team("b", 80));
    row.add_result(0, u32::MAX);
    assert_eq!(row.goal_difference, i32::MIN);
    row.set_adjustment(i32::MAX);
    assert_eq!(row.points, i32::MAX as u32);
}

#[test]
fn huge_nudges_clamp_without_overflow() {
    let mut session = scripted_session();
    play_script(&mut session);

    assert!(nudge_points(&mut session, "A", "a", i32::MAX));
    assert!(!nudge_points(&mut session, "A", "a", 1));
    let points = |session: &WorldCupSession| {
        let group = session.group("A").unwrap();
        group.standings.iter().find(|r| r.team.id == "a").unwrap().points
    };
    assert_eq!(points(&session), i32::MAX as u32 + 7);

    assert!(nudge_points(&mut session, "A", "a", i32::MIN));
    assert_eq!(points(&session), 6);
    assert!(nudge_points(&mut session, "A", "a", i32::MIN));
    assert_eq!(points(&session), 0);
}
