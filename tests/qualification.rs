//! Integration tests for picking and seeding the World Cup knockout field.

use football_tournament_sim::logic::group_play::{
    set_manual_thirds_order, simulate_all_groups, third_place_ranking,
};
use football_tournament_sim::logic::qualification::{apply_manual_order, select_qualifiers};
use football_tournament_sim::{StandingsRow, Team, TeamId, TournamentConfig, WorldCupSession};

fn row(id: &str, points: u32) -> StandingsRow {
    let mut row = StandingsRow::new(Team::new(id, id.to_uppercase(), 80));
    row.points = points;
    row
}

fn ids(rows: &[StandingsRow]) -> Vec<&str> {
    rows.iter().map(|r| r.team.id.as_str()).collect()
}

fn played_session(seed: u64) -> WorldCupSession {
    let mut session = WorldCupSession::start(TournamentConfig::seeded(seed)).unwrap();
    simulate_all_groups(&mut session);
    session
}

#[test]
fn manual_order_puts_named_rows_first() {
    let computed = vec![row("x", 6), row("y", 4), row("z", 3)];
    let ordered = apply_manual_order(computed, &["z".to_string(), "nobody".to_string()]);
    assert_eq!(ids(&ordered), vec!["z", "x", "y"]);
}

#[test]
fn empty_manual_order_keeps_computed_order() {
    let computed = vec![row("x", 6), row("y", 4)];
    let ordered = apply_manual_order(computed, &[]);
    assert_eq!(ids(&ordered), vec!["x", "y"]);
}

#[test]
fn qualifiers_are_winners_then_runners_up_then_best_thirds() {
    let session = played_session(21);
    let standings = session.standings();
    let qualifiers = select_qualifiers(&standings, &[]).unwrap();
    assert_eq!(qualifiers.len(), 32);

    let winners: Vec<&str> = standings.iter().map(|g| g[0].team.id.as_str()).collect();
    let runners_up: Vec<&str> = standings.iter().map(|g| g[1].team.id.as_str()).collect();
    for q in &qualifiers[..12] {
        assert!(winners.contains(&q.team.id.as_str()));
    }
    for q in &qualifiers[12..24] {
        assert!(runners_up.contains(&q.team.id.as_str()));
    }

    let thirds = third_place_ranking(&session);
    assert_eq!(thirds.len(), 12);
    assert_eq!(ids(&qualifiers[24..]), ids(&thirds[..8]));

    for window in qualifiers[..12].windows(2) {
        assert!(window[0].ranking_cmp(&window[1]).is_le());
    }
}

#[test]
fn manual_thirds_order_decides_who_goes_through() {
    let mut session = played_session(22);
    let mut order: Vec<TeamId> = third_place_ranking(&session)
        .into_iter()
        .map(|r| r.team.id)
        .collect();
    order.reverse();
    set_manual_thirds_order(&mut session, order.clone());

    let qualifiers = select_qualifiers(&session.standings(), &session.manual_thirds).unwrap();
    let chosen: Vec<&str> = qualifiers[24..].iter().map(|r| r.team.id.as_str()).collect();
    let expected: Vec<&str> = order[..8].iter().map(String::as_str).collect();
    assert_eq!(chosen, expected);
}
