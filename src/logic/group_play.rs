//! Group stage: simulating matches, manual results, and table overrides.

use crate::logic::qualification;
use crate::logic::rating::{simulate_match, RatingParams};
use crate::models::{
    Group, MatchId, MoveDirection, StandingsRow, TeamId, WorldCupPhase, WorldCupSession,
};
use rand::rngs::StdRng;

/// Highest score accepted for a hand-entered group result.
pub const MAX_MANUAL_GOALS: u32 = 99;

/// Play every unplayed match of `group` for which `pick` returns true. Returns how many were played.
fn play_matches(
    group: &mut Group,
    rng: &mut StdRng,
    params: &RatingParams,
    mut pick: impl FnMut(MatchId) -> bool,
) -> usize {
    let mut played = 0;
    for m in group.matches.iter_mut().filter(|m| !m.played() && pick(m.id)) {
        let (a, b) = simulate_match(rng, &m.team_a, &m.team_b, params);
        if m.record(a, b) {
            log::debug!(
                "Group {}: {} {}-{} {}",
                group.key,
                m.team_a.display_name(),
                a,
                b,
                m.team_b.display_name()
            );
            played += 1;
        }
    }
    if played > 0 {
        group.refresh_standings();
    }
    played
}

/// Simulate one group match. No-op (false) if it is unknown or already played.
pub fn simulate_group_match(session: &mut WorldCupSession, group_key: &str, match_id: MatchId) -> bool {
    if session.phase != WorldCupPhase::Groups {
        return false;
    }
    let rating = session.rating();
    let Some(group) = session.groups.iter_mut().find(|g| g.key == group_key) else {
        return false;
    };
    play_matches(group, &mut session.rng, &rating, |id| id == match_id) > 0
}

/// Simulate every unplayed match in one group, in list order.
pub fn simulate_group(session: &mut WorldCupSession, group_key: &str) -> usize {
    if session.phase != WorldCupPhase::Groups {
        return 0;
    }
    let rating = session.rating();
    let Some(group) = session.groups.iter_mut().find(|g| g.key == group_key) else {
        return 0;
    };
    play_matches(group, &mut session.rng, &rating, |_| true)
}

/// Simulate every unplayed match in every group.
pub fn simulate_all_groups(session: &mut WorldCupSession) -> usize {
    if session.phase != WorldCupPhase::Groups {
        return 0;
    }
    let rating = session.rating();
    let rng = &mut session.rng;
    let played: usize = session
        .groups
        .iter_mut()
        .map(|group| play_matches(group, rng, &rating, |_| true))
        .sum();
    if played == 0 {
        log::debug!("No group matches left to simulate");
    }
    played
}

/// Enter a result by hand for an unplayed match. Scores above `MAX_MANUAL_GOALS` are refused.
pub fn set_manual_match_result(
    session: &mut WorldCupSession,
    group_key: &str,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
) -> bool {
    if session.phase != WorldCupPhase::Groups
        || score_a > MAX_MANUAL_GOALS
        || score_b > MAX_MANUAL_GOALS
    {
        return false;
    }
    let Some(group) = session.group_mut(group_key) else {
        return false;
    };
    let recorded = group
        .match_mut(match_id)
        .is_some_and(|m| m.record(score_a, score_b));
    if recorded {
        group.refresh_standings();
    }
    recorded
}

/// Manual point nudge (+/-). The adjustment survives later recomputes; points never go below zero.
pub fn nudge_points(session: &mut WorldCupSession, group_key: &str, team_id: &str, delta: i32) -> bool {
    if session.phase != WorldCupPhase::Groups {
        return false;
    }
    let Some(group) = session.group_mut(group_key) else {
        return false;
    };
    let Some(row) = group.standings.iter().find(|r| r.team.id == team_id) else {
        return false;
    };
    // Clamp so the nudged total stays at zero or above.
    let earned = i32::try_from(row.earned_points()).unwrap_or(i32::MAX);
    let current = row.point_adjustment;
    let adjustment = current.saturating_add(delta).max(-earned);
    if adjustment == current {
        return false;
    }
    group.point_adjustments.insert(team_id.to_string(), adjustment);
    group.refresh_standings();
    true
}

/// Swap a table row with its neighbour. Overridden by the next recompute of the group.
pub fn move_team(
    session: &mut WorldCupSession,
    group_key: &str,
    index: usize,
    direction: MoveDirection,
) -> bool {
    if session.phase != WorldCupPhase::Groups {
        return false;
    }
    let Some(group) = session.group_mut(group_key) else {
        return false;
    };
    let other = match direction {
        MoveDirection::Up if index > 0 => index - 1,
        MoveDirection::Down if index + 1 < group.standings.len() => index + 1,
        _ => return false,
    };
    group.standings.swap(index, other);
    true
}

/// Replace the manual third-place order (team ids, best first).
pub fn set_manual_thirds_order(session: &mut WorldCupSession, ids: Vec<TeamId>) {
    session.manual_thirds = ids;
}

/// Third-placed teams across all groups, manual order applied.
pub fn third_place_ranking(session: &WorldCupSession) -> Vec<StandingsRow> {
    qualification::third_place_ranking(&session.standings(), &session.manual_thirds)
}

pub fn all_groups_complete(session: &WorldCupSession) -> bool {
    !session.groups.is_empty() && session.groups.iter().all(Group::is_complete)
}

