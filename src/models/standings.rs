//! Group table row.

use crate::models::team::Team;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One team's line in a group table. Derived from played matches, never edited in place
/// except through an explicit point adjustment.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team: Team,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    /// Manual point nudge already folded into `points`.
    pub point_adjustment: i32,
}

impl StandingsRow {
    /// Empty row for a team that has not played yet.
    pub fn new(team: Team) -> Self {
        Self {
            team,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            point_adjustment: 0,
        }
    }

    /// Add one played match (goals scored, goals conceded).
    pub fn add_result(&mut self, scored: u32, conceded: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        let counter = match scored.cmp(&conceded) {
            Ordering::Greater => &mut self.won,
            Ordering::Equal => &mut self.drawn,
            Ordering::Less => &mut self.lost,
        };
        *counter = counter.saturating_add(1);
        self.refresh_totals();
    }

    pub fn set_adjustment(&mut self, adjustment: i32) {
        self.point_adjustment = adjustment;
        self.refresh_totals();
    }

    fn refresh_totals(&mut self) {
        let difference = i64::from(self.goals_for) - i64::from(self.goals_against);
        self.goal_difference = i32::try_from(difference)
            .unwrap_or(if difference > 0 { i32::MAX } else { i32::MIN });
        let total = self.earned_points() + i64::from(self.point_adjustment);
        self.points = u32::try_from(total.max(0)).unwrap_or(u32::MAX);
    }

    /// Points from results alone, before any adjustment.
    pub fn earned_points(&self) -> i64 {
        3 * i64::from(self.won) + i64::from(self.drawn)
    }

    /// Table order: points, then goal difference, then goals for (all descending).
    pub fn ranking_cmp(&self, other: &Self) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then(other.goal_difference.cmp(&self.goal_difference))
            .then(other.goals_for.cmp(&self.goals_for))
    }
}
