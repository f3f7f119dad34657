//! Group and knockout matches, scores, and match state.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of a match (team A or team B).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// How a knockout match was decided. Progression never looks at this.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    Simulated,
    Manual,
}

/// Lifecycle of a knockout match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    /// At least one team is not known yet.
    Pending,
    /// Both teams known, not played.
    Ready,
    /// Played; winner set.
    Decided,
}

/// Single match or home-and-away tie.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegFormat {
    #[default]
    Single,
    TwoLeg,
}

/// A round-robin group match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupMatch {
    pub id: MatchId,
    pub team_a: Team,
    pub team_b: Team,
    /// None until played.
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
}

impl GroupMatch {
    pub fn new(team_a: Team, team_b: Team) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_a,
            team_b,
            score_a: None,
            score_b: None,
        }
    }

    pub fn played(&self) -> bool {
        self.score_a.is_some() && self.score_b.is_some()
    }

    /// Record a result. A match that has already been played keeps its score.
    pub fn record(&mut self, score_a: u32, score_b: u32) -> bool {
        if self.played() {
            return false;
        }
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
        true
    }

    /// Goals (for, against) from the perspective of `team_id`, if it played in this match.
    pub fn goals_for(&self, team_id: &str) -> Option<(u32, u32)> {
        let (a, b) = (self.score_a?, self.score_b?);
        if self.team_a.id == team_id {
            Some((a, b))
        } else if self.team_b.id == team_id {
            Some((b, a))
        } else {
            None
        }
    }
}

/// Score of one leg, seen from the host.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LegScore {
    pub home: u32,
    pub away: u32,
}

/// Home-and-away tie between A and B. Leg 1 is hosted by B, leg 2 by A.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TwoLegScore {
    pub leg1: LegScore,
    pub leg2: LegScore,
    pub agg_a: u32,
    pub agg_b: u32,
}

impl TwoLegScore {
    /// Build from both legs; aggregate is always the sum with host orientation flipped.
    pub fn from_legs(leg1: LegScore, leg2: LegScore) -> Self {
        Self {
            leg1,
            leg2,
            agg_a: leg1.away + leg2.home,
            agg_b: leg1.home + leg2.away,
        }
    }
}

/// Final score of a knockout match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchScore {
    Single { a: u32, b: u32 },
    TwoLeg(TwoLegScore),
}

impl MatchScore {
    /// Goals (A, B) that decide the tie: full-time score or aggregate.
    pub fn totals(&self) -> (u32, u32) {
        match self {
            MatchScore::Single { a, b } => (*a, *b),
            MatchScore::TwoLeg(t) => (t.agg_a, t.agg_b),
        }
    }
}

/// Outcome of a decided knockout match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutResult {
    pub score: MatchScore,
    pub winner: Side,
    pub source: DecisionSource,
}

/// A knockout tie. Teams are absent until the feeding matches are decided.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutMatch {
    pub id: MatchId,
    /// Index of the round inside its bracket (0 = first round).
    pub round: usize,
    /// Position inside the round; feeds slot `slot / 2` of the next round.
    pub slot: usize,
    pub team_a: Option<Team>,
    pub team_b: Option<Team>,
    pub legs: LegFormat,
    pub result: Option<KnockoutResult>,
}

impl KnockoutMatch {
    pub fn new(
        round: usize,
        slot: usize,
        team_a: Option<Team>,
        team_b: Option<Team>,
        legs: LegFormat,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            slot,
            team_a,
            team_b,
            legs,
            result: None,
        }
    }

    pub fn state(&self) -> MatchState {
        match (&self.team_a, &self.team_b, &self.result) {
            (Some(_), Some(_), Some(_)) => MatchState::Decided,
            (Some(_), Some(_), None) => MatchState::Ready,
            _ => MatchState::Pending,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.state() == MatchState::Decided
    }

    pub fn team(&self, side: Side) -> Option<&Team> {
        match side {
            Side::A => self.team_a.as_ref(),
            Side::B => self.team_b.as_ref(),
        }
    }

    /// Which side `team_id` plays on, if it is in this match.
    pub fn side_of(&self, team_id: &str) -> Option<Side> {
        if self.team_a.as_ref().is_some_and(|t| t.id == team_id) {
            Some(Side::A)
        } else if self.team_b.as_ref().is_some_and(|t| t.id == team_id) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn winner(&self) -> Option<&Team> {
        let result = self.result.as_ref()?;
        self.team(result.winner)
    }

    pub fn winner_id(&self) -> Option<&TeamId> {
        self.winner().map(|t| &t.id)
    }
}
