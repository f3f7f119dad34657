//! Champions League session: playoffs, the left/right draw, and the bracket.

use crate::logic::rating::RatingParams;
use crate::models::bracket::KnockoutBracket;
use crate::models::game::{KnockoutMatch, MatchId};
use crate::models::team::Team;
use crate::models::tournament::{entropy_rng, SessionId, TournamentConfig};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Two direct qualifiers that must end up in opposite halves of the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DirectQualifierPair {
    pub pair_id: u8,
    pub team_a: Team,
    pub team_b: Team,
}

/// A pair after the draw: which team went left and which went right.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DrawnPair {
    pub pair_id: u8,
    pub left: Team,
    pub right: Team,
}

/// Half of the bracket. The halves only meet in the final.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketHalf {
    Left,
    Right,
}

/// Current phase of a Champions League run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClPhase {
    #[default]
    Setup,
    /// Two-leg playoff ties (and the draw once they are all decided).
    Playoffs,
    RoundOf16,
    QuarterFinals,
    SemiFinals,
    Final,
    Complete,
}

/// Static line-up of a Champions League knockout stage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClTable {
    pub direct_pairs: Vec<DirectQualifierPair>,
    /// Playoff ties as (home, away); home is team A.
    pub left_playoffs: Vec<(Team, Team)>,
    pub right_playoffs: Vec<(Team, Team)>,
}

/// Full Champions League state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChampionsLeagueSession {
    pub id: SessionId,
    pub config: TournamentConfig,
    pub started_at: Option<DateTime<Utc>>,
    pub direct_pairs: Vec<DirectQualifierPair>,
    /// Playoff ties, left half first. Each feeds the round of 16 slot with the same index.
    pub playoffs: Vec<KnockoutMatch>,
    /// Number of playoff ties belonging to the left half.
    pub left_playoff_count: usize,
    pub draw: Option<Vec<DrawnPair>>,
    pub knockout: Option<KnockoutBracket>,
    #[serde(skip, default = "entropy_rng")]
    pub(crate) rng: StdRng,
}

impl ChampionsLeagueSession {
    /// Create a session in Setup with nothing loaded.
    pub fn new(config: TournamentConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            rng: config.rng(),
            config,
            started_at: None,
            direct_pairs: Vec::new(),
            playoffs: Vec::new(),
            left_playoff_count: 0,
            draw: None,
            knockout: None,
        }
    }

    pub fn rating(&self) -> RatingParams {
        self.config.rating.unwrap_or_else(RatingParams::champions_league)
    }

    /// Phase derived from what has been created and decided so far.
    pub fn phase(&self) -> ClPhase {
        match &self.knockout {
            None if self.playoffs.is_empty() => ClPhase::Setup,
            None => ClPhase::Playoffs,
            Some(bracket) => match bracket.rounds_remaining() {
                None => ClPhase::Complete,
                Some(1) => ClPhase::Final,
                Some(2) => ClPhase::SemiFinals,
                Some(3) => ClPhase::QuarterFinals,
                Some(_) => ClPhase::RoundOf16,
            },
        }
    }

    pub fn playoffs(&self) -> &[KnockoutMatch] {
        &self.playoffs
    }

    pub fn playoff_half(&self, match_id: MatchId) -> Option<BracketHalf> {
        let index = self.playoffs.iter().position(|m| m.id == match_id)?;
        Some(if index < self.left_playoff_count {
            BracketHalf::Left
        } else {
            BracketHalf::Right
        })
    }

    pub fn draw(&self) -> Option<&[DrawnPair]> {
        self.draw.as_deref()
    }

    pub fn knockout_rounds(&self) -> &[Vec<KnockoutMatch>] {
        self.knockout.as_ref().map(|k| k.rounds.as_slice()).unwrap_or(&[])
    }

    pub fn knockout_match(&self, match_id: MatchId) -> Option<&KnockoutMatch> {
        self.knockout.as_ref()?.get(match_id)
    }

    /// Half a knockout match belongs to; None for the final.
    pub fn knockout_half(&self, match_id: MatchId) -> Option<BracketHalf> {
        let bracket = self.knockout.as_ref()?;
        let (round, slot) = bracket.position(match_id)?;
        let size = bracket.rounds[round].len();
        if size < 2 {
            return None;
        }
        Some(if slot < size / 2 {
            BracketHalf::Left
        } else {
            BracketHalf::Right
        })
    }

    pub fn champion(&self) -> Option<&Team> {
        self.knockout.as_ref().and_then(|k| k.champion.as_ref())
    }

    /// Discard everything from the current run and go back to Setup.
    pub fn reset(&mut self) {
        self.started_at = None;
        self.direct_pairs.clear();
        self.playoffs.clear();
        self.left_playoff_count = 0;
        self.draw = None;
        self.knockout = None;
    }
}
