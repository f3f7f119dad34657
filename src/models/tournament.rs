//! World Cup session state, configuration, and errors.

use crate::logic::rating::RatingParams;
use crate::logic::standings::compute_standings;
use crate::models::bracket::KnockoutBracket;
use crate::models::game::{GroupMatch, KnockoutMatch, MatchId};
use crate::models::standings::StandingsRow;
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// The group stage produced fewer teams than the bracket needs.
    NotEnoughQualifiers { required: usize, found: usize },
    /// A bracket must start from a power-of-two number of teams (given: teams).
    InvalidBracketSize(usize),
    /// A group assignment names a team missing from the team table.
    TeamNotFound(TeamId),
    /// The embedded team table could not be parsed.
    InvalidTeamTable(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughQualifiers { required, found } => {
                write!(f, "Need {} qualified teams for the knockout stage (found {})", required, found)
            }
            TournamentError::InvalidBracketSize(n) => {
                write!(f, "A knockout bracket needs a power-of-two number of teams (got {})", n)
            }
            TournamentError::TeamNotFound(id) => write!(f, "Team not found: {}", id),
            TournamentError::InvalidTeamTable(msg) => write!(f, "Invalid team table: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament session.
pub type SessionId = Uuid;

/// Options for a tournament run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Seed for reproducible runs; fresh entropy when absent.
    pub seed: Option<u64>,
    /// Rating model override; the mode's preset when absent.
    pub rating: Option<RatingParams>,
}

impl TournamentConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

pub(crate) fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

/// Current phase of a World Cup run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldCupPhase {
    /// Nothing drawn yet.
    #[default]
    Setup,
    /// Round-robin groups in progress.
    Groups,
    /// Single-elimination bracket in progress.
    Knockout,
    /// Champion crowned.
    Complete,
}

/// Direction for a manual table swap.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// One round-robin group: its teams, matches, and current table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub key: String,
    pub teams: Vec<Team>,
    pub matches: Vec<GroupMatch>,
    pub standings: Vec<StandingsRow>,
    /// Manual point nudges, kept across recomputes.
    pub point_adjustments: HashMap<TeamId, i32>,
}

impl Group {
    /// Create the group with every pairing played once (team order decides home side).
    pub fn new(key: impl Into<String>, teams: Vec<Team>) -> Self {
        let mut matches = Vec::new();
        for (i, a) in teams.iter().enumerate() {
            for b in &teams[i + 1..] {
                matches.push(GroupMatch::new(a.clone(), b.clone()));
            }
        }
        let mut group = Self {
            key: key.into(),
            teams,
            matches,
            standings: Vec::new(),
            point_adjustments: HashMap::new(),
        };
        group.refresh_standings();
        group
    }

    /// Recompute the table from scratch.
    pub fn refresh_standings(&mut self) {
        self.standings = compute_standings(&self.teams, &self.matches, &self.point_adjustments);
    }

    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(GroupMatch::played)
    }

    pub fn match_mut(&mut self, match_id: MatchId) -> Option<&mut GroupMatch> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }
}

/// Full World Cup state: groups, knockout bracket, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldCupSession {
    pub id: SessionId,
    pub config: TournamentConfig,
    pub phase: WorldCupPhase,
    pub started_at: Option<DateTime<Utc>>,
    pub groups: Vec<Group>,
    /// Manual ordering of the third-placed teams (team ids, best first).
    pub manual_thirds: Vec<TeamId>,
    pub knockout: Option<KnockoutBracket>,
    #[serde(skip, default = "entropy_rng")]
    pub(crate) rng: StdRng,
}

impl WorldCupSession {
    /// Create a session in Setup with no groups drawn.
    pub fn new(config: TournamentConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            rng: config.rng(),
            config,
            phase: WorldCupPhase::Setup,
            started_at: None,
            groups: Vec::new(),
            manual_thirds: Vec::new(),
            knockout: None,
        }
    }

    /// Rating model in effect for this run.
    pub fn rating(&self) -> RatingParams {
        self.config.rating.unwrap_or_else(RatingParams::world_cup)
    }

    pub fn phase(&self) -> WorldCupPhase {
        self.phase
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, key: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.key == key)
    }

    pub(crate) fn group_mut(&mut self, key: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.key == key)
    }

    /// Standings of every group, in group order.
    pub fn standings(&self) -> Vec<Vec<StandingsRow>> {
        self.groups.iter().map(|g| g.standings.clone()).collect()
    }

    pub fn knockout_rounds(&self) -> &[Vec<KnockoutMatch>] {
        self.knockout.as_ref().map(|k| k.rounds.as_slice()).unwrap_or(&[])
    }

    pub fn knockout_match(&self, match_id: MatchId) -> Option<&KnockoutMatch> {
        self.knockout.as_ref()?.get(match_id)
    }

    pub fn champion(&self) -> Option<&Team> {
        self.knockout.as_ref().and_then(|k| k.champion.as_ref())
    }

    /// Discard everything from the current run and go back to Setup.
    pub fn reset(&mut self) {
        self.phase = WorldCupPhase::Setup;
        self.started_at = None;
        self.groups.clear();
        self.manual_thirds.clear();
        self.knockout = None;
    }
}
