//! Football tournament simulator: World Cup 2026 and Champions League knockout runs.

pub mod data;
pub mod logic;
pub mod models;

pub use logic::{simulate_match, start_champions_league, start_world_cup, Decision, RatingParams};
pub use models::{
    ChampionsLeagueSession, ClPhase, FixtureWheel, KnockoutBracket, KnockoutMatch, MatchId,
    SessionId, StandingsRow, Team, TeamId, TournamentConfig, TournamentError, WheelMode,
    WorldCupPhase, WorldCupSession,
};
