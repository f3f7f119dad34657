//! Data structures for the simulator: teams, matches, tables, brackets, sessions.

mod bracket;
mod champions_league;
mod fixture;
mod game;
mod standings;
mod team;
mod tournament;

pub use bracket::{legs_for, KnockoutBracket};
pub use champions_league::{
    BracketHalf, ChampionsLeagueSession, ClPhase, ClTable, DirectQualifierPair, DrawnPair,
};
pub use fixture::{Fixture, FixtureWheel, Wheel, WheelMode};
pub use game::{
    DecisionSource, GroupMatch, KnockoutMatch, KnockoutResult, LegFormat, LegScore, MatchId,
    MatchScore, MatchState, Side, TwoLegScore,
};
pub use standings::StandingsRow;
pub use team::{Team, TeamId};
pub use tournament::{
    Group, MoveDirection, SessionId, TournamentConfig, TournamentError, WorldCupPhase,
    WorldCupSession,
};
