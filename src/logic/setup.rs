//! Setup phase: drawing groups / loading playoff ties and entering the first playing phase.

use crate::data;
use crate::models::{
    ChampionsLeagueSession, ClTable, Group, KnockoutMatch, LegFormat, Team, TournamentConfig,
    TournamentError, WorldCupPhase, WorldCupSession,
};
use chrono::Utc;

/// Start the World Cup with the fixed 2026 group draw. Setup -> Groups.
pub fn start_world_cup(session: &mut WorldCupSession) -> Result<(), TournamentError> {
    let groups = data::world_cup_groups()?;
    start_world_cup_with_groups(session, groups);
    Ok(())
}

/// Start the World Cup with caller-supplied groups. Any previous run is discarded.
pub fn start_world_cup_with_groups(session: &mut WorldCupSession, groups: Vec<(String, Vec<Team>)>) {
    session.reset();
    session.groups = groups
        .into_iter()
        .map(|(key, teams)| Group::new(key, teams))
        .collect();
    session.phase = WorldCupPhase::Groups;
    session.started_at = Some(Utc::now());
    log::info!(
        "World Cup {} started with {} groups",
        session.id,
        session.groups.len()
    );
}

/// Start the Champions League knockout with the built-in team table. Setup -> Playoffs.
pub fn start_champions_league(session: &mut ChampionsLeagueSession) -> Result<(), TournamentError> {
    let table = data::champions_league_table()?;
    start_champions_league_with_table(session, table);
    Ok(())
}

/// Start the Champions League with a caller-supplied table. Any previous run is discarded.
pub fn start_champions_league_with_table(session: &mut ChampionsLeagueSession, table: ClTable) {
    session.reset();
    session.left_playoff_count = table.left_playoffs.len();
    session.playoffs = table
        .left_playoffs
        .into_iter()
        .chain(table.right_playoffs)
        .enumerate()
        .map(|(slot, (home, away))| {
            KnockoutMatch::new(0, slot, Some(home), Some(away), LegFormat::TwoLeg)
        })
        .collect();
    session.direct_pairs = table.direct_pairs;
    session.started_at = Some(Utc::now());
    log::info!(
        "Champions League {} started with {} playoff ties",
        session.id,
        session.playoffs.len()
    );
}

impl WorldCupSession {
    /// New session with the fixed group draw, already in the group phase.
    pub fn start(config: TournamentConfig) -> Result<Self, TournamentError> {
        let mut session = Self::new(config);
        start_world_cup(&mut session)?;
        Ok(session)
    }
}

impl ChampionsLeagueSession {
    /// New session with the built-in playoff ties, already in the playoff phase.
    pub fn start(config: TournamentConfig) -> Result<Self, TournamentError> {
        let mut session = Self::new(config);
        start_champions_league(&mut session)?;
        Ok(session)
    }
}
