//! Static team tables, embedded as CSV and parsed on load.

use crate::models::{ClTable, DirectQualifierPair, Team, TeamId, TournamentError};
use serde::Deserialize;
use std::collections::BTreeMap;

const WORLD_CUP_CSV: &str = include_str!("world_cup_teams.csv");
const CHAMPIONS_LEAGUE_CSV: &str = include_str!("champions_league_teams.csv");

/// World Cup 2026 group draw (group key, team ids in pot order).
pub const WORLD_CUP_GROUPS: [(&str, [&str; 4]); 12] = [
    ("A", ["den", "mex", "kor", "rsa"]),
    ("B", ["sui", "ita", "can", "qat"]),
    ("C", ["bra", "mar", "sco", "hai"]),
    ("D", ["tur", "par", "aus", "usa"]),
    ("E", ["ecu", "ger", "civ", "cur"]),
    ("F", ["ned", "jpn", "ukr", "tun"]),
    ("G", ["bel", "irn", "egy", "nzl"]),
    ("H", ["esp", "uru", "ksa", "cpv"]),
    ("I", ["fra", "nor", "sen", "irq"]),
    ("J", ["arg", "aut", "alg", "jor"]),
    ("K", ["por", "col", "uzb", "cod"]),
    ("L", ["eng", "cro", "pan", "gha"]),
];

/// Fixture wheel pools.
pub const STRONG_CLUBS: [&str; 12] = [
    "Real Madrid",
    "Man City",
    "Arsenal",
    "Bayern Münih",
    "PSG",
    "Liverpool",
    "Barcelona",
    "Inter Milan",
    "Juventus",
    "Chelsea",
    "Man United",
    "Atlético Madrid",
];

pub const MEDIUM_CLUBS: [&str; 12] = [
    "Dortmund",
    "Bayer 04",
    "Tottenham",
    "Napoli",
    "Aston Villa",
    "A. Bilbao",
    "Newcastle",
    "Benfica",
    "AC Milan",
    "Fenerbahçe",
    "Galatasaray",
    "Sporting CP",
];

#[derive(Deserialize)]
struct WorldCupRecord {
    id: TeamId,
    name: String,
    pot: u8,
    region: String,
    strength: i32,
    code: String,
}

#[derive(Deserialize)]
struct ClubRecord {
    section: String,
    position: u8,
    role: String,
    id: TeamId,
    name: String,
    short_name: String,
    strength: i32,
    logo: String,
}

impl ClubRecord {
    fn into_team(self) -> Team {
        Team {
            short_name: Some(self.short_name),
            logo: Some(self.logo),
            ..Team::new(self.id, self.name, self.strength)
        }
    }
}

fn table_error(e: csv::Error) -> TournamentError {
    TournamentError::InvalidTeamTable(e.to_string())
}

/// All World Cup teams, in table order.
pub fn world_cup_teams() -> Result<Vec<Team>, TournamentError> {
    let mut reader = csv::Reader::from_reader(WORLD_CUP_CSV.as_bytes());
    reader
        .deserialize::<WorldCupRecord>()
        .map(|record| {
            let r = record.map_err(table_error)?;
            Ok(Team {
                code: Some(r.code),
                pot: Some(r.pot),
                region: Some(r.region),
                ..Team::new(r.id, r.name, r.strength)
            })
        })
        .collect()
}

/// The fixed World Cup groups resolved against the team table.
pub fn world_cup_groups() -> Result<Vec<(String, Vec<Team>)>, TournamentError> {
    let teams = world_cup_teams()?;
    WORLD_CUP_GROUPS
        .iter()
        .map(|(key, ids)| {
            let members = ids
                .iter()
                .map(|id| {
                    teams
                        .iter()
                        .find(|t| t.id == *id)
                        .cloned()
                        .ok_or_else(|| TournamentError::TeamNotFound(id.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((key.to_string(), members))
        })
        .collect()
}

/// Direct-qualifier pairs and the two playoff halves.
pub fn champions_league_table() -> Result<ClTable, TournamentError> {
    let mut reader = csv::Reader::from_reader(CHAMPIONS_LEAGUE_CSV.as_bytes());
    // (section, position) -> (first role, second role)
    let mut slots: BTreeMap<(String, u8), (Option<Team>, Option<Team>)> = BTreeMap::new();
    for record in reader.deserialize::<ClubRecord>() {
        let r = record.map_err(table_error)?;
        let key = (r.section.clone(), r.position);
        let first = matches!(r.role.as_str(), "a" | "home");
        let entry = slots.entry(key).or_default();
        if first {
            entry.0 = Some(r.into_team());
        } else {
            entry.1 = Some(r.into_team());
        }
    }

    let mut table = ClTable {
        direct_pairs: Vec::new(),
        left_playoffs: Vec::new(),
        right_playoffs: Vec::new(),
    };
    for ((section, position), pair) in slots {
        let (Some(a), Some(b)) = pair else {
            return Err(TournamentError::InvalidTeamTable(format!(
                "{} slot {} needs two teams",
                section, position
            )));
        };
        match section.as_str() {
            "direct" => table.direct_pairs.push(DirectQualifierPair {
                pair_id: position,
                team_a: a,
                team_b: b,
            }),
            "left" => table.left_playoffs.push((a, b)),
            "right" => table.right_playoffs.push((a, b)),
            other => {
                return Err(TournamentError::InvalidTeamTable(format!(
                    "unknown section {}",
                    other
                )))
            }
        }
    }
    Ok(table)
}
