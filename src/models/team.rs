//! Team data structure shared by group stage, knockout and fixture wheel.

use serde::{Deserialize, Serialize};

/// Short stable identifier for a team (e.g. `"esp"`, `"liv"`).
pub type TeamId = String;

/// A team as loaded from the static tables. Never mutated during a run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Display name used on bracket cards; falls back to `name`.
    #[serde(default)]
    pub short_name: Option<String>,
    /// Relative strength rating, roughly 60..=93.
    pub strength: i32,
    /// Flag / country code (cosmetic).
    #[serde(default)]
    pub code: Option<String>,
    /// Crest URL (cosmetic).
    #[serde(default)]
    pub logo: Option<String>,
    /// Draw pot (World Cup teams only).
    #[serde(default)]
    pub pot: Option<u8>,
    /// Confederation (World Cup teams only).
    #[serde(default)]
    pub region: Option<String>,
}

impl Team {
    /// Create a team with only the fields the simulation reads.
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>, strength: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_name: None,
            strength,
            code: None,
            logo: None,
            pot: None,
            region: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}
