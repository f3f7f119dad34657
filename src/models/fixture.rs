//! Fixture wheel state: pools of club names and the fixture list being filled.

use crate::data::{MEDIUM_CLUBS, STRONG_CLUBS};
use serde::{Deserialize, Serialize};

/// Which pairing game the wheel is drawing for.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelMode {
    /// One strong club against one medium club, 12 fixtures.
    #[default]
    StrongVsMedium,
    /// Strong clubs only, 6 fixtures.
    StrongVsStrong,
}

impl WheelMode {
    pub fn fixture_count(self) -> usize {
        match self {
            WheelMode::StrongVsMedium => 12,
            WheelMode::StrongVsStrong => 6,
        }
    }

    pub fn has_medium_wheel(self) -> bool {
        self == WheelMode::StrongVsMedium
    }
}

/// One of the two wheels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wheel {
    Strong,
    Medium,
}

/// A drawn fixture; slots fill left to right.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub team1: Option<String>,
    pub team2: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FixtureWheel {
    pub mode: WheelMode,
    pub strong_pool: Vec<String>,
    pub medium_pool: Vec<String>,
    pub chosen_strong: Vec<String>,
    pub chosen_medium: Vec<String>,
    pub fixtures: Vec<Fixture>,
    /// Index of the fixture currently being filled.
    pub current: usize,
}

impl FixtureWheel {
    /// Fresh wheel with full pools and empty fixtures.
    pub fn new(mode: WheelMode) -> Self {
        let medium_pool = if mode.has_medium_wheel() {
            MEDIUM_CLUBS.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };
        Self {
            mode,
            strong_pool: STRONG_CLUBS.iter().map(|s| s.to_string()).collect(),
            medium_pool,
            chosen_strong: Vec::new(),
            chosen_medium: Vec::new(),
            fixtures: vec![Fixture::default(); mode.fixture_count()],
            current: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.fixtures.len()
    }
}
