//! Single-elimination bracket: rounds of knockout matches and the champion.

use crate::models::game::{KnockoutMatch, LegFormat, MatchId, MatchState};
use crate::models::team::Team;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Rounds of a knockout bracket. Match `i` of round `r` feeds match `i / 2` of round `r + 1`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutBracket {
    pub rounds: Vec<Vec<KnockoutMatch>>,
    /// Winner of the single-match final round.
    pub champion: Option<Team>,
    /// Every round except the final is played home and away.
    pub two_leg_ties: bool,
}

impl KnockoutBracket {
    /// Build a bracket whose first round is `pairings` (team A, team B) in slot order.
    /// The number of pairings must be a power of two.
    pub fn new(pairings: Vec<(Team, Team)>, two_leg_ties: bool) -> Result<Self, TournamentError> {
        if pairings.is_empty() || !pairings.len().is_power_of_two() {
            return Err(TournamentError::InvalidBracketSize(pairings.len() * 2));
        }
        let legs = legs_for(pairings.len(), two_leg_ties);
        let first_round = pairings
            .into_iter()
            .enumerate()
            .map(|(slot, (a, b))| KnockoutMatch::new(0, slot, Some(a), Some(b), legs))
            .collect();
        Ok(Self {
            rounds: vec![first_round],
            champion: None,
            two_leg_ties,
        })
    }

    /// Total number of rounds once the bracket is fully generated.
    pub fn total_rounds(&self) -> usize {
        let first = self.rounds.first().map_or(0, Vec::len);
        first.trailing_zeros() as usize + 1
    }

    /// First round with an undecided match; None once the champion is known.
    pub fn current_round(&self) -> Option<usize> {
        self.rounds
            .iter()
            .position(|round| round.iter().any(|m| m.state() != MatchState::Decided))
    }

    /// Rounds left including the current one (1 for the final), None once the champion is known.
    pub fn rounds_remaining(&self) -> Option<usize> {
        self.current_round().map(|r| self.total_rounds() - r)
    }

    pub fn position(&self, match_id: MatchId) -> Option<(usize, usize)> {
        self.rounds.iter().enumerate().find_map(|(r, round)| {
            round.iter().position(|m| m.id == match_id).map(|i| (r, i))
        })
    }

    pub fn get(&self, match_id: MatchId) -> Option<&KnockoutMatch> {
        self.position(match_id).map(|(r, i)| &self.rounds[r][i])
    }

    pub fn is_complete(&self) -> bool {
        self.champion.is_some()
    }
}

/// Leg format for a round with `matches_in_round` matches. The final is always a single match.
pub fn legs_for(matches_in_round: usize, two_leg_ties: bool) -> LegFormat {
    if two_leg_ties && matches_in_round > 1 {
        LegFormat::TwoLeg
    } else {
        LegFormat::Single
    }
}
