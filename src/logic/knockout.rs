//! Knockout progression: deciding matches and advancing winners through the bracket.
//!
//! Simulated and manual results go through the same `decide` entry point, so round
//! completion and next-round generation never depend on how a match was decided.

use crate::logic::rating::{simulate_match, RatingParams};
use crate::logic::two_leg::{manual_two_leg, simulate_two_leg};
use crate::models::{
    legs_for, DecisionSource, KnockoutBracket, KnockoutMatch, KnockoutResult, LegFormat, MatchId,
    MatchScore, MatchState, Side, Team, TeamId,
};
use rand::Rng;

/// How a Ready match should be decided.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Play it out with the rating model.
    Simulated,
    /// The caller picks the winner; a plausible score is filled in.
    Manual(TeamId),
}

/// Decide a single match in place. Returns false (and leaves the match untouched) unless the
/// match is Ready and, for a manual decision, the chosen team plays in it.
pub fn decide_match<R: Rng + ?Sized>(
    m: &mut KnockoutMatch,
    decision: &Decision,
    rng: &mut R,
    params: &RatingParams,
) -> bool {
    if m.state() != MatchState::Ready {
        log::debug!("Ignoring decision for match {} in state {:?}", m.id, m.state());
        return false;
    }
    let (Some(team_a), Some(team_b)) = (m.team_a.as_ref(), m.team_b.as_ref()) else {
        return false;
    };

    let result = match decision {
        Decision::Simulated => {
            let (score, winner) = match m.legs {
                LegFormat::Single => simulate_single(rng, team_a, team_b, params),
                LegFormat::TwoLeg => {
                    let (score, winner) = simulate_two_leg(rng, team_a, team_b, params);
                    (MatchScore::TwoLeg(score), winner)
                }
            };
            KnockoutResult {
                score,
                winner,
                source: DecisionSource::Simulated,
            }
        }
        Decision::Manual(team_id) => {
            let Some(winner) = m.side_of(team_id) else {
                log::debug!("Team {} is not playing in match {}", team_id, m.id);
                return false;
            };
            let score = match m.legs {
                LegFormat::Single => match winner {
                    Side::A => MatchScore::Single { a: 2, b: 0 },
                    Side::B => MatchScore::Single { a: 0, b: 2 },
                },
                LegFormat::TwoLeg => MatchScore::TwoLeg(manual_two_leg(winner)),
            };
            KnockoutResult {
                score,
                winner,
                source: DecisionSource::Manual,
            }
        }
    };

    log::debug!(
        "Match {} decided ({:?}): {:?}, winner {:?}",
        m.id,
        result.source,
        result.score.totals(),
        result.winner
    );
    m.result = Some(result);
    true
}

/// One match with no draws: a level score gets one extra goal for a coin-flipped side.
fn simulate_single<R: Rng + ?Sized>(
    rng: &mut R,
    team_a: &Team,
    team_b: &Team,
    params: &RatingParams,
) -> (MatchScore, Side) {
    let (mut a, mut b) = simulate_match(rng, team_a, team_b, params);
    if a == b {
        if rng.gen_bool(0.5) {
            a += 1;
        } else {
            b += 1;
        }
    }
    let winner = if a > b { Side::A } else { Side::B };
    (MatchScore::Single { a, b }, winner)
}

fn same_team(slot: &Option<Team>, expected: &Option<Team>) -> bool {
    slot.as_ref().map(|t| &t.id) == expected.as_ref().map(|t| &t.id)
}

impl KnockoutBracket {
    /// Decide a match and advance the bracket. No-op (false) for unknown or non-Ready matches.
    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        match_id: MatchId,
        decision: &Decision,
        rng: &mut R,
        params: &RatingParams,
    ) -> bool {
        let Some((round, slot)) = self.position(match_id) else {
            return false;
        };
        if !decide_match(&mut self.rounds[round][slot], decision, rng, params) {
            return false;
        }
        self.synchronize();
        true
    }

    pub fn simulate<R: Rng + ?Sized>(
        &mut self,
        match_id: MatchId,
        rng: &mut R,
        params: &RatingParams,
    ) -> bool {
        self.decide(match_id, &Decision::Simulated, rng, params)
    }

    pub fn set_manual_winner<R: Rng + ?Sized>(
        &mut self,
        match_id: MatchId,
        winner: &str,
        rng: &mut R,
        params: &RatingParams,
    ) -> bool {
        self.decide(match_id, &Decision::Manual(winner.to_string()), rng, params)
    }

    /// Simulate every Ready match of the current round, in slot order.
    /// Returns the number of matches decided.
    pub fn simulate_round<R: Rng + ?Sized>(&mut self, rng: &mut R, params: &RatingParams) -> usize {
        let Some(round) = self.current_round() else {
            return 0;
        };
        let ids: Vec<MatchId> = self.rounds[round]
            .iter()
            .filter(|m| m.state() == MatchState::Ready)
            .map(|m| m.id)
            .collect();
        ids.into_iter()
            .filter(|&id| self.simulate(id, rng, params))
            .count()
    }

    /// Clear the result of a decided match. Every later match fed by it is reset, unrelated
    /// later matches keep their results, and the champion is cleared if the final is affected.
    pub fn reopen(&mut self, match_id: MatchId) -> bool {
        let Some((round, slot)) = self.position(match_id) else {
            return false;
        };
        let m = &mut self.rounds[round][slot];
        if m.result.is_none() {
            return false;
        }
        m.result = None;
        log::info!("Reopened match {} (round {}, slot {})", match_id, round, slot);
        self.synchronize();
        true
    }

    /// Bring every round in line with the winners of the round before it.
    ///
    /// A complete last round gets a successor pairing `winners[2k]` with `winners[2k + 1]`.
    /// An existing successor keeps any match whose teams still match its feeders; a match
    /// whose teams changed is refilled and its result cleared, which cascades further down.
    fn synchronize(&mut self) {
        self.champion = None;
        let mut round = 0;
        while round < self.rounds.len() {
            let size = self.rounds[round].len();
            if size == 1 {
                self.champion = self.rounds[round][0].winner().cloned();
                if let Some(champion) = &self.champion {
                    log::info!("Champion: {}", champion.name);
                }
                break;
            }

            let winners: Vec<Option<Team>> = self.rounds[round]
                .iter()
                .map(|m| m.winner().cloned())
                .collect();

            if round + 1 == self.rounds.len() {
                if winners.iter().all(Option::is_some) {
                    let legs = legs_for(size / 2, self.two_leg_ties);
                    let next = winners
                        .chunks(2)
                        .enumerate()
                        .map(|(slot, pair)| {
                            KnockoutMatch::new(round + 1, slot, pair[0].clone(), pair[1].clone(), legs)
                        })
                        .collect();
                    log::info!("Round {} complete; generated {} matches", round, size / 2);
                    self.rounds.push(next);
                }
                break;
            }

            for (slot, pair) in winners.chunks(2).enumerate() {
                let next = &mut self.rounds[round + 1][slot];
                if !same_team(&next.team_a, &pair[0]) || !same_team(&next.team_b, &pair[1]) {
                    next.team_a = pair[0].clone();
                    next.team_b = pair[1].clone();
                    next.result = None;
                }
            }
            round += 1;
        }
    }
}
